pub mod constants;
pub mod cursor;
pub mod giftbox;
pub mod giftcard;
pub mod parts;
pub mod pose;
pub mod smoothing;

pub use cursor::Cursor;
pub use giftbox::{BoxConfig, BoxState, GiftBox};
pub use giftcard::{CardConfig, CardFace, CardPose, GiftCard};
pub use parts::{PartId, PartNodes};
pub use pose::Pose;
