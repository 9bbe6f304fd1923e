use glam::Vec3;

// Scene layout and rendering constants used by the web frontend.

// Assets
pub const GIFTBOX_URL: &str = "/giftbox.glb";
pub const CARD_IMAGE_URL: &str = "/card.png";

// Camera
pub const CAMERA_EYE: Vec3 = Vec3::new(0.0, 2.2, 4.5);
pub const CAMERA_TARGET: Vec3 = Vec3::new(0.0, 0.6, 0.0);
pub const CAMERA_FOV_Y: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_NEAR: f32 = 0.05;
pub const CAMERA_FAR: f32 = 100.0;

// Placement of the box on the table
pub const BOX_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const BOX_SCALE: f32 = 1.0;

// The card lives in a scaled group so its resting offset (0, 20, 0) lands
// just above the table surface
pub const CARD_GROUP_POSITION: Vec3 = Vec3::new(0.0, 0.0, 0.0);
pub const CARD_GROUP_SCALE: f32 = 0.02;
// Card quads are authored at world size; undo the group scale
pub const CARD_QUAD_SCALE: f32 = 1.0 / CARD_GROUP_SCALE;

// Lighting
pub const LIGHT_DIR: Vec3 = Vec3::new(-0.4, -1.0, -0.6); // points from light toward scene
pub const AMBIENT: f32 = 0.35;

// Frames longer than this are treated as a stall, not as elapsed animation time
pub const MAX_FRAME_DT_SEC: f32 = 0.1;

pub const CLEAR_COLOR: [f64; 3] = [0.06, 0.05, 0.09];
