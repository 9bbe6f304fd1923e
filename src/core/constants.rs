// Animation and interaction tuning constants.
use std::f32::consts::PI;
use std::time::Duration;

// Gift box: exponential approach rate of group progress (per second)
pub const BOX_SCALE_RATE: f32 = 10.0;
// Parts at or below this progress are culled instead of drawn
pub const VISIBILITY_THRESHOLD: f32 = 0.01;
// Body starts shrinking this long after the lid
pub const BODY_DELAY: Duration = Duration::from_millis(500);

// Named sub-meshes of the gift box model
pub const LID_PART_NAMES: &[&str] = &[
    "Cube001", "Torus", "Cylinder", "Cube002", "Cube003", "Cube004", "Cube005", "Cube006",
    "Cube007", "Cube008", "Cube009", "Cube010", "Cube011", "Cube012", "Cube013",
];
pub const BODY_PART_NAMES: &[&str] = &["Cube_Body_0"];

// Gift card: distance in front of the camera while inspecting
pub const INSPECT_DISTANCE: f32 = 1.2;
pub const INSPECT_RATE: f32 = 12.0;
pub const REST_RATE: f32 = 8.0;
pub const FLIP_RATE: f32 = 10.0;

// Resting pose in the parent's local frame: lying face-up, slightly turned
pub const REST_POSITION: [f32; 3] = [0.0, 20.0, 0.0];
pub const REST_EULER_XYZ: [f32; 3] = [-PI / 2.0, 0.0, 0.2];

// Card geometry
pub const CARD_WIDTH: f32 = 1.6;
pub const CARD_HEIGHT: f32 = 1.2;
pub const CARD_BACK_OFFSET: f32 = 0.001;
pub const CARD_BACK_COLOR: [f32; 3] = [0.969, 0.949, 1.0]; // #f7f2ff
