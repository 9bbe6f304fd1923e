pub mod keyboard;
pub mod pointer;

pub use keyboard::wire_global_keydown;
pub use pointer::{refresh_hover, wire_input_handlers, InputWiring};
