//! Keyboard and pointer input mapping

pub mod handler;
pub mod touch;

pub use handler::{InputHandler, KeyAction};
pub use touch::{Button, DirectionPad, Point};
