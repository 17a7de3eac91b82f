//! Wrap Snake - a terminal arcade Snake game on a wrap-around grid
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard and pointer input mapping (input module)
//! - TUI rendering (render module)
//! - Session metrics (metrics module)
//! - The interactive game loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
