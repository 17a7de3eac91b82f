//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness comes from an injected, seedable RNG so rounds can be replayed in tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{GameConfig, GRID_HEIGHT, GRID_WIDTH};
pub use engine::{Game, Phase, TickEvent};
pub use food::Food;
pub use state::{Position, Snake, StepOutcome};
