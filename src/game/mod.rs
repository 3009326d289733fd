//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! A [`GameSession`] is the owned handle a driver ticks and feeds commands to.

pub mod action;
pub mod config;
pub mod engine;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::{
    GRID_BORDER, GameConfig, MAX_GRID_HEIGHT, MAX_GRID_WIDTH, TILE_COLUMNS, TILE_ROWS,
};
pub use engine::{GameEngine, StepResult};
pub use session::{Flow, GameSession, Phase};
pub use state::{CollisionType, GameState, Position, Snake, Velocity};
