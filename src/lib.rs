//! Term Snake - the classic Snake game in a terminal, with a shared high-score board
//!
//! This library provides:
//! - Core game logic and the command-driven game session (game module)
//! - The leaderboard client and its score stores (leaderboard module)
//! - TUI rendering and keyboard input (render, input modules)
//! - Execution modes: interactive play and a score listing (modes module)

pub mod config;
pub mod game;
pub mod input;
pub mod leaderboard;
pub mod logging;
pub mod modes;
pub mod render;
