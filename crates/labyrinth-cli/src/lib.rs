//! Labyrinth — terminal front end.
//!
//! Owns everything that touches the real terminal: argument parsing, log
//! setup, the crossterm screen, and the input pump that feeds keystrokes to
//! the game thread.

pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod session;
pub mod terminal;
