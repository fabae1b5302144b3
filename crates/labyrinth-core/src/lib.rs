//! Labyrinth Core — shared abstractions.
//!
//! This crate defines the error taxonomy, the randomness abstraction and the
//! two seams the game uses to talk to a terminal: [`input::InputSource`] for
//! decoded keystrokes and [`screen::Screen`] for drawing. It contains no
//! terminal code itself.

pub mod error;
pub mod input;
pub mod rng;
pub mod screen;
