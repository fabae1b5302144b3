//! Shared test mocks and utilities for the Labyrinth maze game.

mod input;
mod rng;
mod screen;

pub use input::ScriptedInput;
pub use rng::{MockRng, SequenceRng};
pub use screen::{DrawCall, RecordingScreen};
