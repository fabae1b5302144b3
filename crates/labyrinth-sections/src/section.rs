//! The phase contract and its inner tick loop.

use labyrinth_core::error::GameError;
use labyrinth_core::input::{InputSource, Key};
use labyrinth_core::screen::Screen;
use tracing::debug;

use crate::command::{Command, Payload, SectionId};

/// Outcome of one processing tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing changed.
    Idle,
    /// State changed; render it.
    Render,
    /// The phase is done, optionally after a final render.
    Finish { render: bool },
}

/// One phase of the game.
///
/// Instances live for the whole process, so state kept in `self` survives
/// re-entry. Hooks are always called in the order `handle_start`, then
/// `run_processing` (with `run_rendering` when asked) until a
/// [`Tick::Finish`], then `handle_stop`.
pub trait GameSection: Send {
    fn id(&self) -> SectionId;

    /// Accepts the start payload. Returns whether to render immediately.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` for a payload the phase does not
    /// handle.
    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError>;

    /// Advances one tick with at most one keystroke.
    ///
    /// # Errors
    ///
    /// Returns any fatal error raised by the phase's logic.
    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError>;

    /// Draws the current state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Terminal` if drawing fails.
    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError>;

    /// Produces the command for the state machine.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if the phase stopped without
    /// an outcome.
    fn handle_stop(&mut self) -> Result<Command, GameError>;
}

/// Runs `section` from start to stop and returns its command.
///
/// # Errors
///
/// Propagates the first error raised by any hook.
pub fn run_section(
    section: &mut dyn GameSection,
    payload: Payload,
    input: &mut dyn InputSource,
    screen: &mut dyn Screen,
) -> Result<Command, GameError> {
    debug!(section = %section.id(), ?payload, "section starting");
    if section.handle_start(payload)? {
        section.run_rendering(screen)?;
    }

    loop {
        match section.run_processing(input.poll_key())? {
            Tick::Idle => {}
            Tick::Render => section.run_rendering(screen)?,
            Tick::Finish { render } => {
                if render {
                    section.run_rendering(screen)?;
                }
                break;
            }
        }
    }

    let command = section.handle_stop()?;
    debug!(section = %section.id(), ?command, "section stopped");
    Ok(command)
}
