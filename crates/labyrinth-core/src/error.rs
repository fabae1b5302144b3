//! Game error types.

use thiserror::Error;

/// Top-level error type shared by every Labyrinth crate.
///
/// Both data variants are fatal to the running session. A move that is
/// blocked by a wall or another entity is not an error and never shows up
/// here.
#[derive(Debug, Error)]
pub enum GameError {
    /// Resource data is malformed or missing, or a transition names a
    /// section that does not exist.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A generation or world invariant was broken. Signals a defect in the
    /// algorithm, never a recoverable condition.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The terminal collaborator failed to draw or flush.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}
