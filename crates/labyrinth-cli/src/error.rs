//! Labyrinth — binary error types.

use labyrinth_core::error::GameError;
use thiserror::Error;

/// Startup and runtime errors for the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    /// A command line value or the log destination is unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The game itself failed.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Terminal setup, polling or reading failed.
    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The game thread panicked instead of returning.
    #[error("game thread panicked")]
    GameThreadPanicked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_is_shown_as_is() {
        let err = AppError::from(GameError::Configuration("unknown section: lobby".into()));
        assert_eq!(err.to_string(), "configuration error: unknown section: lobby");
    }

    #[test]
    fn test_io_error_is_terminal_error() {
        let err = AppError::from(std::io::Error::other("not a tty"));
        match err {
            AppError::Terminal(inner) => assert_eq!(inner.to_string(), "not a tty"),
            other => panic!("expected Terminal, got {other:?}"),
        }
    }
}
