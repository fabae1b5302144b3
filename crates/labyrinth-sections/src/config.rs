//! Gameplay settings handed down from the command line.

use std::time::Duration;

/// Maze size, pacing and seeding for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Maze width in rooms, including the side borders.
    pub width: usize,
    /// Maze height in rooms, including the entrance and exit rows.
    pub height: usize,
    /// Delay between characters of a revealed prompt.
    pub typing_delay: Duration,
    /// Pause after the prompt, before the choices appear.
    pub prompt_pause: Duration,
    /// Pause after each revealed choice.
    pub choice_delay: Duration,
    /// How long the correct/incorrect verdict stays up.
    pub reveal_pause: Duration,
    /// Fixed seed for mazes and question picks; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    /// Sets the prompt reveal speed in characters per second.
    #[must_use]
    pub fn with_typing_speed(mut self, chars_per_second: u32) -> Self {
        self.typing_delay = Duration::from_secs(1) / chars_per_second.max(1);
        self
    }

    /// Drops every pause. Used by tests and scripted runs.
    #[must_use]
    pub fn without_pauses(mut self) -> Self {
        self.typing_delay = Duration::ZERO;
        self.prompt_pause = Duration::ZERO;
        self.choice_delay = Duration::ZERO;
        self.reveal_pause = Duration::ZERO;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            typing_delay: Duration::from_millis(25),
            prompt_pause: Duration::from_secs(1),
            choice_delay: Duration::from_millis(750),
            reveal_pause: Duration::from_secs(3),
            seed: None,
        }
    }
}
