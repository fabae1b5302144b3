//! Recording screen — captures draw calls instead of writing to a terminal.

use std::time::Duration;

use labyrinth_core::error::GameError;
use labyrinth_core::screen::{Color, Screen, Style};

/// One captured `draw_text` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCall {
    pub x: u16,
    pub y: u16,
    pub text: String,
    pub style: Style,
}

/// A screen that records everything drawn on it. Pauses are recorded but
/// never sleep.
#[derive(Debug)]
pub struct RecordingScreen {
    width: u16,
    height: u16,
    /// Draw calls since the last `clear`.
    pub calls: Vec<DrawCall>,
    /// Number of `clear` calls.
    pub clears: usize,
    /// Number of `flush` calls.
    pub flushes: usize,
    /// Total requested pause time.
    pub paused: Duration,
}

impl RecordingScreen {
    /// A recording screen with the given geometry.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
            clears: 0,
            flushes: 0,
            paused: Duration::ZERO,
        }
    }

    /// All text drawn since the last clear, joined with newlines.
    #[must_use]
    pub fn text(&self) -> String {
        self.calls
            .iter()
            .map(|call| call.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any draw call since the last clear contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.calls.iter().any(|call| call.text.contains(needle))
    }
}

impl Default for RecordingScreen {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Screen for RecordingScreen {
    fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    fn clear(&mut self, _background: Color) -> Result<(), GameError> {
        self.calls.clear();
        self.clears += 1;
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> Result<(), GameError> {
        self.calls.push(DrawCall {
            x,
            y,
            text: text.to_owned(),
            style,
        });
        Ok(())
    }

    fn flush(&mut self) -> Result<(), GameError> {
        self.flushes += 1;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        self.paused += duration;
    }
}
