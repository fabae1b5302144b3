//! Drawing contract implemented by the terminal adapter.
//!
//! Sections only ever see a `&mut dyn Screen`. Coordinates are terminal
//! cells, `(0, 0)` is the top-left corner.

use std::time::Duration;

use unicode_width::UnicodeWidthStr;

use crate::error::GameError;

/// Terminal colours used by the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Reset,
    Black,
    White,
    Grey,
    Red,
    Green,
    DarkGreen,
    Cyan,
    DarkBlue,
    SkyBlue,
    Yellow,
}

/// Text attributes for a single draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub underline: bool,
    pub reverse: bool,
}

impl Style {
    /// Plain style with the given foreground and background.
    #[must_use]
    pub fn colored(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    #[must_use]
    pub fn reverse(mut self) -> Self {
        self.reverse = true;
        self
    }
}

/// The terminal as seen by game sections.
pub trait Screen {
    /// Returns `(width, height)` in cells.
    fn size(&self) -> (u16, u16);

    /// Clears the whole screen to the given background.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Terminal` if the terminal write fails.
    fn clear(&mut self, background: Color) -> Result<(), GameError>;

    /// Draws `text` starting at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Terminal` if the terminal write fails.
    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> Result<(), GameError>;

    /// Flushes queued output.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Terminal` if the flush fails.
    fn flush(&mut self) -> Result<(), GameError>;

    /// Blocks the game thread, used for paced text reveal.
    fn pause(&mut self, duration: Duration);
}

/// Display width of `text` in terminal cells (emoji count as two).
#[must_use]
pub fn display_width(text: &str) -> u16 {
    u16::try_from(UnicodeWidthStr::width(text)).unwrap_or(u16::MAX)
}

/// Column at which `text` must start to appear centred on a `width`-wide screen.
#[must_use]
pub fn centered_x(width: u16, text: &str) -> u16 {
    width.saturating_sub(display_width(text)) / 2
}
