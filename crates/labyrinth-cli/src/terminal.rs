//! The crossterm-backed screen.
//!
//! Opening the screen switches to raw mode on the alternate screen. The
//! terminal is restored when the screen is dropped, and also from a panic
//! hook so a crash does not leave the shell unusable.

use std::io::{self, Stdout, Write, stdout};
use std::panic;
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};
use labyrinth_core::error::GameError;
use labyrinth_core::screen::{Color, Screen, Style};
use tracing::{error, info};

const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// Real terminal output.
pub struct CrosstermScreen {
    out: Stdout,
}

impl CrosstermScreen {
    /// Takes over the terminal.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the terminal cannot enter raw mode or the
    /// alternate screen.
    pub fn open() -> io::Result<Self> {
        reset_terminal_on_panic();
        set_terminal_state()?;
        info!("terminal opened");
        Ok(Self { out: stdout() })
    }
}

fn set_terminal_state() -> io::Result<()> {
    execute!(stdout(), Hide, EnterAlternateScreen, SetTitle("labyrinth"))?;
    enable_raw_mode()
}

/// Leaves raw mode and the alternate screen without waiting for the screen
/// to be dropped.
///
/// # Errors
///
/// Returns the I/O error if the terminal cannot be reset.
pub fn reset_terminal_state() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), ResetColor, Show, LeaveAlternateScreen)
}

fn reset_terminal_on_panic() {
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = reset_terminal_state() {
            error!(error = %e, "failed to reset terminal after panic");
        }
        default_hook(panic_info);
    }));
}

/// Maps a game colour onto the terminal palette.
#[must_use]
pub fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::White => TermColor::White,
        Color::Grey => TermColor::Grey,
        Color::Red => TermColor::Red,
        Color::Green => TermColor::Green,
        Color::DarkGreen => TermColor::DarkGreen,
        Color::Cyan => TermColor::Cyan,
        Color::DarkBlue => TermColor::DarkBlue,
        Color::SkyBlue => TermColor::Rgb {
            r: 135,
            g: 206,
            b: 235,
        },
        Color::Yellow => TermColor::Yellow,
    }
}

impl Screen for CrosstermScreen {
    fn size(&self) -> (u16, u16) {
        crossterm::terminal::size().unwrap_or(FALLBACK_SIZE)
    }

    fn clear(&mut self, background: Color) -> Result<(), GameError> {
        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(term_color(background)),
            Clear(ClearType::All)
        )?;
        Ok(())
    }

    fn draw_text(&mut self, x: u16, y: u16, text: &str, style: Style) -> Result<(), GameError> {
        queue!(
            self.out,
            MoveTo(x, y),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(term_color(style.fg)),
            SetBackgroundColor(term_color(style.bg))
        )?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        if style.reverse {
            queue!(self.out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), GameError> {
        self.out.flush()?;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

impl Drop for CrosstermScreen {
    fn drop(&mut self) {
        match reset_terminal_state() {
            Ok(()) => info!("terminal restored"),
            Err(e) => error!(error = %e, "failed to restore terminal"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sky_blue_is_true_colour() {
        assert_eq!(
            term_color(Color::SkyBlue),
            TermColor::Rgb {
                r: 135,
                g: 206,
                b: 235
            }
        );
        assert_eq!(term_color(Color::Reset), TermColor::Reset);
        assert_eq!(term_color(Color::DarkBlue), TermColor::DarkBlue);
    }
}
