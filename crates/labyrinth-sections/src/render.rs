//! Small drawing helpers shared by the phases.

use labyrinth_core::error::GameError;
use labyrinth_core::screen::{Screen, Style, centered_x, display_width};

/// Draws `text` horizontally centred on row `y`.
///
/// # Errors
///
/// Returns `GameError::Terminal` if drawing fails.
pub fn draw_centered(
    screen: &mut dyn Screen,
    y: u16,
    text: &str,
    style: Style,
) -> Result<(), GameError> {
    let (width, _) = screen.size();
    screen.draw_text(centered_x(width, text), y, text, style)
}

/// Draws `lines` as a block centred on the screen, left-aligned within the
/// block. Returns the row of the first line.
///
/// # Errors
///
/// Returns `GameError::Terminal` if drawing fails.
pub fn draw_block<S: AsRef<str>>(
    screen: &mut dyn Screen,
    lines: &[S],
    style: Style,
) -> Result<u16, GameError> {
    let (width, height) = screen.size();
    let widest = lines
        .iter()
        .map(AsRef::as_ref)
        .max_by_key(|line| display_width(line))
        .unwrap_or("");
    let x = centered_x(width, widest);
    let rows = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let top = height.saturating_sub(rows) / 2;
    for (offset, line) in (0u16..).zip(lines) {
        screen.draw_text(x, top + offset, line.as_ref(), style)?;
    }
    Ok(top)
}
