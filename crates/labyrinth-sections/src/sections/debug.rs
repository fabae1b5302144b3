//! Debug: shows what an isolated phase produced.

use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::screen::{Color, Screen, Style};

use crate::command::{Command, Payload, SectionId};
use crate::section::{GameSection, Tick};

/// Displays its start payload and ends the game on any key.
#[derive(Debug)]
pub struct DebugSection {
    shown: Payload,
}

impl Default for DebugSection {
    fn default() -> Self {
        Self {
            shown: Payload::Empty,
        }
    }
}

impl DebugSection {
    fn lines(&self) -> Vec<String> {
        match &self.shown {
            Payload::Finished(command) => match command.as_ref() {
                Command::ChangeSection { target, data } => {
                    vec![format!("ChangeSection -> {target}"), format!("{data:?}")]
                }
                other => vec![format!("{other:?}")],
            },
            other => vec![format!("{other:?}")],
        }
    }
}

impl GameSection for DebugSection {
    fn id(&self) -> SectionId {
        SectionId::Debug
    }

    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError> {
        self.shown = payload;
        Ok(true)
    }

    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError> {
        Ok(match input {
            Some(_) => Tick::Finish { render: false },
            None => Tick::Idle,
        })
    }

    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError> {
        let style = Style::colored(Color::White, Color::Black);
        screen.clear(Color::Black)?;
        let lines = self.lines();
        for (y, line) in (0u16..).zip(&lines) {
            screen.draw_text(0, y, line, style)?;
        }
        let footer_y = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(1);
        screen.draw_text(0, footer_y, "Press any key to end the game...", style)?;
        screen.flush()
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        Ok(Command::EndGame)
    }
}
