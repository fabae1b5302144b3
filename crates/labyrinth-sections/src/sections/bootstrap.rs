//! Bootstrap: the entry phase that hands over to the start menu.

use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::screen::Screen;

use crate::command::{Command, DEFAULT_CHARACTER, MenuPayload, Payload, SectionId};
use crate::section::{GameSection, Tick};

/// Accepts only [`Payload::StartGame`] and finishes on its first tick.
#[derive(Debug, Default)]
pub struct BootstrapSection;

impl GameSection for BootstrapSection {
    fn id(&self) -> SectionId {
        SectionId::Bootstrap
    }

    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError> {
        match payload {
            Payload::StartGame => Ok(false),
            other => Err(GameError::Configuration(format!(
                "bootstrap only handles starting a game, got {other:?}"
            ))),
        }
    }

    fn run_processing(&mut self, _input: Option<Key>) -> Result<Tick, GameError> {
        Ok(Tick::Finish { render: false })
    }

    fn run_rendering(&mut self, _screen: &mut dyn Screen) -> Result<(), GameError> {
        Err(GameError::InvariantViolation(
            "bootstrap has nothing to render".into(),
        ))
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        Ok(Command::change(
            SectionId::Menu,
            Payload::Menu(MenuPayload::StartMenu {
                character: DEFAULT_CHARACTER.to_owned(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_other_payloads() {
        let result = BootstrapSection.handle_start(Payload::Empty);
        assert!(matches!(result, Err(GameError::Configuration(_))));
    }

    #[test]
    fn test_finishes_without_rendering() {
        let mut section = BootstrapSection;
        assert!(!section.handle_start(Payload::StartGame).unwrap());
        assert_eq!(
            section.run_processing(None).unwrap(),
            Tick::Finish { render: false }
        );
    }
}
