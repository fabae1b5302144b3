//! Transition commands and the payloads they carry between phases.

use std::fmt;
use std::str::FromStr;

use labyrinth_core::error::GameError;

/// Glyph the player starts with before choosing a character.
pub const DEFAULT_CHARACTER: &str = "🙂";

/// Name of a game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionId {
    Bootstrap,
    Menu,
    OverWorld,
    Question,
    GameOver,
    Debug,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Bootstrap,
        SectionId::Menu,
        SectionId::OverWorld,
        SectionId::Question,
        SectionId::GameOver,
        SectionId::Debug,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SectionId::Bootstrap => "bootstrap",
            SectionId::Menu => "menu",
            SectionId::OverWorld => "over_world",
            SectionId::Question => "question",
            SectionId::GameOver => "game_over",
            SectionId::Debug => "debug",
        }
    }

    /// The payload a phase starts with when run on its own.
    #[must_use]
    pub fn default_payload(self) -> Payload {
        match self {
            SectionId::Bootstrap => Payload::StartGame,
            SectionId::Menu => Payload::Menu(MenuPayload::StartMenu {
                character: DEFAULT_CHARACTER.to_owned(),
            }),
            SectionId::OverWorld => Payload::StartOverWorld {
                character: DEFAULT_CHARACTER.to_owned(),
            },
            SectionId::Question => Payload::NewQuestion { prefix: None },
            SectionId::GameOver => Payload::Empty,
            SectionId::Debug => Payload::Finished(Box::new(Command::EndGame)),
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SectionId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| GameError::Configuration(format!("unknown section: {s}")))
    }
}

/// What the state machine does once a phase stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restart at bootstrap.
    StartGame,
    /// Switch to `target`, handing it `data`.
    ChangeSection { target: SectionId, data: Payload },
    /// Terminate the session.
    EndGame,
}

impl Command {
    #[must_use]
    pub fn change(target: SectionId, data: Payload) -> Self {
        Command::ChangeSection { target, data }
    }
}

/// Which menu to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuPayload {
    StartMenu { character: String },
    CharacterMenu { character: String },
}

/// Start data handed to a phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    StartGame,
    Menu(MenuPayload),
    StartOverWorld { character: String },
    NewQuestion { prefix: Option<String> },
    QuestionResult { was_correct: bool },
    /// The command an isolated phase produced, shown by the debug phase.
    Finished(Box<Command>),
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_names_round_trip() {
        for id in SectionId::ALL {
            assert_eq!(id.name().parse::<SectionId>().unwrap(), id);
        }
    }

    #[test]
    fn test_unknown_section_is_configuration_error() {
        match "lobby".parse::<SectionId>().unwrap_err() {
            GameError::Configuration(msg) => assert_eq!(msg, "unknown section: lobby"),
            other => panic!("expected Configuration, got {other:?}"),
        }
    }

    #[test]
    fn test_default_payloads() {
        assert_eq!(SectionId::Bootstrap.default_payload(), Payload::StartGame);
        assert_eq!(
            SectionId::Question.default_payload(),
            Payload::NewQuestion { prefix: None }
        );
    }
}
