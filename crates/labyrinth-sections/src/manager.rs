//! The outer state machine that switches between phases.

use std::collections::HashMap;

use labyrinth_core::error::GameError;
use labyrinth_core::input::InputSource;
use labyrinth_core::screen::Screen;
use tracing::info;

use crate::command::{Command, Payload, SectionId};
use crate::section::{GameSection, run_section};

/// Registry of phases plus the loop that sequences them.
///
/// A session starts at [`SectionId::Bootstrap`] with [`Payload::StartGame`]
/// and runs until some phase returns [`Command::EndGame`].
#[derive(Default)]
pub struct SectionStateMachine {
    sections: HashMap<SectionId, Box<dyn GameSection>>,
}

impl SectionStateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `section`, replacing any phase registered under the same id.
    pub fn register(&mut self, section: Box<dyn GameSection>) {
        self.sections.insert(section.id(), section);
    }

    /// Builder form of [`SectionStateMachine::register`].
    #[must_use]
    pub fn with_section(mut self, section: Box<dyn GameSection>) -> Self {
        self.register(section);
        self
    }

    #[must_use]
    pub fn is_registered(&self, id: SectionId) -> bool {
        self.sections.contains_key(&id)
    }

    /// Runs a full session, blocking until a phase ends the game.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` when a command targets an
    /// unregistered phase, and propagates any phase error.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        screen: &mut dyn Screen,
    ) -> Result<(), GameError> {
        let mut active = SectionId::Bootstrap;
        let mut payload = Payload::StartGame;

        loop {
            match self.run_one(active, payload, input, screen)? {
                Command::EndGame => {
                    info!(section = %active, "game ended");
                    return Ok(());
                }
                Command::StartGame => {
                    info!(section = %active, "game restarting");
                    active = SectionId::Bootstrap;
                    payload = Payload::StartGame;
                }
                Command::ChangeSection { target, data } => {
                    info!(from = %active, to = %target, "switching section");
                    active = target;
                    payload = data;
                }
            }
        }
    }

    /// Runs only `target` with `payload`, then the debug phase showing the
    /// command `target` produced.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if either phase is unregistered,
    /// and propagates any phase error.
    pub fn run_isolated(
        &mut self,
        target: SectionId,
        payload: Payload,
        input: &mut dyn InputSource,
        screen: &mut dyn Screen,
    ) -> Result<Command, GameError> {
        info!(section = %target, "running section in isolation");
        let produced = self.run_one(target, payload, input, screen)?;
        self.run_one(
            SectionId::Debug,
            Payload::Finished(Box::new(produced.clone())),
            input,
            screen,
        )?;
        Ok(produced)
    }

    fn run_one(
        &mut self,
        id: SectionId,
        payload: Payload,
        input: &mut dyn InputSource,
        screen: &mut dyn Screen,
    ) -> Result<Command, GameError> {
        let section = self
            .sections
            .get_mut(&id)
            .ok_or_else(|| GameError::Configuration(format!("section {id} is not registered")))?;
        run_section(section.as_mut(), payload, input, screen)
    }
}
