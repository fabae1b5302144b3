//! Game over: the success banner shown after leaving the maze.

use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::screen::{Color, Screen, Style};

use crate::command::{Command, Payload, SectionId};
use crate::render::{draw_block, draw_centered};
use crate::section::{GameSection, Tick};

const BANNER: [&str; 8] = [
    r" _______           _______  _______  _______  _______  _______  _",
    r"(  ____ \|\     /|(  ____ \(  ____ \(  ____ \(  ____ \(  ____ \( )",
    r"| (    \/| )   ( || (    \/| (    \/| (    \/| (    \/| (    \/| |",
    r"| (_____ | |   | || |      | |      | (__    | (_____ | (_____ | |",
    r"(_____  )| |   | || |      | |      |  __)   (_____  )(_____  )| |",
    r"      ) || |   | || |      | |      | (            ) |      ) |(_)",
    r"/\____) || (___) || (____/\| (____/\| (____/\/\____) |/\____) | _",
    r"\_______)(_______)(_______/(_______/(_______/\_______)\_______)(_)",
];

/// Shows the banner until any key is pressed, then ends the game.
#[derive(Debug, Default)]
pub struct GameOverSection;

impl GameSection for GameOverSection {
    fn id(&self) -> SectionId {
        SectionId::GameOver
    }

    fn handle_start(&mut self, _payload: Payload) -> Result<bool, GameError> {
        Ok(true)
    }

    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError> {
        Ok(match input {
            Some(_) => Tick::Finish { render: false },
            None => Tick::Idle,
        })
    }

    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError> {
        screen.clear(Color::SkyBlue)?;
        draw_centered(
            screen,
            0,
            "Press any key to exit.",
            Style::colored(Color::DarkBlue, Color::SkyBlue).underline(),
        )?;
        draw_block(
            screen,
            &BANNER,
            Style::colored(Color::DarkGreen, Color::SkyBlue),
        )?;
        screen.flush()
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        Ok(Command::EndGame)
    }
}
