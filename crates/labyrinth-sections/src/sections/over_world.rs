//! Over world: walking the maze room by room.

use std::sync::Arc;

use labyrinth_content::application::loader::ResourceTables;
use labyrinth_core::error::GameError;
use labyrinth_core::input::Key;
use labyrinth_core::rng::DeterministicRng;
use labyrinth_core::screen::{Color, Screen, Style};
use labyrinth_world::domain::direction::{Direction, Position};
use labyrinth_world::domain::entity::{Entity, NPC, PLAYER};
use labyrinth_world::domain::world::WorldGrid;
use tracing::{debug, info};

use crate::command::{Command, Payload, SectionId};
use crate::config::GameConfig;
use crate::render::{draw_block, draw_centered};
use crate::section::{GameSection, Tick};

const HELP: &str = "Arrows: move   Tab: talk   Esc: quit";

/// Why the over world stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Exit {
    Question,
    GameOver,
    Quit,
}

/// Holds the current world between questions.
pub struct OverWorldSection {
    config: GameConfig,
    tables: Arc<ResourceTables>,
    rng: Box<dyn DeterministicRng>,
    world: Option<WorldGrid>,
    exit: Option<Exit>,
}

impl OverWorldSection {
    #[must_use]
    pub fn new(
        config: GameConfig,
        tables: Arc<ResourceTables>,
        rng: Box<dyn DeterministicRng>,
    ) -> Self {
        Self {
            config,
            tables,
            rng,
            world: None,
            exit: None,
        }
    }

    /// The world being explored, once started.
    #[must_use]
    pub fn world(&self) -> Option<&WorldGrid> {
        self.world.as_ref()
    }

    fn world_mut(&mut self) -> Result<&mut WorldGrid, GameError> {
        self.world.as_mut().ok_or_else(|| {
            GameError::Configuration("over world resumed before a world was generated".into())
        })
    }

    fn new_world(&mut self, character: &str) -> Result<(), GameError> {
        let mut world = WorldGrid::generate(
            self.config.width,
            self.config.height,
            &self.tables.templates,
            &self.tables.glyphs,
            self.rng.as_mut(),
        )?;
        world.enter(Entity::player(character, Position::new(0, 0)))?;
        info!(
            width = self.config.width,
            height = self.config.height,
            "new world entered"
        );
        self.world = Some(world);
        Ok(())
    }

    fn walk(&mut self, direction: Direction) -> Result<Tick, GameError> {
        let world = self.world_mut()?;
        let room = world.active_room_mut()?;
        if !room.move_entity(direction, PLAYER) {
            return Ok(Tick::Idle);
        }
        let Some(side) = room.player_exit_side() else {
            return Ok(Tick::Render);
        };

        let still_running = world.travel(side)?;
        debug!(row = world.location().0, col = world.location().1, "entered room");
        if still_running {
            Ok(Tick::Render)
        } else {
            self.exit = Some(Exit::GameOver);
            Ok(Tick::Finish { render: false })
        }
    }
}

fn direction_for(key: Key) -> Option<Direction> {
    match key {
        Key::Up => Some(Direction::Up),
        Key::Right => Some(Direction::Right),
        Key::Down => Some(Direction::Down),
        Key::Left => Some(Direction::Left),
        _ => None,
    }
}

impl GameSection for OverWorldSection {
    fn id(&self) -> SectionId {
        SectionId::OverWorld
    }

    fn handle_start(&mut self, payload: Payload) -> Result<bool, GameError> {
        self.exit = None;
        match payload {
            Payload::StartOverWorld { character } => self.new_world(&character)?,
            Payload::QuestionResult { was_correct: true } => {
                let stepped = self.world_mut()?.active_room_mut()?.npc_step_aside(NPC);
                debug!(stepped, "npc stepped aside");
            }
            Payload::QuestionResult { was_correct: false } => {
                self.world_mut()?.reset_to_start()?;
            }
            other => {
                return Err(GameError::Configuration(format!(
                    "over world cannot start with {other:?}"
                )));
            }
        }
        Ok(true)
    }

    fn run_processing(&mut self, input: Option<Key>) -> Result<Tick, GameError> {
        let Some(key) = input else {
            return Ok(Tick::Idle);
        };

        if let Some(direction) = direction_for(key) {
            return self.walk(direction);
        }

        match key {
            Key::Tab => {
                let world = self.world_mut()?;
                if world.active_room()?.scan_adjacent_npc().is_some() {
                    self.exit = Some(Exit::Question);
                    Ok(Tick::Finish { render: false })
                } else {
                    Ok(Tick::Idle)
                }
            }
            Key::Escape => {
                self.exit = Some(Exit::Quit);
                Ok(Tick::Finish { render: false })
            }
            _ => Ok(Tick::Idle),
        }
    }

    fn run_rendering(&mut self, screen: &mut dyn Screen) -> Result<(), GameError> {
        let world = self
            .world
            .as_ref()
            .ok_or_else(|| GameError::InvariantViolation("no world to render".into()))?;
        let lines = world.active_room()?.render_lines(&self.tables.glyphs);

        screen.clear(Color::Black)?;
        let style = Style::colored(Color::White, Color::Black);
        let top = draw_block(screen, &lines, style)?;
        let (row, col) = world.location();
        let (_, height) = screen.size();
        draw_centered(
            screen,
            top.saturating_sub(2),
            &format!("Room {row}-{col}"),
            style.bold(),
        )?;
        draw_centered(
            screen,
            height.saturating_sub(1),
            HELP,
            Style::colored(Color::Grey, Color::Black),
        )?;
        screen.flush()
    }

    fn handle_stop(&mut self) -> Result<Command, GameError> {
        match self.exit.take() {
            Some(Exit::Question) => Ok(Command::change(
                SectionId::Question,
                Payload::NewQuestion { prefix: None },
            )),
            Some(Exit::GameOver) => Ok(Command::change(SectionId::GameOver, Payload::Empty)),
            Some(Exit::Quit) => Ok(Command::EndGame),
            None => Err(GameError::InvariantViolation(
                "over world stopped without an exit".into(),
            )),
        }
    }
}
