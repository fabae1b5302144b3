//! The world grid: one room per maze floor cell and a cursor on the active
//! room.

use labyrinth_content::domain::glyphs::GlyphTable;
use labyrinth_content::domain::templates::{Archetype, TemplateCatalog};
use labyrinth_core::error::GameError;
use labyrinth_core::rng::DeterministicRng;
use tracing::{debug, info};

use super::direction::{Direction, Position};
use super::entity::{Entity, PLAYER};
use super::maze::Maze;
use super::room::Room;
use super::topology::{Openings, Rotation, RoomShape, resolve, validate_catalog};

/// One cell of the world grid.
#[derive(Debug, Clone)]
pub enum WorldCell {
    /// Not traversable; never holds a room.
    Empty,
    Room(Box<Room>),
}

impl WorldCell {
    #[must_use]
    pub fn room(&self) -> Option<&Room> {
        match self {
            WorldCell::Room(room) => Some(room),
            WorldCell::Empty => None,
        }
    }
}

/// Matrix of rooms with the player's current location.
#[derive(Debug, Clone)]
pub struct WorldGrid {
    cells: Vec<Vec<WorldCell>>,
    location: (usize, usize),
    entrance: (usize, usize),
    completed: bool,
    player_glyph: String,
}

impl WorldGrid {
    /// Generates a fresh maze and builds its rooms.
    ///
    /// # Errors
    ///
    /// Propagates maze generation and room construction errors.
    pub fn generate(
        width: usize,
        height: usize,
        templates: &TemplateCatalog,
        glyphs: &GlyphTable,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, GameError> {
        let maze = Maze::generate(width, height, rng)?;
        Self::from_maze(&maze, templates, glyphs, rng)
    }

    /// Builds one room per floor cell of `maze`.
    ///
    /// The entrance room is a dead-end opening down into the maze and the
    /// exit room a dead-end opening up; every other floor cell gets the
    /// shape its open neighbours resolve to.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the templates disagree with
    /// their archetypes, and `GameError::InvariantViolation` if a room
    /// cannot be built.
    pub fn from_maze(
        maze: &Maze,
        templates: &TemplateCatalog,
        glyphs: &GlyphTable,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, GameError> {
        validate_catalog(templates)?;

        let last_row = maze.height() - 1;
        let mut cells = Vec::with_capacity(maze.height());
        for row in 0..maze.height() {
            let mut cells_row = Vec::with_capacity(maze.width());
            for col in 0..maze.width() {
                if !maze.is_floor(row, col) {
                    cells_row.push(WorldCell::Empty);
                    continue;
                }
                let shape = if row == 0 {
                    RoomShape::new(Archetype::DeadEnd, Rotation::R180)
                } else if row == last_row {
                    RoomShape::new(Archetype::DeadEnd, Rotation::R0)
                } else {
                    resolve(floor_openings(maze, row, col))?
                };
                let room = Room::generate(shape, templates, &glyphs.npc, rng)?;
                cells_row.push(WorldCell::Room(Box::new(room)));
            }
            cells.push(cells_row);
        }

        let entrance = (0, maze.entrance_index());
        info!(
            rows = maze.height(),
            cols = maze.width(),
            entrance_col = entrance.1,
            "world built"
        );
        Ok(Self {
            cells,
            location: entrance,
            entrance,
            completed: false,
            player_glyph: glyphs.player.clone(),
        })
    }

    /// Moves the cursor, returning whether the world is still incomplete.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if `(row, col)` holds no room.
    pub fn update_location(&mut self, row: usize, col: usize) -> Result<bool, GameError> {
        if self.cell(row, col).and_then(WorldCell::room).is_none() {
            return Err(GameError::InvariantViolation(format!(
                "no room at ({row}, {col})"
            )));
        }
        self.location = (row, col);
        self.completed = row + 1 == self.rows();
        Ok(!self.completed)
    }

    /// Places `player` in the entrance room at the up anchor.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if the player cannot be placed.
    pub fn enter(&mut self, player: Entity) -> Result<(), GameError> {
        self.player_glyph.clone_from(&player.glyph);
        self.active_room_mut()?.remove_entity(PLAYER);
        let (row, col) = self.entrance;
        self.update_location(row, col)?;
        self.active_room_mut()?.spawn_player(player, Direction::Up)
    }

    /// Moves the player into the neighbouring room in `direction`.
    ///
    /// The player reappears at the anchor facing back the way they came.
    /// Returns whether the world is still incomplete.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if there is no room in that
    /// direction or no player in the active room.
    pub fn travel(&mut self, direction: Direction) -> Result<bool, GameError> {
        let (row, col) = self.location;
        let (d_row, d_col) = direction.grid_offset();
        let target = row
            .checked_add_signed(d_row)
            .zip(col.checked_add_signed(d_col))
            .filter(|&(r, c)| self.cell(r, c).and_then(WorldCell::room).is_some())
            .ok_or_else(|| {
                GameError::InvariantViolation(format!(
                    "no room {direction} of ({row}, {col})"
                ))
            })?;

        let player = self
            .active_room_mut()?
            .remove_entity(PLAYER)
            .ok_or_else(|| GameError::InvariantViolation("player is not in the active room".into()))?;
        let running = self.update_location(target.0, target.1)?;
        self.active_room_mut()?.spawn_player(player, direction.opposite())?;

        debug!(
            %direction,
            row = target.0,
            col = target.1,
            completed = self.completed,
            "travelled to room"
        );
        Ok(running)
    }

    /// Sends the player back to the entrance room.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if the player cannot be placed.
    pub fn reset_to_start(&mut self) -> Result<(), GameError> {
        let player = self
            .active_room_mut()?
            .remove_entity(PLAYER)
            .unwrap_or_else(|| Entity::player(self.player_glyph.clone(), Position::new(0, 0)));
        debug!("player reset to the entrance");
        self.enter(player)
    }

    /// Changes the glyph the player is drawn with.
    pub fn set_player_glyph(&mut self, glyph: &str) {
        glyph.clone_into(&mut self.player_glyph);
        if let Ok(room) = self.active_room_mut() {
            room.set_glyph(PLAYER, glyph);
        }
    }

    /// The room under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if the cursor is off a room.
    pub fn active_room(&self) -> Result<&Room, GameError> {
        let (row, col) = self.location;
        self.cell(row, col)
            .and_then(WorldCell::room)
            .ok_or_else(|| GameError::InvariantViolation(format!("no room at ({row}, {col})")))
    }

    /// Mutable access to the room under the cursor.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if the cursor is off a room.
    pub fn active_room_mut(&mut self) -> Result<&mut Room, GameError> {
        let (row, col) = self.location;
        match self.cells.get_mut(row).and_then(|cells| cells.get_mut(col)) {
            Some(WorldCell::Room(room)) => Ok(room),
            _ => Err(GameError::InvariantViolation(format!(
                "no room at ({row}, {col})"
            ))),
        }
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&WorldCell> {
        self.cells.get(row)?.get(col)
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    /// Cursor as `(row, col)`.
    #[must_use]
    pub fn location(&self) -> (usize, usize) {
        self.location
    }

    #[must_use]
    pub fn entrance(&self) -> (usize, usize) {
        self.entrance
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn player_glyph(&self) -> &str {
        &self.player_glyph
    }
}

fn floor_openings(maze: &Maze, row: usize, col: usize) -> Openings {
    Openings::new(
        row.checked_sub(1).is_some_and(|r| maze.is_floor(r, col)),
        maze.is_floor(row, col + 1),
        maze.is_floor(row + 1, col),
        col.checked_sub(1).is_some_and(|c| maze.is_floor(row, c)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_content::application::loader::ResourceTables;
    use labyrinth_test_support::MockRng;

    use crate::domain::entity::NPC;

    fn fixture() -> WorldGrid {
        let rows = ["##.##", "#...#", "#.#.#", "#.###"];
        let maze = Maze::from_rows(
            rows.iter()
                .map(|row| row.chars().map(|c| c == '.').collect())
                .collect(),
        )
        .unwrap();
        let tables = ResourceTables::embedded().unwrap();
        WorldGrid::from_maze(&maze, &tables.templates, &tables.glyphs, &mut MockRng).unwrap()
    }

    fn shape_at(world: &WorldGrid, row: usize, col: usize) -> RoomShape {
        world.cell(row, col).and_then(WorldCell::room).unwrap().shape()
    }

    fn player_position(world: &WorldGrid) -> Position {
        world.active_room().unwrap().entity(PLAYER).unwrap().position
    }

    #[test]
    fn test_rooms_follow_maze_topology() {
        let world = fixture();
        assert_eq!(
            shape_at(&world, 0, 2),
            RoomShape::new(Archetype::DeadEnd, Rotation::R180)
        );
        assert_eq!(
            shape_at(&world, 3, 1),
            RoomShape::new(Archetype::DeadEnd, Rotation::R0)
        );
        assert_eq!(
            shape_at(&world, 1, 2),
            RoomShape::new(Archetype::ThreeWayJunction, Rotation::R180)
        );
        assert_eq!(
            shape_at(&world, 1, 1),
            RoomShape::new(Archetype::Corner, Rotation::R90)
        );
        assert_eq!(
            shape_at(&world, 2, 1),
            RoomShape::new(Archetype::Straight, Rotation::R0)
        );
        assert!(world.cell(0, 0).unwrap().room().is_none());
        assert!(world.cell(2, 2).unwrap().room().is_none());
    }

    #[test]
    fn test_every_room_has_one_npc_on_an_anchor() {
        let world = fixture();
        for row in 0..world.rows() {
            for col in 0..world.cols() {
                if let Some(room) = world.cell(row, col).and_then(WorldCell::room) {
                    let npc = room.entity(NPC).unwrap();
                    assert!(
                        room.shape()
                            .openings()
                            .directions()
                            .iter()
                            .any(|side| side.anchor() == npc.position)
                    );
                }
            }
        }
    }

    #[test]
    fn test_enter_places_player_at_entrance() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();
        assert_eq!(world.location(), (0, 2));
        assert_eq!(player_position(&world), Position::new(5, 1));
        assert!(!world.is_completed());
    }

    #[test]
    fn test_travel_respawns_facing_back() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();

        assert!(world.travel(Direction::Down).unwrap());
        assert_eq!(world.location(), (1, 2));
        // The first-choice RNG put this room's NPC on the up anchor, so the
        // player lands one tile further in.
        assert_eq!(player_position(&world), Position::new(5, 2));

        assert!(world.travel(Direction::Left).unwrap());
        assert_eq!(world.location(), (1, 1));
        // Corner opening right and down; NPC took the right anchor.
        assert_eq!(player_position(&world), Position::new(8, 5));
        assert!(world.cell(1, 2).unwrap().room().unwrap().entity(PLAYER).is_none());
    }

    #[test]
    fn test_travel_into_empty_cell_fails() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();
        world.travel(Direction::Down).unwrap();
        world.travel(Direction::Left).unwrap();
        assert!(matches!(
            world.travel(Direction::Up),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_reaching_exit_row_completes() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();
        assert!(world.travel(Direction::Down).unwrap());
        assert!(world.travel(Direction::Left).unwrap());
        assert!(world.travel(Direction::Down).unwrap());
        assert!(!world.travel(Direction::Down).unwrap());
        assert!(world.is_completed());
        assert_eq!(world.location(), (3, 1));
    }

    #[test]
    fn test_reset_to_start() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();
        world.travel(Direction::Down).unwrap();
        world.reset_to_start().unwrap();
        assert_eq!(world.location(), (0, 2));
        assert_eq!(player_position(&world), Position::new(5, 1));
        assert!(world.cell(1, 2).unwrap().room().unwrap().entity(PLAYER).is_none());
    }

    #[test]
    fn test_set_player_glyph() {
        let mut world = fixture();
        world.enter(Entity::player("🙂", Position::new(0, 0))).unwrap();
        world.set_player_glyph("🤠");
        assert_eq!(world.player_glyph(), "🤠");
        assert_eq!(
            world.active_room().unwrap().entity(PLAYER).unwrap().glyph,
            "🤠"
        );
    }

    #[test]
    fn test_update_location_rejects_empty_cell() {
        let mut world = fixture();
        assert!(world.update_location(0, 0).is_err());
        assert_eq!(world.location(), (0, 2));
    }
}
