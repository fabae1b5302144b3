//! A single room: a rotated tile layout plus the entities standing in it.

use std::collections::HashMap;

use labyrinth_content::domain::glyphs::GlyphTable;
use labyrinth_content::domain::templates::{ROOM_SIZE, RoomTemplate, TemplateCatalog};
use labyrinth_core::error::GameError;
use labyrinth_core::rng::{DeterministicRng, choose};
use tracing::debug;

use super::direction::{Direction, Position};
use super::entity::{Entity, EntityId, NPC, PLAYER};
use super::tile::Tile;
use super::topology::RoomShape;

/// One room of the world grid.
///
/// Entities live in an arena addressed by [`EntityId`]; a name index and a
/// coordinate index sit on top so that lookups and occupancy checks are
/// constant time. Every occupied coordinate holds exactly one entity.
#[derive(Debug, Clone)]
pub struct Room {
    shape: RoomShape,
    tiles: [[Tile; ROOM_SIZE]; ROOM_SIZE],
    entities: Vec<Option<Entity>>,
    names: HashMap<String, EntityId>,
    occupancy: HashMap<Position, EntityId>,
}

impl Room {
    /// Builds an empty room from `template`, rotated to match `shape`.
    #[must_use]
    pub fn from_template(shape: RoomShape, template: &RoomTemplate) -> Self {
        let rotated = template.rotated(shape.rotation.quarter_turns());
        let mut tiles = [[Tile::Wall; ROOM_SIZE]; ROOM_SIZE];
        for (y, row) in rotated.rows().iter().enumerate() {
            for (x, symbol) in row.iter().enumerate() {
                tiles[y][x] = Tile::from(*symbol);
            }
        }
        Self {
            shape,
            tiles,
            entities: Vec::new(),
            names: HashMap::new(),
            occupancy: HashMap::new(),
        }
    }

    /// Builds a room from a random template variant and spawns its NPC at a
    /// random opening's anchor.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the catalog has no variant for
    /// the archetype, and `GameError::InvariantViolation` if the NPC cannot
    /// be placed.
    pub fn generate(
        shape: RoomShape,
        catalog: &TemplateCatalog,
        npc_glyph: &str,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, GameError> {
        let template = choose(rng, catalog.variants(shape.archetype)).ok_or_else(|| {
            GameError::Configuration(format!("no template variant for {}", shape.archetype))
        })?;
        let mut room = Self::from_template(shape, template);

        let openings = shape.openings().directions();
        let side = choose(rng, &openings).copied().ok_or_else(|| {
            GameError::InvariantViolation(format!("{} room has no openings", shape.archetype))
        })?;
        if !room.add_entity(NPC, Entity::npc(npc_glyph, side.anchor())) {
            return Err(GameError::InvariantViolation(format!(
                "cannot place NPC at the {side} anchor"
            )));
        }
        Ok(room)
    }

    #[must_use]
    pub fn shape(&self) -> RoomShape {
        self.shape
    }

    /// Static tile at `position`, `None` outside the room.
    #[must_use]
    pub fn tile(&self, position: Position) -> Option<Tile> {
        position
            .in_bounds()
            .then(|| self.tiles[position.y][position.x])
    }

    /// Registers `entity` under `name`.
    ///
    /// Ignored (returns `false`) when the position is outside the room or
    /// held by a different entity. An entity already registered under
    /// `name` is replaced and its coordinate released.
    pub fn add_entity(&mut self, name: &str, entity: Entity) -> bool {
        if !entity.position.in_bounds() || self.occupied_by_other(entity.position, name) {
            return false;
        }
        self.remove_entity(name);

        let id = EntityId(self.entities.len());
        self.occupancy.insert(entity.position, id);
        self.names.insert(name.to_owned(), id);
        self.entities.push(Some(entity));
        true
    }

    /// Unregisters `name`, freeing its coordinate.
    pub fn remove_entity(&mut self, name: &str) -> Option<Entity> {
        let id = self.names.remove(name)?;
        let entity = self.entities.get_mut(id.0)?.take()?;
        self.occupancy.remove(&entity.position);
        Some(entity)
    }

    /// Teleports `name` to `position` under the same rules as
    /// [`Room::add_entity`].
    pub fn place_entity(&mut self, name: &str, position: Position) -> bool {
        if !position.in_bounds() || self.occupied_by_other(position, name) {
            return false;
        }
        self.relocate(name, position)
    }

    /// Moves `name` one tile in `direction`.
    ///
    /// Succeeds only if the destination is inside the room, traversable, and
    /// free. A rejected move leaves the room untouched.
    pub fn move_entity(&mut self, direction: Direction, name: &str) -> bool {
        let Some(from) = self.entity(name).map(|entity| entity.position) else {
            return false;
        };
        let Some(to) = from.step(direction) else {
            return false;
        };
        if !self.can_stand(to) {
            return false;
        }
        let moved = self.relocate(name, to);
        if moved {
            debug!(name, %direction, x = to.x, y = to.y, "entity moved");
        }
        moved
    }

    /// Places the player entering through the `entry` side.
    ///
    /// The player lands on that side's anchor, or one tile further inward
    /// when the anchor is taken.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` if both tiles are blocked.
    pub fn spawn_player(&mut self, mut player: Entity, entry: Direction) -> Result<(), GameError> {
        self.remove_entity(PLAYER);
        let anchor = entry.anchor();
        let candidates = [Some(anchor), anchor.step(entry.opposite())];
        let target = candidates
            .into_iter()
            .flatten()
            .find(|position| self.can_stand(*position))
            .ok_or_else(|| {
                GameError::InvariantViolation(format!(
                    "no free tile to spawn the player at the {entry} entry"
                ))
            })?;
        player.position = target;
        self.add_entity(PLAYER, player);
        Ok(())
    }

    /// The NPC directly below, right of, above or left of the player.
    #[must_use]
    pub fn scan_adjacent_npc(&self) -> Option<&Entity> {
        let origin = self.entity(PLAYER)?.position;
        [
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Left,
        ]
        .into_iter()
        .filter_map(|direction| origin.step(direction))
        .filter_map(|position| self.entity_at(position))
        .find(|entity| entity.is_npc())
    }

    /// Moves an NPC standing on an anchor one tile sideways, clearing the
    /// doorway.
    pub fn npc_step_aside(&mut self, name: &str) -> bool {
        let Some(position) = self.entity(name).map(|entity| entity.position) else {
            return false;
        };
        let aside = Direction::ALL
            .into_iter()
            .find(|side| side.anchor() == position)
            .map(|side| match side {
                Direction::Right => Direction::Up,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Down,
                Direction::Up => Direction::Right,
            });
        aside.is_some_and(|direction| {
            self.move_entity(direction, name) || self.move_entity(direction.opposite(), name)
        })
    }

    /// Whether the player stands on one of the four door slots.
    #[must_use]
    pub fn player_on_border(&self) -> bool {
        self.player_exit_side().is_some()
    }

    /// The side whose door slot the player stands on. Other border tiles
    /// never lead out of the room.
    #[must_use]
    pub fn player_exit_side(&self) -> Option<Direction> {
        let position = self.entity(PLAYER)?.position;
        position.border_side().filter(|side| side.door() == position)
    }

    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Entity> {
        let id = self.names.get(name)?;
        self.entities.get(id.0)?.as_ref()
    }

    /// Arena id of the entity registered under `name`.
    #[must_use]
    pub fn entity_id(&self, name: &str) -> Option<EntityId> {
        self.names.get(name).copied()
    }

    #[must_use]
    pub fn entity_at(&self, position: Position) -> Option<&Entity> {
        let id = self.occupancy.get(&position)?;
        self.entities.get(id.0)?.as_ref()
    }

    /// Replaces the glyph of `name`.
    pub fn set_glyph(&mut self, name: &str, glyph: &str) -> bool {
        let Some(id) = self.names.get(name).copied() else {
            return false;
        };
        match self.entities.get_mut(id.0).and_then(Option::as_mut) {
            Some(entity) => {
                glyph.clone_into(&mut entity.glyph);
                true
            }
            None => false,
        }
    }

    /// Number of registered entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.names.len()
    }

    /// One string per row: tile glyphs with entity glyphs drawn on top.
    #[must_use]
    pub fn render_lines(&self, glyphs: &GlyphTable) -> Vec<String> {
        (0..ROOM_SIZE)
            .map(|y| {
                (0..ROOM_SIZE)
                    .map(|x| match self.entity_at(Position::new(x, y)) {
                        Some(entity) => entity.glyph.as_str(),
                        None => glyphs.tile(self.tiles[y][x].symbol()),
                    })
                    .collect()
            })
            .collect()
    }

    fn can_stand(&self, position: Position) -> bool {
        self.tile(position).is_some_and(Tile::is_traversable)
            && !self.occupancy.contains_key(&position)
    }

    fn occupied_by_other(&self, position: Position, name: &str) -> bool {
        self.occupancy
            .get(&position)
            .is_some_and(|occupant| self.names.get(name) != Some(occupant))
    }

    fn relocate(&mut self, name: &str, to: Position) -> bool {
        let Some(id) = self.names.get(name).copied() else {
            return false;
        };
        let Some(entity) = self.entities.get_mut(id.0).and_then(Option::as_mut) else {
            return false;
        };
        self.occupancy.remove(&entity.position);
        entity.position = to;
        self.occupancy.insert(to, id);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_content::domain::templates::Archetype;
    use labyrinth_test_support::{MockRng, SequenceRng};

    use crate::domain::topology::Rotation;

    /// An open room: walls around the edge, `door` at the right door slot.
    fn right_room(door: char) -> Room {
        let lines: Vec<String> = (0..ROOM_SIZE)
            .map(|y| {
                (0..ROOM_SIZE)
                    .map(|x| {
                        if x == 10 && y == 5 {
                            door
                        } else if x == 0 || y == 0 || x == 10 || y == 10 {
                            '#'
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect();
        let template = RoomTemplate::parse(&lines).unwrap();
        Room::from_template(RoomShape::new(Archetype::DeadEnd, Rotation::R0), &template)
    }

    fn catalog() -> TemplateCatalog {
        labyrinth_content::application::loader::ResourceTables::embedded()
            .unwrap()
            .templates
    }

    #[test]
    fn test_move_into_wall_fails() {
        let mut room = right_room('#');
        assert!(room.add_entity(PLAYER, Entity::player("@", Position::new(9, 5))));
        assert!(!room.move_entity(Direction::Right, PLAYER));
        assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(9, 5));
    }

    #[test]
    fn test_move_onto_unlocked_door_succeeds() {
        let mut room = right_room('/');
        room.add_entity(PLAYER, Entity::player("@", Position::new(9, 5)));
        assert!(room.move_entity(Direction::Right, PLAYER));
        assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(10, 5));
        assert!(room.player_on_border());
        assert_eq!(room.player_exit_side(), Some(Direction::Right));
    }

    #[test]
    fn test_locked_door_blocks() {
        let mut room = right_room('|');
        room.add_entity(PLAYER, Entity::player("@", Position::new(9, 5)));
        assert!(!room.move_entity(Direction::Right, PLAYER));
    }

    #[test]
    fn test_rejected_moves_are_idempotent() {
        let mut room = right_room('#');
        room.add_entity(PLAYER, Entity::player("@", Position::new(9, 5)));
        room.add_entity(NPC, Entity::npc("N", Position::new(9, 6)));
        for _ in 0..3 {
            assert!(!room.move_entity(Direction::Right, PLAYER));
            assert!(!room.move_entity(Direction::Down, PLAYER));
            assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(9, 5));
        }
    }

    #[test]
    fn test_add_entity_ignores_occupied_or_out_of_bounds() {
        let mut room = right_room('/');
        assert!(room.add_entity(NPC, Entity::npc("N", Position::new(3, 3))));
        assert!(!room.add_entity(PLAYER, Entity::player("@", Position::new(3, 3))));
        assert!(!room.add_entity(PLAYER, Entity::player("@", Position::new(11, 3))));
        assert_eq!(room.entity_count(), 1);
        assert!(room.entity(PLAYER).is_none());
    }

    #[test]
    fn test_add_entity_replaces_same_name() {
        let mut room = right_room('/');
        room.add_entity(PLAYER, Entity::player("@", Position::new(3, 3)));
        room.add_entity(PLAYER, Entity::player("@", Position::new(4, 4)));
        assert_eq!(room.entity_count(), 1);
        assert!(room.entity_at(Position::new(3, 3)).is_none());
        assert!(room.entity_at(Position::new(4, 4)).is_some());
    }

    #[test]
    fn test_remove_entity_frees_coordinate() {
        let mut room = right_room('/');
        room.add_entity(NPC, Entity::npc("N", Position::new(3, 3)));
        let removed = room.remove_entity(NPC).unwrap();
        assert_eq!(removed.position, Position::new(3, 3));
        assert!(room.add_entity(PLAYER, Entity::player("@", Position::new(3, 3))));
    }

    #[test]
    fn test_place_entity() {
        let mut room = right_room('/');
        room.add_entity(NPC, Entity::npc("N", Position::new(3, 3)));
        room.add_entity(PLAYER, Entity::player("@", Position::new(5, 5)));
        let id = room.entity_id(PLAYER);
        assert!(!room.place_entity(PLAYER, Position::new(3, 3)));
        assert!(room.place_entity(PLAYER, Position::new(7, 7)));
        assert_eq!(room.entity_id(PLAYER), id);
        assert!(room.entity_at(Position::new(5, 5)).is_none());
        assert_eq!(
            room.entity_at(Position::new(7, 7)).unwrap().glyph,
            "@".to_owned()
        );
    }

    #[test]
    fn test_scan_adjacent_npc() {
        let mut room = right_room('/');
        room.add_entity(PLAYER, Entity::player("@", Position::new(5, 5)));
        room.add_entity(NPC, Entity::npc("N", Position::new(7, 5)));
        assert!(room.scan_adjacent_npc().is_none());

        assert!(room.move_entity(Direction::Right, PLAYER));
        let npc = room.scan_adjacent_npc().unwrap();
        assert_eq!(npc.position, Position::new(7, 5));
    }

    #[test]
    fn test_spawn_player_falls_back_inward_when_anchor_taken() {
        let mut room = right_room('/');
        room.add_entity(NPC, Entity::npc("N", Direction::Right.anchor()));
        room.spawn_player(Entity::player("@", Position::new(0, 0)), Direction::Right)
            .unwrap();
        assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(8, 5));
    }

    #[test]
    fn test_spawn_player_blocked_is_invariant_violation() {
        let mut room = right_room('/');
        room.add_entity(NPC, Entity::npc("N", Position::new(9, 5)));
        room.add_entity("other", Entity::npc("N", Position::new(8, 5)));
        let result = room.spawn_player(Entity::player("@", Position::new(0, 0)), Direction::Right);
        assert!(matches!(result, Err(GameError::InvariantViolation(_))));
    }

    #[test]
    fn test_npc_step_aside_clears_anchor() {
        let mut room = right_room('/');
        room.add_entity(NPC, Entity::npc("N", Direction::Right.anchor()));
        assert!(room.npc_step_aside(NPC));
        assert_eq!(room.entity(NPC).unwrap().position, Position::new(9, 4));
        // Off the anchor it stays put.
        assert!(!room.npc_step_aside(NPC));
    }

    #[test]
    fn test_npc_step_aside_takes_other_side_when_player_blocks() {
        let mut room = right_room('/');
        room.add_entity(PLAYER, Entity::player("@", Position::new(9, 4)));
        room.add_entity(NPC, Entity::npc("N", Direction::Right.anchor()));
        assert!(room.npc_step_aside(NPC));
        assert_eq!(room.entity(NPC).unwrap().position, Position::new(9, 6));
        assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(9, 4));
    }

    #[test]
    fn test_only_door_slot_leads_out() {
        let lines: Vec<String> = (0..ROOM_SIZE)
            .map(|y| {
                (0..ROOM_SIZE)
                    .map(|x| match (x, y) {
                        (10, 5) => '/',
                        (10, 4) => ' ',
                        _ if x == 0 || y == 0 || x == 10 || y == 10 => '#',
                        _ => ' ',
                    })
                    .collect()
            })
            .collect();
        let template = RoomTemplate::parse(&lines).unwrap();
        let shape = RoomShape::new(Archetype::DeadEnd, Rotation::R0);
        let mut room = Room::from_template(shape, &template);
        assert!(room.add_entity(PLAYER, Entity::player("@", Position::new(9, 4))));

        assert!(room.move_entity(Direction::Right, PLAYER));
        assert_eq!(room.entity(PLAYER).unwrap().position, Position::new(10, 4));
        assert_eq!(room.player_exit_side(), None);
        assert!(!room.player_on_border());

        assert!(room.move_entity(Direction::Down, PLAYER));
        assert_eq!(room.player_exit_side(), Some(Direction::Right));
    }

    #[test]
    fn test_generate_places_npc_on_an_opening_anchor() {
        let shape = RoomShape::new(Archetype::Corner, Rotation::R90);
        // Variant 0, then the second opening (down).
        let mut rng = SequenceRng::new(vec![0, 1]);
        let room = Room::generate(shape, &catalog(), "N", &mut rng).unwrap();
        assert_eq!(room.entity(NPC).unwrap().position, Direction::Down.anchor());
        assert_eq!(room.tile(Direction::Right.door()), Some(Tile::UnlockedDoor));
        assert_eq!(room.tile(Direction::Down.door()), Some(Tile::UnlockedDoor));
        assert_ne!(room.tile(Direction::Up.door()), Some(Tile::UnlockedDoor));
    }

    #[test]
    fn test_render_draws_entities_over_tiles() {
        let glyphs = labyrinth_content::application::loader::ResourceTables::embedded()
            .unwrap()
            .glyphs;
        let mut room = Room::generate(
            RoomShape::new(Archetype::DeadEnd, Rotation::R0),
            &catalog(),
            &glyphs.npc,
            &mut MockRng,
        )
        .unwrap();
        room.add_entity(PLAYER, Entity::player("🙂", Position::new(5, 5)));

        let lines = room.render_lines(&glyphs);
        assert_eq!(lines.len(), ROOM_SIZE);
        assert!(lines[5].contains("🙂"));
        assert!(lines[1].contains(&glyphs.npc));
        assert!(lines[0].contains(&glyphs.door[0]));
    }

    #[test]
    fn test_set_glyph() {
        let mut room = right_room('/');
        room.add_entity(PLAYER, Entity::player("@", Position::new(5, 5)));
        assert!(room.set_glyph(PLAYER, "😎"));
        assert_eq!(room.entity(PLAYER).unwrap().glyph, "😎");
        assert!(!room.set_glyph("ghost", "👻"));
    }
}
