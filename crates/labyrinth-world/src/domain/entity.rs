//! Entities: the player and NPCs standing in a room.

use super::direction::Position;

/// Registry name of the player entity.
pub const PLAYER: &str = "player";

/// Registry name of a room's NPC.
pub const NPC: &str = "npc";

/// Stable handle into a room's entity arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Npc,
}

/// A positioned, drawable entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Position,
    pub glyph: String,
}

impl Entity {
    #[must_use]
    pub fn player(glyph: impl Into<String>, position: Position) -> Self {
        Self {
            kind: EntityKind::Player,
            position,
            glyph: glyph.into(),
        }
    }

    #[must_use]
    pub fn npc(glyph: impl Into<String>, position: Position) -> Self {
        Self {
            kind: EntityKind::Npc,
            position,
            glyph: glyph.into(),
        }
    }

    #[must_use]
    pub fn is_npc(&self) -> bool {
        self.kind == EntityKind::Npc
    }
}
