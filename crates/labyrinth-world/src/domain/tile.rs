//! Static room tiles.

use labyrinth_content::domain::templates::TemplateSymbol;

/// One static tile of a room layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Wall,
    Space,
    UnlockedDoor,
    LockedDoor,
}

impl Tile {
    /// Whether an entity may stand on this tile.
    #[must_use]
    pub fn is_traversable(self) -> bool {
        matches!(self, Tile::Space | Tile::UnlockedDoor)
    }

    /// The template symbol this tile renders as.
    #[must_use]
    pub fn symbol(self) -> TemplateSymbol {
        match self {
            Tile::Wall => TemplateSymbol::Wall,
            Tile::Space => TemplateSymbol::Space,
            Tile::UnlockedDoor => TemplateSymbol::UnlockedDoor,
            Tile::LockedDoor => TemplateSymbol::LockedDoor,
        }
    }
}

impl From<TemplateSymbol> for Tile {
    fn from(symbol: TemplateSymbol) -> Self {
        match symbol {
            TemplateSymbol::Wall => Tile::Wall,
            TemplateSymbol::Space => Tile::Space,
            TemplateSymbol::UnlockedDoor => Tile::UnlockedDoor,
            TemplateSymbol::LockedDoor => Tile::LockedDoor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_space_and_unlocked_doors_are_traversable() {
        assert!(Tile::Space.is_traversable());
        assert!(Tile::UnlockedDoor.is_traversable());
        assert!(!Tile::Wall.is_traversable());
        assert!(!Tile::LockedDoor.is_traversable());
    }
}
