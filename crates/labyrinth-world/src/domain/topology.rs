//! Room topology: which archetype and rotation a maze cell needs.
//!
//! A rotation of `90° × k` turns the archetype's canonical template `k`
//! quarter-turns clockwise, carrying each opening up → right → down → left.
//! Canonical opening sets are: dead-end {up}, straight {up, down}, corner
//! {up, right}, 3-way {right, down, left}, 4-way all four.

use std::fmt;

use labyrinth_content::domain::templates::{
    Archetype, RoomTemplate, TemplateCatalog, TemplateSymbol,
};
use labyrinth_core::error::GameError;

use super::direction::{Direction, Position};

/// Which sides of a cell are open, indexed by [`Direction::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Openings([bool; 4]);

impl Openings {
    #[must_use]
    pub const fn new(up: bool, right: bool, down: bool, left: bool) -> Self {
        Self([up, right, down, left])
    }

    #[must_use]
    pub fn only(direction: Direction) -> Self {
        let mut sides = [false; 4];
        sides[direction.index()] = true;
        Self(sides)
    }

    #[must_use]
    pub fn is_open(self, direction: Direction) -> bool {
        self.0[direction.index()]
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.0.iter().filter(|open| **open).count()
    }

    /// Open sides in clockwise order starting at `Up`.
    #[must_use]
    pub fn directions(self) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|direction| self.is_open(*direction))
            .collect()
    }

    /// The openings after one clockwise quarter-turn.
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        let [up, right, down, left] = self.0;
        Self([left, up, right, down])
    }

    #[must_use]
    pub fn rotated(self, quarter_turns: u8) -> Self {
        (0..quarter_turns % 4).fold(self, |openings, _| openings.rotated_cw())
    }
}

/// A rotation in quarter-turns clockwise, `0..4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rotation(u8);

impl Rotation {
    pub const R0: Rotation = Rotation(0);
    pub const R90: Rotation = Rotation(1);
    pub const R180: Rotation = Rotation(2);
    pub const R270: Rotation = Rotation(3);

    #[must_use]
    pub fn from_quarter_turns(quarter_turns: u8) -> Self {
        Self(quarter_turns % 4)
    }

    #[must_use]
    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        u16::from(self.0) * 90
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°", self.degrees())
    }
}

/// An archetype together with its rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoomShape {
    pub archetype: Archetype,
    pub rotation: Rotation,
}

impl RoomShape {
    #[must_use]
    pub fn new(archetype: Archetype, rotation: Rotation) -> Self {
        Self {
            archetype,
            rotation,
        }
    }

    /// The sides this shape opens onto.
    #[must_use]
    pub fn openings(self) -> Openings {
        canonical_openings(self.archetype).rotated(self.rotation.quarter_turns())
    }
}

/// Openings of an archetype's unrotated template.
#[must_use]
pub fn canonical_openings(archetype: Archetype) -> Openings {
    match archetype {
        Archetype::DeadEnd => Openings::new(true, false, false, false),
        Archetype::Straight => Openings::new(true, false, true, false),
        Archetype::Corner => Openings::new(true, true, false, false),
        Archetype::ThreeWayJunction => Openings::new(false, true, true, true),
        Archetype::FourWayJunction => Openings::new(true, true, true, true),
    }
}

/// Resolves a cell's openings to an archetype and the smallest rotation
/// that carries the canonical template onto them.
///
/// # Errors
///
/// Returns `GameError::InvariantViolation` if no side is open.
pub fn resolve(openings: Openings) -> Result<RoomShape, GameError> {
    let archetype = match openings.count() {
        4 => Archetype::FourWayJunction,
        3 => Archetype::ThreeWayJunction,
        2 if openings.is_open(Direction::Up) == openings.is_open(Direction::Down) => {
            Archetype::Straight
        }
        2 => Archetype::Corner,
        1 => Archetype::DeadEnd,
        _ => {
            return Err(GameError::InvariantViolation(
                "room cell has no openings".into(),
            ));
        }
    };

    let canonical = canonical_openings(archetype);
    (0..4)
        .find(|&k| canonical.rotated(k) == openings)
        .map(|k| RoomShape::new(archetype, Rotation::from_quarter_turns(k)))
        .ok_or_else(|| {
            GameError::InvariantViolation(format!("no rotation of {archetype} matches {openings:?}"))
        })
}

/// Checks that every unrotated template's unlocked doors sit exactly on its
/// archetype's canonical openings, that each opening's anchor is free
/// floor, and that no other border tile can be walked on.
///
/// # Errors
///
/// Returns `GameError::Configuration` naming the first inconsistent variant.
pub fn validate_catalog(catalog: &TemplateCatalog) -> Result<(), GameError> {
    for archetype in Archetype::ALL {
        let openings = canonical_openings(archetype);
        for (index, template) in catalog.variants(archetype).iter().enumerate() {
            let symbol_at = |position: Position| template.symbol(position.x, position.y);
            for direction in Direction::ALL {
                let door = symbol_at(direction.door());
                let expect_open = openings.is_open(direction);
                if (door == TemplateSymbol::UnlockedDoor) != expect_open {
                    return Err(GameError::Configuration(format!(
                        "{archetype} variant {index}: {direction} door must be {}",
                        if expect_open { "unlocked" } else { "absent or locked" }
                    )));
                }
                if expect_open && symbol_at(direction.anchor()) != TemplateSymbol::Space {
                    return Err(GameError::Configuration(format!(
                        "{archetype} variant {index}: {direction} anchor must be free floor"
                    )));
                }
            }

            if let Some(problem) = stray_walkable_tile(template) {
                return Err(GameError::Configuration(format!(
                    "{archetype} variant {index}: {problem}"
                )));
            }
        }
    }
    Ok(())
}

/// The first tile that would let the player onto the border anywhere but
/// through a door slot.
fn stray_walkable_tile(template: &RoomTemplate) -> Option<String> {
    template.rows().iter().enumerate().find_map(|(y, row)| {
        row.iter().enumerate().find_map(|(x, symbol)| {
            let position = Position::new(x, y);
            let border = position.border_side();
            match symbol {
                TemplateSymbol::UnlockedDoor
                    if border.is_none_or(|side| side.door() != position) =>
                {
                    Some(format!("unlocked door at ({x}, {y}) away from a door slot"))
                }
                TemplateSymbol::Space if border.is_some() => {
                    Some(format!("open floor on the border at ({x}, {y})"))
                }
                _ => None,
            }
        })
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn all_openings() -> impl Iterator<Item = Openings> {
        (1u8..16).map(|bits| {
            Openings::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0, bits & 8 != 0)
        })
    }

    #[test]
    fn test_three_way_example_resolves_to_270() {
        let shape = resolve(Openings::new(true, true, true, false)).unwrap();
        assert_eq!(shape.archetype, Archetype::ThreeWayJunction);
        assert_eq!(shape.rotation.degrees(), 270);
    }

    #[test]
    fn test_dead_end_facing_down_is_180() {
        let shape = resolve(Openings::only(Direction::Down)).unwrap();
        assert_eq!(shape, RoomShape::new(Archetype::DeadEnd, Rotation::R180));
    }

    #[test]
    fn test_straight_rotations() {
        let vertical = resolve(Openings::new(true, false, true, false)).unwrap();
        let horizontal = resolve(Openings::new(false, true, false, true)).unwrap();
        assert_eq!(vertical, RoomShape::new(Archetype::Straight, Rotation::R0));
        assert_eq!(horizontal, RoomShape::new(Archetype::Straight, Rotation::R90));
    }

    #[test]
    fn test_corner_rotations() {
        let cases = [
            (Openings::new(true, true, false, false), Rotation::R0),
            (Openings::new(false, true, true, false), Rotation::R90),
            (Openings::new(false, false, true, true), Rotation::R180),
            (Openings::new(true, false, false, true), Rotation::R270),
        ];
        for (openings, rotation) in cases {
            assert_eq!(
                resolve(openings).unwrap(),
                RoomShape::new(Archetype::Corner, rotation)
            );
        }
    }

    #[test]
    fn test_four_way_is_always_rotation_zero() {
        let shape = resolve(Openings::new(true, true, true, true)).unwrap();
        assert_eq!(shape, RoomShape::new(Archetype::FourWayJunction, Rotation::R0));
    }

    #[test]
    fn test_no_openings_is_invariant_violation() {
        assert!(matches!(
            resolve(Openings::default()),
            Err(GameError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_resolved_shape_reproduces_openings() {
        for openings in all_openings() {
            let shape = resolve(openings).unwrap();
            assert_eq!(shape.openings(), openings, "for {openings:?}");
        }
    }

    #[test]
    fn test_resolution_is_rotation_consistent() {
        for openings in all_openings() {
            let shape = resolve(openings).unwrap();
            let turned = resolve(openings.rotated_cw()).unwrap();
            assert_eq!(turned.archetype, shape.archetype);

            let period = match shape.archetype {
                Archetype::FourWayJunction => 1,
                Archetype::Straight => 2,
                _ => 4,
            };
            assert_eq!(
                turned.rotation.quarter_turns(),
                (shape.rotation.quarter_turns() + 1) % period,
                "for {openings:?}"
            );
        }
    }

    fn catalog_with_dead_end(bottom_row: &str) -> TemplateCatalog {
        let embedded = labyrinth_content::application::loader::ResourceTables::embedded()
            .unwrap()
            .templates;
        let mut lines = vec!["#####/#####"];
        lines.extend(["#         #"; 9]);
        lines.push(bottom_row);

        let mut variants: HashMap<Archetype, Vec<RoomTemplate>> = Archetype::ALL
            .into_iter()
            .map(|archetype| (archetype, embedded.variants(archetype).to_vec()))
            .collect();
        variants.insert(Archetype::DeadEnd, vec![RoomTemplate::parse(&lines).unwrap()]);
        TemplateCatalog::new(variants).unwrap()
    }

    #[test]
    fn test_walled_dead_end_is_accepted() {
        validate_catalog(&catalog_with_dead_end("###########")).unwrap();
    }

    #[test]
    fn test_open_floor_on_the_border_is_rejected() {
        // Beside the closed door slot, then inside it.
        for (bottom_row, x) in [("#### ######", 4), ("##### #####", 5)] {
            match validate_catalog(&catalog_with_dead_end(bottom_row)).unwrap_err() {
                GameError::Configuration(msg) => {
                    assert!(msg.contains(&format!("open floor on the border at ({x}, 10)")), "{msg}");
                }
                other => panic!("expected Configuration, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_embedded_catalog_is_consistent() {
        let tables = labyrinth_content::application::loader::ResourceTables::embedded().unwrap();
        validate_catalog(&tables.templates).unwrap();
    }
}
