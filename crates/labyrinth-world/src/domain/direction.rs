//! Compass directions and room-local positions.

use std::fmt;

use labyrinth_content::domain::templates::ROOM_SIZE;

const LAST: usize = ROOM_SIZE - 1;
const MID: usize = ROOM_SIZE / 2;

/// A compass direction, in local room space or world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions in clockwise order starting at `Up`.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Position in [`Direction::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// The direction one quarter-turn clockwise.
    #[must_use]
    pub fn rotated_cw(self) -> Self {
        Direction::ALL[(self.index() + 1) % 4]
    }

    /// World-space unit vector as `(d_row, d_col)`.
    #[must_use]
    pub fn grid_offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// The anchor one tile inside the door on this side.
    #[must_use]
    pub fn anchor(self) -> Position {
        match self {
            Direction::Up => Position::new(MID, 1),
            Direction::Right => Position::new(LAST - 1, MID),
            Direction::Down => Position::new(MID, LAST - 1),
            Direction::Left => Position::new(1, MID),
        }
    }

    /// The border tile where this side's door sits.
    #[must_use]
    pub fn door(self) -> Position {
        match self {
            Direction::Up => Position::new(MID, 0),
            Direction::Right => Position::new(LAST, MID),
            Direction::Down => Position::new(MID, LAST),
            Direction::Left => Position::new(0, MID),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        })
    }
}

/// A tile coordinate inside a room. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether the position lies inside the room.
    #[must_use]
    pub fn in_bounds(self) -> bool {
        self.x < ROOM_SIZE && self.y < ROOM_SIZE
    }

    /// The neighbouring position, or `None` when it would leave the room.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Self> {
        let next = match direction {
            Direction::Up => Self::new(self.x, self.y.checked_sub(1)?),
            Direction::Right => Self::new(self.x + 1, self.y),
            Direction::Down => Self::new(self.x, self.y + 1),
            Direction::Left => Self::new(self.x.checked_sub(1)?, self.y),
        };
        next.in_bounds().then_some(next)
    }

    /// The side of the room this border position lies on, if any.
    #[must_use]
    pub fn border_side(self) -> Option<Direction> {
        if self.y == 0 {
            Some(Direction::Up)
        } else if self.x == LAST {
            Some(Direction::Right)
        } else if self.y == LAST {
            Some(Direction::Down)
        } else if self.x == 0 {
            Some(Direction::Left)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_cycles_clockwise() {
        assert_eq!(Direction::Up.rotated_cw(), Direction::Right);
        assert_eq!(Direction::Left.rotated_cw(), Direction::Up);
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
        }
    }

    #[test]
    fn test_anchors_sit_inside_their_doors() {
        for direction in Direction::ALL {
            assert_eq!(direction.anchor().step(direction), Some(direction.door()));
        }
        assert_eq!(Direction::Up.anchor(), Position::new(5, 1));
        assert_eq!(Direction::Right.anchor(), Position::new(9, 5));
        assert_eq!(Direction::Down.anchor(), Position::new(5, 9));
        assert_eq!(Direction::Left.anchor(), Position::new(1, 5));
    }

    #[test]
    fn test_step_stays_in_bounds() {
        assert_eq!(Position::new(0, 5).step(Direction::Left), None);
        assert_eq!(Position::new(10, 5).step(Direction::Right), None);
        assert_eq!(Position::new(5, 0).step(Direction::Up), None);
        assert_eq!(
            Position::new(5, 5).step(Direction::Down),
            Some(Position::new(5, 6))
        );
    }

    #[test]
    fn test_border_side() {
        for direction in Direction::ALL {
            assert_eq!(direction.door().border_side(), Some(direction));
        }
        assert_eq!(Position::new(5, 5).border_side(), None);
    }
}
