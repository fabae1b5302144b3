//! Maze generation with randomized Prim's algorithm.
//!
//! The maze is a `height × width` passability matrix indexed `[row][col]`.
//! Floor cells form a spanning tree over the interior, and the first and
//! last rows each hold exactly one floor cell: the entrance and the exit.

use std::collections::VecDeque;

use labyrinth_core::error::GameError;
use labyrinth_core::rng::DeterministicRng;
use tracing::info;

/// Smallest width or height [`Maze::generate`] accepts.
pub const MIN_DIMENSION: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LatticeCell {
    Wall,
    Frontier,
    Floor,
}

/// A validated passability grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Vec<Vec<bool>>,
}

impl Maze {
    /// Generates a `width × height` maze.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if either dimension is below
    /// [`MIN_DIMENSION`], and `GameError::InvariantViolation` if no entrance
    /// or exit candidate exists.
    pub fn generate(
        width: usize,
        height: usize,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, GameError> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(GameError::Configuration(format!(
                "maze must be at least {MIN_DIMENSION}x{MIN_DIMENSION}, got {width}x{height}"
            )));
        }

        let lattice = carve_lattice(width - 2, height - 2, rng);

        let mut cells = vec![vec![false; width]; height];
        for (y, row) in lattice.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                cells[y + 1][x + 1] = *cell == LatticeCell::Floor;
            }
        }

        let entrance = pick_opening(&cells[1], rng).ok_or_else(|| {
            GameError::InvariantViolation("no entrance candidate in the first interior row".into())
        })?;
        let exit = pick_opening(&cells[height - 2], rng).ok_or_else(|| {
            GameError::InvariantViolation("no exit candidate in the last interior row".into())
        })?;
        cells[0][entrance] = true;
        cells[height - 1][exit] = true;

        let maze = Self { cells };
        maze.validate()?;
        info!(width, height, entrance, exit, "maze generated");
        Ok(maze)
    }

    /// Wraps a hand-written grid, checking every passability invariant.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Configuration` if the grid is not a rectangle of
    /// at least 3×3 cells, and `GameError::InvariantViolation` if it breaks
    /// a maze invariant.
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Result<Self, GameError> {
        let width = cells.first().map_or(0, Vec::len);
        if cells.len() < 3 || width < 3 || cells.iter().any(|row| row.len() != width) {
            return Err(GameError::Configuration(
                "maze grid must be a rectangle of at least 3x3 cells".into(),
            ));
        }
        let maze = Self { cells };
        maze.validate()?;
        Ok(maze)
    }

    /// Checks the passability invariants.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvariantViolation` describing the first broken
    /// invariant.
    pub fn validate(&self) -> Result<(), GameError> {
        let height = self.height();
        let width = self.width();

        for (label, row) in [("first", 0), ("last", height - 1)] {
            let open = self.cells[row].iter().filter(|open| **open).count();
            if open != 1 {
                return Err(GameError::InvariantViolation(format!(
                    "{label} row must have exactly one opening, found {open}"
                )));
            }
        }
        for (row, cells) in self.cells.iter().enumerate() {
            if cells[0] || cells[width - 1] {
                return Err(GameError::InvariantViolation(format!(
                    "floor on the side border in row {row}"
                )));
            }
        }

        let floor = self.cells.iter().flatten().filter(|open| **open).count();
        let reached = self.flood_fill_from(0, self.entrance_index());
        if reached != floor {
            return Err(GameError::InvariantViolation(format!(
                "floor is not connected: reached {reached} of {floor} cells"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.cells[0].len()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// Whether `(row, col)` is a floor cell. Out-of-range cells are walls.
    #[must_use]
    pub fn is_floor(&self, row: usize, col: usize) -> bool {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Column of the entrance cell in the first row.
    #[must_use]
    pub fn entrance_index(&self) -> usize {
        opening_index(&self.cells[0])
    }

    /// Column of the exit cell in the last row.
    #[must_use]
    pub fn exit_index(&self) -> usize {
        opening_index(&self.cells[self.height() - 1])
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    fn flood_fill_from(&self, row: usize, col: usize) -> usize {
        let mut visited = vec![vec![false; self.width()]; self.height()];
        let mut queue = VecDeque::from([(row, col)]);
        visited[row][col] = true;
        let mut count = 0;

        while let Some((r, c)) = queue.pop_front() {
            count += 1;
            for (nr, nc) in neighbours(r, c, self.height(), self.width()) {
                if self.cells[nr][nc] && !visited[nr][nc] {
                    visited[nr][nc] = true;
                    queue.push_back((nr, nc));
                }
            }
        }
        count
    }
}

/// Runs Prim's algorithm on a `cols × rows` lattice, indexed `[row][col]`.
fn carve_lattice(cols: usize, rows: usize, rng: &mut dyn DeterministicRng) -> Vec<Vec<LatticeCell>> {
    let mut lattice = vec![vec![LatticeCell::Wall; cols]; rows];
    let mut frontier: Vec<(usize, usize)> = Vec::new();

    let start = (random_below(rng, rows), random_below(rng, cols));
    lattice[start.0][start.1] = LatticeCell::Floor;
    push_frontier(&mut lattice, &mut frontier, start);

    while let Some(index) = rng.pick_index(frontier.len()) {
        let (r, c) = frontier.swap_remove(index);
        let floor_neighbours = neighbours(r, c, rows, cols)
            .filter(|&(nr, nc)| lattice[nr][nc] == LatticeCell::Floor)
            .count();
        if floor_neighbours == 1 {
            lattice[r][c] = LatticeCell::Floor;
            push_frontier(&mut lattice, &mut frontier, (r, c));
        }
        // Rejected cells stay marked Frontier so they never re-enter the list.
    }
    lattice
}

fn push_frontier(
    lattice: &mut [Vec<LatticeCell>],
    frontier: &mut Vec<(usize, usize)>,
    (r, c): (usize, usize),
) {
    let rows = lattice.len();
    let cols = lattice[0].len();
    for (nr, nc) in neighbours(r, c, rows, cols) {
        if lattice[nr][nc] == LatticeCell::Wall {
            lattice[nr][nc] = LatticeCell::Frontier;
            frontier.push((nr, nc));
        }
    }
}

fn neighbours(
    row: usize,
    col: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    [
        row.checked_sub(1).map(|r| (r, col)),
        (col + 1 < cols).then_some((row, col + 1)),
        (row + 1 < rows).then_some((row + 1, col)),
        col.checked_sub(1).map(|c| (row, c)),
    ]
    .into_iter()
    .flatten()
}

fn random_below(rng: &mut dyn DeterministicRng, len: usize) -> usize {
    rng.pick_index(len).unwrap_or(0)
}

fn pick_opening(row: &[bool], rng: &mut dyn DeterministicRng) -> Option<usize> {
    let candidates: Vec<usize> = row
        .iter()
        .enumerate()
        .filter_map(|(x, open)| open.then_some(x))
        .collect();
    rng.pick_index(candidates.len()).map(|i| candidates[i])
}

fn opening_index(row: &[bool]) -> usize {
    row.iter().position(|open| *open).unwrap_or(0)
}
