//! Row-major grid coordinates and directional neighbor lookup.
//!
//! ```sh
//! 0 - 1 - 2
//! |   |   |
//! 3 - 4 - 5
//! ```
//!
//! ```
//! use prim_maze::grid::{neighbor_index, Direction, Grid};
//!
//! let grid = Grid::new(2, 3);
//! assert_eq!(grid.neighbor(4u16, Direction::Up), Some(1));
//! assert_eq!(grid.neighbor(4u16, Direction::Down), None);
//!
//! assert_eq!(neighbor_index(5, "left", 2, 3), Some(4));
//! assert_eq!(neighbor_index(5, "sideways", 2, 3), None);
//! ```

use crate::{error::MazeError, graph::NodeId};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

impl FromStr for Direction {
    type Err = MazeError;

    /// Accepts `up`, `right`, `down`, `left`, and the aliases `top` and `bottom`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "top" => Ok(Direction::Up),
            "right" => Ok(Direction::Right),
            "down" | "bottom" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            _ => Err(MazeError::InvalidDirection(s.to_owned())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}

/// Dimensions of a rectangular grid whose cells are numbered in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
}

impl Grid {
    #[inline]
    pub fn new(rows: usize, columns: usize) -> Self {
        Self { rows, columns }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.len()
    }

    /// Flat index of the cell at `(row, column)`.
    ///
    /// Panics if the cell is outside the grid.
    #[inline]
    pub fn index(&self, row: usize, column: usize) -> usize {
        assert!(
            row < self.rows && column < self.columns,
            "cell ({row}, {column}) is outside a {}x{} grid",
            self.rows,
            self.columns
        );
        row * self.columns + column
    }

    /// `(row, column)` of the cell at `index`.
    ///
    /// Panics if the index is outside the grid.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        self.check(index);
        (index / self.columns, index % self.columns)
    }

    /// Index of the cell next to `index` in `direction`,
    /// or `None` if that step leaves the grid.
    pub fn neighbor_index(&self, index: usize, direction: Direction) -> Option<usize> {
        let (row, column) = self.coords(index);

        match direction {
            Direction::Up if row > 0 => Some(index - self.columns),
            Direction::Right if column + 1 < self.columns => Some(index + 1),
            Direction::Down if row + 1 < self.rows => Some(index + self.columns),
            Direction::Left if column > 0 => Some(index - 1),
            _ => None,
        }
    }

    /// Same as [neighbor_index](Self::neighbor_index) for typed node ids.
    #[inline]
    pub fn neighbor<N: NodeId>(&self, index: N, direction: Direction) -> Option<N> {
        self.neighbor_index(index.as_usize(), direction)
            .map(N::from_usize)
    }

    /// Iterate the existing neighbors of `index`, in up, right, down, left order.
    pub fn neighbors<'a, N: NodeId + 'a>(
        &'a self,
        index: N,
    ) -> impl Iterator<Item = (Direction, N)> + 'a {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.neighbor(index, d).map(|n| (d, n)))
    }

    /// Direction of the single step from `from` to `to`, if they are adjacent.
    pub fn direction_between(&self, from: usize, to: usize) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&d| self.neighbor_index(from, d) == Some(to))
    }

    /// Chessboard distance between two cells.
    pub fn chebyshev_distance(&self, a: usize, b: usize) -> usize {
        let (ar, ac) = self.coords(a);
        let (br, bc) = self.coords(b);
        ar.abs_diff(br).max(ac.abs_diff(bc))
    }

    #[inline]
    fn check(&self, index: usize) {
        assert!(
            self.contains(index),
            "index {index} is outside a {}x{} grid",
            self.rows,
            self.columns
        );
    }
}

/// Index of the cell next to `index` in the direction named by `direction`.
///
/// Returns `None` when the token is not a direction or the step leaves the grid.
pub fn neighbor_index(index: usize, direction: &str, rows: usize, columns: usize) -> Option<usize> {
    let direction = direction.parse::<Direction>().ok()?;
    Grid::new(rows, columns).neighbor_index(index, direction)
}
