//! Coordinates, unit steps and wrapped arithmetic on a torus.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell coordinate.
///
/// Coordinates produced by a [`Torus`] are always normalized into `[0, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u16,
    /// Y coordinate (row).
    pub y: u16,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A single orthogonal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Towards smaller x.
    Left,
    /// Towards larger x.
    Right,
    /// Towards smaller y.
    Up,
    /// Towards larger y.
    Down,
}

impl Direction {
    /// All directions in neighbor-expansion order.
    ///
    /// Every flood fill in the crate visits neighbors in this order, which makes
    /// tie-breaking between equally short paths deterministic.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The step as a `(dx, dy)` pair.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    /// Look up the direction for a unit `(dx, dy)` pair.
    #[must_use]
    pub const fn from_delta(dx: i8, dy: i8) -> Option<Self> {
        match (dx, dy) {
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            _ => None,
        }
    }
}

/// The extent of a square toroidal grid.
///
/// This is the single normalization path for coordinate arithmetic: anything that
/// steps off one edge comes back on the opposite edge. The primal grid and the
/// dual grid used by the flood fills each have their own `Torus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Torus {
    size: u16,
}

impl Torus {
    /// Create a torus with the given side length.
    ///
    /// Returns `None` if `size` is zero.
    #[must_use]
    pub const fn new(size: u16) -> Option<Self> {
        if size == 0 {
            None
        } else {
            Some(Self { size })
        }
    }

    /// Side length.
    #[must_use]
    pub const fn size(self) -> u16 {
        self.size
    }

    /// Number of cells.
    #[must_use]
    pub const fn cell_count(self) -> usize {
        self.size as usize * self.size as usize
    }

    /// Fold any integer into `[0, size)`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn wrap(self, k: i64) -> u16 {
        // rem_euclid is non-negative and below size, so the cast is lossless
        k.rem_euclid(self.size as i64) as u16
    }

    /// Normalize a coordinate that may lie outside the torus.
    #[must_use]
    pub const fn normalize(self, coord: Coord) -> Coord {
        Coord::new(
            self.wrap(coord.x as i64),
            self.wrap(coord.y as i64),
        )
    }

    /// Offset a coordinate by `(dx, dy)`, wrapping around the edges.
    #[must_use]
    pub const fn offset(self, coord: Coord, dx: i64, dy: i64) -> Coord {
        Coord::new(
            self.wrap(coord.x as i64 + dx),
            self.wrap(coord.y as i64 + dy),
        )
    }

    /// Take one step in a direction.
    #[must_use]
    pub const fn step(self, coord: Coord, direction: Direction) -> Coord {
        let (dx, dy) = direction.delta();
        self.offset(coord, dx as i64, dy as i64)
    }

    /// The four neighbors of a cell, in [`Direction::ALL`] order.
    #[must_use]
    #[inline]
    pub fn neighbors(self, coord: Coord) -> [(Direction, Coord); 4] {
        Direction::ALL.map(|direction| (direction, self.step(coord, direction)))
    }

    /// Row-major index of a normalized coordinate.
    #[must_use]
    #[inline]
    pub fn index(self, coord: Coord) -> usize {
        usize::from(coord.y) * usize::from(self.size) + usize::from(coord.x)
    }

    /// Coordinate of a row-major index.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn coord(self, index: usize) -> Coord {
        let size = usize::from(self.size);
        Coord::new((index % size) as u16, (index / size) as u16)
    }

    /// Whether a coordinate is already normalized.
    #[must_use]
    pub const fn contains(self, coord: Coord) -> bool {
        coord.x < self.size && coord.y < self.size
    }

    /// Iterate over all coordinates, x-major (columns outermost).
    pub fn columns(self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |x| (0..size).map(move |y| Coord::new(x, y)))
    }
}
