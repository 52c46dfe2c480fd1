//! Error types for the engine, grid construction and snapshot parsing.

use thiserror::Error;

use crate::grid::Coord;

/// Errors raised by the territory algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A harvest was requested on a cell that holds no marker.
    ///
    /// This means the local grid mirror and the environment disagree.
    #[error("harvest seed {seed} holds no marker")]
    InvalidSeed {
        /// The offending seed cell.
        seed: Coord,
    },
    /// An enclosed area was found whose boundary is not made of the agent's own markers.
    #[error("malformed fence around area starting at dual cell {area}")]
    MalformedFence {
        /// First dual cell of the offending area.
        area: Coord,
    },
}

/// Errors raised while building a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    /// The grid has fewer than two rows.
    #[error("grid size {0} is below the minimum of 2")]
    TooSmall(u16),
    /// The grid has more rows than a coordinate can address.
    #[error("grid with {0} rows is too large")]
    TooLarge(usize),
    /// A row has a different length from the number of rows.
    #[error("row {row} has {actual} cells, expected {expected}")]
    NotSquare {
        /// Row index.
        row: usize,
        /// Expected row length.
        expected: usize,
        /// Actual row length.
        actual: usize,
    },
    /// A map character is not `.`, `#` or a letter.
    #[error("unknown map character {ch:?} at ({x}, {y})")]
    UnknownCell {
        /// Column.
        x: usize,
        /// Row.
        y: usize,
        /// The character found.
        ch: char,
    },
}

/// Errors raised while parsing environment snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// The input ended before a required line.
    #[error("missing {0} line")]
    MissingLine(&'static str),
    /// A line has too few fields.
    #[error("{section}: expected {expected} fields, found {actual}")]
    FieldCount {
        /// Section being parsed.
        section: &'static str,
        /// Fields required.
        expected: usize,
        /// Fields present.
        actual: usize,
    },
    /// A field could not be parsed.
    #[error("{section}: invalid {field} {value:?}")]
    InvalidField {
        /// Section being parsed.
        section: &'static str,
        /// Field name.
        field: &'static str,
        /// The raw text.
        value: String,
    },
    /// A coordinate lies outside the grid.
    #[error("{section}: coordinate ({x}, {y}) is outside the grid")]
    OutOfBounds {
        /// Section being parsed.
        section: &'static str,
        /// Column.
        x: i64,
        /// Row.
        y: i64,
    },
    /// The map block does not form a valid grid.
    #[error(transparent)]
    Grid(#[from] GridError),
}
