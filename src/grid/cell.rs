//! Cell contents.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Terrain of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Terrain {
    /// Open ground; may hold a marker.
    Open = 0,
    /// Hill; never holds a marker and is only walkable when hill traversal is on.
    Impassable = 1,
}

/// Marker color, one ASCII letter per team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Color(u8);

impl Color {
    /// Create a color from an ASCII letter.
    ///
    /// Returns `None` for anything that is not an ASCII letter.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        if ch.is_ascii_alphabetic() {
            Some(Self(ch as u8))
        } else {
            None
        }
    }

    /// The color as a character.
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0 as char
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(b'A')
    }
}

impl TryFrom<char> for Color {
    type Error = String;

    fn try_from(ch: char) -> Result<Self, Self::Error> {
        Self::from_char(ch).ok_or_else(|| format!("invalid color {ch:?}"))
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.as_char()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Terrain.
    pub terrain: Terrain,
    /// Marker on this cell, if any.
    pub marker: Option<Color>,
    /// Turns until the marker expires (`None` = no countdown).
    pub expiry: Option<u32>,
}

impl Cell {
    /// An empty open cell.
    #[must_use]
    pub const fn open() -> Self {
        Self {
            terrain: Terrain::Open,
            marker: None,
            expiry: None,
        }
    }

    /// An impassable cell.
    #[must_use]
    pub const fn impassable() -> Self {
        Self {
            terrain: Terrain::Impassable,
            marker: None,
            expiry: None,
        }
    }

    /// An open cell holding a marker with no expiry countdown.
    #[must_use]
    pub const fn marked(color: Color) -> Self {
        Self {
            terrain: Terrain::Open,
            marker: Some(color),
            expiry: None,
        }
    }

    /// Whether this cell is impassable terrain.
    #[must_use]
    pub const fn is_impassable(&self) -> bool {
        matches!(self.terrain, Terrain::Impassable)
    }

    /// Whether this cell is open and holds no marker.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self.terrain, Terrain::Open) && self.marker.is_none()
    }

    /// Parse a map character: `.` empty, `#` impassable, a letter is a marker.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Self::open()),
            '#' => Some(Self::impassable()),
            _ => match Color::from_char(ch) {
                Some(color) => Some(Self::marked(color)),
                None => None,
            },
        }
    }

    /// Render as a map character.
    #[must_use]
    pub const fn as_char(&self) -> char {
        match (self.terrain, self.marker) {
            (Terrain::Impassable, _) => '#',
            (Terrain::Open, Some(color)) => color.as_char(),
            (Terrain::Open, None) => '.',
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::open()
    }
}
