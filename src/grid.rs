//! Grid layer.
//!
//! - Coordinates and wrapped arithmetic ([`Torus`])
//! - Cells: terrain, markers and expiry
//! - The toroidal grid itself
//! - Deterministic grid generation

mod cell;
mod coord;
mod mapgen;
mod toroidal;

pub use cell::{Cell, Color, Terrain};
pub use coord::{Coord, Direction, Torus};
pub use mapgen::{generate_grid, place_ring, GenerationParams};
pub use toroidal::{ToroidalGrid, MIN_GRID_SIZE};
