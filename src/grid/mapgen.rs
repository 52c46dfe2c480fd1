//! Deterministic grid generation for benchmarks, tests and the CLI.

use crate::error::GridError;
use crate::grid::{Color, Coord, Terrain, ToroidalGrid};
use crate::rng::Rng;

/// Parameters for [`generate_grid`].
#[derive(Debug, Clone)]
pub struct GenerationParams {
    /// Side length of the grid.
    pub size: u16,
    /// Fraction of cells that become hills.
    pub hill_ratio: f64,
    /// Fraction of open cells that receive a random marker.
    pub marker_ratio: f64,
    /// Colors to scatter.
    pub palette: Vec<Color>,
    /// Closed square rings to draw after scattering, as `(corner, side, color)`.
    pub rings: Vec<(Coord, u16, Color)>,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            size: 64,
            hill_ratio: 0.05,
            marker_ratio: 0.10,
            palette: ['A', 'B', 'C', 'D']
                .into_iter()
                .filter_map(Color::from_char)
                .collect(),
            rings: Vec::new(),
        }
    }
}

/// Generate a grid with scattered hills and markers.
///
/// The same seed and parameters always produce the same grid.
///
/// # Errors
///
/// Returns an error if the size is below the supported minimum.
pub fn generate_grid(seed: u64, params: &GenerationParams) -> Result<ToroidalGrid, GridError> {
    let mut rng = Rng::new(seed);
    let mut grid = ToroidalGrid::new(params.size).ok_or(GridError::TooSmall(params.size))?;
    let torus = grid.torus();

    for index in 0..torus.cell_count() {
        let coord = torus.coord(index);
        if rng.next_f64() < params.hill_ratio {
            grid.set_terrain(coord, Terrain::Impassable);
        } else if !params.palette.is_empty() && rng.next_f64() < params.marker_ratio {
            let color = params.palette[rng.next_index(params.palette.len())];
            grid.place_permanent(coord, color);
        }
    }

    for &(corner, side, color) in &params.rings {
        place_ring(&mut grid, corner, side, color);
    }

    Ok(grid)
}

/// Draw the border of a `side`×`side` square whose top-left cell is `corner`.
///
/// Hills under the ring are flattened so the ring is always closed. Returns the
/// ring cells in drawing order.
pub fn place_ring(grid: &mut ToroidalGrid, corner: Coord, side: u16, color: Color) -> Vec<Coord> {
    let torus = grid.torus();
    let mut ring = Vec::new();
    let last = i64::from(side.saturating_sub(1));

    for dy in 0..=last {
        for dx in 0..=last {
            if dx != 0 && dx != last && dy != 0 && dy != last {
                continue;
            }
            let coord = torus.offset(corner, dx, dy);
            grid.set_terrain(coord, Terrain::Open);
            grid.place_permanent(coord, color);
            ring.push(coord);
        }
    }

    ring
}
