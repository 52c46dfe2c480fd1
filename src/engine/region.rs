//! Harvest classification: which markers a harvest at a seed cell removes.

use serde::Serialize;
use tracing::debug;

use crate::engine::dual::DualGrid;
use crate::engine::workspace::{reset_marks, Workspace};
use crate::error::EngineError;
use crate::grid::{Coord, ToroidalGrid};

/// The cells affected by a harvest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Fence cells bordering the outside of the enclosure.
    pub perimeter: Vec<Coord>,
    /// Marker cells strictly inside the enclosure.
    pub internal: Vec<Coord>,
}

impl Region {
    /// Whether the harvest affects nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.perimeter.is_empty() && self.internal.is_empty()
    }

    /// Total number of affected cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.perimeter.len() + self.internal.len()
    }
}

/// Classify the cells a harvest at `seed` affects.
///
/// The fence is the 4-connected cluster of the seed's color. The dual grid is
/// flooded from dual `(0, 0)` without crossing fence edges, and the smaller side
/// is the enclosure. Fence corners of enclosed dual cells that touch the outside
/// are perimeter; any other marker corner is internal. An open fence encloses
/// nothing and yields an empty region.
///
/// # Errors
///
/// Returns [`EngineError::InvalidSeed`] if the seed cell holds no marker.
pub fn classify_harvest(
    grid: &ToroidalGrid,
    seed: Coord,
    ws: &mut Workspace,
) -> Result<Region, EngineError> {
    let torus = grid.torus();
    let seed = torus.normalize(seed);
    let color = grid.marker(seed).ok_or(EngineError::InvalidSeed { seed })?;
    let cells = grid.cells();
    let dual = DualGrid::of(grid);

    let Workspace {
        queue,
        fence,
        recorded,
        flooded,
        ..
    } = ws;

    reset_marks(fence, torus.cell_count());
    let start = torus.index(seed);
    fence[start] = true;
    queue.clear();
    queue.push_back(start);
    let mut fence_len = 1_usize;
    while let Some(current) = queue.pop_front() {
        for (_, neighbor) in torus.neighbors(torus.coord(current)) {
            let index = torus.index(neighbor);
            if !fence[index] && cells[index].marker == Some(color) {
                fence[index] = true;
                fence_len += 1;
                queue.push_back(index);
            }
        }
    }

    reset_marks(flooded, dual.cell_count());
    let flooded_count = dual.flood(Coord::new(0, 0), flooded, queue, |crossing| {
        let [a, b] = crossing.edge;
        !(fence[torus.index(a)] && fence[torus.index(b)])
    });
    let flooded_is_inside = dual.flooded_side_is_inside(flooded_count);
    let dual_torus = dual.torus();
    let is_inside = |cell: Coord| flooded[dual_torus.index(cell)] == flooded_is_inside;

    reset_marks(recorded, torus.cell_count());
    let mut region = Region::default();
    for cell in dual_torus.columns().filter(|&cell| is_inside(cell)) {
        for corner in dual.corners(cell) {
            let index = torus.index(corner.primal);
            if recorded[index] {
                continue;
            }
            if fence[index] && corner.others.iter().any(|&other| !is_inside(other)) {
                recorded[index] = true;
                region.perimeter.push(corner.primal);
            } else if cells[index].marker.is_some() {
                recorded[index] = true;
                region.internal.push(corner.primal);
            }
        }
    }

    debug!(
        %seed,
        color = %color,
        fence = fence_len,
        perimeter = region.perimeter.len(),
        internal = region.internal.len(),
        "classified harvest"
    );
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut cells: Vec<Coord>) -> Vec<Coord> {
        cells.sort_unstable();
        cells
    }

    #[test]
    fn test_empty_seed_is_rejected() {
        let grid = ToroidalGrid::new(5).unwrap();
        let err = classify_harvest(&grid, Coord::new(7, 2), &mut Workspace::new()).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidSeed {
                seed: Coord::new(2, 2)
            }
        );
    }

    #[test]
    fn test_small_ring_has_full_perimeter() {
        let rows = [
            "......", ".AAA..", ".A.A..", ".AAA..", "......", "......",
        ];
        let grid = ToroidalGrid::from_rows(&rows).unwrap();
        let region = classify_harvest(&grid, Coord::new(2, 1), &mut Workspace::new()).unwrap();
        assert_eq!(region.perimeter.len(), 8);
        assert!(region.internal.is_empty());
        assert_eq!(region.len(), 8);
    }

    #[test]
    fn test_enclosed_markers_are_internal() {
        let rows = [
            ".......", ".AAAAA.", ".A...A.", ".A.B.A.", ".A...A.", ".AAAAA.", ".......",
        ];
        let grid = ToroidalGrid::from_rows(&rows).unwrap();
        let region = classify_harvest(&grid, Coord::new(1, 1), &mut Workspace::new()).unwrap();
        assert_eq!(region.perimeter.len(), 16);
        assert_eq!(region.internal, vec![Coord::new(3, 3)]);
    }

    #[test]
    fn test_open_fence_is_noop() {
        let rows = [".....", ".AAA.", ".A...", ".AAA.", "....."];
        let grid = ToroidalGrid::from_rows(&rows).unwrap();
        let region = classify_harvest(&grid, Coord::new(1, 1), &mut Workspace::new()).unwrap();
        assert!(region.is_empty());
    }

    #[test]
    fn test_perimeter_and_internal_are_disjoint_markers() {
        let rows = [
            "........", ".BBBBB..", ".BA.AB..", ".B.B.B..", ".BA.AB..", ".BBBBB..", "........",
            "........",
        ];
        let grid = ToroidalGrid::from_rows(&rows).unwrap();
        let region = classify_harvest(&grid, Coord::new(1, 1), &mut Workspace::new()).unwrap();
        let perimeter = sorted(region.perimeter.clone());
        let internal = sorted(region.internal.clone());
        assert_eq!(perimeter.len(), 16);
        assert_eq!(internal.len(), 5);
        assert!(internal.iter().all(|c| !perimeter.contains(c)));
        assert!(
            perimeter
                .iter()
                .chain(&internal)
                .all(|&c| grid.marker(c).is_some())
        );
    }
}
