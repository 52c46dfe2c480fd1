//! Discovery of enclosed areas that can be scored.

use serde::Serialize;
use tracing::{debug, warn};

use crate::engine::dual::DualGrid;
use crate::engine::workspace::{reset_marks, Workspace};
use crate::error::EngineError;
use crate::grid::{Color, Coord, ToroidalGrid};

/// An enclosed area and the marker that triggers its scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreableArea {
    /// Dual cells making up the area.
    pub cells: Vec<Coord>,
    /// A fence cell of the agent's color on the area's border.
    pub trigger: Coord,
}

impl ScoreableArea {
    /// Number of dual cells in the area.
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }
}

/// Find every area enclosed by fences of `color`.
///
/// Dual cells are flooded from dual `(0, 0)` across any edge not fully held by
/// `color`; the smaller side is enclosed. Each connected component of the
/// enclosed side is an area, in x-major order of its first cell, and its trigger
/// is the first corner of the first fence edge found leading out of it.
///
/// Components are joined across fence edges too, so a ring nested inside
/// another area belongs to that area. Crossings out of an area that are not
/// fenced are ignored; they only occur on the seam, where the two directions of
/// a crossing use different primal corners.
///
/// # Errors
///
/// Returns [`EngineError::MalformedFence`] if an area has no fenced crossing
/// out of it.
pub fn find_scoreable_areas(
    grid: &ToroidalGrid,
    color: Color,
    ws: &mut Workspace,
) -> Result<Vec<ScoreableArea>, EngineError> {
    let torus = grid.torus();
    let cells = grid.cells();
    let dual = DualGrid::of(grid);
    let dual_torus = dual.torus();
    let blocked = |edge: &[Coord; 2]| {
        edge.iter()
            .all(|&corner| cells[torus.index(corner)].marker == Some(color))
    };

    let Workspace {
        queue,
        flooded,
        component,
        ..
    } = ws;

    reset_marks(flooded, dual.cell_count());
    let flooded_count = dual.flood(Coord::new(0, 0), flooded, queue, |crossing| {
        !blocked(&crossing.edge)
    });
    let flooded_is_inside = dual.flooded_side_is_inside(flooded_count);

    reset_marks(component, dual.cell_count());
    let mut areas = Vec::new();
    for start in dual_torus.columns() {
        let index = dual_torus.index(start);
        if component[index] || flooded[index] != flooded_is_inside {
            continue;
        }

        let mut trigger = None;
        let mut members = Vec::new();
        component[index] = true;
        queue.clear();
        queue.push_back(index);
        while let Some(current) = queue.pop_front() {
            let cell = dual_torus.coord(current);
            members.push(cell);
            for crossing in dual.crossings(cell) {
                let next = dual_torus.index(crossing.to);
                if flooded[next] != flooded_is_inside {
                    if trigger.is_none() && blocked(&crossing.edge) {
                        trigger = Some(crossing.edge[0]);
                    }
                } else if !component[next] {
                    component[next] = true;
                    queue.push_back(next);
                }
            }
        }

        let Some(trigger) = trigger else {
            warn!(area = %start, %color, "enclosed area without a fence edge");
            return Err(EngineError::MalformedFence { area: start });
        };
        areas.push(ScoreableArea {
            cells: members,
            trigger,
        });
    }

    debug!(%color, areas = areas.len(), outside = flooded_count, "found scoreable areas");
    Ok(areas)
}
