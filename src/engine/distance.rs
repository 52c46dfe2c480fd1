//! Single-source shortest paths over the torus.

use crate::engine::Workspace;
use crate::grid::{Coord, Direction, ToroidalGrid, Torus};

/// Sentinel for cells the search never reached.
const UNREACHABLE: u32 = u32::MAX;

/// Whether hills may be walked over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HillPolicy {
    /// Impassable cells are never entered.
    #[default]
    Blocked,
    /// Impassable cells are walkable like open ground.
    Traversable,
}

impl HillPolicy {
    /// Policy from the game-wide hill traversal flag.
    #[must_use]
    pub const fn from_flag(traversable: bool) -> Self {
        if traversable {
            Self::Traversable
        } else {
            Self::Blocked
        }
    }
}

/// Distances and first steps from one origin to every cell.
///
/// The direction stored at a cell is the step the origin takes first on a
/// shortest path to that cell, so moving one step toward any target is a single
/// lookup once the field is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceField {
    torus: Torus,
    origin: Coord,
    distance: Vec<u32>,
    direction: Vec<Option<Direction>>,
}

impl DistanceField {
    /// Run a breadth-first search from `origin`.
    #[must_use]
    pub fn compute(
        grid: &ToroidalGrid,
        origin: Coord,
        hills: HillPolicy,
        ws: &mut Workspace,
    ) -> Self {
        let mut field = Self {
            torus: grid.torus(),
            origin,
            distance: Vec::with_capacity(grid.torus().cell_count()),
            direction: Vec::with_capacity(grid.torus().cell_count()),
        };
        field.recompute(grid, origin, hills, ws);
        field
    }

    /// Rerun the search in place from a new origin, reusing the allocation.
    pub fn recompute(
        &mut self,
        grid: &ToroidalGrid,
        origin: Coord,
        hills: HillPolicy,
        ws: &mut Workspace,
    ) {
        let torus = grid.torus();
        let cells = grid.cells();
        let origin = torus.normalize(origin);
        self.torus = torus;
        self.origin = origin;
        self.distance.clear();
        self.distance.resize(torus.cell_count(), UNREACHABLE);
        self.direction.clear();
        self.direction.resize(torus.cell_count(), None);

        let start = torus.index(origin);
        self.distance[start] = 0;

        let queue = &mut ws.queue;
        queue.clear();
        queue.reserve(torus.cell_count());
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let next_distance = self.distance[current] + 1;
            for (direction, neighbor) in torus.neighbors(torus.coord(current)) {
                let index = torus.index(neighbor);
                if hills == HillPolicy::Blocked && cells[index].is_impassable() {
                    continue;
                }
                if self.distance[index] != UNREACHABLE {
                    continue;
                }
                self.distance[index] = next_distance;
                self.direction[index] = if current == start {
                    Some(direction)
                } else {
                    self.direction[current]
                };
                queue.push_back(index);
            }
        }
    }

    /// The origin of the search.
    #[must_use]
    pub const fn origin(&self) -> Coord {
        self.origin
    }

    /// Turns needed to reach a cell, or `None` if it is unreachable.
    #[must_use]
    #[inline]
    pub fn distance(&self, target: Coord) -> Option<u32> {
        let d = self.distance[self.torus.index(self.torus.normalize(target))];
        (d != UNREACHABLE).then_some(d)
    }

    /// First step from the origin toward a cell.
    ///
    /// `None` for the origin itself and for unreachable cells.
    #[must_use]
    #[inline]
    pub fn direction(&self, target: Coord) -> Option<Direction> {
        self.direction[self.torus.index(self.torus.normalize(target))]
    }

    /// First step as a `(dx, dy)` pair; `(0, 0)` when there is no step.
    #[must_use]
    pub fn step(&self, target: Coord) -> (i8, i8) {
        self.direction(target).map_or((0, 0), Direction::delta)
    }

    /// Where the origin ends up after one step toward `target`.
    #[must_use]
    pub fn next_position(&self, target: Coord) -> Coord {
        self.direction(target)
            .map_or(self.origin, |direction| self.torus.step(self.origin, direction))
    }

    /// Number of reachable cells, the origin included.
    #[must_use]
    pub fn reachable_count(&self) -> usize {
        self.distance.iter().filter(|&&d| d != UNREACHABLE).count()
    }

    /// First cell breaking the "no direction iff unreachable or origin" rule.
    #[must_use]
    pub fn first_inconsistency(&self) -> Option<Coord> {
        let origin = self.torus.index(self.origin);
        (0..self.distance.len())
            .find(|&index| {
                let unreachable = self.distance[index] == UNREACHABLE;
                let no_step = self.direction[index].is_none();
                no_step != (unreachable || index == origin)
            })
            .map(|index| self.torus.coord(index))
    }
}

/// Compute the distance field from `origin`.
#[must_use]
pub fn compute_distance_field(
    grid: &ToroidalGrid,
    origin: Coord,
    hills: HillPolicy,
    ws: &mut Workspace,
) -> DistanceField {
    DistanceField::compute(grid, origin, hills, ws)
}
