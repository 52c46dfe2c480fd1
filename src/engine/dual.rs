//! The dual grid of 2×2 primal blocks.
//!
//! Dual cell `(x, y)` covers primal cells `(x, y)`, `(x + 1, y)`, `(x, y + 1)` and
//! `(x + 1, y + 1)`. Dual coordinates wrap modulo `size - 1` while the primal
//! corners of a dual cell never wrap, so the seam between the last and first dual
//! column is not a mirror image of the other edges.

use std::collections::VecDeque;

use crate::grid::{Coord, Direction, ToroidalGrid, Torus};

/// A step from one dual cell to an adjacent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Crossing {
    /// The dual cell on the other side.
    pub(crate) to: Coord,
    /// The two primal corners of the shared edge.
    pub(crate) edge: [Coord; 2],
}

/// One primal corner of a dual cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Corner {
    /// The primal cell at the corner.
    pub(crate) primal: Coord,
    /// The other three dual cells sharing this corner.
    pub(crate) others: [Coord; 3],
}

/// Corner offsets in extraction order, with the direction of the neighboring dual cells.
const CORNERS: [((u16, u16), (i64, i64)); 4] = [
    ((1, 0), (1, -1)),
    ((1, 1), (1, 1)),
    ((0, 1), (-1, 1)),
    ((0, 0), (-1, -1)),
];

#[derive(Debug, Clone, Copy)]
pub(crate) struct DualGrid {
    dual: Torus,
}

impl DualGrid {
    pub(crate) const fn of(grid: &ToroidalGrid) -> Self {
        Self {
            dual: grid.dual_torus(),
        }
    }

    pub(crate) const fn torus(self) -> Torus {
        self.dual
    }

    pub(crate) const fn cell_count(self) -> usize {
        self.dual.cell_count()
    }

    /// The four crossings out of a dual cell, in [`Direction::ALL`] order.
    pub(crate) fn crossings(self, cell: Coord) -> [Crossing; 4] {
        let Coord { x, y } = cell;
        Direction::ALL.map(|direction| {
            let edge = match direction {
                Direction::Left => [Coord::new(x, y), Coord::new(x, y + 1)],
                Direction::Right => [Coord::new(x + 1, y), Coord::new(x + 1, y + 1)],
                Direction::Up => [Coord::new(x, y), Coord::new(x + 1, y)],
                Direction::Down => [Coord::new(x, y + 1), Coord::new(x + 1, y + 1)],
            };
            Crossing {
                to: self.dual.step(cell, direction),
                edge,
            }
        })
    }

    /// The four primal corners of a dual cell.
    pub(crate) fn corners(self, cell: Coord) -> [Corner; 4] {
        CORNERS.map(|((cx, cy), (sx, sy))| Corner {
            primal: Coord::new(cell.x + cx, cell.y + cy),
            others: [
                self.dual.offset(cell, sx, 0),
                self.dual.offset(cell, 0, sy),
                self.dual.offset(cell, sx, sy),
            ],
        })
    }

    /// Breadth-first flood over dual cells from `start`.
    ///
    /// `may_cross` decides whether a crossing can be taken; cells already marked in
    /// `visited` are never entered again. Returns the number of cells marked.
    pub(crate) fn flood<F>(
        self,
        start: Coord,
        visited: &mut [bool],
        queue: &mut VecDeque<usize>,
        mut may_cross: F,
    ) -> usize
    where
        F: FnMut(&Crossing) -> bool,
    {
        let start = self.dual.index(start);
        if visited[start] {
            return 0;
        }
        visited[start] = true;
        queue.clear();
        queue.push_back(start);
        let mut count = 1;

        while let Some(current) = queue.pop_front() {
            for crossing in self.crossings(self.dual.coord(current)) {
                let index = self.dual.index(crossing.to);
                if visited[index] || !may_cross(&crossing) {
                    continue;
                }
                visited[index] = true;
                count += 1;
                queue.push_back(index);
            }
        }

        count
    }

    /// Whether the class reached by the flood from dual `(0, 0)` is the enclosed one.
    ///
    /// The smaller class is taken to be inside, which is only sound for
    /// enclosures covering less than half of the dual grid.
    pub(crate) const fn flooded_side_is_inside(self, flooded: usize) -> bool {
        2 * flooded < self.cell_count()
    }
}
