//! Pattern squares drawn by dedicated workers.

use crate::engine::DistanceField;
use crate::grid::{Color, Coord, ToroidalGrid, Torus};

/// An axis-aligned square of cells, `extent + 1` cells on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternSquare {
    /// Top-left cell.
    pub corner: Coord,
    /// Offset from the top-left to the bottom-right cell on each axis.
    pub extent: u16,
}

impl PatternSquare {
    /// The largest hill-free square containing `origin`.
    ///
    /// Every growth up and to the left of `origin` is tried with every growth down
    /// and to the right that stays clear; the first largest combination wins, so
    /// on open ground the square starts at `origin`. The extent is capped at
    /// `max_extent` and at `size - 1`.
    #[must_use]
    pub fn around(grid: &ToroidalGrid, origin: Coord, max_extent: u16) -> Self {
        let torus = grid.torus();
        let cap = i64::from(max_extent.min(grid.size() - 1));
        let open = |dx: i64, dy: i64| !grid.is_impassable(torus.offset(origin, dx, dy));
        let neg_clear = |neg: i64| {
            open(-neg, -neg) && (0..neg).all(|i| open(-neg, -i) && open(-i, -neg))
        };
        let pos_clear = |neg: i64, pos: i64| {
            open(pos, pos) && (-neg..pos).all(|i| open(pos, i) && open(i, pos))
        };

        let (mut best_total, mut best_neg) = (0, 0);
        let mut neg = 0;
        loop {
            let mut pos = 0;
            loop {
                if neg + pos > best_total {
                    best_total = neg + pos;
                    best_neg = neg;
                }
                if neg + pos >= cap || !pos_clear(neg, pos + 1) {
                    break;
                }
                pos += 1;
            }
            if neg >= cap || !neg_clear(neg + 1) {
                break;
            }
            neg += 1;
        }

        Self {
            corner: torus.offset(origin, -best_neg, -best_neg),
            // best_total never exceeds cap, which came from a u16
            extent: u16::try_from(best_total).unwrap_or(max_extent),
        }
    }

    /// Border cells: left and right columns, then top and bottom rows, interleaved.
    #[must_use]
    pub fn border(&self, torus: Torus) -> Vec<Coord> {
        let extent = i64::from(self.extent);
        let mut cells = Vec::with_capacity(4 * usize::from(self.extent).max(1));
        for i in 0..=extent {
            for (dx, dy) in [(0, i), (extent, i), (i, 0), (i, extent)] {
                let cell = torus.offset(self.corner, dx, dy);
                if !cells.contains(&cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Every cell of the square, x-major.
    pub fn cells(&self, torus: Torus) -> impl Iterator<Item = Coord> {
        let corner = self.corner;
        let extent = i64::from(self.extent);
        (0..=extent).flat_map(move |dx| (0..=extent).map(move |dy| torus.offset(corner, dx, dy)))
    }

    /// The cell the worker should head for next.
    ///
    /// A candidate is reachable, not yet of `color`, not a hill and `is_free`. The
    /// nearest border candidate wins; failing that the nearest anywhere in the
    /// square. Ties go to the earlier cell.
    pub fn next_target<F>(
        &self,
        field: &DistanceField,
        grid: &ToroidalGrid,
        color: Color,
        is_free: F,
    ) -> Option<Coord>
    where
        F: Fn(Coord) -> bool,
    {
        let torus = grid.torus();
        let nearest = |cells: &mut dyn Iterator<Item = Coord>| {
            cells
                .filter(|&cell| {
                    grid.marker(cell) != Some(color) && !grid.is_impassable(cell) && is_free(cell)
                })
                .filter_map(|cell| field.distance(cell).map(|d| (d, cell)))
                .filter(|&(d, _)| d > 0)
                .min_by_key(|&(d, _)| d)
                .map(|(_, cell)| cell)
        };
        nearest(&mut self.border(torus).into_iter())
            .or_else(|| nearest(&mut self.cells(torus)))
    }
}
