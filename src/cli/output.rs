//! Output formatting utilities for CLI.

use gridfence::engine::DistanceField;
use gridfence::{Coord, ToroidalGrid};
use serde::Serialize;

/// JSON-serializable distance query.
#[derive(Debug, Serialize)]
pub(super) struct JsonDistance {
    /// Search origin.
    pub(super) origin: Coord,
    /// Number of reachable cells, origin included.
    pub(super) reachable: usize,
    /// Distance per cell, row by row (null if unreachable).
    pub(super) rows: Vec<Vec<Option<u32>>>,
    /// Path details when a destination was given.
    pub(super) route: Option<JsonRoute>,
}

/// JSON-serializable route to one destination.
#[derive(Debug, Serialize)]
pub(super) struct JsonRoute {
    /// Destination cell.
    pub(super) to: Coord,
    /// Steps needed (null if unreachable).
    pub(super) distance: Option<u32>,
    /// First step as `(dx, dy)`.
    pub(super) step: (i8, i8),
}

impl JsonDistance {
    /// Create from a distance field.
    pub(super) fn from_field(field: &DistanceField, size: u16, to: Option<Coord>) -> Self {
        Self {
            origin: field.origin(),
            reachable: field.reachable_count(),
            rows: (0..size)
                .map(|y| (0..size).map(|x| field.distance(Coord::new(x, y))).collect())
                .collect(),
            route: to.map(|to| JsonRoute {
                to,
                distance: field.distance(to),
                step: field.step(to),
            }),
        }
    }
}

/// Render the grid with some cells replaced by overlay characters.
pub(super) fn render_overlay(grid: &ToroidalGrid, overlay: &[(Coord, char)]) -> String {
    let size = usize::from(grid.size());
    let mut rows: Vec<Vec<char>> = grid.to_rows().iter().map(|row| row.chars().collect()).collect();
    for &(coord, ch) in overlay {
        let (x, y) = (usize::from(coord.x), usize::from(coord.y));
        if y < size && x < size {
            rows[y][x] = ch;
        }
    }
    let mut output = String::with_capacity(size * (size + 1));
    for row in rows {
        output.extend(row);
        output.push('\n');
    }
    output
}

/// Format a distance field as a text table; unreachable cells show as `-`.
pub(super) fn format_distance_table(field: &DistanceField, size: u16) -> String {
    let width = (0..size)
        .flat_map(|y| (0..size).map(move |x| Coord::new(x, y)))
        .filter_map(|coord| field.distance(coord))
        .max()
        .map_or(1, |d| d.to_string().len());
    let mut output = String::new();
    for y in 0..size {
        let cells: Vec<String> = (0..size)
            .map(|x| {
                field
                    .distance(Coord::new(x, y))
                    .map_or_else(|| format!("{:>width$}", "-"), |d| format!("{d:>width$}"))
            })
            .collect();
        output.push_str(&cells.join(" "));
        output.push('\n');
    }
    output
}
