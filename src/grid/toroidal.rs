//! The toroidal grid.

use crate::error::GridError;
use crate::grid::{Cell, Color, Coord, Terrain, Torus};

/// Smallest supported side length; the dual grid needs at least one cell.
pub const MIN_GRID_SIZE: u16 = 2;

/// A square grid whose edges wrap around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToroidalGrid {
    /// Extent and coordinate normalization.
    torus: Torus,
    /// Extent of the dual grid of 2×2 blocks, one smaller than the grid.
    dual: Torus,
    /// Cells stored in row-major order.
    cells: Vec<Cell>,
}

impl ToroidalGrid {
    /// Create a grid filled with empty open cells.
    ///
    /// Returns `None` if `size` is below [`MIN_GRID_SIZE`].
    #[must_use]
    pub fn new(size: u16) -> Option<Self> {
        if size < MIN_GRID_SIZE {
            return None;
        }
        let torus = Torus::new(size)?;
        let dual = Torus::new(size - 1)?;
        Some(Self {
            torus,
            dual,
            cells: vec![Cell::open(); torus.cell_count()],
        })
    }

    /// Build a grid from map rows (`.` empty, `#` impassable, letters are markers).
    ///
    /// # Errors
    ///
    /// Returns an error if the rows do not form a square of supported size or
    /// contain an unknown character.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let size = u16::try_from(rows.len()).map_err(|_| GridError::TooLarge(rows.len()))?;
        let mut grid = Self::new(size).ok_or(GridError::TooSmall(size))?;

        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let width = row.chars().count();
            if width != rows.len() {
                return Err(GridError::NotSquare {
                    row: y,
                    expected: rows.len(),
                    actual: width,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch).ok_or(GridError::UnknownCell { x, y, ch })?;
                grid.cells[y * rows.len() + x] = cell;
            }
        }

        Ok(grid)
    }

    /// Render the grid as map rows.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(usize::from(self.size()))
            .map(|row| row.iter().map(Cell::as_char).collect())
            .collect()
    }

    /// Side length.
    #[must_use]
    pub const fn size(&self) -> u16 {
        self.torus.size()
    }

    /// The coordinate normalizer for this grid.
    #[must_use]
    pub const fn torus(&self) -> Torus {
        self.torus
    }

    /// The coordinate normalizer for the dual grid of 2×2 blocks.
    #[must_use]
    pub const fn dual_torus(&self) -> Torus {
        self.dual
    }

    /// Fold an integer into `[0, size)`.
    #[must_use]
    pub const fn wrap(&self, k: i64) -> u16 {
        self.torus.wrap(k)
    }

    /// Raw cells in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// The cell at a coordinate; out-of-range coordinates wrap.
    #[must_use]
    #[inline]
    pub fn cell(&self, coord: Coord) -> &Cell {
        &self.cells[self.torus.index(self.torus.normalize(coord))]
    }

    /// The marker at a coordinate, if any.
    #[must_use]
    #[inline]
    pub fn marker(&self, coord: Coord) -> Option<Color> {
        self.cell(coord).marker
    }

    /// Whether the cell at a coordinate is impassable.
    #[must_use]
    #[inline]
    pub fn is_impassable(&self, coord: Coord) -> bool {
        self.cell(coord).is_impassable()
    }

    /// Change the terrain of a cell. Making a cell impassable removes its marker.
    pub fn set_terrain(&mut self, coord: Coord, terrain: Terrain) {
        let cell = self.cell_mut(coord);
        cell.terrain = terrain;
        if terrain == Terrain::Impassable {
            cell.marker = None;
            cell.expiry = None;
        }
    }

    /// Place a marker and restart its expiry countdown at `lifetime`.
    ///
    /// Returns `false` (and leaves the cell untouched) if the cell is impassable.
    pub fn place_marker(&mut self, coord: Coord, color: Color, lifetime: u32) -> bool {
        let cell = self.cell_mut(coord);
        if cell.is_impassable() {
            return false;
        }
        cell.marker = Some(color);
        cell.expiry = Some(lifetime);
        true
    }

    /// Place a marker with no expiry countdown.
    ///
    /// Returns `false` if the cell is impassable.
    pub fn place_permanent(&mut self, coord: Coord, color: Color) -> bool {
        let cell = self.cell_mut(coord);
        if cell.is_impassable() {
            return false;
        }
        cell.marker = Some(color);
        cell.expiry = None;
        true
    }

    /// Remove the marker from a cell.
    pub fn clear_marker(&mut self, coord: Coord) {
        let cell = self.cell_mut(coord);
        cell.marker = None;
        cell.expiry = None;
    }

    /// Set the expiry countdown of a marker cell as reported by the environment.
    pub fn set_expiry(&mut self, coord: Coord, expiry: Option<u32>) {
        let cell = self.cell_mut(coord);
        if cell.marker.is_some() {
            cell.expiry = expiry;
        }
    }

    /// Count down every marker expiry by one turn, clearing markers that run out.
    ///
    /// Returns the cells whose markers expired.
    pub fn tick_expiry(&mut self) -> Vec<Coord> {
        let torus = self.torus;
        let mut expired = Vec::new();
        for (index, cell) in self.cells.iter_mut().enumerate() {
            match cell.expiry {
                Some(0) => {
                    cell.marker = None;
                    cell.expiry = None;
                    expired.push(torus.coord(index));
                }
                Some(turns) => cell.expiry = Some(turns - 1),
                None => {}
            }
        }
        expired
    }

    /// Iterate over all coordinates and cells.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        let torus = self.torus;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (torus.coord(index), cell))
    }

    /// Count markers of a color.
    #[must_use]
    pub fn count_markers(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.marker == Some(color))
            .count()
    }

    fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        let index = self.torus.index(self.torus.normalize(coord));
        &mut self.cells[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color(ch: char) -> Color {
        Color::from_char(ch).unwrap()
    }

    #[test]
    fn test_grid_too_small() {
        assert!(ToroidalGrid::new(0).is_none());
        assert!(ToroidalGrid::new(1).is_none());
        assert!(ToroidalGrid::new(2).is_some());
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = ["..#", ".A.", "B.."];
        let grid = ToroidalGrid::from_rows(&rows).unwrap();
        assert_eq!(grid.size(), 3);
        assert_eq!(grid.marker(Coord::new(1, 1)), Some(color('A')));
        assert!(grid.is_impassable(Coord::new(2, 0)));
        assert_eq!(grid.to_rows(), rows);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = ToroidalGrid::from_rows(&["...", "..", "..."]).unwrap_err();
        assert!(matches!(err, GridError::NotSquare { row: 1, .. }));
    }

    #[test]
    fn test_from_rows_rejects_unknown_char() {
        let err = ToroidalGrid::from_rows(&["..", ".?"]).unwrap_err();
        assert!(matches!(err, GridError::UnknownCell { x: 1, y: 1, ch: '?' }));
    }

    #[test]
    fn test_cell_lookup_wraps() {
        let grid = ToroidalGrid::from_rows(&["A..", "...", "..."]).unwrap();
        assert_eq!(grid.marker(Coord::new(3, 6)), Some(color('A')));
    }

    #[test]
    fn test_place_marker_rejects_impassable() {
        let mut grid = ToroidalGrid::from_rows(&["#.", ".."]).unwrap();
        assert!(!grid.place_marker(Coord::new(0, 0), color('A'), 5));
        assert_eq!(grid.marker(Coord::new(0, 0)), None);
        assert!(grid.place_marker(Coord::new(1, 0), color('A'), 5));
        assert_eq!(grid.cell(Coord::new(1, 0)).expiry, Some(5));
    }

    #[test]
    fn test_expiry_countdown_clears_marker() {
        let mut grid = ToroidalGrid::new(4).unwrap();
        grid.place_marker(Coord::new(1, 1), color('A'), 1);
        grid.place_permanent(Coord::new(2, 2), color('B'));

        assert!(grid.tick_expiry().is_empty());
        assert_eq!(grid.marker(Coord::new(1, 1)), Some(color('A')));

        assert_eq!(grid.tick_expiry(), vec![Coord::new(1, 1)]);
        assert_eq!(grid.marker(Coord::new(1, 1)), None);
        assert_eq!(grid.cell(Coord::new(1, 1)).expiry, None);

        // Markers without a countdown stay put.
        assert_eq!(grid.marker(Coord::new(2, 2)), Some(color('B')));
    }

    #[test]
    fn test_impassable_terrain_drops_marker() {
        let mut grid = ToroidalGrid::new(3).unwrap();
        grid.place_marker(Coord::new(0, 0), color('A'), 3);
        grid.set_terrain(Coord::new(0, 0), Terrain::Impassable);
        assert!(grid.cell(Coord::new(0, 0)).marker.is_none());
    }
}
