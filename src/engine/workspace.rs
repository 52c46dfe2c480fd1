//! Reusable scratch buffers for the flood fills.

use std::collections::VecDeque;

/// Scratch space shared by the breadth-first searches and dual-grid flood fills.
///
/// One workspace is owned by the turn-processing path and lent to each algorithm
/// call. Buffers grow to the largest grid seen and are never shrunk, so repeated
/// calls on the same grid do not allocate.
#[derive(Debug, Default, Clone)]
pub struct Workspace {
    /// FIFO of row-major cell indices.
    pub(crate) queue: VecDeque<usize>,
    /// Primal cells belonging to the fence under test.
    pub(crate) fence: Vec<bool>,
    /// Primal cells already recorded in an output set.
    pub(crate) recorded: Vec<bool>,
    /// Dual cells reached by the flood from dual `(0, 0)`.
    pub(crate) flooded: Vec<bool>,
    /// Dual cells already assigned to an area.
    pub(crate) component: Vec<bool>,
}

impl Workspace {
    /// Create an empty workspace; buffers are sized on first use.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a workspace pre-sized for a grid of the given side length.
    #[must_use]
    pub fn for_grid_size(size: u16) -> Self {
        let cells = usize::from(size) * usize::from(size);
        Self {
            queue: VecDeque::with_capacity(cells),
            fence: Vec::with_capacity(cells),
            recorded: Vec::with_capacity(cells),
            flooded: Vec::with_capacity(cells),
            component: Vec::with_capacity(cells),
        }
    }
}

/// Reset a mark buffer to `len` cleared entries, keeping its allocation.
pub(crate) fn reset_marks(marks: &mut Vec<bool>, len: usize) {
    marks.clear();
    marks.resize(len, false);
}
