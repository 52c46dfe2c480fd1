//! Worker state.

use serde::Serialize;

use crate::agent::special::PatternSquare;
use crate::engine::{DistanceField, HillPolicy, Workspace};
use crate::grid::{Color, Coord, ToroidalGrid};

/// Identifier the environment uses for a worker.
pub type WorkerId = u32;

/// Captured markers carried by a worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Storage {
    capacity: u32,
    markers: Vec<Color>,
}

impl Storage {
    /// Empty storage with room for `capacity` markers.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            markers: Vec::new(),
        }
    }

    /// Storage filled from `(color, count)` pairs as reported by the environment.
    ///
    /// Anything beyond `capacity` is dropped, in reporting order.
    #[must_use]
    pub fn from_counts(capacity: u32, counts: &[(Color, u32)]) -> Self {
        let markers = counts
            .iter()
            .flat_map(|&(color, count)| std::iter::repeat_n(color, count as usize))
            .take(capacity as usize)
            .collect();
        Self { capacity, markers }
    }

    /// Maximum number of markers.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of stored markers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Whether no more markers fit.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity as usize
    }

    /// The stored markers, in no meaningful order.
    #[must_use]
    pub fn markers(&self) -> &[Color] {
        &self.markers
    }

    /// Store a marker. Returns `false` if storage is full.
    pub fn push(&mut self, color: Color) -> bool {
        if self.is_full() {
            return false;
        }
        self.markers.push(color);
        true
    }

    /// Remove the marker at `index`, moving the last one into its slot.
    pub fn take(&mut self, index: usize) -> Option<Color> {
        (index < self.markers.len()).then(|| self.markers.swap_remove(index))
    }
}

/// How a worker chooses where to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerMode {
    /// Moves to targets handed out by the assignment layer.
    Plain,
    /// Walks the border of its own square, marking it.
    SpecialPattern(PatternSquare),
}

/// Where a worker is in the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkerPhase {
    /// Not yet given anything to do.
    #[default]
    Idle,
    /// Holds a target it already stands on.
    Assigned {
        /// The claimed cell.
        target: Coord,
    },
    /// A move command was accepted by the budget.
    MovementIssued {
        /// The cell being approached.
        target: Coord,
        /// Where the worker will be next turn.
        next: Coord,
    },
}

impl WorkerPhase {
    /// Whether the worker already has work this turn.
    #[must_use]
    pub const fn is_busy(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// One of the agent's workers.
#[derive(Debug, Clone)]
pub struct Worker {
    /// Identifier used in commands.
    pub id: WorkerId,
    position: Coord,
    /// Captured markers.
    pub storage: Storage,
    field: DistanceField,
    /// Movement strategy.
    pub mode: WorkerMode,
    /// Progress in the current turn.
    pub phase: WorkerPhase,
}

impl Worker {
    /// Create a plain worker and compute its distance field.
    #[must_use]
    pub fn new(
        id: WorkerId,
        position: Coord,
        storage: Storage,
        grid: &ToroidalGrid,
        hills: HillPolicy,
        ws: &mut Workspace,
    ) -> Self {
        let position = grid.torus().normalize(position);
        Self {
            id,
            position,
            storage,
            field: DistanceField::compute(grid, position, hills, ws),
            mode: WorkerMode::Plain,
            phase: WorkerPhase::Idle,
        }
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Coord {
        self.position
    }

    /// Distances from the current cell.
    #[must_use]
    pub const fn field(&self) -> &DistanceField {
        &self.field
    }

    /// Whether the worker draws a pattern square.
    #[must_use]
    pub const fn is_special(&self) -> bool {
        matches!(self.mode, WorkerMode::SpecialPattern(_))
    }

    /// Move to `position` and recompute the distance field.
    pub fn relocate(
        &mut self,
        position: Coord,
        grid: &ToroidalGrid,
        hills: HillPolicy,
        ws: &mut Workspace,
    ) {
        self.position = grid.torus().normalize(position);
        self.field.recompute(grid, self.position, hills, ws);
    }

    /// Finish the turn: take the issued step, if any, and go back to idle.
    ///
    /// Returns `true` if the worker moved.
    pub fn advance(&mut self, grid: &ToroidalGrid, hills: HillPolicy, ws: &mut Workspace) -> bool {
        let phase = std::mem::take(&mut self.phase);
        match phase {
            WorkerPhase::MovementIssued { next, .. } if next != self.position => {
                self.relocate(next, grid, hills, ws);
                true
            }
            _ => false,
        }
    }
}

/// A worker of another team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EnemyWorker {
    /// The team's color.
    pub color: Color,
    /// Current cell.
    pub position: Coord,
}
