//! The agent's mirror of the game.

use serde::Serialize;
use tracing::{debug, info};

use crate::agent::{EnemyWorker, Storage, Worker, WorkerPhase};
use crate::config::WorldConfig;
use crate::engine::{classify_harvest, Workspace};
use crate::error::EngineError;
use crate::grid::{Coord, ToroidalGrid};
use crate::snapshot::{EnemyRecord, Snapshot, TurnDelta};

/// What applying an end-of-turn history changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HistoryReport {
    /// Markers removed by the environment.
    pub cleared: usize,
    /// Markers placed by any team.
    pub placed: usize,
    /// Harvests replayed.
    pub harvests: usize,
    /// Markers removed by harvests.
    pub harvested: usize,
    /// Markers whose countdown ran out.
    pub expired: usize,
}

/// Complete local state for one game.
#[derive(Debug, Clone)]
pub struct AgentState {
    /// World constants.
    pub world: WorldConfig,
    /// Local mirror of the map.
    pub grid: ToroidalGrid,
    /// The agent's workers, in roster order.
    pub workers: Vec<Worker>,
    /// Other teams' workers.
    pub enemies: Vec<EnemyWorker>,
    /// Workers of any team per cell, row-major.
    occupancy: Vec<u16>,
    /// Cells already promised to a worker this turn, row-major.
    claimed: Vec<bool>,
}

impl AgentState {
    /// Build the state from a full snapshot, computing every worker's distance field.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot, ws: &mut Workspace) -> Self {
        let Snapshot {
            world,
            grid,
            workers,
            enemies,
        } = snapshot;
        let hills = world.hill_policy();
        let workers = workers
            .into_iter()
            .map(|record| {
                let storage = Storage::from_counts(world.storage_capacity, &record.storage);
                Worker::new(record.id, record.position, storage, &grid, hills, ws)
            })
            .collect();

        let mut state = Self {
            occupancy: vec![0; grid.torus().cell_count()],
            claimed: vec![false; grid.torus().cell_count()],
            world,
            grid,
            workers,
            enemies: Vec::new(),
        };
        state.set_enemies(&enemies);
        info!(
            size = state.grid.size(),
            color = %state.world.color,
            workers = state.workers.len(),
            "loaded game state"
        );
        state
    }

    /// Replace the enemy roster.
    pub fn set_enemies(&mut self, enemies: &[EnemyRecord]) {
        self.enemies = enemies
            .iter()
            .map(|record| EnemyWorker {
                color: record.color,
                position: record.position,
            })
            .collect();
    }

    /// Start a turn: idle every worker, recount occupancy and drop all claims.
    pub fn begin_turn(&mut self) {
        let torus = self.grid.torus();
        self.occupancy.clear();
        self.occupancy.resize(torus.cell_count(), 0);
        self.claimed.clear();
        self.claimed.resize(torus.cell_count(), false);

        for worker in &mut self.workers {
            worker.phase = WorkerPhase::Idle;
        }
        let positions = self
            .workers
            .iter()
            .map(Worker::position)
            .chain(self.enemies.iter().map(|enemy| enemy.position));
        for position in positions {
            let index = torus.index(torus.normalize(position));
            self.occupancy[index] = self.occupancy[index].saturating_add(1);
        }
    }

    /// Workers of any team standing on a cell.
    #[must_use]
    pub fn occupancy(&self, coord: Coord) -> u16 {
        let torus = self.grid.torus();
        self.occupancy[torus.index(torus.normalize(coord))]
    }

    /// Whether one of the agent's own workers stands on a cell.
    #[must_use]
    pub fn has_own_worker(&self, coord: Coord) -> bool {
        let coord = self.grid.torus().normalize(coord);
        self.workers.iter().any(|worker| worker.position() == coord)
    }

    /// Whether a cell was already promised to a worker this turn.
    #[must_use]
    pub fn is_claimed(&self, coord: Coord) -> bool {
        let torus = self.grid.torus();
        self.claimed[torus.index(torus.normalize(coord))]
    }

    /// Promise a cell to a worker for this turn.
    pub fn claim(&mut self, coord: Coord) {
        let torus = self.grid.torus();
        self.claimed[torus.index(torus.normalize(coord))] = true;
    }

    /// Apply the changes reported for the turn that just ended, then count down expiries.
    ///
    /// Every scored seed is classified against the grid as it stands before any
    /// harvest is removed.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSeed`] if a scored seed holds no marker in
    /// the local grid. The grid is then out of step with the environment and
    /// should be reloaded.
    pub fn apply_history(
        &mut self,
        delta: &TurnDelta,
        ws: &mut Workspace,
    ) -> Result<HistoryReport, EngineError> {
        let mut report = HistoryReport::default();

        for &cell in &delta.cleared {
            self.grid.clear_marker(cell);
            report.cleared += 1;
        }
        for &(cell, color) in &delta.placed {
            if self.grid.place_marker(cell, color, self.world.marker_lifetime) {
                report.placed += 1;
            }
        }

        let regions = delta
            .scored
            .iter()
            .map(|&seed| classify_harvest(&self.grid, seed, ws))
            .collect::<Result<Vec<_>, _>>()?;
        for region in &regions {
            for &cell in &region.perimeter {
                self.grid.clear_marker(cell);
            }
            report.harvested += region.perimeter.len();
            if self.world.harvest_removes_internal {
                for &cell in &region.internal {
                    self.grid.clear_marker(cell);
                }
                report.harvested += region.internal.len();
            }
        }
        report.harvests = regions.len();

        report.expired = self.grid.tick_expiry().len();
        debug!(?report, "applied turn history");
        Ok(report)
    }

    /// Move every worker whose step was issued and recompute its distance field.
    ///
    /// Returns the number of workers that moved.
    pub fn advance_workers(&mut self, ws: &mut Workspace) -> usize {
        let hills = self.world.hill_policy();
        let mut moved = 0;
        for worker in &mut self.workers {
            if worker.advance(&self.grid, hills, ws) {
                moved += 1;
            }
        }
        moved
    }
}
