//! Game constants and strategy knobs.

use serde::{Deserialize, Serialize};

use crate::engine::HillPolicy;
use crate::grid::Color;

/// Per-game constants announced by the environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Side length of the grid.
    pub size: u16,
    /// Whether workers may walk over hills.
    pub hills_traversable: bool,
    /// The agent's own marker color.
    pub color: Color,
    /// Turns a freshly placed marker survives.
    pub marker_lifetime: u32,
    /// Markers a worker can carry.
    pub storage_capacity: u32,
    /// Whether a harvest also removes the markers inside the enclosure.
    pub harvest_removes_internal: bool,
    /// Mutating operations allowed per turn, the final wait included.
    pub command_limit: u32,
    /// Scoring parameters the agent does not interpret, in announcement order.
    pub scoring_parameters: Vec<f64>,
}

impl WorldConfig {
    /// Hill policy for distance fields.
    #[must_use]
    pub const fn hill_policy(&self) -> HillPolicy {
        HillPolicy::from_flag(self.hills_traversable)
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            size: 64,
            hills_traversable: false,
            color: Color::default(),
            marker_lifetime: 30,
            storage_capacity: 20,
            harvest_removes_internal: true,
            command_limit: 50,
            scoring_parameters: Vec::new(),
        }
    }
}

/// Strategy settings for the turn driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// How many workers (first in roster order) draw squares instead of chasing targets.
    pub special_workers: usize,
    /// Largest distance a pattern square extends from its worker.
    pub special_max_extent: u16,
    /// Smallest area, in dual cells, worth a scoring command.
    pub min_area_size: usize,
    /// Free storage slots below which a worker starts dropping captured markers.
    pub dump_margin: u32,
    /// Seed for the driver's random choices.
    pub seed: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            special_workers: 1,
            special_max_extent: 10,
            min_area_size: 2,
            dump_margin: 10,
            seed: 0x2545_f491_4f6c_dd1d,
        }
    }
}
