// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gridfence: territory and routing for a toroidal-grid enclosure game.
//!
//! This crate provides the algorithms a bot needs to fence off territory:
//! - BFS distance fields with first-step directions on a wrapping grid
//! - Harvest classification and scoreable-area discovery on the dual grid
//! - Greedy tiered assignment of workers to target cells
//! - A turn driver that spends a per-turn command budget
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Turn driver / snapshot parsing    │
//! ├─────────────────────────────────────┤
//! │   Engine (distance, dual, areas)    │
//! ├─────────────────────────────────────┤
//! │   Toroidal grid                     │
//! └─────────────────────────────────────┘
//! ```

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
mod rng;
pub mod snapshot;

pub use error::{EngineError, GridError, SnapshotError};

// Re-export the engine entry points at crate root for convenience
pub use engine::{
    assign_workers, classify_harvest, compute_distance_field, find_scoreable_areas, Assignment,
    DistanceField, HillPolicy, IdleWorker, Region, ScoreableArea, Target, Workspace,
};
pub use grid::{Color, Coord, Direction, ToroidalGrid, Torus};
