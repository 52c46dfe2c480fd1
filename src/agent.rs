//! The turn-based agent built on the engine.
//!
//! Holds the local mirror of the game and drives each turn:
//! - Score areas enclosed by the agent's color
//! - Place markers under workers
//! - Walk pattern squares and tiered targets
//! - Capture foreign markers and drop stored ones
//!
//! Every mutating command goes through an [`Environment`] and is charged to a
//! [`CommandBudget`].

mod budget;
mod clock;
mod environment;
mod invariants;
mod special;
mod state;
mod targets;
mod turn;
mod worker;

pub use budget::CommandBudget;
pub use clock::{ClockEvent, TurnClock};
pub use environment::{Command, Environment, RecordingEnvironment, Rejection};
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use special::PatternSquare;
pub use state::{AgentState, HistoryReport};
pub use targets::generate_targets;
pub use turn::{TurnDriver, TurnReport};
pub use worker::{EnemyWorker, Storage, Worker, WorkerId, WorkerMode, WorkerPhase};
