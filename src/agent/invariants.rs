//! State invariants - sanity checks that detect bugs in the local mirror.
//!
//! None of these should fire on a state the agent built and updated itself.
//! Reported snapshots can break the storage bound, since the environment's
//! counts are taken as-is.

use std::collections::HashSet;

use crate::agent::AgentState;
use crate::engine::HillPolicy;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all state invariants.
///
/// Returns the violations found, or an empty list if all invariants hold.
#[must_use]
pub fn check_invariants(state: &AgentState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let torus = state.grid.torus();

    for (coord, cell) in state.grid.iter() {
        if cell.is_impassable() && cell.marker.is_some() {
            violations.push(InvariantViolation {
                message: format!("Impassable cell {coord} holds a marker"),
            });
        }
        if cell.marker.is_none() && cell.expiry.is_some() {
            violations.push(InvariantViolation {
                message: format!("Empty cell {coord} has an expiry countdown"),
            });
        }
    }

    let mut ids = HashSet::new();
    for worker in &state.workers {
        let position = worker.position();
        if !ids.insert(worker.id) {
            violations.push(InvariantViolation {
                message: format!("Worker id {} appears twice", worker.id),
            });
        }
        if !torus.contains(position) {
            violations.push(InvariantViolation {
                message: format!("Worker {} at {position} is outside the grid", worker.id),
            });
            continue;
        }
        if state.world.hill_policy() == HillPolicy::Blocked && state.grid.is_impassable(position) {
            violations.push(InvariantViolation {
                message: format!("Worker {} stands on impassable cell {position}", worker.id),
            });
        }
        if worker.storage.len() > worker.storage.capacity() as usize {
            violations.push(InvariantViolation {
                message: format!(
                    "Worker {} stores {} markers > capacity {}",
                    worker.id,
                    worker.storage.len(),
                    worker.storage.capacity()
                ),
            });
        }
        if worker.field().origin() != position {
            violations.push(InvariantViolation {
                message: format!(
                    "Worker {} at {position} has a distance field from {}",
                    worker.id,
                    worker.field().origin()
                ),
            });
        }
        if let Some(cell) = worker.field().first_inconsistency() {
            violations.push(InvariantViolation {
                message: format!("Worker {} distance field is inconsistent at {cell}", worker.id),
            });
        }
    }

    violations
}

/// Assert all state invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with the list of violations if any invariant is broken.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &AgentState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("State invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &AgentState) {}
