//! The command boundary to the game server.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::agent::WorkerId;
use crate::grid::{Color, Coord, Direction};

/// A mutating command sent to the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Command {
    /// Place a marker of `color` under a worker.
    Put {
        /// The worker.
        worker: WorkerId,
        /// Marker color.
        color: Color,
    },
    /// Move a worker one step.
    Move {
        /// The worker.
        worker: WorkerId,
        /// The step.
        direction: Direction,
    },
    /// Score the area whose fence holds `at`.
    Score {
        /// The trigger cell.
        at: Coord,
    },
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Put { worker, color } => write!(f, "PUT {worker} {color}"),
            Self::Move { worker, direction } => {
                let (dx, dy) = direction.delta();
                write!(f, "MOVE {worker} {dx} {dy}")
            }
            Self::Score { at } => write!(f, "SCORE {} {}", at.x, at.y),
        }
    }
}

/// The environment refused a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("command rejected: {reason}")]
pub struct Rejection {
    /// Server-provided reason.
    pub reason: String,
}

/// Something that executes commands: the game server, or a stand-in.
pub trait Environment {
    /// Execute one command.
    ///
    /// # Errors
    ///
    /// Returns a [`Rejection`] if the environment refused the command.
    fn execute(&mut self, command: &Command) -> Result<(), Rejection>;
}

/// An in-memory environment that records every command.
#[derive(Debug, Clone, Default)]
pub struct RecordingEnvironment {
    /// Commands accepted, in order.
    pub accepted: Vec<Command>,
    /// Commands rejected, in order.
    pub rejected: Vec<Command>,
    /// Commands to refuse when they arrive.
    pub reject: Vec<Command>,
}

impl RecordingEnvironment {
    /// An environment that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment that refuses the given commands.
    #[must_use]
    pub fn rejecting(reject: Vec<Command>) -> Self {
        Self {
            reject,
            ..Self::default()
        }
    }

    /// Number of commands sent, accepted or not.
    #[must_use]
    pub fn sent(&self) -> usize {
        self.accepted.len() + self.rejected.len()
    }
}

impl Environment for RecordingEnvironment {
    fn execute(&mut self, command: &Command) -> Result<(), Rejection> {
        if self.reject.contains(command) {
            self.rejected.push(*command);
            return Err(Rejection {
                reason: format!("{command} refused"),
            });
        }
        self.accepted.push(*command);
        Ok(())
    }
}
