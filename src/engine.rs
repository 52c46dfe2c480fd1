//! Territory and routing algorithms.
//!
//! Everything here is a pure function of the grid plus a caller-owned
//! [`Workspace`]:
//!
//! - [`compute_distance_field`]: BFS distances and first steps from one origin
//! - [`classify_harvest`]: perimeter and internal cells removed by a harvest
//! - [`find_scoreable_areas`]: areas enclosed by one color, each with a trigger
//! - [`assign_workers`]: greedy tiered matching of workers to targets
//!
//! Enclosure questions are answered on the dual grid of 2×2 blocks, where a
//! fence is a set of blocked edges between dual cells.

mod areas;
mod assignment;
mod distance;
mod dual;
mod region;
mod workspace;

pub use areas::{find_scoreable_areas, ScoreableArea};
pub use assignment::{assign_workers, Assignment, IdleWorker, Target};
pub use distance::{compute_distance_field, DistanceField, HillPolicy};
pub use region::{classify_harvest, Region};
pub use workspace::Workspace;
