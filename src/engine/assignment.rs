//! Greedy matching of idle workers to target cells.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use serde::Serialize;

use crate::engine::DistanceField;
use crate::grid::{Coord, Direction};

/// A cell worth moving to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Target {
    /// The cell.
    pub cell: Coord,
    /// Attractiveness; higher tiers are served first.
    pub tier: u8,
}

/// A worker available for assignment, with its cached distance field.
#[derive(Debug, Clone, Copy)]
pub struct IdleWorker<'a> {
    /// Caller-side worker index, reported back in [`Assignment::worker`].
    pub worker: usize,
    /// Distances from the worker's position.
    pub field: &'a DistanceField,
}

/// A committed worker-to-target match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    /// Caller-side worker index.
    pub worker: usize,
    /// The claimed cell.
    pub target: Coord,
    /// Turns to reach the target.
    pub distance: u32,
    /// First step toward the target; `None` when already there.
    pub step: Option<Direction>,
    /// Tier of the target.
    pub tier: u8,
}

/// Match idle workers to targets, best tiers first.
///
/// Within a tier every target proposes its nearest unassigned worker (ties go to
/// the worker listed first). Proposals are committed shortest first, then by
/// target order; a proposal whose worker or cell was taken meanwhile is dropped.
/// Every committed move spends one unit of `remaining_budget`; a worker already
/// on its target costs nothing but is only committed while budget remains.
#[must_use]
pub fn assign_workers(
    idle: &[IdleWorker<'_>],
    targets: &[Target],
    remaining_budget: u32,
) -> Vec<Assignment> {
    let mut tiers: Vec<u8> = targets.iter().map(|target| target.tier).collect();
    tiers.sort_unstable_by(|a, b| b.cmp(a));
    tiers.dedup();

    let mut remaining = remaining_budget;
    let mut assigned = vec![false; idle.len()];
    let mut claimed = HashSet::new();
    let mut assignments = Vec::new();
    let mut heap = BinaryHeap::new();

    for tier in tiers {
        heap.clear();
        for (order, target) in targets
            .iter()
            .filter(|target| target.tier == tier)
            .enumerate()
        {
            if claimed.contains(&target.cell) {
                continue;
            }
            let nearest = idle
                .iter()
                .enumerate()
                .filter(|&(slot, _)| !assigned[slot])
                .filter_map(|(slot, worker)| {
                    worker.field.distance(target.cell).map(|d| (d, slot))
                })
                .min();
            if let Some((distance, slot)) = nearest {
                heap.push(Reverse((distance, order, slot, *target)));
            }
        }

        while let Some(Reverse((distance, _, slot, target))) = heap.pop() {
            if assigned[slot] || claimed.contains(&target.cell) {
                continue;
            }
            if remaining == 0 {
                return assignments;
            }
            if distance > 0 {
                remaining -= 1;
            }
            assigned[slot] = true;
            claimed.insert(target.cell);
            let worker = &idle[slot];
            assignments.push(Assignment {
                worker: worker.worker,
                target: target.cell,
                distance,
                step: worker.field.direction(target.cell),
                tier,
            });
        }
    }

    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{HillPolicy, Workspace};
    use crate::grid::ToroidalGrid;

    fn fields(grid: &ToroidalGrid, origins: &[Coord]) -> Vec<DistanceField> {
        let mut ws = Workspace::new();
        origins
            .iter()
            .map(|&origin| DistanceField::compute(grid, origin, HillPolicy::Blocked, &mut ws))
            .collect()
    }

    fn idle(fields: &[DistanceField]) -> Vec<IdleWorker<'_>> {
        fields
            .iter()
            .enumerate()
            .map(|(worker, field)| IdleWorker { worker, field })
            .collect()
    }

    #[test]
    fn test_higher_tier_served_first() {
        let grid = ToroidalGrid::new(10).unwrap();
        let f = fields(&grid, &[Coord::new(0, 0)]);
        let targets = [
            Target { cell: Coord::new(1, 0), tier: 0 },
            Target { cell: Coord::new(4, 4), tier: 2 },
        ];
        let result = assign_workers(&idle(&f), &targets, 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].target, Coord::new(4, 4));
        assert_eq!(result[0].tier, 2);
        assert_eq!(result[0].distance, 8);
    }

    #[test]
    fn test_ties_go_to_earlier_worker() {
        let grid = ToroidalGrid::new(10).unwrap();
        let f = fields(&grid, &[Coord::new(2, 0), Coord::new(0, 2)]);
        let targets = [Target { cell: Coord::new(0, 0), tier: 1 }];
        let result = assign_workers(&idle(&f), &targets, 10);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].worker, 0);
        assert_eq!(result[0].step, Some(Direction::Left));
    }

    #[test]
    fn test_no_double_assignment() {
        let grid = ToroidalGrid::new(10).unwrap();
        let f = fields(&grid, &[Coord::new(0, 0), Coord::new(5, 5)]);
        let targets = [
            Target { cell: Coord::new(1, 0), tier: 1 },
            Target { cell: Coord::new(1, 0), tier: 1 },
            Target { cell: Coord::new(0, 1), tier: 1 },
            Target { cell: Coord::new(5, 6), tier: 1 },
        ];
        let result = assign_workers(&idle(&f), &targets, 10);
        let workers: HashSet<usize> = result.iter().map(|a| a.worker).collect();
        let cells: HashSet<Coord> = result.iter().map(|a| a.target).collect();
        assert_eq!(workers.len(), result.len());
        assert_eq!(cells.len(), result.len());
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_budget_limits_moves() {
        let grid = ToroidalGrid::new(10).unwrap();
        let f = fields(&grid, &[Coord::new(0, 0), Coord::new(5, 5), Coord::new(3, 3)]);
        let targets = [
            Target { cell: Coord::new(3, 3), tier: 1 },
            Target { cell: Coord::new(1, 0), tier: 1 },
            Target { cell: Coord::new(5, 7), tier: 1 },
        ];
        // The worker already on its target is free; only one move fits.
        let result = assign_workers(&idle(&f), &targets, 1);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].distance, 0);
        assert_eq!(result[0].step, None);
        assert_eq!(result[1].target, Coord::new(1, 0));

        assert!(assign_workers(&idle(&f), &targets, 0).is_empty());
    }

    #[test]
    fn test_unreachable_targets_skipped() {
        let grid = ToroidalGrid::from_rows(&[".#.#", "##..", "....", "#..."]).unwrap();
        let f = fields(&grid, &[Coord::new(0, 0)]);
        let targets = [Target { cell: Coord::new(2, 2), tier: 3 }];
        assert!(assign_workers(&idle(&f), &targets, 5).is_empty());
    }
}
