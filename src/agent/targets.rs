//! Target cells for plain workers.

use crate::agent::AgentState;
use crate::engine::Target;
use crate::grid::Coord;

/// Top-left offsets of the four 2×2 blocks that contain a cell.
const BLOCKS: [(i64, i64); 4] = [(-1, -1), (0, -1), (-1, 0), (0, 0)];

/// Every cell worth walking to this turn, x-major.
///
/// A target is an empty cell nobody claimed, with at most one worker on it and
/// that worker being the agent's own. Its tier is the largest number of
/// own-color markers in a 2×2 block around it whose cells are all empty or own
/// color; cells with no such block are skipped.
#[must_use]
pub fn generate_targets(state: &AgentState) -> Vec<Target> {
    let torus = state.grid.torus();
    torus
        .columns()
        .filter(|&cell| {
            let occupancy = state.occupancy(cell);
            state.grid.cell(cell).is_empty()
                && !state.is_claimed(cell)
                && occupancy <= 1
                && (occupancy == 0 || state.has_own_worker(cell))
        })
        .filter_map(|cell| block_tier(state, cell).map(|tier| Target { cell, tier }))
        .collect()
}

/// Best own-color count over the usable blocks containing `cell`.
fn block_tier(state: &AgentState, cell: Coord) -> Option<u8> {
    let torus = state.grid.torus();
    let own = state.world.color;
    BLOCKS
        .iter()
        .filter_map(|&(bx, by)| {
            let mut count = 0;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let block_cell = state.grid.cell(torus.offset(cell, bx + dx, by + dy));
                match block_cell.marker {
                    Some(color) if color == own => count += 1,
                    Some(_) => return None,
                    None if block_cell.is_impassable() => return None,
                    None => {}
                }
            }
            Some(count)
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::engine::Workspace;
    use crate::grid::{Color, ToroidalGrid};
    use crate::snapshot::{EnemyRecord, Snapshot, WorkerRecord};

    fn state(rows: &[&str], workers: &[Coord], enemies: &[Coord]) -> AgentState {
        let grid = ToroidalGrid::from_rows(rows).unwrap();
        let snapshot = Snapshot {
            world: WorldConfig {
                size: grid.size(),
                ..WorldConfig::default()
            },
            grid,
            workers: workers
                .iter()
                .zip(1..)
                .map(|(&position, id)| WorkerRecord {
                    id,
                    position,
                    storage: Vec::new(),
                })
                .collect(),
            enemies: enemies
                .iter()
                .map(|&position| EnemyRecord {
                    color: Color::from_char('B').unwrap(),
                    position,
                })
                .collect(),
        };
        let mut state = AgentState::from_snapshot(snapshot, &mut Workspace::new());
        state.begin_turn();
        state
    }

    fn tier_at(targets: &[Target], cell: Coord) -> Option<u8> {
        targets.iter().find(|t| t.cell == cell).map(|t| t.tier)
    }

    #[test]
    fn test_tier_counts_own_markers() {
        let s = state(&["......", ".AA...", ".A....", "......", "......", "......"], &[], &[]);
        let targets = generate_targets(&s);
        assert_eq!(tier_at(&targets, Coord::new(2, 2)), Some(3));
        assert_eq!(tier_at(&targets, Coord::new(0, 0)), Some(1));
        assert_eq!(tier_at(&targets, Coord::new(4, 4)), Some(0));
        assert_eq!(tier_at(&targets, Coord::new(1, 1)), None);
    }

    #[test]
    fn test_upper_left_blocks_are_considered() {
        // Only the block above and to the left of (2, 2) holds own markers.
        let s = state(&["......", ".A....", "......", "......", "......", "......"], &[], &[]);
        let targets = generate_targets(&s);
        assert_eq!(tier_at(&targets, Coord::new(2, 2)), Some(1));
    }

    #[test]
    fn test_foreign_markers_and_hills_spoil_blocks() {
        let s = state(&["B#..", "....", "....", "...."], &[], &[]);
        let targets = generate_targets(&s);
        // Every block around (0, 1) includes (0, 0) or (1, 0) except the two below.
        assert_eq!(tier_at(&targets, Coord::new(0, 1)), Some(0));
        assert!(targets.iter().all(|t| t.cell != Coord::new(0, 0)));
    }

    #[test]
    fn test_occupied_cells_skipped() {
        let s = state(
            &["....", "....", "....", "...."],
            &[Coord::new(1, 1), Coord::new(2, 2), Coord::new(2, 2)],
            &[Coord::new(3, 3)],
        );
        let targets = generate_targets(&s);
        assert!(tier_at(&targets, Coord::new(1, 1)).is_some());
        assert!(tier_at(&targets, Coord::new(2, 2)).is_none());
        assert!(tier_at(&targets, Coord::new(3, 3)).is_none());
    }
}
