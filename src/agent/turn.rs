//! The per-turn strategy pipeline.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::agent::special::PatternSquare;
use crate::agent::targets::generate_targets;
use crate::agent::{
    AgentState, Command, CommandBudget, Environment, HistoryReport, WorkerMode, WorkerPhase,
};
use crate::config::AgentConfig;
use crate::engine::{assign_workers, find_scoreable_areas, IdleWorker, ScoreableArea, Workspace};
use crate::error::EngineError;
use crate::rng::Rng;
use crate::snapshot::{Snapshot, TurnDelta};

/// Counters for one played turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TurnReport {
    /// Scoring commands accepted.
    pub scored: usize,
    /// Markers placed on empty cells.
    pub placed: usize,
    /// Move commands accepted.
    pub moved: usize,
    /// Foreign markers replaced by the own color.
    pub captured: usize,
    /// Stored markers dropped.
    pub dumped: usize,
    /// Commands the environment refused.
    pub rejected: usize,
    /// Whether area scoring was skipped because of a malformed fence.
    pub scoring_skipped: bool,
    /// Operations charged to the budget.
    pub commands: u32,
}

/// Plays turns: scoring, marking, moving and capturing, all within the budget.
#[derive(Debug, Clone)]
pub struct TurnDriver {
    config: AgentConfig,
    workspace: Workspace,
    rng: Rng,
}

impl TurnDriver {
    /// Create a driver.
    #[must_use]
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            workspace: Workspace::new(),
            rng: Rng::new(config.seed),
        }
    }

    /// The strategy settings.
    #[must_use]
    pub const fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// The scratch buffers, for running engine queries between turns.
    pub fn workspace_mut(&mut self) -> &mut Workspace {
        &mut self.workspace
    }

    /// Build the state for a new game and pick the pattern workers.
    #[must_use]
    pub fn load(&mut self, snapshot: Snapshot) -> AgentState {
        let mut state = AgentState::from_snapshot(snapshot, &mut self.workspace);
        self.begin_game(&mut state);
        state
    }

    /// Turn the first workers of the roster into pattern workers.
    pub fn begin_game(&mut self, state: &mut AgentState) {
        let max_extent = self.config.special_max_extent;
        for worker in state.workers.iter_mut().take(self.config.special_workers) {
            let square = PatternSquare::around(&state.grid, worker.position(), max_extent);
            info!(
                worker = worker.id,
                corner = %square.corner,
                extent = square.extent,
                "worker draws a pattern square"
            );
            worker.mode = WorkerMode::SpecialPattern(square);
        }
    }

    /// Play one turn against `env`, spending at most what `budget` allows.
    pub fn play_turn<E: Environment>(
        &mut self,
        state: &mut AgentState,
        env: &mut E,
        budget: &mut CommandBudget,
    ) -> TurnReport {
        let mut report = TurnReport::default();
        state.begin_turn();

        self.score_areas(state, env, budget, &mut report);
        place_markers(state, env, budget, &mut report);
        move_special_workers(state, env, budget, &mut report);
        move_plain_workers(state, env, budget, &mut report);
        self.drop_or_capture(state, env, budget, &mut report);
        state.advance_workers(&mut self.workspace);

        report.commands = budget.used();
        debug!(?report, "turn played");
        report
    }

    /// Apply the history of the turn that just ended.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError::InvalidSeed`]; the state should then be reloaded.
    pub fn end_turn(
        &mut self,
        state: &mut AgentState,
        delta: &TurnDelta,
    ) -> Result<HistoryReport, EngineError> {
        state.apply_history(delta, &mut self.workspace)
    }

    fn score_areas<E: Environment>(
        &mut self,
        state: &AgentState,
        env: &mut E,
        budget: &mut CommandBudget,
        report: &mut TurnReport,
    ) {
        let found = find_scoreable_areas(&state.grid, state.world.color, &mut self.workspace);
        let mut areas = match found {
            Ok(areas) => areas,
            Err(err) => {
                warn!(%err, "skipping area scoring this turn");
                report.scoring_skipped = true;
                return;
            }
        };
        areas.sort_by(|a, b| b.size().cmp(&a.size()));

        for area in areas.iter().filter(|area| area.size() >= self.config.min_area_size) {
            if !budget.can_issue() {
                break;
            }
            if issue(env, budget, report, Command::Score { at: area.trigger }) {
                debug!(trigger = %area.trigger, size = area.size(), "scoring area");
                report.scored += 1;
            }
        }
        debug!(
            areas = areas.len(),
            enclosed = areas.iter().map(ScoreableArea::size).sum::<usize>(),
            "area scoring done"
        );
    }

    /// Capture a foreign marker under a lone worker, or drop a stored one when
    /// storage runs close to full.
    fn drop_or_capture<E: Environment>(
        &mut self,
        state: &mut AgentState,
        env: &mut E,
        budget: &mut CommandBudget,
        report: &mut TurnReport,
    ) {
        let own = state.world.color;
        let lifetime = state.world.marker_lifetime;
        let margin = self.config.dump_margin as usize;

        for index in 0..state.workers.len() {
            let position = state.workers[index].position();
            if state.occupancy(position) != 1 {
                continue;
            }
            let cell = *state.grid.cell(position);
            let worker = &mut state.workers[index];
            let storage = &mut worker.storage;

            if let Some(foreign) = cell.marker.filter(|&color| color != own) {
                if storage.is_full() {
                    continue;
                }
                let command = Command::Put {
                    worker: worker.id,
                    color: own,
                };
                if issue(env, budget, report, command) {
                    storage.push(foreign);
                    state.grid.place_marker(position, own, lifetime);
                    debug!(worker = worker.id, %position, %foreign, "captured marker");
                    report.captured += 1;
                }
            } else if cell.is_empty()
                && !storage.is_empty()
                && storage.len() + margin > storage.capacity() as usize
            {
                let slot = self.rng.next_index(storage.len());
                let Some(&color) = storage.markers().get(slot) else {
                    continue;
                };
                let command = Command::Put {
                    worker: worker.id,
                    color,
                };
                if issue(env, budget, report, command) {
                    storage.take(slot);
                    state.grid.place_marker(position, color, lifetime);
                    debug!(worker = worker.id, %position, %color, "dumped marker");
                    report.dumped += 1;
                }
            }
        }
    }
}

/// Charge the budget and send a command. Returns whether it was accepted.
fn issue<E: Environment>(
    env: &mut E,
    budget: &mut CommandBudget,
    report: &mut TurnReport,
    command: Command,
) -> bool {
    if !budget.can_issue() {
        return false;
    }
    budget.charge();
    match env.execute(&command) {
        Ok(()) => true,
        Err(rejection) => {
            debug!(%command, %rejection, "command rejected");
            report.rejected += 1;
            false
        }
    }
}

fn place_markers<E: Environment>(
    state: &mut AgentState,
    env: &mut E,
    budget: &mut CommandBudget,
    report: &mut TurnReport,
) {
    let own = state.world.color;
    let lifetime = state.world.marker_lifetime;
    for index in 0..state.workers.len() {
        let position = state.workers[index].position();
        if !state.grid.cell(position).is_empty() || state.occupancy(position) > 1 {
            continue;
        }
        let command = Command::Put {
            worker: state.workers[index].id,
            color: own,
        };
        if issue(env, budget, report, command) {
            state.grid.place_marker(position, own, lifetime);
            report.placed += 1;
        }
    }
}

fn move_special_workers<E: Environment>(
    state: &mut AgentState,
    env: &mut E,
    budget: &mut CommandBudget,
    report: &mut TurnReport,
) {
    let own = state.world.color;
    for index in 0..state.workers.len() {
        let worker = &state.workers[index];
        let WorkerMode::SpecialPattern(square) = worker.mode else {
            continue;
        };
        let position = worker.position();
        let id = worker.id;
        let step = square
            .next_target(worker.field(), &state.grid, own, |cell| {
                state.occupancy(cell) == 0
            })
            .and_then(|target| {
                let field = worker.field();
                field
                    .direction(target)
                    .map(|direction| (direction, target, field.next_position(target)))
            });

        let mut phase = WorkerPhase::Assigned { target: position };
        if let Some((direction, target, next)) = step {
            let command = Command::Move {
                worker: id,
                direction,
            };
            if issue(env, budget, report, command) {
                report.moved += 1;
                phase = WorkerPhase::MovementIssued { target, next };
            }
        }
        state.workers[index].phase = phase;
    }
}

fn move_plain_workers<E: Environment>(
    state: &mut AgentState,
    env: &mut E,
    budget: &mut CommandBudget,
    report: &mut TurnReport,
) {
    let targets = generate_targets(state);
    let assignments = {
        let idle: Vec<IdleWorker<'_>> = state
            .workers
            .iter()
            .enumerate()
            .filter(|(_, worker)| !worker.phase.is_busy())
            .map(|(worker, w)| IdleWorker {
                worker,
                field: w.field(),
            })
            .collect();
        assign_workers(&idle, &targets, budget.remaining())
    };

    for assignment in assignments {
        state.claim(assignment.target);
        let worker = &mut state.workers[assignment.worker];
        worker.phase = match assignment.step {
            None => WorkerPhase::Assigned {
                target: assignment.target,
            },
            Some(direction) => {
                let command = Command::Move {
                    worker: worker.id,
                    direction,
                };
                if issue(env, budget, report, command) {
                    report.moved += 1;
                    WorkerPhase::MovementIssued {
                        target: assignment.target,
                        next: worker.field().next_position(assignment.target),
                    }
                } else {
                    WorkerPhase::Idle
                }
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::RecordingEnvironment;
    use crate::config::WorldConfig;
    use crate::grid::{Color, Coord, ToroidalGrid};
    use crate::snapshot::WorkerRecord;

    fn snapshot(rows: &[&str], workers: Vec<WorkerRecord>, limit: u32) -> Snapshot {
        let grid = ToroidalGrid::from_rows(rows).unwrap();
        Snapshot {
            world: WorldConfig {
                size: grid.size(),
                command_limit: limit,
                ..WorldConfig::default()
            },
            grid,
            workers,
            enemies: Vec::new(),
        }
    }

    fn plain(config: AgentConfig) -> AgentConfig {
        AgentConfig {
            special_workers: 0,
            ..config
        }
    }

    fn record(id: u32, x: u16, y: u16) -> WorkerRecord {
        WorkerRecord {
            id,
            position: Coord::new(x, y),
            storage: Vec::new(),
        }
    }

    #[test]
    fn test_worker_marks_its_cell_and_moves() {
        let mut driver = TurnDriver::new(plain(AgentConfig::default()));
        let mut state = driver.load(snapshot(&["......"; 6], vec![record(1, 2, 2)], 10));
        let mut env = RecordingEnvironment::new();
        let mut budget = CommandBudget::new(10);

        let report = driver.play_turn(&mut state, &mut env, &mut budget);
        assert_eq!(report.placed, 1);
        assert_eq!(report.moved, 1);
        assert_eq!(
            env.accepted[0],
            Command::Put {
                worker: 1,
                color: Color::default()
            }
        );
        assert!(matches!(env.accepted[1], Command::Move { worker: 1, .. }));
        assert_ne!(state.workers[0].position(), Coord::new(2, 2));
        assert_eq!(report.commands, 2);
    }

    #[test]
    fn test_budget_holds_back_last_operation() {
        let mut driver = TurnDriver::new(plain(AgentConfig::default()));
        let workers = (0..5).map(|i| record(i, i as u16, 0)).collect();
        let mut state = driver.load(snapshot(&["........"; 8], workers, 4));
        let mut env = RecordingEnvironment::new();
        let mut budget = CommandBudget::new(4);

        let report = driver.play_turn(&mut state, &mut env, &mut budget);
        assert_eq!(env.sent(), 3);
        assert_eq!(report.placed, 3);
        assert_eq!(report.commands, 3);
        assert!(!budget.can_issue());
    }

    #[test]
    fn test_rejected_put_leaves_grid_alone() {
        let mut driver = TurnDriver::new(plain(AgentConfig::default()));
        let mut state = driver.load(snapshot(&["....."; 5], vec![record(9, 1, 1)], 10));
        let put = Command::Put {
            worker: 9,
            color: Color::default(),
        };
        let mut env = RecordingEnvironment::rejecting(vec![put]);
        let mut budget = CommandBudget::new(10);

        let report = driver.play_turn(&mut state, &mut env, &mut budget);
        assert_eq!(report.rejected, 1);
        assert_eq!(report.placed, 0);
        assert_eq!(state.grid.marker(Coord::new(1, 1)), None);
        // The refused command still cost an operation.
        assert_eq!(budget.used(), env.sent() as u32);
    }

    #[test]
    fn test_scores_enclosed_area() {
        let rows = ["......", ".AAA..", ".A.A..", ".AAA..", "......", "......"];
        let mut driver = TurnDriver::new(plain(AgentConfig::default()));
        let mut state = driver.load(snapshot(&rows, Vec::new(), 10));
        let mut env = RecordingEnvironment::new();
        let report = driver.play_turn(&mut state, &mut env, &mut CommandBudget::new(10));
        assert_eq!(report.scored, 1);
        assert_eq!(
            env.accepted,
            vec![Command::Score {
                at: Coord::new(1, 1)
            }]
        );
    }

    #[test]
    fn test_small_areas_not_scored() {
        let rows = ["......", ".AAA..", ".A.A..", ".AAA..", "......", "......"];
        let config = AgentConfig {
            min_area_size: 5,
            ..plain(AgentConfig::default())
        };
        let mut driver = TurnDriver::new(config);
        let mut state = driver.load(snapshot(&rows, Vec::new(), 10));
        let mut env = RecordingEnvironment::new();
        let report = driver.play_turn(&mut state, &mut env, &mut CommandBudget::new(10));
        assert_eq!(report.scored, 0);
        assert!(env.accepted.is_empty());
    }

    #[test]
    fn test_capture_foreign_marker() {
        let mut driver = TurnDriver::new(plain(AgentConfig::default()));
        let mut state = driver.load(snapshot(&["B...."; 5], vec![record(3, 0, 0)], 10));
        let mut env = RecordingEnvironment::new();
        let mut budget = CommandBudget::new(10);
        driver.play_turn(&mut state, &mut env, &mut budget);

        let capture = Command::Put {
            worker: 3,
            color: Color::default(),
        };
        assert!(env.accepted.contains(&capture));
        assert_eq!(state.workers[0].storage.markers(), &[Color::from_char('B').unwrap()]);
        assert_eq!(state.grid.marker(Coord::new(0, 0)), Some(Color::default()));
    }

    #[test]
    fn test_special_worker_heads_for_square_border() {
        let config = AgentConfig {
            special_workers: 1,
            special_max_extent: 2,
            ..AgentConfig::default()
        };
        let mut driver = TurnDriver::new(config);
        let mut state = driver.load(snapshot(&["........"; 8], vec![record(1, 3, 3)], 10));
        assert!(state.workers[0].is_special());

        let mut env = RecordingEnvironment::new();
        let report = driver.play_turn(&mut state, &mut env, &mut CommandBudget::new(10));
        assert_eq!(report.placed, 1);
        assert_eq!(report.moved, 1);
        // (3, 4) and (4, 3) are both one step away; the left column comes first.
        assert_eq!(
            env.accepted[1],
            Command::Move {
                worker: 1,
                direction: crate::grid::Direction::Down
            }
        );
        assert_eq!(state.workers[0].position(), Coord::new(3, 4));
    }
}
