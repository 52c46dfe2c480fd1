#![no_main]

use gridfence::agent::{check_invariants, CommandBudget, RecordingEnvironment, TurnDriver};
use gridfence::config::AgentConfig;
use gridfence::snapshot::parse_snapshot;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(snapshot) = parse_snapshot(text) else {
        return;
    };
    // Keep turns cheap.
    if snapshot.world.size > 64 || snapshot.workers.len() > 32 {
        return;
    }

    let mut driver = TurnDriver::new(AgentConfig::default());
    let limit = snapshot.world.command_limit.min(100);
    let mut state = driver.load(snapshot);
    let mut env = RecordingEnvironment::new();
    let mut budget = CommandBudget::new(limit);
    let report = driver.play_turn(&mut state, &mut env, &mut budget);

    assert!(budget.used() < limit.max(1));
    assert_eq!(report.commands as usize, env.sent());
    let violations = check_invariants(&state);
    assert!(violations.is_empty(), "{violations:?}");
});
