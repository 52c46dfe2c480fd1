//! Plan command implementation: play one turn against an in-memory environment.

use super::{print_json, read_agent_config, CliError, OutputFormat};
use gridfence::agent::{CommandBudget, RecordingEnvironment, TurnDriver, TurnReport};
use gridfence::snapshot::parse_snapshot;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// JSON-serializable turn plan.
#[derive(Debug, Serialize)]
struct JsonPlan {
    /// Commands in the order they would be sent.
    commands: Vec<String>,
    /// Turn counters.
    report: TurnReport,
}

/// Execute the plan command.
///
/// # Errors
///
/// Returns an error if the snapshot or config cannot be read or parsed.
pub(crate) fn execute(
    snapshot: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> Result<(), CliError> {
    let text = fs::read_to_string(snapshot)
        .map_err(|e| CliError::new(format!("Failed to read {}: {e}", snapshot.display())))?;
    let snapshot = parse_snapshot(&text)?;
    let config = read_agent_config(config)?;

    let mut budget = CommandBudget::new(snapshot.world.command_limit);
    let mut driver = TurnDriver::new(config);
    let mut state = driver.load(snapshot);
    let mut env = RecordingEnvironment::new();
    let report = driver.play_turn(&mut state, &mut env, &mut budget);
    let commands: Vec<String> = env.accepted.iter().map(ToString::to_string).collect();

    match format {
        OutputFormat::Text => {
            for command in &commands {
                println!("{command}");
            }
            println!();
            println!(
                "{} command(s): {} scored, {} placed, {} moved, {} captured, {} dumped",
                report.commands,
                report.scored,
                report.placed,
                report.moved,
                report.captured,
                report.dumped
            );
            if report.scoring_skipped {
                println!("Area scoring skipped: malformed fence");
            }
        }
        OutputFormat::Json => print_json(&JsonPlan { commands, report })?,
    }

    Ok(())
}
