//! Distance command implementation.

use super::output::{format_distance_table, JsonDistance};
use super::{print_json, read_grid, CliError, OutputFormat};
use gridfence::engine::{compute_distance_field, HillPolicy, Workspace};
use gridfence::Coord;
use std::path::Path;

/// Execute the distance command.
///
/// # Errors
///
/// Returns an error if the map cannot be read.
pub(crate) fn execute(
    map: &Path,
    from: Coord,
    to: Option<Coord>,
    hills: HillPolicy,
    format: OutputFormat,
) -> Result<(), CliError> {
    let grid = read_grid(map)?;
    if !grid.torus().contains(from) {
        return Err(CliError::new(format!(
            "Origin {from} is outside the {0}x{0} grid",
            grid.size()
        )));
    }
    let mut ws = Workspace::for_grid_size(grid.size());
    let field = compute_distance_field(&grid, from, hills, &mut ws);

    match format {
        OutputFormat::Text => {
            println!("Distances from {from} ({} reachable)", field.reachable_count());
            print!("{}", format_distance_table(&field, grid.size()));
            if let Some(to) = to {
                println!();
                match (field.distance(to), field.direction(to)) {
                    (Some(d), Some(direction)) => {
                        println!("To {to}: {d} step(s), first step {direction:?}");
                    }
                    (Some(_), None) => println!("To {to}: already there"),
                    (None, _) => println!("To {to}: unreachable"),
                }
            }
        }
        OutputFormat::Json => {
            print_json(&JsonDistance::from_field(&field, grid.size(), to))?;
        }
    }

    Ok(())
}
