//! Areas command implementation.

use super::output::render_overlay;
use super::{print_json, read_grid, CliError, OutputFormat};
use gridfence::engine::{find_scoreable_areas, Workspace};
use gridfence::Color;
use std::path::Path;

/// Execute the areas command.
///
/// # Errors
///
/// Returns an error if the map cannot be read or an area has a malformed fence.
pub(crate) fn execute(map: &Path, color: Color, format: OutputFormat) -> Result<(), CliError> {
    let grid = read_grid(map)?;
    let mut ws = Workspace::for_grid_size(grid.size());
    let areas = find_scoreable_areas(&grid, color, &mut ws)?;

    match format {
        OutputFormat::Text => {
            println!("{} area(s) enclosed by {color}", areas.len());
            for (i, area) in areas.iter().enumerate() {
                println!("  #{i}: {} dual cell(s), trigger {}", area.size(), area.trigger);
            }
            if !areas.is_empty() {
                println!();
                let triggers: Vec<_> = areas.iter().map(|area| (area.trigger, '*')).collect();
                print!("{}", render_overlay(&grid, &triggers));
            }
        }
        OutputFormat::Json => print_json(&areas)?,
    }

    Ok(())
}
