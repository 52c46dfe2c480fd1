//! Harvest command implementation.

use super::output::render_overlay;
use super::{print_json, read_grid, CliError, OutputFormat};
use gridfence::engine::{classify_harvest, Workspace};
use gridfence::Coord;
use std::path::Path;

/// Execute the harvest command.
///
/// # Errors
///
/// Returns an error if the map cannot be read or the seed holds no marker.
pub(crate) fn execute(map: &Path, seed: Coord, format: OutputFormat) -> Result<(), CliError> {
    let grid = read_grid(map)?;
    let mut ws = Workspace::for_grid_size(grid.size());
    let region = classify_harvest(&grid, seed, &mut ws)?;

    match format {
        OutputFormat::Text => {
            println!("Harvest from {seed}");
            println!("  Perimeter: {} cell(s)", region.perimeter.len());
            println!("  Internal:  {} cell(s)", region.internal.len());
            println!();
            let overlay: Vec<_> = region
                .perimeter
                .iter()
                .map(|&cell| (cell, 'P'))
                .chain(region.internal.iter().map(|&cell| (cell, 'i')))
                .collect();
            print!("{}", render_overlay(&grid, &overlay));
        }
        OutputFormat::Json => print_json(&region)?,
    }

    Ok(())
}
