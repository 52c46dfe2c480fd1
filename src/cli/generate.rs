//! Generate command implementation.

use super::{print_json, CliError, OutputFormat};
use gridfence::grid::{generate_grid, GenerationParams};
use gridfence::Color;

/// Execute the generate command.
///
/// # Errors
///
/// Returns an error if the parameters are out of range.
pub(crate) fn execute(
    size: u16,
    seed: u64,
    hill_ratio: f64,
    marker_ratio: f64,
    palette: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    for (name, ratio) in [("hill ratio", hill_ratio), ("marker ratio", marker_ratio)] {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(CliError::new(format!("{name} {ratio} is not in [0, 1]")));
        }
    }
    let palette = palette
        .chars()
        .map(|ch| {
            Color::from_char(ch).ok_or_else(|| CliError::new(format!("Invalid color {ch:?}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let params = GenerationParams {
        size,
        hill_ratio,
        marker_ratio,
        palette,
        rings: Vec::new(),
    };
    let grid = generate_grid(seed, &params)?;

    match format {
        OutputFormat::Text => {
            for row in grid.to_rows() {
                println!("{row}");
            }
        }
        OutputFormat::Json => print_json(&grid.to_rows())?,
    }

    Ok(())
}
