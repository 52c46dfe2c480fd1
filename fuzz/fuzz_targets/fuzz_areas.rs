#![no_main]

use arbitrary::Arbitrary;
use gridfence::engine::{classify_harvest, find_scoreable_areas, Workspace};
use gridfence::{Color, ToroidalGrid};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct AreasInput {
    size: u8,
    cells: Vec<u8>,
}

const SYMBOLS: [char; 4] = ['.', '#', 'A', 'B'];

fuzz_target!(|input: AreasInput| {
    let size = u16::from(input.size % 14) + 3;
    let rows: Vec<String> = (0..size)
        .map(|y| {
            (0..size)
                .map(|x| {
                    let i = usize::from(y * size + x);
                    SYMBOLS[usize::from(input.cells.get(i).copied().unwrap_or(0) % 4)]
                })
                .collect()
        })
        .collect();
    let Ok(grid) = ToroidalGrid::from_rows(&rows) else {
        return;
    };
    let Some(color) = Color::from_char('A') else {
        return;
    };

    let mut ws = Workspace::new();
    let areas = match find_scoreable_areas(&grid, color, &mut ws) {
        Ok(areas) => areas,
        Err(err) => panic!("{err} on\n{}", rows.join("\n")),
    };
    let dual = grid.dual_torus();
    for area in &areas {
        assert_eq!(grid.marker(area.trigger), Some(color));
        assert!(area.cells.iter().all(|&c| dual.contains(c)));
        // Every trigger must be a valid harvest seed.
        assert!(classify_harvest(&grid, area.trigger, &mut ws).is_ok());
    }
});
