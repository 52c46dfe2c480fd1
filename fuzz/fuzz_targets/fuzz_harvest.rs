#![no_main]

use arbitrary::Arbitrary;
use gridfence::engine::{classify_harvest, Workspace};
use gridfence::{Coord, ToroidalGrid};
use libfuzzer_sys::fuzz_target;

/// A small grid drawn from a four-symbol alphabet plus a seed cell.
#[derive(Arbitrary, Debug)]
struct HarvestInput {
    size: u8,
    cells: Vec<u8>,
    seed_x: u8,
    seed_y: u8,
}

const SYMBOLS: [char; 4] = ['.', '#', 'A', 'B'];

fuzz_target!(|input: HarvestInput| {
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

    let seed = Coord::new(u16::from(input.seed_x) % size, u16::from(input.seed_y) % size);
    let Ok(region) = classify_harvest(&grid, seed, &mut Workspace::new()) else {
        assert!(grid.marker(seed).is_none(), "valid seed {seed} rejected");
        return;
    };

    let color = grid.marker(seed);
    assert!(region.perimeter.iter().all(|&c| grid.marker(c) == color));
    assert!(region.internal.iter().all(|&c| grid.marker(c).is_some()));
    let mut all: Vec<Coord> = region.perimeter.iter().chain(&region.internal).copied().collect();
    let count = all.len();
    all.sort_unstable();
    all.dedup();
    assert_eq!(all.len(), count, "cell listed twice");
});
