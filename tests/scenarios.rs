//! Hand-checked harvest and area scenarios on small maps.
//!
//! Run with: cargo test scenarios

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use gridfence::engine::{classify_harvest, find_scoreable_areas, Workspace};
use gridfence::{Color, Coord, EngineError, ToroidalGrid};

fn color(ch: char) -> Color {
    Color::from_char(ch).unwrap()
}

fn coords(pairs: &[(u16, u16)]) -> Vec<Coord> {
    let mut cells: Vec<Coord> = pairs.iter().map(|&(x, y)| Coord::new(x, y)).collect();
    cells.sort_unstable();
    cells
}

fn sorted(mut cells: Vec<Coord>) -> Vec<Coord> {
    cells.sort_unstable();
    cells
}

fn rect(xs: std::ops::RangeInclusive<u16>, ys: std::ops::RangeInclusive<u16>) -> Vec<Coord> {
    let mut cells: Vec<Coord> = xs
        .flat_map(|x| ys.clone().map(move |y| Coord::new(x, y)))
        .collect();
    cells.sort_unstable();
    cells
}

fn assert_harvest(grid: &ToroidalGrid, seed: (u16, u16), perimeter: &[Coord], internal: &[Coord]) {
    let region = classify_harvest(grid, Coord::new(seed.0, seed.1), &mut Workspace::new()).unwrap();
    assert_eq!(sorted(region.perimeter), perimeter, "perimeter from {seed:?}");
    assert_eq!(sorted(region.internal), internal, "internal from {seed:?}");
}

/// Two rings of B, the inner one nested inside a band of A.
fn nested_rings() -> ToroidalGrid {
    let mut rows = vec![
        "................",
        ".BBBBBBBBBBBBB..",
        ".B.AAAAAAA...B..",
        ".B.ABBBB.AA..B..",
        ".B.AB..B.AA..B..",
        ".B.ABBBB.AA..B..",
        ".B.AAAAAAA...B..",
        ".B...........B..",
        ".BBBBBBBBBBBBB..",
    ];
    rows.resize(16, "................");
    ToroidalGrid::from_rows(&rows).unwrap()
}

fn outer_b_ring() -> Vec<Coord> {
    let mut ring = Vec::new();
    for x in 1..=13 {
        ring.push((x, 1));
        ring.push((x, 8));
    }
    for y in 2..=7 {
        ring.push((1, y));
        ring.push((13, y));
    }
    coords(&ring)
}

fn inner_b_ring() -> Vec<Coord> {
    coords(&[
        (4, 3),
        (5, 3),
        (6, 3),
        (7, 3),
        (4, 4),
        (7, 4),
        (4, 5),
        (5, 5),
        (6, 5),
        (7, 5),
    ])
}

fn a_band_perimeter() -> Vec<Coord> {
    let mut cells: Vec<(u16, u16)> = (3..=9).flat_map(|x| [(x, 2), (x, 6)]).collect();
    cells.extend([
        (3, 3),
        (9, 3),
        (10, 3),
        (3, 4),
        (10, 4),
        (3, 5),
        (9, 5),
        (10, 5),
    ]);
    coords(&cells)
}

#[test]
fn test_single_ring_on_odd_torus() {
    let rows = [
        ".........",
        "...AAA...",
        "...A.A...",
        "...AAA...",
        ".........",
        ".........",
        ".........",
        ".........",
        ".........",
    ];
    let grid = ToroidalGrid::from_rows(&rows).unwrap();
    let ring = coords(&[
        (3, 1),
        (4, 1),
        (5, 1),
        (3, 2),
        (5, 2),
        (3, 3),
        (4, 3),
        (5, 3),
    ]);
    for &seed in &[(3, 1), (5, 2), (4, 3)] {
        assert_harvest(&grid, seed, &ring, &[]);
    }

    let areas = find_scoreable_areas(&grid, color('A'), &mut Workspace::new()).unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(sorted(areas[0].cells.clone()), rect(3..=4, 1..=2));
    assert_eq!(areas[0].trigger, Coord::new(3, 1));
}

#[test]
fn test_ring_with_spurs() {
    let rows = [
        "........",
        "...AAA..",
        ".AAA.AAA",
        "...AAA..",
        "........",
        "........",
        "........",
        "........",
    ];
    let grid = ToroidalGrid::from_rows(&rows).unwrap();
    let ring = coords(&[
        (3, 1),
        (4, 1),
        (5, 1),
        (3, 2),
        (5, 2),
        (3, 3),
        (4, 3),
        (5, 3),
    ]);
    assert_harvest(&grid, (3, 1), &ring, &[]);

    let areas = find_scoreable_areas(&grid, color('A'), &mut Workspace::new()).unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(sorted(areas[0].cells.clone()), rect(3..=4, 1..=2));
}

#[test]
fn test_nested_ring_joins_outer_area() {
    let grid = nested_rings();
    let areas = find_scoreable_areas(&grid, color('B'), &mut Workspace::new()).unwrap();
    assert_eq!(areas.len(), 1);
    assert_eq!(sorted(areas[0].cells.clone()), rect(1..=12, 1..=7));
    assert_eq!(grid.marker(areas[0].trigger), Some(color('B')));
}

#[test]
fn test_outer_harvest_takes_everything_inside() {
    let grid = nested_rings();
    let mut internal = a_band_perimeter();
    internal.extend(coords(&[(4, 3), (5, 3), (6, 3), (7, 3), (4, 4), (7, 4), (9, 4)]));
    internal.extend(coords(&[(4, 5), (5, 5), (6, 5), (7, 5)]));
    internal.sort_unstable();
    internal.dedup();
    assert_eq!(internal.len(), 33);
    assert_harvest(&grid, (1, 1), &outer_b_ring(), &internal);
}

#[test]
fn test_band_harvest_keeps_its_spur_inside() {
    let grid = nested_rings();
    let mut internal = inner_b_ring();
    internal.push(Coord::new(9, 4));
    internal.sort_unstable();
    assert_harvest(&grid, (4, 2), &a_band_perimeter(), &internal);
}

#[test]
fn test_inner_ring_harvest() {
    let grid = nested_rings();
    assert_harvest(&grid, (6, 5), &inner_b_ring(), &[]);
}

#[test]
fn test_figure_eight_shares_middle_wall() {
    let mut rows = vec![
        "............",
        ".AAAAAAAAAA.",
        ".A..A..A..A.",
        ".AAAA..AAAA.",
    ];
    rows.resize(12, "............");
    let grid = ToroidalGrid::from_rows(&rows).unwrap();
    let perimeter = coords(&[
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 1),
        (7, 1),
        (8, 1),
        (9, 1),
        (10, 1),
        (1, 2),
        (4, 2),
        (7, 2),
        (10, 2),
        (1, 3),
        (2, 3),
        (3, 3),
        (4, 3),
        (7, 3),
        (8, 3),
        (9, 3),
        (10, 3),
    ]);
    assert_harvest(&grid, (1, 1), &perimeter, &[]);
}

#[test]
fn test_spur_into_enclosure_is_internal() {
    let rows = [
        ".......",
        ".AAAAA.",
        ".A.A.A.",
        ".A...A.",
        ".AAAAA.",
        ".......",
        ".......",
    ];
    let grid = ToroidalGrid::from_rows(&rows).unwrap();
    let perimeter = coords(&[
        (1, 1),
        (2, 1),
        (3, 1),
        (4, 1),
        (5, 1),
        (1, 2),
        (5, 2),
        (1, 3),
        (5, 3),
        (1, 4),
        (2, 4),
        (3, 4),
        (4, 4),
        (5, 4),
    ]);
    assert_harvest(&grid, (1, 1), &perimeter, &coords(&[(3, 2)]));
}

#[test]
fn test_harvest_on_empty_cell_fails() {
    let grid = nested_rings();
    let err = classify_harvest(&grid, Coord::new(2, 2), &mut Workspace::new()).unwrap_err();
    assert_eq!(
        err,
        EngineError::InvalidSeed {
            seed: Coord::new(2, 2)
        }
    );
}

#[test]
fn test_workspace_reuse_gives_same_answers() {
    let grid = nested_rings();
    let mut ws = Workspace::for_grid_size(grid.size());
    let first = classify_harvest(&grid, Coord::new(4, 2), &mut ws).unwrap();
    find_scoreable_areas(&grid, color('B'), &mut ws).unwrap();
    classify_harvest(&grid, Coord::new(1, 1), &mut ws).unwrap();
    let again = classify_harvest(&grid, Coord::new(4, 2), &mut ws).unwrap();
    assert_eq!(first, again);
}
