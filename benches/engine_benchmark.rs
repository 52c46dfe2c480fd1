//! Benchmarks for the engine hot paths on a full-size grid.
//!
//! A turn recomputes one distance field per moved worker and runs the area
//! finder once, so those two dominate.

#![allow(missing_docs)] // Benchmark macros generate undocumented functions
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gridfence::agent::{CommandBudget, RecordingEnvironment, TurnDriver};
use gridfence::config::{AgentConfig, WorldConfig};
use gridfence::engine::{
    assign_workers, classify_harvest, find_scoreable_areas, DistanceField, HillPolicy, IdleWorker,
    Target, Workspace,
};
use gridfence::grid::{generate_grid, GenerationParams};
use gridfence::snapshot::{Snapshot, WorkerRecord};
use gridfence::{Color, Coord, ToroidalGrid};

fn own() -> Color {
    Color::from_char('A').unwrap()
}

/// A scattered grid with a few closed rings of the own color.
fn board(size: u16) -> ToroidalGrid {
    let params = GenerationParams {
        size,
        rings: vec![
            (Coord::new(3, 3), size / 4, own()),
            (Coord::new(size / 2, size / 2), size / 3, own()),
        ],
        ..GenerationParams::default()
    };
    generate_grid(42, &params).unwrap()
}

fn bench_distance_field(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_field");
    for size in [64u16, 128, 200] {
        let grid = board(size);
        let mut ws = Workspace::for_grid_size(size);
        let mut field =
            DistanceField::compute(&grid, Coord::new(1, 1), HillPolicy::Blocked, &mut ws);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| {
                let origin = black_box(Coord::new(size / 2, 1));
                field.recompute(grid, origin, HillPolicy::Blocked, &mut ws);
                black_box(field.reachable_count())
            });
        });
    }
    group.finish();
}

fn bench_find_areas(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_scoreable_areas");
    for size in [64u16, 128, 200] {
        let grid = board(size);
        let mut ws = Workspace::for_grid_size(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &grid, |b, grid| {
            b.iter(|| black_box(find_scoreable_areas(grid, own(), &mut ws)));
        });
    }
    group.finish();
}

fn bench_classify_harvest(c: &mut Criterion) {
    let grid = board(128);
    let mut ws = Workspace::for_grid_size(128);
    c.bench_function("classify_harvest_128", |b| {
        b.iter(|| black_box(classify_harvest(&grid, black_box(Coord::new(3, 3)), &mut ws)));
    });
}

fn bench_assignment(c: &mut Criterion) {
    let grid = board(64);
    let mut ws = Workspace::for_grid_size(64);
    let fields: Vec<DistanceField> = (0..20)
        .map(|i| {
            DistanceField::compute(&grid, Coord::new(i * 3, i * 2), HillPolicy::Blocked, &mut ws)
        })
        .collect();
    let idle: Vec<IdleWorker<'_>> = fields
        .iter()
        .enumerate()
        .map(|(worker, field)| IdleWorker { worker, field })
        .collect();
    let targets: Vec<Target> = grid
        .iter()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(cell, _)| Target {
            cell,
            tier: u8::try_from((cell.x + cell.y) % 4).unwrap(),
        })
        .collect();

    c.bench_function("assign_20_workers_64", |b| {
        b.iter(|| black_box(assign_workers(&idle, black_box(&targets), 40)));
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let grid = board(64);
    let workers: Vec<WorkerRecord> = (0..10u16)
        .map(|i| WorkerRecord {
            id: u32::from(i),
            position: Coord::new(i * 6, 5),
            storage: Vec::new(),
        })
        .filter(|record| !grid.is_impassable(record.position))
        .collect();
    let snapshot = Snapshot {
        world: WorldConfig {
            size: 64,
            ..WorldConfig::default()
        },
        grid,
        workers,
        enemies: Vec::new(),
    };

    c.bench_function("play_turn_64", |b| {
        b.iter(|| {
            let mut driver = TurnDriver::new(AgentConfig::default());
            let mut state = driver.load(snapshot.clone());
            let mut env = RecordingEnvironment::new();
            let mut budget = CommandBudget::new(50);
            black_box(driver.play_turn(&mut state, &mut env, &mut budget))
        });
    });
}

criterion_group!(
    benches,
    bench_distance_field,
    bench_find_areas,
    bench_classify_harvest,
    bench_assignment,
    bench_full_turn
);
criterion_main!(benches);
