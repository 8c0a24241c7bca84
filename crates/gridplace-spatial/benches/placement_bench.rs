//! Criterion benchmarks for occupancy queries and placement validation.

use criterion::{Criterion, criterion_group, criterion_main};
use gridplace_core::grid::GridBounds;
use gridplace_core::test_utils::*;
use gridplace_spatial::{OccupancyGrid, OutOfBoundsPolicy, PlacementValidator};

/// 256x256 map with every fourth column blocked.
fn striped_grid() -> OccupancyGrid {
    let bounds = GridBounds::new(cell(0, 0), cell(255, 255));
    OccupancyGrid::bounded(bounds, OutOfBoundsPolicy::Blocked)
        .with_blocked((0..256).flat_map(|y| (0..256).step_by(4).map(move |x| cell(x, y))))
}

fn bench_placement(c: &mut Criterion) {
    let mut group = c.benchmark_group("placement");
    group.sample_size(50);

    let grid = striped_grid();
    let validator = PlacementValidator::new();

    // Benchmark: validate a 2x2 footprint at every anchor of the map.
    group.bench_function("can_place_full_scan_2x2", |b| {
        b.iter(|| {
            let mut legal = 0u32;
            for y in 0..256 {
                for x in 0..256 {
                    if validator.can_place(&grid, cell(x, y), fp(2, 2)) {
                        legal += 1;
                    }
                }
            }
            legal
        });
    });

    // Benchmark: commit 1,000 single cells into an empty grid.
    group.bench_function("commit_1000_cells", |b| {
        b.iter(|| {
            let mut grid = OccupancyGrid::new();
            for i in 0..1000 {
                grid.commit_area(cell(i % 100, i / 100), fp(1, 1)).unwrap();
            }
            grid
        });
    });

    group.finish();
}

criterion_group!(benches, bench_placement);
criterion_main!(benches);
