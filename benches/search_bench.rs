use criterion::{criterion_group, criterion_main, Criterion};
use grid_router::{octile_distance, search, Point, WallGrid, MAX_GRID_SIZE};
use grid_util::grid::Grid;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

fn search_bench(c: &mut Criterion) {
    let n = MAX_GRID_SIZE;
    let mut rng = StdRng::seed_from_u64(0);
    let mut grid = WallGrid::new(n, n, false);
    for x in 0..n {
        for y in 0..n {
            grid.set(x, y, rng.gen_bool(0.3));
        }
    }
    grid.set(0, 0, false);
    grid.set(n - 1, n - 1, false);
    grid.generate_components();
    let start = Point::new(0, 0);
    let end = Point::new(n as i32 - 1, n as i32 - 1);

    c.bench_function(format!("dijkstra {n}x{n}").as_str(), |b| {
        b.iter(|| black_box(search(&grid, start, end, None)))
    });
    c.bench_function(format!("astar {n}x{n}").as_str(), |b| {
        b.iter(|| black_box(search(&grid, start, end, Some(octile_distance))))
    });
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
