//! Fuzzes the search by checking for many random grids that a path is found
//! exactly when the goal is reachable by being part of the same connected
//! component, and that Dijkstra and A* agree on the optimal path cost.
use grid_router::{octile_distance, path_cost, search, Point, WallGrid};
use grid_util::grid::Grid;
use rand::prelude::*;

fn random_grid(n: usize, rng: &mut StdRng) -> WallGrid {
    let mut grid = WallGrid::new(n, n, false);
    for x in 0..n {
        for y in 0..n {
            grid.set(x, y, rng.gen_bool(0.4));
        }
    }
    // The corners act as start and goal and must stay open.
    grid.set(0, 0, false);
    grid.set(n - 1, n - 1, false);
    grid.generate_components();
    grid
}

fn visualize_grid(grid: &WallGrid, start: &Point, end: &Point) {
    for y in (0..grid.height() as i32).rev() {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if grid.is_wall(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

#[test]
fn fuzz_reachability() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng);
        let reachable = grid.reachable(&start, &end);
        let (path, visited) = search(&grid, start, end, Some(octile_distance));
        // Show the grid if the component oracle and the search disagree
        if path.is_empty() == reachable {
            visualize_grid(&grid, &start, &end);
        }
        assert!(!path.is_empty() == reachable);
        assert!(visited.contains(&start));
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let grid = random_grid(N, &mut rng);
        if !grid.reachable(&start, &end) {
            continue;
        }
        let (dijkstra_path, _) = search(&grid, start, end, None);
        let (astar_path, _) = search(&grid, start, end, Some(octile_distance));
        let dijkstra_cost = path_cost(&dijkstra_path);
        let astar_cost = path_cost(&astar_path);
        let delta = (dijkstra_cost - astar_cost).abs();
        if delta >= 1e-6 {
            println!("Dijkstra cost: {dijkstra_cost}; A* cost: {astar_cost}");
            visualize_grid(&grid, &start, &end);
        }
        assert!(delta < 1e-6);
    }
}
