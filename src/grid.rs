//! The wall grid: bounds checking, 8-directional neighbour enumeration with
//! per-edge costs, and connected-component bookkeeping for cheap reachability
//! queries.
use crate::{CARDINAL_COST, DIAGONAL_COST};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// The 8 neighbour offsets, cardinals first. Enumeration order is part of the
/// observable behaviour: equal-priority frontier entries settle in insertion
/// order, so this order decides which of several equally short paths is found.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

/// [WallGrid] holds the binary wall mask in a [BoolGrid] (a cell is occupied
/// when [true]) and maintains connected components over the open cells in a
/// [UnionFind] so that reachability can be answered without searching.
/// Implements [Grid] by building on [BoolGrid]; `set` keeps the components in
/// sync (unions in place on clearing, marks them dirty on blocking).
///
/// Diagonal moves between two diagonally adjacent walls are allowed, matching
/// the cost model where a diagonal step is a single move of cost
/// [DIAGONAL_COST].
#[derive(Clone, Debug)]
pub struct WallGrid {
    pub walls: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for WallGrid {
    fn default() -> WallGrid {
        WallGrid {
            walls: BoolGrid::default(),
            components: UnionFind::new(0),
            components_dirty: false,
        }
    }
}

impl WallGrid {
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.walls.index_in_bounds(x as usize, y as usize)
    }

    /// Whether `pos` lies on the grid and is not blocked by a wall.
    pub fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.walls.get(pos.x as usize, pos.y as usize)
    }

    /// Whether `pos` is a wall. Out-of-bounds positions are not walls.
    pub fn is_wall(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && self.walls.get(pos.x as usize, pos.y as usize)
    }

    /// Whether `pos` lies within the grid bounds.
    pub fn contains(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y)
    }

    /// Enumerates the open neighbours of `pos` with their edge costs:
    /// [CARDINAL_COST] for axis-aligned steps, [DIAGONAL_COST] for diagonal
    /// ones. Pure; no side effects.
    pub fn neighbors(&self, pos: Point) -> SmallVec<[(Point, f64); 8]> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|&(dx, dy)| Point::new(pos.x + dx, pos.y + dy))
            .filter(|&p| self.can_move_to(p))
            .map(|p| {
                let diagonal = p.x != pos.x && p.y != pos.y;
                (p, if diagonal { DIAGONAL_COST } else { CARDINAL_COST })
            })
            .collect()
    }

    /// All wall positions, row by row. Intended for presentation layers.
    pub fn wall_points(&self) -> Vec<Point> {
        let mut points = Vec::new();
        for y in 0..self.walls.height {
            for x in 0..self.walls.width {
                if self.walls.get(x, y) {
                    points.push(Point::new(x as i32, y as i32));
                }
            }
        }
        points
    }

    fn get_ix_point(&self, point: &Point) -> usize {
        self.walls.get_ix(point.x as usize, point.y as usize)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component. Note that this
    /// answers reachability only; a search is still needed for the path.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are on different components (or out of
    /// bounds).
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up open grid
    /// neighbours to the same components. Only the four "forward" directions
    /// are needed since every union is symmetric.
    pub fn generate_components(&mut self) {
        let w = self.walls.width;
        let h = self.walls.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if !self.walls.get(x, y) {
                    let point = Point::new(x as i32, y as i32);
                    let parent_ix = self.walls.get_ix(x, y);
                    let forward = [
                        Point::new(point.x, point.y + 1),
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x + 1, point.y + 1),
                        Point::new(point.x + 1, point.y - 1),
                    ];
                    for p in forward {
                        if self.can_move_to(p) {
                            let ix = self.get_ix_point(&p);
                            self.components.union(parent_ix, ix);
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for WallGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.walls.height {
            for x in 0..self.walls.width {
                write!(f, "{}", if self.walls.get(x, y) { '#' } else { '.' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Grid<bool> for WallGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        let mut grid = WallGrid {
            walls: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.walls.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        if self.walls.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            let p = Point::new(x as i32, y as i32);
            let p_ix = self.walls.get_ix(x, y);
            for (n, _) in self.neighbors(p) {
                self.components.union(p_ix, self.get_ix_point(&n));
            }
        }
        self.walls.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.walls.width()
    }
    fn height(&self) -> usize {
        self.walls.height()
    }
}
