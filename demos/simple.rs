use grid_router::{Point, Session};

// In this example a path is found on an 8x8 grid with a vertical wall
// missing only its last row:
//  ________
// |S #     |
// |  #     |
// |  #     |
// |  #     |
// |  #     |
// |  #     |
// |  #     |
// |       E|
//  --------
// where
// - # marks a wall
// - S marks the start
// - E marks the end
//
// Cells have an 8-neighborhood; diagonal steps cost 1.414.

fn main() {
    let mut session = Session::new(8).expect("8 is a valid grid size");
    session.set_start(Point::new(0, 0));
    session.set_end(Point::new(7, 7));
    for y in 0..7 {
        session.toggle_wall(Point::new(2, y));
    }
    println!("{}", session.grid());
    let found = session.find_path(true);
    println!("Path found: {found}");
    for p in session.path() {
        println!("{:?}", p);
    }
}
