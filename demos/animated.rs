use grid_router::{Point, SearchEvent, Session};

// Drives the incremental search driver by hand, the way a render loop
// would: one event per pull, visits first, then the path in reverse.
// A real presentation layer would repaint between pulls; here every
// event is printed instead.

fn main() {
    let mut session = Session::new(8).expect("8 is a valid grid size");
    session.set_start(Point::new(0, 0));
    session.set_end(Point::new(6, 6));
    session.toggle_wall(Point::new(3, 3));
    session.toggle_wall(Point::new(3, 4));

    let mut path = Vec::new();
    let mut visited = Vec::new();
    for event in session.animated_search(true).expect("endpoints are set") {
        match event {
            SearchEvent::Visit(p) => {
                println!("visit {:?}", p);
                visited.push(p);
            }
            SearchEvent::PathStep(p) => {
                println!("path  {:?}", p);
                path.push(p);
            }
        }
    }
    // Path events arrive end-first; reverse before storing.
    path.reverse();
    session.record_result(path, visited);
    println!("{} cells visited", session.visited().len());
    println!("path length {}", session.path().len());
}
