use grid_router::{Point, Session};

// Declares two stops between the endpoints, connects them into a chain
//   start - 1 - 2 - end
// and routes through them: first the greedy waypoint ordering with its
// Manhattan cost total, then the full grid path leg by leg.

fn main() {
    let mut session = Session::new(8).expect("8 is a valid grid size");
    let start = Point::new(0, 0);
    let end = Point::new(7, 7);
    session.set_start(start);
    session.set_end(end);

    let a = Point::new(2, 1);
    let b = Point::new(5, 4);
    session.add_stop(a);
    session.add_stop(b);
    session.toggle_connection(start, a);
    session.toggle_connection(a, b);
    session.toggle_connection(b, end);

    for (pos, label) in session.stops().iter() {
        println!("stop {label} at {:?}", pos);
    }

    let (order, total) = session.route_through_stops();
    println!("visiting order: {:?}", order);
    println!("total connection cost: {total}");

    if session.find_path_through_stops(true) {
        println!("full path:");
        for p in session.path() {
            println!("{:?}", p);
        }
    }
}
