use glam::IVec2;
use isopac::entity::pathfinding::{distance, first_step, shortest_path};
use isopac::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{maze, LOOP_MAZE};

/// An open 3x3 floor inside a wall ring.
const OPEN_ROOM: [&str; 5] = ["#####", "#P G#", "# b #", "#   #", "#####"];

#[test]
fn test_corner_to_corner() {
    let maze = maze(&OPEN_ROOM);
    let path = shortest_path(&maze, IVec2::new(1, 1), IVec2::new(3, 3)).unwrap();

    assert_that(&path.len()).is_equal_to(5);
    assert_eq!(path.first(), Some(&IVec2::new(1, 1)));
    assert_eq!(path.last(), Some(&IVec2::new(3, 3)));
    for pair in path.windows(2) {
        assert_that(&Direction::between(pair[0], pair[1])).is_some();
    }
}

#[test]
fn test_first_step_follows_direction_order() {
    let maze = maze(&OPEN_ROOM);
    // East and south are equally short; east is expanded first.
    assert_eq!(first_step(&maze, IVec2::new(1, 1), IVec2::new(3, 3)), Some(Direction::East));
    assert_eq!(first_step(&maze, IVec2::new(3, 3), IVec2::new(3, 1)), Some(Direction::North));
}

#[test]
fn test_already_at_goal() {
    let maze = maze(&OPEN_ROOM);
    assert_eq!(first_step(&maze, IVec2::new(2, 2), IVec2::new(2, 2)), None);
    assert_eq!(distance(&maze, IVec2::new(2, 2), IVec2::new(2, 2)), Some(0));
}

#[test]
fn test_unreachable_goal() {
    let maze = maze(&OPEN_ROOM);
    assert_eq!(first_step(&maze, IVec2::new(1, 1), IVec2::new(0, 0)), None);
    assert_eq!(shortest_path(&maze, IVec2::new(1, 1), IVec2::new(10, 10)), None);
}

#[test]
fn test_paths_leave_but_never_enter_the_box() {
    let maze = maze(&LOOP_MAZE);
    let inside = IVec2::new(4, 3);
    let above_exit = IVec2::new(4, 1);

    assert_eq!(distance(&maze, inside, above_exit), Some(2));
    assert_eq!(first_step(&maze, inside, above_exit), Some(Direction::North));
    assert_eq!(shortest_path(&maze, above_exit, inside), None);
}

#[test]
fn test_distance_around_the_loop() {
    let maze = maze(&LOOP_MAZE);
    // Along the top corridor and down the right side.
    assert_eq!(distance(&maze, IVec2::new(1, 1), IVec2::new(7, 5)), Some(10));
}
