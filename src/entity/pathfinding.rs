//! Breadth-first shortest paths over the maze.
//!
//! Neighbours are expanded in [`Direction::DIRECTIONS`] order, so among paths
//! of equal length the one found first is stable for a given maze.

use glam::IVec2;
use pathfinding::prelude::bfs;
use tracing::debug;

use crate::map::builder::Maze;
use crate::map::direction::Direction;

/// Calculates the shortest legal path between two cells.
///
/// The path includes both the start and the goal cell. Moves follow the
/// maze's traversability, so the one-way ghost box exit is respected.
pub fn shortest_path(maze: &Maze, start: IVec2, goal: IVec2) -> Option<Vec<IVec2>> {
    bfs(&start, |cell| maze.open_neighbors(*cell), |cell| *cell == goal)
}

/// Number of steps on the shortest path, if the goal is reachable at all.
pub fn distance(maze: &Maze, start: IVec2, goal: IVec2) -> Option<usize> {
    shortest_path(maze, start, goal).map(|path| path.len() - 1)
}

/// Returns the direction of the first step towards `goal`.
///
/// `None` when already standing on the goal or when it cannot be reached.
pub fn first_step(maze: &Maze, start: IVec2, goal: IVec2) -> Option<Direction> {
    if start == goal {
        return None;
    }

    match shortest_path(maze, start, goal) {
        Some(path) => Direction::between(path[0], path[1]),
        None => {
            debug!(start = %start, goal = %goal, "No path to goal");
            None
        }
    }
}
