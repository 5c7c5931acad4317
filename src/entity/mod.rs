//! Agents of the maze: the shared movement engine and the policies steering it.

pub mod ghost;
pub mod movement;
pub mod pacman;
pub mod pathfinding;
pub mod projection;
