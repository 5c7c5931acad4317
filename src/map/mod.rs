//! This module defines the maze and provides functions for interacting with it.

pub mod builder;
pub mod cell;
pub mod direction;
pub mod parser;

pub use builder::{Collectible, Maze};
pub use direction::Direction;
