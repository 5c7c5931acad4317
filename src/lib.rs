//! Isometric grid chase game core.
//!
//! The maze is loaded from a grid of bit-packed integers, agents move cell by
//! cell with interpolated positions, and ghosts pursue the player along
//! breadth-first shortest paths. Rendering and input are left to the caller,
//! which drives [`game::Game`] one tick at a time.

pub mod app;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod formatter;
pub mod game;
pub mod level;
pub mod logging;
pub mod map;
pub mod scoreboard;
