//! This module contains all the constants used in the game.

use std::time::Duration;

/// Fixed simulation rate; one tick advances every agent exactly once.
pub const TICKS_PER_SECOND: u32 = 60;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / TICKS_PER_SECOND as f64) as u64);

/// Lives a new game starts with.
pub const STARTING_LIVES: u32 = 3;

/// Cell geometry of the isometric projection, in pixels.
pub mod cell {
    /// Width of a cell's diamond on screen.
    pub const CELL_WIDTH: f32 = 192.0;
    /// Height of a cell's diamond on screen.
    pub const CELL_HEIGHT: f32 = 96.0;
    pub const HALF_CELL_WIDTH: f32 = CELL_WIDTH / 2.0;
    pub const HALF_CELL_HEIGHT: f32 = CELL_HEIGHT / 2.0;
}

/// Ground-contact footprint used for agent collisions.
pub mod collider {
    /// Horizontal extent of an agent's footprint segment.
    pub const SPRITE_WIDTH: f32 = 108.0;
    /// Vertical extent of an agent's footprint segment.
    pub const BOTTOM_LINE_HEIGHT: f32 = 54.0;
    /// Tolerance used when comparing footprint slopes and intercepts.
    pub const EPSILON: f32 = 1e-3;
}

/// Bit layout of the level format. Existing level files depend on these exact positions.
pub mod bits {
    pub const WALL: u16 = 1 << 0;
    pub const DOT: u16 = 1 << 1;
    pub const ENERGIZER: u16 = 1 << 2;
    pub const GHOST_BOX: u16 = 1 << 3;
    pub const GHOST_BOX_EXIT: u16 = 1 << 4;
    pub const PACMAN_SPAWN: u16 = 1 << 5;
    pub const CHASER_SCATTER: u16 = 1 << 6;
    pub const AMBUSHER_SCATTER: u16 = 1 << 7;
    pub const FLANKER_SCATTER: u16 = 1 << 8;
    pub const OPPORTUNIST_SCATTER: u16 = 1 << 9;
    pub const FRUIT: u16 = 1 << 10;
}

/// Movement speeds, in seconds spent crossing one cell.
pub mod speed {
    pub const PACMAN_SECONDS_PER_CELL: f32 = 0.4;
    pub const GHOST_SECONDS_PER_CELL: f32 = 0.5;
}

/// Ghost behaviour timings and thresholds.
pub mod ghost {
    pub const CHASE_SECONDS: u32 = 10;
    /// The opportunist keeps chasing longer than the others.
    pub const OPPORTUNIST_CHASE_SECONDS: u32 = 15;
    pub const SCATTER_SECONDS: u32 = 5;
    pub const SCARE_SECONDS: u32 = 7;
    /// Cells the ambusher looks ahead of the player.
    pub const AMBUSH_LOOKAHEAD: usize = 3;
    /// Manhattan distance above which the opportunist keeps chasing.
    pub const OPPORTUNIST_THRESHOLD: i32 = 8;
}

/// Point values.
pub mod score {
    pub const DOT: u32 = 10;
    pub const ENERGIZER: u32 = 50;
    pub const FRUIT_CHOICES: [u32; 3] = [100, 200, 300];
    /// Bonus for the first ghost eaten in a scare window; doubles per capture.
    pub const GHOST_BASE: u32 = 100;
}
