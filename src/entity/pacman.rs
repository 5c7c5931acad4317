//! The player-controlled agent.

use glam::IVec2;
use tracing::trace;

use crate::entity::movement::Mover;
use crate::map::builder::Maze;
use crate::map::direction::Direction;

/// The player agent: a mover steered by the last commanded direction.
#[derive(Debug, Clone)]
pub struct Pacman {
    pub mover: Mover,
    /// Most recent command; applied at the next cell where it is legal.
    queued: Option<Direction>,
}

impl Pacman {
    pub fn new(cell: IVec2, frames_per_cell: f32) -> Self {
        Self {
            mover: Mover::new(cell, frames_per_cell),
            queued: None,
        }
    }

    /// Handles a directional command.
    ///
    /// Asking for the opposite of the current facing while moving turns the
    /// player around immediately. Any other direction is queued until it can
    /// be taken.
    pub fn command(&mut self, direction: Direction, maze: &Maze) {
        if self.mover.is_moving() && direction == self.mover.direction().opposite() {
            trace!(?direction, "Reversing");
            self.mover.reverse(maze);
        }
        self.queued = Some(direction);
    }

    /// The direction the player is asking for, falling back to its facing.
    pub fn commanded_direction(&self) -> Direction {
        self.queued.unwrap_or(self.mover.direction())
    }

    pub fn queued_direction(&self) -> Option<Direction> {
        self.queued
    }

    /// Puts the player back onto a spawn cell, dropping any queued command.
    pub fn respawn(&mut self, cell: IVec2) {
        self.mover.reset(cell);
        self.queued = None;
    }

    pub fn advance(&mut self, maze: &Maze) {
        let queued = self.queued;
        self.mover.advance(maze, |mover| choose_direction(maze, mover, queued));
    }
}

/// Takes the queued direction when legal, otherwise keeps going if possible.
fn choose_direction(maze: &Maze, mover: &Mover, queued: Option<Direction>) -> Option<Direction> {
    let cell = mover.cell();
    queued
        .filter(|direction| maze.can_go(cell, *direction))
        .or_else(|| mover.move_direction().filter(|direction| maze.can_go(cell, *direction)))
}
