use glam::{IVec2, Vec2};
use tracing::trace;

use crate::map::builder::Maze;
use crate::map::direction::Direction;

/// Where an agent currently is on the maze grid.
///
/// An agent is either exactly on a cell, where it takes its direction
/// decisions, or somewhere along the transition between two adjacent cells.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Position {
    /// The agent sits exactly on a cell boundary.
    AtCell(IVec2),
    /// The agent is moving from one cell towards its neighbour.
    Between {
        from: IVec2,
        /// Unwrapped neighbour of `from`; may lie one step outside the maze.
        to: IVec2,
        /// Ticks spent on this transition so far, in `[0, frames_per_cell)`.
        traversed: f32,
    },
}

impl Position {
    pub fn is_at_cell(&self) -> bool {
        matches!(self, Position::AtCell(_))
    }

    /// The current cell, or the most recently departed one.
    pub fn cell(&self) -> IVec2 {
        match self {
            Position::AtCell(cell) => *cell,
            Position::Between { from, .. } => *from,
        }
    }

    /// The cell being approached, or the current cell when not moving.
    pub fn goal(&self) -> IVec2 {
        match self {
            Position::AtCell(cell) => *cell,
            Position::Between { to, .. } => *to,
        }
    }
}

/// Discretized movement shared by every agent.
///
/// A `Mover` turns cell-to-cell transitions into a continuously interpolated
/// grid position. Crossing one cell takes exactly `frames_per_cell` ticks; the
/// count is real-valued so speeds that do not divide the tick rate evenly
/// accumulate no drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Mover {
    position: Position,
    /// Facing, used for rendering and as the "straight ahead" of policies.
    direction: Direction,
    /// Direction of the active transition; `None` while standing still.
    move_direction: Option<Direction>,
    frames_per_cell: f32,
    /// Fraction of a tick left over from the previous transition.
    carry: f32,
}

impl Mover {
    /// Creates a stationary mover on `cell`.
    pub fn new(cell: IVec2, frames_per_cell: f32) -> Self {
        Self {
            position: Position::AtCell(cell),
            direction: Direction::default(),
            move_direction: None,
            frames_per_cell,
            carry: 0.0,
        }
    }

    /// Puts the mover back onto `cell`, standing still and facing the default direction.
    pub fn reset(&mut self, cell: IVec2) {
        *self = Self::new(cell, self.frames_per_cell);
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn cell(&self) -> IVec2 {
        self.position.cell()
    }

    pub fn goal(&self) -> IVec2 {
        self.position.goal()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn move_direction(&self) -> Option<Direction> {
        self.move_direction
    }

    pub fn is_moving(&self) -> bool {
        self.move_direction.is_some()
    }

    /// Progress of the active transition in ticks; zero on a cell boundary.
    pub fn progress(&self) -> f32 {
        match self.position {
            Position::AtCell(_) => 0.0,
            Position::Between { traversed, .. } => traversed,
        }
    }

    /// Continuous position in grid space, interpolated between cell and goal.
    pub fn grid_position(&self) -> Vec2 {
        match self.position {
            Position::AtCell(cell) => cell.as_vec2(),
            Position::Between { from, to, traversed } => {
                let t = traversed / self.frames_per_cell;
                from.as_vec2() + (to - from).as_vec2() * t
            }
        }
    }

    /// Advances the mover by one tick.
    ///
    /// On a cell boundary the new cell is committed. If that cell is turnable,
    /// or the mover is standing still, `get_direction` is asked for a new
    /// direction; `None` keeps the previous one. A direction that would walk
    /// into a wall stops the mover instead, and the policy is asked again on
    /// the next tick.
    pub fn advance<F>(&mut self, maze: &Maze, get_direction: F)
    where
        F: FnOnce(&Mover) -> Option<Direction>,
    {
        if let Position::AtCell(cell) = self.position {
            if self.move_direction.is_none() || maze.is_turnable(cell) {
                if let Some(direction) = get_direction(self) {
                    self.move_direction = Some(direction);
                    self.direction = direction;
                }
            }

            if let Some(direction) = self.move_direction {
                if maze.can_go(cell, direction) {
                    self.position = Position::Between {
                        from: cell,
                        to: cell + direction.as_ivec2(),
                        traversed: self.carry,
                    };
                } else {
                    trace!(cell = %cell, ?direction, "Blocked, stopping");
                    self.move_direction = None;
                }
            }
            self.carry = 0.0;
        }

        if let Position::Between { to, traversed, .. } = &mut self.position {
            *traversed += 1.0;
            if *traversed >= self.frames_per_cell {
                self.carry = *traversed - self.frames_per_cell;
                self.position = Position::AtCell(maze.wrap(*to));
            }
        }
    }

    /// Turns around on the spot.
    ///
    /// Mid-transition the move is mirrored: the approached cell becomes the
    /// departed one and progress becomes `frames_per_cell - progress`, which
    /// leaves the grid position unchanged.
    pub fn reverse(&mut self, maze: &Maze) {
        let reversed = self.direction.opposite();
        self.direction = reversed;

        match self.position {
            Position::AtCell(_) => {
                if self.move_direction.is_some() {
                    self.move_direction = Some(reversed);
                }
            }
            Position::Between { to, traversed, .. } => {
                let from = maze.wrap(to);
                self.move_direction = Some(reversed);
                self.position = Position::Between {
                    from,
                    to: from + reversed.as_ivec2(),
                    traversed: self.frames_per_cell - traversed,
                };
            }
        }
    }
}
