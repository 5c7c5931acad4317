//! Maze construction and topology queries.

use glam::IVec2;
use pathfinding::prelude::bfs_reach;
use smallvec::SmallVec;
use std::collections::HashSet;
use strum::EnumCount;
use tracing::{debug, trace};

use crate::entity::ghost::GhostKind;
use crate::error::{GameResult, MapError};
use crate::map::cell::{CellFlags, MazeCell};
use crate::map::direction::Direction;
use crate::map::parser::LevelParser;

/// Something the player can pick up from a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collectible {
    Dot,
    Energizer,
    Fruit,
}

/// The maze topology shared by every agent of a level.
///
/// Cells are stored row-major. The only mutation after construction is
/// clearing collectibles through [`Maze::collect`].
#[derive(Debug, Clone)]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<MazeCell>,
    pacman_spawns: Vec<IVec2>,
    /// Indexed by [`GhostKind::as_usize`].
    ghost_spawns: [IVec2; GhostKind::COUNT],
    /// Indexed by [`GhostKind::as_usize`].
    scatter_goals: [IVec2; GhostKind::COUNT],
    remaining: usize,
}

impl Maze {
    /// Parses level text and builds a maze from it.
    ///
    /// # Errors
    ///
    /// Fails on malformed text or on any structural problem of the layout.
    pub fn load(text: &str) -> GameResult<Maze> {
        let grid = LevelParser::parse_grid(text)?;
        Ok(Maze::from_grid(&grid)?)
    }

    /// Builds a maze from a row-major grid of bit-packed cell values.
    ///
    /// Either a fully validated maze is returned or nothing at all.
    ///
    /// # Errors
    ///
    /// Returns an error if a cell carries conflicting flags, if the pacman spawn,
    /// ghost box, or any scatter goal is missing (or a goal is defined twice), or
    /// if some cell pacman can reach is unreachable for a ghost.
    pub fn from_grid(grid: &[Vec<u16>]) -> Result<Maze, MapError> {
        let height = grid.len();
        let width = grid.first().map(Vec::len).unwrap_or(0);
        if width == 0 {
            return Err(MapError::Empty);
        }
        if grid.iter().any(|row| row.len() != width) {
            return Err(MapError::NotRectangular);
        }

        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                let flags = CellFlags::from_bits(value).ok_or(MapError::UnknownBits { cell: pos, value })?;
                if !flags.is_consistent() {
                    return Err(MapError::ConflictingFlags {
                        cell: pos,
                        flags: format!("{flags:?}"),
                    });
                }
                cells.push(MazeCell::new(flags));
            }
        }

        let mut maze = Maze {
            width: width as i32,
            height: height as i32,
            cells,
            pacman_spawns: Vec::new(),
            ghost_spawns: [IVec2::ZERO; GhostKind::COUNT],
            scatter_goals: [IVec2::ZERO; GhostKind::COUNT],
            remaining: 0,
        };

        maze.locate_special_cells()?;
        maze.compute_topology();
        maze.validate_connectivity()?;

        debug!(
            width = maze.width,
            height = maze.height,
            collectibles = maze.remaining,
            pacman_spawns = maze.pacman_spawns.len(),
            "Maze loaded"
        );

        Ok(maze)
    }

    /// Collects spawn points, scatter goals and the collectible count.
    fn locate_special_cells(&mut self) -> Result<(), MapError> {
        let mut box_cells = Vec::new();
        let mut goals: [SmallVec<[IVec2; 1]>; GhostKind::COUNT] = Default::default();

        for pos in self.positions() {
            let cell = self.cells[self.index(pos)];
            if cell.is_pacman_spawnpoint() {
                self.pacman_spawns.push(pos);
            }
            if cell.is_ghost_box() {
                box_cells.push(pos);
            }
            if cell.flags.intersects(CellFlags::COLLECTIBLE) {
                self.remaining += 1;
            }
            for kind in GhostKind::KINDS {
                if cell.is_scatter_goal(kind) {
                    goals[kind.as_usize()].push(pos);
                }
            }
        }

        if self.pacman_spawns.is_empty() {
            return Err(MapError::MissingPacmanSpawn);
        }
        if box_cells.is_empty() {
            return Err(MapError::MissingGhostSpawn);
        }

        for kind in GhostKind::KINDS {
            let found = &goals[kind.as_usize()];
            match found.len() {
                0 => return Err(MapError::MissingScatterGoal(kind)),
                1 => self.scatter_goals[kind.as_usize()] = found[0],
                count => return Err(MapError::DuplicateScatterGoal { kind, count }),
            }
            self.ghost_spawns[kind.as_usize()] = box_cells[kind.as_usize() % box_cells.len()];
        }

        Ok(())
    }

    /// Derives per-cell traversability and turnability.
    fn compute_topology(&mut self) {
        for pos in self.positions() {
            let index = self.index(pos);
            let cell = self.cells[index];
            if cell.is_wall() {
                continue;
            }

            let mut can_go = [false; Direction::COUNT];
            for dir in Direction::DIRECTIONS {
                can_go[dir.as_usize()] = match self.neighbor(pos, dir).and_then(|n| self.cell(n)) {
                    Some(next) => !next.is_wall() && !(cell.is_ghost_box_exit() && next.is_ghost_box()),
                    None => false,
                };
            }

            let straight = can_go.iter().filter(|open| **open).count() == 2
                && ((can_go[Direction::North.as_usize()] && can_go[Direction::South.as_usize()])
                    || (can_go[Direction::East.as_usize()] && can_go[Direction::West.as_usize()]));

            let cell = &mut self.cells[index];
            cell.can_go = can_go;
            cell.turnable = !straight || cell.is_ghost_box_exit();
        }
    }

    /// Ensures ghosts can reach every cell the player can.
    fn validate_connectivity(&self) -> Result<(), MapError> {
        let pacman_reach: HashSet<IVec2> = self
            .pacman_spawns
            .iter()
            .flat_map(|spawn| self.reachable_from(*spawn))
            .collect();

        for kind in GhostKind::KINDS {
            let ghost_reach: HashSet<IVec2> = self.reachable_from(self.ghost_spawn(kind)).into_iter().collect();
            if let Some(cell) = self
                .positions()
                .find(|pos| pacman_reach.contains(pos) && !ghost_reach.contains(pos))
            {
                return Err(MapError::Unreachable { cell, kind });
            }
        }

        Ok(())
    }

    fn index(&self, pos: IVec2) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    /// Iterates every cell position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = IVec2> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| IVec2::new(x, y)))
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// Returns the cell at a position, if it lies inside the maze.
    pub fn cell(&self, pos: IVec2) -> Option<&MazeCell> {
        self.in_bounds(pos).then(|| &self.cells[self.index(pos)])
    }

    /// Out-of-bounds positions count as walls.
    pub fn is_wall(&self, pos: IVec2) -> bool {
        self.cell(pos).is_none_or(MazeCell::is_wall)
    }

    /// Returns the in-bounds neighbour of a position.
    pub fn neighbor(&self, pos: IVec2, direction: Direction) -> Option<IVec2> {
        let next = pos + direction.as_ivec2();
        self.in_bounds(next).then_some(next)
    }

    /// Wraps a position onto the maze, treating it as a torus.
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    pub fn can_go(&self, pos: IVec2, direction: Direction) -> bool {
        self.cell(pos).is_some_and(|cell| cell.can_go(direction))
    }

    pub fn is_turnable(&self, pos: IVec2) -> bool {
        self.cell(pos).is_some_and(MazeCell::turnable)
    }

    /// Directions an agent may leave a cell in, in [`Direction::DIRECTIONS`] order.
    pub fn open_directions(&self, pos: IVec2) -> SmallVec<[Direction; Direction::COUNT]> {
        Direction::DIRECTIONS
            .into_iter()
            .filter(|dir| self.can_go(pos, *dir))
            .collect()
    }

    /// Cells reachable in one legal step, in [`Direction::DIRECTIONS`] order.
    pub fn open_neighbors(&self, pos: IVec2) -> SmallVec<[IVec2; Direction::COUNT]> {
        self.open_directions(pos)
            .into_iter()
            .map(|dir| pos + dir.as_ivec2())
            .collect()
    }

    /// Every cell reachable from `start` through legal moves, including `start`.
    pub fn reachable_from(&self, start: IVec2) -> Vec<IVec2> {
        bfs_reach(start, |pos| self.open_neighbors(*pos)).collect()
    }

    pub fn pacman_spawns(&self) -> &[IVec2] {
        &self.pacman_spawns
    }

    pub fn ghost_spawn(&self, kind: GhostKind) -> IVec2 {
        self.ghost_spawns[kind.as_usize()]
    }

    pub fn scatter_goal(&self, kind: GhostKind) -> IVec2 {
        self.scatter_goals[kind.as_usize()]
    }

    /// Collectibles still left in the maze.
    pub fn remaining_collectibles(&self) -> usize {
        self.remaining
    }

    pub fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    /// Removes and returns the collectible lying on a cell.
    ///
    /// Calling this again on the same cell returns `None`, so the remaining
    /// counter is decremented exactly once per collectible.
    pub fn collect(&mut self, pos: IVec2) -> Option<Collectible> {
        if !self.in_bounds(pos) {
            return None;
        }
        let index = self.index(pos);
        let cell = &mut self.cells[index];

        let collectible = if cell.has_dot() {
            Collectible::Dot
        } else if cell.has_energizer() {
            Collectible::Energizer
        } else if cell.has_fruit() {
            Collectible::Fruit
        } else {
            return None;
        };

        cell.flags.remove(CellFlags::COLLECTIBLE);
        self.remaining -= 1;
        trace!(cell = %pos, ?collectible, remaining = self.remaining, "Collectible picked up");

        Some(collectible)
    }
}
