//! Per-cell flags decoded from the level bit layout.

use bitflags::bitflags;
use strum::EnumCount;

use crate::constants::bits;
use crate::entity::ghost::GhostKind;
use crate::map::direction::Direction;

bitflags! {
    /// Static and collectible properties of a maze cell, one bit per property.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CellFlags: u16 {
        const WALL = bits::WALL;
        const DOT = bits::DOT;
        const ENERGIZER = bits::ENERGIZER;
        const GHOST_BOX = bits::GHOST_BOX;
        const GHOST_BOX_EXIT = bits::GHOST_BOX_EXIT;
        const PACMAN_SPAWN = bits::PACMAN_SPAWN;
        const CHASER_SCATTER = bits::CHASER_SCATTER;
        const AMBUSHER_SCATTER = bits::AMBUSHER_SCATTER;
        const FLANKER_SCATTER = bits::FLANKER_SCATTER;
        const OPPORTUNIST_SCATTER = bits::OPPORTUNIST_SCATTER;
        const FRUIT = bits::FRUIT;

        /// Anything the player can pick up.
        const COLLECTIBLE = Self::DOT.bits() | Self::ENERGIZER.bits() | Self::FRUIT.bits();
        const SCATTER_GOALS = Self::CHASER_SCATTER.bits()
            | Self::AMBUSHER_SCATTER.bits()
            | Self::FLANKER_SCATTER.bits()
            | Self::OPPORTUNIST_SCATTER.bits();
    }
}

/// Flags that may never appear together on one cell.
const EXCLUSIVE: [CellFlags; 7] = [
    CellFlags::WALL,
    CellFlags::DOT,
    CellFlags::ENERGIZER,
    CellFlags::GHOST_BOX,
    CellFlags::GHOST_BOX_EXIT,
    CellFlags::PACMAN_SPAWN,
    CellFlags::FRUIT,
];

impl CellFlags {
    /// Returns the scatter-goal flag belonging to a ghost kind.
    pub const fn scatter_goal(kind: GhostKind) -> CellFlags {
        match kind {
            GhostKind::Chaser => CellFlags::CHASER_SCATTER,
            GhostKind::Ambusher => CellFlags::AMBUSHER_SCATTER,
            GhostKind::Flanker => CellFlags::FLANKER_SCATTER,
            GhostKind::Opportunist => CellFlags::OPPORTUNIST_SCATTER,
        }
    }

    /// Checks that no two mutually exclusive properties are set.
    ///
    /// Scatter goals may sit on any open cell, but never inside a wall or the ghost box.
    pub fn is_consistent(self) -> bool {
        let exclusive = EXCLUSIVE.iter().filter(|flag| self.contains(**flag)).count();
        if exclusive > 1 {
            return false;
        }
        !(self.intersects(CellFlags::SCATTER_GOALS) && self.intersects(CellFlags::WALL | CellFlags::GHOST_BOX))
    }
}

/// A single cell of the maze.
///
/// The flags come straight from the level file; traversability and turnability
/// are derived once the whole grid is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MazeCell {
    pub flags: CellFlags,
    /// Indexed by [`Direction::as_usize`].
    pub(crate) can_go: [bool; Direction::COUNT],
    pub(crate) turnable: bool,
}

impl MazeCell {
    pub fn new(flags: CellFlags) -> Self {
        Self {
            flags,
            ..Default::default()
        }
    }

    pub fn is_wall(&self) -> bool {
        self.flags.contains(CellFlags::WALL)
    }

    pub fn has_dot(&self) -> bool {
        self.flags.contains(CellFlags::DOT)
    }

    pub fn has_energizer(&self) -> bool {
        self.flags.contains(CellFlags::ENERGIZER)
    }

    pub fn has_fruit(&self) -> bool {
        self.flags.contains(CellFlags::FRUIT)
    }

    pub fn is_ghost_box(&self) -> bool {
        self.flags.contains(CellFlags::GHOST_BOX)
    }

    pub fn is_ghost_box_exit(&self) -> bool {
        self.flags.contains(CellFlags::GHOST_BOX_EXIT)
    }

    pub fn is_pacman_spawnpoint(&self) -> bool {
        self.flags.contains(CellFlags::PACMAN_SPAWN)
    }

    pub fn is_scatter_goal(&self, kind: GhostKind) -> bool {
        self.flags.contains(CellFlags::scatter_goal(kind))
    }

    /// Whether an agent standing here may step towards `direction`.
    pub fn can_go(&self, direction: Direction) -> bool {
        self.can_go[direction.as_usize()]
    }

    /// Whether a direction decision has to be taken on this cell.
    pub fn turnable(&self) -> bool {
        self.turnable
    }
}
