use glam::IVec2;
use strum::EnumCount;
use strum_macros::{AsRefStr, EnumCount};

use crate::error::GameError;

/// The four cardinal directions of the maze grid.
///
/// North points towards row 0, east towards increasing columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, EnumCount)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    #[default]
    West,
}

impl Direction {
    /// The four cardinal directions, clockwise from north.
    /// This is also the neighbour order used by breadth-first searches.
    pub const DIRECTIONS: [Direction; Direction::COUNT] = [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Returns the opposite direction. Constant time.
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Returns the direction after a quarter turn counter-clockwise.
    pub const fn left(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::East => Direction::North,
            Direction::South => Direction::East,
            Direction::West => Direction::South,
        }
    }

    /// Returns the direction after a quarter turn clockwise.
    pub const fn right(self) -> Direction {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    /// Returns the unit grid offset of this direction.
    pub fn as_ivec2(self) -> IVec2 {
        self.into()
    }

    /// Returns the direction as a usize (0-3). Constant time.
    /// This is useful for indexing into arrays.
    pub const fn as_usize(self) -> usize {
        self as usize
    }

    /// True for east and west, the directions along the x axis.
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West)
    }

    /// Returns the direction of a unit step between two adjacent cells.
    pub fn between(from: IVec2, to: IVec2) -> Option<Direction> {
        Self::DIRECTIONS.into_iter().find(|dir| from + dir.as_ivec2() == to)
    }
}

impl From<Direction> for IVec2 {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::North => -IVec2::Y,
            Direction::East => IVec2::X,
            Direction::South => IVec2::Y,
            Direction::West => -IVec2::X,
        }
    }
}

impl TryFrom<usize> for Direction {
    type Error = GameError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::DIRECTIONS
            .get(index)
            .copied()
            .ok_or_else(|| GameError::InvalidState(format!("no direction with index {index}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turns_compose() {
        for dir in Direction::DIRECTIONS {
            assert_eq!(dir.left().right(), dir);
            assert_eq!(dir.left().left(), dir.opposite());
            assert_eq!(dir.right().right(), dir.opposite());
        }
    }

    #[test]
    fn test_as_usize_matches_order() {
        for (i, dir) in Direction::DIRECTIONS.iter().enumerate() {
            assert_eq!(dir.as_usize(), i);
        }
    }

    #[test]
    fn test_try_from_index() {
        assert_eq!(Direction::try_from(2).unwrap(), Direction::South);
        assert!(Direction::try_from(Direction::COUNT).is_err());
        assert_eq!(Direction::COUNT, Direction::DIRECTIONS.len());
    }

    #[test]
    fn test_between() {
        let origin = IVec2::new(3, 3);
        assert_eq!(Direction::between(origin, IVec2::new(3, 2)), Some(Direction::North));
        assert_eq!(Direction::between(origin, IVec2::new(2, 3)), Some(Direction::West));
        assert_eq!(Direction::between(origin, IVec2::new(4, 4)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn test_as_ref_str() {
        assert_eq!(Direction::North.as_ref(), "north");
        assert_eq!(Direction::West.as_ref(), "west");
    }
}
