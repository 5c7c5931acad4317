//! Messages crossing the boundary between the game core and its front end.

use crate::entity::ghost::GhostKind;
use crate::map::direction::Direction;

/// Input routed into the game by a front end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameCommand {
    MovePlayer(Direction),
    TogglePause,
}

/// Something that happened during a tick, for renderers and audio to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    DotEaten,
    EnergizerEaten,
    FruitEaten(u32),
    GhostEaten { kind: GhostKind, points: u32 },
    /// Scared ghosts calmed down and eaten ones came back.
    ScareEnded,
    PlayerDied { lives_left: u32 },
    LevelCleared,
    GameOver { score: u32 },
}
