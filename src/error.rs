//! Centralized error types for the game.
//!
//! Layout problems are fatal configuration errors: they abort loading a level
//! and are surfaced to the caller. Expected empty results (no path, no score
//! file yet) are modelled with `Option`/empty collections instead.

use std::io;

use glam::IVec2;

use crate::entity::ghost::GhostKind;

/// Main error type for the game.
///
/// This is the primary error type that should be used in public APIs.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    #[error("Map parsing error: {0}")]
    MapParse(#[from] ParseError),

    #[error("Map error: {0}")]
    Map(#[from] MapError),

    #[error("Level error: {0}")]
    Level(#[from] LevelError),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Error type for turning level text into an integer grid.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Non-integer value {token:?} at row {row}, column {column}")]
    InvalidNumber { row: usize, column: usize, token: String },

    #[error("Value {value} at row {row}, column {column} uses bits outside the cell layout")]
    UnknownBits { row: usize, column: usize, value: u32 },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },

    #[error("Level contains no cells")]
    Empty,
}

/// Errors related to the structure of a maze.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MapError {
    #[error("Maze rows differ in length")]
    NotRectangular,

    #[error("Maze contains no cells")]
    Empty,

    #[error("Value {value} at {cell} uses bits outside the cell layout")]
    UnknownBits { cell: IVec2, value: u16 },

    #[error("Conflicting cell flags at {cell}: {flags}")]
    ConflictingFlags { cell: IVec2, flags: String },

    #[error("No pacman spawn point found")]
    MissingPacmanSpawn,

    #[error("No ghost box cell found to spawn ghosts in")]
    MissingGhostSpawn,

    #[error("Scatter goal for {0:?} not found")]
    MissingScatterGoal(GhostKind),

    #[error("Scatter goal for {kind:?} defined {count} times")]
    DuplicateScatterGoal { kind: GhostKind, count: usize },

    #[error("Cell {cell} is reachable by pacman but not from the {kind:?} spawn")]
    Unreachable { cell: IVec2, kind: GhostKind },
}

/// Errors related to locating level data.
#[derive(thiserror::Error, Debug)]
pub enum LevelError {
    #[error("Level not found: {0}")]
    NotFound(String),

    #[error("Level {name} is not valid UTF-8")]
    Encoding { name: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from persisting scores.
#[derive(thiserror::Error, Debug)]
pub enum ScoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Player name must be a single non-empty word, got {0:?}")]
    InvalidName(String),
}

/// Errors from loading runtime configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to extract configuration: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for game operations.
pub type GameResult<T> = Result<T, GameError>;
