use strum_macros::AsRefStr;

use crate::constants::score::GHOST_BASE;

/// Lifecycle of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum GameState {
    #[default]
    Playing,
    /// Agents are frozen; only the pause toggle is accepted.
    Paused,
    /// Every collectible is gone; waiting for the next level to be built.
    LevelCleared,
    GameOver,
}

impl GameState {
    pub fn is_running(self) -> bool {
        self == GameState::Playing
    }
}

/// Score and lives of the ongoing session, plus the global scare.
///
/// Score and lives carry over into the next level; the scare does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    /// Levels cleared so far.
    pub level: u32,
    /// Ticks until frightened ghosts calm down; zero when no scare is active.
    pub scare_ticks: u32,
    /// Points for the next ghost eaten during the current scare.
    pub ghost_bonus: u32,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 0,
            scare_ticks: 0,
            ghost_bonus: GHOST_BASE,
        }
    }

    pub fn is_scared(&self) -> bool {
        self.scare_ticks > 0
    }

    /// Starts or restarts a scare, resetting the capture bonus.
    pub fn start_scare(&mut self, ticks: u32) {
        self.scare_ticks = ticks;
        self.ghost_bonus = GHOST_BASE;
    }

    /// Counts the scare down by one tick; true when it just ended.
    pub fn tick_scare(&mut self) -> bool {
        if self.scare_ticks == 0 {
            return false;
        }
        self.scare_ticks -= 1;
        self.scare_ticks == 0
    }

    /// Awards the capture bonus and doubles it for the next ghost.
    pub fn award_ghost(&mut self) -> u32 {
        let points = self.ghost_bonus;
        self.score += points;
        self.ghost_bonus = self.ghost_bonus.saturating_mul(2);
        points
    }

    /// Clears the per-level state, keeping score and lives.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.scare_ticks = 0;
        self.ghost_bonus = GHOST_BASE;
    }
}
