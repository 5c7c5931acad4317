use std::time::{Duration, Instant};

use rand::prelude::*;
use thousands::Separable;
use tracing::{debug, error, info, trace, warn};

use crate::config::Config;
use crate::constants::LOOP_TIME;
use crate::error::GameResult;
use crate::events::GameCommand;
use crate::formatter;
use crate::game::{Game, GameOptions, GameState};
use crate::level;
use crate::scoreboard::{FileScoreStore, ScoreRecord};

/// Chance per tick that the attract-mode walker picks a new direction.
const WALKER_TURN_CHANCE: f64 = 0.05;

/// Headless attract-mode driver: runs a game at a fixed tick rate with a
/// random walker standing in for the player.
pub struct App {
    pub game: Game,
    walker: SmallRng,
    tick_budget: u64,
    ticks: u64,
    last_tick: Instant,
}

impl App {
    /// Loads the configured level and sets up the game and its scoreboard.
    ///
    /// # Errors
    ///
    /// Fails when the level cannot be found or is invalid.
    pub fn new(config: &Config) -> GameResult<Self> {
        info!(level = %config.level, "Loading level");
        let text = level::load_level_text(&config.level)?;
        let store = FileScoreStore::new(&config.scoreboard_path);
        let game = Game::load(&text, GameOptions::from(config), Box::new(store))?;

        let walker = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(1)),
            None => SmallRng::from_os_rng(),
        };

        Ok(App {
            game,
            walker,
            tick_budget: config.demo_ticks,
            ticks: 0,
            last_tick: Instant::now(),
        })
    }

    /// Executes a single tick and sleeps for whatever remains of the tick's time.
    ///
    /// Returns `false` once the game is over or the tick budget is spent.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();
        trace!(dt = ?self.last_tick.elapsed(), "Tick");
        self.last_tick = start;

        formatter::increment_tick();
        self.ticks += 1;

        self.steer();
        self.game.tick();
        for event in self.game.drain_events() {
            debug!(?event, "Game event");
        }

        match self.game.state() {
            GameState::GameOver => return false,
            GameState::LevelCleared => {
                if let Err(e) = self.game.next_level() {
                    error!(error = %e, "Could not build the next level");
                    return false;
                }
            }
            _ => {}
        }

        if self.ticks >= self.tick_budget {
            info!(ticks = self.ticks, "Tick budget spent");
            self.game.end();
            return false;
        }

        let elapsed = start.elapsed();
        if elapsed < LOOP_TIME {
            let time = LOOP_TIME.saturating_sub(elapsed);
            if time != Duration::ZERO {
                spin_sleep::sleep(time);
            }
        }

        true
    }

    /// Occasionally turns the player towards a random open direction.
    fn steer(&mut self) {
        let mover = &self.game.pacman().mover;
        if mover.is_moving() && !self.walker.random_bool(WALKER_TURN_CHANCE) {
            return;
        }

        let open = self.game.maze().open_directions(mover.cell());
        if let Some(direction) = open.choose(&mut self.walker).copied() {
            self.game.handle_command(GameCommand::MovePlayer(direction));
        }
    }

    /// Best scores recorded so far.
    pub fn top_scores(&self, n: usize) -> Vec<ScoreRecord> {
        self.game.score_store().top(n).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read scoreboard");
            Vec::new()
        })
    }

    /// Logs the final result and the scoreboard.
    pub fn report(&self) {
        info!(
            score = %self.game.score().separate_with_commas(),
            lives = self.game.lives(),
            level = self.game.session().level,
            "Final result"
        );
        for (rank, record) in self.top_scores(5).iter().enumerate() {
            info!(
                rank = rank + 1,
                name = %record.name,
                score = %record.score.separate_with_commas(),
                "High score"
            );
        }
    }
}
