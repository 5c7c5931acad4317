//! This module contains the main game logic and state.
//!
//! One call to [`Game::tick`] advances the player, then every ghost in kind
//! order, then resolves the scare timer and collisions.

use glam::{IVec2, Vec2};
use rand::prelude::*;
use smallvec::SmallVec;
use strum::EnumCount;
use tracing::{debug, error, info};

use crate::config::{Config, Tuning};
use crate::constants::{score, STARTING_LIVES};
use crate::entity::ghost::{Ghost, GhostKind, GhostMode, Pursuit};
use crate::entity::pacman::Pacman;
use crate::entity::projection::{to_screen, Segment};
use crate::events::{GameCommand, GameEvent};
use crate::error::{GameError, GameResult};
use crate::map::builder::{Collectible, Maze};
use crate::map::direction::Direction;
use crate::map::parser::LevelParser;
use crate::scoreboard::ScoreStore;

pub mod state;

pub use state::{GameState, Session};

/// Settings a game is started with.
#[derive(Debug, Clone)]
pub struct GameOptions {
    pub player_name: String,
    pub lives: u32,
    /// Seed for every random decision; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub tuning: Tuning,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            player_name: "player".into(),
            lives: STARTING_LIVES,
            seed: None,
            tuning: Tuning::default(),
        }
    }
}

impl From<&Config> for GameOptions {
    fn from(config: &Config) -> Self {
        Self {
            player_name: config.player_name.clone(),
            lives: config.lives,
            seed: config.seed,
            tuning: config.tuning.clone(),
        }
    }
}

/// Which agent an [`AgentView`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Pacman,
    Ghost(GhostKind),
}

/// Everything a renderer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub kind: AgentKind,
    pub cell: IVec2,
    /// Interpolated position in grid space.
    pub position: Vec2,
    /// Isometric projection of `position`.
    pub screen_position: Vec2,
    pub direction: Direction,
    /// Ghost mode; `None` for the player.
    pub mode: Option<GhostMode>,
}

impl AgentView {
    fn footprint(&self) -> Segment {
        Segment::footprint(self.screen_position, self.direction)
    }
}

/// A running game: one level's maze, its agents and the session around them.
pub struct Game {
    /// Kept to rebuild the maze for the next level.
    grid: Vec<Vec<u16>>,
    maze: Maze,
    pacman: Pacman,
    /// Ghosts in play, in kind order. Eaten ghosts are absent until the scare ends.
    ghosts: SmallVec<[Ghost; GhostKind::COUNT]>,
    session: Session,
    state: GameState,
    tuning: Tuning,
    player_name: String,
    store: Box<dyn ScoreStore>,
    rng: SmallRng,
    events: Vec<GameEvent>,
    score_saved: bool,
    ticks: u64,
}

impl Game {
    /// Parses level text and starts a game on it.
    ///
    /// # Errors
    ///
    /// Fails when the level does not parse or its layout is invalid.
    pub fn load(text: &str, options: GameOptions, store: Box<dyn ScoreStore>) -> GameResult<Game> {
        let grid = LevelParser::parse_grid(text)?;
        Game::new(grid, options, store)
    }

    /// Starts a game on a grid of bit-packed cell values.
    ///
    /// # Errors
    ///
    /// Fails when the layout is invalid or the options are unusable.
    pub fn new(grid: Vec<Vec<u16>>, options: GameOptions, store: Box<dyn ScoreStore>) -> GameResult<Game> {
        if options.lives == 0 {
            return Err(GameError::InvalidState("a game needs at least one life".into()));
        }

        let maze = Maze::from_grid(&grid)?;
        let mut rng = match options.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let pacman = spawn_pacman(&maze, &options.tuning, &mut rng);
        let ghosts = spawn_ghosts(&maze, &options.tuning);

        info!(
            player = %options.player_name,
            lives = options.lives,
            collectibles = maze.remaining_collectibles(),
            "Game started"
        );

        Ok(Game {
            grid,
            maze,
            pacman,
            ghosts,
            session: Session::new(options.lives),
            state: GameState::Playing,
            tuning: options.tuning,
            player_name: options.player_name,
            store,
            rng,
            events: Vec::new(),
            score_saved: false,
            ticks: 0,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn pacman(&self) -> &Pacman {
        &self.pacman
    }

    pub fn pacman_mut(&mut self) -> &mut Pacman {
        &mut self.pacman
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    pub fn ghosts_mut(&mut self) -> &mut [Ghost] {
        &mut self.ghosts
    }

    pub fn ghost(&self, kind: GhostKind) -> Option<&Ghost> {
        self.ghosts.iter().find(|ghost| ghost.kind == kind)
    }

    /// Ticks simulated while playing.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn score_store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Routes a front-end command into the game.
    ///
    /// While paused only the pause toggle is honoured.
    pub fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::TogglePause => {
                self.state = match self.state {
                    GameState::Playing => GameState::Paused,
                    GameState::Paused => GameState::Playing,
                    other => other,
                };
                debug!(state = self.state.as_ref(), "Pause toggled");
            }
            GameCommand::MovePlayer(direction) => {
                if self.state.is_running() {
                    self.pacman.command(direction, &self.maze);
                }
            }
        }
    }

    /// Advances the simulation by one tick. Does nothing unless playing.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.ticks += 1;

        self.pacman.advance(&self.maze);
        let scare_started = self.collect_pickup();
        if !self.state.is_running() {
            return;
        }

        let pursuit = Pursuit {
            player_cell: self.pacman.mover.cell(),
            player_direction: self.pacman.mover.direction(),
            player_command: self.pacman.commanded_direction(),
            chaser_cell: self.ghost(GhostKind::Chaser).map(|ghost| ghost.mover.cell()),
            tuning: &self.tuning,
        };
        for ghost in self.ghosts.iter_mut() {
            ghost.update_mode(&self.maze, &self.tuning);
            ghost.advance(&self.maze, &pursuit, &mut self.rng);
        }

        // A scare started this tick keeps its full length.
        if !scare_started && self.session.tick_scare() {
            self.end_scare();
        }

        self.resolve_collisions();
    }

    /// Picks up whatever lies on the player's cell. Returns true when an energizer started a scare.
    fn collect_pickup(&mut self) -> bool {
        let Some(item) = self.maze.collect(self.pacman.mover.cell()) else {
            return false;
        };

        match item {
            Collectible::Dot => {
                self.session.score += score::DOT;
                self.events.push(GameEvent::DotEaten);
            }
            Collectible::Energizer => {
                self.session.score += score::ENERGIZER;
                self.events.push(GameEvent::EnergizerEaten);
                self.start_scare();
            }
            Collectible::Fruit => {
                let points = score::FRUIT_CHOICES
                    .choose(&mut self.rng)
                    .copied()
                    .unwrap_or(score::FRUIT_CHOICES[0]);
                self.session.score += points;
                self.events.push(GameEvent::FruitEaten(points));
            }
        }

        if self.maze.is_cleared() {
            info!(score = self.session.score, level = self.session.level, "Level cleared");
            self.state = GameState::LevelCleared;
            self.events.push(GameEvent::LevelCleared);
        }

        item == Collectible::Energizer
    }

    fn start_scare(&mut self) {
        self.session.start_scare(self.tuning.scare_ticks());
        for ghost in self.ghosts.iter_mut() {
            ghost.frighten();
        }
        debug!(ticks = self.session.scare_ticks, "Ghosts frightened");
    }

    /// Calms every ghost and brings eaten ones back at their spawn.
    fn end_scare(&mut self) {
        for ghost in self.ghosts.iter_mut() {
            ghost.calm();
        }
        for kind in GhostKind::KINDS {
            if self.ghost(kind).is_none() {
                debug!(ghost = kind.as_ref(), "Ghost returns");
                self.ghosts.push(Ghost::new(kind, &self.maze, &self.tuning));
            }
        }
        self.ghosts.sort_by_key(|ghost| ghost.kind.as_usize());
        self.events.push(GameEvent::ScareEnded);
    }

    fn resolve_collisions(&mut self) {
        let player = self.pacman_view().footprint();

        let mut eaten: SmallVec<[GhostKind; GhostKind::COUNT]> = SmallVec::new();
        let mut deadly = false;
        for ghost in &self.ghosts {
            if !ghost_view(ghost).footprint().intersects(&player) {
                continue;
            }
            if ghost.is_frightened() {
                eaten.push(ghost.kind);
            } else {
                deadly = true;
            }
        }

        self.ghosts.retain(|ghost| !eaten.contains(&ghost.kind));
        for kind in eaten {
            let points = self.session.award_ghost();
            debug!(ghost = kind.as_ref(), points, "Ghost eaten");
            self.events.push(GameEvent::GhostEaten { kind, points });
        }

        if deadly {
            self.lose_life();
        }
    }

    /// Costs the player a life, respawning it or ending the game.
    fn lose_life(&mut self) {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerDied {
            lives_left: self.session.lives,
        });

        if self.session.lives == 0 {
            self.game_over();
            return;
        }

        info!(lives = self.session.lives, "Player died");
        if let Some(spawn) = self.maze.pacman_spawns().choose(&mut self.rng) {
            self.pacman.respawn(*spawn);
        }
    }

    fn game_over(&mut self) {
        info!(score = self.session.score, "Game over");
        self.state = GameState::GameOver;
        self.events.push(GameEvent::GameOver {
            score: self.session.score,
        });

        if !self.score_saved {
            self.score_saved = true;
            if let Err(e) = self.store.save_result(&self.player_name, self.session.score) {
                error!(error = %e, "Failed to save score");
            }
        }
    }

    /// Ends the game early, saving the score like a regular game over.
    pub fn end(&mut self) {
        if self.state != GameState::GameOver {
            self.game_over();
        }
    }

    /// Builds the next level from the same layout, keeping score and lives.
    ///
    /// # Errors
    ///
    /// Fails unless the current level has been cleared.
    pub fn next_level(&mut self) -> GameResult<()> {
        if self.state != GameState::LevelCleared {
            return Err(GameError::InvalidState(format!(
                "cannot start the next level while {}",
                self.state.as_ref()
            )));
        }

        self.maze = Maze::from_grid(&self.grid)?;
        self.pacman = spawn_pacman(&self.maze, &self.tuning, &mut self.rng);
        self.ghosts = spawn_ghosts(&self.maze, &self.tuning);
        self.session.advance_level();
        self.state = GameState::Playing;
        info!(level = self.session.level, score = self.session.score, "Next level");
        Ok(())
    }

    /// Renderer view of every agent in play, player first.
    pub fn agents(&self) -> Vec<AgentView> {
        std::iter::once(self.pacman_view())
            .chain(self.ghosts.iter().map(ghost_view))
            .collect()
    }

    /// Screen-space anchor for the camera: the player's projected position.
    pub fn camera(&self) -> Vec2 {
        self.pacman_view().screen_position
    }

    /// Returns and clears the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn pacman_view(&self) -> AgentView {
        let mover = &self.pacman.mover;
        let position = mover.grid_position();
        AgentView {
            kind: AgentKind::Pacman,
            cell: mover.cell(),
            position,
            screen_position: to_screen(position),
            direction: mover.direction(),
            mode: None,
        }
    }
}

fn ghost_view(ghost: &Ghost) -> AgentView {
    let position = ghost.mover.grid_position();
    AgentView {
        kind: AgentKind::Ghost(ghost.kind),
        cell: ghost.mover.cell(),
        position,
        screen_position: to_screen(position),
        direction: ghost.mover.direction(),
        mode: Some(ghost.mode()),
    }
}

fn spawn_pacman(maze: &Maze, tuning: &Tuning, rng: &mut SmallRng) -> Pacman {
    // The maze guarantees at least one spawn.
    let spawn = maze.pacman_spawns().choose(rng).copied().unwrap_or_default();
    Pacman::new(spawn, tuning.pacman_frames_per_cell())
}

fn spawn_ghosts(maze: &Maze, tuning: &Tuning) -> SmallVec<[Ghost; GhostKind::COUNT]> {
    GhostKind::KINDS
        .into_iter()
        .map(|kind| Ghost::new(kind, maze, tuning))
        .collect()
}
