//! Ghost agents.
//!
//! Each ghost kind picks a goal cell from the player's whereabouts and walks
//! towards it along a breadth-first shortest path. A per-ghost timer switches
//! between chasing and scattering to a home corner; an energizer overrides
//! both with a frightened mode in which ghosts run away from the player.

use glam::IVec2;
use rand::prelude::*;
use smallvec::SmallVec;
use strum::EnumCount;
use strum_macros::{AsRefStr, EnumCount};
use tracing::debug;

use crate::config::Tuning;
use crate::entity::movement::Mover;
use crate::entity::pathfinding;
use crate::map::builder::Maze;
use crate::map::direction::Direction;

/// The four ghost personalities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumCount)]
#[repr(usize)]
#[strum(serialize_all = "lowercase")]
pub enum GhostKind {
    /// Heads straight for the player.
    Chaser,
    /// Aims a few cells ahead of the player.
    Ambusher,
    /// Mirrors the player's position through the chaser.
    Flanker,
    /// Chases from afar, retreats when close.
    Opportunist,
}

impl GhostKind {
    /// Every kind, in the stable order ghosts are updated in.
    pub const KINDS: [GhostKind; GhostKind::COUNT] = [
        GhostKind::Chaser,
        GhostKind::Ambusher,
        GhostKind::Flanker,
        GhostKind::Opportunist,
    ];

    pub const fn as_usize(self) -> usize {
        self as usize
    }
}

/// Behavioural mode of a ghost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostMode {
    #[default]
    Chase,
    Scatter,
    Frightened,
}

/// What ghosts know about the player when choosing a goal.
#[derive(Debug, Clone, Copy)]
pub struct Pursuit<'a> {
    pub player_cell: IVec2,
    /// The player's facing.
    pub player_direction: Direction,
    /// The direction the player last asked for.
    pub player_command: Direction,
    /// Cell of the chaser, if one is in play.
    pub chaser_cell: Option<IVec2>,
    pub tuning: &'a Tuning,
}

/// Manhattan distance between two cells.
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

#[derive(Debug, Clone)]
pub struct Ghost {
    pub kind: GhostKind,
    pub mover: Mover,
    mode: GhostMode,
    /// Ticks spent in the current timed mode.
    elapsed: u32,
    /// The timed mode and its elapsed ticks, saved while frightened.
    suspended: Option<(GhostMode, u32)>,
}

impl Ghost {
    /// Creates a ghost on its spawn cell, in chase mode.
    pub fn new(kind: GhostKind, maze: &Maze, tuning: &Tuning) -> Self {
        Self {
            kind,
            mover: Mover::new(maze.ghost_spawn(kind), tuning.ghost_frames_per_cell()),
            mode: GhostMode::Chase,
            elapsed: 0,
            suspended: None,
        }
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn is_frightened(&self) -> bool {
        self.mode == GhostMode::Frightened
    }

    /// Runs the chase/scatter timer for one tick.
    ///
    /// Scattering also ends as soon as the ghost stands on its scatter goal.
    /// The timer does not run while frightened.
    pub fn update_mode(&mut self, maze: &Maze, tuning: &Tuning) {
        let next = match self.mode {
            GhostMode::Frightened => return,
            GhostMode::Chase => {
                self.elapsed += 1;
                (self.elapsed >= tuning.chase_ticks(self.kind)).then_some(GhostMode::Scatter)
            }
            GhostMode::Scatter => {
                self.elapsed += 1;
                let home = self.mover.cell() == maze.scatter_goal(self.kind);
                (home || self.elapsed >= tuning.scatter_ticks()).then_some(GhostMode::Chase)
            }
        };

        if let Some(mode) = next {
            debug!(ghost = self.kind.as_ref(), from = self.mode.as_ref(), to = mode.as_ref(), "Mode change");
            self.mode = mode;
            self.elapsed = 0;
        }
    }

    /// Enters frightened mode, remembering the timed mode to return to.
    pub fn frighten(&mut self) {
        if !self.is_frightened() {
            self.suspended = Some((self.mode, self.elapsed));
            self.mode = GhostMode::Frightened;
        }
    }

    /// Leaves frightened mode, restoring the timed mode exactly where it was.
    pub fn calm(&mut self) {
        if let Some((mode, elapsed)) = self.suspended.take() {
            self.mode = mode;
            self.elapsed = elapsed;
        }
    }

    /// The cell this ghost is heading for, or `None` while fleeing.
    pub fn goal_cell<R: Rng>(&self, maze: &Maze, pursuit: &Pursuit, rng: &mut R) -> Option<IVec2> {
        goal_cell(self.kind, self.mode, maze, self.mover.cell(), pursuit, rng)
    }

    /// Advances the ghost by one tick.
    pub fn advance<R: Rng>(&mut self, maze: &Maze, pursuit: &Pursuit, rng: &mut R) {
        let (kind, mode) = (self.kind, self.mode);
        self.mover.advance(maze, |mover| {
            let cell = mover.cell();
            match goal_cell(kind, mode, maze, cell, pursuit, rng) {
                Some(goal) => pathfinding::first_step(maze, cell, goal),
                None => flee_direction(maze, cell, mover.direction(), pursuit.player_cell, rng),
            }
        });
    }
}

fn goal_cell<R: Rng>(
    kind: GhostKind,
    mode: GhostMode,
    maze: &Maze,
    cell: IVec2,
    pursuit: &Pursuit,
    rng: &mut R,
) -> Option<IVec2> {
    let goal = match mode {
        GhostMode::Frightened => return None,
        GhostMode::Scatter => maze.scatter_goal(kind),
        GhostMode::Chase => match kind {
            GhostKind::Chaser => pursuit.player_cell,
            GhostKind::Ambusher => ambush_target(maze, pursuit, rng),
            GhostKind::Flanker => flank_target(maze, pursuit.player_cell, pursuit.chaser_cell.unwrap_or(cell)),
            GhostKind::Opportunist => {
                if manhattan(cell, pursuit.player_cell) > pursuit.tuning.opportunist_threshold {
                    pursuit.player_cell
                } else {
                    maze.scatter_goal(kind)
                }
            }
        },
    };
    Some(goal)
}

/// Walks a few steps ahead of the player the way the player would likely go.
///
/// At every step the commanded direction is taken when legal, then straight
/// ahead, then a random side turn, then a reversal.
pub fn ambush_target<R: Rng>(maze: &Maze, pursuit: &Pursuit, rng: &mut R) -> IVec2 {
    let mut cell = pursuit.player_cell;
    let mut facing = pursuit.player_direction;

    for _ in 0..pursuit.tuning.ambush_lookahead {
        let step = if maze.can_go(cell, pursuit.player_command) {
            pursuit.player_command
        } else if maze.can_go(cell, facing) {
            facing
        } else {
            let sides: SmallVec<[Direction; 2]> = [facing.left(), facing.right()]
                .into_iter()
                .filter(|dir| maze.can_go(cell, *dir))
                .collect();
            match sides.choose(rng) {
                Some(side) => *side,
                None if maze.can_go(cell, facing.opposite()) => facing.opposite(),
                None => break,
            }
        };
        cell = maze.wrap(cell + step.as_ivec2());
        facing = step;
    }

    cell
}

/// Reflects the player's cell through a pivot.
///
/// When the reflection lands outside the maze or in a wall, the nearest open
/// cell by Manhattan distance is used instead; ties go to the first cell in
/// row-major order.
pub fn flank_target(maze: &Maze, player: IVec2, pivot: IVec2) -> IVec2 {
    let reflected = player + (player - pivot);
    if !maze.is_wall(reflected) {
        return reflected;
    }

    maze.positions()
        .filter(|pos| !maze.is_wall(*pos))
        .min_by_key(|pos| manhattan(*pos, reflected))
        .unwrap_or(player)
}

/// Picks the legal direction leading furthest away from `threat`.
///
/// Reversing is only considered when nothing else is open.
pub fn flee_direction<R: Rng>(
    maze: &Maze,
    cell: IVec2,
    facing: Direction,
    threat: IVec2,
    rng: &mut R,
) -> Option<Direction> {
    let open = maze.open_directions(cell);
    let forward: SmallVec<[Direction; Direction::COUNT]> = open.iter().copied().filter(|dir| *dir != facing.opposite()).collect();
    let candidates = if forward.is_empty() { open } else { forward };

    let score = |dir: &Direction| manhattan(cell + dir.as_ivec2(), threat);
    let best = candidates.iter().map(score).max()?;
    let ties: SmallVec<[Direction; Direction::COUNT]> = candidates.into_iter().filter(|dir| score(dir) == best).collect();

    ties.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::bits::*;

    const W: u16 = WALL;
    const O: u16 = 0;
    const P: u16 = PACMAN_SPAWN;
    const B: u16 = GHOST_BOX;

    /// A 7x7 arena: walls around an open 5x5 floor.
    fn arena() -> Maze {
        Maze::from_grid(&[
            vec![W, W, W, W, W, W, W],
            vec![W, P, O, O, O, CHASER_SCATTER | AMBUSHER_SCATTER, W],
            vec![W, O, O, O, O, O, W],
            vec![W, O, O, O, O, O, W],
            vec![W, O, O, O, O, O, W],
            vec![W, FLANKER_SCATTER | OPPORTUNIST_SCATTER, O, O, O, B, W],
            vec![W, W, W, W, W, W, W],
        ])
        .unwrap()
    }

    fn pursuit(tuning: &Tuning, player: IVec2) -> Pursuit<'_> {
        Pursuit {
            player_cell: player,
            player_direction: Direction::East,
            player_command: Direction::East,
            chaser_cell: None,
            tuning,
        }
    }

    #[test]
    fn test_kinds_cover_every_variant() {
        assert_eq!(GhostKind::KINDS.len(), GhostKind::COUNT);
        for (i, kind) in GhostKind::KINDS.iter().enumerate() {
            assert_eq!(kind.as_usize(), i);
        }
    }

    #[test]
    fn test_chase_scatter_cycle() {
        let maze = arena();
        let tuning = Tuning {
            ticks_per_second: 1,
            chase_seconds: 3,
            scatter_seconds: 2,
            ..Tuning::default()
        };
        let mut ghost = Ghost::new(GhostKind::Chaser, &maze, &tuning);

        for _ in 0..2 {
            ghost.update_mode(&maze, &tuning);
        }
        assert_eq!(ghost.mode(), GhostMode::Chase);
        ghost.update_mode(&maze, &tuning);
        assert_eq!(ghost.mode(), GhostMode::Scatter);
        ghost.update_mode(&maze, &tuning);
        ghost.update_mode(&maze, &tuning);
        assert_eq!(ghost.mode(), GhostMode::Chase);
    }

    #[test]
    fn test_scatter_ends_at_goal() {
        let maze = arena();
        let tuning = Tuning {
            ticks_per_second: 1,
            chase_seconds: 1,
            ..Tuning::default()
        };
        let mut ghost = Ghost::new(GhostKind::Chaser, &maze, &tuning);
        ghost.update_mode(&maze, &tuning);
        assert_eq!(ghost.mode(), GhostMode::Scatter);

        ghost.mover.reset(maze.scatter_goal(GhostKind::Chaser));
        ghost.update_mode(&maze, &tuning);
        assert_eq!(ghost.mode(), GhostMode::Chase);
    }

    #[test]
    fn test_frighten_restores_timed_mode() {
        let maze = arena();
        let tuning = Tuning {
            ticks_per_second: 1,
            chase_seconds: 3,
            ..Tuning::default()
        };
        let mut ghost = Ghost::new(GhostKind::Ambusher, &maze, &tuning);
        ghost.update_mode(&maze, &tuning);
        ghost.update_mode(&maze, &tuning);

        ghost.frighten();
        for _ in 0..10 {
            ghost.update_mode(&maze, &tuning);
        }
        assert!(ghost.is_frightened());

        ghost.calm();
        assert_eq!(ghost.mode(), GhostMode::Chase);
        ghost.update_mode(&maze, &tuning);
        assert_eq!(ghost.mode(), GhostMode::Scatter);
    }

    #[test]
    fn test_flank_target_reflects() {
        let maze = arena();
        let target = flank_target(&maze, IVec2::new(3, 3), IVec2::new(2, 3));
        assert_eq!(target, IVec2::new(4, 3));
    }

    #[test]
    fn test_flank_target_falls_back_to_nearest_open_cell() {
        let maze = arena();
        // Reflection lands on (6, 3), a wall; (5, 3) is the only cell at distance 1.
        let target = flank_target(&maze, IVec2::new(4, 3), IVec2::new(2, 3));
        assert_eq!(target, IVec2::new(5, 3));

        // Reflection (7, 7) is out of bounds; (5, 5) is at distance 4 and nothing is closer.
        let target = flank_target(&maze, IVec2::new(4, 4), IVec2::new(1, 1));
        assert_eq!(target, IVec2::new(5, 5));
    }

    #[test]
    fn test_opportunist_threshold() {
        let maze = arena();
        let tuning = Tuning {
            opportunist_threshold: 3,
            ..Tuning::default()
        };
        let mut rng = SmallRng::seed_from_u64(0);
        let mut ghost = Ghost::new(GhostKind::Opportunist, &maze, &tuning);
        ghost.mover.reset(IVec2::new(5, 5));

        let far = pursuit(&tuning, IVec2::new(1, 1));
        assert_eq!(ghost.goal_cell(&maze, &far, &mut rng), Some(IVec2::new(1, 1)));

        let near = pursuit(&tuning, IVec2::new(4, 4));
        assert_eq!(
            ghost.goal_cell(&maze, &near, &mut rng),
            Some(maze.scatter_goal(GhostKind::Opportunist))
        );
    }

    #[test]
    fn test_ambush_target_follows_command() {
        let maze = arena();
        let tuning = Tuning::default();
        let mut rng = SmallRng::seed_from_u64(0);
        let mut context = pursuit(&tuning, IVec2::new(1, 3));
        context.player_command = Direction::South;
        context.player_direction = Direction::East;

        // South twice, then the bottom wall leaves east as the only side turn.
        let target = ambush_target(&maze, &context, &mut rng);
        assert_eq!(target, IVec2::new(2, 5));
    }

    #[test]
    fn test_frightened_ghost_flees() {
        let maze = arena();
        let mut rng = SmallRng::seed_from_u64(1);
        let dir = flee_direction(&maze, IVec2::new(1, 3), Direction::North, IVec2::new(2, 4), &mut rng);
        assert_eq!(dir, Some(Direction::North));
    }
}
