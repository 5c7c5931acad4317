use glam::IVec2;
use isopac::config::Tuning;
use isopac::entity::ghost::{ambush_target, flank_target, flee_direction, Ghost, GhostKind, GhostMode, Pursuit};
use isopac::events::GameCommand;
use isopac::map::direction::Direction;
use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use speculoos::prelude::*;

mod common;

use common::{fast_tuning, game, game_with, maze, options, LOOP_MAZE, ONE_DOT_MAZE};

fn pursuit(tuning: &Tuning, player: IVec2, facing: Direction) -> Pursuit<'_> {
    Pursuit {
        player_cell: player,
        player_direction: facing,
        player_command: facing,
        chaser_cell: None,
        tuning,
    }
}

#[test]
fn test_ambusher_turns_where_the_player_must() {
    let maze = maze(&LOOP_MAZE);
    let tuning = Tuning::default();
    let mut rng = SmallRng::seed_from_u64(3);

    // Two cells south, then the corner at (1, 5) only opens east.
    let context = pursuit(&tuning, IVec2::new(1, 3), Direction::South);
    assert_eq!(ambush_target(&maze, &context, &mut rng), IVec2::new(2, 5));

    let context = pursuit(&tuning, IVec2::new(1, 1), Direction::East);
    assert_eq!(ambush_target(&maze, &context, &mut rng), IVec2::new(4, 1));
}

#[test]
fn test_flanker_mirrors_through_pivot() {
    let maze = maze(&LOOP_MAZE);
    assert_eq!(flank_target(&maze, IVec2::new(4, 1), IVec2::new(2, 1)), IVec2::new(6, 1));
    assert_eq!(flank_target(&maze, IVec2::new(1, 3), IVec2::new(1, 1)), IVec2::new(1, 5));

    // (4, 9) is below the maze; the closest open cell is straight above the player.
    assert_eq!(flank_target(&maze, IVec2::new(4, 5), IVec2::new(4, 1)), IVec2::new(4, 5));
}

#[test]
fn test_goal_depends_on_kind_and_mode() {
    let maze = maze(&LOOP_MAZE);
    let tuning = Tuning {
        ticks_per_second: 1,
        chase_seconds: 1,
        ..Tuning::default()
    };
    let mut rng = SmallRng::seed_from_u64(0);
    let context = pursuit(&tuning, IVec2::new(1, 1), Direction::East);

    let mut chaser = Ghost::new(GhostKind::Chaser, &maze, &tuning);
    assert_eq!(chaser.goal_cell(&maze, &context, &mut rng), Some(IVec2::new(1, 1)));

    chaser.update_mode(&maze, &tuning);
    assert_eq!(chaser.mode(), GhostMode::Scatter);
    assert_eq!(
        chaser.goal_cell(&maze, &context, &mut rng),
        Some(maze.scatter_goal(GhostKind::Chaser))
    );

    chaser.frighten();
    assert_eq!(chaser.goal_cell(&maze, &context, &mut rng), None);
}

#[test]
fn test_opportunist_keeps_its_distance() {
    let maze = maze(&LOOP_MAZE);
    let tuning = Tuning::default();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ghost = Ghost::new(GhostKind::Opportunist, &maze, &tuning);
    ghost.mover.reset(IVec2::new(7, 5));

    let far = pursuit(&tuning, IVec2::new(1, 1), Direction::East);
    assert_eq!(ghost.goal_cell(&maze, &far, &mut rng), Some(IVec2::new(1, 1)));

    let near = pursuit(&tuning, IVec2::new(6, 5), Direction::East);
    assert_eq!(ghost.goal_cell(&maze, &near, &mut rng), Some(IVec2::new(7, 5)));
}

#[test]
fn test_chaser_takes_the_shorter_way_round() {
    let maze = maze(&LOOP_MAZE);
    let tuning = fast_tuning();
    let mut rng = SmallRng::seed_from_u64(0);
    let mut ghost = Ghost::new(GhostKind::Chaser, &maze, &tuning);
    ghost.mover.reset(IVec2::new(7, 1));

    let context = pursuit(&tuning, IVec2::new(1, 1), Direction::East);
    ghost.advance(&maze, &context, &mut rng);

    assert_eq!(ghost.mover.direction(), Direction::West);
    assert_eq!(ghost.mover.goal(), IVec2::new(6, 1));
}

#[test]
fn test_fleeing_never_reverses_while_another_way_is_open() {
    let loop_maze = maze(&LOOP_MAZE);
    let mut rng = SmallRng::seed_from_u64(5);

    // South leads towards the threat, but west would be a reversal.
    let dir = flee_direction(&loop_maze, IVec2::new(7, 1), Direction::East, IVec2::new(7, 3), &mut rng);
    assert_eq!(dir, Some(Direction::South));

    // A dead end leaves nothing but the way back.
    let dead_end = maze(&ONE_DOT_MAZE);
    let dir = flee_direction(&dead_end, IVec2::new(3, 1), Direction::East, IVec2::new(1, 1), &mut rng);
    assert_eq!(dir, Some(Direction::West));
}

#[test]
fn test_timers_run_per_kind() {
    let mut options = options(11);
    options.tuning = Tuning {
        chase_seconds: 1,
        opportunist_chase_seconds: 2,
        ..fast_tuning()
    };
    let mut game = game_with(&LOOP_MAZE, options);

    for _ in 0..10 {
        game.tick();
    }

    let mode = |kind| game.ghost(kind).map(|ghost| ghost.mode());
    assert_eq!(mode(GhostKind::Chaser), Some(GhostMode::Scatter));
    assert_eq!(mode(GhostKind::Ambusher), Some(GhostMode::Scatter));
    assert_eq!(mode(GhostKind::Flanker), Some(GhostMode::Scatter));
    assert_eq!(mode(GhostKind::Opportunist), Some(GhostMode::Chase));
}

#[test]
fn test_energizer_frightens_every_ghost() {
    let mut game = game(&LOOP_MAZE);
    game.handle_command(GameCommand::MovePlayer(Direction::East));
    for _ in 0..4 {
        game.tick();
    }

    assert_that(&game.session().is_scared()).is_true();
    assert_that(&game.ghosts().len()).is_equal_to(4);
    for ghost in game.ghosts() {
        assert_eq!(ghost.mode(), GhostMode::Frightened, "{:?}", ghost.kind);
    }
}
