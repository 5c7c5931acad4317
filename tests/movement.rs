use glam::{IVec2, Vec2};
use isopac::config::Tuning;
use isopac::entity::movement::{Mover, Position};
use isopac::entity::pacman::Pacman;
use isopac::entity::projection::to_screen;
use isopac::level;
use isopac::map::builder::Maze;
use isopac::map::direction::Direction;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

use common::{maze, LOOP_MAZE};

fn classic() -> Maze {
    Maze::load(&level::load_level_text("classic").unwrap()).unwrap()
}

#[test]
fn test_player_crosses_a_cell_in_frames_per_cell_ticks() {
    let maze = classic();
    let tuning = Tuning::default();
    let spawn = maze.pacman_spawns()[0];
    let mut pacman = Pacman::new(spawn, tuning.pacman_frames_per_cell());
    pacman.command(Direction::West, &maze);

    for _ in 0..23 {
        pacman.advance(&maze);
        assert_that(&pacman.mover.position().is_at_cell()).is_false();
    }
    pacman.advance(&maze);

    assert_eq!(pacman.mover.position(), Position::AtCell(spawn + IVec2::NEG_X));
    assert_that(&pacman.mover.progress()).is_equal_to(0.0);
}

#[test]
fn test_each_cell_takes_the_same_time() {
    let maze = maze(&LOOP_MAZE);
    let mut mover = Mover::new(IVec2::new(1, 1), 3.0);

    let mut arrivals = Vec::new();
    for tick in 1..=15 {
        mover.advance(&maze, |_| Some(Direction::East));
        if mover.position().is_at_cell() {
            arrivals.push((tick, mover.cell()));
        }
    }

    assert_eq!(
        arrivals,
        vec![
            (3, IVec2::new(2, 1)),
            (6, IVec2::new(3, 1)),
            (9, IVec2::new(4, 1)),
            (12, IVec2::new(5, 1)),
            (15, IVec2::new(6, 1)),
        ]
    );
}

#[test]
fn test_position_is_interpolated() {
    let maze = maze(&LOOP_MAZE);
    let mut mover = Mover::new(IVec2::new(1, 1), 4.0);
    mover.advance(&maze, |_| Some(Direction::East));
    mover.advance(&maze, |_| Some(Direction::East));

    assert_eq!(mover.grid_position(), Vec2::new(1.5, 1.0));
    assert_eq!(to_screen(mover.grid_position()), Vec2::new(48.0, 120.0));
}

#[test]
fn test_reversal_preserves_position_at_every_progress() {
    let maze = maze(&LOOP_MAZE);
    for ticks in 1..6 {
        let mut mover = Mover::new(IVec2::new(3, 1), 6.0);
        for _ in 0..ticks {
            mover.advance(&maze, |_| Some(Direction::East));
        }
        let before = mover.grid_position();
        let progress = mover.progress();

        mover.reverse(&maze);

        assert_that(&(mover.grid_position() - before).length()).is_less_than(1e-5);
        assert_eq!(mover.progress(), 6.0 - progress);
        assert_eq!(mover.direction(), Direction::West);
        assert_eq!(mover.cell(), IVec2::new(4, 1));
        assert_eq!(mover.goal(), IVec2::new(3, 1));
    }
}

#[test]
fn test_reversed_mover_returns_to_its_start() {
    let maze = maze(&LOOP_MAZE);
    let mut mover = Mover::new(IVec2::new(3, 1), 4.0);
    mover.advance(&maze, |_| Some(Direction::East));
    mover.reverse(&maze);

    mover.advance(&maze, |_| None);
    assert_eq!(mover.position(), Position::AtCell(IVec2::new(3, 1)));
}

#[test]
fn test_policy_only_consulted_at_turnable_cells() {
    let maze = maze(&LOOP_MAZE);
    // (1, 2) to (1, 4) is a straight corridor.
    let mut mover = Mover::new(IVec2::new(1, 2), 1.0);
    mover.advance(&maze, |_| Some(Direction::South));

    let mut asked = 0;
    mover.advance(&maze, |_| {
        asked += 1;
        Some(Direction::North)
    });

    assert_that(&asked).is_equal_to(0);
    assert_eq!(mover.cell(), IVec2::new(1, 4));
}

#[test]
fn test_none_keeps_previous_direction() {
    let maze = maze(&LOOP_MAZE);
    let mut mover = Mover::new(IVec2::new(1, 1), 1.0);
    mover.advance(&maze, |_| Some(Direction::East));
    // Straight through (2, 1) and (3, 1), then the junction at (4, 1) gets no answer.
    for _ in 0..3 {
        mover.advance(&maze, |_| None);
    }
    assert_eq!(mover.cell(), IVec2::new(5, 1));
    assert_eq!(mover.move_direction(), Some(Direction::East));
}
