#![allow(dead_code)]

use isopac::config::Tuning;
use isopac::constants::bits;
use isopac::game::{Game, GameOptions};
use isopac::map::builder::Maze;
use isopac::scoreboard::MemoryScoreStore;

/// Every scatter goal on one cell.
pub const ALL_GOALS: u16 =
    bits::CHASER_SCATTER | bits::AMBUSHER_SCATTER | bits::FLANKER_SCATTER | bits::OPPORTUNIST_SCATTER;

/// A small maze with a ghost box below the top corridor and a loop around it.
///
/// The player spawns at (1, 1) next to an energizer; the fruit sits at (7, 1)
/// and every scatter goal at (7, 5).
pub const LOOP_MAZE: [&str; 7] = [
    "#########",
    "#Po....f#",
    "#.##x##.#",
    "#.#bbb#.#",
    "#.#####.#",
    "#......G#",
    "#########",
];

/// A maze with a single dot between the spawn and the scatter goals.
pub const ONE_DOT_MAZE: [&str; 5] = ["#####", "#P.G#", "##x##", "##b##", "#####"];

/// Turns a picture of a maze into cell values.
///
/// `#` wall, `.` dot, `o` energizer, `f` fruit, `P` pacman spawn, `b` ghost
/// box, `x` box exit, `G` every scatter goal, space for an empty floor.
pub fn grid(rows: &[&str]) -> Vec<Vec<u16>> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '#' => bits::WALL,
                    '.' => bits::DOT,
                    'o' => bits::ENERGIZER,
                    'f' => bits::FRUIT,
                    'P' => bits::PACMAN_SPAWN,
                    'b' => bits::GHOST_BOX,
                    'x' => bits::GHOST_BOX_EXIT,
                    'G' => ALL_GOALS,
                    ' ' => 0,
                    other => panic!("unknown maze character {other:?}"),
                })
                .collect()
        })
        .collect()
}

pub fn maze(rows: &[&str]) -> Maze {
    Maze::from_grid(&grid(rows)).unwrap()
}

/// Short timings: ten ticks per second, so the player crosses a cell in
/// four ticks and ghosts in five.
pub fn fast_tuning() -> Tuning {
    Tuning {
        ticks_per_second: 10,
        ..Tuning::default()
    }
}

pub fn options(seed: u64) -> GameOptions {
    GameOptions {
        player_name: "tester".into(),
        seed: Some(seed),
        tuning: fast_tuning(),
        ..GameOptions::default()
    }
}

pub fn game(rows: &[&str]) -> Game {
    game_with(rows, options(7))
}

pub fn game_with(rows: &[&str], options: GameOptions) -> Game {
    Game::new(grid(rows), options, Box::new(MemoryScoreStore::new())).unwrap()
}
