//! ANSI terminal renderer
//!
//! Draws one frame from the read-only state accessors. Pure presentation:
//! nothing here mutates the simulation.

use colored::Colorize;

use crate::consts::*;
use crate::sim::{Cell, GamePhase, GameState};

/// What occupies a grid cell, for glyph selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Empty,
    Body,
    Head,
    Food,
    Obstacle,
    PowerUp,
}

pub fn clear_screen() {
    print!("\x1b[2J\x1b[1;1H");
}

/// Draw the board, HUD line and any phase banner
pub fn draw(state: &GameState) {
    let grid = build_grid(state);

    print!("▗");
    for _ in 0..GRID_COLS {
        print!("▄▄");
    }
    println!("▖");

    for row in &grid {
        print!("▐");
        for tile in row {
            match tile {
                Tile::Empty => print!("  "),
                Tile::Body => print!("{}", "⏺ ".green()),
                Tile::Head => print!("{}", "Ӫ ".yellow()),
                Tile::Food => print!("{}", "♦ ".red()),
                Tile::Obstacle => print!("{}", "▓▓".blue()),
                Tile::PowerUp => print!("{}", "★ ".magenta()),
            }
        }
        println!("▌");
    }

    print!("▝");
    for _ in 0..GRID_COLS {
        print!("▀▀");
    }
    println!("▘");

    println!(
        "Score: {}   High Score: {}   Difficulty: {}",
        state.score(),
        state.high_score(),
        state.difficulty().as_str()
    );
    if let Some(power_up) = state.power_up() {
        println!("{}", format!("Power-up fades in {} ticks", power_up.ticks_left).magenta());
    }

    match state.phase() {
        GamePhase::Paused => println!("{}", "PAUSED - space to resume".bold()),
        GamePhase::GameOver => {
            println!("{}", "GAME OVER - space to restart, q to quit".red().bold());
        }
        GamePhase::Running => {}
    }
}

/// Rasterize the state into tiles. Later writes win, so the head is placed
/// last and always visible.
fn build_grid(state: &GameState) -> Vec<Vec<Tile>> {
    let mut grid = vec![vec![Tile::Empty; GRID_COLS as usize]; GRID_ROWS as usize];
    let mut set = |cell: Cell, tile: Tile| {
        grid[(cell.y / UNIT_SIZE) as usize][(cell.x / UNIT_SIZE) as usize] = tile;
    };

    for &cell in state.obstacles() {
        set(cell, Tile::Obstacle);
    }
    set(state.food(), Tile::Food);
    if let Some(power_up) = state.power_up() {
        set(power_up.pos, Tile::PowerUp);
    }
    for cell in state.snake().skip(1) {
        set(cell, Tile::Body);
    }
    set(state.head(), Tile::Head);

    grid
}
