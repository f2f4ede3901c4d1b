//! Torus Snake entry point
//!
//! Owns the game state exclusively and drives it on a fixed tick period,
//! feeding decoded input commands in as they arrive and rendering a frame
//! after every tick.

use std::env;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use torus_snake::highscores::HighScores;
use torus_snake::input::{Command, InputAdapter};
use torus_snake::render;
use torus_snake::settings::Settings;
use torus_snake::sim::{GameState, tick};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let settings = Settings::from_args(env::args().skip(1));
    if !settings.color {
        colored::control::set_override(false);
    }

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    });

    let mut state = GameState::new(seed);
    if settings.start_difficulty != 1 {
        state.set_difficulty(settings.start_difficulty);
    }
    log::info!(
        "torus-snake starting (seed {seed}, difficulty {})",
        state.difficulty().as_str()
    );

    let mut input = InputAdapter::new()?;
    let mut leaderboard = HighScores::new();
    let mut run_recorded = false;
    let tick_period = settings.tick_interval();
    let mut last_tick = Instant::now();

    render::clear_screen();
    render::draw(&state);

    'game: loop {
        // Commands apply immediately; they affect the next tick, never the
        // one already taken.
        for command in input.poll() {
            match command {
                Command::Turn(dir) => state.set_direction(dir),
                Command::TogglePauseOrRestart => state.toggle_pause_or_restart(),
                Command::SetDifficulty(level) => state.set_difficulty(level),
                Command::Quit => break 'game,
            }
        }

        if last_tick.elapsed() < tick_period {
            thread::sleep(Duration::from_millis(3));
            continue;
        }
        last_tick = Instant::now();

        tick(&mut state);

        if state.is_game_over() {
            if !run_recorded {
                run_recorded = true;
                leaderboard.add_score(state.score(), state.difficulty(), state.time_ticks());
                match serde_json::to_string(&state) {
                    Ok(json) => log::debug!("final state: {json}"),
                    Err(err) => log::warn!("state dump failed: {err}"),
                }
            }
        } else {
            run_recorded = false;
        }

        render::clear_screen();
        render::draw(&state);
    }

    // Restore the terminal before printing the summary
    drop(input);

    println!();
    println!("High score this session: {}", state.high_score());
    if !leaderboard.is_empty() {
        println!("Top runs:");
        for (rank, entry) in leaderboard.entries.iter().enumerate() {
            println!(
                "{:>3}. {:>4}  {:<6}  {} ticks",
                rank + 1,
                entry.score,
                entry.difficulty.as_str(),
                entry.ticks
            );
        }
    }
    Ok(())
}
