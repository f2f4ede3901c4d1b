//! Torus Snake - a toroidal grid snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, game state)
//! - `input`: Raw-mode terminal input adapter
//! - `render`: ANSI terminal renderer
//! - `highscores`: In-memory session leaderboard
//! - `settings`: Runtime settings

pub mod highscores;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Board width in pixels (multiple of `UNIT_SIZE`)
    pub const BOARD_WIDTH: i32 = 600;
    /// Board height in pixels (multiple of `UNIT_SIZE`)
    pub const BOARD_HEIGHT: i32 = 600;
    /// Side of one square grid cell in pixels
    pub const UNIT_SIZE: i32 = 25;

    /// Grid columns
    pub const GRID_COLS: i32 = BOARD_WIDTH / UNIT_SIZE;
    /// Grid rows
    pub const GRID_ROWS: i32 = BOARD_HEIGHT / UNIT_SIZE;
    /// Total cells on the board - upper bound on snake length
    pub const GRID_CELLS: usize = (GRID_COLS * GRID_ROWS) as usize;

    /// Snake length after a (re)start
    pub const INITIAL_SNAKE_LENGTH: usize = 6;
    /// Head cell after a (re)start
    pub const SNAKE_START: (i32, i32) = (100, 100);

    /// Fixed tick period of the driver loop (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 100;

    /// Score granted per food eaten
    pub const FOOD_SCORE: u32 = 1;
    /// Percent chance per tick that a power-up spawns while none is active
    pub const POWER_UP_SPAWN_PERCENT: u32 = 2;
    /// Ticks a spawned power-up stays on the board
    pub const POWER_UP_DURATION_TICKS: u32 = 150;
    /// Extra segments granted by a power-up
    pub const POWER_UP_GROWTH: usize = 3;
    /// Score granted by a power-up
    pub const POWER_UP_SCORE: u32 = 5;
}

/// Wrap a pixel coordinate into `[0, max)` (toroidal board edges)
#[inline]
pub fn wrap_coord(v: i32, max: i32) -> i32 {
    v.rem_euclid(max)
}
