//! Game state and core simulation types
//!
//! `GameState` owns every piece of game data and enforces all rules. The
//! driver owns it exclusively; the renderer and input adapter only see the
//! read-only accessor surface.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::wrap_coord;

/// Snake heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The exact reverse heading - the one `set_direction` rejects
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// One grid cell, in board pixels (always multiples of `UNIT_SIZE`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring cell one step in `dir`, before wrapping
    pub fn step(self, dir: Direction) -> Self {
        match dir {
            Direction::Up => Cell::new(self.x, self.y - UNIT_SIZE),
            Direction::Down => Cell::new(self.x, self.y + UNIT_SIZE),
            Direction::Left => Cell::new(self.x - UNIT_SIZE, self.y),
            Direction::Right => Cell::new(self.x + UNIT_SIZE, self.y),
        }
    }

    /// Wrap both coordinates onto the toroidal board
    pub fn wrapped(self) -> Self {
        Cell::new(wrap_coord(self.x, BOARD_WIDTH), wrap_coord(self.y, BOARD_HEIGHT))
    }
}

/// Medium obstacle layout (board pixels)
const MEDIUM_OBSTACLES: [Cell; 3] = [
    Cell::new(200, 200),
    Cell::new(400, 300),
    Cell::new(300, 450),
];

/// Hard obstacle layout (board pixels)
const HARD_OBSTACLES: [Cell; 6] = [
    Cell::new(150, 150),
    Cell::new(250, 250),
    Cell::new(400, 150),
    Cell::new(450, 400),
    Cell::new(200, 450),
    Cell::new(350, 350),
];

/// Difficulty level - determines the fixed obstacle layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Parse the 1..=3 command level; anything else is rejected
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// Fixed obstacle table for this level
    pub fn obstacles(self) -> &'static [Cell] {
        match self {
            Difficulty::Easy => &[],
            Difficulty::Medium => &MEDIUM_OBSTACLES,
            Difficulty::Hard => &HARD_OBSTACLES,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advancing every tick
    Running,
    /// Ticks are no-ops until unpaused
    Paused,
    /// Run ended; the toggle command restarts
    GameOver,
}

/// The transient bonus item; at most one exists at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Cell,
    /// Ticks until it despawns uncollected
    pub ticks_left: u32,
}

/// Complete game state (deterministic for a given seed + command sequence)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub(crate) seed: u64,
    #[serde(skip_serializing)]
    pub(crate) rng: Pcg32,
    /// Body cells, head first; never empty, never longer than `GRID_CELLS`
    pub(crate) snake: VecDeque<Cell>,
    pub(crate) direction: Direction,
    pub(crate) food: Cell,
    pub(crate) obstacles: Vec<Cell>,
    pub(crate) power_up: Option<PowerUp>,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) difficulty: Difficulty,
    pub(crate) phase: GamePhase,
    /// Ticks survived in the current run
    pub(crate) time_ticks: u64,
}

impl GameState {
    /// Create a new game with the given seed, at Easy difficulty
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            snake: VecDeque::with_capacity(GRID_CELLS),
            direction: Direction::Right,
            food: Cell::new(0, 0),
            obstacles: Vec::new(),
            power_up: None,
            score: 0,
            high_score: 0,
            difficulty: Difficulty::Easy,
            phase: GamePhase::Running,
            time_ticks: 0,
        };
        state.init_run();
        state
    }

    /// Reinitialize every mutable field in place. High score, difficulty and
    /// the RNG stream survive.
    pub fn restart(&mut self) {
        self.init_run();
        log::info!(
            "game restarted (difficulty {}, high score {})",
            self.difficulty.as_str(),
            self.high_score
        );
    }

    fn init_run(&mut self) {
        self.snake.clear();
        let (hx, hy) = SNAKE_START;
        for i in 0..INITIAL_SNAKE_LENGTH as i32 {
            self.snake.push_back(Cell::new(hx - i * UNIT_SIZE, hy).wrapped());
        }
        self.direction = Direction::Right;
        self.score = 0;
        self.power_up = None;
        self.phase = GamePhase::Running;
        self.time_ticks = 0;
        self.obstacles = self.difficulty.obstacles().to_vec();
        self.spawn_food();
    }

    /// Resample the food cell uniformly over the grid. The source game does
    /// not avoid the snake or obstacles, and neither do we.
    pub(crate) fn spawn_food(&mut self) {
        self.food = self.random_cell();
    }

    pub(crate) fn random_cell(&mut self) -> Cell {
        let x = self.rng.random_range(0..GRID_COLS) * UNIT_SIZE;
        let y = self.rng.random_range(0..GRID_ROWS) * UNIT_SIZE;
        Cell::new(x, y)
    }

    // === Commands ===

    /// Steer the snake. Reversing into the body is silently ignored; the new
    /// heading takes effect on the next tick.
    pub fn set_direction(&mut self, dir: Direction) {
        if dir == self.direction.opposite() {
            return;
        }
        self.direction = dir;
    }

    /// Change difficulty. Levels outside 1..=3 are silently ignored; a valid
    /// level forces a full restart with the new obstacle layout.
    pub fn set_difficulty(&mut self, level: u8) {
        let Some(difficulty) = Difficulty::from_level(level) else {
            return;
        };
        self.difficulty = difficulty;
        self.restart();
    }

    /// Restart when the run is over, otherwise flip pause.
    pub fn toggle_pause_or_restart(&mut self) {
        match self.phase {
            GamePhase::Running => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Running,
            GamePhase::GameOver => self.restart(),
        }
    }

    // === Read accessors ===

    /// Head cell (segment 0)
    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    /// Body cells, head first
    pub fn snake(&self) -> impl Iterator<Item = Cell> + '_ {
        self.snake.iter().copied()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn power_up(&self) -> Option<&PowerUp> {
        self.power_up.as_ref()
    }

    pub fn obstacles(&self) -> &[Cell] {
        &self.obstacles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
