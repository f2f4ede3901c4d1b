//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Discrete ticks only, driven externally at a fixed period
//! - Seeded RNG only
//! - No rendering or terminal dependencies
//!
//! Invalid commands (reversing direction, out-of-range difficulty) are
//! silent no-ops, never errors. Game over is a normal phase transition.

pub mod state;
pub mod tick;

pub use state::{Cell, Difficulty, Direction, GamePhase, GameState, PowerUp};
pub use tick::tick;
