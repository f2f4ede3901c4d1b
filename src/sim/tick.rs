//! Per-tick simulation update
//!
//! Advances the game by one discrete step: shift the body, advance and wrap
//! the head, resolve food and power-up pickups, then check for a fatal
//! collision. The driver calls this at a fixed period.

use rand::Rng;

use super::state::{Cell, GamePhase, GameState, PowerUp};
use crate::consts::*;

/// Advance the game state by one tick. A pure no-op while paused or after
/// game over.
pub fn tick(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    state.time_ticks += 1;

    let old_tail = advance_snake(state);
    eat_food(state, old_tail);
    update_power_up(state);
    collect_power_up(state, old_tail);
    check_collisions(state);
}

/// Shift every segment to its predecessor's cell and advance the head one
/// cell in the current direction, wrapping at board edges. Returns the
/// discarded tail cell so growth can restore it.
fn advance_snake(state: &mut GameState) -> Cell {
    let new_head = state.snake[0].step(state.direction).wrapped();
    state.snake.push_front(new_head);
    // Non-empty by invariant: we just pushed.
    state.snake.pop_back().unwrap_or(new_head)
}

/// Append `amount` copies of the discarded tail cell. The duplicates unfold
/// into a visible tail over the following ticks. Growth stops at the board
/// cell count.
fn grow(state: &mut GameState, amount: usize, tail: Cell) {
    for _ in 0..amount {
        if state.snake.len() >= GRID_CELLS {
            break;
        }
        state.snake.push_back(tail);
    }
}

fn eat_food(state: &mut GameState, old_tail: Cell) {
    if state.snake[0] == state.food {
        grow(state, 1, old_tail);
        state.score += FOOD_SCORE;
        state.spawn_food();
    }
}

/// Count an active power-up down (despawn at zero), or roll the fixed
/// per-tick spawn chance while none is active.
fn update_power_up(state: &mut GameState) {
    if let Some(power_up) = &mut state.power_up {
        power_up.ticks_left -= 1;
        if power_up.ticks_left == 0 {
            state.power_up = None;
        }
    } else if state.rng.random_range(0..100) < POWER_UP_SPAWN_PERCENT {
        let pos = state.random_cell();
        state.power_up = Some(PowerUp {
            pos,
            ticks_left: POWER_UP_DURATION_TICKS,
        });
    }
}

fn collect_power_up(state: &mut GameState, old_tail: Cell) {
    let Some(power_up) = state.power_up else {
        return;
    };
    if state.snake[0] == power_up.pos {
        grow(state, POWER_UP_GROWTH, old_tail);
        state.score += POWER_UP_SCORE;
        state.power_up = None;
    }
}

/// Head vs trailing segments and obstacles. Either hit ends the run.
fn check_collisions(state: &mut GameState) {
    let head = state.snake[0];
    let self_hit = state.snake.iter().skip(1).any(|&cell| cell == head);
    let obstacle_hit = state.obstacles.iter().any(|&cell| cell == head);
    if self_hit || obstacle_hit {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    if state.score > state.high_score {
        state.high_score = state.score;
    }
    log::info!(
        "game over after {} ticks: score {}, high score {}",
        state.time_ticks,
        state.score,
        state.high_score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Direction;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    /// Park a long-lived power-up in a corner so ticks neither roll the
    /// spawn chance nor consume RNG draws the test does not expect.
    fn park_power_up(state: &mut GameState) {
        state.power_up = Some(PowerUp {
            pos: Cell::new(575, 575),
            ticks_left: 10_000,
        });
    }

    fn snake_of(cells: &[(i32, i32)]) -> VecDeque<Cell> {
        cells.iter().map(|&(x, y)| Cell::new(x, y)).collect()
    }

    #[test]
    fn test_straight_run_five_ticks() {
        let mut state = GameState::new(3);
        state.food = Cell::new(0, 575);
        park_power_up(&mut state);

        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(state.head(), Cell::new(100 + 5 * UNIT_SIZE, 100));
        assert_eq!(state.snake_len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.time_ticks(), 5);
    }

    #[test]
    fn test_wrap_at_all_edges() {
        let cases = [
            // (head, direction, expected head after one tick)
            ((0, 100), Direction::Left, (575, 100)),
            ((575, 100), Direction::Right, (0, 100)),
            ((100, 0), Direction::Up, (100, 575)),
            ((100, 575), Direction::Down, (100, 0)),
        ];
        for ((hx, hy), dir, (ex, ey)) in cases {
            let mut state = GameState::new(9);
            state.food = Cell::new(250, 250);
            park_power_up(&mut state);
            state.snake = snake_of(&[(hx, hy)]);
            state.direction = dir;

            tick(&mut state);
            assert_eq!(state.head(), Cell::new(ex, ey), "direction {dir:?}");
            assert_eq!(state.phase(), GamePhase::Running);
        }
    }

    #[test]
    fn test_food_grows_by_one() {
        let mut state = GameState::new(5);
        park_power_up(&mut state);
        state.food = Cell::new(125, 100); // directly in the head's path

        tick(&mut state);
        assert_eq!(state.snake_len(), INITIAL_SNAKE_LENGTH + 1);
        assert_eq!(state.score(), FOOD_SCORE);
        // The discarded tail cell was restored
        assert_eq!(*state.snake.back().unwrap(), Cell::new(575, 100));
        // Food was resampled onto the grid
        let food = state.food();
        assert_eq!(food.x % UNIT_SIZE, 0);
        assert_eq!(food.y % UNIT_SIZE, 0);
        assert!((0..BOARD_WIDTH).contains(&food.x));
        assert!((0..BOARD_HEIGHT).contains(&food.y));
    }

    #[test]
    fn test_power_up_collect() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        state.power_up = Some(PowerUp {
            pos: Cell::new(125, 100),
            ticks_left: 50,
        });

        tick(&mut state);
        assert_eq!(state.snake_len(), INITIAL_SNAKE_LENGTH + POWER_UP_GROWTH);
        assert_eq!(state.score(), POWER_UP_SCORE);
        assert!(state.power_up().is_none());
    }

    #[test]
    fn test_power_up_expires() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        state.power_up = Some(PowerUp {
            pos: Cell::new(300, 300),
            ticks_left: 1,
        });

        tick(&mut state);
        assert!(state.power_up().is_none());
        assert_eq!(state.snake_len(), INITIAL_SNAKE_LENGTH);
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_power_up_counts_down() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        state.power_up = Some(PowerUp {
            pos: Cell::new(300, 300),
            ticks_left: 3,
        });

        tick(&mut state);
        assert_eq!(state.power_up().map(|p| p.ticks_left), Some(2));
    }

    #[test]
    fn test_self_collision_ends_run() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        park_power_up(&mut state);
        // Head curls back into the body on the next step right
        state.snake = snake_of(&[(100, 100), (100, 125), (125, 125), (125, 100), (150, 100)]);
        state.direction = Direction::Right;
        state.score = 3;
        state.high_score = 1;

        tick(&mut state);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.high_score(), 3);
    }

    #[test]
    fn test_tail_chase_is_not_a_collision() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        park_power_up(&mut state);
        // A closed square: the head steps into the cell the tail just left
        state.snake = snake_of(&[(100, 100), (100, 125), (125, 125), (125, 100)]);
        state.direction = Direction::Right;

        tick(&mut state);
        assert_eq!(state.phase(), GamePhase::Running);
        assert_eq!(state.head(), Cell::new(125, 100));
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = GameState::new(5);
        state.set_difficulty(2); // obstacle at (200, 200)
        state.food = Cell::new(0, 575);
        park_power_up(&mut state);
        state.snake = snake_of(&[(175, 200), (150, 200)]);
        state.direction = Direction::Right;

        tick(&mut state);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_high_score_keeps_previous_best() {
        let mut state = GameState::new(5);
        state.food = Cell::new(0, 575);
        park_power_up(&mut state);
        state.snake = snake_of(&[(175, 200), (150, 200)]);
        state.direction = Direction::Right;
        state.obstacles = vec![Cell::new(200, 200)];
        state.score = 2;
        state.high_score = 10;

        tick(&mut state);
        assert_eq!(state.phase(), GamePhase::GameOver);
        assert_eq!(state.high_score(), 10);
    }

    #[test]
    fn test_paused_tick_is_identity() {
        let mut state = GameState::new(11);
        state.toggle_pause_or_restart();
        let before = state.clone();
        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(before, state);
    }

    #[test]
    fn test_game_over_tick_is_identity() {
        let mut state = GameState::new(11);
        state.phase = GamePhase::GameOver;
        let before = state.clone();
        for _ in 0..5 {
            tick(&mut state);
        }
        assert_eq!(before, state);
    }

    #[test]
    fn test_growth_clamped_at_board_capacity() {
        let mut state = GameState::new(11);
        while state.snake.len() < GRID_CELLS - 1 {
            state.snake.push_back(Cell::new(0, 0));
        }
        grow(&mut state, 5, Cell::new(0, 0));
        assert_eq!(state.snake_len(), GRID_CELLS);
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let mut a = GameState::new(99_999);
        let mut b = GameState::new(99_999);
        let turns = [
            Direction::Down,
            Direction::Right,
            Direction::Up,
            Direction::Left,
            Direction::Down,
        ];
        for (i, dir) in turns.iter().cycle().take(60).enumerate() {
            if i % 3 == 0 {
                a.set_direction(*dir);
                b.set_direction(*dir);
            }
            tick(&mut a);
            tick(&mut b);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_head_stays_on_grid(
            seed in 0u64..500,
            moves in proptest::collection::vec(0u8..4, 1..80),
        ) {
            let mut state = GameState::new(seed);
            for m in moves {
                let dir = match m {
                    0 => Direction::Up,
                    1 => Direction::Down,
                    2 => Direction::Left,
                    _ => Direction::Right,
                };
                state.set_direction(dir);
                tick(&mut state);
                let head = state.head();
                prop_assert!((0..BOARD_WIDTH).contains(&head.x));
                prop_assert!((0..BOARD_HEIGHT).contains(&head.y));
                prop_assert_eq!(head.x % UNIT_SIZE, 0);
                prop_assert_eq!(head.y % UNIT_SIZE, 0);
                if state.is_game_over() {
                    break;
                }
            }
        }

        #[test]
        fn prop_reversal_leaves_direction_unchanged(seed in 0u64..100) {
            let mut state = GameState::new(seed);
            for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
                state.direction = dir;
                state.set_direction(dir.opposite());
                prop_assert_eq!(state.direction(), dir);
            }
        }

        #[test]
        fn prop_double_toggle_is_identity(seed in 0u64..500, warmup in 0usize..20) {
            let mut state = GameState::new(seed);
            for _ in 0..warmup {
                tick(&mut state);
            }
            if !state.is_game_over() {
                let before = state.clone();
                state.toggle_pause_or_restart();
                state.toggle_pause_or_restart();
                prop_assert_eq!(before, state);
            }
        }

        #[test]
        fn prop_paused_ticks_are_identity(seed in 0u64..500) {
            let mut state = GameState::new(seed);
            state.toggle_pause_or_restart();
            let before = state.clone();
            for _ in 0..10 {
                tick(&mut state);
            }
            prop_assert_eq!(before, state);
        }
    }
}
