//! Fixed-timestep simulation tick
//!
//! One call advances the world by exactly [`SIM_DT`](crate::consts::SIM_DT).
//! Given the same starting state and the same inputs, the tick sequence is
//! fully deterministic.

use super::state::{GamePhase, GameState};
use crate::consts::SIM_DT;

/// Player input sampled for one tick. One-shot flags (`pause`, `quit`) are
/// consumed by the tick and must be re-raised by the caller to repeat.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the left paddle up
    pub p1_up: bool,
    /// Move the left paddle down
    pub p1_down: bool,
    /// Toggle pause
    pub pause: bool,
    /// End the game
    pub quit: bool,
}

/// Advance the simulation by one fixed timestep.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.quit {
        state.phase = GamePhase::GameOver;
        return;
    }

    if input.pause {
        state.phase = match state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
        // A toggle tick never advances the world
        return;
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let dt = SIM_DT;
    let field = state.field();
    let tuning = state.tuning.clone();

    if input.p1_up {
        state.left_paddle.up(dt, &tuning);
    } else if input.p1_down {
        state.left_paddle.down(dt, &tuning);
    }

    state
        .automaton
        .play(&state.ball, &mut state.right_paddle, dt, &tuning);

    state.ball.handle_screen_edges(&field);
    state
        .ball
        .handle_paddle_collision(&state.left_paddle, dt, &tuning);
    state
        .ball
        .handle_paddle_collision(&state.right_paddle, dt, &tuning);

    state.ball.update(dt, &tuning);
    state.left_paddle.update(dt, &field, &tuning);
    state.right_paddle.update(dt, &field, &tuning);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    fn fingerprint(state: &GameState) -> String {
        serde_json::to_string(state).expect("state serializes")
    }

    #[test]
    fn test_tick_advances_time_and_ball() {
        let mut state = GameState::new(1, Tuning::default());
        let start = state.ball.rect;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert_ne!(state.ball.rect, start);
    }

    #[test]
    fn test_determinism_across_runs() {
        let script = |t: u64| TickInput {
            p1_up: t % 7 < 3,
            p1_down: t % 11 > 8,
            ..TickInput::default()
        };

        let mut a = GameState::new(99, Tuning::default());
        let mut b = GameState::new(99, Tuning::default());
        for t in 0..2400 {
            tick(&mut a, &script(t));
            tick(&mut b, &script(t));
        }
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn test_pause_freezes_and_resumes() {
        let mut state = GameState::new(5, Tuning::default());
        tick(&mut state, &TickInput::default());
        let ticks = state.time_ticks;

        let pause = TickInput {
            pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = fingerprint(&state);

        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(fingerprint(&state), frozen);

        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::Playing);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_quit_ends_the_game_for_good() {
        let mut state = GameState::new(5, Tuning::default());
        let quit = TickInput {
            quit: true,
            ..TickInput::default()
        };
        tick(&mut state, &quit);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Neither plain ticks nor pause revive a finished game
        tick(&mut state, &TickInput::default());
        let pause = TickInput {
            pause: true,
            ..TickInput::default()
        };
        tick(&mut state, &pause);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_ball_stays_on_the_field() {
        let mut state = GameState::new(7, Tuning::default());
        let field = state.field();
        // The ball may overshoot an edge by at most one tick's travel
        // before the bounce pulls it back
        let slack = state.tuning.ball_max_speed * SIM_DT + state.tuning.ball_size;
        // Ten simulated seconds of unattended play
        for _ in 0..1200 {
            tick(&mut state, &TickInput::default());
            assert!(
                state.ball.rect.left >= field.left - slack
                    && state.ball.rect.right() <= field.right() + slack
                    && state.ball.rect.top >= field.top - slack
                    && state.ball.rect.bottom() <= field.bottom() + slack,
                "ball escaped at tick {}: {:?}",
                state.time_ticks,
                state.ball.rect
            );
        }
    }

    #[test]
    fn test_paddles_never_leave_the_field() {
        let mut state = GameState::new(3, Tuning::default());
        let field = state.field();
        let hold_up = TickInput {
            p1_up: true,
            ..TickInput::default()
        };
        for _ in 0..1200 {
            tick(&mut state, &hold_up);
        }
        for paddle in [&state.left_paddle, &state.right_paddle] {
            assert!(paddle.rect.top >= field.top);
            assert!(paddle.rect.bottom() <= field.bottom());
        }
    }
}
