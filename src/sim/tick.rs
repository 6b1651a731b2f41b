//! Per-frame simulation step
//!
//! Fixed order every tick: paddles, ball and collisions, mode rules, effects.
//! Effects can score (storytime letters), so the rules run once more after them.

use super::collision::{BallOutcome, step_ball};
use super::effects::TimedEffect;
use super::state::{GameEvent, GameMode, GamePhase, GameState, PaddleInput, Side};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Left paddle (W/S)
    pub left: PaddleInput,
    /// Right paddle (Up/Down); ignored while the AI drives it
    pub right: PaddleInput,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        if state.phase.is_running() {
            state.pause();
            return;
        }
        state.resume();
    }

    if !state.phase.is_running() {
        return;
    }

    let dt = dt.clamp(0.0, state.tuning.max_dt);
    let arena_height = state.tuning.arena_height;
    state.time_ticks += 1;

    // Paddles
    state.left.update(input.left, dt, arena_height);
    if state.phase == GamePhase::AiPlaying {
        let paddle = match state.ai.side {
            Some(Side::Left) => Some(&mut state.left),
            Some(Side::Right) => Some(&mut state.right),
            None => None,
        };
        state.ai.update(paddle, Some(&state.ball), dt, arena_height);
    } else {
        state.right.update(input.right, dt, arena_height);
    }

    // Ball
    let outcome = step_ball(
        &mut state.ball,
        &state.left,
        &state.right,
        &state.tuning,
        &mut state.rng,
        dt,
    );
    match outcome {
        BallOutcome::Moved => {}
        BallOutcome::WallHit => state.emit(GameEvent::WallHit),
        BallOutcome::PaddleHit(side) => state.emit(GameEvent::PaddleHit { side }),
        BallOutcome::Scored(side) => {
            state.scores.award_point(side);
            state.emit(GameEvent::Scored { side });
            log::debug!(
                "Point to {:?} ({} - {})",
                side,
                state.scores.left.score,
                state.scores.right.score
            );
        }
    }

    // Mode rules
    super::rules::evaluate(state);
    if !state.phase.is_running() {
        return;
    }

    // Effects see the ball after this tick's collision
    let mode = state.mode;
    let (mut ctx, powers, letter) = state.split_effects(dt);
    match mode {
        GameMode::Storytime => letter.update(&mut ctx),
        GameMode::Fun => {
            for power in powers.iter_mut() {
                power.update(&mut ctx);
            }
        }
        GameMode::TwoPlayer | GameMode::VersusAi => {}
    }

    // A collected letter may have closed the round
    super::rules::evaluate(state);
}
