//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Caller-supplied dt, clamped per tick
//! - Seeded RNG only
//! - Fixed update order (paddles, ball, rules, effects)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod effects;
pub mod letter;
pub mod powers;
pub mod rules;
pub mod state;
pub mod tick;

pub use ai::{AiController, Difficulty};
pub use collision::{Aabb, BallOutcome, step_ball};
pub use effects::{EffectContext, TimedEffect};
pub use letter::LetterDrop;
pub use powers::{PowerKind, PowerState, PowerUp};
pub use state::{
    BACKGROUND, Ball, BallShape, Color, FOREGROUND, GameEvent, GameMode, GamePhase, GameState,
    MAX_NAME_BYTES, Paddle, PaddleInput, Player, Scoreboard, Side, clamp_name,
};
pub use tick::{TickInput, tick};
