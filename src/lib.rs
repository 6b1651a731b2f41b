//! Neo Pong - two-paddle arcade pong with power-ups
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, timed effects, AI, game driver)
//! - `persistence`: Fixed-layout save record and save file store
//! - `platform`: Keyboard input source and frame clock
//! - `render`: Read-only frame snapshots and vector shape fallbacks
//! - `audio`: Event-to-sound mapping
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod render;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use settings::Settings;
pub use tuning::Tuning;

/// Default gameplay constants. `Tuning::default()` is built from these.
pub mod consts {
    /// Arena dimensions (y grows downward)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Minimum wall time between two frames (ms)
    pub const MIN_FRAME_MS: u64 = 16;
    /// Largest step the simulation accepts, in seconds
    pub const MAX_DT: f32 = 0.05;

    /// Paddle defaults
    pub const PADDLE_HEIGHT: f32 = 100.0;
    pub const PADDLE_WIDTH: f32 = 15.0;
    pub const PADDLE_SPEED: f32 = 300.0;
    pub const LEFT_PADDLE_X: f32 = 30.0;
    pub const RIGHT_PADDLE_X: f32 = 770.0;

    /// Ball defaults
    pub const BALL_SPEED: f32 = 300.0;
    /// Velocity a freshly started match serves with
    pub const OPENING_VELOCITY: [f32; 2] = [200.0, 235.0];
    /// Horizontal speed multiplier on every paddle hit
    pub const PADDLE_BOOST: f32 = 1.1;

    /// AI dead zone around the paddle centre (px)
    pub const AI_DEAD_ZONE: f32 = 10.0;

    /// Mode thresholds
    pub const AI_WIN_SCORE: u32 = 10;
    pub const STORYTIME_ROUND_SCORE: u32 = 8;
    pub const FUN_ROUND_SCORE: u32 = 5;
    pub const MATCH_ROUNDS: u32 = 3;
}
