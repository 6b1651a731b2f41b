//! Data-driven game balance
//!
//! Every number the simulation reads lives here so it can be tweaked from a
//! JSON file without touching code. Missing fields fall back to `consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::{PersistenceError, read_json};

/// Timing and motion for one power-up kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerTuning {
    /// Vertical speed while spawned (px/s)
    pub speed: f32,
    /// How long the payload stays applied (s)
    pub duration: f32,
    /// Time from collection until the power respawns (s). `None` respawns on expiry.
    pub respawn_after: Option<f32>,
    /// Horizontal spawn band as fractions of the arena width
    pub spawn_band: (f32, f32),
}

impl PowerTuning {
    /// Seconds from collection to respawn
    pub fn cooldown(&self) -> f32 {
        self.respawn_after.unwrap_or(self.duration).max(self.duration)
    }
}

/// Per-kind power-up tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PowerSet {
    pub size_booster: PowerTuning,
    pub visibility_toggle: PowerTuning,
    pub control_inverter: PowerTuning,
    /// Smallest and largest side of a power's box (px, half-open)
    pub extent_range: (f32, f32),
}

impl Default for PowerSet {
    fn default() -> Self {
        Self {
            size_booster: PowerTuning {
                speed: 50.0,
                duration: 10.0,
                respawn_after: None,
                spawn_band: (0.1, 0.9),
            },
            visibility_toggle: PowerTuning {
                speed: 80.0,
                duration: 3.0,
                respawn_after: Some(13.0),
                spawn_band: (0.1, 0.6),
            },
            control_inverter: PowerTuning {
                speed: 120.0,
                duration: 3.0,
                respawn_after: Some(9.0),
                spawn_band: (0.4, 0.9),
            },
            extent_range: (30.0, 50.0),
        }
    }
}

/// Story mode letter tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterTuning {
    pub words: Vec<String>,
    pub start: (f32, f32),
    pub speed: f32,
    /// Glyph box (already scaled for display)
    pub glyph_size: (f32, f32),
}

impl Default for LetterTuning {
    fn default() -> Self {
        Self {
            words: vec!["Polytech".into(), "Sorbonne".into(), "2025".into()],
            start: (400.0, 0.0),
            speed: 30.0,
            glyph_size: (36.0, 54.0),
        }
    }
}

/// All gameplay numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub min_frame_ms: u64,
    pub max_dt: f32,

    pub paddle_height: f32,
    pub paddle_width: f32,
    pub paddle_speed: f32,
    pub left_paddle_x: f32,
    pub right_paddle_x: f32,

    pub ball_speed: f32,
    pub opening_velocity: [f32; 2],
    pub paddle_boost: f32,

    pub ai_dead_zone: f32,

    pub ai_win_score: u32,
    pub storytime_round_score: u32,
    pub fun_round_score: u32,
    pub match_rounds: u32,

    pub powers: PowerSet,
    pub letter: LetterTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            min_frame_ms: MIN_FRAME_MS,
            max_dt: MAX_DT,
            paddle_height: PADDLE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,
            left_paddle_x: LEFT_PADDLE_X,
            right_paddle_x: RIGHT_PADDLE_X,
            ball_speed: BALL_SPEED,
            opening_velocity: OPENING_VELOCITY,
            paddle_boost: PADDLE_BOOST,
            ai_dead_zone: AI_DEAD_ZONE,
            ai_win_score: AI_WIN_SCORE,
            storytime_round_score: STORYTIME_ROUND_SCORE,
            fun_round_score: FUN_ROUND_SCORE,
            match_rounds: MATCH_ROUNDS,
            powers: PowerSet::default(),
            letter: LetterTuning::default(),
        }
    }
}

impl Tuning {
    pub fn arena(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    pub fn arena_center(&self) -> Vec2 {
        self.arena() / 2.0
    }

    pub fn opening_velocity(&self) -> Vec2 {
        Vec2::from(self.opening_velocity)
    }

    /// Parse tuning from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match read_json::<Self>(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::info!("Using default tuning ({e})");
                Self::default()
            }
        }
    }
}
