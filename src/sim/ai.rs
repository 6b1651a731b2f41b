//! Computer-controlled paddle

use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle, Side};

/// AI reaction speed as a multiple of the paddle's own speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn factor(self) -> f32 {
        match self {
            Difficulty::Easy => 0.6,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.4,
        }
    }
}

/// Tracks the ball vertically with a dead zone around the paddle centre
#[derive(Debug, Clone, PartialEq)]
pub struct AiController {
    pub difficulty: Difficulty,
    /// No movement while the ball is within this many px of the paddle centre
    pub dead_zone: f32,
    /// Paddle the AI drives, if any
    pub side: Option<Side>,
}

impl AiController {
    pub fn new(difficulty: Difficulty, dead_zone: f32) -> Self {
        Self {
            difficulty,
            dead_zone,
            side: None,
        }
    }

    /// Step the paddle toward the ball. Returns false if either is unavailable.
    pub fn update(
        &self,
        paddle: Option<&mut Paddle>,
        ball: Option<&Ball>,
        dt: f32,
        arena_height: f32,
    ) -> bool {
        let (Some(paddle), Some(ball)) = (paddle, ball) else {
            log::warn!("AI update skipped: paddle or ball missing");
            return false;
        };

        let step = paddle.speed * self.difficulty.factor() * dt;
        if ball.pos.y < paddle.y - self.dead_zone {
            paddle.y -= step;
        } else if ball.pos.y > paddle.y + self.dead_zone {
            paddle.y += step;
        }
        paddle.clamp_to_arena(arena_height);
        true
    }
}
