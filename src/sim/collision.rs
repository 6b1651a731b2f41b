//! Collision detection and response for the ball
//!
//! Everything is axis-aligned: the ball's square bounding box against paddles
//! and power boxes, the arena's horizontal walls, and the scoring edges.
//! Each tick at most one resolution applies, in the order paddle, wall, exit.

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Paddle, Side};
use crate::tuning::Tuning;

/// Axis-aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn from_corner(corner: Vec2, size: Vec2) -> Self {
        Self {
            min: corner,
            max: corner + size,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Strict overlap; boxes that only touch do not intersect
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        p.clamp(self.min, self.max)
    }

    /// Circle test against the closest point on the box
    pub fn touches_circle(&self, center: Vec2, radius: f32) -> bool {
        self.closest_point(center).distance_squared(center) < radius * radius
    }
}

/// What happened to the ball this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    Moved,
    WallHit,
    PaddleHit(Side),
    /// The given side scored and the ball was re-served
    Scored(Side),
}

/// Bounce off a paddle the ball overlaps
///
/// The ball is placed flush against the paddle face and its horizontal speed is
/// pointed away from the paddle and scaled by `boost`.
pub fn resolve_paddle_hit(ball: &mut Ball, paddle: &Paddle, boost: f32) -> bool {
    let rect = paddle.bounds();
    if !ball.bounds().intersects(&rect) {
        return false;
    }

    let half = ball.radius();
    match paddle.side {
        Side::Left => {
            ball.pos.x = rect.max.x + half;
            ball.vel.x = ball.vel.x.abs() * boost;
        }
        Side::Right => {
            ball.pos.x = rect.min.x - half;
            ball.vel.x = -ball.vel.x.abs() * boost;
        }
    }
    true
}

/// Reflect off the top or bottom wall
pub fn resolve_wall_hit(ball: &mut Ball, arena_height: f32) -> bool {
    if ball.pos.y <= 0.0 {
        ball.pos.y = 0.0;
        ball.vel.y = -ball.vel.y;
        true
    } else if ball.pos.y >= arena_height {
        ball.pos.y = arena_height;
        ball.vel.y = -ball.vel.y;
        true
    } else {
        false
    }
}

/// Side that scores when the ball's centre has left the arena horizontally
pub fn exit_side(ball: &Ball, arena_width: f32) -> Option<Side> {
    if ball.pos.x <= 0.0 {
        Some(Side::Right)
    } else if ball.pos.x >= arena_width {
        Some(Side::Left)
    } else {
        None
    }
}

/// Integrate the ball one step and resolve at most one collision
pub fn step_ball<R: Rng + ?Sized>(
    ball: &mut Ball,
    left: &Paddle,
    right: &Paddle,
    tuning: &Tuning,
    rng: &mut R,
    dt: f32,
) -> BallOutcome {
    ball.pos += ball.vel * dt;

    // Paddle contact wins over a simultaneous wall crossing; only y is pulled back
    for paddle in [left, right] {
        if resolve_paddle_hit(ball, paddle, tuning.paddle_boost) {
            ball.pos.y = ball.pos.y.clamp(0.0, tuning.arena_height);
            return BallOutcome::PaddleHit(paddle.side);
        }
    }

    if resolve_wall_hit(ball, tuning.arena_height) {
        return BallOutcome::WallHit;
    }

    if let Some(scorer) = exit_side(ball, tuning.arena_width) {
        ball.reset(tuning.arena_center(), tuning.ball_speed, rng);
        return BallOutcome::Scored(scorer);
    }

    BallOutcome::Moved
}
