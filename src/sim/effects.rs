//! Shared interface for timed, collectible effects (power-ups and letters)

use glam::Vec2;
use rand::RngCore;

use super::state::{Ball, GameEvent, Paddle, Scoreboard, Side};

/// Mutable view of the world an effect machine may touch during one update
pub struct EffectContext<'a> {
    pub dt: f32,
    pub arena: Vec2,
    pub ball: &'a mut Ball,
    pub left: &'a mut Paddle,
    pub right: &'a mut Paddle,
    pub scores: &'a mut Scoreboard,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut Vec<GameEvent>,
}

impl EffectContext<'_> {
    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut *self.left,
            Side::Right => &mut *self.right,
        }
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// A falling collectible that applies something to the world when the ball hits it
pub trait TimedEffect {
    /// Advance motion, collision and timers by `ctx.dt`
    fn update(&mut self, ctx: &mut EffectContext<'_>);

    /// Undo any live payload and go dormant
    fn restore(&mut self, ctx: &mut EffectContext<'_>);

    /// Whether the collectible is currently drawn in the arena
    fn is_visible(&self) -> bool;
}
