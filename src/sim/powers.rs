//! Power-ups: falling boxes that apply a timed modifier when the ball hits them
//!
//! One `PowerUp` machine handles all three kinds. What differs per kind (who is
//! targeted, what is applied and undone) lives on `PowerKind`; timing and motion
//! come from `PowerTuning`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use super::effects::{EffectContext, TimedEffect};
use super::state::{BACKGROUND, FOREGROUND, GameEvent, Side};
use crate::tuning::{PowerSet, PowerTuning};

/// The three power-up kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerKind {
    /// Doubles one paddle's height
    SizeBooster,
    /// Paints the ball in the background colour
    VisibilityToggle,
    /// Swaps one paddle's up/down controls
    ControlInverter,
}

impl PowerKind {
    /// Every kind, in the order Fun mode updates them
    pub const ALL: [PowerKind; 3] = [
        PowerKind::VisibilityToggle,
        PowerKind::SizeBooster,
        PowerKind::ControlInverter,
    ];

    pub fn tuning(self, powers: &PowerSet) -> PowerTuning {
        match self {
            PowerKind::SizeBooster => powers.size_booster,
            PowerKind::VisibilityToggle => powers.visibility_toggle,
            PowerKind::ControlInverter => powers.control_inverter,
        }
    }

    /// Paddle affected when the ball hits, given which side of the power's midpoint it was on
    pub fn target(self, ball_left_of_mid: bool) -> Option<Side> {
        match self {
            PowerKind::SizeBooster => Some(if ball_left_of_mid { Side::Left } else { Side::Right }),
            PowerKind::ControlInverter => {
                Some(if ball_left_of_mid { Side::Right } else { Side::Left })
            }
            PowerKind::VisibilityToggle => None,
        }
    }

    fn apply(self, target: Option<Side>, ctx: &mut EffectContext<'_>) {
        let arena_height = ctx.arena.y;
        match (self, target) {
            (PowerKind::SizeBooster, Some(side)) => {
                let paddle = ctx.paddle_mut(side);
                let height = paddle.height * 2.0;
                paddle.set_height(height, arena_height);
            }
            (PowerKind::ControlInverter, Some(side)) => ctx.paddle_mut(side).inverted = true,
            (PowerKind::VisibilityToggle, _) => ctx.ball.color = BACKGROUND,
            _ => {}
        }
    }

    fn expire(self, target: Option<Side>, ctx: &mut EffectContext<'_>) {
        let arena_height = ctx.arena.y;
        match (self, target) {
            (PowerKind::SizeBooster, Some(side)) => {
                let paddle = ctx.paddle_mut(side);
                let height = paddle.height / 2.0;
                paddle.set_height(height, arena_height);
            }
            (PowerKind::ControlInverter, Some(side)) => ctx.paddle_mut(side).inverted = false,
            (PowerKind::VisibilityToggle, _) => ctx.ball.color = FOREGROUND,
            _ => {}
        }
    }
}

/// Lifecycle of a power-up
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PowerState {
    /// Not in play (before a Fun match, or after the mode was exited)
    #[default]
    Dormant,
    /// Falling through the arena, waiting for the ball
    Spawned,
    /// Collected; `expired` flips once the payload has been undone
    EffectActive {
        target: Option<Side>,
        elapsed: f32,
        expired: bool,
    },
}

/// A single power-up machine
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub kind: PowerKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Signed vertical speed
    pub speed: f32,
    pub state: PowerState,
    pub tuning: PowerTuning,
}

impl PowerUp {
    /// Build a dormant power with a random box extent
    pub fn new<R: Rng + ?Sized>(kind: PowerKind, powers: &PowerSet, rng: &mut R) -> Self {
        let tuning = kind.tuning(powers);
        let (lo, hi) = powers.extent_range;
        let mut roll = || if hi > lo { rng.random_range(lo..hi) } else { lo };
        let size = Vec2::new(roll(), roll());
        Self {
            kind,
            pos: Vec2::ZERO,
            size,
            speed: tuning.speed,
            state: PowerState::Dormant,
            tuning,
        }
    }

    /// Falling and waiting to be hit
    pub fn is_active(&self) -> bool {
        matches!(self.state, PowerState::Spawned)
    }

    /// Collected and not yet respawned
    pub fn effect_is_active(&self) -> bool {
        matches!(self.state, PowerState::EffectActive { .. })
    }

    /// Collected and the payload is still applied
    pub fn payload_is_live(&self) -> bool {
        matches!(self.state, PowerState::EffectActive { expired: false, .. })
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    pub fn midpoint_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }

    /// Place at the top of the arena at a random x within this kind's band, moving down
    pub fn spawn<R: Rng + ?Sized>(&mut self, rng: &mut R, arena: Vec2) {
        let (band_lo, band_hi) = self.tuning.spawn_band;
        let lo = arena.x * band_lo;
        let hi = (arena.x * band_hi).min(arena.x - self.size.x);
        let x = if hi > lo { rng.random_range(lo..hi) } else { lo };

        self.pos = Vec2::new(x, 0.0);
        self.speed = self.tuning.speed.abs();
        self.state = PowerState::Spawned;
    }

    /// Vertical motion with a bounce that keeps the box inside `[0, H - h]`
    fn advance(&mut self, dt: f32, arena_height: f32) {
        self.pos.y += self.speed * dt;
        let floor = arena_height - self.size.y;
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.speed = self.speed.abs();
        } else if self.pos.y >= floor {
            self.pos.y = floor;
            self.speed = -self.speed.abs();
        }
    }
}

impl TimedEffect for PowerUp {
    fn update(&mut self, ctx: &mut EffectContext<'_>) {
        match self.state {
            PowerState::Dormant => {}
            PowerState::Spawned => {
                self.advance(ctx.dt, ctx.arena.y);
                if !self.bounds().intersects(&ctx.ball.bounds()) {
                    return;
                }

                let target = self.kind.target(ctx.ball.pos.x < self.midpoint_x());
                self.kind.apply(target, ctx);
                self.state = PowerState::EffectActive {
                    target,
                    elapsed: 0.0,
                    expired: false,
                };
                ctx.emit(GameEvent::PowerCollected {
                    kind: self.kind,
                    target,
                });
                log::debug!("{:?} collected, target {:?}", self.kind, target);
            }
            PowerState::EffectActive {
                target,
                mut elapsed,
                mut expired,
            } => {
                elapsed += ctx.dt;
                if !expired && elapsed >= self.tuning.duration {
                    self.kind.expire(target, ctx);
                    expired = true;
                    ctx.emit(GameEvent::PowerExpired { kind: self.kind });
                    log::debug!("{:?} expired", self.kind);
                }

                if elapsed >= self.tuning.cooldown() {
                    self.spawn(&mut *ctx.rng, ctx.arena);
                    ctx.emit(GameEvent::PowerRespawned { kind: self.kind });
                } else {
                    self.state = PowerState::EffectActive {
                        target,
                        elapsed,
                        expired,
                    };
                }
            }
        }
    }

    fn restore(&mut self, ctx: &mut EffectContext<'_>) {
        if let PowerState::EffectActive {
            target,
            expired: false,
            ..
        } = self.state
        {
            self.kind.expire(target, ctx);
        }
        self.state = PowerState::Dormant;
    }

    fn is_visible(&self) -> bool {
        self.is_active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Ball, BallShape, GameMode, Paddle, Scoreboard};
    use crate::tuning::Tuning;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    struct World {
        tuning: Tuning,
        ball: Ball,
        left: Paddle,
        right: Paddle,
        scores: Scoreboard,
        rng: Pcg32,
        events: Vec<GameEvent>,
    }

    impl World {
        fn new() -> Self {
            let tuning = Tuning::default();
            Self {
                ball: Ball::new(BallShape::Classic, GameMode::Fun, tuning.arena_center()),
                left: Paddle::new(Side::Left, &tuning),
                right: Paddle::new(Side::Right, &tuning),
                scores: Scoreboard::default(),
                rng: Pcg32::seed_from_u64(9),
                events: Vec::new(),
                tuning,
            }
        }

        fn ctx(&mut self, dt: f32) -> EffectContext<'_> {
            EffectContext {
                dt,
                arena: self.tuning.arena(),
                ball: &mut self.ball,
                left: &mut self.left,
                right: &mut self.right,
                scores: &mut self.scores,
                rng: &mut self.rng,
                events: &mut self.events,
            }
        }

        fn power(&mut self, kind: PowerKind) -> PowerUp {
            let mut power = PowerUp::new(kind, &self.tuning.powers, &mut self.rng);
            power.spawn(&mut self.rng, self.tuning.arena());
            power
        }
    }

    /// Park the ball just left of the power's midpoint, overlapping it
    fn ball_left_of(power: &PowerUp, world: &mut World) {
        world.ball.pos = Vec2::new(power.midpoint_x() - 1.0, power.pos.y + power.size.y / 2.0);
        world.ball.vel = Vec2::ZERO;
    }

    /// Move the ball well away so nothing is collected
    fn ball_away(world: &mut World) {
        world.ball.pos = Vec2::new(400.0, 590.0);
    }

    #[test]
    fn test_new_extent_in_range() {
        let mut world = World::new();
        for kind in PowerKind::ALL {
            let power = PowerUp::new(kind, &world.tuning.powers, &mut world.rng);
            for extent in [power.size.x, power.size.y] {
                assert!((30.0..50.0).contains(&extent));
            }
            assert_eq!(power.state, PowerState::Dormant);
        }
    }

    #[test]
    fn test_spawn_within_band() {
        let mut world = World::new();
        for _ in 0..100 {
            let power = world.power(PowerKind::ControlInverter);
            assert!(power.pos.x >= 320.0 && power.pos.x < 720.0);
            assert_eq!(power.pos.y, 0.0);
            assert!(power.speed > 0.0);
            assert!(power.is_active());
        }
    }

    #[test]
    fn test_booster_doubles_left_then_halves() {
        let mut world = World::new();
        let mut power = world.power(PowerKind::SizeBooster);
        ball_left_of(&power, &mut world);

        power.update(&mut world.ctx(0.0));
        assert!(power.effect_is_active());
        assert!(!power.is_active());
        assert_eq!(world.left.height, 200.0);
        assert_eq!(world.right.height, 100.0);

        ball_away(&mut world);
        power.update(&mut world.ctx(9.9));
        assert_eq!(world.left.height, 200.0);

        power.update(&mut world.ctx(0.2));
        assert_eq!(world.left.height, 100.0);
        assert!(power.is_active());
        assert!(world.events.contains(&GameEvent::PowerExpired {
            kind: PowerKind::SizeBooster
        }));
    }

    #[test]
    fn test_inverter_targets_opposite_paddle() {
        let mut world = World::new();
        let mut power = world.power(PowerKind::ControlInverter);
        ball_left_of(&power, &mut world);

        power.update(&mut world.ctx(0.0));
        assert!(world.right.inverted);
        assert!(!world.left.inverted);

        ball_away(&mut world);
        power.update(&mut world.ctx(3.0));
        assert!(!world.right.inverted);
        assert!(power.effect_is_active());

        power.update(&mut world.ctx(6.0));
        assert!(power.is_active());
    }

    #[test]
    fn test_visibility_hides_ball_for_duration_then_cools_down() {
        let mut world = World::new();
        let mut power = world.power(PowerKind::VisibilityToggle);
        ball_left_of(&power, &mut world);

        power.update(&mut world.ctx(0.0));
        assert!(world.ball.is_hidden());
        assert_eq!(
            world.events[0],
            GameEvent::PowerCollected {
                kind: PowerKind::VisibilityToggle,
                target: None
            }
        );

        ball_away(&mut world);
        power.update(&mut world.ctx(3.0));
        assert_eq!(world.ball.color, FOREGROUND);
        assert!(power.effect_is_active());
        assert!(!power.payload_is_live());

        power.update(&mut world.ctx(9.0));
        assert!(power.effect_is_active());
        power.update(&mut world.ctx(1.0));
        assert!(power.is_active());
    }

    #[test]
    fn test_restore_undoes_live_payload() {
        let mut world = World::new();
        let mut power = world.power(PowerKind::SizeBooster);
        world.ball.pos = Vec2::new(power.midpoint_x() + 1.0, power.pos.y + 5.0);

        power.update(&mut world.ctx(0.0));
        assert_eq!(world.right.height, 200.0);

        power.restore(&mut world.ctx(0.0));
        assert_eq!(world.right.height, 100.0);
        assert_eq!(power.state, PowerState::Dormant);
        assert!(!power.is_visible());
    }

    #[test]
    fn test_bounce_at_floor() {
        let mut world = World::new();
        let mut power = world.power(PowerKind::SizeBooster);
        ball_away(&mut world);
        world.ball.pos.x = 5.0;
        power.pos.y = 600.0 - power.size.y - 1.0;

        power.update(&mut world.ctx(0.1));
        assert_eq!(power.pos.y, 600.0 - power.size.y);
        assert!(power.speed < 0.0);
    }

    proptest! {
        #[test]
        fn prop_never_active_and_effect_active(
            seed in any::<u64>(),
            steps in prop::collection::vec((0.0f32..0.05, 0.0f32..800.0, 0.0f32..600.0), 1..300),
        ) {
            let mut world = World::new();
            world.rng = Pcg32::seed_from_u64(seed);
            let mut powers: Vec<PowerUp> =
                PowerKind::ALL.iter().map(|k| world.power(*k)).collect();
            for (dt, x, y) in steps {
                world.ball.pos = Vec2::new(x, y);
                for power in &mut powers {
                    power.update(&mut world.ctx(dt));
                    prop_assert!(!(power.is_active() && power.effect_is_active()));
                    prop_assert!(power.pos.y >= 0.0);
                    prop_assert!(power.pos.y <= 600.0 - power.size.y);
                }
            }
        }
    }
}
