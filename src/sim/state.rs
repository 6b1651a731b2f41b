//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`. Entities are plain
//! owned values, so a collision call can never be handed a missing ball or paddle.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ai::{AiController, Difficulty};
use super::collision::Aabb;
use super::effects::{EffectContext, TimedEffect};
use super::letter::LetterDrop;
use super::powers::{PowerKind, PowerUp};
use crate::tuning::Tuning;

/// Which half of the arena a paddle or player belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const ORANGE: Color = Color::rgb(255, 165, 0);
    pub const RED: Color = Color::rgb(220, 20, 60);
    pub const GREEN: Color = Color::rgb(34, 139, 34);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const PURPLE: Color = Color::rgb(128, 0, 128);

    /// Normalized RGBA for vertex colours
    pub fn to_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }
}

/// Colour entities are drawn in
pub const FOREGROUND: Color = Color::WHITE;
/// Arena background; a ball painted this colour is invisible
pub const BACKGROUND: Color = Color::BLACK;

/// Visual ball variants. Physics always uses the square bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallShape {
    #[default]
    Classic,
    Square,
    Triangle,
}

impl BallShape {
    /// Bounding box side length
    pub fn diameter(self) -> f32 {
        match self {
            BallShape::Classic => 35.0,
            BallShape::Square | BallShape::Triangle => 20.0,
        }
    }

    /// Selector stored in save files (0 classic, 1 square, 2 triangle)
    pub fn selector(self) -> i32 {
        match self {
            BallShape::Classic => 0,
            BallShape::Square => 1,
            BallShape::Triangle => 2,
        }
    }

    /// Unknown selectors fall back to the classic ball
    pub fn from_selector(selector: i32) -> Self {
        match selector {
            1 => BallShape::Square,
            2 => BallShape::Triangle,
            _ => BallShape::Classic,
        }
    }
}

/// Ruleset layered on top of the shared physics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans, open-ended session
    #[default]
    TwoPlayer,
    /// Human vs AI, first to the win score
    VersusAi,
    /// Rounds with the falling-letter collectible
    Storytime,
    /// Rounds with all three power-ups
    Fun,
}

impl GameMode {
    pub fn playing_phase(self) -> GamePhase {
        match self {
            GameMode::TwoPlayer => GamePhase::Playing,
            GameMode::VersusAi => GamePhase::AiPlaying,
            GameMode::Storytime => GamePhase::StorytimePlaying,
            GameMode::Fun => GamePhase::FunPlaying,
        }
    }

    /// Per-round score threshold for round-based modes
    pub fn round_threshold(self, tuning: &Tuning) -> Option<u32> {
        match self {
            GameMode::Storytime => Some(tuning.storytime_round_score),
            GameMode::Fun => Some(tuning.fun_round_score),
            GameMode::TwoPlayer | GameMode::VersusAi => None,
        }
    }
}

/// Coarse phase of the simulation. Menus live outside the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No mode selected yet, or the mode was exited
    Idle,
    Playing,
    AiPlaying,
    StorytimePlaying,
    FunPlaying,
    Paused,
    GameOver,
}

impl GamePhase {
    /// True for the four phases that advance the simulation
    pub fn is_running(self) -> bool {
        matches!(
            self,
            GamePhase::Playing
                | GamePhase::AiPlaying
                | GamePhase::StorytimePlaying
                | GamePhase::FunPlaying
        )
    }
}

/// Discrete notifications for audio and UI collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WallHit,
    PaddleHit { side: Side },
    Scored { side: Side },
    RoundComplete { winner: Side },
    /// `None` is a tie
    MatchComplete { winner: Option<Side> },
    PowerCollected { kind: PowerKind, target: Option<Side> },
    PowerExpired { kind: PowerKind },
    PowerRespawned { kind: PowerKind },
    LetterCollected { glyph: char, side: Side },
}

/// Pick a serve velocity: fixed speed, within ±45° of horizontal, random facing
pub fn serve_velocity<R: Rng + ?Sized>(rng: &mut R, speed: f32) -> Vec2 {
    let mut angle = rng.random_range(-FRAC_PI_4..=FRAC_PI_4);
    if rng.random_bool(0.5) {
        angle += PI;
    }
    Vec2::new(angle.cos(), angle.sin()) * speed
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub shape: BallShape,
    pub color: Color,
    /// Mode this ball was created for
    pub mode: GameMode,
}

impl Ball {
    pub fn new(shape: BallShape, mode: GameMode, center: Vec2) -> Self {
        Self {
            pos: center,
            vel: Vec2::ZERO,
            shape,
            color: FOREGROUND,
            mode,
        }
    }

    pub fn size(&self) -> f32 {
        self.shape.diameter()
    }

    pub fn radius(&self) -> f32 {
        self.size() / 2.0
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, Vec2::splat(self.size()))
    }

    pub fn is_hidden(&self) -> bool {
        self.color == BACKGROUND
    }

    /// Re-centre and serve in a new random direction
    pub fn reset<R: Rng + ?Sized>(&mut self, center: Vec2, speed: f32, rng: &mut R) {
        self.pos = center;
        self.vel = serve_velocity(rng, speed);
    }
}

/// Per-tick directional input for one paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaddleInput {
    pub up: bool,
    pub down: bool,
}

/// A player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Centre x (fixed per side)
    pub x: f32,
    /// Centre y
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Height the paddle returns to when effects are cleared
    pub base_height: f32,
    pub speed: f32,
    /// Up/down mapping swapped by the control inverter
    pub inverted: bool,
}

impl Paddle {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        let x = match side {
            Side::Left => tuning.left_paddle_x,
            Side::Right => tuning.right_paddle_x,
        };
        Self {
            side,
            x,
            y: tuning.arena_height / 2.0,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
            base_height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            inverted: false,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(Vec2::new(self.x, self.y), Vec2::new(self.width, self.height))
    }

    /// Move from human input, honouring inversion, then clamp
    pub fn update(&mut self, input: PaddleInput, dt: f32, arena_height: f32) {
        let multiplier = if self.inverted { -1.0 } else { 1.0 };
        if input.up {
            self.y -= multiplier * self.speed * dt;
        }
        if input.down {
            self.y += multiplier * self.speed * dt;
        }
        self.clamp_to_arena(arena_height);
    }

    /// Keep the paddle fully inside the arena: y in [h/2, H - h/2]
    pub fn clamp_to_arena(&mut self, arena_height: f32) {
        let half = self.height / 2.0;
        self.y = self.y.max(half).min(arena_height - half);
    }

    pub fn set_height(&mut self, height: f32, arena_height: f32) {
        self.height = height;
        self.clamp_to_arena(arena_height);
    }

    /// Drop every transient effect
    pub fn restore_baseline(&mut self, arena_height: f32) {
        self.inverted = false;
        self.set_height(self.base_height, arena_height);
    }

    pub fn recenter(&mut self, arena_height: f32) {
        self.y = arena_height / 2.0;
        self.clamp_to_arena(arena_height);
    }
}

/// Longest name a save slot can hold, in bytes
pub const MAX_NAME_BYTES: usize = 19;

/// Cut `name` to at most `MAX_NAME_BYTES` without splitting a character
pub fn clamp_name(name: &str) -> &str {
    let mut end = name.len().min(MAX_NAME_BYTES);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// A player's name and tallies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub score: u32,
    pub rounds: u32,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        let name: String = name.into();
        Self {
            name: clamp_name(&name).to_owned(),
            score: 0,
            rounds: 0,
        }
    }
}

/// Both players, indexed by side
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub left: Player,
    pub right: Player,
}

impl Scoreboard {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: Player::new(left),
            right: Player::new(right),
        }
    }

    pub fn get(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.get(side).score
    }

    pub fn award_point(&mut self, side: Side) {
        self.get_mut(side).score += 1;
    }

    pub fn reset_scores(&mut self) {
        self.left.score = 0;
        self.right.score = 0;
    }

    pub fn reset_all(&mut self) {
        self.reset_scores();
        self.left.rounds = 0;
        self.right.rounds = 0;
    }

    pub fn total_rounds(&self) -> u32 {
        self.left.rounds + self.right.rounds
    }

    /// Side with the strictly higher score, `None` on a tie
    pub fn score_leader(&self) -> Option<Side> {
        use std::cmp::Ordering;
        match self.left.score.cmp(&self.right.score) {
            Ordering::Greater => Some(Side::Left),
            Ordering::Less => Some(Side::Right),
            Ordering::Equal => None,
        }
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub mode: GameMode,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    pub scores: Scoreboard,
    pub ai: AiController,
    /// One machine per kind, in update order
    pub powers: [PowerUp; 3],
    pub letter: LetterDrop,
    /// Set when the match ends; `None` with `GameOver` is a tie
    pub winner: Option<Side>,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let powers = PowerKind::ALL.map(|kind| PowerUp::new(kind, &tuning.powers, &mut rng));
        Self {
            seed,
            mode: GameMode::default(),
            phase: GamePhase::Idle,
            time_ticks: 0,
            ball: Ball::new(BallShape::Classic, GameMode::default(), tuning.arena_center()),
            left: Paddle::new(Side::Left, &tuning),
            right: Paddle::new(Side::Right, &tuning),
            scores: Scoreboard::new("Player 1", "Player 2"),
            ai: AiController::new(Difficulty::Normal, tuning.ai_dead_zone),
            powers,
            letter: LetterDrop::new(&tuning.letter),
            winner: None,
            events: Vec::new(),
            rng,
            tuning,
        }
    }

    /// Replace the random source with a freshly seeded one
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Names longer than a save slot are cut so the live state matches what gets saved
    pub fn set_player_names(&mut self, left: impl AsRef<str>, right: impl AsRef<str>) {
        self.scores.left.name = clamp_name(left.as_ref()).to_owned();
        self.scores.right.name = clamp_name(right.as_ref()).to_owned();
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn power(&self, kind: PowerKind) -> Option<&PowerUp> {
        self.powers.iter().find(|p| p.kind == kind)
    }

    /// Enter a playing mode with a fresh ball, paddles, tallies and effects
    pub fn start(&mut self, mode: GameMode, shape: BallShape) {
        if self.phase != GamePhase::Idle {
            self.exit_mode();
        }

        let h = self.tuning.arena_height;
        self.mode = mode;
        self.scores.reset_all();
        self.left.restore_baseline(h);
        self.right.restore_baseline(h);
        self.left.recenter(h);
        self.right.recenter(h);

        self.ball = Ball::new(shape, mode, self.tuning.arena_center());
        self.ball.vel = self.tuning.opening_velocity();
        self.winner = None;
        self.time_ticks = 0;
        self.events.clear();

        match mode {
            GameMode::Storytime => self.letter.activate(self.tuning.arena()),
            GameMode::Fun => {
                let arena = self.tuning.arena();
                for power in &mut self.powers {
                    power.spawn(&mut self.rng, arena);
                }
            }
            GameMode::TwoPlayer | GameMode::VersusAi => {}
        }
        self.ai.side = (mode == GameMode::VersusAi).then_some(Side::Right);

        self.phase = mode.playing_phase();
        log::info!("Started {:?} with {:?} ball", mode, shape);
    }

    /// Leave the current mode, undoing any live effect payloads
    pub fn exit_mode(&mut self) {
        let h = self.tuning.arena_height;
        {
            let (mut ctx, powers, letter) = self.split_effects(0.0);
            for power in powers.iter_mut() {
                power.restore(&mut ctx);
            }
            letter.restore(&mut ctx);
        }
        self.left.restore_baseline(h);
        self.right.restore_baseline(h);
        self.ball.color = FOREGROUND;
        self.ai.side = None;
        self.phase = GamePhase::Idle;
        log::info!("Exited {:?}", self.mode);
    }

    pub fn pause(&mut self) {
        if self.phase.is_running() {
            self.phase = GamePhase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = self.mode.playing_phase();
        }
    }

    /// Close an open-ended session; the strictly higher score wins
    pub fn end_session(&mut self) -> Option<Side> {
        let winner = self.scores.score_leader();
        self.finish(winner);
        winner
    }

    pub(crate) fn finish(&mut self, winner: Option<Side>) {
        self.winner = winner;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::MatchComplete { winner });
        match winner {
            Some(side) => log::info!("Match over, {} wins", self.scores.get(side).name),
            None => log::info!("Match over, it's a tie"),
        }
    }

    /// Borrow the effect machines alongside the context they mutate
    pub(crate) fn split_effects(
        &mut self,
        dt: f32,
    ) -> (EffectContext<'_>, &mut [PowerUp; 3], &mut LetterDrop) {
        let Self {
            tuning,
            ball,
            left,
            right,
            scores,
            powers,
            letter,
            events,
            rng,
            ..
        } = self;
        let ctx = EffectContext {
            dt,
            arena: tuning.arena(),
            ball,
            left,
            right,
            scores,
            rng,
            events,
        };
        (ctx, powers, letter)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events raised since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
