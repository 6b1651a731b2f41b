//! Storytime letters: a glyph drifts down the arena and scores for whoever's
//! half the ball is in when it is hit. Collected glyphs spell out the current word.

use glam::Vec2;

use super::collision::Aabb;
use super::effects::{EffectContext, TimedEffect};
use super::state::{GameEvent, Side};
use crate::tuning::LetterTuning;

#[derive(Debug, Clone)]
pub struct LetterDrop {
    words: Vec<Vec<char>>,
    word_index: usize,
    /// Index of the glyph currently falling within the word
    letter_index: usize,
    collected: Vec<char>,
    start: Vec2,
    base_speed: f32,
    active: bool,
    /// Top-left corner of the glyph box
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl LetterDrop {
    pub fn new(tuning: &LetterTuning) -> Self {
        let words: Vec<Vec<char>> = tuning
            .words
            .iter()
            .map(|w| w.chars().collect::<Vec<_>>())
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            log::warn!("No storytime words configured, letters disabled");
        }
        let start = Vec2::from(tuning.start);
        Self {
            words,
            word_index: 0,
            letter_index: 0,
            collected: Vec::new(),
            start,
            base_speed: tuning.speed.abs(),
            active: false,
            pos: start,
            size: Vec2::from(tuning.glyph_size),
            speed: tuning.speed.abs(),
        }
    }

    /// Start over from the first letter of the first word
    pub fn activate(&mut self, arena: Vec2) {
        self.word_index = 0;
        self.letter_index = 0;
        self.collected.clear();
        self.respawn(arena);
        self.active = !self.words.is_empty();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Glyph currently falling
    pub fn glyph(&self) -> Option<char> {
        if !self.active {
            return None;
        }
        self.words
            .get(self.word_index)
            .and_then(|w| w.get(self.letter_index))
            .copied()
    }

    pub fn word(&self) -> String {
        self.words
            .get(self.word_index)
            .map(|w| w.iter().collect())
            .unwrap_or_default()
    }

    /// Glyphs collected so far in the current word
    pub fn collected(&self) -> &[char] {
        &self.collected
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_corner(self.pos, self.size)
    }

    fn respawn(&mut self, arena: Vec2) {
        let x = self.start.x.min(arena.x - self.size.x).max(0.0);
        self.pos = Vec2::new(x, self.start.y);
        self.speed = self.base_speed;
    }

    /// Move to the next glyph, rolling over to the next word when this one is spelled out
    fn advance(&mut self) {
        let word_len = self.words.get(self.word_index).map_or(0, Vec::len);
        if self.letter_index + 1 >= word_len {
            self.collected.clear();
            self.word_index = (self.word_index + 1) % self.words.len().max(1);
            self.letter_index = 0;
            log::debug!("Storytime word complete, next is {}", self.word());
        } else {
            self.letter_index += 1;
        }
    }
}

impl TimedEffect for LetterDrop {
    fn update(&mut self, ctx: &mut EffectContext<'_>) {
        let Some(glyph) = self.glyph() else {
            return;
        };

        self.pos.y += self.speed * ctx.dt;
        let floor = ctx.arena.y - self.size.y;
        if self.pos.y <= 0.0 {
            self.pos.y = 0.0;
            self.speed = self.speed.abs();
        } else if self.pos.y >= floor {
            self.pos.y = floor;
            self.speed = -self.speed.abs();
        }

        if !self.bounds().touches_circle(ctx.ball.pos, ctx.ball.radius()) {
            return;
        }

        let side = if ctx.ball.pos.x < self.bounds().center().x {
            Side::Left
        } else {
            Side::Right
        };
        ctx.scores.award_point(side);
        self.collected.push(glyph);
        ctx.emit(GameEvent::LetterCollected { glyph, side });
        log::debug!("Letter '{glyph}' collected by {side:?}");

        self.advance();
        self.respawn(ctx.arena);
    }

    fn restore(&mut self, _ctx: &mut EffectContext<'_>) {
        self.active = false;
        self.collected.clear();
    }

    fn is_visible(&self) -> bool {
        self.glyph().is_some()
    }
}
