//! Read-only snapshot of everything a frontend needs to draw one frame

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{
    BACKGROUND, BallShape, Color, GameMode, GamePhase, GameState, PowerKind, Side,
};

/// Background tier for one half of the arena
///
/// Tiers are checked highest-first from 7 down to 3; the 10+ tier sits after
/// them and never matches, so 10 and above stay purple.
pub fn score_tier(score: u32) -> Color {
    if score >= 7 {
        Color::PURPLE
    } else if score >= 5 {
        Color::RED
    } else if score >= 3 {
        Color::BLUE
    } else if score >= 10 {
        // NOTE: unreachable behind `>= 7`; kept to match the shipped tiers (see
        // "Background tiers" in DESIGN.md)
        Color::GREEN
    } else {
        BACKGROUND
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallView {
    pub center: Vec2,
    pub size: f32,
    pub shape: BallShape,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaddleView {
    pub side: Side,
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
    pub inverted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerView {
    pub kind: PowerKind,
    pub min: Vec2,
    pub size: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetterView {
    pub glyph: char,
    pub min: Vec2,
    pub size: Vec2,
    pub word: String,
    /// Glyphs collected so far, in order
    pub trail: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreView {
    pub name: String,
    pub score: u32,
    pub rounds: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub phase: GamePhase,
    pub mode: GameMode,
    pub arena: Vec2,
    /// Left and right halves
    pub backgrounds: [Color; 2],
    pub ball: BallView,
    pub paddles: [PaddleView; 2],
    /// Only powers currently falling
    pub powers: Vec<PowerView>,
    pub letter: Option<LetterView>,
    pub scores: [ScoreView; 2],
    pub winner: Option<Side>,
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        let paddle_view = |side: Side| {
            let paddle = state.paddle(side);
            let bounds = paddle.bounds();
            PaddleView {
                side,
                min: bounds.min,
                size: bounds.size(),
                inverted: paddle.inverted,
            }
        };
        let score_view = |side: Side| {
            let player = state.scores.get(side);
            ScoreView {
                name: player.name.clone(),
                score: player.score,
                rounds: player.rounds,
            }
        };

        // Tiers would reveal a hidden ball in Fun mode, so it keeps the plain background
        let backgrounds = if state.mode == GameMode::Fun {
            [BACKGROUND; 2]
        } else {
            [
                score_tier(state.scores.left.score),
                score_tier(state.scores.right.score),
            ]
        };

        let powers = state
            .powers
            .iter()
            .filter(|p| p.is_active())
            .map(|p| PowerView {
                kind: p.kind,
                min: p.pos,
                size: p.size,
            })
            .collect();

        let letter = if state.mode == GameMode::Storytime {
            state.letter.glyph().map(|glyph| LetterView {
                glyph,
                min: state.letter.pos,
                size: state.letter.size,
                word: state.letter.word(),
                trail: state.letter.collected().iter().collect(),
            })
        } else {
            None
        };

        Self {
            phase: state.phase,
            mode: state.mode,
            arena: state.tuning.arena(),
            backgrounds,
            ball: BallView {
                center: state.ball.pos,
                size: state.ball.size(),
                shape: state.ball.shape,
                color: state.ball.color,
            },
            paddles: [paddle_view(Side::Left), paddle_view(Side::Right)],
            powers,
            letter,
            scores: [score_view(Side::Left), score_view(Side::Right)],
            winner: state.winner,
        }
    }

    /// Everything except text as one triangle list, back to front
    pub fn vertices(&self) -> Vec<Vertex> {
        let half = Vec2::new(self.arena.x / 2.0, self.arena.y);
        let mut vertices = shapes::rect(Vec2::ZERO, half, self.backgrounds[0].to_f32());
        vertices.extend(shapes::rect(
            Vec2::new(half.x, 0.0),
            half,
            self.backgrounds[1].to_f32(),
        ));
        vertices.extend(shapes::rect(
            Vec2::new(half.x - 1.0, 0.0),
            Vec2::new(2.0, self.arena.y),
            colors::NET,
        ));

        for paddle in &self.paddles {
            vertices.extend(shapes::rect(paddle.min, paddle.size, colors::PADDLE));
        }
        for power in &self.powers {
            vertices.extend(shapes::power_fallback(power.kind, power.min, power.size));
        }
        if let Some(letter) = &self.letter {
            vertices.extend(shapes::rect(letter.min, letter.size, colors::LETTER));
        }
        vertices.extend(shapes::ball(
            self.ball.shape,
            self.ball.center,
            self.ball.size,
            self.ball.color.to_f32(),
        ));
        vertices
    }
}
