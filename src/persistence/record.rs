//! Fixed-layout save record
//!
//! Layout (native endian, 76 bytes, no padding):
//! score1 i32, score2 i32, paddle1_y f32, paddle2_y f32, ball_x f32, ball_y f32,
//! ball_vx f32, ball_vy f32, ball_type i32, name1 [u8; 20], name2 [u8; 20].
//! Names are NUL-terminated; every byte on disk is XORed with `OBFUSCATION_KEY`.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::PersistenceError;
use crate::sim::{BallShape, GameMode, GameState, MAX_NAME_BYTES, clamp_name};

/// Bytes per player name, including the terminating NUL
pub const NAME_LEN: usize = MAX_NAME_BYTES + 1;

/// Single-byte XOR key applied to the whole record on disk
pub const OBFUSCATION_KEY: u8 = 0x83;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SaveRecord {
    pub score1: i32,
    pub score2: i32,
    pub paddle1_y: f32,
    pub paddle2_y: f32,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub ball_type: i32,
    pub name1: [u8; NAME_LEN],
    pub name2: [u8; NAME_LEN],
}

impl SaveRecord {
    pub const SIZE: usize = std::mem::size_of::<SaveRecord>();

    /// Snapshot the parts of a running game that survive a save
    pub fn capture(state: &GameState) -> Self {
        Self {
            score1: clamp_score(state.scores.left.score),
            score2: clamp_score(state.scores.right.score),
            paddle1_y: state.left.y,
            paddle2_y: state.right.y,
            ball_x: state.ball.pos.x,
            ball_y: state.ball.pos.y,
            ball_vx: state.ball.vel.x,
            ball_vy: state.ball.vel.y,
            ball_type: state.ball.shape.selector(),
            name1: encode_name(&state.scores.left.name),
            name2: encode_name(&state.scores.right.name),
        }
    }

    /// Reject records that would put the simulation in an impossible state
    pub fn validate(&self) -> Result<(), PersistenceError> {
        let floats = [
            self.paddle1_y,
            self.paddle2_y,
            self.ball_x,
            self.ball_y,
            self.ball_vx,
            self.ball_vy,
        ];
        if floats.iter().any(|f| !f.is_finite()) {
            return Err(PersistenceError::Corrupt("non-finite position or velocity"));
        }
        if self.score1 < 0 || self.score2 < 0 {
            return Err(PersistenceError::Corrupt("negative score"));
        }
        Ok(())
    }

    /// Resume a two-player game from this record
    pub fn restore_into(&self, state: &mut GameState) -> Result<(), PersistenceError> {
        self.validate()?;

        state.start(GameMode::TwoPlayer, BallShape::from_selector(self.ball_type));
        state.set_player_names(decode_name(&self.name1), decode_name(&self.name2));
        state.scores.left.score = self.score1.unsigned_abs();
        state.scores.right.score = self.score2.unsigned_abs();

        let arena_height = state.tuning.arena_height;
        state.left.y = self.paddle1_y;
        state.right.y = self.paddle2_y;
        state.left.clamp_to_arena(arena_height);
        state.right.clamp_to_arena(arena_height);

        state.ball.pos = Vec2::new(self.ball_x, self.ball_y);
        state.ball.vel = Vec2::new(self.ball_vx, self.ball_vy);
        Ok(())
    }

    /// On-disk bytes
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = bytemuck::bytes_of(self).to_vec();
        obfuscate(&mut bytes);
        bytes
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, PersistenceError> {
        if bytes.len() != Self::SIZE {
            return Err(PersistenceError::Truncated {
                expected: Self::SIZE,
                actual: bytes.len(),
            });
        }
        let mut plain = bytes.to_vec();
        obfuscate(&mut plain);
        Ok(bytemuck::pod_read_unaligned(&plain))
    }
}

fn clamp_score(score: u32) -> i32 {
    i32::try_from(score).unwrap_or(i32::MAX)
}

/// XOR is its own inverse, so this both encodes and decodes
fn obfuscate(bytes: &mut [u8]) {
    for b in bytes {
        *b ^= OBFUSCATION_KEY;
    }
}

/// Truncate to fit with a terminating NUL, never splitting a UTF-8 character
fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let mut out = [0u8; NAME_LEN];
    let name = clamp_name(name);
    out[..name.len()].copy_from_slice(name.as_bytes());
    out
}

fn decode_name(raw: &[u8; NAME_LEN]) -> String {
    let end = raw.iter().position(|b| *b == 0).unwrap_or(NAME_LEN);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    fn sample_state() -> GameState {
        let mut state = GameState::new(8);
        state.start(GameMode::TwoPlayer, BallShape::Triangle);
        state.set_player_names("Ada", "Grace");
        state.scores.left.score = 4;
        state.scores.right.score = 7;
        state.left.y = 120.0;
        state.right.y = 480.0;
        state.ball.pos = Vec2::new(512.5, 33.0);
        state.ball.vel = Vec2::new(-210.0, 95.0);
        state
    }

    #[test]
    fn test_record_is_76_bytes() {
        assert_eq!(SaveRecord::SIZE, 76);
    }

    #[test]
    fn test_restore_reproduces_capture() {
        let saved = sample_state();
        let record = SaveRecord::capture(&saved);
        let bytes = record.encode();

        let mut restored = GameState::new(99);
        SaveRecord::decode(&bytes)
            .and_then(|r| r.restore_into(&mut restored))
            .unwrap();

        assert_eq!(restored.phase, GamePhase::Playing);
        assert_eq!(restored.scores.left.score, 4);
        assert_eq!(restored.scores.right.score, 7);
        assert_eq!(restored.scores.left.name, "Ada");
        assert_eq!(restored.scores.right.name, "Grace");
        assert_eq!(restored.left.y, 120.0);
        assert_eq!(restored.right.y, 480.0);
        assert_eq!(restored.ball.pos, saved.ball.pos);
        assert_eq!(restored.ball.vel, saved.ball.vel);
        assert_eq!(restored.ball.shape, BallShape::Triangle);
    }

    #[test]
    fn test_bytes_are_obfuscated() {
        let record = SaveRecord::capture(&sample_state());
        let encoded = record.encode();
        let plain = bytemuck::bytes_of(&record);
        assert!(encoded.iter().zip(plain).all(|(e, p)| *e == p ^ 0x83));
    }

    #[test]
    fn test_short_file_is_rejected() {
        let err = SaveRecord::decode(&[0x83; 40]).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Truncated {
                expected: 76,
                actual: 40
            }
        ));
    }

    #[test]
    fn test_long_name_is_truncated_with_nul() {
        let raw = encode_name("Bartholomew-the-Magnificent");
        assert_eq!(raw[NAME_LEN - 1], 0);
        assert_eq!(decode_name(&raw), "Bartholomew-the-Mag");

        // 'é' is two bytes and must not be split
        let raw = encode_name("ééééééééééé");
        assert_eq!(decode_name(&raw), "ééééééééé");
    }

    #[test]
    fn test_non_finite_record_is_rejected() {
        let mut record = SaveRecord::capture(&sample_state());
        record.ball_vx = f32::NAN;
        let mut state = GameState::new(1);
        assert!(record.restore_into(&mut state).is_err());
        assert_eq!(state.phase, GamePhase::Idle);
    }

    #[test]
    fn test_unknown_ball_type_falls_back() {
        let mut record = SaveRecord::capture(&sample_state());
        record.ball_type = 9;
        let mut state = GameState::new(1);
        record.restore_into(&mut state).unwrap();
        assert_eq!(state.ball.shape, BallShape::Classic);
    }
}
