//! Keyboard input

use std::collections::VecDeque;

use crate::sim::{PaddleInput, TickInput};

/// Keys the game reads each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub w: bool,
    pub s: bool,
    pub up: bool,
    pub down: bool,
    /// Pause key (edge, not level)
    pub pause: bool,
}

impl KeyState {
    /// W/S drive the left paddle, the arrow keys the right one
    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            left: PaddleInput {
                up: self.w,
                down: self.s,
            },
            right: PaddleInput {
                up: self.up,
                down: self.down,
            },
            pause: self.pause,
        }
    }
}

/// Anything that can report the current key state once per frame
pub trait InputSource {
    fn poll(&mut self) -> KeyState;
}

/// Replays a fixed sequence of key states, then reports no keys held
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeyState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = KeyState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }

    /// Hold `keys` for `frames` frames
    pub fn hold(mut self, keys: KeyState, frames: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(keys, frames));
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> KeyState {
        self.frames.pop_front().unwrap_or_default()
    }
}
