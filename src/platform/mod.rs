//! Platform abstraction layer
//!
//! Handles the pieces of the frame loop that touch the outside world:
//! - Keyboard state for both paddles
//! - Wall-clock time and the minimum frame interval

pub mod input;
pub mod time;

pub use input::{InputSource, KeyState, ScriptedInput};
pub use time::{FrameClock, ManualTime, SystemClock, TimeSource};
