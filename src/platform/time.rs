//! Frame timing
//!
//! The loop is single-threaded: `FrameClock::wait_frame` spins until the
//! minimum frame interval has elapsed, then reports the clamped step.

use std::time::Instant;

/// Monotonic millisecond clock
pub trait TimeSource {
    fn now_ms(&mut self) -> u64;
}

/// Wall clock, measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now_ms(&mut self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests; advances by `step_ms` every time it is read
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTime {
    pub now: u64,
    pub step_ms: u64,
}

impl ManualTime {
    pub fn new(step_ms: u64) -> Self {
        Self { now: 0, step_ms }
    }

    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&mut self) -> u64 {
        let now = self.now;
        self.now += self.step_ms;
        now
    }
}

/// Paces the frame loop and turns elapsed wall time into a simulation step
#[derive(Debug)]
pub struct FrameClock<T: TimeSource> {
    source: T,
    last_ms: u64,
    min_frame_ms: u64,
    max_dt: f32,
}

impl<T: TimeSource> FrameClock<T> {
    pub fn new(mut source: T, min_frame_ms: u64, max_dt: f32) -> Self {
        let last_ms = source.now_ms();
        Self {
            source,
            last_ms,
            min_frame_ms,
            max_dt,
        }
    }

    /// Busy-wait for the next frame and return its step in seconds, at most `max_dt`
    pub fn wait_frame(&mut self) -> f32 {
        let now = loop {
            let now = self.source.now_ms();
            if now.saturating_sub(self.last_ms) >= self.min_frame_ms {
                break now;
            }
            std::hint::spin_loop();
        };
        let elapsed = now.saturating_sub(self.last_ms);
        self.last_ms = now;
        (elapsed as f32 / 1000.0).min(self.max_dt)
    }

    pub fn source_mut(&mut self) -> &mut T {
        &mut self.source
    }
}
