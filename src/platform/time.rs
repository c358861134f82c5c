//! Frame pacing

use std::time::{Duration, Instant};

use crate::consts::SIM_DT;

/// Caps the host loop to a fixed frame rate by sleeping until a monotonic
/// deadline.
#[derive(Debug)]
pub struct FramePacer {
    frame: Duration,
    deadline: Instant,
}

impl FramePacer {
    pub fn new(frame: Duration) -> Self {
        Self {
            frame,
            deadline: Instant::now() + frame,
        }
    }

    /// One sim step per frame
    pub fn sim_rate() -> Self {
        Self::new(Duration::from_secs_f32(SIM_DT))
    }

    pub fn frame(&self) -> Duration {
        self.frame
    }

    /// Sleep until the current frame's deadline, then arm the next one.
    ///
    /// Returns how long it slept. A frame that overran resets the deadline
    /// instead of trying to catch up.
    pub fn wait(&mut self) -> Duration {
        let now = Instant::now();
        let slept = if now < self.deadline {
            let remaining = self.deadline - now;
            std::thread::sleep(remaining);
            remaining
        } else {
            Duration::ZERO
        };
        let next = self.deadline + self.frame;
        self.deadline = if next < Instant::now() {
            Instant::now() + self.frame
        } else {
            next
        };
        slept
    }
}
