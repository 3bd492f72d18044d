/// Frame pacing.  The loop runs as fast as it may up to a ceiling; there
/// is no fixed simulation step, so every speed in the game is per frame.
use std::time::{Duration, Instant};

pub trait Clock {
    /// Block until at least `1 / max_fps` has passed since the last tick.
    fn tick(&mut self, max_fps: u32);
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug)]
pub struct FrameClock {
    frame_start: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
        }
    }
}

/// Minimum frame duration for a frame-rate ceiling.
pub fn frame_budget(max_fps: u32) -> Duration {
    Duration::from_secs(1) / max_fps.max(1)
}

impl Clock for FrameClock {
    fn tick(&mut self, max_fps: u32) {
        let budget = frame_budget(max_fps);
        let elapsed = self.frame_start.elapsed();
        if elapsed < budget {
            std::thread::sleep(budget - elapsed);
        }
        self.frame_start = Instant::now();
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
