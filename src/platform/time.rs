//! Fixed-cadence frame pacing

use std::time::{Duration, Instant};

/// Sleeps away whatever is left of each frame
#[derive(Debug)]
pub struct FrameClock {
    frame: Duration,
    frame_start: Instant,
    frames: u64,
    /// Frames that overran their budget
    late_frames: u64,
}

impl FrameClock {
    pub fn new(fps: u32) -> Self {
        Self {
            frame: Self::period(fps),
            frame_start: Instant::now(),
            frames: 0,
            late_frames: 0,
        }
    }

    /// Duration of one frame at `fps`
    pub fn period(fps: u32) -> Duration {
        Duration::from_secs(1) / fps.max(1)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Block until the current frame's time is up, then start the next one
    pub fn wait(&mut self) {
        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame {
            std::thread::sleep(self.frame - elapsed);
        } else {
            self.late_frames += 1;
            log::trace!("Frame {} overran by {:?}", self.frames, elapsed - self.frame);
        }
        self.frames += 1;
        self.frame_start = Instant::now();
    }
}
