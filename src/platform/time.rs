//! Frame timing
//!
//! The simulation advances in whole frames only. On the web the browser picks
//! the display rate, so elapsed time is accumulated and converted into a count
//! of fixed steps. Natively the loop blocks until the next frame deadline.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Converts variable frame deltas into a number of fixed simulation steps
#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds and return how many ticks to run now.
    ///
    /// Large gaps (tab switches, debugger pauses) are capped so the loop never
    /// tries to catch up more than `MAX_SUBSTEPS` frames at once.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, 0.25);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Blocking 60 Hz pacer for the native loop
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct FrameClock {
    period: std::time::Duration,
    next_frame: std::time::Instant,
}

#[cfg(not(target_arch = "wasm32"))]
impl FrameClock {
    pub fn new(fps: u32) -> Self {
        let period = std::time::Duration::from_secs(1) / fps.max(1);
        Self {
            period,
            next_frame: std::time::Instant::now() + period,
        }
    }

    /// Sleep until the next frame boundary. A late frame is not made up for:
    /// the schedule restarts from now.
    pub fn wait_for_next_frame(&mut self) {
        let now = std::time::Instant::now();
        if now < self.next_frame {
            std::thread::sleep(self.next_frame - now);
            self.next_frame += self.period;
        } else {
            self.next_frame = now + self.period;
        }
    }

    pub fn period(&self) -> std::time::Duration {
        self.period
    }
}
