use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameTime {
    /// Seconds since the first ticked frame. Never decreases.
    pub elapsed: f64,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// The epoch is the first `tick()`, so the first frame always sees `0.0`
/// regardless of how long startup took.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    epoch: Option<Instant>,
    frame_index: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restarts elapsed time at zero on the next tick.
    pub fn reset(&mut self) {
        self.epoch = None;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> FrameTime {
        let epoch = *self.epoch.get_or_insert(now);
        let elapsed: Duration = now.saturating_duration_since(epoch);

        let ft = FrameTime {
            elapsed: elapsed.as_secs_f64(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}
