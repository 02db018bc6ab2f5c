/// Fixed-step simulation clock.
///
/// Time only moves when the game loop calls `advance`, once per playing
/// tick, so every time-dependent rule (animation, difficulty, survival
/// score) is deterministic and testable without a wall clock.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimClock {
    ticks: u64,
    tick_rate: u32,
}

impl SimClock {
    pub fn new(tick_rate: u32) -> Self {
        SimClock {
            ticks: 0,
            tick_rate: tick_rate.max(1),
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated milliseconds since the clock started, floored.
    pub fn elapsed_ms(&self) -> u64 {
        self.ticks * 1000 / self.tick_rate as u64
    }

    /// Whole survived seconds, floored.
    pub fn elapsed_secs(&self) -> u64 {
        self.ticks / self.tick_rate as u64
    }
}
