//! Fixed-step clock.
//!
//! The browser calls `draw_web()` at display rate with uneven deltas; `GameTime` turns that
//! into whole game ticks (10 per second by default) so passive income and effect lifetimes
//! stay frame-rate independent.

pub struct GameTime {
    ms_per_tick: f64,
    /// Longest frame delta accepted. Backgrounded tabs resume without a burst.
    max_delta_ms: f64,
    accumulator: f64,
    pub total_ticks: u64,
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(ticks_per_sec: u32, max_delta_ms: f64) -> Self {
        Self {
            ms_per_tick: 1000.0 / ticks_per_sec.max(1) as f64,
            max_delta_ms,
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a `performance.now()` timestamp; returns the ticks to run this frame.
    pub fn update(&mut self, now_ms: f64) -> u32 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, self.max_delta_ms),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u32;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks as u64;
        ticks
    }
}
