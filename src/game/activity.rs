//! Rolling-window click counter ("active CPS").

use std::collections::VecDeque;

pub struct ActivityMeter {
    window_ms: f64,
    /// Click timestamps in milliseconds, oldest first.
    timestamps: VecDeque<f64>,
}

impl ActivityMeter {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            timestamps: VecDeque::new(),
        }
    }

    pub fn record_event(&mut self, timestamp_ms: f64) {
        self.timestamps.push_back(timestamp_ms);
    }

    /// Drop events older than the window and return how many remain.
    pub fn current_rate(&mut self, now_ms: f64) -> u32 {
        let cutoff = now_ms - self.window_ms;
        while self.timestamps.front().is_some_and(|&ts| ts <= cutoff) {
            self.timestamps.pop_front();
        }
        self.timestamps.len() as u32
    }
}
