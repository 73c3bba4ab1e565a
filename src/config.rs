//! Tunables for the clicker session and its browser shell.

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    /// Fixed game ticks per real-time second.
    pub ticks_per_sec: u32,
    /// Ticks between autosaves. 10 ticks/sec × 30 s = 300 ticks.
    pub autosave_interval_ticks: u32,
    /// Largest frame delta fed into the clock; a backgrounded tab resumes without a burst.
    pub max_frame_delta_ms: f64,
    /// Resource between two spawns.
    pub spawn_interval: f64,
    /// Window of the active-clicks-per-second meter.
    pub activity_window_ms: f64,
    /// Delay before the first replayed milestone effect after a load.
    pub replay_base_delay_ms: f64,
    /// Extra delay for each further replayed effect.
    pub replay_step_ms: f64,
    /// localStorage key of the save record.
    pub storage_key: &'static str,
    /// Language used for fresh sessions and unknown codes.
    pub default_language: &'static str,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ticks_per_sec: 10,
            autosave_interval_ticks: 300,
            max_frame_delta_ms: 500.0,
            spawn_interval: 10_000.0,
            activity_window_ms: 1_000.0,
            replay_base_delay_ms: 500.0,
            replay_step_ms: 750.0,
            storage_key: "clickerGameState",
            default_language: "de",
        }
    }
}

impl GameConfig {
    /// Seconds of game time covered by `ticks`.
    pub fn ticks_to_seconds(&self, ticks: u32) -> f64 {
        ticks as f64 / self.ticks_per_sec.max(1) as f64
    }

    pub fn ms_per_tick(&self) -> f64 {
        1000.0 / self.ticks_per_sec.max(1) as f64
    }
}
