//! One play session: progression, milestones, activity meter and pending effect events.
//!
//! Every operation that can raise `resource_total` runs the milestone and spawn checks
//! immediately afterwards, before control returns. Purchases only lower the resource, so
//! they never trigger checks.

use crate::config::GameConfig;

use super::activity::ActivityMeter;
use super::catalog::UpgradeType;
use super::cost;
use super::milestone::{MilestoneEffect, MilestoneEngine, ReplayCue};
use super::save::{self, SaveRecord};
use super::state::{ProgressionState, PurchaseMode, PurchaseOutcome, BULK_PURCHASE_COUNT};

/// Something the presentation layer should show.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EffectEvent {
    Milestone(MilestoneEffect),
    Spawn,
}

/// Snapshot of one upgrade row for display.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeView {
    pub kind: UpgradeType,
    pub level: u32,
    /// Cost of the next single unit.
    pub cost: f64,
    pub max_affordable: u32,
    /// Units the displayed mode stands for: 1, 10, or the max-affordable count.
    pub mode_count: u32,
    /// Total price of `mode_count` units.
    pub mode_cost: f64,
    /// Whether the whole `mode_count` batch is affordable.
    pub affordable: bool,
}

pub struct Session {
    pub config: GameConfig,
    pub progression: ProgressionState,
    pub milestones: MilestoneEngine,
    pub activity: ActivityMeter,
    pub language: String,
    pending: Vec<EffectEvent>,
}

impl Session {
    pub fn new(config: GameConfig) -> Self {
        Self {
            progression: ProgressionState::new(),
            milestones: MilestoneEngine::new(config.spawn_interval),
            activity: ActivityMeter::new(config.activity_window_ms),
            language: config.default_language.to_string(),
            pending: Vec::new(),
            config,
        }
    }

    /// Fresh session with a save record applied on top.
    pub fn from_record(config: GameConfig, record: &SaveRecord) -> Self {
        let mut session = Self::new(config);
        save::apply_save(&mut session, record);
        session
    }

    /// Manual click at `now_ms`. Returns the amount granted.
    pub fn apply_click(&mut self, now_ms: f64) -> f64 {
        let granted = self.progression.apply_click();
        self.activity.record_event(now_ms);
        self.run_checks();
        granted
    }

    /// Passive income for `ticks` game ticks.
    pub fn apply_passive_ticks(&mut self, ticks: u32) {
        if ticks == 0 || self.progression.passive_rate <= 0.0 {
            return;
        }
        let seconds = self.config.ticks_to_seconds(ticks);
        self.progression.apply_passive_tick(seconds);
        self.run_checks();
    }

    /// UI purchase: one unit in `Single` mode, otherwise as the mode dictates.
    pub fn purchase(&mut self, kind: UpgradeType, mode: PurchaseMode) -> PurchaseOutcome {
        self.progression.purchase(kind, 1, mode)
    }

    pub fn active_rate(&mut self, now_ms: f64) -> u32 {
        self.activity.current_rate(now_ms)
    }

    pub fn upgrade_views(&self, mode: PurchaseMode) -> Vec<UpgradeView> {
        let available = self.progression.resource_total;
        self.progression
            .upgrades
            .iter()
            .map(|u| {
                let max_affordable =
                    cost::max_affordable_purchases(u.kind, u.level, available);
                let (mode_count, mode_cost, affordable) = match mode {
                    PurchaseMode::Single => (1, u.current_cost, available >= u.current_cost),
                    PurchaseMode::Bulk10 => {
                        let total =
                            cost::cost_for_n_purchases(u.kind, u.level, BULK_PURCHASE_COUNT);
                        (BULK_PURCHASE_COUNT, total, available >= total)
                    }
                    PurchaseMode::MaxAffordable => (
                        max_affordable,
                        cost::cost_for_n_purchases(u.kind, u.level, max_affordable),
                        max_affordable > 0,
                    ),
                };
                UpgradeView {
                    kind: u.kind,
                    level: u.level,
                    cost: u.current_cost,
                    max_affordable,
                    mode_count,
                    mode_cost,
                    affordable,
                }
            })
            .collect()
    }

    /// Take every effect event raised since the last call.
    pub fn drain_effects(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn replay_cues(&self) -> Vec<ReplayCue> {
        self.milestones
            .replay_activated_on_load(self.config.replay_base_delay_ms, self.config.replay_step_ms)
    }

    pub fn to_record(&self) -> SaveRecord {
        save::extract_save(self)
    }

    pub fn set_language(&mut self, code: &str) {
        self.language = code.to_string();
    }

    /// Back to a fresh session. Language survives.
    pub fn reset(&mut self) {
        let language = std::mem::take(&mut self.language);
        *self = Self::new(self.config.clone());
        self.language = language;
        log::info!("progress reset");
    }

    fn run_checks(&mut self) {
        let outcome = self.milestones.check(self.progression.resource_total);
        self.pending
            .extend(outcome.milestones.iter().map(|&e| EffectEvent::Milestone(e)));
        self.pending
            .extend(std::iter::repeat(EffectEvent::Spawn).take(outcome.spawns as usize));
    }
}
