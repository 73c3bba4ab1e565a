//! Progression state: resource counter, per-upgrade levels and derived stats.

use super::catalog::UpgradeType;
use super::cost;

/// Mutable level of one upgrade type.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeState {
    pub kind: UpgradeType,
    pub level: u32,
    /// Cost of the next unit. Always derived from `level` via [`UpgradeState::set_level`].
    pub current_cost: f64,
}

impl UpgradeState {
    pub fn new(kind: UpgradeType) -> Self {
        Self {
            kind,
            level: 0,
            current_cost: cost::cost_at_level(kind, 0),
        }
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = level;
        self.current_cost = cost::cost_at_level(self.kind, level);
    }
}

/// How many units a purchase request asks for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PurchaseMode {
    /// Buy the caller's requested count (one, from the UI).
    #[default]
    Single,
    /// Buy a fixed batch of ten.
    Bulk10,
    /// Buy as many as the current resource allows.
    MaxAffordable,
}

impl PurchaseMode {
    /// Next mode in the sticky-mode cycle.
    pub fn next(self) -> Self {
        match self {
            PurchaseMode::Single => PurchaseMode::Bulk10,
            PurchaseMode::Bulk10 => PurchaseMode::MaxAffordable,
            PurchaseMode::MaxAffordable => PurchaseMode::Single,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PurchaseMode::Single => "x1",
            PurchaseMode::Bulk10 => "x10",
            PurchaseMode::MaxAffordable => "MAX",
        }
    }
}

/// Result of a purchase request.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PurchaseOutcome {
    pub purchased: u32,
    pub spent: f64,
}

pub const BULK_PURCHASE_COUNT: u32 = 10;

/// Full progression state of a session.
#[derive(Clone, Debug, PartialEq)]
pub struct ProgressionState {
    /// Spendable clicks. Fractional between passive ticks.
    pub resource_total: f64,
    /// Clicks granted per manual click.
    pub click_yield: f64,
    /// Clicks granted per second without input.
    pub passive_rate: f64,
    /// One entry per [`UpgradeType::ALL`], same order.
    pub upgrades: Vec<UpgradeState>,
}

impl ProgressionState {
    pub fn new() -> Self {
        let mut state = Self {
            resource_total: 0.0,
            click_yield: 1.0,
            passive_rate: 0.0,
            upgrades: UpgradeType::ALL.iter().map(|&k| UpgradeState::new(k)).collect(),
        };
        state.recalculate_stats();
        state
    }

    pub fn upgrade(&self, kind: UpgradeType) -> &UpgradeState {
        &self.upgrades[kind.index()]
    }

    pub fn level(&self, kind: UpgradeType) -> u32 {
        self.upgrade(kind).level
    }

    /// Set a level directly (loading, tests) and keep derived stats in sync.
    pub fn set_level(&mut self, kind: UpgradeType, level: u32) {
        self.upgrades[kind.index()].set_level(level);
        self.recalculate_stats();
    }

    /// Manual click. Returns the amount granted.
    pub fn apply_click(&mut self) -> f64 {
        let granted = self.click_yield;
        self.resource_total += granted;
        granted
    }

    /// Passive income for a fraction of a second.
    pub fn apply_passive_tick(&mut self, fraction_of_second: f64) {
        if fraction_of_second <= 0.0 {
            return;
        }
        self.resource_total += self.passive_rate * fraction_of_second;
    }

    /// Max-affordable count for `kind` against the current resource.
    pub fn max_affordable(&self, kind: UpgradeType) -> u32 {
        cost::max_affordable_purchases(kind, self.level(kind), self.resource_total)
    }

    /// Buy up to the count implied by `mode`, one unit at a time.
    ///
    /// Stops the moment the next unit is unaffordable, so the outcome may be smaller than
    /// requested but never larger. Derived stats are recomputed once at the end.
    pub fn purchase(
        &mut self,
        kind: UpgradeType,
        requested_count: u32,
        mode: PurchaseMode,
    ) -> PurchaseOutcome {
        let count = match mode {
            PurchaseMode::Single => requested_count,
            PurchaseMode::Bulk10 => BULK_PURCHASE_COUNT,
            PurchaseMode::MaxAffordable => self.max_affordable(kind),
        };

        let mut outcome = PurchaseOutcome::default();
        for _ in 0..count {
            let upgrade = &mut self.upgrades[kind.index()];
            let price = cost::cost_for_purchase(upgrade);
            if self.resource_total < price {
                break;
            }
            self.resource_total -= price;
            upgrade.set_level(upgrade.level.saturating_add(1));
            outcome.purchased += 1;
            outcome.spent += price;
        }

        self.recalculate_stats();
        if outcome.purchased > 0 {
            log::debug!(
                "bought {} x {:?} for {} (level {})",
                outcome.purchased,
                kind,
                outcome.spent,
                self.level(kind)
            );
        }
        outcome
    }

    /// Recompute click yield, then passive rate (ClickMagnet scales with the new click yield).
    pub fn recalculate_stats(&mut self) {
        let contribution = |kind: UpgradeType| {
            self.level(kind) as f64 * kind.definition().bonus_per_level
        };

        let click_yield = 1.0
            + contribution(UpgradeType::Cursor)
            + contribution(UpgradeType::WindowOptimization);

        let passive_rate = contribution(UpgradeType::Autoclicker)
            + contribution(UpgradeType::Factory)
            + contribution(UpgradeType::GlobalDominance)
            + contribution(UpgradeType::ClickMagnet) * click_yield;

        self.click_yield = click_yield;
        self.passive_rate = passive_rate;
    }
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_defaults() {
        let s = ProgressionState::new();
        assert_eq!(s.resource_total, 0.0);
        assert_eq!(s.click_yield, 1.0);
        assert_eq!(s.passive_rate, 0.0);
        assert_eq!(s.upgrades.len(), 6);
        assert!(s.upgrades.iter().all(|u| u.level == 0));
    }

    #[test]
    fn ten_clicks_then_buy_cursor() {
        let mut s = ProgressionState::new();
        for _ in 0..10 {
            assert_eq!(s.apply_click(), 1.0);
        }
        assert_eq!(s.resource_total, 10.0);

        let out = s.purchase(UpgradeType::Cursor, 1, PurchaseMode::Single);
        assert_eq!(out.purchased, 1);
        assert_eq!(out.spent, 10.0);
        assert_eq!(s.resource_total, 0.0);
        assert_eq!(s.level(UpgradeType::Cursor), 1);
        assert_eq!(s.click_yield, 2.0);
    }

    #[test]
    fn purchase_insufficient_funds_buys_nothing() {
        let mut s = ProgressionState::new();
        s.resource_total = 9.0;
        let out = s.purchase(UpgradeType::Cursor, 1, PurchaseMode::Single);
        assert_eq!(out, PurchaseOutcome::default());
        assert_eq!(s.resource_total, 9.0);
    }

    #[test]
    fn bulk_purchase_stops_early() {
        let mut s = ProgressionState::new();
        s.resource_total = 40.0; // 10 + 11 + 13 = 34, next is 15
        let out = s.purchase(UpgradeType::Cursor, 1, PurchaseMode::Bulk10);
        assert_eq!(out.purchased, 3);
        assert_eq!(out.spent, 34.0);
        assert_eq!(s.resource_total, 6.0);
        assert_eq!(s.upgrade(UpgradeType::Cursor).current_cost, 15.0);
    }

    #[test]
    fn bulk_mode_overrides_requested_count() {
        let mut s = ProgressionState::new();
        s.resource_total = 1_000_000.0;
        let out = s.purchase(UpgradeType::Autoclicker, 3, PurchaseMode::Bulk10);
        assert_eq!(out.purchased, 10);
    }

    #[test]
    fn single_mode_honors_requested_count() {
        let mut s = ProgressionState::new();
        s.resource_total = 1_000_000.0;
        let out = s.purchase(UpgradeType::Autoclicker, 3, PurchaseMode::Single);
        assert_eq!(out.purchased, 3);
    }

    #[test]
    fn max_mode_buys_everything_affordable() {
        let mut s = ProgressionState::new();
        s.resource_total = 34.0;
        let out = s.purchase(UpgradeType::Cursor, 1, PurchaseMode::MaxAffordable);
        assert_eq!(out.purchased, 3);
        assert_eq!(s.resource_total, 0.0);
        assert_eq!(s.max_affordable(UpgradeType::Cursor), 0);
    }

    #[test]
    fn derived_stats_formula() {
        let mut s = ProgressionState::new();
        s.set_level(UpgradeType::Cursor, 2); // +2
        s.set_level(UpgradeType::WindowOptimization, 1); // +5
        s.set_level(UpgradeType::Autoclicker, 3); // 3
        s.set_level(UpgradeType::Factory, 2); // 20
        s.set_level(UpgradeType::GlobalDominance, 1); // 50
        s.set_level(UpgradeType::ClickMagnet, 2); // 2 * 1 * click_yield

        assert_eq!(s.click_yield, 8.0);
        assert_eq!(s.passive_rate, 3.0 + 20.0 + 50.0 + 2.0 * 8.0);
    }

    #[test]
    fn click_magnet_tracks_click_yield_changes() {
        let mut s = ProgressionState::new();
        s.set_level(UpgradeType::ClickMagnet, 1);
        assert_eq!(s.passive_rate, 1.0);
        s.resource_total = 10.0;
        s.purchase(UpgradeType::Cursor, 1, PurchaseMode::Single);
        assert_eq!(s.passive_rate, 2.0);
    }

    #[test]
    fn passive_tick_adds_fraction() {
        let mut s = ProgressionState::new();
        s.set_level(UpgradeType::Factory, 1); // 10/s
        s.apply_passive_tick(0.1);
        assert!((s.resource_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn passive_tick_ignores_nonpositive_fraction() {
        let mut s = ProgressionState::new();
        s.set_level(UpgradeType::Factory, 1);
        s.apply_passive_tick(0.0);
        s.apply_passive_tick(-1.0);
        assert_eq!(s.resource_total, 0.0);
    }

    #[test]
    fn cost_recomputed_on_level_change() {
        let mut u = UpgradeState::new(UpgradeType::Cursor);
        u.set_level(3);
        assert_eq!(u.current_cost, 15.0);
    }

    #[test]
    fn purchase_mode_cycle() {
        assert_eq!(PurchaseMode::Single.next(), PurchaseMode::Bulk10);
        assert_eq!(PurchaseMode::Bulk10.next(), PurchaseMode::MaxAffordable);
        assert_eq!(PurchaseMode::MaxAffordable.next(), PurchaseMode::Single);
    }
}
