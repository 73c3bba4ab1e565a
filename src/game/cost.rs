//! Cost model: pure functions over the catalog.
//!
//! Every cost is `floor(base_cost * cost_multiplier^level)`. The batch helpers sum that same
//! expression so a batch total always matches buying the units one by one.

use super::catalog::UpgradeType;
use super::state::UpgradeState;

/// Cost of the unit bought at `level` (i.e. the next unit when `level` are owned).
///
/// Saturates to infinity for levels far past anything reachable by play.
pub fn cost_at_level(kind: UpgradeType, level: u32) -> f64 {
    let def = kind.definition();
    (def.base_cost * def.cost_multiplier.powf(f64::from(level))).floor()
}

/// Cost of the next single purchase. Already derived on the upgrade state.
pub fn cost_for_purchase(upgrade: &UpgradeState) -> f64 {
    upgrade.current_cost
}

/// Total cost of buying `n` more units starting from `level`.
pub fn cost_for_n_purchases(kind: UpgradeType, level: u32, n: u32) -> f64 {
    (0..n)
        .map(|i| cost_at_level(kind, level.saturating_add(i)))
        .sum()
}

/// How many units can be bought in sequence from `level` with `available` resource.
pub fn max_affordable_purchases(kind: UpgradeType, level: u32, available: f64) -> u32 {
    let mut money = available;
    let mut amount: u32 = 0;
    let mut next_cost = cost_at_level(kind, level);

    // Costs only grow, so the loop ends once a unit is unaffordable or infinite.
    while next_cost.is_finite() && next_cost > 0.0 && money >= next_cost {
        money -= next_cost;
        amount += 1;
        match level.checked_add(amount) {
            Some(next_level) => next_cost = cost_at_level(kind, next_level),
            None => break,
        }
    }
    amount
}
