//! Milestones and the repeating spawn counter.
//!
//! A milestone moves `Pending → Activated` exactly once. The engine only decides *that* and
//! *when* an effect fires; it hands back identifiers and the presentation layer looks up what
//! to draw for each.

/// Cosmetic effect attached to a milestone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneEffect {
    Spark,
    Gold,
    Nebula,
    Rainbow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MilestoneStatus {
    Pending,
    Activated,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Milestone {
    pub threshold: f64,
    pub status: MilestoneStatus,
    pub effect: MilestoneEffect,
}

impl Milestone {
    pub fn is_activated(&self) -> bool {
        self.status == MilestoneStatus::Activated
    }
}

/// A restored milestone effect scheduled for presentation after a load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayCue {
    pub delay_ms: f64,
    pub effect: MilestoneEffect,
}

/// Everything one check produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CheckOutcome {
    /// Newly activated milestone effects, ascending threshold order.
    pub milestones: Vec<MilestoneEffect>,
    /// Newly due spawns.
    pub spawns: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MilestoneEngine {
    milestones: Vec<Milestone>,
    spawn_interval: f64,
    spawns_emitted: u64,
}

impl MilestoneEngine {
    pub fn new(spawn_interval: f64) -> Self {
        Self {
            milestones: create_milestones(),
            spawn_interval,
            spawns_emitted: 0,
        }
    }

    pub fn milestones(&self) -> &[Milestone] {
        &self.milestones
    }

    pub fn spawns_emitted(&self) -> u64 {
        self.spawns_emitted
    }

    pub fn activated_count(&self) -> usize {
        self.milestones.iter().filter(|m| m.is_activated()).count()
    }

    /// Threshold of the lowest pending milestone, if any remain.
    pub fn next_threshold(&self) -> Option<f64> {
        self.milestones
            .iter()
            .find(|m| !m.is_activated())
            .map(|m| m.threshold)
    }

    /// Activate every pending milestone whose threshold is reached.
    pub fn check_all(&mut self, resource_total: f64) -> Vec<MilestoneEffect> {
        let mut triggered = Vec::new();
        for (idx, milestone) in self.milestones.iter_mut().enumerate() {
            if milestone.is_activated() || resource_total < milestone.threshold {
                continue;
            }
            milestone.status = MilestoneStatus::Activated;
            triggered.push(milestone.effect);
            log::info!(
                "milestone {} reached at {} ({:?})",
                idx,
                milestone.threshold,
                milestone.effect
            );
        }
        triggered
    }

    /// Spawns due since the last check. Catches up across several interval boundaries.
    pub fn check_spawns(&mut self, resource_total: f64) -> u32 {
        let required = self.required_spawns(resource_total);
        if required <= self.spawns_emitted {
            return 0;
        }
        let new = required - self.spawns_emitted;
        self.spawns_emitted = required;
        u32::try_from(new).unwrap_or(u32::MAX)
    }

    /// Milestone check followed by the spawn check.
    pub fn check(&mut self, resource_total: f64) -> CheckOutcome {
        CheckOutcome {
            milestones: self.check_all(resource_total),
            spawns: self.check_spawns(resource_total),
        }
    }

    /// Presentation-only replay of milestones restored as activated.
    pub fn replay_activated_on_load(&self, base_delay_ms: f64, step_ms: f64) -> Vec<ReplayCue> {
        self.milestones
            .iter()
            .filter(|m| m.is_activated())
            .enumerate()
            .map(|(i, m)| ReplayCue {
                delay_ms: base_delay_ms + step_ms * i as f64,
                effect: m.effect,
            })
            .collect()
    }

    /// Activated flags aligned to the milestone list.
    pub fn activated_flags(&self) -> Vec<bool> {
        self.milestones.iter().map(|m| m.is_activated()).collect()
    }

    /// Restore activated flags verbatim. Extra entries are ignored, `false` never deactivates.
    pub fn restore_activated(&mut self, flags: &[bool]) {
        for (milestone, &activated) in self.milestones.iter_mut().zip(flags) {
            if activated {
                milestone.status = MilestoneStatus::Activated;
            }
        }
    }

    /// Treat every spawn up to `resource_total` as already shown, without emitting any.
    pub fn seed_spawns(&mut self, resource_total: f64) {
        self.spawns_emitted = self.required_spawns(resource_total);
    }

    fn required_spawns(&self, resource_total: f64) -> u64 {
        if self.spawn_interval <= 0.0 || !resource_total.is_finite() || resource_total <= 0.0 {
            return 0;
        }
        (resource_total / self.spawn_interval).floor() as u64
    }
}

/// The fixed milestone list, ascending thresholds.
pub fn create_milestones() -> Vec<Milestone> {
    [
        (100.0, MilestoneEffect::Spark),
        (1_000.0, MilestoneEffect::Gold),
        (10_000.0, MilestoneEffect::Nebula),
        (100_000.0, MilestoneEffect::Rainbow),
    ]
    .into_iter()
    .map(|(threshold, effect)| Milestone {
        threshold,
        status: MilestoneStatus::Pending,
        effect,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_strictly_increase() {
        let ms = create_milestones();
        for pair in ms.windows(2) {
            assert!(pair[0].threshold < pair[1].threshold);
        }
    }

    #[test]
    fn nothing_below_first_threshold() {
        let mut e = MilestoneEngine::new(10_000.0);
        assert!(e.check_all(99.9).is_empty());
        assert_eq!(e.activated_count(), 0);
    }

    #[test]
    fn milestone_fires_once() {
        let mut e = MilestoneEngine::new(10_000.0);
        assert_eq!(e.check_all(100.0), vec![MilestoneEffect::Spark]);
        assert!(e.check_all(150.0).is_empty());
        // Dropping below and rising again never re-triggers.
        assert!(e.check_all(10.0).is_empty());
        assert!(e.check_all(100.0).is_empty());
        assert_eq!(e.activated_count(), 1);
    }

    #[test]
    fn multiple_milestones_in_ascending_order() {
        let mut e = MilestoneEngine::new(10_000.0);
        let fired = e.check_all(20_000.0);
        assert_eq!(
            fired,
            vec![
                MilestoneEffect::Spark,
                MilestoneEffect::Gold,
                MilestoneEffect::Nebula
            ]
        );
        assert_eq!(e.next_threshold(), Some(100_000.0));
    }

    #[test]
    fn spawn_catch_up() {
        let mut e = MilestoneEngine::new(10_000.0);
        assert_eq!(e.check_spawns(9_000.0), 0);
        assert_eq!(e.check_spawns(35_000.0), 3);
        assert_eq!(e.spawns_emitted(), 3);
        assert_eq!(e.check_spawns(35_000.0), 0);
    }

    #[test]
    fn spawns_never_negative_after_spending() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.check_spawns(25_000.0);
        assert_eq!(e.check_spawns(5_000.0), 0);
        assert_eq!(e.spawns_emitted(), 2);
        // Has to climb past the emitted count before anything new fires.
        assert_eq!(e.check_spawns(29_999.0), 0);
        assert_eq!(e.check_spawns(30_000.0), 1);
    }

    #[test]
    fn seed_spawns_emits_nothing() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.seed_spawns(42_000.0);
        assert_eq!(e.spawns_emitted(), 4);
        assert_eq!(e.check_spawns(42_000.0), 0);
        assert_eq!(e.check_spawns(50_000.0), 1);
    }

    #[test]
    fn combined_check() {
        let mut e = MilestoneEngine::new(10_000.0);
        let out = e.check(10_000.0);
        assert_eq!(out.milestones.len(), 3);
        assert_eq!(out.spawns, 1);
        assert_eq!(e.check(10_000.0), CheckOutcome::default());
    }

    #[test]
    fn replay_delays_increase() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.restore_activated(&[true, false, true, true]);
        let cues = e.replay_activated_on_load(500.0, 750.0);
        assert_eq!(
            cues,
            vec![
                ReplayCue { delay_ms: 500.0, effect: MilestoneEffect::Spark },
                ReplayCue { delay_ms: 1_250.0, effect: MilestoneEffect::Nebula },
                ReplayCue { delay_ms: 2_000.0, effect: MilestoneEffect::Rainbow },
            ]
        );
        // Replay does not touch state.
        assert_eq!(e.activated_count(), 3);
    }

    #[test]
    fn restored_milestones_do_not_refire() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.restore_activated(&[true]);
        assert_eq!(e.check_all(1_500.0), vec![MilestoneEffect::Gold]);
    }

    #[test]
    fn restore_ignores_extra_flags() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.restore_activated(&[false, false, false, false, true, true]);
        assert_eq!(e.activated_count(), 0);
    }

    #[test]
    fn activated_flags_align_with_list() {
        let mut e = MilestoneEngine::new(10_000.0);
        e.check_all(1_000.0);
        assert_eq!(e.activated_flags(), vec![true, true, false, false]);
    }
}
