//! Upgrade catalog: the fixed set of upgrade types and their economic parameters.

/// Kinds of upgrades the player can buy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UpgradeType {
    Cursor,
    WindowOptimization,
    Autoclicker,
    ClickMagnet,
    Factory,
    GlobalDominance,
}

/// Economic parameters of one upgrade type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeDefinition {
    /// Cost of the first level.
    pub base_cost: f64,
    /// Growth factor applied per level bought (always > 1).
    pub cost_multiplier: f64,
    /// Per-level bonus. Click yield, passive rate or a click-yield multiplier depending on type.
    pub bonus_per_level: f64,
}

impl UpgradeType {
    /// All upgrade types in display order.
    pub const ALL: [UpgradeType; 6] = [
        UpgradeType::Cursor,
        UpgradeType::WindowOptimization,
        UpgradeType::Autoclicker,
        UpgradeType::ClickMagnet,
        UpgradeType::Factory,
        UpgradeType::GlobalDominance,
    ];

    pub fn definition(self) -> UpgradeDefinition {
        let (base_cost, cost_multiplier, bonus_per_level) = match self {
            UpgradeType::Cursor => (10.0, 1.15, 1.0),
            UpgradeType::WindowOptimization => (100.0, 1.25, 5.0),
            UpgradeType::Autoclicker => (25.0, 1.20, 1.0),
            UpgradeType::ClickMagnet => (500.0, 1.30, 1.0),
            UpgradeType::Factory => (500.0, 1.25, 10.0),
            UpgradeType::GlobalDominance => (10_000.0, 1.40, 50.0),
        };
        UpgradeDefinition {
            base_cost,
            cost_multiplier,
            bonus_per_level,
        }
    }

    /// Position in [`UpgradeType::ALL`].
    pub fn index(self) -> usize {
        match self {
            UpgradeType::Cursor => 0,
            UpgradeType::WindowOptimization => 1,
            UpgradeType::Autoclicker => 2,
            UpgradeType::ClickMagnet => 3,
            UpgradeType::Factory => 4,
            UpgradeType::GlobalDominance => 5,
        }
    }

    pub fn from_index(idx: usize) -> Option<UpgradeType> {
        Self::ALL.get(idx).copied()
    }

    /// Key used in the persisted `upgradeLevels` map.
    pub fn save_key(self) -> &'static str {
        match self {
            UpgradeType::Cursor => "cursor",
            UpgradeType::WindowOptimization => "windowOptimization",
            UpgradeType::Autoclicker => "autoclicker",
            UpgradeType::ClickMagnet => "clickMagnet",
            UpgradeType::Factory => "factory",
            UpgradeType::GlobalDominance => "globalDominance",
        }
    }

    pub fn from_save_key(key: &str) -> Option<UpgradeType> {
        Self::ALL.iter().copied().find(|t| t.save_key() == key)
    }

    /// Key to buy from the keyboard (1-6).
    pub fn hotkey(self) -> char {
        (b'1' + self.index() as u8) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_definition_is_well_formed() {
        for t in UpgradeType::ALL {
            let d = t.definition();
            assert!(d.base_cost > 0.0, "{t:?}");
            assert!(d.cost_multiplier > 1.0, "{t:?}");
            assert!(d.bonus_per_level > 0.0, "{t:?}");
        }
    }

    #[test]
    fn starting_costs() {
        assert!((UpgradeType::Cursor.definition().base_cost - 10.0).abs() < f64::EPSILON);
        assert!((UpgradeType::Autoclicker.definition().base_cost - 25.0).abs() < f64::EPSILON);
        assert!(
            (UpgradeType::GlobalDominance.definition().base_cost - 10_000.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn index_roundtrip() {
        for t in UpgradeType::ALL {
            assert_eq!(UpgradeType::from_index(t.index()), Some(t));
        }
        assert_eq!(UpgradeType::from_index(6), None);
    }

    #[test]
    fn save_key_roundtrip() {
        for t in UpgradeType::ALL {
            assert_eq!(UpgradeType::from_save_key(t.save_key()), Some(t));
        }
        assert_eq!(UpgradeType::from_save_key("grandma"), None);
    }

    #[test]
    fn hotkeys_are_one_through_six() {
        let keys: Vec<char> = UpgradeType::ALL.iter().map(|t| t.hotkey()).collect();
        assert_eq!(keys, vec!['1', '2', '3', '4', '5', '6']);
    }
}
