//! UI text for the two shipped languages.
//!
//! The session only stores an opaque language code; this table turns it into strings.

use super::catalog::UpgradeType;
use super::milestone::MilestoneEffect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    De,
    En,
}

impl Language {
    /// Unknown codes fall back to German.
    pub fn from_code(code: &str) -> Self {
        match code {
            "en" => Language::En,
            _ => Language::De,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Language::De => Language::En,
            Language::En => Language::De,
        }
    }

    pub fn texts(self) -> &'static Texts {
        match self {
            Language::De => &DE,
            Language::En => &EN,
        }
    }
}

pub struct Texts {
    pub title: &'static str,
    pub clicks: &'static str,
    pub active_cps: &'static str,
    pub passive_cps: &'static str,
    pub window_hint: &'static str,
    pub upgrades: &'static str,
    pub level_prefix: &'static str,
    pub max_buy_prefix: &'static str,
    pub cost_prefix: &'static str,
    pub cost_prefix_10x: &'static str,
    pub cost_prefix_max: &'static str,
    pub mode: &'static str,
    pub language: &'static str,
    pub save: &'static str,
    pub reset: &'static str,
    pub reset_confirm: &'static str,
    pub save_popup: &'static str,
    pub next_milestone: &'static str,
    pub all_milestones: &'static str,
    /// `(title, description)` in [`UpgradeType::ALL`] order.
    upgrades_text: [(&'static str, &'static str); 6],
    /// Floating text per milestone effect; `None` for effects without text.
    milestone_text: [Option<&'static str>; 4],
}

impl Texts {
    pub fn upgrade_title(&self, kind: UpgradeType) -> &'static str {
        self.upgrades_text[kind.index()].0
    }

    pub fn upgrade_desc(&self, kind: UpgradeType) -> &'static str {
        self.upgrades_text[kind.index()].1
    }

    pub fn milestone_text(&self, effect: MilestoneEffect) -> Option<&'static str> {
        let idx = match effect {
            MilestoneEffect::Spark => 0,
            MilestoneEffect::Gold => 1,
            MilestoneEffect::Nebula => 2,
            MilestoneEffect::Rainbow => 3,
        };
        self.milestone_text[idx]
    }
}

static DE: Texts = Texts {
    title: "Fenster-Klicker",
    clicks: "Klicks",
    active_cps: "Aktive KPS",
    passive_cps: "Passive KPS",
    window_hint: "Klick mich! [Space]",
    upgrades: "Upgrades",
    level_prefix: "Stufe ",
    max_buy_prefix: "max ",
    cost_prefix: "Kosten: ",
    cost_prefix_10x: "Kosten (10x): ",
    cost_prefix_max: "Kosten (max ",
    mode: "Modus",
    language: "Sprache",
    save: "Speichern",
    reset: "Zurücksetzen",
    reset_confirm: "Nochmal R drücken zum Zurücksetzen",
    save_popup: "Fortschritt gespeichert!",
    next_milestone: "Nächster Meilenstein",
    all_milestones: "Alle Meilensteine erreicht",
    upgrades_text: [
        ("Cursor", "+1 Klick pro Klick"),
        ("Fensteroptimierung", "+5 Klicks pro Klick"),
        ("Autoklicker", "+1 Klick pro Sekunde"),
        ("Klickmagnet", "Passiv: Klickstärke pro Sekunde"),
        ("Fabrik", "+10 Klicks pro Sekunde"),
        ("Weltherrschaft", "+50 Klicks pro Sekunde"),
    ],
    milestone_text: [
        None,
        Some("1.000 Klicks! Nicht schlecht!"),
        Some("10.000 Klicks! Das Fenster bebt!"),
        Some("100.000 Klicks! Totale Fensterherrschaft!"),
    ],
};

static EN: Texts = Texts {
    title: "Window Clicker",
    clicks: "Clicks",
    active_cps: "Active CPS",
    passive_cps: "Passive CPS",
    window_hint: "Click me! [Space]",
    upgrades: "Upgrades",
    level_prefix: "Level ",
    max_buy_prefix: "max ",
    cost_prefix: "Cost: ",
    cost_prefix_10x: "Cost (10x): ",
    cost_prefix_max: "Cost (max ",
    mode: "Mode",
    language: "Language",
    save: "Save",
    reset: "Reset",
    reset_confirm: "Press R again to reset",
    save_popup: "Progress Saved!",
    next_milestone: "Next milestone",
    all_milestones: "All milestones reached",
    upgrades_text: [
        ("Cursor", "+1 click per click"),
        ("Window Optimization", "+5 clicks per click"),
        ("Autoclicker", "+1 click per second"),
        ("Click Magnet", "Passive: click power per second"),
        ("Factory", "+10 clicks per second"),
        ("Global Dominance", "+50 clicks per second"),
    ],
    milestone_text: [
        None,
        Some("1,000 clicks! Not bad!"),
        Some("10,000 clicks! The window trembles!"),
        Some("100,000 clicks! Total window domination!"),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_code_falls_back_to_german() {
        assert_eq!(Language::from_code("fr"), Language::De);
        assert_eq!(Language::from_code(""), Language::De);
        assert_eq!(Language::from_code("en"), Language::En);
    }

    #[test]
    fn cycle_returns_to_start() {
        let l = Language::De;
        assert_eq!(l.next().next(), l);
        assert_eq!(Language::from_code(l.next().code()), Language::En);
    }

    #[test]
    fn every_upgrade_has_text() {
        for lang in [Language::De, Language::En] {
            for kind in UpgradeType::ALL {
                assert!(!lang.texts().upgrade_title(kind).is_empty());
                assert!(!lang.texts().upgrade_desc(kind).is_empty());
            }
        }
    }

    #[test]
    fn spark_has_no_text() {
        assert!(Language::En.texts().milestone_text(MilestoneEffect::Spark).is_none());
        assert!(Language::De.texts().milestone_text(MilestoneEffect::Rainbow).is_some());
    }
}
