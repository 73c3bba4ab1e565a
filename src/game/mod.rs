//! Window Clicker: click the window, buy upgrades, watch the milestones go off.

pub mod actions;
pub mod activity;
pub mod catalog;
pub mod cost;
pub mod effects;
pub mod lang;
pub mod milestone;
pub mod render;
pub mod save;
pub mod session;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::config::GameConfig;
use crate::input::{ClickState, InputEvent, Modifiers};

use catalog::UpgradeType;
use effects::EffectsState;
use lang::Language;
use render::format_number;
use save::SaveStore;
use session::{EffectEvent, Session};
use state::PurchaseMode;

/// A second reset press must land within this window.
const RESET_CONFIRM_MS: f64 = 3_000.0;

pub struct ClickerGame {
    pub session: Session,
    pub effects: EffectsState,
    /// Mode used when no modifier is held. Cycled with `m`.
    pub sticky_mode: PurchaseMode,
    /// Clicks in the last activity window, refreshed every tick.
    pub active_cps: u32,
    reset_armed_until: Option<f64>,
    ticks_since_save: u32,
    store: Box<dyn SaveStore>,
}

impl ClickerGame {
    /// Start from whatever `store` holds. Restored milestones are queued for replay relative
    /// to `now_ms`; thresholds are not re-checked.
    pub fn load(config: GameConfig, mut store: Box<dyn SaveStore>, now_ms: f64, seed: u32) -> Self {
        let session = match save::load_record(store.as_mut()) {
            Some(record) => {
                let session = Session::from_record(config, &record);
                log::debug!(
                    "loaded save: {} clicks, {} milestones",
                    session.progression.resource_total.floor(),
                    session.milestones.activated_count()
                );
                session
            }
            None => Session::new(config),
        };

        let mut effects = EffectsState::new(seed);
        effects.restore_sprites(session.milestones.spawns_emitted());
        effects.schedule_replays(&session.replay_cues(), now_ms);

        Self {
            session,
            effects,
            sticky_mode: PurchaseMode::Single,
            active_cps: 0,
            reset_armed_until: None,
            ticks_since_save: 0,
            store,
        }
    }

    pub fn language(&self) -> Language {
        Language::from_code(&self.session.language)
    }

    pub fn reset_armed(&self) -> bool {
        self.reset_armed_until.is_some()
    }

    /// Returns true if the event did something.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: f64) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(*c, now_ms),
            InputEvent::Click(action, mods) => self.handle_click(*action, *mods, now_ms),
        }
    }

    fn handle_key(&mut self, key: char, now_ms: f64) -> bool {
        match key {
            ' ' | 'c' => self.click_window(now_ms),
            '1'..='6' => {
                let idx = key as usize - '1' as usize;
                match UpgradeType::from_index(idx) {
                    Some(kind) => self.buy(kind, self.sticky_mode),
                    None => false,
                }
            }
            'm' => self.cycle_mode(),
            'l' => self.cycle_language(),
            's' => self.save_now(),
            'r' => self.press_reset(now_ms),
            _ => false,
        }
    }

    fn handle_click(&mut self, action: u16, mods: Modifiers, now_ms: f64) -> bool {
        match action {
            actions::CLICK_WINDOW => self.click_window(now_ms),
            actions::CYCLE_MODE => self.cycle_mode(),
            actions::CYCLE_LANGUAGE => self.cycle_language(),
            actions::SAVE => self.save_now(),
            actions::RESET => self.press_reset(now_ms),
            id if id >= actions::BUY_UPGRADE_BASE => {
                match UpgradeType::from_index((id - actions::BUY_UPGRADE_BASE) as usize) {
                    Some(kind) => self.buy(kind, mods.purchase_mode(self.sticky_mode)),
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn click_window(&mut self, now_ms: f64) -> bool {
        let granted = self.session.apply_click(now_ms);
        self.effects
            .click_feedback(format!("+{}", format_number(granted)));
        self.present_pending();
        true
    }

    fn buy(&mut self, kind: UpgradeType, mode: PurchaseMode) -> bool {
        self.session.purchase(kind, mode).purchased > 0
    }

    fn cycle_mode(&mut self) -> bool {
        self.sticky_mode = self.sticky_mode.next();
        true
    }

    fn cycle_language(&mut self) -> bool {
        let next = self.language().next();
        self.session.set_language(next.code());
        true
    }

    fn save_now(&mut self) -> bool {
        self.ticks_since_save = 0;
        match save::save_game(&self.session, self.store.as_mut()) {
            Ok(()) => {
                self.effects.show_save_popup();
                true
            }
            Err(e) => {
                log::warn!("save failed: {e}");
                false
            }
        }
    }

    /// First press arms, a second press inside the window resets.
    fn press_reset(&mut self, now_ms: f64) -> bool {
        match self.reset_armed_until {
            Some(until) if now_ms <= until => {
                self.reset_armed_until = None;
                self.session.reset();
                self.effects.clear();
                self.sticky_mode = PurchaseMode::Single;
                self.active_cps = 0;
                self.ticks_since_save = 0;
                save::delete_save(self.store.as_mut());
            }
            _ => self.reset_armed_until = Some(now_ms + RESET_CONFIRM_MS),
        }
        true
    }

    /// Advance by `delta_ticks` game ticks at wall time `now_ms`.
    pub fn tick(&mut self, delta_ticks: u32, now_ms: f64) {
        if self.reset_armed_until.is_some_and(|until| now_ms > until) {
            self.reset_armed_until = None;
        }

        self.session.apply_passive_ticks(delta_ticks);
        self.effects.tick(delta_ticks);

        let texts = self.language().texts();
        for effect in self.effects.due_replays(now_ms) {
            self.effects.trigger(effect, texts.milestone_text(effect));
        }
        self.present_pending();

        self.active_cps = self.session.active_rate(now_ms);

        self.ticks_since_save += delta_ticks;
        if self.ticks_since_save >= self.session.config.autosave_interval_ticks {
            self.save_now();
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn present_pending(&mut self) {
        let texts = self.language().texts();
        for event in self.session.drain_effects() {
            match event {
                EffectEvent::Milestone(effect) => {
                    self.effects.trigger(effect, texts.milestone_text(effect))
                }
                EffectEvent::Spawn => self.effects.spawn_sprite(),
            }
        }
    }
}
