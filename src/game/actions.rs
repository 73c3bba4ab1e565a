//! Semantic action IDs for click targets.
//!
//! Registered during render and dispatched back through `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_WINDOW: u16 = 0;

// ── Upgrade purchase (base + upgrade index 0..5) ────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Footer controls ─────────────────────────────────────────────
pub const CYCLE_MODE: u16 = 200;
pub const CYCLE_LANGUAGE: u16 = 201;
pub const SAVE: u16 = 202;
pub const RESET: u16 = 203;
