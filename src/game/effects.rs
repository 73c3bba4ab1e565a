//! Presentation-side effect state: particle bursts, floating texts, spawn sprites,
//! the replay queue and short-lived popups.
//!
//! Nothing here feeds back into the session. Effects only decay with ticks.

use super::milestone::{MilestoneEffect, ReplayCue};

/// Colour family of a particle, mapped to a terminal colour at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Red,
    Gold,
    Green,
    Purple,
    Orange,
    Rainbow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleStyle {
    /// "+N" rising from the bottom of the window.
    ClickFeedback,
    /// Burst glyph expanding from the centre.
    Burst(Tint),
    /// Milestone banner text.
    Banner(Tint),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub text: String,
    pub col_offset: i16,
    pub row_offset: i16,
    /// Remaining lifetime in ticks.
    pub life: u32,
    pub max_life: u32,
    pub style: ParticleStyle,
}

/// Spawn sprite position in permille of the window area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sprite {
    pub x_permille: u16,
    pub y_permille: u16,
}

/// Visual cues for one milestone effect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectCue {
    pub burst_tint: Tint,
    pub burst_particles: u32,
    /// Tint of the banner text, if the effect shows one.
    pub text_tint: Option<Tint>,
    /// Turns on the permanent radial pulse behind the window.
    pub radial_pulse: bool,
}

/// Burst sizes are a fifth of the canvas version; the grid is much coarser.
const BURST_SCALE: u32 = 5;
const MAX_PARTICLES: usize = 160;
/// Drawn sprites. Further spawns only bump the counter.
pub const MAX_SPRITES: usize = 64;

pub const CLICK_FEEDBACK_TICKS: u32 = 7;
pub const SAVE_POPUP_TICKS: u32 = 25;
const BANNER_TICKS: u32 = 30;
const CLICK_FLASH_TICKS: u32 = 3;

const BURST_GLYPHS: &[&str] = &["*", "✦", "·", "•", "+"];

pub fn cue_for(effect: MilestoneEffect) -> EffectCue {
    match effect {
        MilestoneEffect::Spark => EffectCue {
            burst_tint: Tint::Red,
            burst_particles: 50 / BURST_SCALE,
            text_tint: None,
            radial_pulse: false,
        },
        MilestoneEffect::Gold => EffectCue {
            burst_tint: Tint::Gold,
            burst_particles: 100 / BURST_SCALE,
            text_tint: Some(Tint::Green),
            radial_pulse: false,
        },
        MilestoneEffect::Nebula => EffectCue {
            burst_tint: Tint::Purple,
            burst_particles: 200 / BURST_SCALE,
            text_tint: Some(Tint::Purple),
            radial_pulse: true,
        },
        MilestoneEffect::Rainbow => EffectCue {
            burst_tint: Tint::Rainbow,
            burst_particles: 500 / BURST_SCALE,
            text_tint: Some(Tint::Orange),
            radial_pulse: false,
        },
    }
}

pub struct EffectsState {
    pub particles: Vec<Particle>,
    pub sprites: Vec<Sprite>,
    /// Spawns seen this session, including restored ones.
    pub sprite_total: u64,
    pub radial_pulse: bool,
    pub click_flash: u32,
    pub save_popup: u32,
    pub anim_frame: u32,
    /// `(due_ms, effect)`, in scheduling order.
    replay_queue: Vec<(f64, MilestoneEffect)>,
    rng_state: u32,
}

impl EffectsState {
    pub fn new(seed: u32) -> Self {
        Self {
            particles: Vec::new(),
            sprites: Vec::new(),
            sprite_total: 0,
            radial_pulse: false,
            click_flash: 0,
            save_popup: 0,
            anim_frame: 0,
            replay_queue: Vec::new(),
            // xorshift never leaves zero
            rng_state: seed.max(1),
        }
    }

    /// xorshift32.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Random value in `-span..=span`.
    fn random_offset(&mut self, span: u16) -> i16 {
        let width = span as u32 * 2 + 1;
        (self.next_random() % width) as i16 - span as i16
    }

    /// Play the cues of a milestone effect. `text` is the localized banner, if any.
    pub fn trigger(&mut self, effect: MilestoneEffect, text: Option<&str>) {
        let cue = cue_for(effect);
        for _ in 0..cue.burst_particles {
            let glyph_idx = self.next_random() as usize % BURST_GLYPHS.len();
            let col_offset = self.random_offset(8);
            let row_offset = self.random_offset(3);
            let life = 10 + self.next_random() % 10;
            self.push_particle(Particle {
                text: BURST_GLYPHS[glyph_idx].to_string(),
                col_offset,
                row_offset,
                life,
                max_life: life,
                style: ParticleStyle::Burst(cue.burst_tint),
            });
        }
        if let (Some(tint), Some(text)) = (cue.text_tint, text) {
            let row_offset = self.random_offset(2);
            self.push_particle(Particle {
                text: text.to_string(),
                col_offset: 0,
                row_offset,
                life: BANNER_TICKS,
                max_life: BANNER_TICKS,
                style: ParticleStyle::Banner(tint),
            });
        }
        if cue.radial_pulse {
            self.radial_pulse = true;
        }
    }

    pub fn spawn_sprite(&mut self) {
        self.sprite_total += 1;
        if self.sprites.len() >= MAX_SPRITES {
            return;
        }
        let sprite = Sprite {
            x_permille: (self.next_random() % 1000) as u16,
            y_permille: (self.next_random() % 1000) as u16,
        };
        self.sprites.push(sprite);
    }

    /// Recreate the sprites a restored session has already earned.
    pub fn restore_sprites(&mut self, count: u64) {
        self.sprite_total = self.sprite_total.saturating_add(count);
        let room = MAX_SPRITES.saturating_sub(self.sprites.len());
        let drawn = usize::try_from(count).map_or(room, |c| c.min(room));
        for _ in 0..drawn {
            let sprite = Sprite {
                x_permille: (self.next_random() % 1000) as u16,
                y_permille: (self.next_random() % 1000) as u16,
            };
            self.sprites.push(sprite);
        }
    }

    /// Floating "+N" for a manual click.
    pub fn click_feedback(&mut self, text: String) {
        self.click_flash = CLICK_FLASH_TICKS;
        let col_offset = self.random_offset(6);
        self.push_particle(Particle {
            text,
            col_offset,
            row_offset: 0,
            life: CLICK_FEEDBACK_TICKS,
            max_life: CLICK_FEEDBACK_TICKS,
            style: ParticleStyle::ClickFeedback,
        });
    }

    pub fn show_save_popup(&mut self) {
        self.save_popup = SAVE_POPUP_TICKS;
    }

    /// Queue replayed milestone effects relative to `now_ms`.
    pub fn schedule_replays(&mut self, cues: &[ReplayCue], now_ms: f64) {
        self.replay_queue
            .extend(cues.iter().map(|c| (now_ms + c.delay_ms, c.effect)));
    }

    /// Pop every replay whose time has come, in scheduling order.
    pub fn due_replays(&mut self, now_ms: f64) -> Vec<MilestoneEffect> {
        let mut due = Vec::new();
        self.replay_queue.retain(|&(at, effect)| {
            if at <= now_ms {
                due.push(effect);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn pending_replays(&self) -> usize {
        self.replay_queue.len()
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        self.anim_frame = self.anim_frame.wrapping_add(delta_ticks);
        self.click_flash = self.click_flash.saturating_sub(delta_ticks);
        self.save_popup = self.save_popup.saturating_sub(delta_ticks);
        for p in &mut self.particles {
            p.life = p.life.saturating_sub(delta_ticks);
        }
        self.particles.retain(|p| p.life > 0);
    }

    /// Drop everything earned so far. The RNG keeps running.
    pub fn clear(&mut self) {
        let rng_state = self.rng_state;
        *self = Self::new(rng_state);
    }

    fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_table_matches_milestones() {
        assert_eq!(cue_for(MilestoneEffect::Spark).burst_particles, 10);
        assert_eq!(cue_for(MilestoneEffect::Spark).text_tint, None);
        assert_eq!(cue_for(MilestoneEffect::Gold).burst_tint, Tint::Gold);
        assert!(cue_for(MilestoneEffect::Nebula).radial_pulse);
        assert!(!cue_for(MilestoneEffect::Rainbow).radial_pulse);
        assert_eq!(cue_for(MilestoneEffect::Rainbow).burst_particles, 100);
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = EffectsState::new(42);
        let mut b = EffectsState::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_random(), b.next_random());
        }
    }

    #[test]
    fn zero_seed_still_produces_values() {
        let mut e = EffectsState::new(0);
        assert_ne!(e.next_random(), 0);
    }

    #[test]
    fn trigger_spawns_burst_and_banner() {
        let mut e = EffectsState::new(7);
        e.trigger(MilestoneEffect::Nebula, Some("wow"));
        let bursts = e
            .particles
            .iter()
            .filter(|p| matches!(p.style, ParticleStyle::Burst(Tint::Purple)))
            .count();
        assert_eq!(bursts, 40);
        assert!(e
            .particles
            .iter()
            .any(|p| p.style == ParticleStyle::Banner(Tint::Purple) && p.text == "wow"));
        assert!(e.radial_pulse);
    }

    #[test]
    fn spark_without_text_has_no_banner() {
        let mut e = EffectsState::new(7);
        e.trigger(MilestoneEffect::Spark, Some("ignored"));
        assert!(e
            .particles
            .iter()
            .all(|p| matches!(p.style, ParticleStyle::Burst(_))));
    }

    #[test]
    fn particles_expire() {
        let mut e = EffectsState::new(3);
        e.click_feedback("+1".into());
        e.tick(CLICK_FEEDBACK_TICKS - 1);
        assert_eq!(e.particles.len(), 1);
        e.tick(1);
        assert!(e.particles.is_empty());
    }

    #[test]
    fn particle_cap() {
        let mut e = EffectsState::new(3);
        for _ in 0..3 {
            e.trigger(MilestoneEffect::Rainbow, None);
        }
        assert_eq!(e.particles.len(), MAX_PARTICLES);
    }

    #[test]
    fn sprites_capped_but_counted() {
        let mut e = EffectsState::new(9);
        e.restore_sprites(100);
        assert_eq!(e.sprites.len(), MAX_SPRITES);
        assert_eq!(e.sprite_total, 100);
        assert!(e.sprites.iter().all(|s| s.x_permille < 1000 && s.y_permille < 1000));
    }

    #[test]
    fn replays_fire_when_due() {
        let mut e = EffectsState::new(1);
        let cues = [
            ReplayCue { delay_ms: 500.0, effect: MilestoneEffect::Spark },
            ReplayCue { delay_ms: 1_250.0, effect: MilestoneEffect::Gold },
        ];
        e.schedule_replays(&cues, 1_000.0);
        assert!(e.due_replays(1_400.0).is_empty());
        assert_eq!(e.due_replays(1_500.0), vec![MilestoneEffect::Spark]);
        assert_eq!(e.pending_replays(), 1);
        assert_eq!(e.due_replays(5_000.0), vec![MilestoneEffect::Gold]);
        assert_eq!(e.pending_replays(), 0);
    }

    #[test]
    fn save_popup_lasts_two_and_a_half_seconds() {
        let mut e = EffectsState::new(1);
        e.show_save_popup();
        e.tick(24);
        assert!(e.save_popup > 0);
        e.tick(1);
        assert_eq!(e.save_popup, 0);
    }

    #[test]
    fn clear_resets_visuals() {
        let mut e = EffectsState::new(1);
        e.trigger(MilestoneEffect::Nebula, None);
        e.spawn_sprite();
        e.clear();
        assert!(e.particles.is_empty());
        assert!(e.sprites.is_empty());
        assert!(!e.radial_pulse);
    }
}
