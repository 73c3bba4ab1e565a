//! Terminal rendering: header, clickable window with effects, upgrade list, milestone
//! progress and the footer hint bar.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, HintBar};

use super::actions::{BUY_UPGRADE_BASE, CLICK_WINDOW, CYCLE_LANGUAGE, CYCLE_MODE, RESET, SAVE};
use super::effects::{Particle, ParticleStyle, Tint};
use super::lang::Texts;
use super::session::UpgradeView;
use super::state::PurchaseMode;
use super::ClickerGame;

/// The clickable window, 3 rows high.
const WINDOW_ART: &[&str] = &["┌──┬──┐", "├──┼──┤", "└──┴──┘"];
const WINDOW_PRESSED_ART: &[&str] = &["╔══╦══╗", "╠══╬══╣", "╚══╩══╝"];

const SPRITE: &str = "🏄";

pub fn render(
    game: &ClickerGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let texts = game.language().texts();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    let body = if is_narrow_layout(area.width) {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(10), Constraint::Min(6)])
            .split(chunks[1])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1])
    };

    render_header(game, texts, f, chunks[0]);
    render_window(game, texts, f, body[0], click_state);
    render_upgrades(game, texts, f, body[1], click_state);
    render_milestone_progress(game, texts, f, chunks[2]);
    render_footer(game, texts, f, chunks[3], click_state);
}

fn render_header(game: &ClickerGame, texts: &Texts, f: &mut Frame, area: Rect) {
    let progression = &game.session.progression;

    let mut first = vec![Span::styled(
        format!(
            " {} {}",
            format_number(progression.resource_total.floor()),
            texts.clicks
        ),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )];
    if game.effects.save_popup > 0 {
        first.push(Span::styled(
            format!("  ✔ {}", texts.save_popup),
            Style::default().fg(Color::Green),
        ));
    }

    let second = if game.reset_armed() {
        Line::from(Span::styled(
            format!(" ⚠ {}", texts.reset_confirm),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::styled(
                format!(" {}: {}", texts.active_cps, game.active_cps),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!(
                    "{}: {}",
                    texts.passive_cps,
                    format_number(progression.passive_rate.floor())
                ),
                Style::default().fg(Color::Green),
            ),
            Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("+{}/click", format_number(progression.click_yield)),
                Style::default().fg(Color::White),
            ),
        ])
    };

    let widget = Paragraph::new(vec![Line::from(first), second]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {} ", texts.title)),
    );
    f.render_widget(widget, area);
}

fn render_window(
    game: &ClickerGame,
    texts: &Texts,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let effects = &game.effects;
    let pressed = effects.click_flash > 0;

    let border_color = if pressed {
        Color::White
    } else if effects.radial_pulse {
        Color::Magenta
    } else {
        Color::Cyan
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", texts.window_hint));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if effects.radial_pulse {
        render_radial_pulse(effects.anim_frame, f, inner);
    }

    let art = if pressed { WINDOW_PRESSED_ART } else { WINDOW_ART };
    let art_color = if pressed { Color::White } else { Color::Cyan };
    let art_y = inner.y + inner.height.saturating_sub(art.len() as u16) / 2;
    let art_area = Rect::new(
        inner.x,
        art_y,
        inner.width,
        (art.len() as u16).min(inner.height),
    );
    let lines: Vec<Line> = art
        .iter()
        .map(|row| Line::from(Span::styled(*row, Style::default().fg(art_color))))
        .collect();
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), art_area);

    render_sprites(game, f, inner);
    render_particles(&effects.particles, effects.anim_frame, f, inner);

    click_state
        .borrow_mut()
        .add_click_target(area, CLICK_WINDOW);
}

/// Concentric rings around the centre, shifting outward with the animation frame.
fn render_radial_pulse(anim_frame: u32, f: &mut Frame, area: Rect) {
    let cx = area.width as i32 / 2;
    let cy = area.height as i32 / 2;
    let phase = (anim_frame / 2) as i32;

    let lines: Vec<Line> = (0..area.height as i32)
        .map(|row| {
            let spans: Vec<Span> = (0..area.width as i32)
                .map(|col| {
                    // Cells are about twice as tall as wide.
                    let dist = ((col - cx).abs() / 2).max((row - cy).abs() * 2)
                        + (col - cx).abs().min((row - cy).abs());
                    let bg = match (dist - phase).rem_euclid(4) {
                        0 => Color::Magenta,
                        1 => Color::Indexed(53),
                        _ => Color::Reset,
                    };
                    Span::styled(" ", Style::default().bg(bg))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    f.render_widget(Paragraph::new(lines), area);
}

fn render_sprites(game: &ClickerGame, f: &mut Frame, area: Rect) {
    if area.width < 2 || area.height == 0 {
        return;
    }
    for sprite in &game.effects.sprites {
        let x = area.x + (sprite.x_permille as u32 * (area.width - 2) as u32 / 1000) as u16;
        let y = area.y + (sprite.y_permille as u32 * area.height as u32 / 1000) as u16;
        f.render_widget(Paragraph::new(SPRITE), Rect::new(x, y, 2, 1));
    }
}

fn tint_color(tint: Tint, anim_frame: u32, salt: i16) -> Color {
    match tint {
        Tint::Red => Color::Red,
        Tint::Gold => Color::Yellow,
        Tint::Green => Color::Green,
        Tint::Purple => Color::Magenta,
        Tint::Orange => Color::LightRed,
        Tint::Rainbow => {
            const RAINBOW: [Color; 6] = [
                Color::Red,
                Color::LightRed,
                Color::Yellow,
                Color::Green,
                Color::Blue,
                Color::Magenta,
            ];
            let idx = (anim_frame as i64 + salt as i64).rem_euclid(RAINBOW.len() as i64);
            RAINBOW[idx as usize]
        }
    }
}

/// Particles as overlays on the window panel.
fn render_particles(particles: &[Particle], anim_frame: u32, f: &mut Frame, area: Rect) {
    let center_x = (area.x + area.width / 2) as i16;
    let center_y = (area.y + area.height / 2) as i16;
    let base_y = area.y + area.height;

    for particle in particles {
        let progress = 1.0 - (particle.life as f32 / particle.max_life.max(1) as f32);
        let text_width = Line::from(particle.text.as_str()).width() as i16;

        let (x, y, color, modifier) = match particle.style {
            ParticleStyle::ClickFeedback => {
                let rise = (progress * 4.0) as u16;
                let y = base_y.saturating_sub(1 + rise) as i16;
                let x = center_x + particle.col_offset;
                let color = if particle.life > particle.max_life / 2 {
                    Color::White
                } else {
                    Color::Yellow
                };
                (x, y, color, Modifier::BOLD)
            }
            ParticleStyle::Burst(tint) => {
                let expand = (progress * 4.0) as i16;
                let dir_x = if particle.col_offset >= 0 { expand } else { -expand };
                let dir_y = if particle.row_offset >= 0 { expand / 2 } else { -expand / 2 };
                let x = center_x + particle.col_offset + dir_x;
                let y = center_y + particle.row_offset + dir_y;
                let color = if particle.life > particle.max_life / 3 {
                    tint_color(tint, anim_frame, particle.col_offset)
                } else {
                    Color::DarkGray
                };
                (x, y, color, Modifier::empty())
            }
            ParticleStyle::Banner(tint) => {
                let x = center_x - text_width / 2;
                let y = center_y + particle.row_offset - 2;
                (x, y, tint_color(tint, anim_frame, 0), Modifier::BOLD)
            }
        };

        let x = x.max(area.x as i16) as u16;
        let y = y.max(area.y as i16) as u16;
        if y >= area.y + area.height || x >= area.x + area.width {
            continue;
        }
        let available = area.x + area.width - x;
        let width = (text_width.max(1) as u16).min(available);
        let style = Style::default().fg(color).add_modifier(modifier);
        f.render_widget(
            Paragraph::new(Span::styled(particle.text.as_str(), style)),
            Rect::new(x, y, width, 1),
        );
    }
}

fn render_upgrades(
    game: &ClickerGame,
    texts: &Texts,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mode = game.sticky_mode;
    let mut cl = ClickableList::new();

    for view in game.session.upgrade_views(mode) {
        let action = BUY_UPGRADE_BASE + view.kind.index() as u16;
        let (key_style, text_style) = if view.affordable {
            (
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::White),
            )
        } else {
            (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::DarkGray),
            )
        };

        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!("[{}] ", view.kind.hotkey()), key_style),
                Span::styled(texts.upgrade_title(view.kind), text_style),
                Span::styled(
                    format!(
                        "  {}{} ({}{})",
                        texts.level_prefix,
                        view.level,
                        texts.max_buy_prefix,
                        view.max_affordable
                    ),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            action,
        );
        cl.push_clickable(
            Line::from(vec![
                Span::styled(
                    format!("    {} · ", texts.upgrade_desc(view.kind)),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(cost_label(&view, mode, texts), text_style),
            ]),
            action,
        );
    }

    let title = format!(" {} ({}: {}) ", texts.upgrades, texts.mode, mode.label());
    cl.register_targets(area, &mut click_state.borrow_mut(), 1, 1);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn cost_label(view: &UpgradeView, mode: PurchaseMode, texts: &Texts) -> String {
    match mode {
        PurchaseMode::Single => format!("{}{}", texts.cost_prefix, format_number(view.mode_cost)),
        PurchaseMode::Bulk10 => {
            format!("{}{}", texts.cost_prefix_10x, format_number(view.mode_cost))
        }
        PurchaseMode::MaxAffordable => format!(
            "{}{}x): {}",
            texts.cost_prefix_max,
            view.mode_count,
            format_number(view.mode_cost)
        ),
    }
}

fn render_milestone_progress(game: &ClickerGame, texts: &Texts, f: &mut Frame, area: Rect) {
    let milestones = &game.session.milestones;
    let dots: String = milestones
        .milestones()
        .iter()
        .map(|m| if m.is_activated() { '●' } else { '○' })
        .collect();

    let line = match milestones.next_threshold() {
        Some(threshold) => {
            let resource = game.session.progression.resource_total;
            let pct = (resource / threshold * 100.0).clamp(0.0, 100.0);
            Line::from(vec![
                Span::styled(format!(" {} ", dots), Style::default().fg(Color::Magenta)),
                Span::styled(
                    format!(
                        "{}: {} ({:.0}%)",
                        texts.next_milestone,
                        format_number(threshold),
                        pct.floor()
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        }
        None => Line::from(Span::styled(
            format!(" {} {}", dots, texts.all_milestones),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_footer(
    game: &ClickerGame,
    texts: &Texts,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let hint = Style::default().fg(Color::Cyan);
    let reset_style = if game.reset_armed() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    HintBar::new(" │ ")
        .hint(
            format!("[M] {}: {}", texts.mode, game.sticky_mode.label()),
            hint,
            CYCLE_MODE,
        )
        .hint(
            format!(
                "[L] {}: {}",
                texts.language,
                game.language().code().to_uppercase()
            ),
            hint,
            CYCLE_LANGUAGE,
        )
        .hint(format!("[S] {}", texts.save), hint, SAVE)
        .hint(format!("[R] {}", texts.reset), reset_style, RESET)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .render(f, area, &mut click_state.borrow_mut());
}

/// Thousands separators; one decimal when the fraction is visible.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    let int_part = n.floor() as u64;
    let frac = n - int_part as f64;

    let digits = int_part.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let tenth = (frac * 10.0).round() as u8;
    if frac > 0.05 && tenth < 10 {
        format!("{}.{}", grouped, tenth)
    } else {
        grouped
    }
}
