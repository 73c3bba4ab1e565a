//! Clickable UI components. Each one renders and registers its own click targets, so the
//! drawn text and the hit regions cannot drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── HintBar ────────────────────────────────────────────────────

/// One row of key hints (`[S] Save │ [R] Reset`), each clickable.
///
/// ```ignore
/// HintBar::new(" │ ")
///     .hint("[M] x10", Style::default().fg(Color::Cyan), CYCLE_MODE)
///     .hint("[S] Save", Style::default(), SAVE)
///     .render(f, area, &mut cs);
/// ```
pub struct HintBar<'a> {
    hints: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> HintBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            hints: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn hint(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.hints.push((label.into(), style, action_id));
        self
    }

    /// Wrap in a block; targets are placed inside its borders.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut spans = Vec::new();
        let mut widths = Vec::with_capacity(self.hints.len());

        for (i, (label, style, action_id)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            widths.push((Line::from(padded.as_str()).width() as u16, *action_id));
            spans.push(Span::styled(padded, *style));
        }

        let inner = self.block.as_ref().map_or(area, |b| b.inner(area));
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Inner x/width for accuracy, outer y/height for tap tolerance.
        cs.register_bar_targets(
            &widths,
            sep_width,
            inner.x,
            area.y,
            inner.width,
            area.height.max(1),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with click actions. The action follows its line, so inserting lines above
/// moves the target with it.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)`
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len() as u16, action_id));
        self.lines.push(line);
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register one row target per clickable line. Lines are not wrapped; anything past
    /// `area` minus the offsets (borders) is clipped.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        for &(line_idx, action_id) in &self.actions {
            let row = content_y + line_idx;
            if row < content_end {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}
