//! Input plumbing shared by the shell and the game: event types, modifier state,
//! click targets and pixel-to-cell conversion.

use ratzilla::ratatui::layout::Rect;

use crate::game::state::PurchaseMode;

/// Input events, normalized from keyboard and pointer sources.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A key press.
    Key(char),
    /// A click/tap on a registered target with the modifiers held at that moment.
    Click(u16, Modifiers),
}

/// Modifier keys held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };

    /// Ctrl forces max-affordable, Shift forces a batch of ten, otherwise `sticky` applies.
    pub fn purchase_mode(self, sticky: PurchaseMode) -> PurchaseMode {
        if self.ctrl {
            PurchaseMode::MaxAffordable
        } else if self.shift {
            PurchaseMode::Bulk10
        } else {
            sticky
        }
    }
}

/// Screen region bound to an action.
#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cells.
    pub rect: Rect,
    /// Semantic action ID from `game::actions`.
    pub action_id: u16,
}

/// Targets registered by the last render, read by the pointer handler.
#[derive(Default)]
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_targets(&mut self) {
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// Full-width target on one row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a row of side-by-side labels.
    ///
    /// `entries` holds `(display_width, action_id)` of each padded label. Each target covers
    /// its label plus half of the neighbouring separators; the first entry reaches the left
    /// edge and the last one the right edge, so the whole bar is clickable.
    pub fn register_bar_targets(
        &mut self,
        entries: &[(u16, u16)],
        separator_width: u16,
        x: u16,
        y: u16,
        total_width: u16,
        height: u16,
    ) {
        let n = entries.len();
        if n == 0 || total_width == 0 {
            return;
        }

        let mut starts = Vec::with_capacity(n);
        let mut cursor = 0u16;
        for (i, &(w, _)) in entries.iter().enumerate() {
            if i > 0 {
                cursor += separator_width;
            }
            starts.push(cursor);
            cursor += w;
        }

        for (i, &(w, action_id)) in entries.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let prev_end = starts[i - 1] + entries[i - 1].0;
                prev_end + (starts[i] - prev_end) / 2
            };
            let right = if i == n - 1 {
                total_width
            } else {
                let end = starts[i] + w;
                end + (starts[i + 1] - end) / 2
            };

            let width = right.saturating_sub(left);
            if width > 0 {
                self.add_click_target(Rect::new(x + left, y, width, height), action_id);
            }
        }
    }

    /// Action under a cell. Later targets are drawn on top, so they win on overlap.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets.iter().rev().find_map(|t| {
            let r = &t.rect;
            let inside = col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height;
            inside.then_some(t.action_id)
        })
    }
}

/// Below this width the window panel stacks above the upgrade list.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Pixel offset from the grid's top edge to a row index, or `None` outside the grid.
pub fn pixel_y_to_row(click_y: f64, grid_height: f64, terminal_rows: u16) -> Option<u16> {
    pixel_to_cell(click_y, grid_height, terminal_rows)
}

/// Pixel offset from the grid's left edge to a column index, or `None` outside the grid.
pub fn pixel_x_to_col(click_x: f64, grid_width: f64, terminal_cols: u16) -> Option<u16> {
    pixel_to_cell(click_x, grid_width, terminal_cols)
}

fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    (cell < cells).then_some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actions::{BUY_UPGRADE_BASE, CLICK_WINDOW, CYCLE_MODE, RESET, SAVE};

    #[test]
    fn modifiers_pick_mode() {
        let sticky = PurchaseMode::Single;
        assert_eq!(Modifiers::NONE.purchase_mode(sticky), PurchaseMode::Single);
        let shift = Modifiers { shift: true, ctrl: false };
        assert_eq!(shift.purchase_mode(sticky), PurchaseMode::Bulk10);
        let ctrl = Modifiers { shift: false, ctrl: true };
        assert_eq!(ctrl.purchase_mode(sticky), PurchaseMode::MaxAffordable);
    }

    #[test]
    fn ctrl_wins_over_shift() {
        let both = Modifiers { shift: true, ctrl: true };
        assert_eq!(
            both.purchase_mode(PurchaseMode::Bulk10),
            PurchaseMode::MaxAffordable
        );
    }

    #[test]
    fn sticky_mode_applies_without_modifiers() {
        assert_eq!(
            Modifiers::NONE.purchase_mode(PurchaseMode::MaxAffordable),
            PurchaseMode::MaxAffordable
        );
    }

    #[test]
    fn upgrade_rows_hit_their_buttons() {
        let mut cs = ClickState::new();
        let list = Rect::new(0, 10, 40, 8);
        for i in 0..6u16 {
            cs.add_row_target(list, 11 + i, BUY_UPGRADE_BASE + i);
        }
        assert_eq!(cs.hit_test(3, 11), Some(BUY_UPGRADE_BASE));
        assert_eq!(cs.hit_test(39, 16), Some(BUY_UPGRADE_BASE + 5));
        assert_eq!(cs.hit_test(3, 10), None);
        assert_eq!(cs.hit_test(40, 11), None);
    }

    #[test]
    fn row_target_outside_area_ignored() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn later_target_wins_on_overlap() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 40, 10), CLICK_WINDOW);
        cs.add_click_target(Rect::new(5, 9, 10, 1), SAVE);
        assert_eq!(cs.hit_test(7, 9), Some(SAVE));
        assert_eq!(cs.hit_test(2, 9), Some(CLICK_WINDOW));
    }

    #[test]
    fn clear_drops_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 10, 10), CLICK_WINDOW);
        cs.clear_targets();
        assert_eq!(cs.hit_test(1, 1), None);
    }

    #[test]
    fn bar_targets_split_separators() {
        // " [M] x1 " (8) | " [S] Save " (10) with a 3-col separator
        let mut cs = ClickState::new();
        cs.register_bar_targets(&[(8, CYCLE_MODE), (10, SAVE)], 3, 0, 20, 40, 1);
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(0, 20), Some(CYCLE_MODE));
        // separator 8..11, midpoint 9
        assert_eq!(cs.hit_test(8, 20), Some(CYCLE_MODE));
        assert_eq!(cs.hit_test(9, 20), Some(SAVE));
        assert_eq!(cs.hit_test(39, 20), Some(SAVE));
    }

    #[test]
    fn bar_targets_respect_offset_and_height() {
        let mut cs = ClickState::new();
        cs.register_bar_targets(&[(6, SAVE), (6, RESET)], 1, 5, 3, 30, 2);
        assert_eq!(cs.hit_test(5, 4), Some(SAVE));
        assert_eq!(cs.hit_test(4, 3), None);
        assert_eq!(cs.hit_test(34, 3), Some(RESET));
    }

    #[test]
    fn bar_targets_empty() {
        let mut cs = ClickState::new();
        cs.register_bar_targets(&[], 3, 0, 0, 80, 1);
        assert!(cs.targets.is_empty());
    }

    #[test]
    fn narrow_layout_threshold() {
        assert!(is_narrow_layout(59));
        assert!(!is_narrow_layout(60));
    }

    #[test]
    fn pixel_to_row() {
        assert_eq!(pixel_y_to_row(0.0, 450.0, 30), Some(0));
        assert_eq!(pixel_y_to_row(15.0, 450.0, 30), Some(1));
        assert_eq!(pixel_y_to_row(449.0, 450.0, 30), Some(29));
        assert_eq!(pixel_y_to_row(450.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(-1.0, 450.0, 30), None);
        assert_eq!(pixel_y_to_row(10.0, 0.0, 30), None);
    }

    #[test]
    fn pixel_to_col() {
        assert_eq!(pixel_x_to_col(10.0, 800.0, 80), Some(1));
        assert_eq!(pixel_x_to_col(799.0, 800.0, 80), Some(79));
        assert_eq!(pixel_x_to_col(800.0, 800.0, 80), None);
        assert_eq!(pixel_x_to_col(5.0, 800.0, 0), None);
    }

    #[test]
    fn tap_on_upgrade_row_through_pixels() {
        let mut cs = ClickState::new();
        cs.terminal_cols = 40;
        cs.terminal_rows = 30;
        cs.add_row_target(Rect::new(0, 12, 40, 6), 12, BUY_UPGRADE_BASE + 2);

        let grid_height = 30.0 * 15.0;
        let row = pixel_y_to_row(12.0 * 15.0 + 7.0, grid_height, cs.terminal_rows).unwrap();
        let col = pixel_x_to_col(100.0, 400.0, cs.terminal_cols).unwrap();
        assert_eq!(cs.hit_test(col, row), Some(BUY_UPGRADE_BASE + 2));
    }
}
