//! Input normalization and click hit-testing.
//!
//! Keyboard, mouse and touch all end up as an [`InputEvent`]. Clickable
//! regions are registered by the renderer every frame and looked up by the
//! mouse handler.

use ratzilla::ratatui::layout::Rect;

/// Directional and confirm keys, independent of the physical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Up,
    Down,
    Left,
    Right,
    Confirm,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key(char),
    Nav(Nav),
    /// A click or tap on a registered target, by semantic action ID.
    Click(u16),
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    pub rect: Rect,
    pub action_id: u16,
}

/// Click targets of the last rendered frame plus the terminal size.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.targets.clear();
        self.terminal_cols = cols;
        self.terminal_rows = rows;
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        self.targets.push(ClickTarget { rect, action_id });
    }

    /// One full-width row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Action under a terminal cell. Later targets sit on top.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

impl Default for ClickState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn is_narrow_layout(width: u16) -> bool {
    width < 70
}

/// Convert a pixel position inside the grid element into a terminal cell.
///
/// Returns `None` for positions outside the grid or a degenerate grid.
pub fn pixel_to_cell(
    x: f64,
    y: f64,
    grid_width: f64,
    grid_height: f64,
    cols: u16,
    rows: u16,
) -> Option<(u16, u16)> {
    if grid_width <= 0.0 || grid_height <= 0.0 || cols == 0 || rows == 0 {
        return None;
    }
    if x < 0.0 || y < 0.0 {
        return None;
    }
    let col = (x / (grid_width / cols as f64)) as u16;
    let row = (y / (grid_height / rows as f64)) as u16;
    if col >= cols || row >= rows {
        return None;
    }
    Some((col, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_test_basic() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 10, 80, 1), 1);
        cs.add_click_target(Rect::new(0, 11, 80, 1), 2);
        assert_eq!(cs.hit_test(5, 10), Some(1));
        assert_eq!(cs.hit_test(5, 11), Some(2));
        assert_eq!(cs.hit_test(5, 12), None);
    }

    #[test]
    fn hit_test_overlap_last_wins() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 5, 80, 1), 1);
        cs.add_click_target(Rect::new(5, 5, 10, 1), 2);
        assert_eq!(cs.hit_test(7, 5), Some(2));
        assert_eq!(cs.hit_test(20, 5), Some(1));
    }

    #[test]
    fn row_target_clipped_to_area() {
        let mut cs = ClickState::new();
        let area = Rect::new(5, 10, 30, 5);
        cs.add_row_target(area, 9, 1);
        cs.add_row_target(area, 15, 2);
        cs.add_row_target(area, 12, 3);
        assert_eq!(cs.targets.len(), 1);
        assert_eq!(cs.hit_test(10, 12), Some(3));
        assert_eq!(cs.hit_test(4, 12), None);
    }

    #[test]
    fn reset_clears_targets() {
        let mut cs = ClickState::new();
        cs.add_click_target(Rect::new(0, 0, 1, 1), 1);
        cs.reset(120, 40);
        assert!(cs.targets.is_empty());
        assert_eq!(cs.terminal_cols, 120);
        assert_eq!(cs.terminal_rows, 40);
    }

    #[test]
    fn pixel_to_cell_basic() {
        // 80x30 grid, 800x450 px → 10px by 15px cells
        assert_eq!(pixel_to_cell(0.0, 0.0, 800.0, 450.0, 80, 30), Some((0, 0)));
        assert_eq!(pixel_to_cell(19.0, 29.0, 800.0, 450.0, 80, 30), Some((1, 1)));
        assert_eq!(pixel_to_cell(799.0, 449.0, 800.0, 450.0, 80, 30), Some((79, 29)));
    }

    #[test]
    fn pixel_to_cell_out_of_bounds() {
        assert_eq!(pixel_to_cell(-1.0, 5.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(800.0, 5.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 450.0, 800.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 0.0, 450.0, 80, 30), None);
        assert_eq!(pixel_to_cell(5.0, 5.0, 800.0, 450.0, 0, 30), None);
    }

    #[test]
    fn narrow_threshold() {
        assert!(is_narrow_layout(69));
        assert!(!is_narrow_layout(70));
    }
}
