//! Small UI building blocks that pair what is drawn with where it can be
//! clicked.
//!
//! - [`TabBar`]: one row of labels, each its own click target.
//! - [`ClickableList`]: lines of text where some lines are buttons.
//! - [`hp_bar`]: a fixed-width text gauge.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

/// `[████░░░░]` gauge of `current` out of `max`, `width` cells inside the brackets.
pub fn hp_bar(current: u32, max: u32, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (current.min(max) as usize * width) / max as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Column spans `(start, end)` a tab label occupies, widened to split each
/// separator between its neighbours and to cover the full `total` width.
fn tab_spans(widths: &[u16], separator: u16, total: u16) -> Vec<(u16, u16)> {
    let mut spans = Vec::with_capacity(widths.len());
    let mut x = 0u16;
    for (i, w) in widths.iter().enumerate() {
        let start = if i == 0 { 0 } else { x.saturating_sub(separator - separator / 2) };
        let label_end = x + w;
        let end = if i + 1 == widths.len() {
            total.max(label_end)
        } else {
            label_end + separator / 2
        };
        spans.push((start, end));
        x = label_end + separator;
    }
    spans
}

// ── TabBar ─────────────────────────────────────────────────────

pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let inner = match &self.block {
            Some(block) => block.inner(area),
            None => area,
        };
        let sep_width = Line::from(self.separator).width() as u16;

        let mut spans = Vec::new();
        let mut widths = Vec::new();
        for (i, (label, style, _)) in self.tabs.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(self.separator, Style::default().fg(Color::DarkGray)));
            }
            let padded = format!(" {} ", label);
            widths.push(Line::from(padded.as_str()).width() as u16);
            spans.push(Span::styled(padded, *style));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        let paragraph = match self.block {
            Some(block) => paragraph.block(block),
            None => paragraph,
        };
        f.render_widget(paragraph, area);

        for ((start, end), (_, _, action_id)) in tab_spans(&widths, sep_width, inner.width)
            .into_iter()
            .zip(self.tabs.iter())
        {
            let end = end.min(inner.width);
            if end > start {
                cs.add_click_target(
                    Rect::new(inner.x + start, area.y, end - start, area.height.max(1)),
                    *action_id,
                );
            }
        }
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines for a `Paragraph`, some of them bound to actions.
///
/// Lines are assumed not to wrap: each occupies exactly one row.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
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
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for a widget drawn in `area` whose content starts
    /// `top` rows below the area's top edge and ends `bottom` rows above its
    /// bottom edge (1 and 1 for `Borders::ALL`).
    pub fn register_targets(&self, area: Rect, cs: &mut ClickState, top: u16, bottom: u16) {
        let first_row = area.y + top;
        let last_row = (area.y + area.height).saturating_sub(bottom);
        for &(idx, action_id) in &self.actions {
            let row = first_row + idx as u16;
            if row < last_row {
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

impl Default for ClickableList<'_> {
    fn default() -> Self {
        Self::new()
    }
}
