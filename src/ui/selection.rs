//! Pick-one-of-N list used to disambiguate search results.
//!
//! Same shape as the feature screen: a small position record, a key
//! transition, and a composed frame description, all independent of the
//! terminal so they can be exercised directly in tests.

use crate::input::LogicalKey;
use crate::model::SearchMatch;
use crate::ui::viewport::{clamp_index, step, window, Window};
use ratatui::layout::Rect;

pub const TITLE: &str = "Select a feature";
pub const HINT: &str = "Use ↑/↓ to move, Enter to select, q/Esc to cancel.";
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 6;

/// Rows lost to the border and the hint line.
const CHROME_ROWS: u16 = 4;

/// Result of one key on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Pending,
    Chosen(usize),
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub cursor: usize,
    pub window_start: usize,
    pub visible: usize,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            window_start: 0,
            visible: 1,
        }
    }

    pub fn revalidate(&mut self, len: usize, visible: usize) {
        self.visible = visible.max(1);
        let w = window(len, self.visible, self.cursor, self.window_start);
        self.cursor = w.cursor;
        self.window_start = w.start;
    }

    pub fn apply(&mut self, key: LogicalKey, len: usize) -> Choice {
        let page = self.visible.max(1) as isize;
        match key {
            LogicalKey::Up => self.cursor = step(self.cursor, -1, len),
            LogicalKey::Down => self.cursor = step(self.cursor, 1, len),
            LogicalKey::PageUp => self.cursor = step(self.cursor, -page, len),
            LogicalKey::PageDown => self.cursor = step(self.cursor, page, len),
            LogicalKey::Home => self.cursor = 0,
            LogicalKey::End => self.cursor = len.saturating_sub(1),
            LogicalKey::Enter if len > 0 => return Choice::Chosen(clamp_index(self.cursor, len)),
            LogicalKey::Quit => return Choice::Cancelled,
            _ => {}
        }
        self.revalidate(len, self.visible);
        Choice::Pending
    }
}

pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Rows available for matches in `area`.
pub fn visible_rows(area: Rect) -> usize {
    usize::from(area.height.saturating_sub(CHROME_ROWS)).max(1)
}

#[derive(Debug, Clone)]
pub enum SelectionFrame<'a> {
    TooSmall {
        width: u16,
        height: u16,
    },
    List {
        area: Rect,
        window: Window,
        matches: &'a [SearchMatch],
    },
}

impl SelectionFrame<'_> {
    /// `(label  /identifier, focused)` for each visible row.
    pub fn rows(&self) -> Vec<(String, bool)> {
        match self {
            SelectionFrame::TooSmall { .. } => Vec::new(),
            SelectionFrame::List {
                window, matches, ..
            } => matches[window.range()]
                .iter()
                .enumerate()
                .map(|(offset, m)| {
                    (
                        format!("{}  /{}", m.label, m.identifier),
                        window.start + offset == window.cursor,
                    )
                })
                .collect(),
        }
    }
}

pub fn compose<'a>(
    area: Rect,
    matches: &'a [SearchMatch],
    state: &SelectionState,
) -> SelectionFrame<'a> {
    if !fits(area) {
        return SelectionFrame::TooSmall {
            width: area.width,
            height: area.height,
        };
    }
    SelectionFrame::List {
        area,
        window: window(
            matches.len(),
            visible_rows(area),
            state.cursor,
            state.window_start,
        ),
        matches,
    }
}
