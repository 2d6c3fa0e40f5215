//! Navigation state for the feature screen and the transitions that mutate it.
//!
//! [`NavigationState`] only stores positions. Everything it needs to know
//! about sizes (how many browsers, ranges, tab lines, and how many of each
//! fit on screen) arrives as [`Bounds`], recomputed by the layout composer on
//! every frame. After each transition and each re-measure the state is
//! re-validated so every index is in range and the selected browser is
//! inside its visible window.

use crate::input::LogicalKey;
use crate::ui::viewport::{clamp_index, clamp_scroll, cycle, max_start, step, window};

/// Default number of tab lines moved by PageUp/PageDown.
pub const DEFAULT_TAB_PAGE_LINES: usize = 5;

/// Sizes of every navigable dimension for the current frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    /// Range count per browser block; its length is the browser count.
    pub range_counts: Vec<usize>,
    pub browser_visible: usize,
    pub range_visible: usize,
    /// Wrapped line count per tab; its length is the tab count.
    pub tab_line_counts: Vec<usize>,
    pub tab_visible: usize,
    pub tab_page_lines: usize,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            range_counts: Vec::new(),
            browser_visible: 1,
            range_visible: 1,
            tab_line_counts: Vec::new(),
            tab_visible: 1,
            tab_page_lines: DEFAULT_TAB_PAGE_LINES,
        }
    }
}

impl Bounds {
    pub fn browser_count(&self) -> usize {
        self.range_counts.len()
    }

    pub fn range_count(&self, browser: usize) -> usize {
        self.range_counts.get(browser).copied().unwrap_or(0)
    }

    pub fn tab_count(&self) -> usize {
        self.tab_line_counts.len()
    }

    pub fn tab_lines(&self, tab: usize) -> usize {
        self.tab_line_counts.get(tab).copied().unwrap_or(0)
    }
}

/// Whether the render loop keeps going after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub selected_browser: usize,
    pub browser_window_start: usize,
    pub browser_visible_count: usize,
    pub range_scroll: usize,
    pub tab_index: usize,
    pub tab_scroll: usize,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            selected_browser: 0,
            browser_window_start: 0,
            browser_visible_count: 1,
            range_scroll: 0,
            tab_index: 0,
            tab_scroll: 0,
        }
    }

    /// Apply the transition bound to `key`, then re-validate.
    pub fn apply(&mut self, key: LogicalKey, bounds: &Bounds) -> Flow {
        match key {
            LogicalKey::Left => self.move_browser(-1, bounds),
            LogicalKey::Right => self.move_browser(1, bounds),
            LogicalKey::Up => self.scroll_ranges(-1, bounds),
            LogicalKey::Down => self.scroll_ranges(1, bounds),
            LogicalKey::PageUp => self.page(-1, bounds),
            LogicalKey::PageDown => self.page(1, bounds),
            LogicalKey::Tab | LogicalKey::NextSection => self.switch_tab(1, bounds),
            LogicalKey::ShiftTab | LogicalKey::PrevSection => self.switch_tab(-1, bounds),
            LogicalKey::Home => self.jump_home(),
            LogicalKey::End => self.jump_end(bounds),
            LogicalKey::Quit => return Flow::Exit,
            LogicalKey::Enter | LogicalKey::Noop => {}
        }
        self.revalidate(bounds);
        Flow::Continue
    }

    /// Pull every position back inside `bounds`.
    pub fn revalidate(&mut self, bounds: &Bounds) {
        self.browser_visible_count = bounds.browser_visible.max(1);
        let browsers = window(
            bounds.browser_count(),
            self.browser_visible_count,
            self.selected_browser,
            self.browser_window_start,
        );
        self.selected_browser = browsers.cursor;
        self.browser_window_start = browsers.start;

        self.range_scroll = clamp_scroll(
            self.range_scroll,
            bounds.range_count(self.selected_browser),
            bounds.range_visible,
        );

        self.tab_index = clamp_index(self.tab_index, bounds.tab_count());
        self.tab_scroll = clamp_scroll(
            self.tab_scroll,
            bounds.tab_lines(self.tab_index),
            bounds.tab_visible,
        );
    }

    fn move_browser(&mut self, delta: isize, bounds: &Bounds) {
        self.selected_browser = step(self.selected_browser, delta, bounds.browser_count());
        self.range_scroll = 0;
    }

    fn scroll_ranges(&mut self, delta: isize, bounds: &Bounds) {
        let count = bounds.range_count(self.selected_browser);
        self.range_scroll = step(self.range_scroll, delta, count);
    }

    fn page(&mut self, direction: isize, bounds: &Bounds) {
        let page = self.browser_visible_count.max(1) as isize;
        let next = step(self.selected_browser, direction * page, bounds.browser_count());
        if next != self.selected_browser {
            self.selected_browser = next;
            self.range_scroll = 0;
        }

        let lines = bounds.tab_page_lines as isize;
        let tab_len = bounds.tab_lines(self.tab_index);
        self.tab_scroll = step(self.tab_scroll, direction * lines, tab_len);
    }

    fn switch_tab(&mut self, delta: isize, bounds: &Bounds) {
        self.tab_index = cycle(self.tab_index, delta, bounds.tab_count());
        self.tab_scroll = 0;
    }

    fn jump_home(&mut self) {
        self.range_scroll = 0;
        self.tab_scroll = 0;
    }

    fn jump_end(&mut self, bounds: &Bounds) {
        let ranges = bounds.range_count(self.selected_browser);
        self.range_scroll = max_start(ranges, bounds.range_visible);
        let lines = bounds.tab_lines(self.tab_index);
        self.tab_scroll = max_start(lines, bounds.tab_visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(browsers: usize, visible: usize) -> Bounds {
        Bounds {
            range_counts: vec![10; browsers],
            browser_visible: visible,
            range_visible: 4,
            tab_line_counts: vec![30, 2],
            tab_visible: 8,
            tab_page_lines: DEFAULT_TAB_PAGE_LINES,
        }
    }

    #[test]
    fn test_right_six_times_over_seven_browsers() {
        let b = bounds(7, 3);
        let mut state = NavigationState::new();
        state.revalidate(&b);
        for _ in 0..6 {
            assert_eq!(state.apply(LogicalKey::Right, &b), Flow::Continue);
            assert!(state.browser_window_start + 3 <= 7);
        }
        assert_eq!(state.selected_browser, 6);
        assert_eq!(state.browser_window_start, 4);

        state.apply(LogicalKey::Right, &b);
        assert_eq!(state.selected_browser, 6);
    }

    #[test]
    fn test_left_resets_range_scroll() {
        let b = bounds(3, 3);
        let mut state = NavigationState::new();
        state.apply(LogicalKey::Right, &b);
        state.apply(LogicalKey::Down, &b);
        state.apply(LogicalKey::Down, &b);
        assert_eq!(state.range_scroll, 2);
        state.apply(LogicalKey::Left, &b);
        assert_eq!(state.selected_browser, 0);
        assert_eq!(state.range_scroll, 0);
    }

    #[test]
    fn test_range_scroll_clamped_to_last_window() {
        let b = bounds(1, 1);
        let mut state = NavigationState::new();
        for _ in 0..20 {
            state.apply(LogicalKey::Down, &b);
        }
        // 10 ranges, 4 visible
        assert_eq!(state.range_scroll, 6);
        state.apply(LogicalKey::Up, &b);
        assert_eq!(state.range_scroll, 5);
    }

    #[test]
    fn test_end_then_home() {
        let b = bounds(2, 2);
        let mut state = NavigationState::new();
        state.apply(LogicalKey::End, &b);
        assert_eq!(state.range_scroll, 6);
        assert_eq!(state.tab_scroll, 22);
        state.apply(LogicalKey::Home, &b);
        assert_eq!(state.range_scroll, 0);
        assert_eq!(state.tab_scroll, 0);
    }

    #[test]
    fn test_page_moves_browsers_and_tab_lines() {
        let b = bounds(10, 3);
        let mut state = NavigationState::new();
        state.revalidate(&b);
        state.apply(LogicalKey::PageDown, &b);
        assert_eq!(state.selected_browser, 3);
        assert_eq!(state.tab_scroll, 5);
        state.apply(LogicalKey::PageDown, &b);
        state.apply(LogicalKey::PageDown, &b);
        state.apply(LogicalKey::PageDown, &b);
        assert_eq!(state.selected_browser, 9);
        state.apply(LogicalKey::PageUp, &b);
        assert_eq!(state.selected_browser, 6);
        assert_eq!(state.tab_scroll, 15);
    }

    #[test]
    fn test_tab_cycles_and_resets_scroll() {
        let b = bounds(1, 1);
        let mut state = NavigationState::new();
        state.apply(LogicalKey::PageDown, &b);
        assert_eq!(state.tab_scroll, 5);
        state.apply(LogicalKey::Tab, &b);
        assert_eq!(state.tab_index, 1);
        assert_eq!(state.tab_scroll, 0);
        state.apply(LogicalKey::NextSection, &b);
        assert_eq!(state.tab_index, 0);
        state.apply(LogicalKey::ShiftTab, &b);
        assert_eq!(state.tab_index, 1);
        state.apply(LogicalKey::PrevSection, &b);
        assert_eq!(state.tab_index, 0);
    }

    #[test]
    fn test_quit_exits_without_mutation() {
        let b = bounds(4, 2);
        let mut state = NavigationState::new();
        state.apply(LogicalKey::Right, &b);
        let before = state.clone();
        assert_eq!(state.apply(LogicalKey::Quit, &b), Flow::Exit);
        assert_eq!(state, before);
    }

    #[test]
    fn test_empty_bounds_are_safe() {
        let b = Bounds::default();
        let mut state = NavigationState::new();
        for key in [
            LogicalKey::Left,
            LogicalKey::Right,
            LogicalKey::Up,
            LogicalKey::Down,
            LogicalKey::PageUp,
            LogicalKey::PageDown,
            LogicalKey::Tab,
            LogicalKey::ShiftTab,
            LogicalKey::PrevSection,
            LogicalKey::NextSection,
            LogicalKey::Home,
            LogicalKey::End,
            LogicalKey::Enter,
            LogicalKey::Noop,
        ] {
            assert_eq!(state.apply(key, &b), Flow::Continue);
            assert_eq!(state, NavigationState::new());
        }
    }

    #[test]
    fn test_revalidate_after_shrink() {
        let mut state = NavigationState::new();
        let wide = bounds(8, 2);
        for _ in 0..7 {
            state.apply(LogicalKey::Right, &wide);
        }
        state.apply(LogicalKey::End, &wide);

        let narrow = Bounds {
            range_counts: vec![3, 3],
            browser_visible: 1,
            range_visible: 2,
            tab_line_counts: vec![4],
            tab_visible: 10,
            tab_page_lines: DEFAULT_TAB_PAGE_LINES,
        };
        state.revalidate(&narrow);
        assert_eq!(state.selected_browser, 1);
        assert_eq!(state.browser_window_start, 1);
        assert_eq!(state.browser_visible_count, 1);
        assert_eq!(state.range_scroll, 1);
        assert_eq!(state.tab_scroll, 0);
    }
}
