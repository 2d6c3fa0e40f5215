//! # Layout Composer
//!
//! Splits the terminal into the four feature-screen regions and works out
//! which slice of each collection is visible.
//!
//! ```text
//! ┌ /flexbox ───────────────────────────────────────┐
//! │ Title - status, spec url, usage, description    │  heading (fixed)
//! └─────────────────────────────────────────────────┘
//! ┌ Browser Support ────────────────────────────────┐
//! │ ‹ Chrome ✅ │ Edge ✅ │ Firefox ◐ ›             │  carousel
//! │                                                 │
//! │  ✅  4-20 [past]  Supported                     │  focused browser's ranges
//! └─────────────────────────────────────────────────┘
//! ┌ Info │ Notes │ Resources ───────────────────────┐
//! │ active tab, wrapped and scrolled                │  details (rest)
//! └─────────────────────────────────────────────────┘
//!  legend / key bindings / position                    footer (fixed)
//! ```
//!
//! Sizes are recomputed from the terminal area on every frame, so a resize
//! is simply picked up by the next draw.

use crate::model::{BrowserBlock, FeatureRecord, SupportRange};
use crate::ui::state::{Bounds, NavigationState};
use crate::ui::text::wrap_lines;
use crate::ui::viewport::{window, Window};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 20;
pub const HEADING_HEIGHT: u16 = 6;
pub const FOOTER_HEIGHT: u16 = 3;
pub const MIN_SUPPORT_HEIGHT: u16 = 6;
/// Support region share of the rows between heading and footer.
pub const SUPPORT_PERCENT: u16 = 45;
pub const CARD_WIDTH: u16 = 22;

pub const NO_BROWSERS: &str = "No browser support blocks found.";
pub const NO_RANGES: &str = "No range data";
pub const NO_METADATA: &str = "No additional feature metadata.";

/// A named details section before wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSection {
    pub name: String,
    pub lines: Vec<String>,
}

impl TabSection {
    fn new(name: &str, text: &str) -> Self {
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            name: name.to_string(),
            lines,
        }
    }

    pub fn wrapped(&self, width: usize) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|line| {
                let wrapped = wrap_lines(line, width);
                if wrapped.is_empty() {
                    vec![String::new()]
                } else {
                    wrapped
                }
            })
            .collect()
    }
}

/// Derive the details tabs from a record. Never empty.
pub fn tab_sections(feature: &FeatureRecord) -> Vec<TabSection> {
    let mut sections: Vec<TabSection> = feature
        .tabs
        .iter()
        .map(|tab| TabSection::new(&tab.name, &tab.text))
        .collect();

    if sections.is_empty() {
        if let Some(notes) = feature.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            sections.push(TabSection::new("Notes", notes));
        }
        if !feature.resources.is_empty() {
            let text: Vec<String> = feature
                .resources
                .iter()
                .map(|l| format!("- {}: {}", l.label, l.url))
                .collect();
            sections.push(TabSection::new("Resources", &text.join("\n")));
        }
        if !feature.subfeatures.is_empty() {
            let text: Vec<String> = feature
                .subfeatures
                .iter()
                .map(|l| format!("- {}: {}", l.label, l.url))
                .collect();
            sections.push(TabSection::new("Sub-features", &text.join("\n")));
        }
    }

    if sections.is_empty() {
        sections.push(TabSection::new("Info", NO_METADATA));
    }
    sections
}

/// A feature record plus the tab sections derived from it once per session.
#[derive(Debug, Clone)]
pub struct FeatureView<'a> {
    pub feature: &'a FeatureRecord,
    pub tabs: Vec<TabSection>,
}

impl<'a> FeatureView<'a> {
    pub fn new(feature: &'a FeatureRecord) -> Self {
        Self {
            feature,
            tabs: tab_sections(feature),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub heading: Rect,
    pub support: Rect,
    pub details: Rect,
    pub footer: Rect,
}

pub fn fits(area: Rect) -> bool {
    area.width >= MIN_WIDTH && area.height >= MIN_HEIGHT
}

/// Partition `area`, or `None` when it is below the minimum size.
pub fn regions(area: Rect) -> Option<Regions> {
    if !fits(area) {
        return None;
    }

    let body = area.height - HEADING_HEIGHT - FOOTER_HEIGHT;
    let share = u32::from(body) * u32::from(SUPPORT_PERCENT) / 100;
    let support = u16::try_from(share)
        .unwrap_or(body)
        .max(MIN_SUPPORT_HEIGHT)
        .min(body);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADING_HEIGHT),
            Constraint::Length(support),
            Constraint::Length(body - support),
            Constraint::Length(FOOTER_HEIGHT),
        ])
        .split(area);

    Some(Regions {
        heading: chunks[0],
        support: chunks[1],
        details: chunks[2],
        footer: chunks[3],
    })
}

fn inner_width(rect: Rect) -> usize {
    usize::from(rect.width.saturating_sub(2)).max(1)
}

fn browser_visible(support: Rect) -> usize {
    (usize::from(support.width.saturating_sub(2)) / usize::from(CARD_WIDTH)).max(1)
}

fn range_visible(support: Rect) -> usize {
    usize::from(support.height.saturating_sub(4)).max(1)
}

fn tab_visible(details: Rect) -> usize {
    usize::from(details.height.saturating_sub(2)).max(1)
}

/// Sizes of every navigable dimension for `area`, or `None` when too small.
pub fn measure(area: Rect, view: &FeatureView<'_>, tab_page_lines: usize) -> Option<Bounds> {
    let regions = regions(area)?;
    let wrap_width = inner_width(regions.details);

    Some(Bounds {
        range_counts: view
            .feature
            .browser_blocks
            .iter()
            .map(|b| b.ranges.len())
            .collect(),
        browser_visible: browser_visible(regions.support),
        range_visible: range_visible(regions.support),
        tab_line_counts: view.tabs.iter().map(|t| t.wrapped(wrap_width).len()).collect(),
        tab_visible: tab_visible(regions.details),
        tab_page_lines,
    })
}

/// Everything the renderer needs for one full frame.
#[derive(Debug, Clone)]
pub struct FeatureLayout<'a> {
    pub regions: Regions,
    pub feature: &'a FeatureRecord,
    /// Carousel window over all browser blocks.
    pub browsers: Window,
    pub focused: Option<&'a BrowserBlock>,
    /// Index of the first visible range within the focused browser.
    pub range_start: usize,
    pub ranges: &'a [SupportRange],
    pub range_total: usize,
    pub tab_names: Vec<&'a str>,
    pub tab_index: usize,
    pub tab_scroll: usize,
    pub tab_total_lines: usize,
    pub tab_lines: Vec<String>,
}

impl FeatureLayout<'_> {
    pub fn visible_browsers(&self) -> &[BrowserBlock] {
        &self.feature.browser_blocks[self.browsers.range()]
    }
}

#[derive(Debug, Clone)]
pub enum FeatureFrame<'a> {
    TooSmall { width: u16, height: u16 },
    Full(Box<FeatureLayout<'a>>),
}

/// Build the frame description for `state`, which must already be
/// re-validated against [`measure`] for the same area.
pub fn compose<'a>(
    area: Rect,
    view: &'a FeatureView<'a>,
    state: &NavigationState,
) -> FeatureFrame<'a> {
    let Some(regions) = regions(area) else {
        return FeatureFrame::TooSmall {
            width: area.width,
            height: area.height,
        };
    };

    let blocks = &view.feature.browser_blocks;
    let browsers = window(
        blocks.len(),
        browser_visible(regions.support),
        state.selected_browser,
        state.browser_window_start,
    );
    let focused = blocks.get(browsers.cursor);

    let (range_start, ranges, range_total) = match focused {
        Some(block) => {
            let start = state.range_scroll.min(block.ranges.len());
            let end = (start + range_visible(regions.support)).min(block.ranges.len());
            (start, &block.ranges[start..end], block.ranges.len())
        }
        None => (0, &[][..], 0),
    };

    let tab_index = state.tab_index.min(view.tabs.len().saturating_sub(1));
    let wrapped = view
        .tabs
        .get(tab_index)
        .map(|t| t.wrapped(inner_width(regions.details)))
        .unwrap_or_default();
    let tab_total_lines = wrapped.len();
    let tab_scroll = state.tab_scroll.min(tab_total_lines);
    let tab_lines = wrapped
        .into_iter()
        .skip(tab_scroll)
        .take(tab_visible(regions.details))
        .collect();

    FeatureFrame::Full(Box::new(FeatureLayout {
        regions,
        feature: view.feature,
        browsers,
        focused,
        range_start,
        ranges,
        range_total,
        tab_names: view.tabs.iter().map(|t| t.name.as_str()).collect(),
        tab_index,
        tab_scroll,
        tab_total_lines,
        tab_lines,
    }))
}
