use anyhow::{bail, Result};
use caniuse_tui::input::{KeyReader, LogicalKey};
use caniuse_tui::model::{
    BrowserBlock, Era, FeatureRecord, SearchMatch, SupportRange, SupportStatus, TabText,
};
use caniuse_tui::ui::selection::Choice;
use caniuse_tui::ui::state::Flow;
use caniuse_tui::ui::{FeatureScreen, SelectionScreen, Theme};
use ratatui::{backend::TestBackend, Terminal};
use std::collections::VecDeque;

/// Hands out a fixed list of keys, then behaves like a closed tty.
struct ScriptedKeys {
    keys: VecDeque<LogicalKey>,
    closed: bool,
}

impl ScriptedKeys {
    fn new(keys: &[LogicalKey]) -> Self {
        Self {
            keys: keys.iter().copied().collect(),
            closed: false,
        }
    }

    fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeyReader for ScriptedKeys {
    fn read_key(&mut self) -> Result<LogicalKey> {
        match self.keys.pop_front() {
            Some(key) => Ok(key),
            None => {
                self.closed = true;
                Ok(LogicalKey::Noop)
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

struct BrokenKeys;

impl KeyReader for BrokenKeys {
    fn read_key(&mut self) -> Result<LogicalKey> {
        bail!("input device disappeared")
    }
}

fn terminal(width: u16, height: u16) -> Terminal<TestBackend> {
    Terminal::new(TestBackend::new(width, height)).expect("test terminal")
}

fn screen_text(terminal: &Terminal<TestBackend>) -> Vec<String> {
    let buffer = terminal.backend().buffer();
    let width = usize::from(buffer.area.width);
    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect())
        .collect()
}

fn shows(terminal: &Terminal<TestBackend>, needle: &str) -> bool {
    screen_text(terminal).iter().any(|row| row.contains(needle))
}

fn sample_feature(browsers: usize) -> FeatureRecord {
    FeatureRecord {
        title: "CSS Flexible Box Layout Module".to_string(),
        slug: "flexbox".to_string(),
        spec_url: Some("https://www.w3.org/TR/css-flexbox-1/".to_string()),
        spec_status: Some("CR".to_string()),
        usage_supported: Some(96.5),
        usage_partial: Some(0.4),
        usage_total: Some(96.9),
        description: "Method of positioning elements in horizontal or vertical stacks."
            .to_string(),
        browser_blocks: (0..browsers)
            .map(|i| BrowserBlock {
                name: format!("Browser{i}"),
                ranges: vec![
                    SupportRange {
                        label: "4-20".to_string(),
                        status: SupportStatus::Partial,
                        era: Era::Past,
                        note_refs: vec!["1".to_string()],
                        title: Some("Global usage: 1.58% - Partial support".to_string()),
                    },
                    SupportRange {
                        label: "125".to_string(),
                        status: SupportStatus::Supported,
                        era: Era::Current,
                        note_refs: Vec::new(),
                        title: None,
                    },
                ],
            })
            .collect(),
        tabs: vec![
            TabText {
                name: "Notes".to_string(),
                text: "1. Only supports the old flexbox specification.".to_string(),
            },
            TabText {
                name: "Resources".to_string(),
                text: "- A guide to flexbox".to_string(),
            },
        ],
        ..FeatureRecord::default()
    }
}

fn matches(n: usize) -> Vec<SearchMatch> {
    (0..n)
        .map(|i| SearchMatch {
            label: format!("Feature {i}"),
            identifier: format!("feature-{i}"),
        })
        .collect()
}

#[test]
fn test_feature_screen_draws_all_regions() {
    let feature = sample_feature(3);
    let mut term = terminal(100, 30);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Quit]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");

    assert!(shows(&term, "CSS Flexible Box Layout Module"));
    assert!(shows(&term, "/flexbox"));
    assert!(shows(&term, "Spec: https://www.w3.org/TR/css-flexbox-1/"));
    assert!(shows(&term, "Total 96.90%"));
    assert!(shows(&term, "Browser Support 1/3"));
    assert!(shows(&term, "4-20 [past]"));
    assert!(shows(&term, "usage:1.58%"));
    assert!(shows(&term, "notes:1"));
    assert!(shows(&term, "Only supports the old flexbox"));
    assert!(shows(&term, "Resources"));
    assert!(shows(&term, "q/Esc quit"));
}

#[test]
fn test_quit_is_terminal() {
    let feature = sample_feature(4);
    let mut term = terminal(80, 24);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Right, LogicalKey::Quit, LogicalKey::Down]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");

    assert_eq!(screen.frames_drawn(), 2);
    assert_eq!(keys.remaining(), 1);
    assert_eq!(screen.state().selected_browser, 1);
}

#[test]
fn test_keys_drive_navigation() {
    let feature = sample_feature(5);
    let mut term = terminal(80, 24);
    let mut keys = ScriptedKeys::new(&[
        LogicalKey::Right,
        LogicalKey::Right,
        LogicalKey::Down,
        LogicalKey::Tab,
        LogicalKey::Enter,
        LogicalKey::Quit,
    ]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");

    let state = screen.state();
    assert_eq!(state.selected_browser, 2);
    assert_eq!(state.tab_index, 1);
    assert_eq!(state.tab_scroll, 0);
    assert!(shows(&term, "Browser 3/5"));
}

#[test]
fn test_closed_input_ends_the_loop() {
    let feature = sample_feature(1);
    let mut term = terminal(80, 24);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Down]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");
    assert!(keys.is_closed());
    assert_eq!(screen.frames_drawn(), 2);
}

#[test]
fn test_read_error_is_an_implicit_quit() {
    let feature = sample_feature(1);
    let mut term = terminal(80, 24);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut BrokenKeys).expect("run");
    assert_eq!(screen.frames_drawn(), 1);
}

#[test]
fn test_resize_below_threshold_accepts_only_quit() {
    let feature = sample_feature(3);
    let mut term = terminal(80, 24);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    let bounds = screen.draw(&mut term).expect("draw");
    assert!(bounds.is_some());
    assert_eq!(
        screen.handle_key(LogicalKey::Right, bounds.as_ref()),
        Flow::Continue
    );
    assert_eq!(screen.state().selected_browser, 1);

    term.backend_mut().resize(30, 10);
    let bounds = screen.draw(&mut term).expect("draw");
    assert!(bounds.is_none());
    assert!(shows(&term, "Terminal too small"));
    assert!(shows(&term, "Press q to quit"));

    let before = screen.state().clone();
    for key in [LogicalKey::Right, LogicalKey::End, LogicalKey::Tab] {
        assert_eq!(screen.handle_key(key, bounds.as_ref()), Flow::Continue);
    }
    assert_eq!(screen.state(), &before);

    term.backend_mut().resize(80, 24);
    let bounds = screen.draw(&mut term).expect("draw");
    assert!(bounds.is_some());
    assert!(!shows(&term, "Terminal too small"));

    term.backend_mut().resize(30, 10);
    let bounds = screen.draw(&mut term).expect("draw");
    assert_eq!(screen.handle_key(LogicalKey::Quit, bounds.as_ref()), Flow::Exit);
}

#[test]
fn test_keys_use_size_at_read_time() {
    let feature = sample_feature(3);
    let mut term = terminal(80, 24);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    // shrunk while waiting for the key: ignored
    assert!(screen.draw(&mut term).expect("draw").is_some());
    term.backend_mut().resize(30, 10);
    let bounds = screen.measure(&term).expect("measure");
    assert!(bounds.is_none());
    assert_eq!(
        screen.handle_key(LogicalKey::Right, bounds.as_ref()),
        Flow::Continue
    );
    assert_eq!(screen.state().selected_browser, 0);

    // grown back while waiting: the first key counts
    assert!(screen.draw(&mut term).expect("draw").is_none());
    term.backend_mut().resize(80, 24);
    let bounds = screen.measure(&term).expect("measure");
    assert!(bounds.is_some());
    assert_eq!(
        screen.handle_key(LogicalKey::Right, bounds.as_ref()),
        Flow::Continue
    );
    assert_eq!(screen.state().selected_browser, 1);
}

#[test]
fn test_small_terminal_from_the_start() {
    let feature = sample_feature(2);
    let mut term = terminal(20, 8);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Right, LogicalKey::Down, LogicalKey::Quit]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");
    assert_eq!(screen.frames_drawn(), 3);
    assert_eq!(screen.state().selected_browser, 0);
    assert!(shows(&term, "too small"));
}

#[test]
fn test_empty_feature_renders_info_tab() {
    let feature = FeatureRecord {
        title: "Bare".to_string(),
        ..FeatureRecord::default()
    };
    let mut term = terminal(80, 24);
    let mut keys = ScriptedKeys::new(&[
        LogicalKey::Tab,
        LogicalKey::Right,
        LogicalKey::PageDown,
        LogicalKey::End,
        LogicalKey::Quit,
    ]);
    let mut screen = FeatureScreen::new(&feature, Theme::default_theme(), 5);

    screen.run(&mut term, &mut keys).expect("run");

    assert_eq!(screen.state().tab_index, 0);
    assert_eq!(screen.state().selected_browser, 0);
    assert!(shows(&term, "Info"));
    assert!(shows(&term, "No additional feature metadata."));
    assert!(shows(&term, "No browser support blocks found."));
}

#[test]
fn test_selection_returns_identifier() {
    let items = matches(4);
    let mut term = terminal(60, 12);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Down, LogicalKey::Down, LogicalKey::Enter]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    let chosen = screen.run(&mut term, &mut keys).expect("run");
    assert_eq!(chosen.as_deref(), Some("feature-2"));
    assert!(shows(&term, "Select a feature"));
    assert!(shows(&term, "Feature 0  /feature-0"));
    assert!(shows(&term, "Enter to select"));
}

#[test]
fn test_selection_quit_returns_none() {
    let items = matches(3);
    let mut term = terminal(60, 12);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Down, LogicalKey::Quit]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    assert_eq!(screen.run(&mut term, &mut keys).expect("run"), None);
    assert_eq!(screen.frames_drawn(), 2);
}

#[test]
fn test_selection_empty_list_skips_loop() {
    let items: Vec<SearchMatch> = Vec::new();
    let mut term = terminal(60, 12);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Enter]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    assert_eq!(screen.run(&mut term, &mut keys).expect("run"), None);
    assert_eq!(screen.frames_drawn(), 0);
    assert_eq!(keys.remaining(), 1);
}

#[test]
fn test_selection_scrolls_long_lists() {
    let items = matches(30);
    let mut term = terminal(60, 10);
    let mut keys = ScriptedKeys::new(&[LogicalKey::End, LogicalKey::Up, LogicalKey::Enter]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    let chosen = screen.run(&mut term, &mut keys).expect("run");
    assert_eq!(chosen.as_deref(), Some("feature-28"));
    assert!(shows(&term, "feature-29"));
    assert!(!shows(&term, "/feature-0 "));
}

#[test]
fn test_selection_too_small_ignores_enter() {
    let items = matches(3);
    let mut term = terminal(20, 4);
    let mut keys = ScriptedKeys::new(&[LogicalKey::Enter, LogicalKey::Quit]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    assert_eq!(screen.run(&mut term, &mut keys).expect("run"), None);
    assert!(shows(&term, "too small"));
}

#[test]
fn test_selection_closed_input_returns_none() {
    let items = matches(3);
    let mut term = terminal(60, 12);
    let mut keys = ScriptedKeys::new(&[]);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    assert_eq!(screen.run(&mut term, &mut keys).expect("run"), None);
}

#[test]
fn test_selection_keys_use_size_at_read_time() {
    let items = matches(3);
    let mut term = terminal(60, 12);
    let mut screen = SelectionScreen::new(&items, Theme::default_theme());

    assert!(screen.draw(&mut term).expect("draw"));
    term.backend_mut().resize(20, 4);
    let visible = screen.measure(&term).expect("measure");
    assert_eq!(visible, None);
    assert_eq!(screen.handle_key(LogicalKey::Enter, visible), Choice::Pending);
    assert_eq!(screen.handle_key(LogicalKey::Down, visible), Choice::Pending);
    assert_eq!(screen.state().cursor, 0);

    assert!(!screen.draw(&mut term).expect("draw"));
    term.backend_mut().resize(60, 12);
    let visible = screen.measure(&term).expect("measure");
    assert_eq!(visible, Some(8));
    assert_eq!(screen.handle_key(LogicalKey::Down, visible), Choice::Pending);
    assert_eq!(screen.handle_key(LogicalKey::Enter, visible), Choice::Chosen(1));
}
