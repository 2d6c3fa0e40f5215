//! # Render Loop
//!
//! Each screen runs the same synchronous cycle: measure the terminal, pull
//! the position record back inside the new bounds, draw, block for one
//! logical key, apply it. The loop ends on `quit`, on closed input, or on an
//! input error (treated as quit so the terminal is always handed back).
//!
//! Screens are generic over the ratatui backend and take the key source as a
//! [`KeyReader`] trait object, so tests drive them with `TestBackend` and a
//! scripted reader.

use crate::input::{self, KeyReader, LogicalKey};
use crate::model::{FeatureRecord, SearchMatch};
use crate::terminal::TerminalSession;
use crate::ui::config::Config;
use crate::ui::layout::{self, FeatureView};
use crate::ui::render;
use crate::ui::selection::{self, Choice, SelectionState};
use crate::ui::state::{Bounds, Flow, NavigationState};
use crate::ui::theme::Theme;
use anyhow::{Context, Result};
use ratatui::{backend::Backend, layout::Rect, Terminal};

/// What the loop does with the key it just read.
enum Input {
    Key(LogicalKey),
    Stop,
}

/// The terminal area as it is now, which may differ from the last frame.
fn current_area<B>(terminal: &Terminal<B>) -> Result<Rect>
where
    B: Backend,
    B::Error: Send + Sync + 'static,
{
    let size = terminal.size().context("Failed to query terminal size")?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

fn next_key(keys: &mut dyn KeyReader, screen: &str) -> Input {
    match keys.read_key() {
        Ok(LogicalKey::Noop) if keys.is_closed() => {
            tracing::debug!(screen, "input closed");
            Input::Stop
        }
        Ok(key) => Input::Key(key),
        Err(err) => {
            tracing::warn!(screen, error = %err, "failed to read key, leaving screen");
            Input::Stop
        }
    }
}

pub struct FeatureScreen<'a> {
    view: FeatureView<'a>,
    state: NavigationState,
    theme: &'a Theme,
    tab_page_lines: usize,
    frames_drawn: usize,
    too_small: bool,
}

impl<'a> FeatureScreen<'a> {
    pub fn new(feature: &'a FeatureRecord, theme: &'a Theme, tab_page_lines: usize) -> Self {
        Self {
            view: FeatureView::new(feature),
            state: NavigationState::new(),
            theme,
            tab_page_lines,
            frames_drawn: 0,
            too_small: false,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    /// Draw one frame. Returns the bounds it was laid out with, or `None`
    /// when the resize panel was shown instead.
    pub fn draw<B>(&mut self, terminal: &mut Terminal<B>) -> Result<Option<Bounds>>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        let view = &self.view;
        let state = &mut self.state;
        let theme = self.theme;
        let page = self.tab_page_lines;
        let mut bounds = None;

        terminal
            .draw(|frame| {
                let area = frame.area();
                bounds = layout::measure(area, view, page);
                if let Some(b) = &bounds {
                    state.revalidate(b);
                }
                render::render_feature(frame, &layout::compose(area, view, state), theme);
            })
            .context("Failed to draw feature screen")?;

        self.frames_drawn += 1;
        let too_small = bounds.is_none();
        if too_small && !self.too_small {
            tracing::debug!("terminal below minimum size, showing resize panel");
        }
        self.too_small = too_small;
        Ok(bounds)
    }

    /// Bounds for the terminal's current size, without drawing.
    pub fn measure<B>(&self, terminal: &Terminal<B>) -> Result<Option<Bounds>>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        let area = current_area(terminal)?;
        Ok(layout::measure(area, &self.view, self.tab_page_lines))
    }

    pub fn run<B>(&mut self, terminal: &mut Terminal<B>, keys: &mut dyn KeyReader) -> Result<()>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        loop {
            self.draw(terminal)?;
            let key = match next_key(keys, "feature") {
                Input::Key(key) => key,
                Input::Stop => return Ok(()),
            };

            // The terminal may have been resized while we waited for the key
            let bounds = self.measure(terminal)?;
            if self.handle_key(key, bounds.as_ref()) == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Apply one key against the terminal's current bounds.
    pub fn handle_key(&mut self, key: LogicalKey, bounds: Option<&Bounds>) -> Flow {
        match bounds {
            Some(bounds) => {
                self.state.revalidate(bounds);
                self.state.apply(key, bounds)
            }
            // Only quit is honoured while the resize panel is up
            None if key == LogicalKey::Quit => Flow::Exit,
            None => Flow::Continue,
        }
    }
}

pub struct SelectionScreen<'a> {
    matches: &'a [SearchMatch],
    state: SelectionState,
    theme: &'a Theme,
    frames_drawn: usize,
}

impl<'a> SelectionScreen<'a> {
    pub fn new(matches: &'a [SearchMatch], theme: &'a Theme) -> Self {
        Self {
            matches,
            state: SelectionState::new(),
            theme,
            frames_drawn: 0,
        }
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn frames_drawn(&self) -> usize {
        self.frames_drawn
    }

    /// Draw one frame; `false` when only the resize panel fit.
    pub fn draw<B>(&mut self, terminal: &mut Terminal<B>) -> Result<bool>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        let matches = self.matches;
        let state = &mut self.state;
        let theme = self.theme;
        let mut fits = false;

        terminal
            .draw(|frame| {
                let area = frame.area();
                fits = selection::fits(area);
                if fits {
                    state.revalidate(matches.len(), selection::visible_rows(area));
                }
                render::render_selection(frame, &selection::compose(area, matches, state), theme);
            })
            .context("Failed to draw selection screen")?;

        self.frames_drawn += 1;
        Ok(fits)
    }

    /// Rows available for matches at the terminal's current size, or `None`
    /// when only the resize panel fits.
    pub fn measure<B>(&self, terminal: &Terminal<B>) -> Result<Option<usize>>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        let area = current_area(terminal)?;
        Ok(selection::fits(area).then(|| selection::visible_rows(area)))
    }

    /// Apply one key given the rows currently available for matches.
    pub fn handle_key(&mut self, key: LogicalKey, visible: Option<usize>) -> Choice {
        let len = self.matches.len();
        match visible {
            Some(visible) => {
                self.state.revalidate(len, visible);
                self.state.apply(key, len)
            }
            None if key == LogicalKey::Quit => Choice::Cancelled,
            None => Choice::Pending,
        }
    }

    /// Returns the chosen identifier, or `None` on cancel or an empty list.
    pub fn run<B>(
        &mut self,
        terminal: &mut Terminal<B>,
        keys: &mut dyn KeyReader,
    ) -> Result<Option<String>>
    where
        B: Backend,
        B::Error: Send + Sync + 'static,
    {
        if self.matches.is_empty() {
            return Ok(None);
        }

        loop {
            self.draw(terminal)?;
            let key = match next_key(keys, "selection") {
                Input::Key(key) => key,
                Input::Stop => return Ok(None),
            };

            let visible = self.measure(terminal)?;
            match self.handle_key(key, visible) {
                Choice::Pending => {}
                Choice::Cancelled => return Ok(None),
                Choice::Chosen(index) => {
                    return Ok(self.matches.get(index).map(|m| m.identifier.clone()));
                }
            }
        }
    }
}

/// Show `feature` full screen until the user quits.
pub fn run_feature_screen(feature: &FeatureRecord, config: &Config) -> Result<()> {
    let theme = Theme::resolve(&config.theme);
    let mut keys = input::platform_reader(config.escape_timeout())?;
    let mut session = TerminalSession::acquire()?;

    let mut screen = FeatureScreen::new(feature, theme, config.tab_page_lines);
    let result = screen.run(session.terminal_mut(), keys.as_mut());
    session.restore();

    tracing::debug!(frames = screen.frames_drawn(), "feature screen closed");
    result
}

/// Let the user pick one of `matches`. An empty list returns `None` without
/// touching the terminal.
pub fn run_selection_screen(matches: &[SearchMatch], config: &Config) -> Result<Option<String>> {
    if matches.is_empty() {
        return Ok(None);
    }

    let theme = Theme::resolve(&config.theme);
    let mut keys = input::platform_reader(config.escape_timeout())?;
    let mut session = TerminalSession::acquire()?;

    let mut screen = SelectionScreen::new(matches, theme);
    let result = screen.run(session.terminal_mut(), keys.as_mut());
    session.restore();

    if let Ok(Some(id)) = &result {
        tracing::info!(identifier = %id, "feature selected");
    }
    result
}

/// Resolve search results to one identifier, only asking the user when there
/// is a real choice and a terminal to ask on.
pub fn choose_match(
    matches: &[SearchMatch],
    interactive: bool,
    config: &Config,
) -> Result<Option<String>> {
    match matches {
        [] => Ok(None),
        [only] => Ok(Some(only.identifier.clone())),
        [first, ..] if !interactive => Ok(Some(first.identifier.clone())),
        _ => run_selection_screen(matches, config),
    }
}
