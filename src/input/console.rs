//! Console key events via crossterm.
//!
//! Used on Windows, where console reads are unbuffered key events rather than
//! a byte stream. Compiled everywhere so the mapping stays tested.

use super::{KeyReader, LogicalKey};
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Default)]
pub struct ConsoleKeyReader;

impl ConsoleKeyReader {
    pub fn new() -> Self {
        Self
    }
}

impl KeyReader for ConsoleKeyReader {
    fn read_key(&mut self) -> Result<LogicalKey> {
        let event = event::read().context("Failed to read keyboard event")?;
        Ok(map_event(&event))
    }
}

/// Map any crossterm event to a logical key. Non-key events (resize, focus,
/// mouse) are `Noop`; the next frame picks up the new size on its own.
pub fn map_event(event: &Event) -> LogicalKey {
    match event {
        Event::Key(key) => map_key_event(key),
        _ => LogicalKey::Noop,
    }
}

pub fn map_key_event(key: &KeyEvent) -> LogicalKey {
    // Windows reports releases as separate events
    if key.kind != KeyEventKind::Press {
        return LogicalKey::Noop;
    }

    match key.code {
        KeyCode::Up => LogicalKey::Up,
        KeyCode::Down => LogicalKey::Down,
        KeyCode::Left => LogicalKey::Left,
        KeyCode::Right => LogicalKey::Right,
        KeyCode::PageUp => LogicalKey::PageUp,
        KeyCode::PageDown => LogicalKey::PageDown,
        KeyCode::Home => LogicalKey::Home,
        KeyCode::End => LogicalKey::End,
        KeyCode::Tab => LogicalKey::Tab,
        KeyCode::BackTab => LogicalKey::ShiftTab,
        KeyCode::Enter => LogicalKey::Enter,
        KeyCode::Esc => LogicalKey::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => LogicalKey::Quit,
        KeyCode::Char(c) => LogicalKey::from_char(c),
        _ => LogicalKey::Noop,
    }
}
