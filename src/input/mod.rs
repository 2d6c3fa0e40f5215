//! # Keyboard Input
//!
//! Turns whatever the terminal delivers into a closed set of [`LogicalKey`]s.
//!
//! ## Backends
//!
//! - **POSIX**: [`ByteKeyReader`] over a [`TtySource`]. Single bytes are read
//!   from the controlling tty and fed through the escape-sequence
//!   [`Decoder`]; continuation bytes are waited for with a short `poll(2)`.
//! - **Windows**: [`ConsoleKeyReader`] maps crossterm key events, which are
//!   already unbuffered console reads.
//!
//! The rest of the engine only sees the [`KeyReader`] trait, so tests drive
//! the screens with scripted readers instead of a real terminal.

pub mod console;
pub mod decoder;
#[cfg(unix)]
pub mod posix;

use anyhow::Result;
use std::time::Duration;

pub use console::ConsoleKeyReader;
pub use decoder::{ByteKeyReader, ByteRead, ByteSource, Decoder};
#[cfg(unix)]
pub use posix::TtySource;

/// Default wait for an escape-sequence continuation byte.
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(50);

/// Platform-independent key vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalKey {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Tab,
    ShiftTab,
    PrevSection,
    NextSection,
    Enter,
    Quit,
    Noop,
}

impl LogicalKey {
    /// Mapping shared by every backend for plain characters.
    pub fn from_char(c: char) -> LogicalKey {
        match c {
            'q' | 'Q' => LogicalKey::Quit,
            '\t' => LogicalKey::Tab,
            '\r' | '\n' => LogicalKey::Enter,
            '[' => LogicalKey::PrevSection,
            ']' => LogicalKey::NextSection,
            'h' => LogicalKey::Left,
            'j' => LogicalKey::Down,
            'k' => LogicalKey::Up,
            'l' => LogicalKey::Right,
            // Ctrl+C arrives as a byte once ISIG is off
            '\u{3}' => LogicalKey::Quit,
            _ => LogicalKey::Noop,
        }
    }
}

/// Source of logical keys for a screen session.
pub trait KeyReader {
    /// Block until one key is available. `Noop` means "nothing usable yet".
    fn read_key(&mut self) -> Result<LogicalKey>;

    /// True once the underlying input has reached end of file.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Pick the reader for the current platform.
#[cfg(unix)]
pub fn platform_reader(escape_timeout: Duration) -> Result<Box<dyn KeyReader>> {
    let source = TtySource::open()?;
    Ok(Box::new(ByteKeyReader::new(source, escape_timeout)))
}

/// Pick the reader for the current platform.
#[cfg(not(unix))]
pub fn platform_reader(_escape_timeout: Duration) -> Result<Box<dyn KeyReader>> {
    Ok(Box::new(ConsoleKeyReader::new()))
}
