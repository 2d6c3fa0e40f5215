//! Escape-sequence decoding for byte-stream terminals.
//!
//! [`Decoder`] is a small state machine over the bytes seen so far:
//!
//! ```text
//! Ground --ESC--> SawEscape --'[' or 'O'--> SawBracket --final byte--> key
//!                     |                         |
//!                  timeout -> Quit          timeout -> Noop
//! ```
//!
//! It never performs I/O. [`ByteKeyReader`] owns a [`ByteSource`] and decides
//! when a timeout has elapsed.

use super::{KeyReader, LogicalKey};
use anyhow::{Context, Result};
use std::io;
use std::time::Duration;

const ESC: u8 = 0x1b;

/// Longest parameter run accepted inside a CSI/SS3 sequence.
pub const MAX_SEQUENCE_LEN: usize = 16;

/// Outcome of a single read from a [`ByteSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteRead {
    Byte(u8),
    TimedOut,
    Closed,
}

/// A terminal input stream read one byte at a time.
pub trait ByteSource {
    /// Read one byte. `None` blocks until input arrives; `Some(t)` gives up
    /// after `t` and returns [`ByteRead::TimedOut`].
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum State {
    #[default]
    Ground,
    SawEscape,
    SawBracket {
        intro: u8,
        params: Vec<u8>,
    },
}

#[derive(Debug, Default)]
pub struct Decoder {
    state: State,
}

impl Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte. Returns a key once the bytes seen so far are complete.
    pub fn feed(&mut self, byte: u8) -> Option<LogicalKey> {
        match std::mem::take(&mut self.state) {
            State::Ground => {
                if byte == ESC {
                    self.state = State::SawEscape;
                    None
                } else {
                    Some(LogicalKey::from_char(char::from(byte)))
                }
            }
            State::SawEscape => match byte {
                b'[' | b'O' => {
                    self.state = State::SawBracket {
                        intro: byte,
                        params: Vec::new(),
                    };
                    None
                }
                // Alt+key and friends
                _ => Some(LogicalKey::Noop),
            },
            State::SawBracket { intro, mut params } => {
                if byte == ESC {
                    // The cut-off sequence is dropped and a new one begins
                    self.state = State::SawEscape;
                    None
                } else if (0x40..=0x7e).contains(&byte) {
                    Some(decode_sequence(intro, &params, byte))
                } else if params.len() >= MAX_SEQUENCE_LEN {
                    Some(LogicalKey::Noop)
                } else {
                    params.push(byte);
                    self.state = State::SawBracket { intro, params };
                    None
                }
            }
        }
    }

    /// No continuation arrived in time. A lone escape means quit.
    pub fn expire(&mut self) -> LogicalKey {
        match std::mem::take(&mut self.state) {
            State::SawEscape => LogicalKey::Quit,
            _ => LogicalKey::Noop,
        }
    }

    pub fn reset(&mut self) {
        self.state = State::Ground;
    }

    pub fn is_pending(&self) -> bool {
        self.state != State::Ground
    }
}

/// Map a complete `ESC intro params final` sequence to a key.
fn decode_sequence(intro: u8, params: &[u8], final_byte: u8) -> LogicalKey {
    match final_byte {
        b'A' => LogicalKey::Up,
        b'B' => LogicalKey::Down,
        b'C' => LogicalKey::Right,
        b'D' => LogicalKey::Left,
        b'H' => LogicalKey::Home,
        b'F' => LogicalKey::End,
        b'Z' if intro == b'[' => LogicalKey::ShiftTab,
        b'~' if intro == b'[' => {
            let code = params
                .split(|b| *b == b';')
                .next()
                .and_then(|p| std::str::from_utf8(p).ok())
                .and_then(|p| p.parse::<u16>().ok());
            match code {
                Some(1 | 7) => LogicalKey::Home,
                Some(4 | 8) => LogicalKey::End,
                Some(5) => LogicalKey::PageUp,
                Some(6) => LogicalKey::PageDown,
                _ => LogicalKey::Noop,
            }
        }
        _ => LogicalKey::Noop,
    }
}

/// Decode a full byte string at once, treating its end as a timeout.
pub fn decode_bytes(bytes: &[u8]) -> LogicalKey {
    let mut decoder = Decoder::new();
    for byte in bytes {
        if let Some(key) = decoder.feed(*byte) {
            return key;
        }
    }
    decoder.expire()
}

/// [`KeyReader`] over any [`ByteSource`].
pub struct ByteKeyReader<S> {
    source: S,
    decoder: Decoder,
    escape_timeout: Duration,
    closed: bool,
}

impl<S: ByteSource> ByteKeyReader<S> {
    pub fn new(source: S, escape_timeout: Duration) -> Self {
        Self {
            source,
            decoder: Decoder::new(),
            escape_timeout,
            closed: false,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    fn next(&mut self, timeout: Option<Duration>) -> Result<ByteRead> {
        match self.source.read_byte(timeout) {
            Ok(read) => Ok(read),
            Err(err) => {
                self.decoder.reset();
                Err(err).context("Failed to read from terminal input")
            }
        }
    }
}

impl<S: ByteSource> KeyReader for ByteKeyReader<S> {
    fn read_key(&mut self) -> Result<LogicalKey> {
        let mut timeout = None;
        loop {
            match self.next(timeout)? {
                ByteRead::Byte(byte) => {
                    if let Some(key) = self.decoder.feed(byte) {
                        return Ok(key);
                    }
                    timeout = Some(self.escape_timeout);
                }
                ByteRead::TimedOut => {
                    if self.decoder.is_pending() {
                        return Ok(self.decoder.expire());
                    }
                    return Ok(LogicalKey::Noop);
                }
                ByteRead::Closed => {
                    self.closed = true;
                    self.decoder.reset();
                    return Ok(LogicalKey::Noop);
                }
            }
        }
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
