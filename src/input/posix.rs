//! Controlling-tty byte source for POSIX terminals.

use super::decoder::{ByteRead, ByteSource};
use anyhow::{Context, Result};
use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use std::fs::File;
use std::io::{self, Read};
use std::os::fd::AsFd;
use std::time::Duration;

/// Unbuffered reader on `/dev/tty`.
///
/// `std::io::Stdin` buffers internally, which would hide pending bytes from
/// `poll(2)`; reading the tty device directly keeps the two in agreement.
pub struct TtySource {
    tty: File,
}

impl TtySource {
    pub fn open() -> Result<Self> {
        let tty = File::open("/dev/tty").context("Failed to open /dev/tty for keyboard input")?;
        Ok(Self { tty })
    }

    fn wait_readable(&self, timeout: Duration) -> io::Result<bool> {
        let millis = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
        loop {
            let mut fds = [PollFd::new(
                self.tty.as_fd(),
                PollFlags::POLLIN | PollFlags::POLLHUP,
            )];
            match poll(&mut fds, PollTimeout::from(millis)) {
                Ok(0) => return Ok(false),
                Ok(_) => return Ok(true),
                Err(Errno::EINTR) => continue,
                Err(err) => return Err(err.into()),
            }
        }
    }
}

impl ByteSource for TtySource {
    fn read_byte(&mut self, timeout: Option<Duration>) -> io::Result<ByteRead> {
        if let Some(timeout) = timeout {
            if !self.wait_readable(timeout)? {
                return Ok(ByteRead::TimedOut);
            }
        }

        let mut buf = [0u8; 1];
        loop {
            match self.tty.read(&mut buf) {
                Ok(0) => return Ok(ByteRead::Closed),
                Ok(_) => return Ok(ByteRead::Byte(buf[0])),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }
    }
}
