//! Serial line transport.
//!
//! Raw bytes arrive from any non-blocking [`ByteSource`] (UART, USB CDC,
//! stdin in the simulator).  A [`LineAssembler`] accumulates them into
//! command lines:
//!
//! - `\r` is discarded so both `\n` and `\r\n` endings work;
//! - `\n` completes the line;
//! - a line longer than [`LINE_CAPACITY`] is dropped entirely, up to and
//!   including its terminating `\n`, and nothing is reported upstream.
//!
//! [`SerialLineTransport`] glues the two together behind
//! [`LineTransport`].

use std::collections::VecDeque;
use std::convert::Infallible;
use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use heapless::Vec;
use log::{debug, warn};

use crate::app::ports::{Line, LineTransport};
use crate::config::LINE_CAPACITY;

// ───────────────────────────────────────────────────────────────
// Byte source
// ───────────────────────────────────────────────────────────────

/// Byte-oriented inbound channel.
pub trait ByteSource {
    /// Error type for this source.
    type Error: core::fmt::Debug;

    /// Read up to `buf.len()` bytes into `buf`.
    /// Returns the number of bytes actually read.
    /// Returns 0 if no data is available (non-blocking).
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// In-memory source, mostly for tests and replays.
impl ByteSource for VecDeque<u8> {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let mut n = 0;
        while n < buf.len() {
            match self.pop_front() {
                Some(b) => {
                    buf[n] = b;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

// ───────────────────────────────────────────────────────────────
// Line assembler
// ───────────────────────────────────────────────────────────────

/// Streaming line accumulator with a fixed-size buffer.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buf: Vec<u8, LINE_CAPACITY>,
    /// Set after an overflow until the next `\n`.
    discarding: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.  Returns `Some(line)` when `byte` completes a line.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        match byte {
            b'\r' => None,
            b'\n' => {
                if self.discarding {
                    self.discarding = false;
                    return None;
                }
                let bytes = core::mem::take(&mut self.buf);
                match Line::from_utf8(bytes) {
                    Ok(line) => Some(line),
                    Err(_) => {
                        warn!("serial: non-UTF-8 line dropped");
                        None
                    }
                }
            }
            _ if self.discarding => None,
            _ => {
                if self.buf.push(byte).is_err() {
                    warn!("serial: line longer than {} bytes dropped", LINE_CAPACITY);
                    self.buf.clear();
                    self.discarding = true;
                }
                None
            }
        }
    }

    /// Bytes of the line currently being assembled.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn is_discarding(&self) -> bool {
        self.discarding
    }

    /// Forget any partial line.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
    }
}

// ───────────────────────────────────────────────────────────────
// Line transport
// ───────────────────────────────────────────────────────────────

/// [`LineTransport`] over any [`ByteSource`].
pub struct SerialLineTransport<B> {
    source: B,
    assembler: LineAssembler,
}

impl<B: ByteSource> SerialLineTransport<B> {
    pub fn new(source: B) -> Self {
        Self {
            source,
            assembler: LineAssembler::new(),
        }
    }

    pub fn source(&self) -> &B {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut B {
        &mut self.source
    }

    pub fn assembler(&self) -> &LineAssembler {
        &self.assembler
    }
}

impl<B: ByteSource> LineTransport for SerialLineTransport<B> {
    /// Pull bytes one at a time so that anything after a completed line
    /// stays in the source for the next call.
    fn try_read_line(&mut self) -> Option<Line> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(line) = self.assembler.push(byte[0]) {
                        return Some(line);
                    }
                }
                Err(e) => {
                    warn!("serial: read failed: {:?}", e);
                    return None;
                }
            }
        }
    }
}

/// A transport that never yields a line.
pub struct NullLineTransport;

impl LineTransport for NullLineTransport {
    fn try_read_line(&mut self) -> Option<Line> {
        None
    }
}

// ───────────────────────────────────────────────────────────────
// Stdin source (host simulator)
// ───────────────────────────────────────────────────────────────

/// Non-blocking view of stdin.
///
/// A reader thread blocks on stdin and forwards bytes over a channel;
/// `read` only drains what has already arrived.
pub struct StdinSource {
    rx: Receiver<u8>,
    closed: bool,
}

impl StdinSource {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let mut stdin = io::stdin().lock();
                let mut chunk = [0u8; 256];
                loop {
                    match stdin.read(&mut chunk) {
                        Ok(0) => break,
                        Ok(n) => {
                            for &b in &chunk[..n] {
                                if tx.send(b).is_err() {
                                    return;
                                }
                            }
                        }
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => {
                            warn!("stdin: read failed: {}", e);
                            break;
                        }
                    }
                }
                debug!("stdin: end of input");
            })?;
        Ok(Self { rx, closed: false })
    }

    /// `true` once stdin has ended and every byte has been consumed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl ByteSource for StdinSource {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        let mut n = 0;
        while n < buf.len() {
            match self.rx.try_recv() {
                Ok(b) => {
                    buf[n] = b;
                    n += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.closed = true;
                    break;
                }
            }
        }
        Ok(n)
    }
}
