//! Line sink adapters.
//!
//! [`WriterSink`] writes each line, newline-terminated, to any
//! `std::io::Write` (stdout in the simulator, a UART writer on target).
//! [`LogLineSink`] routes lines into the `log` facade instead, for builds
//! where the console is shared with the logger.

use std::io::Write;

use log::{info, warn};

use crate::app::ports::LineSink;

/// Adapter that logs every line at `info` level.
pub struct LogLineSink;

impl LogLineSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogLineSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSink for LogLineSink {
    fn write_line(&mut self, line: &str) {
        info!("{}", line);
    }
}

/// Adapter that writes lines to a byte writer and flushes after each one.
pub struct WriterSink<W> {
    writer: W,
    terminator: &'static str,
}

impl<W: Write> WriterSink<W> {
    /// `\n`-terminated lines.
    pub fn new(writer: W) -> Self {
        Self::with_terminator(writer, "\n")
    }

    /// Custom terminator, e.g. `"\r\n"` for serial terminals.
    pub fn with_terminator(writer: W, terminator: &'static str) -> Self {
        Self { writer, terminator }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn write_line(&mut self, line: &str) {
        let result = self
            .writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(self.terminator.as_bytes()))
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            warn!("sink: write failed: {}", e);
        }
    }
}

/// Collects lines in memory.
impl LineSink for std::vec::Vec<String> {
    fn write_line(&mut self, line: &str) {
        self.push(line.to_owned());
    }
}
