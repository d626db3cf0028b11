//! Port traits — the boundary between the application core and the hardware.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Every collaborator the core talks to (indicator, clock, line transport,
//! response/log sink) implements one of these traits.  The
//! [`AppService`](super::service::AppService) is generic over them, so the
//! core never touches a concrete driver and tests substitute recording mocks.
//!
//! All methods must return immediately: the core runs inside a single
//! non-blocking polling loop.

use heapless::String;

use crate::config::LINE_CAPACITY;

/// One complete inbound command line, without its terminator.
pub type Line = String<LINE_CAPACITY>;

// ───────────────────────────────────────────────────────────────
// Indicator port (domain → status signal)
// ───────────────────────────────────────────────────────────────

/// A boolean-visible status signal, typically an LED.
pub trait IndicatorPort {
    /// Prepare the output.  Called once by `init`.
    fn init(&mut self);

    /// Drive the signal to `on`.
    fn set(&mut self, on: bool);

    /// Invert the current level.
    fn toggle(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Clock port (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond counter that wraps at `u32::MAX`.
///
/// Callers compare timestamps with `wrapping_sub`, never with `<`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;
}

// ───────────────────────────────────────────────────────────────
// Line transport port (byte stream → domain)
// ───────────────────────────────────────────────────────────────

/// Assembles raw inbound bytes into discrete lines.
pub trait LineTransport {
    /// Return the next complete line, or `None` if none is ready yet.
    ///
    /// Yields at most one line per call.  Lines that overflowed the
    /// transport buffer are never returned.
    fn try_read_line(&mut self) -> Option<Line>;
}

// ───────────────────────────────────────────────────────────────
// Line sink port (domain → operator / log stream)
// ───────────────────────────────────────────────────────────────

/// Accepts outbound text lines: command responses, telemetry and the boot
/// announcement.  The sink appends its own line terminator.
pub trait LineSink {
    fn write_line(&mut self, line: &str);
}

// ───────────────────────────────────────────────────────────────
// Borrowed collaborators
// ───────────────────────────────────────────────────────────────

impl<T: IndicatorPort + ?Sized> IndicatorPort for &mut T {
    fn init(&mut self) {
        (**self).init();
    }

    fn set(&mut self, on: bool) {
        (**self).set(on);
    }

    fn toggle(&mut self) {
        (**self).toggle();
    }
}

impl<T: ClockPort + ?Sized> ClockPort for &T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: ClockPort + ?Sized> ClockPort for &mut T {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

impl<T: LineTransport + ?Sized> LineTransport for &mut T {
    fn try_read_line(&mut self) -> Option<Line> {
        (**self).try_read_line()
    }
}

impl<T: LineSink + ?Sized> LineSink for &mut T {
    fn write_line(&mut self, line: &str) {
        (**self).write_line(line);
    }
}
