//! Millisecond clock adapters.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side simulation.
//!
//! Both truncate to `u32`, so the reading wraps after ~49.7 days exactly
//! like a microcontroller `millis()` counter.

use crate::app::ports::ClockPort;

/// System clock for the running target.
pub struct SystemClock {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
    /// Added to every reading; lets the simulator start close to the wrap.
    offset_ms: u32,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::with_offset(0)
    }

    pub fn with_offset(offset_ms: u32) -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
            offset_ms,
        }
    }

    #[cfg(target_os = "espidf")]
    fn raw_ms(&self) -> u32 {
        ((unsafe { esp_idf_svc::sys::esp_timer_get_time() }) / 1000) as u32
    }

    #[cfg(not(target_os = "espidf"))]
    fn raw_ms(&self) -> u32 {
        self.start.elapsed().as_millis() as u32
    }
}

impl ClockPort for SystemClock {
    fn now_ms(&self) -> u32 {
        self.raw_ms().wrapping_add(self.offset_ms)
    }
}

/// A clock that only moves when told to.  Used by tests, fuzzing and
/// scripted replays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ManualClock {
    now_ms: u32,
}

impl ManualClock {
    pub fn new(now_ms: u32) -> Self {
        Self { now_ms }
    }

    pub fn set(&mut self, now_ms: u32) {
        self.now_ms = now_ms;
    }

    /// Advance by `ms`, wrapping at `u32::MAX`.
    pub fn advance(&mut self, ms: u32) {
        self.now_ms = self.now_ms.wrapping_add(ms);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now_ms
    }
}
