//! The application context — the single mutable record of the core.
//!
//! `AppContext` holds the state, the indicator override, the periodic-task
//! timestamps and the fault counter.  It is owned by the
//! [`AppService`](super::service::AppService) and mutated in place by every
//! `tick` and `handle_command` call; it lives for the whole process.

use crate::config::TelemetryPeriod;

use super::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppContext {
    pub state: AppState,

    // -- Indicator --
    /// Manual indicator control.  While set, the heartbeat is suppressed and
    /// the indicator is driven to `indicator_override_value` every tick.
    pub indicator_override_active: bool,
    /// Only meaningful while `indicator_override_active` is set.
    pub indicator_override_value: bool,

    // -- Timing (all u32 ms, compared with wrapping_sub) --
    /// Always within the accepted telemetry period range.
    pub telemetry_period_ms: TelemetryPeriod,
    /// Tick timestamp of the last heartbeat toggle.
    pub last_heartbeat_ms: u32,
    /// Tick timestamp of the last telemetry line.
    pub last_telemetry_ms: u32,
    /// Timestamp passed to `init`; only used for elapsed-time display.
    pub boot_ms: u32,

    // -- Faults --
    /// Incremented only by the `FAULT` command; never decreases.
    pub fault_count: u32,
}

impl AppContext {
    /// Fresh context for a boot at `now_ms`.  The state is still `Boot`;
    /// `init` moves it to `Idle`.
    pub fn booting(now_ms: u32, telemetry_period_ms: TelemetryPeriod) -> Self {
        Self {
            telemetry_period_ms,
            last_heartbeat_ms: now_ms,
            last_telemetry_ms: now_ms,
            boot_ms: now_ms,
            ..Self::default()
        }
    }

    /// Milliseconds since boot, correct across counter wraparound.
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.boot_ms)
    }

    pub fn heartbeat_due(&self, now_ms: u32, period_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_heartbeat_ms) >= period_ms
    }

    pub fn telemetry_due(&self, now_ms: u32) -> bool {
        now_ms.wrapping_sub(self.last_telemetry_ms) >= self.telemetry_period_ms.as_ms()
    }
}
