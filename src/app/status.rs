//! Status line formatter.
//!
//! ```text
//! STATE=<code> <elapsed_ms> TELEMETRY_MS=<ms> HEARTBEAT_MS=<ms> FAULTS=<n>
//! ```
//!
//! The layout is an interface contract with host tooling: the same line is
//! emitted as periodic telemetry and as the payload of `OK` for `STATUS`.

use core::fmt;

use crate::config::HEARTBEAT_PERIOD_MS;

use super::context::AppContext;
use super::state::AppState;

/// A point-in-time snapshot of the context, rendered through `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLine {
    pub state: AppState,
    pub elapsed_ms: u32,
    pub telemetry_ms: u32,
    pub heartbeat_ms: u32,
    pub faults: u32,
}

impl StatusLine {
    /// Pure read of `ctx` at `now_ms`.
    pub fn capture(ctx: &AppContext, now_ms: u32) -> Self {
        Self {
            state: ctx.state,
            elapsed_ms: ctx.elapsed_ms(now_ms),
            telemetry_ms: ctx.telemetry_period_ms.as_ms(),
            heartbeat_ms: HEARTBEAT_PERIOD_MS,
            faults: ctx.fault_count,
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "STATE={} {} TELEMETRY_MS={} HEARTBEAT_MS={} FAULTS={}",
            self.state.code(),
            self.elapsed_ms,
            self.telemetry_ms,
            self.heartbeat_ms,
            self.faults
        )
    }
}
