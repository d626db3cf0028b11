//! Application state identity.
//!
//! ```text
//! Boot ──(init)──▶ Idle ◀──(DISARM)── Armed, Fault
//!                  Idle ──(ARM)──▶ Armed
//!           Idle, Armed ──(FAULT)──▶ Fault   [fault_count += 1]
//! ```
//!
//! Only `Boot → Idle` happens on its own.  Every other transition is driven
//! by a command, and no command leads back into `Boot`.

use core::fmt;

/// The four application states, numbered in declaration order.
///
/// The numeric code is part of the status-line contract (`STATE=<code>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AppState {
    /// Transient: only between construction and the end of `init`.
    #[default]
    Boot = 0,
    Idle = 1,
    Armed = 2,
    Fault = 3,
}

impl AppState {
    /// Numeric encoding used on the wire.
    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Boot => "BOOT",
            Self::Idle => "IDLE",
            Self::Armed => "ARMED",
            Self::Fault => "FAULT",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
