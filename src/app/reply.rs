//! Outbound response lines.
//!
//! Every non-blank command produces exactly one [`Reply`]: `OK <payload>`
//! when accepted, `ERR <reason>` when rejected.

use core::fmt;

use crate::error::CommandError;

use super::commands::LedMode;
use super::status::StatusLine;

/// Help text listing the whole grammar.
pub const HELP_TEXT: &str = "Commands: HELP STATUS LED ON|OFF|AUTO RATE <ms> ARM DISARM FAULT";

/// Payload of an `OK` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ack {
    Help,
    Status(StatusLine),
    Armed,
    Idle,
    Fault,
    Led(LedMode),
    RateSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok(Ack),
    Err(CommandError),
}

impl Reply {
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }
}

impl fmt::Display for Ack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str(HELP_TEXT),
            Self::Status(status) => write!(f, "{status}"),
            Self::Armed => f.write_str("ARMED"),
            Self::Idle => f.write_str("IDLE"),
            Self::Fault => f.write_str("FAULT"),
            Self::Led(mode) => write!(f, "LED {mode}"),
            Self::RateSet => f.write_str("RATE SET"),
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok(ack) => write!(f, "OK {ack}"),
            Self::Err(reason) => write!(f, "ERR {reason}"),
        }
    }
}

impl From<CommandError> for Reply {
    fn from(e: CommandError) -> Self {
        Self::Err(e)
    }
}
