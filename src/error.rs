//! Error types for the telemetry node.
//!
//! Command errors never escape the core: the dispatcher turns each one into
//! an `ERR <reason>` line and leaves the context untouched.  Configuration
//! errors surface at start time, before the polling loop runs.
//! All variants are `Copy` so they can be passed around without allocation.

use core::fmt;

use crate::config::{TELEMETRY_PERIOD_MAX_MS, TELEMETRY_PERIOD_MIN_MS};

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

/// Reasons a command line is rejected.
///
/// `Display` renders the human-readable reason that follows `ERR `.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    /// The line matches no entry of the grammar.
    UnknownCommand,
    /// `LED` was followed by something other than `ON`, `OFF` or `AUTO`.
    LedArgument,
    /// `RATE` was not followed by at least one digit.
    RateNotInteger,
    /// `RATE` had non-whitespace input after the integer.
    RateTrailingInput,
    /// The `RATE` value lies outside the accepted telemetry period range.
    RateOutOfRange,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => write!(f, "Unknown command"),
            Self::LedArgument => write!(f, "LED expects ON OFF AUTO"),
            Self::RateNotInteger => write!(f, "RATE expects an integer"),
            Self::RateTrailingInput => write!(f, "RATE expects only an integer"),
            Self::RateOutOfRange => write!(
                f,
                "RATE out of range ({}..{})",
                TELEMETRY_PERIOD_MIN_MS, TELEMETRY_PERIOD_MAX_MS
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Telemetry period outside the accepted range (value in ms).
    TelemetryPeriodOutOfRange(u32),
    /// The config document could not be parsed.
    Malformed { line: usize, column: usize },
    /// The build-time period override is not an integer.
    InvalidBuildOverride,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TelemetryPeriodOutOfRange(ms) => write!(
                f,
                "telemetry period {ms} ms out of range ({TELEMETRY_PERIOD_MIN_MS}..{TELEMETRY_PERIOD_MAX_MS})"
            ),
            Self::Malformed { line, column } => {
                write!(f, "malformed config at line {line}, column {column}")
            }
            Self::InvalidBuildOverride => write!(f, "build-time period override is not an integer"),
        }
    }
}

impl std::error::Error for ConfigError {}
