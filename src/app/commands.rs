//! Inbound command grammar.
//!
//! One command per line, case-sensitive, matched exactly unless noted:
//!
//! | Line            | Command                  |
//! |-----------------|--------------------------|
//! | `HELP`          | [`Command::Help`]        |
//! | `STATUS`        | [`Command::Status`]      |
//! | `ARM`           | [`Command::Arm`]         |
//! | `DISARM`        | [`Command::Disarm`]      |
//! | `FAULT`         | [`Command::Fault`]       |
//! | `LED ON|OFF|AUTO` | [`Command::Led`]       |
//! | `RATE <ms>`     | [`Command::Rate`]        |
//!
//! Only leading space/tab is skipped.  Trailing whitespace is significant
//! everywhere except after the `RATE` integer.

use core::fmt;

use crate::config::TelemetryPeriod;
use crate::error::CommandError;

/// Indicator control requested by `LED <mode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    /// Manual override, driven high.
    On,
    /// Manual override, driven low.
    Off,
    /// Hand control back to the heartbeat.
    Auto,
}

impl LedMode {
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
            Self::Auto => "AUTO",
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A successfully parsed command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Status,
    Arm,
    Disarm,
    Fault,
    Led(LedMode),
    Rate(TelemetryPeriod),
}

impl Command {
    /// Parse one line.
    ///
    /// Returns `None` for a blank line (nothing after leading space/tab),
    /// which is a silent no-op rather than an error.
    pub fn parse(line: &str) -> Option<Result<Self, CommandError>> {
        let line = skip_blanks(line);
        if line.is_empty() {
            return None;
        }

        let cmd = match line {
            "HELP" => Ok(Self::Help),
            "STATUS" => Ok(Self::Status),
            "ARM" => Ok(Self::Arm),
            "DISARM" => Ok(Self::Disarm),
            "FAULT" => Ok(Self::Fault),
            _ => {
                if let Some(arg) = line.strip_prefix("LED ") {
                    parse_led(skip_blanks(arg))
                } else if let Some(arg) = line.strip_prefix("RATE ") {
                    parse_rate(skip_blanks(arg))
                } else {
                    Err(CommandError::UnknownCommand)
                }
            }
        };
        Some(cmd)
    }
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn skip_blanks(s: &str) -> &str {
    s.trim_start_matches(is_blank)
}

fn parse_led(arg: &str) -> Result<Command, CommandError> {
    let mode = match arg {
        "ON" => LedMode::On,
        "OFF" => LedMode::Off,
        "AUTO" => LedMode::Auto,
        _ => return Err(CommandError::LedArgument),
    };
    Ok(Command::Led(mode))
}

/// `RATE` argument: optional sign, at least one digit, optional trailing
/// space/tab, then end of line.  The range check comes last.
fn parse_rate(arg: &str) -> Result<Command, CommandError> {
    let (value, rest) = parse_signed(arg).ok_or(CommandError::RateNotInteger)?;
    if !skip_blanks(rest).is_empty() {
        return Err(CommandError::RateTrailingInput);
    }
    let ms = u32::try_from(value).map_err(|_| CommandError::RateOutOfRange)?;
    TelemetryPeriod::new(ms)
        .map(Command::Rate)
        .map_err(|_| CommandError::RateOutOfRange)
}

/// Leading signed decimal integer and the unparsed remainder.
///
/// Returns `None` if no digit follows the optional sign.  Magnitudes beyond
/// `i64` saturate; they are out of range either way.
fn parse_signed(s: &str) -> Option<(i64, &str)> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    let magnitude = digits[..len].bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    Some((value, &digits[len..]))
}
