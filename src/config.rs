//! Node configuration parameters
//!
//! The only tunable is the telemetry period.  It can be set at build time
//! (`TELENODE_TELEMETRY_PERIOD_MS`), at start time (JSON config or simulator
//! flags) and at run time through the `RATE` command.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// --- Timing ---
/// Fixed heartbeat toggle period (milliseconds).  Not user-configurable.
pub const HEARTBEAT_PERIOD_MS: u32 = 2000;
/// Lowest accepted telemetry period (milliseconds, inclusive).
pub const TELEMETRY_PERIOD_MIN_MS: u32 = 10;
/// Highest accepted telemetry period (milliseconds, inclusive).
pub const TELEMETRY_PERIOD_MAX_MS: u32 = 60_000;
/// Telemetry period used when nothing else is configured.
pub const DEFAULT_TELEMETRY_PERIOD_MS: u32 = 1000;

// --- Protocol ---
/// Usable characters in one command line (excluding the terminator).
pub const LINE_CAPACITY: usize = 127;
/// Announcement written to the sink once the core is initialised.
pub const BOOT_BANNER: &str = "BOOT OK";

/// A telemetry period that is always within
/// [`TELEMETRY_PERIOD_MIN_MS`]..=[`TELEMETRY_PERIOD_MAX_MS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct TelemetryPeriod(u32);

impl TelemetryPeriod {
    pub const DEFAULT: Self = Self(DEFAULT_TELEMETRY_PERIOD_MS);

    /// Validate `ms`.  Out-of-range values are rejected, never clamped.
    pub const fn new(ms: u32) -> Result<Self, ConfigError> {
        if ms < TELEMETRY_PERIOD_MIN_MS || ms > TELEMETRY_PERIOD_MAX_MS {
            return Err(ConfigError::TelemetryPeriodOutOfRange(ms));
        }
        Ok(Self(ms))
    }

    pub const fn as_ms(self) -> u32 {
        self.0
    }
}

impl Default for TelemetryPeriod {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for TelemetryPeriod {
    type Error = ConfigError;

    fn try_from(ms: u32) -> Result<Self, Self::Error> {
        Self::new(ms)
    }
}

impl From<TelemetryPeriod> for u32 {
    fn from(period: TelemetryPeriod) -> Self {
        period.0
    }
}

impl fmt::Display for TelemetryPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Start-time configuration for the application core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Telemetry period applied by `init` (milliseconds).
    pub telemetry_period_ms: TelemetryPeriod,
}

impl NodeConfig {
    /// Configuration with the build-time default telemetry period.
    ///
    /// Set `TELENODE_TELEMETRY_PERIOD_MS` while compiling to change it.
    pub fn build_default() -> Self {
        match option_env!("TELENODE_TELEMETRY_PERIOD_MS") {
            Some(raw) => Self::from_build_override(raw),
            None => Self::default(),
        }
    }

    fn from_build_override(raw: &str) -> Self {
        let parsed = raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidBuildOverride)
            .and_then(TelemetryPeriod::new);
        match parsed {
            Ok(period) => Self {
                telemetry_period_ms: period,
            },
            Err(e) => {
                log::warn!(
                    "config: ignoring TELENODE_TELEMETRY_PERIOD_MS={:?} ({}), using {} ms",
                    raw,
                    e,
                    DEFAULT_TELEMETRY_PERIOD_MS
                );
                Self::default()
            }
        }
    }

    /// Parse a JSON document.  Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| {
            if let Some(ConfigError::TelemetryPeriodOutOfRange(ms)) = out_of_range_value(text) {
                return ConfigError::TelemetryPeriodOutOfRange(ms);
            }
            ConfigError::Malformed {
                line: e.line(),
                column: e.column(),
            }
        })
    }
}

/// Recover the rejected value when `from_json` failed on the period range
/// rather than on syntax, so the caller gets the specific reason.
fn out_of_range_value(text: &str) -> Option<ConfigError> {
    #[derive(Deserialize)]
    struct Raw {
        telemetry_period_ms: u32,
    }
    let raw: Raw = serde_json::from_str(text).ok()?;
    TelemetryPeriod::new(raw.telemetry_period_ms).err()
}
