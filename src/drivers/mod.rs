//! Indicator drivers.

pub mod status_led;
