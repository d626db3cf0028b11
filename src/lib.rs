//! Telemetry node firmware library.
//!
//! Exposes the control core (state machine, timers, command dispatcher) and
//! its adapters for integration testing and the host simulator.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod error;

pub mod adapters;
pub mod drivers;
