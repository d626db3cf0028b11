//! Application core — pure domain logic, zero I/O.
//!
//! This module holds the rules of the telemetry node: the state machine,
//! the heartbeat and telemetry timers, the command grammar and the status
//! line format.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable without
//! real peripherals.

pub mod commands;
pub mod context;
pub mod ports;
pub mod reply;
pub mod service;
pub mod state;
pub mod status;
