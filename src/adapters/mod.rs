//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter    | Implements      | Connects to                      |
//! |------------|-----------------|----------------------------------|
//! | `clock`    | ClockPort       | ESP32 system timer / `Instant`   |
//! | `log_sink` | LineSink        | Serial console, `log` facade     |
//! | `serial`   | LineTransport   | UART / USB CDC / stdin bytes     |
//!
//! The indicator port is implemented by [`crate::drivers::status_led`].

pub mod clock;
pub mod log_sink;
pub mod serial;
