//! Status indicator drivers.
//!
//! ## Dual-target design
//!
//! On hardware: [`PinIndicator`] drives any `embedded-hal` 1.0 stateful
//! output pin (the board LED).
//! On host/test: [`SimIndicator`] tracks the level in memory only.

use embedded_hal::digital::{PinState, StatefulOutputPin};
use log::{debug, warn};

use crate::app::ports::IndicatorPort;

/// Indicator on a GPIO output.  Pin errors are logged and otherwise ignored.
pub struct PinIndicator<P> {
    pin: P,
}

impl<P: StatefulOutputPin> PinIndicator<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: StatefulOutputPin> IndicatorPort for PinIndicator<P> {
    fn init(&mut self) {
        if let Err(e) = self.pin.set_low() {
            warn!("indicator: init failed: {:?}", e);
        }
    }

    fn set(&mut self, on: bool) {
        if let Err(e) = self.pin.set_state(PinState::from(on)) {
            warn!("indicator: set({}) failed: {:?}", on, e);
        }
    }

    fn toggle(&mut self) {
        if let Err(e) = self.pin.toggle() {
            warn!("indicator: toggle failed: {:?}", e);
        }
    }
}

/// In-memory indicator for the simulator.
#[derive(Debug, Default)]
pub struct SimIndicator {
    on: bool,
    toggles: u32,
}

impl SimIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Heartbeat toggles seen since construction.
    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

impl IndicatorPort for SimIndicator {
    fn init(&mut self) {
        self.on = false;
    }

    fn set(&mut self, on: bool) {
        if self.on != on {
            debug!("indicator: {}", if on { "on" } else { "off" });
        }
        self.on = on;
    }

    fn toggle(&mut self) {
        self.on = !self.on;
        self.toggles = self.toggles.wrapping_add(1);
        debug!("indicator: {}", if self.on { "on" } else { "off" });
    }
}
