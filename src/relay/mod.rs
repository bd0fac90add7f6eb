//! Relay actuator module
//!
//! Owns the single digital output pin that fires the garage door opener.
//! [`Relay::pulse`] drives the pin to its active level, holds it for the
//! configured width, then restores the idle level. The pin sits behind an
//! async mutex held across the whole pulse, so concurrent requests can
//! never energize the relay twice at once; they queue and each produce
//! one full pulse.

pub mod pin;

pub use pin::RelayPin;

use crate::config::RelayConfig;
use serde::Deserialize;
use std::time::Duration;
use tokio::sync::Mutex;

/// Which physical level means "relay on"
///
/// Fixed by the relay board wired to the pin, not by this program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

impl Polarity {
    /// Drive the pin to its active level
    fn engage(self, pin: &mut dyn RelayPin) {
        match self {
            Self::ActiveHigh => pin.set_high(),
            Self::ActiveLow => pin.set_low(),
        }
    }

    /// Drive the pin back to its idle level
    fn release(self, pin: &mut dyn RelayPin) {
        match self {
            Self::ActiveHigh => pin.set_low(),
            Self::ActiveLow => pin.set_high(),
        }
    }
}

/// The relay actuator, constructed once at startup
pub struct Relay {
    pin: Mutex<Box<dyn RelayPin>>,
    polarity: Polarity,
    pulse_width: Duration,
}

impl Relay {
    pub fn new(pin: Box<dyn RelayPin>, polarity: Polarity, pulse_width: Duration) -> Self {
        Self {
            pin: Mutex::new(pin),
            polarity,
            pulse_width,
        }
    }

    /// Acquire the configured pin and wrap it in an actuator
    ///
    /// With the `gpio` feature this opens the real BCM pin via rppal and
    /// fails if the GPIO device cannot be acquired; without it a simulated
    /// pin is used so the server runs on any host.
    pub fn open(cfg: &RelayConfig) -> Result<Self, Box<dyn std::error::Error>> {
        #[cfg(feature = "gpio")]
        let pin: Box<dyn RelayPin> = Box::new(pin::GpioRelayPin::open(cfg.pin, cfg.polarity)?);

        #[cfg(not(feature = "gpio"))]
        let pin: Box<dyn RelayPin> = Box::new(pin::SimulatedRelayPin::new(cfg.pin, cfg.polarity));

        Ok(Self::new(pin, cfg.polarity, cfg.pulse_width()))
    }

    /// Produce one timed pulse: engage, hold, release
    ///
    /// The lock is held for the full width, so a pulse always completes
    /// before the next one can start.
    pub async fn pulse(&self) {
        let mut pin = self.pin.lock().await;
        self.polarity.engage(pin.as_mut());
        tokio::time::sleep(self.pulse_width).await;
        self.polarity.release(pin.as_mut());
    }

    pub const fn pulse_width(&self) -> Duration {
        self.pulse_width
    }
}
