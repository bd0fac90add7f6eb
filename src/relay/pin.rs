//! Relay pin implementations
//!
//! This is the only module that touches actual hardware. Everything else
//! sees the [`RelayPin`] trait; on builds without the `gpio` feature the
//! simulated pin stands in so the server runs on any host.

use super::Polarity;

/// A digital output pin the actuator can drive
///
/// The pin is write-only: there is no feedback sensing on the relay line.
pub trait RelayPin: Send {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

#[cfg(feature = "gpio")]
pub use gpio::GpioRelayPin;

#[cfg(feature = "gpio")]
mod gpio {
    use super::{Polarity, RelayPin};
    use rppal::gpio::{Gpio, OutputPin};

    /// rppal-backed BCM output pin on the Raspberry Pi header
    pub struct GpioRelayPin {
        pin: OutputPin,
    }

    impl GpioRelayPin {
        /// Acquire the pin, driving it straight to its idle level
        ///
        /// For an active-low relay idle means high, so the relay must not
        /// click on at startup.
        pub fn open(bcm_pin: u8, polarity: Polarity) -> Result<Self, rppal::gpio::Error> {
            let pin = Gpio::new()?.get(bcm_pin)?;
            let pin = match polarity {
                Polarity::ActiveLow => pin.into_output_high(),
                Polarity::ActiveHigh => pin.into_output_low(),
            };
            Ok(Self { pin })
        }
    }

    impl RelayPin for GpioRelayPin {
        fn set_high(&mut self) {
            self.pin.set_high();
        }

        fn set_low(&mut self) {
            self.pin.set_low();
        }
    }
}

/// Stand-in pin for builds without the `gpio` feature
///
/// Logs every level transition so a development host shows what the relay
/// would have done.
#[cfg(not(feature = "gpio"))]
pub struct SimulatedRelayPin {
    bcm_pin: u8,
}

#[cfg(not(feature = "gpio"))]
impl SimulatedRelayPin {
    pub fn new(bcm_pin: u8, polarity: Polarity) -> Self {
        crate::logger::log_warning(&format!(
            "GPIO support not compiled in; simulating pin {bcm_pin} ({polarity:?})"
        ));
        Self { bcm_pin }
    }
}

#[cfg(not(feature = "gpio"))]
impl RelayPin for SimulatedRelayPin {
    fn set_high(&mut self) {
        crate::logger::log_pin_level(self.bcm_pin, "high");
    }

    fn set_low(&mut self) {
        crate::logger::log_pin_level(self.bcm_pin, "low");
    }
}

#[cfg(test)]
pub mod testing {
    use super::RelayPin;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    /// Pin level as seen by [`RecordingPin`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        High,
        Low,
    }

    /// Test pin that records every transition with a timestamp
    ///
    /// Clones share the same event list, so a test can keep a handle
    /// while the actuator owns the boxed pin.
    #[derive(Clone, Default)]
    pub struct RecordingPin {
        events: Arc<Mutex<Vec<(Level, Instant)>>>,
    }

    impl RecordingPin {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<(Level, Instant)> {
            self.events.lock().unwrap().clone()
        }

        pub fn levels(&self) -> Vec<Level> {
            self.events().into_iter().map(|(level, _)| level).collect()
        }
    }

    impl RelayPin for RecordingPin {
        fn set_high(&mut self) {
            self.events.lock().unwrap().push((Level::High, Instant::now()));
        }

        fn set_low(&mut self) {
            self.events.lock().unwrap().push((Level::Low, Instant::now()));
        }
    }
}
