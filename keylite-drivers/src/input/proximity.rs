//! Proximity sensor input

use keylite_core::traits::LevelSource;
use keylite_hal::gpio::Polarity;
use keylite_hal::InputPin;

/// Capacitive proximity sensor with a digital output
///
/// Level-triggered and not debounced: the panel restarts its hold timer on
/// every asserted sample.
pub struct ProximitySensor<P> {
    pin: P,
    polarity: Polarity,
}

impl<P: InputPin> ProximitySensor<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self { pin, polarity }
    }

    /// Sensor output high while something is near
    pub fn active_high(pin: P) -> Self {
        Self::new(pin, Polarity::ActiveHigh)
    }
}

impl<P: InputPin> LevelSource for ProximitySensor<P> {
    fn is_asserted(&mut self) -> bool {
        let high = self.pin.is_high();
        self.polarity.is_asserted(high)
    }
}
