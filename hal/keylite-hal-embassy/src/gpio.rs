//! GPIO adapters
//!
//! embassy GPIO is infallible; a pin error from some other HAL reads as
//! "low" and writes are dropped.

/// Input pin adapter
pub struct HalInput<P> {
    pin: P,
}

impl<P: embedded_hal::digital::InputPin> HalInput<P> {
    /// Wrap an `embedded-hal` input pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::InputPin> keylite_hal::InputPin for HalInput<P> {
    fn is_high(&mut self) -> bool {
        matches!(self.pin.is_high(), Ok(true))
    }
}

/// Output pin adapter
pub struct HalOutput<P> {
    pin: P,
}

impl<P: embedded_hal::digital::OutputPin> HalOutput<P> {
    /// Wrap an `embedded-hal` output pin
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: embedded_hal::digital::OutputPin> keylite_hal::OutputPin for HalOutput<P> {
    fn set_high(&mut self) {
        let _ = self.pin.set_high();
    }

    fn set_low(&mut self) {
        let _ = self.pin.set_low();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use keylite_hal::{InputPin, OutputPin};

    struct MockPin {
        high: bool,
    }

    impl embedded_hal::digital::ErrorType for MockPin {
        type Error = Infallible;
    }

    impl embedded_hal::digital::InputPin for MockPin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.high)
        }
    }

    impl embedded_hal::digital::OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_input_reads_level() {
        let mut input = HalInput::new(MockPin { high: true });
        assert!(input.is_high());
        assert!(!input.is_low());
    }

    #[test]
    fn test_output_drives_level() {
        let mut output = HalOutput::new(MockPin { high: true });
        output.set_low();
        assert!(!output.pin.high);
        output.set_state(true);
        assert!(output.into_inner().high);
    }
}
