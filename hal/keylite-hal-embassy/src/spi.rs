//! SPI adapter
//!
//! Wraps a blocking `embedded-hal` SPI bus (`embassy_rp::spi::Spi` in
//! `Blocking` mode on the panel board).

/// SPI bus error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiBusError {
    /// Underlying bus reported an error while shifting or flushing
    Bus,
}

/// SPI bus adapter
pub struct HalSpi<S> {
    bus: S,
}

impl<S: embedded_hal::spi::SpiBus> HalSpi<S> {
    /// Wrap an `embedded-hal` SPI bus
    pub fn new(bus: S) -> Self {
        Self { bus }
    }
}

impl<S: embedded_hal::spi::SpiBus> keylite_hal::SpiBus for HalSpi<S> {
    type Error = SpiBusError;

    fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(data).map_err(|_| SpiBusError::Bus)?;
        // The TLC59711 latches 8 clock periods after the last edge,
        // so the bytes must be out before the next packet starts.
        self.bus.flush().map_err(|_| SpiBusError::Bus)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use keylite_hal::SpiBus;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockBus {
        written: Vec<u8>,
        flushes: usize,
    }

    impl embedded_hal::spi::ErrorType for MockBus {
        type Error = Infallible;
    }

    impl embedded_hal::spi::SpiBus for MockBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(write);
            read.fill(0);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_write_flushes() {
        let mut spi = HalSpi::new(MockBus::default());
        spi.write(&[0x94, 0x5F]).unwrap();
        assert_eq!(spi.bus.written, [0x94, 0x5F]);
        assert_eq!(spi.bus.flushes, 1);
    }
}
