//! UART adapter
//!
//! Wraps an `embedded-io` byte stream such as `embassy_rp::uart::BufferedUart`.
//! The interrupt-driven ring buffer keeps filling between polls, so
//! `read_available` checks `read_ready` first and never blocks.

use embedded_io::{Read, ReadReady, Write};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Receive path failed (overrun, framing, break)
    Read,
    /// Transmit path failed
    Write,
}

/// Buffered UART adapter
pub struct IoUart<U> {
    port: U,
}

impl<U> IoUart<U> {
    /// Wrap a buffered UART
    pub fn new(port: U) -> Self {
        Self { port }
    }
}

impl<U: Write> keylite_hal::UartTx for IoUart<U> {
    type Error = UartBusError;

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.port.write_all(data).map_err(|_| UartBusError::Write)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.port.flush().map_err(|_| UartBusError::Write)
    }
}

impl<U: Read + ReadReady> keylite_hal::UartRx for IoUart<U> {
    type Error = UartBusError;

    fn read_available(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        if !self.port.read_ready().map_err(|_| UartBusError::Read)? {
            return Ok(0);
        }
        self.port.read(buf).map_err(|_| UartBusError::Read)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::convert::Infallible;
    use keylite_hal::{UartRx, UartTx};
    use std::collections::VecDeque;
    use std::vec::Vec;

    #[derive(Default)]
    struct MockPort {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
    }

    impl embedded_io::ErrorType for MockPort {
        type Error = Infallible;
    }

    impl Read for MockPort {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            let n = buf.len().min(self.rx.len());
            for slot in buf.iter_mut().take(n) {
                *slot = self.rx.pop_front().unwrap_or(0);
            }
            Ok(n)
        }
    }

    impl ReadReady for MockPort {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.rx.is_empty())
        }
    }

    impl Write for MockPort {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_read_nothing_pending() {
        let mut uart = IoUart::new(MockPort::default());
        let mut buf = [0u8; 8];
        assert_eq!(uart.read_available(&mut buf), Ok(0));
    }

    #[test]
    fn test_read_pending_bytes() {
        let mut port = MockPort::default();
        port.rx.extend(b"!1PWR00\x1a".iter().copied());
        let mut uart = IoUart::new(port);

        let mut buf = [0u8; 4];
        assert_eq!(uart.read_available(&mut buf), Ok(4));
        assert_eq!(&buf, b"!1PW");
        assert_eq!(uart.read_available(&mut buf), Ok(4));
        assert_eq!(&buf, b"R00\x1a");
        assert_eq!(uart.read_available(&mut buf), Ok(0));
    }

    #[test]
    fn test_write_all() {
        let mut uart = IoUart::new(MockPort::default());
        uart.write_all(b"!1SLIQSTN\r").unwrap();
        uart.flush().unwrap();
        assert_eq!(uart.port.tx, b"!1SLIQSTN\r");
    }
}
