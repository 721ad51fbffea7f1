//! Receiver serial link over a UART

use keylite_core::traits::ReceiverLink;
use keylite_hal::{UartRx, UartTx};

/// Link errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Transmit or flush failed
    Write,
    /// Receive failed
    Read,
}

/// Receiver control port
///
/// Commands are flushed immediately so the receiver sees each key press
/// within the same loop iteration.
pub struct UartLink<U> {
    uart: U,
}

impl<U: UartTx + UartRx> UartLink<U> {
    pub fn new(uart: U) -> Self {
        Self { uart }
    }

    /// Release the UART
    pub fn into_inner(self) -> U {
        self.uart
    }
}

impl<U: UartTx + UartRx> ReceiverLink for UartLink<U> {
    type Error = LinkError;

    fn send(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.uart.write_all(bytes).map_err(|_| LinkError::Write)?;
        self.uart.flush().map_err(|_| LinkError::Write)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, LinkError> {
        self.uart.read_available(buf).map_err(|_| LinkError::Read)
    }
}
