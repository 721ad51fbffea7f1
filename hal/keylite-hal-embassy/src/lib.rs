//! Embassy peripheral adapters for the keylite panel
//!
//! embassy-rp (and every other embassy HAL) implements the `embedded-hal`
//! 1.0 and `embedded-io` 0.6 traits on its GPIO, SPI and buffered UART
//! types. The newtypes in this crate wrap any such peripheral and expose
//! it through the `keylite-hal` traits the drivers are written against:
//!
//! - [`gpio::HalInput`], [`gpio::HalOutput`] - matrix pins, dim button, proximity
//! - [`spi::HalSpi`] - TLC59711 data/clock lines
//! - [`uart::IoUart`] - receiver control port

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod spi;
pub mod uart;

pub use gpio::{HalInput, HalOutput};
pub use spi::{HalSpi, SpiBusError};
pub use uart::{IoUart, UartBusError};

// Re-export shared traits from keylite-hal for convenience
pub use keylite_hal::{InputPin, OutputPin, SpiBus, UartRx, UartTx};
