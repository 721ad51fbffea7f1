//! Keylite - receiver keypad firmware
//!
//! A 4x3 lighted keypad that selects inputs on an audio receiver over its
//! RS-232 control port and lights the button matching the receiver's
//! reported state.
//!
//! Wiring (RP2040):
//!
//! | Function            | Pins                    |
//! |---------------------|-------------------------|
//! | Receiver UART0      | GPIO0 TX, GPIO1 RX      |
//! | TLC59711 SPI0       | GPIO18 SCK, GPIO19 MOSI |
//! | Matrix rows         | GPIO2-5                 |
//! | Matrix columns      | GPIO6-8 (pull-up)       |
//! | Proximity sensor    | GPIO9 (active high)     |
//! | Dim button          | GPIO10 (pull-down)      |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::spi::{self, Spi};
use embassy_rp::uart::{self, BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use keylite_core::Panel;
use keylite_drivers::input::{DimButton, KeyMatrix, ProximitySensor};
use keylite_drivers::led::Tlc59711;
use keylite_drivers::serial::UartLink;
use keylite_hal::spi::{Phase, Polarity, SpiConfig};
use keylite_hal::uart::{DataBits, Parity, StopBits, UartConfig};
use keylite_hal_embassy::{HalInput, HalOutput, HalSpi, IoUart};
use keylite_protocol::Codec;

mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// UART ring buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Keylite firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    let codec = unwrap!(Codec::panel());

    let port = UartConfig::RS232_CONTROL.with_baudrate(config.serial.baudrate);

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config(port));
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let link = UartLink::new(IoUart::new(uart));

    info!("UART initialized: {}", port);

    // TLC59711 has no chip select and no data out
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config(SpiConfig::TLC59711));
    let leds = Tlc59711::new(HalSpi::new(spi));

    info!("LED driver initialized");

    let debounce_ms = config.input.debounce_ms;
    let rows = [
        HalOutput::new(Output::new(p.PIN_2, Level::High)),
        HalOutput::new(Output::new(p.PIN_3, Level::High)),
        HalOutput::new(Output::new(p.PIN_4, Level::High)),
        HalOutput::new(Output::new(p.PIN_5, Level::High)),
    ];
    let cols = [
        HalInput::new(Input::new(p.PIN_6, Pull::Up)),
        HalInput::new(Input::new(p.PIN_7, Pull::Up)),
        HalInput::new(Input::new(p.PIN_8, Pull::Up)),
    ];
    let keys = KeyMatrix::new(rows, cols, debounce_ms);
    let proximity = ProximitySensor::active_high(HalInput::new(Input::new(p.PIN_9, Pull::None)));
    let dim = DimButton::new(HalInput::new(Input::new(p.PIN_10, Pull::Down)), debounce_ms);

    info!("Inputs initialized");

    let panel: tasks::FirmwarePanel = Panel::new(
        codec,
        &config.illumination,
        keys,
        dim,
        proximity,
        link,
        leds,
    );

    unwrap!(spawner.spawn(tasks::panel_task(panel, config.input.poll_interval_ms)));

    info!("Panel running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Translate a bus description into the embassy-rp SPI config
fn spi_config(bus: SpiConfig) -> spi::Config {
    let (polarity, phase): (Polarity, Phase) = bus.mode.into();

    let mut config = spi::Config::default();
    config.frequency = bus.frequency;
    config.polarity = match polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    config.phase = match phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    config
}

/// Translate the receiver port framing into the embassy-rp UART config
fn uart_config(port: UartConfig) -> uart::Config {
    let mut config = uart::Config::default();
    config.baudrate = port.baudrate;
    config.data_bits = match port.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    config.parity = match port.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    config.stop_bits = match port.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    config
}
