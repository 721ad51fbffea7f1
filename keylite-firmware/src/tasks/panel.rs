//! Panel task
//!
//! Drives [`Panel::tick`] from a fixed-rate ticker and logs what each tick
//! reports. Tick errors are logged and the loop carries on.

use defmt::*;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_rp::uart::BufferedUart;
use embassy_time::{Duration, Instant, Ticker};

use keylite_core::{Panel, TickReport};
use keylite_drivers::input::{DimButton, KeyMatrix, ProximitySensor};
use keylite_drivers::led::Tlc59711;
use keylite_drivers::serial::UartLink;
use keylite_hal_embassy::{HalInput, HalOutput, HalSpi, IoUart};
use keylite_protocol::ReceiverStatus;

/// Matrix rows
pub const ROWS: usize = 4;

/// Matrix columns
pub const COLS: usize = 3;

pub type KeyPad = KeyMatrix<HalOutput<Output<'static>>, HalInput<Input<'static>>, ROWS, COLS>;

/// The panel wired to RP2040 peripherals
pub type FirmwarePanel = Panel<
    KeyPad,
    DimButton<HalInput<Input<'static>>>,
    ProximitySensor<HalInput<Input<'static>>>,
    UartLink<IoUart<BufferedUart>>,
    Tlc59711<HalSpi<Spi<'static, SPI0, Blocking>>>,
>;

/// Panel task - one tick per poll interval
#[embassy_executor::task]
pub async fn panel_task(mut panel: FirmwarePanel, poll_interval_ms: u32) {
    info!("Panel task started ({} ms poll)", poll_interval_ms);

    let mut ticker = Ticker::every(Duration::from_millis(u64::from(poll_interval_ms)));
    let mut proximity = false;

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis();
        match panel.tick(now_ms) {
            Ok(report) => {
                if report.proximity != proximity {
                    proximity = report.proximity;
                    debug!("Proximity {}", if proximity { "detected" } else { "cleared" });
                }
                log_report(&report);
            }
            Err(e) => {
                warn!("Panel tick failed: {:?}", e);
            }
        }
    }
}

fn log_report(report: &TickReport) {
    if report.queries_sent {
        info!("Startup status queries sent");
    }
    if let Some(button) = report.key_sent {
        debug!("Key {} -> receiver", button.raw());
    }
    if let Some(index) = report.dim_index {
        debug!("Dim preset {}", index);
    }
    if report.bytes_received > 0 {
        trace!("RX: {} bytes", report.bytes_received);
    }
    if report.overflow {
        warn!("Receive buffer overflow, partial frame dropped");
    }
    if report.unrecognized > 0 {
        debug!("Ignored {} unrecognized codes", report.unrecognized);
    }
    match report.status {
        Some(ReceiverStatus::PoweredOff) => info!("Receiver powered off"),
        Some(ReceiverStatus::Selected(button)) => info!("Receiver on button {}", button.raw()),
        None => {}
    }
    if report.led_refresh {
        trace!("LEDs committed");
    }
}
