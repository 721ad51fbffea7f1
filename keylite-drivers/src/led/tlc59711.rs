//! TLC59711 12-channel 16-bit PWM LED driver
//!
//! The chip has no chip-select: every write shifts one 224-bit packet into
//! the device and latches it. Packet layout, MSB first:
//!
//! ```text
//! | cmd 0x25 (6) | OUTTMG | EXTGCK | TMGRST | DSPRPT | BLANK | BCB (7) | BCG (7) | BCR (7) |
//! | GS word 0 (16) | GS word 1 (16) | ... | GS word 11 (16) |
//! ```
//!
//! The device shifts OUTB3 in first, so word 0 drives the last physical
//! output. Channel `i` here is word `i`; the panel is wired in that order.

use keylite_core::traits::LedDriver;
use keylite_hal::SpiBus;

/// Number of PWM channels
pub const CHANNELS: usize = 12;

/// Packet size in bytes (32-bit header + 12 x 16-bit grayscale)
pub const PACKET_LEN: usize = 4 + CHANNELS * 2;

/// Write command in the top 6 bits of the header
const WRITE_COMMAND: u32 = 0x25;

/// Maximum global brightness control value (7 bits)
pub const MAX_BRIGHTNESS: u8 = 0x7F;

/// Function control and global brightness bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tlc59711Config {
    /// Outputs change on the rising GS clock edge
    pub outtmg: bool,
    /// Use SCKI as the GS clock instead of the internal oscillator
    pub extgck: bool,
    /// Reset the GS counter on latch
    pub tmgrst: bool,
    /// Auto-repeat the display period
    pub dsprpt: bool,
    /// Blank all outputs
    pub blank: bool,
    /// Global brightness for the red, green and blue groups (0-127)
    pub brightness: [u8; 3],
}

impl Default for Tlc59711Config {
    fn default() -> Self {
        Self {
            outtmg: true,
            extgck: false,
            tmgrst: true,
            dsprpt: true,
            blank: false,
            brightness: [MAX_BRIGHTNESS; 3],
        }
    }
}

impl Tlc59711Config {
    /// 32-bit packet header
    pub fn header(&self) -> u32 {
        let [red, green, blue] = self.brightness.map(|b| u32::from(b & MAX_BRIGHTNESS));

        (WRITE_COMMAND << 26)
            | (u32::from(self.outtmg) << 25)
            | (u32::from(self.extgck) << 24)
            | (u32::from(self.tmgrst) << 23)
            | (u32::from(self.dsprpt) << 22)
            | (u32::from(self.blank) << 21)
            | (blue << 14)
            | (green << 7)
            | red
    }
}

/// TLC59711 driver
///
/// Levels are staged in RAM and shifted out as one packet on commit.
pub struct Tlc59711<S> {
    spi: S,
    config: Tlc59711Config,
    levels: [u16; CHANNELS],
}

impl<S: SpiBus> Tlc59711<S> {
    /// Create a driver with all channels off
    pub fn new(spi: S) -> Self {
        Self::with_config(spi, Tlc59711Config::default())
    }

    /// Create a driver with custom control bits
    pub fn with_config(spi: S, config: Tlc59711Config) -> Self {
        Self {
            spi,
            config,
            levels: [0; CHANNELS],
        }
    }

    /// Staged channel levels
    pub fn levels(&self) -> &[u16; CHANNELS] {
        &self.levels
    }

    /// Build the packet for the staged levels
    pub fn packet(&self) -> [u8; PACKET_LEN] {
        let mut packet = [0u8; PACKET_LEN];
        packet[..4].copy_from_slice(&self.config.header().to_be_bytes());
        for (chunk, level) in packet[4..].chunks_exact_mut(2).zip(self.levels.iter()) {
            chunk.copy_from_slice(&level.to_be_bytes());
        }
        packet
    }

    /// Release the SPI bus
    pub fn into_inner(self) -> S {
        self.spi
    }
}

impl<S: SpiBus> LedDriver for Tlc59711<S> {
    type Error = S::Error;

    fn set_channel(&mut self, channel: usize, level: u16) {
        if let Some(slot) = self.levels.get_mut(channel) {
            *slot = level;
        }
    }

    fn commit(&mut self) -> Result<(), S::Error> {
        let packet = self.packet();
        self.spi.write(&packet)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::vec::Vec;

    /// Mock SPI bus recording every write
    struct MockSpi {
        writes: Vec<Vec<u8>>,
        fail: bool,
    }

    impl MockSpi {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                fail: false,
            }
        }
    }

    impl SpiBus for MockSpi {
        type Error = ();

        fn write(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.fail {
                return Err(());
            }
            self.writes.push(data.to_vec());
            Ok(())
        }
    }

    #[test]
    fn test_default_header() {
        assert_eq!(Tlc59711Config::default().header(), 0x96DF_FFFF);
    }

    #[test]
    fn test_blank_and_brightness() {
        let config = Tlc59711Config {
            blank: true,
            brightness: [0x01, 0x02, 0x03],
            ..Tlc59711Config::default()
        };
        let header = config.header();
        assert_eq!(header >> 26, 0x25);
        assert_eq!((header >> 21) & 1, 1);
        assert_eq!(header & 0x7F, 0x01);
        assert_eq!((header >> 7) & 0x7F, 0x02);
        assert_eq!((header >> 14) & 0x7F, 0x03);
    }

    #[test]
    fn test_packet_layout() {
        let mut driver = Tlc59711::new(MockSpi::new());
        driver.set_channel(0, 0x1234);
        driver.set_channel(11, 0xFFFF);

        let packet = driver.packet();
        assert_eq!(packet.len(), 28);
        assert_eq!(&packet[..4], &[0x96, 0xDF, 0xFF, 0xFF]);
        assert_eq!(&packet[4..6], &[0x12, 0x34]);
        assert_eq!(&packet[6..26], &[0u8; 20]);
        assert_eq!(&packet[26..28], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_commit_writes_one_packet() {
        let mut driver = Tlc59711::new(MockSpi::new());
        driver.set_all(&[1000; CHANNELS]);
        driver.commit().unwrap();
        driver.commit().unwrap();

        let spi = driver.into_inner();
        assert_eq!(spi.writes.len(), 2);
        assert_eq!(spi.writes[0].len(), PACKET_LEN);
        assert_eq!(&spi.writes[0][4..6], &1000u16.to_be_bytes());
    }

    #[test]
    fn test_out_of_range_channel_ignored() {
        let mut driver = Tlc59711::new(MockSpi::new());
        driver.set_channel(12, 500);
        assert_eq!(driver.levels(), &[0; CHANNELS]);
    }

    #[test]
    fn test_commit_error() {
        let mut spi = MockSpi::new();
        spi.fail = true;
        let mut driver = Tlc59711::new(spi);
        assert_eq!(driver.commit(), Err(()));
    }
}
