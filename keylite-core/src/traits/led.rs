//! LED driver trait

/// Multi-channel PWM LED driver
///
/// Channel levels are staged with [`set_channel`](LedDriver::set_channel)
/// and only reach the hardware on [`commit`](LedDriver::commit).
pub trait LedDriver {
    /// Error type for hardware transfers
    type Error;

    /// Stage a channel's brightness (0 = off, 65535 = full)
    ///
    /// Channels beyond the driver's range are ignored.
    fn set_channel(&mut self, channel: usize, level: u16);

    /// Push all staged levels to the hardware
    fn commit(&mut self) -> Result<(), Self::Error>;

    /// Stage consecutive channels starting at 0
    fn set_all(&mut self, levels: &[u16]) {
        for (channel, &level) in levels.iter().enumerate() {
            self.set_channel(channel, level);
        }
    }
}
