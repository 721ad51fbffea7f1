//! Receiver serial link trait

/// Byte link to the audio receiver
pub trait ReceiverLink {
    /// Error type for transfers
    type Error;

    /// Transmit a framed command
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Copy already-received bytes into `buf` without waiting
    ///
    /// Returns the number of bytes copied, 0 if nothing is pending.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
