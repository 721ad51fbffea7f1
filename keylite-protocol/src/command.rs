//! Outbound command framing
//!
//! The receiver expects every command as `'!' CODE '\r'`. Status queries
//! use the same framing with a `QSTN` argument; the receiver answers with
//! the current value as an ordinary status message.

use heapless::Vec;

use crate::codec::ProtocolCode;
use crate::frame::{FrameError, DELIMITER};

/// End-of-command byte for panel -> receiver messages
pub const CARRIAGE_RETURN: u8 = b'\r';

/// Longest code the panel will frame
pub const MAX_CODE_LEN: usize = 14;

/// Longest framed command (delimiter + code + carriage return)
pub const MAX_COMMAND_LEN: usize = MAX_CODE_LEN + 2;

/// Input selector status query
pub const SOURCE_QUERY: ProtocolCode = ProtocolCode::new("1SLIQSTN");

/// Power status query
pub const POWER_QUERY: ProtocolCode = ProtocolCode::new("1PWRQSTN");

/// Queries sent once at boot, in this order
pub const STARTUP_QUERIES: [ProtocolCode; 2] = [SOURCE_QUERY, POWER_QUERY];

/// A framed, ready-to-transmit command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    bytes: Vec<u8, MAX_COMMAND_LEN>,
}

impl Command {
    /// Frame a protocol code
    pub fn new(code: ProtocolCode) -> Result<Self, FrameError> {
        if !code.is_valid() {
            return Err(FrameError::InvalidCode);
        }

        let mut bytes = Vec::new();
        bytes
            .push(DELIMITER)
            .map_err(|_| FrameError::InvalidCode)?;
        bytes
            .extend_from_slice(code.as_bytes())
            .map_err(|_| FrameError::InvalidCode)?;
        bytes
            .push(CARRIAGE_RETURN)
            .map_err(|_| FrameError::InvalidCode)?;

        Ok(Self { bytes })
    }

    /// Wire bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The code without its framing
    pub fn code(&self) -> &[u8] {
        strip_framing(&self.bytes)
    }
}

/// Remove a leading `'!'` and a trailing `'\r'` if present
pub fn strip_framing(command: &[u8]) -> &[u8] {
    let command = command.strip_prefix(&[DELIMITER]).unwrap_or(command);
    command.strip_suffix(&[CARRIAGE_RETURN]).unwrap_or(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_query() {
        let cmd = Command::new(SOURCE_QUERY).unwrap();
        assert_eq!(cmd.as_bytes(), b"!1SLIQSTN\r");
        assert_eq!(cmd.code(), b"1SLIQSTN");
    }

    #[test]
    fn test_startup_order() {
        assert_eq!(STARTUP_QUERIES[0], SOURCE_QUERY);
        assert_eq!(STARTUP_QUERIES[1], POWER_QUERY);
        let power = Command::new(POWER_QUERY).unwrap();
        assert_eq!(power.as_bytes(), b"!1PWRQSTN\r");
    }

    #[test]
    fn test_reject_invalid_code() {
        assert_eq!(
            Command::new(ProtocolCode::new("")),
            Err(FrameError::InvalidCode)
        );
        assert_eq!(
            Command::new(ProtocolCode::new("1SLI10 AND MORE")),
            Err(FrameError::InvalidCode)
        );
        assert_eq!(
            Command::new(ProtocolCode::new("1SL!10")),
            Err(FrameError::InvalidCode)
        );
    }

    #[test]
    fn test_strip_framing() {
        assert_eq!(strip_framing(b"!1PWR00\r"), b"1PWR00");
        assert_eq!(strip_framing(b"1PWR00"), b"1PWR00");
        assert_eq!(strip_framing(b"!"), b"");
    }
}
