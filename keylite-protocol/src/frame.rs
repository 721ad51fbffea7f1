//! Inbound frame assembly
//!
//! The receiver sends one or more `!`-delimited codes followed by a single
//! end-of-transmission byte (`0x1A`). Bytes arrive in arbitrary chunks, so
//! the assembler keeps appending until the buffer ends with the terminator.

use core::mem;
use core::slice::Split;

use heapless::Vec;

/// End-of-transmission byte closing every receiver message
pub const TERMINATOR: u8 = 0x1A;

/// Start-of-command byte
pub const DELIMITER: u8 = b'!';

/// Receive buffer capacity
pub const RX_BUFFER_SIZE: usize = 256;

/// Protocol framing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// A frame outgrew the receive buffer; the partial frame was dropped
    Overflow,
    /// A code cannot be framed for transmission
    InvalidCode,
}

/// Assembler state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AssemblerState {
    /// Waiting for the terminator
    Accumulating,
    /// Buffer ends with the terminator and can be drained
    Ready,
}

/// Accumulates received bytes into complete frames
#[derive(Debug, Default)]
pub struct FrameAssembler {
    buffer: Vec<u8, RX_BUFFER_SIZE>,
}

impl FrameAssembler {
    /// Create an empty assembler
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Append received bytes
    ///
    /// On overflow the bytes collected so far are discarded and the rest of
    /// `bytes` starts a fresh frame. The error is reported after all of
    /// `bytes` has been consumed.
    pub fn feed(&mut self, bytes: &[u8]) -> Result<(), FrameError> {
        let mut overflowed = false;

        for &byte in bytes {
            if self.buffer.push(byte).is_err() {
                overflowed = true;
                self.buffer.clear();
                // Cannot fail on an empty buffer
                let _ = self.buffer.push(byte);
            }
        }

        if overflowed {
            Err(FrameError::Overflow)
        } else {
            Ok(())
        }
    }

    /// Current state
    pub fn state(&self) -> AssemblerState {
        match self.buffer.last() {
            Some(&TERMINATOR) => AssemblerState::Ready,
            _ => AssemblerState::Accumulating,
        }
    }

    /// True if a complete frame is waiting
    pub fn is_ready(&self) -> bool {
        self.state() == AssemblerState::Ready
    }

    /// Bytes currently buffered
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// True if nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Take the completed frame, leaving the assembler empty
    pub fn drain(&mut self) -> Option<Frame> {
        if !self.is_ready() {
            return None;
        }
        Some(Frame {
            bytes: mem::take(&mut self.buffer),
        })
    }
}

/// A complete received frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, RX_BUFFER_SIZE>,
}

impl Frame {
    /// Raw frame bytes, terminator included
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Codes in arrival order
    ///
    /// Every terminator byte is removed from each piece and empty pieces
    /// are skipped.
    pub fn commands(&self) -> Commands<'_> {
        Commands {
            pieces: self.bytes.split(is_delimiter as fn(&u8) -> bool),
        }
    }
}

/// Longest piece kept by [`Commands`]
///
/// Anything longer is truncated to this length, which is still too long to
/// match a receiver code.
pub const MAX_PIECE_LEN: usize = 32;

/// One received code with its terminators removed
pub type Code = Vec<u8, MAX_PIECE_LEN>;

fn is_delimiter(byte: &u8) -> bool {
    *byte == DELIMITER
}

fn strip_terminators(piece: &[u8]) -> Code {
    piece
        .iter()
        .copied()
        .filter(|&byte| byte != TERMINATOR)
        .take(MAX_PIECE_LEN)
        .collect()
}

/// Iterator over the codes of a [`Frame`]
pub struct Commands<'a> {
    pieces: Split<'a, u8, fn(&u8) -> bool>,
}

impl Iterator for Commands<'_> {
    type Item = Code;

    fn next(&mut self) -> Option<Self::Item> {
        self.pieces
            .by_ref()
            .map(strip_terminators)
            .find(|code| !code.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_command() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1SLI10\x1a").unwrap();
        assert_eq!(asm.state(), AssemblerState::Ready);

        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI10"[..]));
        assert_eq!(cmds.next().as_deref(), None);
        assert!(asm.is_empty());
        assert_eq!(asm.state(), AssemblerState::Accumulating);
    }

    #[test]
    fn test_multiple_commands_in_order() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1SLI10!1PWR00\x1a").unwrap();
        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI10"[..]));
        assert_eq!(cmds.next().as_deref(), Some(&b"1PWR00"[..]));
        assert_eq!(cmds.next().as_deref(), None);
    }

    #[test]
    fn test_split_across_feeds() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1S").unwrap();
        assert!(asm.drain().is_none());
        asm.feed(b"LI2").unwrap();
        assert!(asm.drain().is_none());
        asm.feed(b"6\x1a").unwrap();
        let frame = asm.drain().unwrap();
        assert_eq!(frame.commands().next().as_deref(), Some(&b"1SLI26"[..]));
    }

    #[test]
    fn test_no_drain_without_terminator() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1SLI10").unwrap();
        assert!(!asm.is_ready());
        assert!(asm.drain().is_none());
        assert_eq!(asm.len(), 7);
    }

    #[test]
    fn test_terminator_must_be_last() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1SLI10\x1a!1SLI").unwrap();
        assert!(asm.drain().is_none());
        asm.feed(b"26\x1a").unwrap();
        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI10"[..]));
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI26"[..]));
        assert_eq!(cmds.next().as_deref(), None);
    }

    #[test]
    fn test_mid_piece_terminator_is_stripped() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!1SLI\x1a10\x1a").unwrap();
        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI10"[..]));
        assert_eq!(cmds.next().as_deref(), None);
    }

    #[test]
    fn test_long_piece_truncated() {
        let mut asm = FrameAssembler::new();
        let mut bytes = [b'A'; 100];
        bytes[0] = DELIMITER;
        bytes[99] = TERMINATOR;
        asm.feed(&bytes).unwrap();

        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().map(|code| code.len()), Some(MAX_PIECE_LEN));
        assert_eq!(cmds.next().as_deref(), None);
    }

    #[test]
    fn test_empty_pieces_skipped() {
        let mut asm = FrameAssembler::new();
        asm.feed(b"!!1SLI10!\x1a").unwrap();
        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1SLI10"[..]));
        assert_eq!(cmds.next().as_deref(), None);

        asm.feed(&[TERMINATOR]).unwrap();
        let frame = asm.drain().unwrap();
        assert_eq!(frame.commands().next().as_deref(), None);
    }

    #[test]
    fn test_overflow_discards_partial_frame() {
        let mut asm = FrameAssembler::new();
        let filler = [b'A'; RX_BUFFER_SIZE];
        asm.feed(&filler).unwrap();
        assert_eq!(asm.len(), RX_BUFFER_SIZE);

        assert_eq!(asm.feed(b"!1PWR00\x1a"), Err(FrameError::Overflow));
        assert_eq!(asm.len(), 8);

        let frame = asm.drain().unwrap();
        let mut cmds = frame.commands();
        assert_eq!(cmds.next().as_deref(), Some(&b"1PWR00"[..]));
        assert_eq!(cmds.next().as_deref(), None);
    }
}
