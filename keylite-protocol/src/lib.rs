//! Receiver serial control protocol
//!
//! This crate covers both directions of the RS-232 control link between
//! the keypad panel and the audio receiver. Every message is plain ASCII:
//!
//! ```text
//! panel -> receiver:  '!' CODE '\r'
//! receiver -> panel:  '!' CODE ['!' CODE ...] 0x1A
//! ```
//!
//! - [`codec`] maps the 12 panel buttons to receiver codes and decodes
//!   status codes back into buttons (with aliases for codes that share a
//!   button).
//! - [`command`] frames outbound commands, including the two startup
//!   status queries.
//! - [`frame`] accumulates received bytes until the end-of-transmission
//!   byte and splits the frame into individual codes.

#![no_std]
#![deny(unsafe_code)]

pub mod codec;
pub mod command;
pub mod frame;

pub use codec::{
    ButtonId, ButtonMapping, Codec, MappingError, ProtocolCode, ReceiverStatus, StatusMapping,
    BUTTON_COUNT,
};
pub use command::{strip_framing, Command, POWER_QUERY, SOURCE_QUERY, STARTUP_QUERIES};
pub use frame::{
    AssemblerState, Code, Commands, Frame, FrameAssembler, FrameError, DELIMITER, MAX_PIECE_LEN,
    RX_BUFFER_SIZE, TERMINATOR,
};
