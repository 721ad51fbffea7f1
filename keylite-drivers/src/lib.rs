//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in keylite-core, written against the keylite-hal pin and bus traits:
//!
//! - LED controller (TLC59711 over SPI)
//! - Key matrix scanner with per-key debouncing
//! - Dim button and proximity sensor inputs
//! - Receiver serial link over a UART

#![no_std]
#![deny(unsafe_code)]

pub mod input;
pub mod led;
pub mod serial;
