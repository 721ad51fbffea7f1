//! Board-agnostic logic for the keylite panel firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (LED driver, key matrix, dim button, proximity, serial link)
//! - Illumination engine (selection, proximity wake, dim presets, fades)
//! - The cooperative panel loop tying the protocol and the engine together
//! - Configuration types and the embedded config parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod illumination;
pub mod input;
pub mod panel;
pub mod traits;

pub use panel::{Panel, PanelError, TickReport};
