//! LED controller drivers

pub mod tlc59711;

pub use tlc59711::{Tlc59711, Tlc59711Config};
