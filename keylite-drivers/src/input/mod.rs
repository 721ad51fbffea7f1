//! Panel inputs
//!
//! - [`matrix`] - 4x3 key matrix scanner
//! - [`debounce`] - time-based debouncer and the dim button
//! - [`proximity`] - proximity sensor

pub mod debounce;
pub mod matrix;
pub mod proximity;

pub use debounce::{Debouncer, DimButton};
pub use matrix::KeyMatrix;
pub use proximity::ProximitySensor;
