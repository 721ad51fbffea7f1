//! Button illumination
//!
//! - [`engine`] owns the channel levels and reacts to receiver status,
//!   proximity, the dim button and elapsed time
//! - [`fade`] holds the single fade session and its transitions
//! - [`dim`] cycles the brightness presets

pub mod dim;
pub mod engine;
pub mod fade;

pub use dim::DimController;
pub use engine::{Channels, IlluminationEngine};
pub use fade::{FadeEvent, FadeSession, FadeTiming};
