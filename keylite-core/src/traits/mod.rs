//! Collaborator traits
//!
//! These traits define the interface between the panel loop and the
//! board-specific drivers. None of them block: each call either returns
//! immediately with what is available or reports that nothing happened.

pub mod input;
pub mod led;
pub mod link;

pub use input::{EdgeSource, KeySource, LevelSource};
pub use led::LedDriver;
pub use link::ReceiverLink;
