//! Embassy async tasks

pub mod panel;

pub use panel::{panel_task, FirmwarePanel};
