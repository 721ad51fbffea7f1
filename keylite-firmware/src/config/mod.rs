//! Configuration loading
//!
//! `panel.toml` is compiled into the image and parsed at boot. The build
//! script has already validated it, so a failure here means the firmware
//! and the file disagree; the panel then runs on built-in defaults.

use defmt::*;

use keylite_core::config::{self, PanelConfig};

/// Embedded configuration (edit panel.toml and rebuild to customize)
const EMBEDDED_CONFIG: &str = include_str!("../../panel.toml");

/// Parse and validate the embedded configuration
pub fn load_config() -> PanelConfig {
    match config::load(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Parsed embedded configuration successfully");
            log_config_summary(&config);
            config
        }
        Err(e) => {
            warn!("Invalid embedded config: {:?}, using defaults", e);
            PanelConfig::default()
        }
    }
}

/// Log a summary of the loaded configuration
fn log_config_summary(config: &PanelConfig) {
    let illumination = &config.illumination;
    debug!("  presets: {}", illumination.presets);
    debug!(
        "  fade: step {} every {} ms",
        illumination.fade_step, illumination.fade_interval_ms
    );
    debug!(
        "  holds: proximity {} ms, power off {} ms",
        illumination.proximity_hold_ms, illumination.power_off_hold_ms
    );
    debug!(
        "  input: poll {} ms, debounce {} ms",
        config.input.poll_interval_ms, config.input.debounce_ms
    );
    debug!("  serial: {} baud", config.serial.baudrate);
}
