//! Configuration type definitions
//!
//! Every field has a default matching the panel as built, so an empty
//! configuration file is valid.

use super::parse::ParseError;

/// Number of dim presets
pub const PRESET_COUNT: usize = 3;

/// Built-in brightness presets, brightest first
pub const DEFAULT_PRESETS: [u16; PRESET_COUNT] = [65535, 20000, 2000];

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The file could not be parsed
    Parse(ParseError),
    /// Fade step is zero
    ZeroFadeStep,
    /// A preset is lower than the fade step
    PresetBelowFadeStep,
    /// Presets are not ordered brightest first
    PresetsNotDescending,
    /// Fade interval is zero
    ZeroFadeInterval,
    /// Loop poll interval is zero
    ZeroPollInterval,
    /// Baudrate is zero
    InvalidBaudrate,
}

impl From<ParseError> for ConfigError {
    fn from(err: ParseError) -> Self {
        ConfigError::Parse(err)
    }
}

/// Illumination timing and brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IlluminationConfig {
    /// Brightness presets selected by the dim button
    pub presets: [u16; PRESET_COUNT],
    /// Brightness removed per fade step
    pub fade_step: u16,
    /// Time between fade steps (ms)
    pub fade_interval_ms: u32,
    /// Full-brightness hold after proximity clears (ms)
    pub proximity_hold_ms: u32,
    /// Power button hold before its fade-out (ms)
    pub power_off_hold_ms: u32,
}

impl Default for IlluminationConfig {
    fn default() -> Self {
        Self {
            presets: DEFAULT_PRESETS,
            fade_step: 1000,
            fade_interval_ms: 15,
            proximity_hold_ms: 3000,
            power_off_hold_ms: 1000,
        }
    }
}

impl IlluminationConfig {
    /// Check presets and timing
    ///
    /// Presets must be brightest first and never below the fade step, so a
    /// fade always takes at least one step to reach zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fade_step == 0 {
            return Err(ConfigError::ZeroFadeStep);
        }
        if self.fade_interval_ms == 0 {
            return Err(ConfigError::ZeroFadeInterval);
        }
        if self.presets.iter().any(|&p| p < self.fade_step) {
            return Err(ConfigError::PresetBelowFadeStep);
        }
        if self.presets.windows(2).any(|w| w[1] > w[0]) {
            return Err(ConfigError::PresetsNotDescending);
        }
        Ok(())
    }
}

/// Input sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Main loop period (ms)
    pub poll_interval_ms: u32,
    /// Time a button must be stable before an edge is reported (ms)
    pub debounce_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5,
            debounce_ms: 10,
        }
    }
}

/// Receiver serial port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    pub baudrate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self { baudrate: 9600 }
    }
}

/// Complete panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelConfig {
    pub illumination: IlluminationConfig,
    pub input: InputConfig,
    pub serial: SerialConfig,
}

impl PanelConfig {
    /// Validate all sections
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.illumination.validate()?;
        if self.input.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        if self.serial.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = PanelConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.illumination.presets, [65535, 20000, 2000]);
        assert_eq!(config.serial.baudrate, 9600);
        assert_eq!(config.input.poll_interval_ms, 5);
    }

    #[test]
    fn test_preset_below_step() {
        let mut config = IlluminationConfig::default();
        config.presets = [65535, 20000, 500];
        assert_eq!(config.validate(), Err(ConfigError::PresetBelowFadeStep));
    }

    #[test]
    fn test_preset_order() {
        let mut config = IlluminationConfig::default();
        config.presets = [20000, 65535, 2000];
        assert_eq!(config.validate(), Err(ConfigError::PresetsNotDescending));

        // Equal neighbours are allowed
        config.presets = [20000, 20000, 2000];
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_values() {
        let mut config = PanelConfig::default();
        config.illumination.fade_step = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFadeStep));

        let mut config = PanelConfig::default();
        config.input.poll_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroPollInterval));

        let mut config = PanelConfig::default();
        config.serial.baudrate = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidBaudrate));
    }
}
