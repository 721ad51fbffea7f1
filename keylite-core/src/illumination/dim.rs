//! Dim-level controller

use crate::config::{DEFAULT_PRESETS, PRESET_COUNT};

/// Cycles through the brightness presets, brightest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DimController {
    presets: [u16; PRESET_COUNT],
    index: usize,
}

impl Default for DimController {
    fn default() -> Self {
        Self::new(DEFAULT_PRESETS)
    }
}

impl DimController {
    /// Start at the brightest preset
    pub const fn new(presets: [u16; PRESET_COUNT]) -> Self {
        Self { presets, index: 0 }
    }

    /// Current preset index (0 = brightest)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current brightness
    pub fn level(&self) -> u16 {
        self.presets[self.index]
    }

    /// Move to the next preset, wrapping to the brightest after the dimmest
    pub fn advance(&mut self) -> u16 {
        self.index = (self.index + 1) % PRESET_COUNT;
        self.level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle() {
        let mut dim = DimController::default();
        assert_eq!(dim.level(), 65535);
        assert_eq!(dim.advance(), 20000);
        assert_eq!(dim.advance(), 2000);
        assert_eq!(dim.advance(), 65535);
        assert_eq!(dim.index(), 0);
    }
}
