//! Input events produced by the panel's collaborators

/// Key matrix event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    /// Matrix key number (row * columns + column)
    pub key_id: u8,
    /// True on press, false on release
    pub pressed: bool,
}

impl KeyEvent {
    pub const fn press(key_id: u8) -> Self {
        Self {
            key_id,
            pressed: true,
        }
    }

    pub const fn release(key_id: u8) -> Self {
        Self {
            key_id,
            pressed: false,
        }
    }
}

/// Debounced level change of a single input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Input went high
    Rising,
    /// Input went low
    Falling,
}

impl Edge {
    /// Edge produced by a transition to `high`
    pub const fn from_level(high: bool) -> Self {
        if high {
            Edge::Rising
        } else {
            Edge::Falling
        }
    }
}
