//! Input traits

use crate::input::{Edge, KeyEvent};

/// Source of debounced key matrix events
pub trait KeySource {
    /// Scan the matrix and return at most one pending event
    ///
    /// `now_ms` is a monotonic timestamp used for debouncing.
    fn poll_key(&mut self, now_ms: u64) -> Option<KeyEvent>;
}

/// Source of debounced edges from a single button
pub trait EdgeSource {
    /// Sample the input and return an edge if its debounced level changed
    fn poll_edge(&mut self, now_ms: u64) -> Option<Edge>;
}

/// Level-triggered input such as the proximity sensor
pub trait LevelSource {
    /// True while the input is asserted
    fn is_asserted(&mut self) -> bool;
}
