//! Time-based debouncing and the dim button

use keylite_core::input::Edge;
use keylite_core::traits::EdgeSource;
use keylite_hal::InputPin;

/// Reports a level change once the raw input has been stable for the
/// debounce time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    stable: bool,
    candidate: bool,
    since_ms: u64,
    debounce_ms: u32,
}

impl Debouncer {
    /// Start with a known stable level
    pub const fn new(initial: bool, debounce_ms: u32) -> Self {
        Self {
            stable: initial,
            candidate: initial,
            since_ms: 0,
            debounce_ms,
        }
    }

    /// Debounced level
    pub fn level(&self) -> bool {
        self.stable
    }

    /// Feed a raw sample taken at `now_ms`
    pub fn update(&mut self, raw: bool, now_ms: u64) -> Option<Edge> {
        if raw != self.candidate {
            self.candidate = raw;
            self.since_ms = now_ms;
        }

        let settled = now_ms.saturating_sub(self.since_ms) >= u64::from(self.debounce_ms);
        if self.candidate != self.stable && settled {
            self.stable = self.candidate;
            return Some(Edge::from_level(self.stable));
        }

        None
    }
}

/// Debounced dim button
///
/// Wired with a pull-down, so the pin reads high while held. The panel acts
/// on the falling edge, i.e. on release.
pub struct DimButton<P> {
    pin: P,
    debouncer: Debouncer,
}

impl<P: InputPin> DimButton<P> {
    /// Create the button, taking the current pin level as stable
    pub fn new(mut pin: P, debounce_ms: u32) -> Self {
        let initial = pin.is_high();
        Self {
            pin,
            debouncer: Debouncer::new(initial, debounce_ms),
        }
    }

    /// True while the debounced button is held
    pub fn is_held(&self) -> bool {
        self.debouncer.level()
    }
}

impl<P: InputPin> EdgeSource for DimButton<P> {
    fn poll_edge(&mut self, now_ms: u64) -> Option<Edge> {
        let raw = self.pin.is_high();
        self.debouncer.update(raw, now_ms)
    }
}
