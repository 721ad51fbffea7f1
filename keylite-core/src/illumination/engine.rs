//! Illumination engine
//!
//! Owns the 12 channel levels and decides what the panel shows. Every
//! operation returns `true` when the channel levels changed and the LEDs
//! need a refresh; the caller owns the LED driver.

use keylite_protocol::{ButtonId, ReceiverStatus, BUTTON_COUNT};

use super::dim::DimController;
use super::fade::{FadeEvent, FadeSession, FadeTiming};
use crate::config::IlluminationConfig;

/// Channel levels, indexed by button id
pub type Channels = [u16; BUTTON_COUNT];

/// Illumination state machine
#[derive(Debug, Clone)]
pub struct IlluminationEngine {
    channels: Channels,
    active: Option<ButtonId>,
    dim: DimController,
    fade: FadeSession,
    timing: FadeTiming,
    proximity: bool,
    power_button: ButtonId,
}

impl IlluminationEngine {
    /// Create the engine with every channel lit at the brightest preset
    ///
    /// The lamp test stays up until the first status reply selects a button.
    pub fn new(config: &IlluminationConfig, power_button: ButtonId) -> Self {
        let dim = DimController::new(config.presets);
        Self {
            channels: [dim.level(); BUTTON_COUNT],
            active: None,
            dim,
            fade: FadeSession::Inactive,
            timing: FadeTiming::from(config),
            proximity: false,
            power_button,
        }
    }

    /// Current channel levels
    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Button the receiver last reported
    pub fn active(&self) -> Option<ButtonId> {
        self.active
    }

    /// Current dim preset index
    pub fn dim_index(&self) -> usize {
        self.dim.index()
    }

    /// Current preset brightness
    pub fn preset(&self) -> u16 {
        self.dim.level()
    }

    /// Armed fade
    pub fn fade(&self) -> FadeSession {
        self.fade
    }

    fn power_active(&self) -> bool {
        self.active == Some(self.power_button)
    }

    fn set(&mut self, index: usize, level: u16) -> bool {
        let changed = self.channels[index] != level;
        self.channels[index] = level;
        changed
    }

    fn fill(&mut self, level: u16, except: Option<ButtonId>) -> bool {
        let mut changed = false;
        for button in ButtonId::all() {
            if Some(button) != except {
                changed |= self.set(button.index(), level);
            }
        }
        changed
    }

    /// Sample the proximity sensor
    ///
    /// While asserted every channel is held at the current preset and the
    /// proximity hold restarts, replacing any running fade.
    pub fn proximity(&mut self, asserted: bool, now_ms: u64) -> bool {
        self.proximity = asserted;
        if !asserted {
            return false;
        }

        let level = self.preset();
        self.fade = self
            .fade
            .transition(FadeEvent::ProximityHeld { level }, now_ms, &self.timing);
        self.fill(level, None)
    }

    /// Dim button falling edge
    ///
    /// Always moves to the next preset; the selected button is relit at the
    /// new level unless the receiver is off or nothing is selected yet.
    pub fn dim_pressed(&mut self) -> bool {
        let level = self.dim.advance();
        match self.active {
            Some(button) if button != self.power_button => self.set(button.index(), level),
            _ => false,
        }
    }

    /// Apply a decoded receiver status
    pub fn apply_status(&mut self, status: ReceiverStatus, now_ms: u64) -> bool {
        let level = self.preset();
        match status {
            ReceiverStatus::PoweredOff => {
                let power = self.power_button;
                let mut changed = self.fill(0, Some(power));
                changed |= self.set(power.index(), level);
                self.active = Some(power);
                self.fade = self
                    .fade
                    .transition(FadeEvent::PoweredOff { level }, now_ms, &self.timing);
                changed
            }
            ReceiverStatus::Selected(button) => {
                let mut changed = self.fill(0, Some(button));
                changed |= self.set(button.index(), level);
                self.active = Some(button);
                self.fade = self
                    .fade
                    .transition(FadeEvent::Cancel, now_ms, &self.timing);
                changed
            }
        }
    }

    /// Run one fade step if the armed session is due
    ///
    /// Proximity fades are held while the sensor is asserted.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        if !self.fade.is_due(now_ms) {
            return false;
        }

        let level = match self.fade {
            FadeSession::Inactive => return false,
            FadeSession::Proximity { .. } if self.proximity => return false,
            FadeSession::Proximity { level, .. } => {
                let level = self.timing.step_down(level);
                self.fill(level, self.active);
                level
            }
            FadeSession::PowerOff { level, .. } => {
                let level = self.timing.step_down(level);
                let power = self.power_button;
                self.set(power.index(), level);
                level
            }
        };

        let event = FadeEvent::Stepped {
            level,
            power_active: self.power_active(),
            preset: self.preset(),
        };
        self.fade = self.fade.transition(event, now_ms, &self.timing);
        true
    }
}
