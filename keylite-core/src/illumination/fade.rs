//! Fade-out sessions
//!
//! At most one fade runs at a time. A proximity fade dims every button
//! except the selected one after the sensor clears. A power-off fade dims
//! only the power button after the receiver switches off. All session
//! changes go through [`FadeSession::transition`].

use crate::config::IlluminationConfig;

/// Fade timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FadeTiming {
    /// Brightness removed per step
    pub step: u16,
    /// Time between steps (ms)
    pub interval_ms: u32,
    /// Hold before a proximity fade starts (ms)
    pub proximity_hold_ms: u32,
    /// Hold before a power-off fade starts (ms)
    pub power_off_hold_ms: u32,
}

impl Default for FadeTiming {
    fn default() -> Self {
        Self::from(&IlluminationConfig::default())
    }
}

impl From<&IlluminationConfig> for FadeTiming {
    fn from(config: &IlluminationConfig) -> Self {
        Self {
            step: config.fade_step,
            interval_ms: config.fade_interval_ms,
            proximity_hold_ms: config.proximity_hold_ms,
            power_off_hold_ms: config.power_off_hold_ms,
        }
    }
}

impl FadeTiming {
    /// Next level down; anything below one step snaps to 0
    pub fn step_down(&self, level: u16) -> u16 {
        let next = level.saturating_sub(self.step);
        if next < self.step {
            0
        } else {
            next
        }
    }
}

/// The single armed fade, if any
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeSession {
    #[default]
    Inactive,
    /// Dimming every button except the selected one
    Proximity { deadline_ms: u64, level: u16 },
    /// Dimming the power button
    PowerOff { deadline_ms: u64, level: u16 },
}

/// Inputs that move a fade session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FadeEvent {
    /// Proximity is asserted; everything is lit at `level`
    ProximityHeld { level: u16 },
    /// The receiver powered off; the power button is lit at `level`
    PoweredOff { level: u16 },
    /// A source was selected
    Cancel,
    /// A step was applied and the lights now sit at `level`
    Stepped {
        level: u16,
        /// The power button is the selected button
        power_active: bool,
        /// Level a follow-up power-off fade starts from
        preset: u16,
    },
}

impl FadeSession {
    /// True unless inactive
    pub fn is_active(&self) -> bool {
        !matches!(self, FadeSession::Inactive)
    }

    /// Deadline of the next step
    pub fn deadline_ms(&self) -> Option<u64> {
        match *self {
            FadeSession::Inactive => None,
            FadeSession::Proximity { deadline_ms, .. } | FadeSession::PowerOff { deadline_ms, .. } => {
                Some(deadline_ms)
            }
        }
    }

    /// Current fade level
    pub fn level(&self) -> Option<u16> {
        match *self {
            FadeSession::Inactive => None,
            FadeSession::Proximity { level, .. } | FadeSession::PowerOff { level, .. } => Some(level),
        }
    }

    /// True once the deadline has passed
    pub fn is_due(&self, now_ms: u64) -> bool {
        self.deadline_ms().is_some_and(|deadline| now_ms > deadline)
    }

    /// Compute the session following `event` at `now_ms`
    pub fn transition(self, event: FadeEvent, now_ms: u64, timing: &FadeTiming) -> FadeSession {
        match (self, event) {
            (_, FadeEvent::ProximityHeld { level }) => FadeSession::Proximity {
                deadline_ms: now_ms + u64::from(timing.proximity_hold_ms),
                level,
            },
            (_, FadeEvent::PoweredOff { level }) => FadeSession::PowerOff {
                deadline_ms: now_ms + u64::from(timing.power_off_hold_ms),
                level,
            },
            (_, FadeEvent::Cancel) => FadeSession::Inactive,
            (FadeSession::Inactive, FadeEvent::Stepped { .. }) => FadeSession::Inactive,
            (FadeSession::Proximity { .. }, FadeEvent::Stepped { level, .. }) if level > 0 => {
                FadeSession::Proximity {
                    deadline_ms: now_ms + u64::from(timing.interval_ms),
                    level,
                }
            }
            (FadeSession::PowerOff { .. }, FadeEvent::Stepped { level, .. }) if level > 0 => {
                FadeSession::PowerOff {
                    deadline_ms: now_ms + u64::from(timing.interval_ms),
                    level,
                }
            }
            // Proximity fade finished while the receiver is off: let the
            // power button go through its own hold and fade
            (
                FadeSession::Proximity { .. },
                FadeEvent::Stepped {
                    power_active: true,
                    preset,
                    ..
                },
            ) => FadeSession::PowerOff {
                deadline_ms: now_ms + u64::from(timing.power_off_hold_ms),
                level: preset,
            },
            (_, FadeEvent::Stepped { .. }) => FadeSession::Inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> FadeTiming {
        FadeTiming::default()
    }

    #[test]
    fn test_step_down_clamps() {
        let t = timing();
        assert_eq!(t.step_down(65535), 64535);
        assert_eq!(t.step_down(2000), 1000);
        assert_eq!(t.step_down(1999), 0);
        assert_eq!(t.step_down(1000), 0);
        assert_eq!(t.step_down(2001), 1001);
        assert_eq!(t.step_down(0), 0);
    }

    #[test]
    fn test_proximity_replaces_power_off() {
        let t = timing();
        let session = FadeSession::Inactive.transition(FadeEvent::PoweredOff { level: 100 }, 0, &t);
        assert_eq!(
            session,
            FadeSession::PowerOff {
                deadline_ms: 1000,
                level: 100
            }
        );

        let session = session.transition(FadeEvent::ProximityHeld { level: 65535 }, 10, &t);
        assert_eq!(
            session,
            FadeSession::Proximity {
                deadline_ms: 3010,
                level: 65535
            }
        );
    }

    #[test]
    fn test_is_due_is_strict() {
        let session = FadeSession::Proximity {
            deadline_ms: 100,
            level: 5000,
        };
        assert!(!session.is_due(100));
        assert!(session.is_due(101));
        assert!(!FadeSession::Inactive.is_due(u64::MAX));
    }

    #[test]
    fn test_step_reschedules() {
        let t = timing();
        let session = FadeSession::PowerOff {
            deadline_ms: 0,
            level: 5000,
        };
        let next = session.transition(
            FadeEvent::Stepped {
                level: 4000,
                power_active: true,
                preset: 65535,
            },
            50,
            &t,
        );
        assert_eq!(
            next,
            FadeSession::PowerOff {
                deadline_ms: 65,
                level: 4000
            }
        );
    }

    #[test]
    fn test_proximity_completion_hands_off() {
        let t = timing();
        let session = FadeSession::Proximity {
            deadline_ms: 0,
            level: 1000,
        };
        let stepped = |power_active| FadeEvent::Stepped {
            level: 0,
            power_active,
            preset: 20000,
        };

        assert_eq!(
            session.transition(stepped(true), 500, &t),
            FadeSession::PowerOff {
                deadline_ms: 1500,
                level: 20000
            }
        );
        assert_eq!(
            session.transition(stepped(false), 500, &t),
            FadeSession::Inactive
        );
    }

    #[test]
    fn test_power_off_completion_ends() {
        let t = timing();
        let session = FadeSession::PowerOff {
            deadline_ms: 0,
            level: 1000,
        };
        let event = FadeEvent::Stepped {
            level: 0,
            power_active: true,
            preset: 65535,
        };
        assert_eq!(session.transition(event, 10, &t), FadeSession::Inactive);
    }

    #[test]
    fn test_cancel() {
        let session = FadeSession::Proximity {
            deadline_ms: 9,
            level: 9,
        };
        assert_eq!(
            session.transition(FadeEvent::Cancel, 0, &timing()),
            FadeSession::Inactive
        );
    }
}
