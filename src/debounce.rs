//! Per-button contact debouncing.
//!
//! ```text
//!  NotPressed --contact--> Bounce --stable for settle ticks--> Pressed (emit PressEvent)
//!      ^                     |                                   |
//!      +----level changed----+                                release
//!      |                                                         v
//!      +-------------stable for settle ticks---------------- Bounce
//! ```
//!
//! Chatter while releasing falls back to `Pressed`, never to `NotPressed`, so it cannot produce
//! a second press.

use crate::config::DebounceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    NotPressed,
    Bounce,
    Pressed,
}

/// A confirmed press. Releases are never reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressEvent;

#[derive(Debug, Clone)]
pub struct Debouncer {
    state: DebounceState,
    last_level: bool,
    /// a press was reported and its release is not confirmed yet
    latched: bool,
    stable_ticks: u16,
    settle_ticks: u16,
}

impl Debouncer {
    /// `settle_ticks` consecutive samples after first contact confirm a press. Zero is
    /// treated as one.
    pub const fn new(settle_ticks: u16) -> Self {
        Self {
            state: DebounceState::NotPressed,
            last_level: false,
            latched: false,
            stable_ticks: 0,
            settle_ticks: if settle_ticks == 0 { 1 } else { settle_ticks },
        }
    }

    pub fn from_config(config: &DebounceConfig) -> Self {
        Self::new(config.settle_ticks())
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Feed one raw sample (`true` = contact closed).
    pub fn sample(&mut self, pressed: bool) -> Option<PressEvent> {
        let changed = pressed != self.last_level;
        self.last_level = pressed;

        match self.state {
            DebounceState::NotPressed => {
                if pressed {
                    self.state = DebounceState::Bounce;
                    self.stable_ticks = 0;
                }
                None
            }
            DebounceState::Pressed => {
                if !pressed {
                    self.state = DebounceState::Bounce;
                    self.stable_ticks = 0;
                }
                None
            }
            DebounceState::Bounce if changed => {
                // unstable inside the settle window: back to the last confirmed level
                self.state = if self.latched {
                    DebounceState::Pressed
                } else {
                    DebounceState::NotPressed
                };
                self.stable_ticks = 0;
                None
            }
            DebounceState::Bounce => {
                self.stable_ticks = self.stable_ticks.saturating_add(1);
                if self.stable_ticks < self.settle_ticks {
                    return None;
                }
                if self.latched {
                    self.latched = false;
                    self.state = DebounceState::NotPressed;
                    None
                } else {
                    self.latched = true;
                    self.state = DebounceState::Pressed;
                    Some(PressEvent)
                }
            }
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::from_config(&DebounceConfig::default())
    }
}
