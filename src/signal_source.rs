//! Buttons to application signals.

use heapless::Vec;

use crate::config::DebounceConfig;
use crate::debounce::{Debouncer, PressEvent};
use crate::error::ConfigError;
use crate::fsm::Signal;
use crate::hardware::traits::Button;

/// Physical button position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonId {
    One,
    Two,
    Three,
    Four,
}

impl ButtonId {
    pub const COUNT: usize = 4;

    pub const ALL: [ButtonId; Self::COUNT] =
        [ButtonId::One, ButtonId::Two, ButtonId::Three, ButtonId::Four];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which signal each button produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMap {
    signals: [Signal; ButtonId::COUNT],
}

impl ButtonMap {
    /// Only the external signals may be bound to buttons.
    pub fn new(signals: [Signal; ButtonId::COUNT]) -> Result<Self, ConfigError> {
        if let Some(&internal) = signals.iter().find(|signal| signal.is_internal()) {
            return Err(ConfigError::InternalSignal(internal));
        }
        Ok(Self { signals })
    }

    pub fn translate(&self, button: ButtonId, _press: PressEvent) -> Signal {
        self.signals[button.index()]
    }
}

impl Default for ButtonMap {
    fn default() -> Self {
        Self {
            signals: [Signal::Inc, Signal::Dec, Signal::StartPause, Signal::Abort],
        }
    }
}

/// Four buttons, one debouncer each, and the mapping to signals.
pub struct SignalSource<B> {
    buttons: [B; ButtonId::COUNT],
    filters: [Debouncer; ButtonId::COUNT],
    map: ButtonMap,
}

impl<B: Button> SignalSource<B> {
    pub fn new(buttons: [B; ButtonId::COUNT], map: ButtonMap, debounce: &DebounceConfig) -> Self {
        Self {
            buttons,
            filters: core::array::from_fn(|_| Debouncer::from_config(debounce)),
            map,
        }
    }

    /// Samples every button once; returns the signals confirmed on this tick in button order.
    pub fn poll(&mut self) -> Vec<Signal, { ButtonId::COUNT }> {
        let mut signals = Vec::new();
        for id in ButtonId::ALL {
            let level = self.buttons[id.index()].is_pressed();
            if let Some(press) = self.filters[id.index()].sample(level) {
                let signal = self.map.translate(id, press);
                debug!("button {} pressed: {}", id, signal);
                // one slot per button, cannot overflow
                let _ = signals.push(signal);
            }
        }
        signals
    }

    pub fn buttons_mut(&mut self) -> &mut [B; ButtonId::COUNT] {
        &mut self.buttons
    }
}
