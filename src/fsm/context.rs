use super::signal::{EventStatus, State};
use crate::config::LED_COUNT;

/// Highest LED count the application accepts.
pub const MAX_LEDS: u8 = LED_COUNT as u8;

/// Mutable session state owned by [`Fsm`](super::Fsm).
///
/// Handlers get it by `&mut` and can only change the LED count (within `0..=MAX_LEDS`) or
/// request a new active state through [`transition_to`](Self::transition_to).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AppContext {
    active_state: State,
    led_count: u8,
}

impl AppContext {
    pub const fn new() -> Self {
        Self {
            active_state: State::Idle,
            led_count: 0,
        }
    }

    pub const fn active_state(&self) -> State {
        self.active_state
    }

    pub const fn led_count(&self) -> u8 {
        self.led_count
    }

    /// Selects `target` as the next active state.
    pub fn transition_to(&mut self, target: State) -> EventStatus {
        self.active_state = target;
        EventStatus::Transition
    }

    /// Returns `false` when already at [`MAX_LEDS`].
    pub fn increment(&mut self) -> bool {
        if self.led_count < MAX_LEDS {
            self.led_count += 1;
            true
        } else {
            false
        }
    }

    /// Returns `false` when already at zero.
    pub fn decrement(&mut self) -> bool {
        if self.led_count > 0 {
            self.led_count -= 1;
            true
        } else {
            false
        }
    }
}
