//! Timing and behaviour constants.
//!
//! All values are compile-time defaults; the structs exist so tests and alternative boards can
//! override them. Pin assignment belongs to the firmware binary, not here.

use embassy_time::Duration;

use crate::error::ConfigError;

/// Number of LEDs in the group, and the upper bound of the LED count.
pub const LED_COUNT: usize = 4;

/// Toggle period of the blinking LEDs.
pub const BLINK_PERIOD: Duration = Duration::from_millis(200);

/// How often the button lines are sampled.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Contact must stay stable this long before a press is confirmed.
pub const SETTLE_TIME: Duration = Duration::from_millis(50);

/// Maximum exit/entry cycles a single dispatch may run.
pub const MAX_TRANSITION_DEPTH: u8 = 2;

/// Boot flash: number of on/off cycles and the half period.
pub const BOOT_FLASH_CYCLES: u8 = 10;
pub const BOOT_FLASH_HALF_PERIOD: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FsmConfig {
    pub blink_period: Duration,
    pub max_transition_depth: u8,
}

impl FsmConfig {
    pub const fn new() -> Self {
        Self {
            blink_period: BLINK_PERIOD,
            max_transition_depth: MAX_TRANSITION_DEPTH,
        }
    }

    /// A zero blink period is left to the timer service, which owns that check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_transition_depth == 0 {
            return Err(ConfigError::ZeroTransitionDepth);
        }
        Ok(())
    }
}

impl Default for FsmConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    pub poll_interval: Duration,
    pub settle: Duration,
}

impl DebounceConfig {
    pub const fn new() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            settle: SETTLE_TIME,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.as_ticks() == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Settle window in polling ticks, rounded up, never less than one.
    pub fn settle_ticks(&self) -> u16 {
        let poll = self.poll_interval.as_ticks().max(1);
        let ticks = self.settle.as_ticks().div_ceil(poll).max(1);
        u16::try_from(ticks).unwrap_or(u16::MAX)
    }
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::new()
    }
}
