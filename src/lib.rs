//! LED pattern controller driven by a table-dispatched finite state machine.
//!
//! Four buttons (INC, DEC, START/PAUSE, ABORT) select how many of four LEDs are lit and
//! start or pause blinking them. The crate is `no_std`; everything except the `led_fsm`
//! firmware binary builds and tests on the host.
//!
//! Layers, leaf first:
//! - [`debounce`]: raw line level to clean press events
//! - [`signal_source`]: press events to application [`Signal`]s
//! - [`fsm`]: state table, per-state handlers and the dispatcher
//! - [`timer`]: the periodic blink service used by the BLINK state
//! - [`hardware`]: board boundaries and `embedded-hal` / `embedded-graphics` adapters

#![cfg_attr(not(test), no_std)]

// must stay first so the logging macros are visible to every module below
mod fmt;

pub mod config;
pub mod debounce;
pub mod error;
pub mod fsm;
pub mod hardware;
pub mod signal_source;
pub mod timer;

pub use config::{DebounceConfig, FsmConfig};
pub use error::{ConfigError, FsmError, TimerError};
pub use fsm::{AppContext, EventStatus, Fsm, Signal, State, StateTable};
