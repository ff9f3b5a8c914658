use crate::fsm::Signal;

/// Failures of the blink timer service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    #[error("blink timer period must be non-zero")]
    ZeroPeriod,
    #[error("blink timer started before it was created")]
    NotCreated,
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("debounce poll interval must be non-zero")]
    ZeroPollInterval,
    #[error("transition depth must allow at least one exit/entry cycle")]
    ZeroTransitionDepth,
    #[error("internal signal {0} cannot be bound to a button")]
    InternalSignal(Signal),
}

/// Startup failures of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsmError {
    #[error("timer service: {0}")]
    Timer(#[from] TimerError),
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}
