use core::fmt;

/// Input to the state machine.
///
/// `Entry` and `Exit` are produced only by the dispatcher around a transition; the other four
/// come from debounced buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Signal {
    Entry,
    Exit,
    Inc,
    Dec,
    StartPause,
    Abort,
}

impl Signal {
    pub const COUNT: usize = 6;

    /// Every signal, in table column order.
    pub const ALL: [Signal; Self::COUNT] = [
        Signal::Entry,
        Signal::Exit,
        Signal::Inc,
        Signal::Dec,
        Signal::StartPause,
        Signal::Abort,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_internal(self) -> bool {
        matches!(self, Signal::Entry | Signal::Exit)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Signal::Entry => "ENTRY",
            Signal::Exit => "EXIT",
            Signal::Inc => "INC",
            Signal::Dec => "DEC",
            Signal::StartPause => "START_PAUSE",
            Signal::Abort => "ABRT",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mode of operation. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    #[default]
    Idle,
    LedSet,
    Blink,
    Pause,
}

impl State {
    pub const COUNT: usize = 4;

    /// Every state, in table row order.
    pub const ALL: [State; Self::COUNT] = [State::Idle, State::LedSet, State::Blink, State::Pause];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            State::Idle => "IDLE",
            State::LedSet => "LED_SET",
            State::Blink => "BLINK",
            State::Pause => "PAUSE",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of handling one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventStatus {
    /// Acted on, no state change.
    Handled,
    /// Meaningless in this state; nothing changed.
    Ignored,
    /// The handler selected a new active state.
    Transition,
}
