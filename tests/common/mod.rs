#![allow(dead_code)]

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_time::Duration;
use led_fsm::fsm::{Fsm, Signal};
use led_fsm::hardware::{LedBank, StatusOutput};
use led_fsm::timer::{BlinkControl, BlinkTimer};
use led_fsm::{FsmConfig, TimerError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Set(usize),
    Clear(usize),
    Toggle(usize),
    TimerCreate(Duration),
    TimerStart(u8),
    TimerStop,
    Emit(String),
}

/// Board double: records every boundary call, tracks LED levels and runs a real blink
/// timer so tests can fire its callback.
#[derive(Default)]
pub struct RecordingBoard {
    pub events: Vec<Event>,
    pub lit: [bool; 4],
    pub timer: BlinkControl<NoopRawMutex>,
}

impl RecordingBoard {
    pub fn messages(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                Event::Emit(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear_log(&mut self) {
        self.events.clear();
    }

    /// One period of the blink timer; returns whether the callback ran.
    pub fn tick(&mut self) -> bool {
        let mut toggled = Vec::new();
        let fired = self.timer.fire(|led_count| toggled.extend(0..usize::from(led_count)));
        for index in toggled {
            self.toggle_led(index);
        }
        fired
    }
}

impl LedBank for RecordingBoard {
    fn set_led(&mut self, index: usize) {
        self.events.push(Event::Set(index));
        if let Some(led) = self.lit.get_mut(index) {
            *led = true;
        }
    }

    fn clear_led(&mut self, index: usize) {
        self.events.push(Event::Clear(index));
        if let Some(led) = self.lit.get_mut(index) {
            *led = false;
        }
    }

    fn toggle_led(&mut self, index: usize) {
        self.events.push(Event::Toggle(index));
        if let Some(led) = self.lit.get_mut(index) {
            *led = !*led;
        }
    }
}

impl BlinkTimer for RecordingBoard {
    fn create(&mut self, period: Duration) -> Result<(), TimerError> {
        self.events.push(Event::TimerCreate(period));
        self.timer.create(period)
    }

    fn start(&mut self, led_count: u8) -> Result<(), TimerError> {
        self.events.push(Event::TimerStart(led_count));
        self.timer.start(led_count)
    }

    fn stop(&mut self) {
        self.events.push(Event::TimerStop);
        self.timer.stop();
    }
}

impl StatusOutput for RecordingBoard {
    fn emit(&mut self, message: &str) {
        self.events.push(Event::Emit(message.to_owned()));
    }
}

/// Started machine in IDLE with an empty log.
pub fn started() -> Fsm<RecordingBoard> {
    let mut fsm = Fsm::new(RecordingBoard::default(), &FsmConfig::default()).unwrap();
    fsm.start();
    fsm.board_mut().clear_log();
    fsm
}

/// Started machine in LED_SET with `count` LEDs selected and an empty log.
pub fn in_led_set(count: u8) -> Fsm<RecordingBoard> {
    let mut fsm = started();
    fsm.dispatch(Signal::Inc);
    for _ in 0..count {
        fsm.dispatch(Signal::Inc);
    }
    fsm.board_mut().clear_log();
    fsm
}

pub fn position(events: &[Event], wanted: &Event) -> usize {
    events
        .iter()
        .position(|event| event == wanted)
        .unwrap_or_else(|| panic!("{wanted:?} not in {events:?}"))
}
