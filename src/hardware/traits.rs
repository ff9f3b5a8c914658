use crate::timer::BlinkTimer;

/// A single LED.
pub trait Led {
    fn on(&mut self);
    fn off(&mut self);
    fn toggle(&mut self);
}

/// A single push button line.
pub trait Button {
    /// Raw, undebounced level: `true` while the contact is closed.
    fn is_pressed(&mut self) -> bool;
}

/// An indexed group of LEDs. Indices outside the group are ignored.
pub trait LedBank {
    fn set_led(&mut self, index: usize);
    fn clear_led(&mut self, index: usize);
    fn toggle_led(&mut self, index: usize);
}

/// Fire-and-forget status text (log, display, ...).
pub trait StatusOutput {
    fn emit(&mut self, message: &str);
}

/// Everything a state handler may touch besides the application context.
pub trait Board: LedBank + BlinkTimer + StatusOutput {}

impl<T: LedBank + BlinkTimer + StatusOutput + ?Sized> Board for T {}
