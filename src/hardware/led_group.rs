use super::traits::{Led, LedBank};

/// A fixed group of LEDs addressed by position.
pub struct LedGroup<L, const N: usize> {
    leds: [L; N],
}

impl<L: Led, const N: usize> LedGroup<L, N> {
    pub fn new(leds: [L; N]) -> Self {
        Self { leds }
    }

    pub fn all_on(&mut self) {
        self.leds.iter_mut().for_each(Led::on);
    }

    pub fn all_off(&mut self) {
        self.leds.iter_mut().for_each(Led::off);
    }

    pub fn leds_mut(&mut self) -> &mut [L; N] {
        &mut self.leds
    }

    fn with(&mut self, index: usize, action: fn(&mut L)) {
        match self.leds.get_mut(index) {
            Some(led) => action(led),
            None => warn!("led index {} outside group of {}", index, N),
        }
    }
}

impl<L: Led, const N: usize> LedBank for LedGroup<L, N> {
    fn set_led(&mut self, index: usize) {
        self.with(index, Led::on);
    }

    fn clear_led(&mut self, index: usize) {
        self.with(index, Led::off);
    }

    fn toggle_led(&mut self, index: usize) {
        self.with(index, Led::toggle);
    }
}
