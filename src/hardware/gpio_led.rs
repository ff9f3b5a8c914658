use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, StatefulOutputPin};

use super::traits::Led;

/// LED wired between the supply and the pin: driving the pin low lights it.
pub struct GpioLed<P> {
    pin: P,
}

impl<P> GpioLed<P>
where
    P: StatefulOutputPin + ErrorType<Error = Infallible>,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    pub fn is_on(&mut self) -> bool {
        self.pin.is_set_low().unwrap_or_else(|never| match never {})
    }
}

impl<P> Led for GpioLed<P>
where
    P: StatefulOutputPin + ErrorType<Error = Infallible>,
{
    fn on(&mut self) {
        self.pin.set_low().unwrap_or_else(|never| match never {});
    }

    fn off(&mut self) {
        self.pin.set_high().unwrap_or_else(|never| match never {});
    }

    fn toggle(&mut self) {
        self.pin.toggle().unwrap_or_else(|never| match never {});
    }
}
