use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

use super::traits::Button;

/// Button shorting the pin to ground, read with the internal pull-up enabled.
pub struct GpioButton<P> {
    pin: P,
}

impl<P> GpioButton<P>
where
    P: InputPin + ErrorType<Error = Infallible>,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P> Button for GpioButton<P>
where
    P: InputPin + ErrorType<Error = Infallible>,
{
    fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or_else(|never| match never {})
    }
}
