use core::fmt::Write;

use embedded_graphics::{
    mono_font::{MonoTextStyleBuilder, ascii::FONT_6X10, ascii::FONT_8X13},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use heapless::String;

use crate::config::LED_COUNT;
use crate::fsm::State;

/// Indicator box edge, and the horizontal pitch between boxes.
const BOX_SIZE: u32 = 10;
const BOX_PITCH: i32 = 14;
const BOX_ROW_Y: i32 = 52;

/// One frame of the status screen: active state, LED count, last message and one box per
/// LED (filled when selected).
pub struct StatusView<'a> {
    pub state: State,
    pub led_count: u8,
    pub message: &'a str,
}

impl StatusView<'_> {
    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let title_style = MonoTextStyleBuilder::new()
            .font(&FONT_8X13)
            .text_color(BinaryColor::On)
            .build();
        let small_style = MonoTextStyleBuilder::new()
            .font(&FONT_6X10)
            .text_color(BinaryColor::On)
            .build();

        Text::with_baseline(self.state.name(), Point::new(0, 0), title_style, Baseline::Top)
            .draw(target)?;

        let mut count_buf: String<12> = String::new();
        let _ = write!(count_buf, "LEDs: {}", self.led_count);
        Text::with_baseline(&count_buf, Point::new(0, 16), small_style, Baseline::Top)
            .draw(target)?;

        Text::with_baseline(self.message, Point::new(0, 32), small_style, Baseline::Top)
            .draw(target)?;

        for index in 0..LED_COUNT {
            let style = if index < usize::from(self.led_count) {
                PrimitiveStyle::with_fill(BinaryColor::On)
            } else {
                PrimitiveStyle::with_stroke(BinaryColor::On, 1)
            };
            Rectangle::new(
                Point::new(index as i32 * BOX_PITCH, BOX_ROW_Y),
                Size::new(BOX_SIZE, BOX_SIZE),
            )
            .into_styled(style)
            .draw(target)?;
        }

        Ok(())
    }
}
