//! Board boundaries and their `embedded-hal` / `embedded-graphics` adapters.

pub mod gpio_button;
pub mod gpio_led;
pub mod led_group;
pub mod status_view;
pub mod traits;

pub use gpio_button::GpioButton;
pub use gpio_led::GpioLed;
pub use led_group::LedGroup;
pub use status_view::StatusView;
pub use traits::{Board, Button, Led, LedBank, StatusOutput};
