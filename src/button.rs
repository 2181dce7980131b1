use anyhow::Context as _;
use rppal::gpio::{Gpio, InputPin};

pub const DUMP_BUTTON_PIN: u8 = 17;

pub trait DumpButton {
    /// Current level of the button. No debouncing or edge detection.
    fn is_pressed(&self) -> bool;
}

/// Momentary switch to ground on an input with the internal pull-up enabled.
#[derive(Debug)]
pub struct GpioButton {
    pin: InputPin,
}

impl GpioButton {
    pub fn new(gpio: &Gpio) -> Result<GpioButton, anyhow::Error> {
        let pin = gpio
            .get(DUMP_BUTTON_PIN)
            .context("Failed to acquire button pin")?
            .into_input_pullup();

        Ok(GpioButton { pin })
    }
}

impl DumpButton for GpioButton {
    fn is_pressed(&self) -> bool {
        self.pin.is_low()
    }
}
