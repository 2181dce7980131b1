use anyhow::Context as _;
use rppal::gpio::{Gpio, OutputPin};

pub const RED_PIN: u8 = 22;
pub const GREEN_PIN: u8 = 23;
pub const BLUE_PIN: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Off,
    /// Storage missing, or the log file could not be opened.
    Red,
    /// Storage mounted.
    Green,
    /// Sample written to the log.
    Blue,
    /// Log being dumped to the serial console.
    Magenta,
}

impl Color {
    /// Which of the red, green and blue dies are lit.
    pub fn channels(self) -> (bool, bool, bool) {
        match self {
            Color::Off => (false, false, false),
            Color::Red => (true, false, false),
            Color::Green => (false, true, false),
            Color::Blue => (false, false, true),
            Color::Magenta => (true, false, true),
        }
    }
}

pub trait StatusLed {
    fn set(&mut self, color: Color);
}

/// Common-cathode RGB LED, one GPIO per die.
#[derive(Debug)]
pub struct RgbLed {
    red: OutputPin,
    green: OutputPin,
    blue: OutputPin,
}

impl RgbLed {
    pub fn new(gpio: &Gpio) -> Result<RgbLed, anyhow::Error> {
        let red = gpio
            .get(RED_PIN)
            .context("Failed to acquire red LED pin")?
            .into_output_low();
        let green = gpio
            .get(GREEN_PIN)
            .context("Failed to acquire green LED pin")?
            .into_output_low();
        let blue = gpio
            .get(BLUE_PIN)
            .context("Failed to acquire blue LED pin")?
            .into_output_low();

        Ok(RgbLed { red, green, blue })
    }
}

impl StatusLed for RgbLed {
    fn set(&mut self, color: Color) {
        let (red, green, blue) = color.channels();
        self.red.write(red.into());
        self.green.write(green.into());
        self.blue.write(blue.into());
    }
}
