use std::fmt::Debug;

use anyhow::Context as _;
use embedded_graphics::{
    mono_font::{
        MonoFont, MonoTextStyle,
        iso_8859_1::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use rppal::i2c::I2c;
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

pub const HEADER: &str = "Temperature";
pub const UNIT_LABEL: &str = "°C";

pub const HEADER_POSITION: Point = Point::zero();
pub const VALUE_POSITION: Point = Point::new(24, 24);
pub const UNIT_POSITION: Point = Point::new(70, 24);

pub const HEADER_FONT: &MonoFont<'static> = &FONT_6X10;
pub const VALUE_FONT: &MonoFont<'static> = &FONT_10X20;

/// A monochrome frame buffer that is pushed to the glass on `flush`.
pub trait Panel: DrawTarget<Color = BinaryColor> {
    fn init(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error>;
}

pub type Oled =
    Ssd1306<I2CInterface<I2c>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

impl Panel for Oled {
    fn init(&mut self) -> Result<(), Self::Error> {
        DisplayConfig::init(self)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ssd1306::flush(self)
    }
}

pub fn open_oled() -> Result<Oled, anyhow::Error> {
    let i2c = I2c::new().context("Failed to initialize I2C")?;
    let interface = I2CDisplayInterface::new(i2c);

    Ok(Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode())
}

#[derive(Debug)]
pub struct Screen<P> {
    panel: P,
}

impl<P> Screen<P>
where
    P: Panel,
    P::Error: Debug,
{
    pub fn new(panel: P) -> Screen<P> {
        Screen { panel }
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        self.panel
            .init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize display: {e:?}"))
    }

    /// Clears the panel and draws the parts that never change.
    pub fn draw_layout(&mut self) -> Result<(), anyhow::Error> {
        self.panel
            .clear(BinaryColor::Off)
            .map_err(|e| anyhow::anyhow!("Failed to clear display: {e:?}"))?;
        self.draw_text(HEADER, HEADER_POSITION, HEADER_FONT, BinaryColor::On)?;
        self.draw_text(UNIT_LABEL, UNIT_POSITION, VALUE_FONT, BinaryColor::On)?;
        self.flush()
    }

    pub fn show(&mut self, text: &str) -> Result<(), anyhow::Error> {
        self.draw_text(text, VALUE_POSITION, VALUE_FONT, BinaryColor::On)?;
        self.flush()
    }

    /// Redraws `text` in the background colour, leaving the value field blank.
    pub fn erase(&mut self, text: &str) -> Result<(), anyhow::Error> {
        self.draw_text(text, VALUE_POSITION, VALUE_FONT, BinaryColor::Off)?;
        self.flush()
    }

    fn draw_text(
        &mut self,
        text: &str,
        position: Point,
        font: &MonoFont<'_>,
        color: BinaryColor,
    ) -> Result<(), anyhow::Error> {
        let style = MonoTextStyle::new(font, color);
        Text::with_baseline(text, position, style, Baseline::Top)
            .draw(&mut self.panel)
            .map_err(|e| anyhow::anyhow!("Failed to draw {text:?}: {e:?}"))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), anyhow::Error> {
        self.panel
            .flush()
            .map_err(|e| anyhow::anyhow!("Failed to flush display: {e:?}"))
    }

    #[cfg(test)]
    pub fn panel(&self) -> &P {
        &self.panel
    }
}
