use anyhow::Context;
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

pub const BUS: Bus = Bus::Spi0;
pub const SLAVE_SELECT: SlaveSelect = SlaveSelect::Ss0;
pub const CLOCK_SPEED: u32 = 1_000_000;
pub const MODE: Mode = Mode::Mode0;

pub const CHANNELS: u8 = 8;
pub const START_BIT: u8 = 0x01;
pub const SINGLE_ENDED: u8 = 0x08;

/// Reads a raw conversion result from one analog channel.
pub trait AnalogInput {
    fn read_raw(&mut self, channel: u8) -> Result<u16, anyhow::Error>;
}

#[derive(Debug)]
pub struct MCP3008 {
    spi: Spi,
}

impl MCP3008 {
    pub fn new() -> Result<MCP3008, anyhow::Error> {
        let spi = Spi::new(BUS, SLAVE_SELECT, CLOCK_SPEED, MODE)
            .context("Failed to initialize SPI")?;

        Ok(MCP3008 { spi })
    }
}

impl AnalogInput for MCP3008 {
    fn read_raw(&mut self, channel: u8) -> Result<u16, anyhow::Error> {
        let command = read_command(channel)?;

        let mut response = [0u8; 3];
        self.spi
            .transfer(&mut response, &command)
            .context("Failed to transfer SPI frame")?;

        Ok(decode_response(&response))
    }
}

pub fn read_command(channel: u8) -> Result<[u8; 3], anyhow::Error> {
    if channel >= CHANNELS {
        return Err(anyhow::anyhow!(
            "Invalid channel: expected 0..{}, got {}",
            CHANNELS,
            channel
        ));
    }

    Ok([START_BIT, (SINGLE_ENDED | channel) << 4, 0x00])
}

pub fn decode_response(response: &[u8; 3]) -> u16 {
    (((response[1] & 0x03) as u16) << 8) | response[2] as u16
}
