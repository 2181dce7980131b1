use anyhow::Context as _;

use crate::{conversion::Transfer, mcp3008::AnalogInput, measurement::Reading};

/// MCP3008 input the TMP36 output is wired to.
pub const SENSOR_CHANNEL: u8 = 0;

#[derive(Debug)]
pub struct Sensor<A> {
    adc: A,
    channel: u8,
    transfer: Transfer,
}

impl<A: AnalogInput> Sensor<A> {
    pub fn new(adc: A, channel: u8, transfer: Transfer) -> Sensor<A> {
        Sensor {
            adc,
            channel,
            transfer,
        }
    }

    /// One throwaway conversion, so a missing converter shows up before the loop starts.
    pub fn probe(&mut self) -> Result<u16, anyhow::Error> {
        self.adc
            .read_raw(self.channel)
            .with_context(|| format!("Failed to probe ADC channel {}", self.channel))
    }

    pub fn measure(&mut self) -> Result<Reading, anyhow::Error> {
        let raw = self
            .adc
            .read_raw(self.channel)
            .context("Failed to read temperature sensor")?;

        Ok(Reading::new(self.transfer.celsius(raw)))
    }
}
