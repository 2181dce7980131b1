use std::{fmt::Debug, io::Write, time::Duration};

use crate::{
    button::DumpButton,
    display::{Panel, Screen},
    mcp3008::AnalogInput,
    measurement::Reading,
    sensor::Sensor,
    status::{Color, StatusLed},
    storage::{Append, DataLog, Dump, Medium},
};

/// Everything one refresh cycle touches.
///
/// A cycle is split around the hold: [`Station::present`] samples and draws
/// the value, [`Station::settle`] erases it, logs it and polls the dump button.
#[derive(Debug)]
pub struct Station<A, P, L, B, M, W> {
    pub sensor: Sensor<A>,
    pub screen: Screen<P>,
    pub led: L,
    pub button: B,
    pub log: DataLog<M>,
    pub console: W,
}

impl<A, P, L, B, M, W> Station<A, P, L, B, M, W>
where
    A: AnalogInput,
    P: Panel,
    P::Error: Debug,
    L: StatusLed,
    B: DumpButton,
    M: Medium,
    W: Write,
{
    /// Runs one full cycle, keeping the value on screen for `hold` before it
    /// is erased. A failed sample skips the cycle but still waits.
    pub async fn cycle(&mut self, hold: Duration) -> Option<Append> {
        let reading = match self.present() {
            Ok(reading) => reading,
            Err(e) => {
                log::error!("{e:#}");
                tokio::time::sleep(hold).await;
                return None;
            }
        };

        tokio::time::sleep(hold).await;

        Some(self.settle(&reading))
    }

    pub fn present(&mut self) -> Result<Reading, anyhow::Error> {
        let reading = self.sensor.measure()?;
        if let Err(e) = self.screen.show(reading.as_str()) {
            log::error!("{e}");
        }
        Ok(reading)
    }

    pub fn settle(&mut self, reading: &Reading) -> Append {
        if let Err(e) = self.screen.erase(reading.as_str()) {
            log::error!("{e}");
        }

        let appended = self.log.append_line(reading.as_str(), &mut self.led);
        match appended {
            Append::Written => log::debug!("Logged {reading} ({:.3} °C)", reading.celsius),
            Append::Failed => log::warn!("Sample {reading} not logged"),
            Append::Skipped => {}
        }

        if self.button.is_pressed() {
            self.led.set(Color::Magenta);
            self.dump();
        } else {
            self.led.set(Color::Off);
        }

        appended
    }

    fn dump(&mut self) {
        log::info!("Dumping {} to serial console", self.log.name());
        match self.log.dump(&mut self.console) {
            Ok(Dump::Sent(bytes)) => log::info!("Dumped {bytes} bytes"),
            Ok(Dump::OpenFailed) => {}
            Err(e) => log::error!("Failed to write to serial console: {e}"),
        }
    }
}
