use std::time::Duration;

use anyhow::Context;
use backon::BlockingRetryable;
use backon::ConstantBuilder;
use button::GpioButton;
use console::SerialConsole;
use conversion::Transfer;
use display::Screen;
use log::LevelFilter;
use mcp3008::MCP3008;
use rppal::gpio::Gpio;
use sensor::{SENSOR_CHANNEL, Sensor};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use station::Station;
use status::RgbLed;
use storage::{DataLog, LOG_FILE, MOUNT_POINT, SdCard};

mod button;
mod console;
mod conversion;
mod display;
mod mcp3008;
mod measurement;
mod sensor;
mod station;
mod status;
mod storage;
#[cfg(test)]
mod testing;

/// Time a value stays on screen before it is erased and logged.
pub const REFRESH_PERIOD: Duration = Duration::from_secs(1);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    TermLogger::init(
        LevelFilter::Info,
        ConfigBuilder::new()
            .set_time_format_rfc3339()
            .set_time_offset_to_local()
            .map_err(|_| anyhow::anyhow!("Failed to set time offset to local"))?
            .build(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logger")?;

    if let Err(e) = run().await {
        log::error!("{e:#}");
    }

    Ok(())
}

pub async fn run() -> Result<(), anyhow::Error> {
    let retry_builder = ConstantBuilder::default()
        .with_delay(Duration::from_millis(100))
        .with_max_times(20);

    let mut sensor = Sensor::new(
        MCP3008::new().context("Failed to initialize MCP3008")?,
        SENSOR_CHANNEL,
        Transfer::TMP36,
    );
    let raw = (|| sensor.probe())
        .retry(retry_builder)
        .notify(|e, dur| {
            log::error!("{e:#}");
            log::info!("Retrying in {:?}", dur);
        })
        .call()?;
    log::info!("ADC channel {SENSOR_CHANNEL} reads {raw}");

    let mut screen = Screen::new(display::open_oled().context("Failed to open display")?);
    (|| screen.init())
        .retry(retry_builder)
        .notify(|e, dur| {
            log::error!("{e:#}");
            log::info!("Retrying in {:?}", dur);
        })
        .call()?;
    screen.draw_layout()?;

    let gpio = Gpio::new().context("Failed to initialize GPIO")?;
    let mut led = RgbLed::new(&gpio).context("Failed to initialize status LED")?;
    let button = GpioButton::new(&gpio).context("Failed to initialize dump button")?;

    let mut console = SerialConsole::new().context("Failed to initialize serial console")?;
    console.init().context("Failed to initialize serial console")?;

    let data_log = DataLog::init(SdCard::new(MOUNT_POINT), LOG_FILE, &mut led);
    if !data_log.is_available() {
        log::warn!("No storage at {MOUNT_POINT}, samples will not be logged");
    }

    let mut station = Station {
        sensor,
        screen,
        led,
        button,
        log: data_log,
        console,
    };

    let cycles = async {
        loop {
            station.cycle(REFRESH_PERIOD).await;
        }
    };

    log::info!("Holding each sample for {:?}", REFRESH_PERIOD);
    tokio::select! {
        _ = cycles => {}
        result = tokio::signal::ctrl_c() => {
            result.context("Failed to wait for Ctrl+C signal")?;
            log::info!("Shutting down");
        }
    }

    Ok(())
}
