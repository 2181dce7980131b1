use std::io;

use anyhow::Context;
use rppal::uart::{Parity, Uart};

pub const BAUD_RATE: u32 = 9600;
pub const PARITY: Parity = Parity::None;
pub const DATA_BITS: u8 = 8;
pub const STOP_BITS: u8 = 1;

/// The primary UART as a byte sink.
#[derive(Debug)]
pub struct SerialConsole {
    uart: Uart,
}

impl SerialConsole {
    pub fn new() -> Result<SerialConsole, anyhow::Error> {
        let uart = Uart::new(BAUD_RATE, PARITY, DATA_BITS, STOP_BITS)
            .context("Failed to initialize UART")?;

        Ok(SerialConsole { uart })
    }

    pub fn init(&mut self) -> Result<(), anyhow::Error> {
        self.uart
            .set_write_mode(true)
            .context("Failed to set write mode")?;

        Ok(())
    }
}

impl io::Write for SerialConsole {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.uart.write(buf).map_err(io::Error::other)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.uart.drain().map_err(io::Error::other)
    }
}
