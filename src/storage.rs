use std::{
    fs::{self, File, OpenOptions},
    io::{self, Read, Write},
    path::PathBuf,
};

use crate::status::{Color, StatusLed};

pub const MOUNT_POINT: &str = "/media/sdcard";
pub const LOG_FILE: &str = "templog.txt";

/// A removable volume holding flat files.
pub trait Medium {
    type Writer: Write;
    type Reader: Read;

    fn mount(&mut self) -> io::Result<()>;
    fn exists(&self, name: &str) -> bool;
    fn remove(&mut self, name: &str) -> io::Result<()>;
    fn open_append(&mut self, name: &str) -> io::Result<Self::Writer>;
    fn open_read(&mut self, name: &str) -> io::Result<Self::Reader>;
}

/// A card mounted by the OS at `mount_point`.
#[derive(Debug)]
pub struct SdCard {
    mount_point: PathBuf,
}

impl SdCard {
    pub fn new(mount_point: impl Into<PathBuf>) -> SdCard {
        SdCard {
            mount_point: mount_point.into(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.mount_point.join(name)
    }
}

impl Medium for SdCard {
    type Writer = File;
    type Reader = File;

    fn mount(&mut self) -> io::Result<()> {
        let metadata = fs::metadata(&self.mount_point)?;
        if !metadata.is_dir() {
            return Err(io::Error::other(format!(
                "{} is not a directory",
                self.mount_point.display()
            )));
        }
        Ok(())
    }

    fn exists(&self, name: &str) -> bool {
        self.path(name).exists()
    }

    fn remove(&mut self, name: &str) -> io::Result<()> {
        fs::remove_file(self.path(name))
    }

    fn open_append(&mut self, name: &str) -> io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(name))
    }

    fn open_read(&mut self, name: &str) -> io::Result<File> {
        File::open(self.path(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Append {
    Written,
    Failed,
    /// Storage was missing at startup.
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dump {
    Sent(u64),
    OpenFailed,
}

/// The log file plus whether storage was found at startup. The flag is
/// decided once in [`DataLog::init`] and never re-evaluated.
#[derive(Debug)]
pub struct DataLog<M> {
    medium: M,
    name: String,
    available: bool,
}

impl<M: Medium> DataLog<M> {
    /// Mounts the medium and deletes any log left from a previous run.
    pub fn init<L: StatusLed>(mut medium: M, name: &str, led: &mut L) -> DataLog<M> {
        if let Err(e) = medium.mount() {
            log::warn!("Storage unavailable, running display-only: {e}");
            led.set(Color::Red);
            return DataLog {
                medium,
                name: name.to_owned(),
                available: false,
            };
        }

        if medium.exists(name) {
            match medium.remove(name) {
                Ok(()) => log::info!("Removed previous {name}"),
                Err(e) => log::warn!("Failed to remove previous {name}: {e}"),
            }
        }

        log::info!("Storage ready, logging to {name}");
        led.set(Color::Green);

        DataLog {
            medium,
            name: name.to_owned(),
            available: true,
        }
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opens, writes `text` and a newline, and closes the file again.
    pub fn append_line<L: StatusLed>(&mut self, text: &str, led: &mut L) -> Append {
        if !self.available {
            return Append::Skipped;
        }

        let mut file = match self.medium.open_append(&self.name) {
            Ok(file) => file,
            Err(e) => {
                log::error!("Failed to open {}: {e}", self.name);
                led.set(Color::Red);
                return Append::Failed;
            }
        };

        if let Err(e) = writeln!(file, "{text}").and_then(|()| file.flush()) {
            log::error!("Failed to write {}: {e}", self.name);
            led.set(Color::Red);
            return Append::Failed;
        }

        led.set(Color::Blue);
        Append::Written
    }

    /// Streams the whole log to `console` behind a header line.
    pub fn dump<W: Write>(&mut self, console: &mut W) -> io::Result<Dump> {
        let opened = if self.available {
            self.medium.open_read(&self.name)
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "storage unavailable"))
        };

        let mut file = match opened {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Failed to open {} for dump: {e}", self.name);
                writeln!(console, "error opening file")?;
                console.flush()?;
                return Ok(Dump::OpenFailed);
            }
        };

        writeln!(console, "Content of {}", self.name)?;
        let sent = io::copy(&mut file, console)?;
        console.flush()?;

        Ok(Dump::Sent(sent))
    }

    #[cfg(test)]
    pub fn medium(&self) -> &M {
        &self.medium
    }
}
