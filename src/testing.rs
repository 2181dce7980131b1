//! Stand-ins for the board peripherals.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    convert::Infallible,
    io::{self, Cursor, Write},
    rc::Rc,
};

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::Rectangle,
};
use tokio::time::Instant;

use crate::{
    button::DumpButton,
    display::Panel,
    mcp3008::AnalogInput,
    status::{Color, StatusLed},
    storage::Medium,
};

/// Replays queued raw counts, repeating the last one when the queue runs dry.
#[derive(Debug, Default)]
pub struct FakeAdc {
    counts: VecDeque<u16>,
    last: Option<u16>,
    pub channels: Vec<u8>,
}

impl FakeAdc {
    pub fn new(counts: impl IntoIterator<Item = u16>) -> FakeAdc {
        FakeAdc {
            counts: counts.into_iter().collect(),
            ..FakeAdc::default()
        }
    }

    pub fn failing() -> FakeAdc {
        FakeAdc::default()
    }
}

impl AnalogInput for FakeAdc {
    fn read_raw(&mut self, channel: u8) -> Result<u16, anyhow::Error> {
        self.channels.push(channel);
        if let Some(count) = self.counts.pop_front() {
            self.last = Some(count);
        }
        self.last.ok_or_else(|| anyhow::anyhow!("ADC not responding"))
    }
}

#[derive(Debug, Default)]
pub struct FakePanel {
    pixels: HashMap<Point, BinaryColor>,
    pub flushes: usize,
    /// Clock reading at every flush.
    pub flushed_at: Vec<Instant>,
    pub initialized: bool,
}

impl FakePanel {
    pub fn lit_pixels(&self) -> usize {
        self.pixels.values().filter(|c| c.is_on()).count()
    }

    pub fn lit_in(&self, area: &Rectangle) -> usize {
        self.pixels
            .iter()
            .filter(|(p, c)| c.is_on() && area.contains(**p))
            .count()
    }
}

impl OriginDimensions for FakePanel {
    fn size(&self) -> Size {
        Size::new(128, 64)
    }
}

impl DrawTarget for FakePanel {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let area = self.bounding_box();
        for Pixel(point, color) in pixels {
            if area.contains(point) {
                self.pixels.insert(point, color);
            }
        }
        Ok(())
    }
}

impl Panel for FakePanel {
    fn init(&mut self) -> Result<(), Self::Error> {
        self.initialized = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        self.flushed_at.push(Instant::now());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingLed {
    pub colors: Vec<Color>,
}

impl StatusLed for RecordingLed {
    fn set(&mut self, color: Color) {
        self.colors.push(color);
    }
}

/// Returns scripted levels, one per poll, then stays released.
#[derive(Debug, Default)]
pub struct ScriptedButton {
    levels: RefCell<VecDeque<bool>>,
}

impl ScriptedButton {
    pub fn new(levels: impl IntoIterator<Item = bool>) -> ScriptedButton {
        ScriptedButton {
            levels: RefCell::new(levels.into_iter().collect()),
        }
    }
}

impl DumpButton for ScriptedButton {
    fn is_pressed(&self) -> bool {
        self.levels.borrow_mut().pop_front().unwrap_or(false)
    }
}

/// Files held in memory. Counts every operation other than `mount`.
#[derive(Debug)]
pub struct MemoryCard {
    files: HashMap<String, Rc<RefCell<Vec<u8>>>>,
    present: bool,
    writable: bool,
    removable: bool,
    full: bool,
    calls: Cell<usize>,
}

impl Default for MemoryCard {
    fn default() -> Self {
        MemoryCard {
            files: HashMap::new(),
            present: true,
            writable: true,
            removable: true,
            full: false,
            calls: Cell::new(0),
        }
    }
}

impl MemoryCard {
    pub fn absent() -> MemoryCard {
        MemoryCard {
            present: false,
            ..MemoryCard::default()
        }
    }

    pub fn read_only() -> MemoryCard {
        MemoryCard {
            writable: false,
            ..MemoryCard::default()
        }
    }

    /// Files open for append, but every write fails.
    pub fn full() -> MemoryCard {
        MemoryCard {
            full: true,
            ..MemoryCard::default()
        }
    }

    /// Holds `name`, which refuses to be deleted.
    pub fn with_locked_file(name: &str, contents: &[u8]) -> MemoryCard {
        MemoryCard {
            removable: false,
            ..MemoryCard::with_file(name, contents)
        }
    }

    pub fn with_file(name: &str, contents: &[u8]) -> MemoryCard {
        let mut card = MemoryCard::default();
        card.files
            .insert(name.to_owned(), Rc::new(RefCell::new(contents.to_vec())));
        card
    }

    pub fn contents(&self, name: &str) -> Option<Vec<u8>> {
        self.files.get(name).map(|file| file.borrow().clone())
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    fn count(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

#[derive(Debug)]
pub struct MemoryFile {
    data: Rc<RefCell<Vec<u8>>>,
    full: bool,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.full {
            return Err(io::Error::new(io::ErrorKind::StorageFull, "card full"));
        }
        self.data.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Medium for MemoryCard {
    type Writer = MemoryFile;
    type Reader = Cursor<Vec<u8>>;

    fn mount(&mut self) -> io::Result<()> {
        if self.present {
            Ok(())
        } else {
            Err(io::Error::new(io::ErrorKind::NotFound, "no card"))
        }
    }

    fn exists(&self, name: &str) -> bool {
        self.count();
        self.files.contains_key(name)
    }

    fn remove(&mut self, name: &str) -> io::Result<()> {
        self.count();
        if !self.removable {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "file locked"));
        }
        self.files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_owned()))
    }

    fn open_append(&mut self, name: &str) -> io::Result<MemoryFile> {
        self.count();
        if !self.writable {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "write protected"));
        }
        let data = self.files.entry(name.to_owned()).or_default().clone();
        Ok(MemoryFile {
            data,
            full: self.full,
        })
    }

    fn open_read(&mut self, name: &str) -> io::Result<Cursor<Vec<u8>>> {
        self.count();
        self.contents(name)
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_owned()))
    }
}
