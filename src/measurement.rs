use std::fmt::{self, Write as _};

/// Maximum number of characters shown on the display and written to the log.
pub const READING_WIDTH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub celsius: f32,
    text: heapless::String<READING_WIDTH>,
}

impl Reading {
    pub fn new(celsius: f32) -> Self {
        Self {
            celsius,
            text: format_celsius(celsius),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Two decimals, cut (not rounded) to the field width. A dangling decimal
/// point left by the cut is dropped.
pub fn format_celsius(celsius: f32) -> heapless::String<READING_WIDTH> {
    // Wide enough for f32::MIN with two decimals.
    let mut full: heapless::String<48> = heapless::String::new();
    let _ = write!(full, "{celsius:.2}");

    let mut text = heapless::String::new();
    for c in full.chars() {
        if text.push(c).is_err() {
            break;
        }
    }
    if text.ends_with('.') {
        text.pop();
    }

    text
}
