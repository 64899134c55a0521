// File: src/core/color.rs
use crate::error::{Result, StimulusError};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB color used for canvas backgrounds and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl DisplayColor {
    pub const WHITE: DisplayColor = DisplayColor::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: DisplayColor = DisplayColor::new(0x00, 0x00, 0x00);
    /// Matplotlib's named "gray".
    pub const GRAY: DisplayColor = DisplayColor::new(0x80, 0x80, 0x80);
    pub const LIGHT_GRAY: DisplayColor = DisplayColor::new(200, 200, 200);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `RRGGBB` or `AARRGGBB`, with or without a leading `#`.
    /// The alpha byte of the 8-digit form is dropped.
    pub fn parse_hex(raw: &str) -> Result<Self> {
        let hex = raw.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StimulusError::invalid(format!("'{}' is not a hex color", raw)));
        }
        let rgb = match hex.len() {
            6 => hex,
            8 => &hex[2..],
            _ => {
                return Err(StimulusError::invalid(format!(
                    "'{}' must have 6 or 8 hex digits",
                    raw
                )))
            }
        };
        let channel = |i: usize| u8::from_str_radix(&rgb[i..i + 2], 16);
        match (channel(0), channel(2), channel(4)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self::new(r, g, b)),
            _ => Err(StimulusError::invalid(format!("'{}' is not a hex color", raw))),
        }
    }

    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    pub fn to_rgb(self) -> image::Rgb<u8> {
        image::Rgb([self.r, self.g, self.b])
    }
}

impl fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for DisplayColor {
    type Err = StimulusError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_hex(s)
    }
}
