use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color.
///
/// Serialized as a CSS-like hex string (`#rrggbb`, or `#rrggbbaa` when not opaque) so schedule
/// documents can spell palette overrides the same way the drawing surfaces print them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` and the keywords `white`, `black` and
    /// `transparent`.
    pub fn parse(text: &str) -> Option<Self> {
        let s = text.trim().to_ascii_lowercase();
        match s.as_str() {
            "transparent" => return Some(Color::rgba(0, 0, 0, 0)),
            "white" => return Some(Color::WHITE),
            "black" => return Some(Color::BLACK),
            _ => {}
        }

        let hex = s.strip_prefix('#')?;
        fn hex2(b: &[u8]) -> Option<u8> {
            let hi = (*b.first()? as char).to_digit(16)? as u8;
            let lo = (*b.get(1)? as char).to_digit(16)? as u8;
            Some((hi << 4) | lo)
        }
        fn hex1(c: u8) -> Option<u8> {
            let v = (c as char).to_digit(16)? as u8;
            Some((v << 4) | v)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Color::rgb(
                hex1(bytes[0])?,
                hex1(bytes[1])?,
                hex1(bytes[2])?,
            )),
            4 => Some(Color::rgba(
                hex1(bytes[0])?,
                hex1(bytes[1])?,
                hex1(bytes[2])?,
                hex1(bytes[3])?,
            )),
            6 => Some(Color::rgb(
                hex2(&bytes[0..2])?,
                hex2(&bytes[2..4])?,
                hex2(&bytes[4..6])?,
            )),
            8 => Some(Color::rgba(
                hex2(&bytes[0..2])?,
                hex2(&bytes[2..4])?,
                hex2(&bytes[4..6])?,
                hex2(&bytes[6..8])?,
            )),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s).ok_or_else(|| Error::InvalidColor {
            value: s.to_string(),
        })
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}
