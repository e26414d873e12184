use std::fmt;
use std::str::FromStr;

use crate::error::{Result, XpError};

/// An RGB color. Immutable; use the `with_*` methods to derive a changed copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const SIZE: usize = 3;

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    /// Background sentinel meaning "no background".
    pub const MAGENTA: Color = Color::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from wider integers, rejecting any channel outside 0..=255.
    pub fn try_new(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    pub fn from_triple(rgb: [i64; 3]) -> Result<Self> {
        Self::try_new(rgb[0], rgb[1], rgb[2])
    }

    /// Parse `rrggbb` or `#rrggbb`, case-insensitive. Returns `None` on anything else.
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let part = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(part(0)?, part(2)?, part(4)?))
    }

    /// Six lowercase hex digits, no `#`.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const fn with_red(self, r: u8) -> Self {
        Self { r, ..self }
    }

    pub const fn with_green(self, g: u8) -> Self {
        Self { g, ..self }
    }

    pub const fn with_blue(self, b: u8) -> Self {
        Self { b, ..self }
    }

    pub fn to_bytes(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_bytes(b: &[u8]) -> Self {
        Self::new(b[0], b[1], b[2])
    }
}

fn channel(name: &str, v: i64) -> Result<u8> {
    u8::try_from(v)
        .map_err(|_| XpError::Validation(format!("{name} channel {v} is outside 0..=255")))
}

impl TryFrom<[i64; 3]> for Color {
    type Error = XpError;

    fn try_from(rgb: [i64; 3]) -> Result<Self> {
        Self::from_triple(rgb)
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

impl FromStr for Color {
    type Err = XpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s).ok_or_else(|| XpError::Validation(format!("not a hex color: {s:?}")))
    }
}

/// A single cell: glyph code drawn in `fg` over `bg`.
///
/// Transparency is not stored; it is read off the background every time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pixel {
    glyph: u32,
    fg: Color,
    bg: Color,
}

impl Pixel {
    /// Bytes per pixel record on the wire: glyph u32 + fg rgb + bg rgb.
    pub const SIZE: usize = 10;

    /// Space, black on magenta. Default fill value.
    pub const TRANSPARENT: Pixel = Pixel::new(32, Color::BLACK, Color::MAGENTA);

    pub const fn new(glyph: u32, fg: Color, bg: Color) -> Self {
        Self { glyph, fg, bg }
    }

    /// Build a pixel from an unchecked glyph code; it must fit the 4-byte wire field.
    pub fn try_new(glyph: i64, fg: Color, bg: Color) -> Result<Self> {
        let glyph = u32::try_from(glyph).map_err(|_| {
            XpError::Validation(format!("glyph code {glyph} is outside 0..={}", u32::MAX))
        })?;
        Ok(Self::new(glyph, fg, bg))
    }

    pub const fn glyph(&self) -> u32 {
        self.glyph
    }

    pub const fn foreground(&self) -> Color {
        self.fg
    }

    pub const fn background(&self) -> Color {
        self.bg
    }

    pub fn transparent(&self) -> bool {
        self.bg == Color::MAGENTA
    }

    pub const fn with_glyph(self, glyph: u32) -> Self {
        Self { glyph, ..self }
    }

    pub const fn with_foreground(self, fg: Color) -> Self {
        Self { fg, ..self }
    }

    pub const fn with_background(self, bg: Color) -> Self {
        Self { bg, ..self }
    }

    pub fn to_bytes(&self) -> [u8; 10] {
        let gb = self.glyph.to_le_bytes();
        let fb = self.fg.to_bytes();
        let bb = self.bg.to_bytes();
        [gb[0], gb[1], gb[2], gb[3], fb[0], fb[1], fb[2], bb[0], bb[1], bb[2]]
    }

    pub fn from_bytes(b: &[u8]) -> Self {
        Self {
            glyph: u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
            fg: Color::from_bytes(&b[4..7]),
            bg: Color::from_bytes(&b[7..10]),
        }
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

/// Image header: version u32 + layer count u32.
pub const IMAGE_HEADER_SIZE: usize = 8;
/// Layer header: width u32 + height u32.
pub const LAYER_HEADER_SIZE: usize = 8;
