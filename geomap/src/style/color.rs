use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::MapError;

/// RGBA colour with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgba(0, 0, 0, 255);
    /// Fully transparent colour.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates a colour from its channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a CSS hex colour: `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`.
    pub fn try_from_hex(hex: &str) -> Result<Self, MapError> {
        let invalid = || MapError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let short = |i: usize| -> Result<u8, MapError> {
            let v = u8::from_str_radix(&digits[i..i + 1], 16).map_err(|_| invalid())?;
            Ok(v * 17)
        };
        let long = |i: usize| -> Result<u8, MapError> {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid())
        };

        match digits.len() {
            3 => Ok(Self::rgba(short(0)?, short(1)?, short(2)?, 255)),
            4 => Ok(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Ok(Self::rgba(long(0)?, long(2)?, long(4)?, 255)),
            8 => Ok(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => Err(invalid()),
        }
    }

    /// Red channel.
    pub fn r(&self) -> u8 {
        self.r
    }

    /// Green channel.
    pub fn g(&self) -> u8 {
        self.g
    }

    /// Blue channel.
    pub fn b(&self) -> u8 {
        self.b
    }

    /// Alpha channel.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the colour with its alpha multiplied by `opacity`.
    ///
    /// `opacity` is clamped into `[0, 1]`.
    pub fn with_opacity(&self, opacity: f64) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self {
            a: (self.a as f64 * opacity).round() as u8,
            ..*self
        }
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from_hex(s.trim())
    }
}

/// Writes the colour in normalized `#rrggbb` form, or `#rrggbbaa` when not opaque. Short forms are
/// expanded, so `#088` is written as `#008888`. Serialization uses the same form.
impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }

        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
