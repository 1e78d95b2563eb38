//! 8-bit RGB colours as written in world definitions (`#rrggbb` or `rgb(r,g,b)`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An opaque 8-bit-per-channel colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A colour string that is neither `#rrggbb` nor `rgb(r,g,b)`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid colour {0:?}")]
pub struct ColorParseError(pub String);

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Average of two colours, scaled by `light` (e.g. `0.8` for a darker border).
    pub fn mix_scaled(self, other: Rgb, light: f64) -> Rgb {
        let mix = |a: u8, b: u8| scale_channel((a as f64 + b as f64) / 2.0, light);
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Multiply every channel by `factor`, truncating and clamping to `0..=255`.
    pub fn scaled(self, factor: f64) -> Rgb {
        Rgb::new(
            scale_channel(self.r as f64, factor),
            scale_channel(self.g as f64, factor),
            scale_channel(self.b as f64, factor),
        )
    }
}

fn scale_channel(value: f64, factor: f64) -> u8 {
    (value * factor).floor().clamp(0.0, 255.0) as u8
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let trimmed = s.trim();

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(err());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
            return Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(err)?;
        let channels: Vec<u8> = inner
            .split(',')
            .map(|c| c.trim().parse::<u8>().map_err(|_| err()))
            .collect::<Result<_, _>>()?;
        match channels.as_slice() {
            [r, g, b] => Ok(Rgb::new(*r, *g, *b)),
            _ => Err(err()),
        }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
