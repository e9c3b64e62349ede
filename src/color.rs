use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An sRGB color with straight (non-premultiplied) alpha
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 0xff }
    }

    /// Returns the color with its alpha channel multiplied by `alpha`, which
    /// is clamped to `0.0..=1.0`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn with_alpha(self, alpha: f64) -> Color {
        let a = (f64::from(self.a) * alpha.clamp(0.0, 1.0)).round() as u8;
        Color { a, ..self }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 0xff
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parses `#rgb`, `#rrggbb`, or `#rrggbbaa` (case-insensitive)
    fn from_str(s: &str) -> Result<Color, ParseColorError> {
        let err = || ParseColorError(s.to_owned());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let channel = |i: usize, width: usize| {
            let digits = hex.get(i * width..(i + 1) * width).ok_or_else(err)?;
            let v = u8::from_str_radix(digits, 16).map_err(|_| err())?;
            Ok::<u8, ParseColorError>(if width == 1 { v * 0x11 } else { v })
        };
        match hex.len() {
            3 => Ok(Color::rgb(channel(0, 1)?, channel(1, 1)?, channel(2, 1)?)),
            6 => Ok(Color::rgb(channel(0, 2)?, channel(1, 2)?, channel(2, 2)?)),
            8 => Ok(Color {
                r: channel(0, 2)?,
                g: channel(1, 2)?,
                b: channel(2, 2)?,
                a: channel(3, 2)?,
            }),
            _ => Err(err()),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color {0:?}; expected #rgb, #rrggbb, or #rrggbbaa")]
pub struct ParseColorError(String);
