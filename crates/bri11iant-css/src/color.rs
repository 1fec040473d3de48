//! CSS color parsing
//!
//! Any color syntax lightningcss understands is accepted and converted to
//! 8-bit sRGB.

use std::fmt;

use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;

use crate::ColorError;

/// sRGB color with 8-bit channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Channels normalized to [0, 1]
    pub fn to_unit(&self) -> [f64; 3] {
        [self.r, self.g, self.b].map(|c| f64::from(c) / 255.0)
    }
}

impl fmt::Display for Rgba {
    /// Serializes like `getComputedStyle`: `rgb(r, g, b)` or `rgba(r, g, b, a)`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_opaque() {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (f64::from(self.a) / 255.0 * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Parse any CSS color value into sRGB
pub fn parse_color(input: &str) -> Result<Rgba, ColorError> {
    let input = input.trim();
    let color = CssColor::parse_string(input).map_err(|_| ColorError::Invalid(input.to_string()))?;

    let rgba = match color {
        CssColor::RGBA(rgba) => rgba,
        other => match other.to_rgb() {
            Ok(CssColor::RGBA(rgba)) => rgba,
            // currentColor, system colors and light-dark() need context
            _ => return Err(ColorError::Unsupported(input.to_string())),
        },
    };

    Ok(Rgba::rgba(rgba.red, rgba.green, rgba.blue, rgba.alpha))
}
