//! Colors and the per-widget paint set.
//!
//! Paints are built once when the widget loads and reused for every frame.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::surface::{Paint, TextAlign};

/// Text size used for hour labels and day labels.
pub const LABEL_TEXT_SIZE: f32 = 12.0;

/// Stroke width of grid lines.
pub const GRID_STROKE_WIDTH: f32 = 1.0;

/// RGBA color, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha; 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    /// Light gray used for grid lines.
    pub const LIGHT_GRAY: Color = Color::rgb(0xd3, 0xd3, 0xd3);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Color with explicit alpha.
    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#aarrggbb` (alpha first). The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidDigits(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ColorParseError::InvalidDigits(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::argb(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            len => Err(ColorParseError::InvalidLength {
                value: hex.to_string(),
                len,
            }),
        }
    }

    /// True when the color draws nothing.
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 0xff {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(
                f,
                "#{:02x}{:02x}{:02x}{:02x}",
                self.a, self.r, self.g, self.b
            )
        }
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Invalid color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Not 6 or 8 hex digits.
    #[error("Color '{value}' must have 6 (rrggbb) or 8 (aarrggbb) hex digits, found {len}")]
    InvalidLength {
        /// The rejected string.
        value: String,
        /// Number of digits found.
        len: usize,
    },

    /// Contains something other than hex digits.
    #[error("Color '{0}' contains non-hex characters")]
    InvalidDigits(String),
}

/// User-facing color choices, one per drawn element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Surface clear color.
    pub background: Color,
    /// Row and column grid lines.
    pub line: Color,
    /// Hour gutter band.
    pub gutter: Color,
    /// Hour labels.
    pub hour_text: Color,
    /// Day header band.
    pub header: Color,
    /// Day labels in the header.
    pub header_text: Color,
    /// Today highlight pill.
    pub today: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT,
            line: Color::LIGHT_GRAY,
            gutter: Color::rgb(0xf6, 0xf6, 0xf6),
            hour_text: Color::rgb(0x98, 0x98, 0x98),
            header: Color::rgb(0xff, 0x79, 0x62),
            header_text: Color::WHITE,
            today: Color::argb(0x60, 0xff, 0xff, 0xff),
        }
    }
}

/// Paint set used by the grid painter.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Surface clear color.
    pub background: Color,
    /// Grid lines.
    pub line: Paint,
    /// Hour gutter fill.
    pub gutter: Paint,
    /// Hour label text.
    pub hour_text: Paint,
    /// Header band fill.
    pub header: Paint,
    /// Day label text.
    pub header_text: Paint,
    /// Today pill fill.
    pub today: Paint,
}

impl Palette {
    /// Build every paint from a color scheme.
    pub fn load(colors: &ColorScheme) -> Self {
        Self {
            background: colors.background,
            line: Paint::stroke(colors.line, GRID_STROKE_WIDTH),
            gutter: Paint::fill(colors.gutter),
            hour_text: Paint::text(colors.hour_text, LABEL_TEXT_SIZE, TextAlign::Center),
            header: Paint::fill(colors.header),
            header_text: Paint::text(colors.header_text, LABEL_TEXT_SIZE, TextAlign::Center),
            today: Paint::fill(colors.today),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::load(&ColorScheme::default())
    }
}
