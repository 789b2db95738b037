//! Color types.
//!
//! Canvas cells carry a `ColorPair` of two RGB colors. Graphic textures
//! carry `AColor` (RGBA); the alpha channel is only consumed while
//! compositing.

use serde::{Deserialize, Serialize};

/// RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub const fn with_alpha(self, a: u8) -> AColor {
        AColor::new(self.r, self.g, self.b, a)
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// RGBA color used by graphic textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl AColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(&self) -> Color {
        Color::new(self.r, self.g, self.b)
    }
}

impl From<Color> for AColor {
    fn from(color: Color) -> Self {
        color.with_alpha(255)
    }
}

/// Foreground and background of a character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        Self { fg, bg }
    }

    pub const fn reversed(&self) -> Self {
        Self::new(self.bg, self.fg)
    }
}

pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const RED: Color = Color::new(255, 0, 0);
pub const GREEN: Color = Color::new(0, 255, 0);
pub const BLUE: Color = Color::new(0, 0, 255);
pub const YELLOW: Color = Color::new(255, 255, 0);

pub const TRANSPARENT: AColor = AColor::new(0, 0, 0, 0);
pub const AWHITE: AColor = AColor::new(255, 255, 255, 255);
pub const ABLACK: AColor = AColor::new(0, 0, 0, 255);

pub const DEFAULT_FG: Color = Color::new(205, 214, 244);
pub const DEFAULT_BG: Color = Color::new(7, 8, 12);
pub const DEFAULT_COLOR_PAIR: ColorPair = ColorPair::new(DEFAULT_FG, DEFAULT_BG);
