//! Graphic widget textures.
//!
//! A graphic widget draws an RGBA texture with two texture rows per
//! terminal row. The texture follows the widget's size: every resize
//! resamples it with the configured [`Interpolation`].

use std::fmt;
use std::str::FromStr;

use crate::colors::{AColor, Lerp, TRANSPARENT};
use crate::error::ConfigurationError;
use crate::geometry::Size;

/// Resampling algorithm used when a texture changes shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
}

impl Interpolation {
    pub fn as_str(self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
        }
    }
}

impl fmt::Display for Interpolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Interpolation {
    type Err = ConfigurationError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Interpolation::Nearest),
            "linear" => Ok(Interpolation::Linear),
            _ => Err(ConfigurationError::UnknownInterpolation(token.to_string())),
        }
    }
}

/// Row-major RGBA pixels.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Texture {
    rows: usize,
    cols: usize,
    data: Vec<AColor>,
}

impl Texture {
    pub fn filled(rows: usize, cols: usize, color: AColor) -> Self {
        Self {
            rows,
            cols,
            data: vec![color; rows * cols],
        }
    }

    /// Wrap existing pixel data; `data.len()` must be `rows * cols`.
    pub fn from_rgba(rows: usize, cols: usize, data: Vec<AColor>) -> Result<Self, ConfigurationError> {
        let expected = rows * cols;
        if data.len() != expected {
            return Err(ConfigurationError::TextureShape {
                len: data.len(),
                expected,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Texture shape for a widget of `size`.
    pub fn shape_for(size: Size) -> (usize, usize) {
        (2 * usize::from(size.height), usize::from(size.width))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<AColor> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col).copied()
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, color: AColor) {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = color;
        }
    }

    pub fn fill(&mut self, color: AColor) {
        self.data.fill(color);
    }

    pub fn pixels(&self) -> &[AColor] {
        &self.data
    }

    /// Resample to `rows` x `cols`.
    ///
    /// Resampling an empty texture yields one filled with `fill`.
    pub fn resample(&self, rows: usize, cols: usize, interpolation: Interpolation, fill: AColor) -> Texture {
        if rows == self.rows && cols == self.cols {
            return self.clone();
        }
        if self.is_empty() || rows == 0 || cols == 0 {
            return Texture::filled(rows, cols, fill);
        }

        let scale_y = self.rows as f64 / rows as f64;
        let scale_x = self.cols as f64 / cols as f64;
        let mut data = Vec::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                let pixel = match interpolation {
                    Interpolation::Nearest => self.sample_nearest(y, x, scale_y, scale_x),
                    Interpolation::Linear => self.sample_linear(y, x, scale_y, scale_x),
                };
                data.push(pixel);
            }
        }
        Texture { rows, cols, data }
    }

    fn at(&self, row: usize, col: usize) -> AColor {
        self.get(row, col).unwrap_or(TRANSPARENT)
    }

    fn sample_nearest(&self, y: usize, x: usize, scale_y: f64, scale_x: f64) -> AColor {
        let sy = ((y as f64 * scale_y).floor() as usize).min(self.rows - 1);
        let sx = ((x as f64 * scale_x).floor() as usize).min(self.cols - 1);
        self.at(sy, sx)
    }

    fn sample_linear(&self, y: usize, x: usize, scale_y: f64, scale_x: f64) -> AColor {
        let (y0, y1, fy) = linear_source(y, scale_y, self.rows);
        let (x0, x1, fx) = linear_source(x, scale_x, self.cols);
        let top = self.at(y0, x0).lerp(self.at(y0, x1), fx);
        let bottom = self.at(y1, x0).lerp(self.at(y1, x1), fx);
        top.lerp(bottom, fy)
    }
}

/// Source neighbors and weight for destination index `dst`, using
/// half-pixel centers.
fn linear_source(dst: usize, scale: f64, len: usize) -> (usize, usize, f64) {
    let max = (len - 1) as f64;
    let src = ((dst as f64 + 0.5) * scale - 0.5).clamp(0.0, max);
    let lo = src.floor();
    let hi = (lo + 1.0).min(max);
    (lo as usize, hi as usize, src - lo)
}

/// State carried by a graphic widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Graphic {
    texture: Texture,
    alpha: f64,
    interpolation: Interpolation,
    default_color: AColor,
}

impl Graphic {
    pub fn new(default_color: AColor) -> Self {
        Self {
            texture: Texture::default(),
            alpha: 1.0,
            interpolation: Interpolation::default(),
            default_color,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.set_alpha(alpha);
        self
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn texture(&self) -> &Texture {
        &self.texture
    }

    pub fn texture_mut(&mut self) -> &mut Texture {
        &mut self.texture
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Clamped to `[0, 1]`; NaN counts as 0.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) };
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) {
        self.interpolation = interpolation;
    }

    pub fn default_color(&self) -> AColor {
        self.default_color
    }

    pub fn set_default_color(&mut self, color: AColor) {
        self.default_color = color;
    }

    /// Bring the texture in line with a widget of `size`.
    pub(crate) fn fit(&mut self, size: Size) {
        let (rows, cols) = Texture::shape_for(size);
        self.texture = self
            .texture
            .resample(rows, cols, self.interpolation, self.default_color);
    }

    /// Replace the texture, resampling it to the current shape.
    pub fn set_texture(&mut self, texture: Texture) {
        let (rows, cols) = (self.texture.rows(), self.texture.cols());
        self.texture = texture.resample(rows, cols, self.interpolation, self.default_color);
    }
}
