//! Gradient helpers for filling textures and building themed palettes.

use std::f64::consts::TAU;

use super::{AColor, Color, ColorPair};
use crate::error::ConfigurationError;

/// Types that can be linearly interpolated channel by channel.
pub trait Lerp: Sized + Copy {
    fn lerp(self, end: Self, p: f64) -> Self;
}

fn lerp_channel(a: u8, b: u8, p: f64) -> u8 {
    let value = f64::from(a) + (f64::from(b) - f64::from(a)) * p;
    value.round().clamp(0.0, 255.0) as u8
}

impl Lerp for Color {
    fn lerp(self, end: Self, p: f64) -> Self {
        Color::new(
            lerp_channel(self.r, end.r, p),
            lerp_channel(self.g, end.g, p),
            lerp_channel(self.b, end.b, p),
        )
    }
}

impl Lerp for AColor {
    fn lerp(self, end: Self, p: f64) -> Self {
        AColor::new(
            lerp_channel(self.r, end.r, p),
            lerp_channel(self.g, end.g, p),
            lerp_channel(self.b, end.b, p),
            lerp_channel(self.a, end.a, p),
        )
    }
}

impl Lerp for ColorPair {
    fn lerp(self, end: Self, p: f64) -> Self {
        ColorPair::new(self.fg.lerp(end.fg, p), self.bg.lerp(end.bg, p))
    }
}

/// Linear interpolation from `start` to `end` with proportion `p`.
pub fn lerp_colors<T: Lerp>(start: T, end: T, p: f64) -> T {
    start.lerp(end, p)
}

/// `ncolors` evenly spaced colors from `start` to `end`, both inclusive.
pub fn gradient<T: Lerp>(start: T, end: T, ncolors: usize) -> Result<Vec<T>, ConfigurationError> {
    if ncolors < 2 {
        return Err(ConfigurationError::NotEnoughColors(ncolors));
    }
    let last = (ncolors - 1) as f64;
    Ok((0..ncolors)
        .map(|i| lerp_colors(start, end, i as f64 / last))
        .collect())
}

/// A rainbow of `n` colors built from three phase-shifted sines.
pub fn rainbow_gradient(n: usize) -> Vec<Color> {
    if n == 0 {
        return Vec::new();
    }
    let theta = TAU / n as f64;
    let offsets = [0.0, TAU / 3.0, 2.0 * TAU / 3.0];
    (0..n)
        .map(|i| {
            let channel = |offset: f64| ((theta * i as f64 + offset).sin() * 127.0 + 128.0) as u8;
            Color::new(channel(offsets[0]), channel(offsets[1]), channel(offsets[2]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, WHITE};

    #[test]
    fn test_gradient_endpoints() {
        let colors = gradient(BLACK, WHITE, 5).unwrap();
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], BLACK);
        assert_eq!(colors[2], Color::new(128, 128, 128));
        assert_eq!(colors[4], WHITE);
    }

    #[test]
    fn test_gradient_needs_two_colors() {
        assert_eq!(
            gradient(BLACK, WHITE, 1),
            Err(ConfigurationError::NotEnoughColors(1))
        );
    }

    #[test]
    fn test_pair_lerp() {
        let start = ColorPair::new(BLACK, WHITE);
        let end = ColorPair::new(WHITE, BLACK);
        assert_eq!(lerp_colors(start, end, 1.0), end);
    }

    #[test]
    fn test_rainbow_len() {
        assert_eq!(rainbow_gradient(12).len(), 12);
        assert!(rainbow_gradient(0).is_empty());
    }
}
