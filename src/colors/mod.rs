//! Colors and gradients.
//!
//! - **color**: `Color` (RGB), `AColor` (RGBA), `ColorPair` and constants
//! - **gradient**: interpolation helpers used to fill textures and themes

pub mod color;
pub mod gradient;

pub use color::*;
pub use gradient::{gradient, lerp_colors, rainbow_gradient, Lerp};
