//! Geometric primitives.
//!
//! - **point**: `Point`, `Size` and `Rect` in character cells
//! - **hints**: proportional `SizeHint` / `PosHint` and the 9-way `Anchor`
//!
//! Coordinates are `(y, x)` ordered, rows before columns, matching the
//! row-major layout of the render buffers.

pub mod hints;
pub mod point;

pub use hints::{Anchor, PosHint, SizeHint};
pub use point::{Point, Rect, Size};

/// Clamp `value` to `[min, max]`, where either bound may be absent.
pub fn clamp_opt<T: PartialOrd>(value: T, min: Option<T>, max: Option<T>) -> T {
    let value = match min {
        Some(min) if value < min => min,
        _ => value,
    };
    match max {
        Some(max) if value > max => max,
        _ => value,
    }
}

/// Round a proportion of an extent to whole cells.
pub fn scale(proportion: f64, extent: u16) -> i64 {
    (proportion * f64::from(extent)).round() as i64
}
