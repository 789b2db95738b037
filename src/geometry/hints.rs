//! Proportional size and position hints.
//!
//! A hint expresses geometry as a fraction of the parent's extent. Hinted
//! axes take precedence over a widget's literal size or position; axes left
//! as `None` fall back to the literal value.

use std::fmt;
use std::str::FromStr;

use super::{clamp_opt, scale, Point, Size};
use crate::error::ConfigurationError;

fn check_proportion(axis: &'static str, value: Option<f64>) -> Result<(), ConfigurationError> {
    match value {
        Some(value) if !value.is_finite() || value < 0.0 => {
            Err(ConfigurationError::InvalidHint { axis, value })
        }
        _ => Ok(()),
    }
}

fn check_bounds(
    axis: &'static str,
    min: Option<u16>,
    max: Option<u16>,
) -> Result<(), ConfigurationError> {
    match (min, max) {
        (Some(min), Some(max)) if min > max => {
            Err(ConfigurationError::InvertedBounds { axis, min, max })
        }
        _ => Ok(()),
    }
}

/// A scaled position, saturating at `i32::MAX` for huge proportions.
fn coordinate(proportion: f64, extent: u16) -> i32 {
    i32::try_from(scale(proportion, extent)).unwrap_or(i32::MAX)
}

/// Size as a proportion of the parent's size, with optional clamps.
///
/// Bounds only apply to an axis that has a proportion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SizeHint {
    height: Option<f64>,
    width: Option<f64>,
    min_height: Option<u16>,
    max_height: Option<u16>,
    min_width: Option<u16>,
    max_width: Option<u16>,
}

impl SizeHint {
    pub fn new(height: Option<f64>, width: Option<f64>) -> Result<Self, ConfigurationError> {
        check_proportion("height", height)?;
        check_proportion("width", width)?;
        Ok(Self {
            height,
            width,
            ..Self::default()
        })
    }

    /// Hint that fills the parent on both axes.
    pub fn full() -> Self {
        Self {
            height: Some(1.0),
            width: Some(1.0),
            ..Self::default()
        }
    }

    pub fn with_height_bounds(
        mut self,
        min: Option<u16>,
        max: Option<u16>,
    ) -> Result<Self, ConfigurationError> {
        check_bounds("height", min, max)?;
        self.min_height = min;
        self.max_height = max;
        Ok(self)
    }

    pub fn with_width_bounds(
        mut self,
        min: Option<u16>,
        max: Option<u16>,
    ) -> Result<Self, ConfigurationError> {
        check_bounds("width", min, max)?;
        self.min_width = min;
        self.max_width = max;
        Ok(self)
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.height.is_none() && self.width.is_none()
    }

    /// Resolve against `parent`, keeping `literal` on unhinted axes.
    pub fn resolve(&self, literal: Size, parent: Size) -> Size {
        let height = match self.height {
            Some(proportion) => resolve_axis(
                scale(proportion, parent.height),
                self.min_height,
                self.max_height,
            ),
            None => literal.height,
        };
        let width = match self.width {
            Some(proportion) => {
                resolve_axis(scale(proportion, parent.width), self.min_width, self.max_width)
            }
            None => literal.width,
        };
        Size::new(height, width)
    }
}

fn resolve_axis(target: i64, min: Option<u16>, max: Option<u16>) -> u16 {
    let target = target.clamp(0, i64::from(u16::MAX)) as u16;
    clamp_opt(target, min, max)
}

/// Position as a proportion of the parent's size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PosHint {
    y: Option<f64>,
    x: Option<f64>,
}

impl PosHint {
    pub fn new(y: Option<f64>, x: Option<f64>) -> Result<Self, ConfigurationError> {
        check_proportion("y", y)?;
        check_proportion("x", x)?;
        Ok(Self { y, x })
    }

    pub fn center() -> Self {
        Self {
            y: Some(0.5),
            x: Some(0.5),
        }
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_none() && self.x.is_none()
    }

    /// Resolve the top-left corner so that `anchor` of a widget of `size`
    /// lands on the hinted point; unhinted axes keep `literal`.
    pub fn resolve(&self, anchor: Anchor, literal: Point, size: Size, parent: Size) -> Point {
        let offset = anchor.offset(size);
        let y = match self.y {
            Some(proportion) => coordinate(proportion, parent.height).saturating_sub(offset.y),
            None => literal.y,
        };
        let x = match self.x {
            Some(proportion) => coordinate(proportion, parent.width).saturating_sub(offset.x),
            None => literal.x,
        };
        Point::new(y, x)
    }
}

/// The point of a widget pinned to its position hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    LeftCenter,
    Center,
    RightCenter,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::LeftCenter,
        Anchor::Center,
        Anchor::RightCenter,
        Anchor::BottomLeft,
        Anchor::BottomCenter,
        Anchor::BottomRight,
    ];

    /// Offset of the anchor point from a widget's top-left corner.
    pub fn offset(self, size: Size) -> Point {
        let h = i32::from(size.height);
        let w = i32::from(size.width);
        let (y, x) = match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (0, w / 2),
            Anchor::TopRight => (0, w),
            Anchor::LeftCenter => (h / 2, 0),
            Anchor::Center => (h / 2, w / 2),
            Anchor::RightCenter => (h / 2, w),
            Anchor::BottomLeft => (h, 0),
            Anchor::BottomCenter => (h, w / 2),
            Anchor::BottomRight => (h, w),
        };
        Point::new(y, x)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Anchor::TopLeft => "top-left",
            Anchor::TopCenter => "top-center",
            Anchor::TopRight => "top-right",
            Anchor::LeftCenter => "left-center",
            Anchor::Center => "center",
            Anchor::RightCenter => "right-center",
            Anchor::BottomLeft => "bottom-left",
            Anchor::BottomCenter => "bottom-center",
            Anchor::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Anchor {
    type Err = ConfigurationError;

    /// Accepts `top-left`, `TOP_LEFT`, `top_left` and so on.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let normalized = token.trim().to_ascii_lowercase().replace('_', "-");
        Anchor::ALL
            .into_iter()
            .find(|anchor| anchor.as_str() == normalized)
            .ok_or_else(|| ConfigurationError::UnknownAnchor(token.to_string()))
    }
}
