//! Error types for tessera.
//!
//! Configuration mistakes are caught when a value is built (a hint, an
//! anchor token, a gradient request), never later during resolution or
//! rendering. Tree operations on stale or misplaced ids report
//! [`Error::WidgetNotFound`] and friends.

use std::io;
use thiserror::Error;

use crate::widget::WidgetId;

/// Invalid configuration values, rejected at construction time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("invalid {axis} hint: {value} (must be finite and non-negative)")]
    InvalidHint { axis: &'static str, value: f64 },

    #[error("invalid {axis} bounds: min ({min}) > max ({max})")]
    InvertedBounds { axis: &'static str, min: u16, max: u16 },

    #[error("unknown anchor: {0:?}")]
    UnknownAnchor(String),

    #[error("unknown interpolation: {0:?}")]
    UnknownInterpolation(String),

    #[error("unknown easing: {0:?}")]
    UnknownEasing(String),

    #[error("not enough colors (ncolors={0}, need at least 2)")]
    NotEnoughColors(usize),

    #[error("texture data has {len} cells, expected {expected}")]
    TextureShape { len: usize, expected: usize },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("widget not found: {0:?}")]
    WidgetNotFound(WidgetId),

    #[error("widget {0:?} already has a parent")]
    AlreadyAttached(WidgetId),

    #[error("widget {child:?} is not a child of {parent:?}")]
    NotAChild { parent: WidgetId, child: WidgetId },

    #[error("adding {child:?} under {parent:?} would create a cycle")]
    CycleDetected { parent: WidgetId, child: WidgetId },

    #[error("the root widget cannot be removed or destroyed")]
    RootRemoval,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    ConfigFile(String),
}

pub type Result<T> = std::result::Result<T, Error>;
