//! tessera: a terminal widget toolkit.
//!
//! Widgets live in a [`WidgetTree`] and are sized and placed by hints
//! relative to their parent. Each frame the compositor renders the tree into
//! a [`Canvas`], using the half-block glyph to give graphic widgets two
//! color sub-pixels per cell. Incoming terminal bytes are turned into
//! key, mouse and paste events by the [`Decoder`] and routed through the
//! tree by [`WidgetTree::dispatch`].
//!
//! # Modules
//!
//! - **geometry**: points, sizes, rectangles, size/position hints, anchors
//! - **colors**: RGB/RGBA colors, color pairs, gradients
//! - **widget**: the widget arena, resolution, observers, dispatch
//! - **render**: canvas, compositor, terminal writer
//! - **input**: escape table and byte-stream decoder
//! - **app**: event queue and cooperative scheduler
//! - **config**: TOML configuration and color themes

pub mod app;
pub mod colors;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod widget;

pub use app::{EventQueue, Flow, Input, InputSource, Scheduler, Surface};
pub use config::{ColorTheme, Config};
pub use error::{ConfigurationError, Error, Result};
pub use geometry::{Anchor, Point, PosHint, Rect, Size, SizeHint};
pub use input::{Decoder, Event, Key, KeyEvent, Mods, MouseButton, MouseEvent, MouseEventType};
pub use render::{render_frame, Canvas, CanvasView, Compositor, TerminalWriter};
pub use widget::{Behavior, Easing, TweenTarget, WidgetConfig, WidgetId, WidgetNode, WidgetTree};
