//! Render pipeline.
//!
//! - **canvas**: the character and color-pair grids plus clipped views
//! - **compositor**: recursive region rendering and half-block blending
//! - **terminal**: crossterm output of a finished canvas

pub mod canvas;
pub mod compositor;
pub mod terminal;

pub use canvas::{Canvas, CanvasView, HALF_BLOCK, WIDE_CONTINUATION};
pub use compositor::{blend, render_frame, render_region, Compositor};
pub use terminal::{terminal_size, TerminalWriter};
