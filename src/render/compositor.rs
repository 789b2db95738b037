//! Region-based compositing.
//!
//! Rendering walks the tree in paint order. Each widget draws into the
//! intersection of the requested region with its own bounding box and then
//! hands that intersection to its children as their region, so nothing is
//! ever written outside the rectangle the caller asked for.
//!
//! Graphic widgets use the half-block glyph: the upper sub-pixel of a cell
//! is its foreground color, the lower one its background.

use tracing::trace;

use super::canvas::{Canvas, HALF_BLOCK};
use crate::colors::{AColor, Color, Lerp};
use crate::geometry::{Point, Rect, Size};
use crate::widget::{Graphic, WidgetId, WidgetKind, WidgetNode, WidgetTree};

/// Alpha-composite `over` onto `existing`, scaled by the widget `alpha`.
pub fn blend(existing: Color, over: AColor, alpha: f64) -> Color {
    let weight = f64::from(over.a) / 255.0 * alpha;
    existing.lerp(over.rgb(), weight)
}

/// Render the whole tree into a fresh canvas of `viewport` size.
pub fn render_frame(tree: &WidgetTree, viewport: Size) -> Canvas {
    let mut canvas = Canvas::new(viewport);
    let bounds = canvas.bounds();
    render_region(tree, &mut canvas, bounds);
    canvas
}

/// Recompose `region` (absolute coordinates) of `canvas` from the tree.
pub fn render_region(tree: &WidgetTree, canvas: &mut Canvas, region: Rect) {
    debug_assert!(
        canvas.bounds().contains_rect(&region),
        "render region {:?} outside canvas {:?}",
        region,
        canvas.size()
    );
    let Some(region) = region.intersection(&canvas.bounds()) else {
        return;
    };
    let root = tree.root();
    if let Some(node) = tree.get(root) {
        render_widget(tree, root, node.pos(), region, canvas);
    }
}

fn render_widget(tree: &WidgetTree, id: WidgetId, abs: Point, region: Rect, canvas: &mut Canvas) {
    let Some(node) = tree.get(id) else {
        return;
    };
    if !node.is_visible() || !node.is_enabled() {
        return;
    }
    let Some(dest) = Rect::from_pos_size(abs, node.size()).intersection(&region) else {
        return;
    };

    match node.kind() {
        WidgetKind::Plain if !node.is_transparent() => {
            canvas.fill_rect(dest, node.background_char(), node.background_color_pair());
        }
        WidgetKind::Plain => {}
        WidgetKind::Graphic(graphic) => {
            paint_graphic(graphic, node.is_transparent(), abs, dest, canvas);
        }
    }
    paint_behavior(node, abs, dest, canvas);

    for &child in node.children() {
        if let Some(child_node) = tree.get(child) {
            render_widget(tree, child, abs + child_node.pos(), dest, canvas);
        }
    }
}

fn paint_behavior(node: &WidgetNode, abs: Point, dest: Rect, canvas: &mut Canvas) {
    if let Some(behavior) = &node.behavior {
        let mut view = canvas.view(abs, dest);
        behavior.paint(node, &mut view);
    }
}

fn paint_graphic(graphic: &Graphic, transparent: bool, abs: Point, dest: Rect, canvas: &mut Canvas) {
    let texture = graphic.texture();
    let fallback = graphic.default_color();
    let alpha = graphic.alpha();
    for y in dest.top..dest.bottom {
        let row = (y - abs.y) as usize * 2;
        for x in dest.left..dest.right {
            let col = (x - abs.x) as usize;
            let upper = texture.get(row, col).unwrap_or(fallback);
            let lower = texture.get(row + 1, col).unwrap_or(fallback);
            let Some((ch, colors)) = canvas.cell_mut(Point::new(y, x)) else {
                continue;
            };
            if transparent {
                if *ch != HALF_BLOCK {
                    colors.fg = colors.bg;
                }
                colors.fg = blend(colors.fg, upper, alpha);
                colors.bg = blend(colors.bg, lower, alpha);
            } else {
                colors.fg = upper.rgb();
                colors.bg = lower.rgb();
            }
            *ch = HALF_BLOCK;
        }
        canvas.repair_span(y, dest.left, dest.right);
    }
}

/// Keeps one canvas alive across frames.
pub struct Compositor {
    canvas: Canvas,
}

impl Compositor {
    pub fn new(viewport: Size) -> Self {
        Self {
            canvas: Canvas::new(viewport),
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Recompose the full viewport, reallocating only when it changed size.
    pub fn render(&mut self, tree: &WidgetTree, viewport: Size) -> &Canvas {
        if self.canvas.size() != viewport {
            trace!(?viewport, "canvas resized");
            self.canvas.resize(viewport);
        }
        let bounds = self.canvas.bounds();
        render_region(tree, &mut self.canvas, bounds);
        &self.canvas
    }

    /// Recompose only `region` of the existing canvas.
    pub fn render_region(&mut self, tree: &WidgetTree, region: Rect) -> &Canvas {
        render_region(tree, &mut self.canvas, region);
        &self.canvas
    }
}
