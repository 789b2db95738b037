//! Render buffers.
//!
//! A [`Canvas`] is a character grid plus a parallel color-pair grid, both
//! row-major and sized to the viewport. Widgets draw through a
//! [`CanvasView`]: a borrowed window onto the canvas that translates
//! widget-local coordinates and drops every write outside its clip rect.

use unicode_width::UnicodeWidthChar;

use crate::colors::{ColorPair, DEFAULT_COLOR_PAIR};
use crate::geometry::{Point, Rect, Size};

/// Glyph used by graphic widgets: foreground is the upper sub-pixel,
/// background the lower one.
pub const HALF_BLOCK: char = '▀';

/// Placeholder stored in the cell covered by the right half of a wide
/// character. Writers skip it.
pub const WIDE_CONTINUATION: char = '\0';

fn is_wide(ch: char) -> bool {
    ch != WIDE_CONTINUATION && ch.width().is_some_and(|width| width > 1)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    size: Size,
    chars: Vec<char>,
    colors: Vec<ColorPair>,
}

impl Canvas {
    /// Blank canvas in the default colors.
    pub fn new(size: Size) -> Self {
        Self::filled(size, ' ', DEFAULT_COLOR_PAIR)
    }

    pub fn filled(size: Size, ch: char, color_pair: ColorPair) -> Self {
        Self {
            size,
            chars: vec![ch; size.area()],
            colors: vec![color_pair; size.area()],
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// The whole canvas as a rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::from_pos_size(Point::ORIGIN, self.size)
    }

    /// Resize and blank the canvas.
    pub fn resize(&mut self, size: Size) {
        *self = Self::new(size);
    }

    pub fn clear(&mut self, ch: char, color_pair: ColorPair) {
        self.chars.fill(ch);
        self.colors.fill(color_pair);
    }

    fn index(&self, pos: Point) -> Option<usize> {
        if self.bounds().contains(pos) {
            Some(pos.y as usize * usize::from(self.size.width) + pos.x as usize)
        } else {
            None
        }
    }

    pub fn char_at(&self, pos: Point) -> Option<char> {
        self.index(pos).map(|i| self.chars[i])
    }

    pub fn colors_at(&self, pos: Point) -> Option<ColorPair> {
        self.index(pos).map(|i| self.colors[i])
    }

    /// Mutable access to one cell's glyph and colors. Callers that
    /// overwrite glyphs follow up with [`Canvas::repair_span`].
    pub fn cell_mut(&mut self, pos: Point) -> Option<(&mut char, &mut ColorPair)> {
        let i = self.index(pos)?;
        Some((&mut self.chars[i], &mut self.colors[i]))
    }

    /// Fill `rect` (clipped to the canvas).
    pub fn fill_rect(&mut self, rect: Rect, ch: char, color_pair: ColorPair) {
        let Some(rect) = rect.intersection(&self.bounds()) else {
            return;
        };
        let width = usize::from(self.size.width);
        for y in rect.top..rect.bottom {
            let start = y as usize * width + rect.left as usize;
            let end = y as usize * width + rect.right as usize;
            self.chars[start..end].fill(ch);
            self.colors[start..end].fill(color_pair);
            self.repair_span(y, rect.left, rect.right);
        }
    }

    /// Columns `left..right` of row `y` were just overwritten: blank the
    /// halves of wide glyphs on either side whose partner was replaced.
    pub fn repair_span(&mut self, y: i32, left: i32, right: i32) {
        if left >= right {
            return;
        }
        let before = Point::new(y, left - 1);
        if self.char_at(before).is_some_and(is_wide) {
            if let Some((ch, _)) = self.cell_mut(before) {
                *ch = ' ';
            }
        }
        let after = Point::new(y, right);
        if self.char_at(after) == Some(WIDE_CONTINUATION) {
            if let Some((ch, _)) = self.cell_mut(after) {
                *ch = ' ';
            }
        }
    }

    /// One row of glyphs, skipping wide-character continuations.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.size.height {
            return String::new();
        }
        let width = usize::from(self.size.width);
        let start = usize::from(y) * width;
        self.chars[start..start + width]
            .iter()
            .filter(|&&ch| ch != WIDE_CONTINUATION)
            .collect()
    }

    /// A view whose local origin is `origin` and whose writes are limited
    /// to `clip` (absolute coordinates, clipped to the canvas).
    pub fn view(&mut self, origin: Point, clip: Rect) -> CanvasView<'_> {
        let clip = clip.intersection(&self.bounds()).unwrap_or_default();
        CanvasView {
            canvas: self,
            origin,
            clip,
        }
    }
}

/// A clipped window onto a [`Canvas`] in widget-local coordinates.
pub struct CanvasView<'a> {
    canvas: &'a mut Canvas,
    origin: Point,
    clip: Rect,
}

impl CanvasView<'_> {
    /// The writable region in local coordinates.
    pub fn region(&self) -> Rect {
        self.clip.offset(Point::ORIGIN - self.origin)
    }

    fn absolute(&self, local: Point) -> Option<Point> {
        let pos = local + self.origin;
        self.clip.contains(pos).then_some(pos)
    }

    pub fn char_at(&self, local: Point) -> Option<char> {
        self.canvas.char_at(self.absolute(local)?)
    }

    pub fn colors_at(&self, local: Point) -> Option<ColorPair> {
        self.canvas.colors_at(self.absolute(local)?)
    }

    /// Returns false if `local` is clipped.
    pub fn put_char(&mut self, local: Point, ch: char) -> bool {
        let Some(pos) = self.absolute(local) else {
            return false;
        };
        match self.canvas.cell_mut(pos) {
            Some((cell, _)) => {
                *cell = ch;
                self.canvas.repair_span(pos.y, pos.x, pos.x + 1);
                true
            }
            None => false,
        }
    }

    pub fn set_colors(&mut self, local: Point, color_pair: ColorPair) -> bool {
        match self.absolute(local).and_then(|pos| self.canvas.cell_mut(pos)) {
            Some((_, colors)) => {
                *colors = color_pair;
                true
            }
            None => false,
        }
    }

    /// Write `text` starting at `local`, advancing by display width.
    /// A wide character cut by the clip rect is written as spaces.
    /// Returns the number of columns advanced.
    pub fn put_str(&mut self, local: Point, text: &str, color_pair: Option<ColorPair>) -> i32 {
        let mut x = local.x;
        let mut span: Option<(Point, i32)> = None;
        for ch in text.chars() {
            let width = match ch.width() {
                Some(width) if width > 0 => width as i32,
                _ => continue,
            };
            let whole = (0..width).all(|offset| self.absolute(Point::new(local.y, x + offset)).is_some());
            for offset in 0..width {
                let Some(pos) = self.absolute(Point::new(local.y, x + offset)) else {
                    continue;
                };
                let glyph = match (whole, offset) {
                    (false, _) => ' ',
                    (true, 0) => ch,
                    (true, _) => WIDE_CONTINUATION,
                };
                if let Some((cell, colors)) = self.canvas.cell_mut(pos) {
                    *cell = glyph;
                    if let Some(pair) = color_pair {
                        *colors = pair;
                    }
                }
                span = Some(match span {
                    Some((start, _)) => (start, pos.x),
                    None => (pos, pos.x),
                });
            }
            x += width;
        }
        if let Some((start, last)) = span {
            self.canvas.repair_span(start.y, start.x, last + 1);
        }
        x - local.x
    }

    /// Fill the whole writable region.
    pub fn fill(&mut self, ch: char, color_pair: ColorPair) {
        self.canvas.fill_rect(self.clip, ch, color_pair);
    }
}
