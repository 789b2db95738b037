//! Widget records stored in the tree arena.

use std::fmt;

use super::behavior::Behavior;
use super::graphic::Graphic;
use super::tree::WidgetId;
use crate::colors::{AColor, ColorPair, DEFAULT_COLOR_PAIR};
use crate::geometry::{Anchor, Point, PosHint, Size, SizeHint};

/// Plain widgets fill their background; graphic widgets draw a texture.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    Plain,
    Graphic(Graphic),
}

/// Everything needed to create a widget.
pub struct WidgetConfig {
    pub size: Size,
    pub pos: Point,
    pub size_hint: SizeHint,
    pub pos_hint: PosHint,
    pub anchor: Anchor,
    pub is_visible: bool,
    pub is_enabled: bool,
    pub is_transparent: bool,
    pub background_char: char,
    pub background_color_pair: ColorPair,
    pub kind: WidgetKind,
    pub behavior: Option<Box<dyn Behavior>>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            size: Size::new(10, 10),
            pos: Point::ORIGIN,
            size_hint: SizeHint::default(),
            pos_hint: PosHint::default(),
            anchor: Anchor::default(),
            is_visible: true,
            is_enabled: true,
            is_transparent: false,
            background_char: ' ',
            background_color_pair: DEFAULT_COLOR_PAIR,
            kind: WidgetKind::Plain,
            behavior: None,
        }
    }
}

impl WidgetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A transparent graphic widget whose texture starts as `default_color`.
    pub fn graphic(default_color: AColor) -> Self {
        Self {
            is_transparent: true,
            kind: WidgetKind::Graphic(Graphic::new(default_color)),
            ..Self::default()
        }
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    pub fn pos(mut self, pos: Point) -> Self {
        self.pos = pos;
        self
    }

    pub fn size_hint(mut self, hint: SizeHint) -> Self {
        self.size_hint = hint;
        self
    }

    pub fn pos_hint(mut self, hint: PosHint) -> Self {
        self.pos_hint = hint;
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.is_enabled = enabled;
        self
    }

    pub fn transparent(mut self, transparent: bool) -> Self {
        self.is_transparent = transparent;
        self
    }

    pub fn background(mut self, ch: char, color_pair: ColorPair) -> Self {
        self.background_char = ch;
        self.background_color_pair = color_pair;
        self
    }

    /// Replace the graphic state; only meaningful on graphic configs.
    pub fn with_graphic(mut self, graphic: Graphic) -> Self {
        self.kind = WidgetKind::Graphic(graphic);
        self
    }

    pub fn behavior(mut self, behavior: impl Behavior) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }
}

/// A widget in the arena.
pub struct WidgetNode {
    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
    /// Literal geometry, as set by the caller.
    pub(crate) size: Size,
    pub(crate) pos: Point,
    /// Geometry after hint resolution.
    pub(crate) resolved_size: Size,
    pub(crate) resolved_pos: Point,
    pub(crate) size_hint: SizeHint,
    pub(crate) pos_hint: PosHint,
    pub(crate) anchor: Anchor,
    pub(crate) is_visible: bool,
    pub(crate) is_enabled: bool,
    pub(crate) is_transparent: bool,
    pub(crate) background_char: char,
    pub(crate) background_color_pair: ColorPair,
    pub(crate) kind: WidgetKind,
    pub(crate) behavior: Option<Box<dyn Behavior>>,
}

impl WidgetNode {
    pub(crate) fn from_config(config: WidgetConfig) -> Self {
        let mut kind = config.kind;
        if let WidgetKind::Graphic(graphic) = &mut kind {
            graphic.fit(config.size);
        }
        Self {
            parent: None,
            children: Vec::new(),
            size: config.size,
            pos: config.pos,
            resolved_size: config.size,
            resolved_pos: config.pos,
            size_hint: config.size_hint,
            pos_hint: config.pos_hint,
            anchor: config.anchor,
            is_visible: config.is_visible,
            is_enabled: config.is_enabled,
            is_transparent: config.is_transparent,
            background_char: config.background_char,
            background_color_pair: config.background_color_pair,
            kind,
            behavior: config.behavior,
        }
    }

    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Children in paint order.
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// Resolved size.
    pub fn size(&self) -> Size {
        self.resolved_size
    }

    /// Resolved position relative to the parent.
    pub fn pos(&self) -> Point {
        self.resolved_pos
    }

    pub fn literal_size(&self) -> Size {
        self.size
    }

    pub fn literal_pos(&self) -> Point {
        self.pos
    }

    pub fn size_hint(&self) -> &SizeHint {
        &self.size_hint
    }

    pub fn pos_hint(&self) -> &PosHint {
        &self.pos_hint
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible
    }

    pub fn is_enabled(&self) -> bool {
        self.is_enabled
    }

    pub fn is_transparent(&self) -> bool {
        self.is_transparent
    }

    pub fn background_char(&self) -> char {
        self.background_char
    }

    pub fn background_color_pair(&self) -> ColorPair {
        self.background_color_pair
    }

    pub fn kind(&self) -> &WidgetKind {
        &self.kind
    }

    pub fn graphic(&self) -> Option<&Graphic> {
        match &self.kind {
            WidgetKind::Graphic(graphic) => Some(graphic),
            WidgetKind::Plain => None,
        }
    }

    pub fn has_behavior(&self) -> bool {
        self.behavior.is_some()
    }
}

impl fmt::Debug for WidgetNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetNode")
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("size", &self.resolved_size)
            .field("pos", &self.resolved_pos)
            .field("is_visible", &self.is_visible)
            .field("is_enabled", &self.is_enabled)
            .field("is_transparent", &self.is_transparent)
            .field("behavior", &self.behavior.is_some())
            .finish()
    }
}
