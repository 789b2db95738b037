//! Decoded input events.

use bitflags::bitflags;

use crate::geometry::Point;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Mods: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

/// Key identity: a printable character or a named key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Tab,
    Enter,
    Escape,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F1` through `F24`.
    F(u8),
    ScrollUp,
    ScrollDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub key: Key,
    pub mods: Mods,
}

impl KeyEvent {
    pub const fn new(key: Key, mods: Mods) -> Self {
        Self { key, mods }
    }

    /// Unmodified key.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Mods::empty())
    }

    /// Unmodified printable character.
    pub const fn char(ch: char) -> Self {
        Self::plain(Key::Char(ch))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Middle,
    Right,
    NoButton,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseEventType {
    MouseDown,
    MouseUp,
    MouseMove,
    ScrollUp,
    ScrollDown,
}

/// Mouse report in absolute, 0-based terminal coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    pub pos: Point,
    pub button: MouseButton,
    pub event_type: MouseEventType,
    pub mods: Mods,
}

impl MouseEvent {
    pub const fn new(pos: Point, button: MouseButton, event_type: MouseEventType) -> Self {
        Self {
            pos,
            button,
            event_type,
            mods: Mods::empty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste contents.
    Paste(String),
}

impl From<KeyEvent> for Event {
    fn from(event: KeyEvent) -> Self {
        Event::Key(event)
    }
}

impl From<MouseEvent> for Event {
    fn from(event: MouseEvent) -> Self {
        Event::Mouse(event)
    }
}

/// What an escape-table entry decodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Key(KeyEvent),
    /// Recognized but carries no event.
    Ignore,
    /// `ESC [ 200 ~`: the start of a bracketed paste.
    BeginPaste,
}
