//! Mouse report grammars.
//!
//! - SGR (1006): `ESC [ < Cb ; Cx ; Cy M` (press) or `... m` (release)
//! - X10 (1000): `ESC [ M` followed by three raw bytes, each offset by 32
//!
//! Coordinates are 1-based on the wire and 0-based in [`MouseEvent`].

use super::events::{MouseButton, MouseEvent, MouseEventType, Mods};
use crate::geometry::Point;

const SGR_INTRO: &[u8] = b"\x1b[<";
const X10_INTRO: &[u8] = b"\x1b[M";

/// Longest SGR report accepted (three 5-digit numbers plus framing).
const SGR_MAX_LEN: usize = 24;

/// Outcome of matching a byte buffer against a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parse<T> {
    /// The whole buffer is one complete report.
    Complete(T),
    /// The buffer could still become a report.
    Incomplete,
    Invalid,
}

fn decode_mods(cb: u16) -> Mods {
    let mut mods = Mods::empty();
    if cb & 4 != 0 {
        mods |= Mods::SHIFT;
    }
    if cb & 8 != 0 {
        mods |= Mods::ALT;
    }
    if cb & 16 != 0 {
        mods |= Mods::CTRL;
    }
    mods
}

fn decode_button(base: u16) -> MouseButton {
    match base {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::NoButton,
    }
}

fn to_pos(x: u16, y: u16) -> Point {
    Point::new(i32::from(y.saturating_sub(1)), i32::from(x.saturating_sub(1)))
}

/// Match `buf` against the SGR grammar.
pub fn parse_sgr(buf: &[u8]) -> Parse<MouseEvent> {
    if buf.len() <= SGR_INTRO.len() {
        return if SGR_INTRO.starts_with(buf) {
            Parse::Incomplete
        } else {
            Parse::Invalid
        };
    }
    if !buf.starts_with(SGR_INTRO) || buf.len() > SGR_MAX_LEN {
        return Parse::Invalid;
    }

    let body = &buf[SGR_INTRO.len()..];
    let (params, last) = body.split_at(body.len() - 1);
    let is_param_byte = |b: &u8| b.is_ascii_digit() || *b == b';';
    if !params.iter().all(is_param_byte) {
        return Parse::Invalid;
    }
    if params.iter().filter(|&&b| b == b';').count() > 2 {
        return Parse::Invalid;
    }

    let release = match last[0] {
        b'M' => false,
        b'm' => true,
        b if is_param_byte(&b) => {
            return if body.iter().filter(|&&b| b == b';').count() > 2 {
                Parse::Invalid
            } else {
                Parse::Incomplete
            };
        }
        _ => return Parse::Invalid,
    };

    let mut numbers = [0u16; 3];
    let mut fields = params.split(|&b| b == b';');
    for slot in numbers.iter_mut() {
        let Some(field) = fields.next() else {
            return Parse::Invalid;
        };
        let parsed = std::str::from_utf8(field).ok().and_then(|s| s.parse::<u16>().ok());
        match parsed {
            Some(value) => *slot = value,
            None => return Parse::Invalid,
        }
    }
    let [cb, x, y] = numbers;

    let base = cb & 3;
    let event_type = if cb & 64 != 0 {
        if base == 0 {
            MouseEventType::ScrollUp
        } else {
            MouseEventType::ScrollDown
        }
    } else if cb & 32 != 0 {
        MouseEventType::MouseMove
    } else if release {
        MouseEventType::MouseUp
    } else {
        MouseEventType::MouseDown
    };
    let button = if cb & 64 != 0 {
        MouseButton::NoButton
    } else {
        decode_button(base)
    };

    Parse::Complete(MouseEvent {
        pos: to_pos(x, y),
        button,
        event_type,
        mods: decode_mods(cb),
    })
}

/// Match `buf` against the X10 grammar.
pub fn parse_x10(buf: &[u8]) -> Parse<MouseEvent> {
    if buf.len() <= X10_INTRO.len() {
        return if X10_INTRO.starts_with(buf) {
            Parse::Incomplete
        } else {
            Parse::Invalid
        };
    }
    if !buf.starts_with(X10_INTRO) || buf.len() > X10_INTRO.len() + 3 {
        return Parse::Invalid;
    }
    if buf.len() < X10_INTRO.len() + 3 {
        return Parse::Incomplete;
    }

    let cb = u16::from(buf[3].wrapping_sub(32));
    let x = u16::from(buf[4].wrapping_sub(32));
    let y = u16::from(buf[5].wrapping_sub(32));
    let base = cb & 3;
    let (button, event_type) = if cb & 64 != 0 {
        let kind = if base == 0 {
            MouseEventType::ScrollUp
        } else {
            MouseEventType::ScrollDown
        };
        (MouseButton::NoButton, kind)
    } else if cb & 32 != 0 {
        (decode_button(base), MouseEventType::MouseMove)
    } else if base == 3 {
        (MouseButton::NoButton, MouseEventType::MouseUp)
    } else {
        (decode_button(base), MouseEventType::MouseDown)
    };

    Parse::Complete(MouseEvent {
        pos: to_pos(x, y),
        button,
        event_type,
        mods: decode_mods(cb),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sgr_press_and_release() {
        let down = parse_sgr(b"\x1b[<0;10;5M");
        assert_eq!(
            down,
            Parse::Complete(MouseEvent::new(
                Point::new(4, 9),
                MouseButton::Left,
                MouseEventType::MouseDown
            ))
        );
        let up = parse_sgr(b"\x1b[<2;1;1m");
        assert_eq!(
            up,
            Parse::Complete(MouseEvent::new(
                Point::new(0, 0),
                MouseButton::Right,
                MouseEventType::MouseUp
            ))
        );
    }

    #[test]
    fn test_sgr_scroll_and_mods() {
        match parse_sgr(b"\x1b[<81;3;3M") {
            Parse::Complete(event) => {
                assert_eq!(event.event_type, MouseEventType::ScrollDown);
                assert_eq!(event.mods, Mods::CTRL);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sgr_motion() {
        match parse_sgr(b"\x1b[<32;7;2M") {
            Parse::Complete(event) => {
                assert_eq!(event.event_type, MouseEventType::MouseMove);
                assert_eq!(event.button, MouseButton::Left);
                assert_eq!(event.pos, Point::new(1, 6));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_sgr_prefixes() {
        assert_eq!(parse_sgr(b"\x1b["), Parse::Incomplete);
        assert_eq!(parse_sgr(b"\x1b[<"), Parse::Incomplete);
        assert_eq!(parse_sgr(b"\x1b[<0;12"), Parse::Incomplete);
        assert_eq!(parse_sgr(b"\x1b[<0;1;2;"), Parse::Invalid);
        assert_eq!(parse_sgr(b"\x1b[<0;1M"), Parse::Invalid);
        assert_eq!(parse_sgr(b"\x1b[<0x"), Parse::Invalid);
        assert_eq!(parse_sgr(b"\x1b[A"), Parse::Invalid);
    }

    #[test]
    fn test_x10() {
        assert_eq!(parse_x10(b"\x1b[M"), Parse::Incomplete);
        assert_eq!(parse_x10(b"\x1b[M "), Parse::Incomplete);
        assert_eq!(
            parse_x10(b"\x1b[M !!"),
            Parse::Complete(MouseEvent::new(
                Point::new(0, 0),
                MouseButton::Left,
                MouseEventType::MouseDown
            ))
        );
        match parse_x10(b"\x1b[M#*%") {
            Parse::Complete(event) => {
                assert_eq!(event.event_type, MouseEventType::MouseUp);
                assert_eq!(event.pos, Point::new(4, 9));
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}
