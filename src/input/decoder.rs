//! Terminal input decoder
//!
//! Turns the raw byte stream read from the terminal into [`Event`]s.
//!
//! Bytes accumulate in a pending buffer while they are a strict prefix of
//! some known sequence. A buffer that matches exactly and cannot grow into
//! anything longer is emitted at once. A buffer that can neither match nor
//! grow is split: the longest exact match at its front is emitted (or, when
//! there is none, the first byte as a literal key) and the rest is decoded
//! again. Because a lone `ESC` and the start of an escape sequence look the
//! same, the caller invokes [`Decoder::force_timeout`] once input has gone
//! quiet for a short while.

use std::collections::VecDeque;

use tracing::{debug, trace};

use super::escapes::{table, EscapeTable};
use super::events::{Escape, Event, KeyEvent};
use super::mouse::{parse_sgr, parse_x10, Parse};

const PASTE_END: &[u8] = b"\x1b[201~";

/// Paste bytes buffered before a partial [`Event::Paste`] is flushed.
pub const PASTE_CHUNK: usize = 64 * 1024;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum State {
    #[default]
    Idle,
    /// Bytes that are a strict prefix of at least one sequence.
    Pending(Vec<u8>),
    /// Inside a bracketed paste. `chunked` once part of it was flushed.
    Paste { buf: Vec<u8>, chunked: bool },
}

/// A complete match for some byte buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Emit(Event),
    Ignore,
    BeginPaste,
}

impl From<Escape> for Token {
    fn from(escape: Escape) -> Self {
        match escape {
            Escape::Key(key) => Token::Emit(Event::Key(key)),
            Escape::Ignore => Token::Ignore,
            Escape::BeginPaste => Token::BeginPaste,
        }
    }
}

/// Byte stream to event decoder.
pub struct Decoder {
    state: State,
    table: &'static EscapeTable,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            table: table(),
        }
    }

    /// True while bytes are waiting for more input or a timeout.
    pub fn has_pending(&self) -> bool {
        matches!(self.state, State::Pending(_))
    }

    /// True between `ESC [ 200 ~` and `ESC [ 201 ~`.
    pub fn in_paste(&self) -> bool {
        matches!(self.state, State::Paste { .. })
    }

    /// Feed a chunk of bytes, returning every event it completes.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        let mut input: VecDeque<u8> = bytes.iter().copied().collect();
        while let Some(byte) = input.pop_front() {
            let leftover = self.step(byte, &mut events);
            for &b in leftover.iter().rev() {
                input.push_front(b);
            }
        }
        events
    }

    /// Feed a single byte.
    pub fn feed(&mut self, byte: u8) -> Vec<Event> {
        self.feed_bytes(&[byte])
    }

    /// Resolve everything pending as if no more bytes will follow.
    ///
    /// A bracketed paste in progress is left alone.
    pub fn force_timeout(&mut self) -> Vec<Event> {
        let mut events = Vec::new();
        while self.has_pending() {
            let State::Pending(buf) = std::mem::take(&mut self.state) else {
                break;
            };
            trace!(pending = ?buf, "input timeout");
            let consumed = self.emit_front(&buf, &mut events);
            let rest = buf[consumed..].to_vec();
            events.extend(self.feed_bytes(&rest));
        }
        events
    }

    /// Advance by one byte; returns bytes that must be decoded again.
    fn step(&mut self, byte: u8, events: &mut Vec<Event>) -> Vec<u8> {
        match std::mem::take(&mut self.state) {
            State::Paste { mut buf, chunked } => {
                buf.push(byte);
                if buf.ends_with(PASTE_END) {
                    buf.truncate(buf.len() - PASTE_END.len());
                    if !buf.is_empty() || !chunked {
                        let text = String::from_utf8_lossy(&buf).into_owned();
                        debug!(len = text.len(), "bracketed paste");
                        events.push(Event::Paste(text));
                    }
                } else if buf.len() >= PASTE_CHUNK {
                    let rest = flush_paste_chunk(&mut buf, events);
                    self.state = State::Paste { buf: rest, chunked: true };
                } else {
                    self.state = State::Paste { buf, chunked };
                }
                Vec::new()
            }
            State::Idle => self.advance(vec![byte], events),
            State::Pending(mut buf) => {
                buf.push(byte);
                self.advance(buf, events)
            }
        }
    }

    fn advance(&mut self, buf: Vec<u8>, events: &mut Vec<Event>) -> Vec<u8> {
        if self.is_strict_prefix(&buf) {
            self.state = State::Pending(buf);
            return Vec::new();
        }
        if let Some(token) = self.exact(&buf) {
            self.apply(token, events);
            return Vec::new();
        }
        let consumed = self.emit_front(&buf, events);
        if consumed > 1 || buf.len() > 1 {
            trace!(bytes = ?buf, consumed, "split unrecognized input");
        }
        buf[consumed..].to_vec()
    }

    /// Emit the longest exact match at the front of `buf`, or its first
    /// byte as a literal key. Returns the number of bytes consumed.
    fn emit_front(&mut self, buf: &[u8], events: &mut Vec<Event>) -> usize {
        for end in (1..=buf.len()).rev() {
            if let Some(token) = self.exact(&buf[..end]) {
                self.apply(token, events);
                return end;
            }
        }
        if let Some(&first) = buf.first() {
            debug!(byte = first, "undecodable byte");
            events.push(Event::Key(literal(first)));
            1
        } else {
            0
        }
    }

    fn apply(&mut self, token: Token, events: &mut Vec<Event>) {
        match token {
            Token::Emit(event) => events.push(event),
            Token::Ignore => {}
            Token::BeginPaste => {
                self.state = State::Paste {
                    buf: Vec::new(),
                    chunked: false,
                }
            }
        }
    }

    fn exact(&self, buf: &[u8]) -> Option<Token> {
        if let Some(escape) = self.table.get(buf) {
            return Some(escape.into());
        }
        if let [byte] = buf {
            return (0x20..0x7f)
                .contains(byte)
                .then(|| Token::Emit(Event::Key(KeyEvent::char(char::from(*byte)))));
        }
        if let Utf8::Complete(ch) = utf8(buf) {
            return Some(Token::Emit(Event::Key(KeyEvent::char(ch))));
        }
        if let Parse::Complete(mouse) = parse_sgr(buf) {
            return Some(Token::Emit(Event::Mouse(mouse)));
        }
        if let Parse::Complete(mouse) = parse_x10(buf) {
            return Some(Token::Emit(Event::Mouse(mouse)));
        }
        None
    }

    fn is_strict_prefix(&self, buf: &[u8]) -> bool {
        self.table.is_strict_prefix(buf)
            || utf8(buf) == Utf8::Incomplete
            || parse_sgr(buf) == Parse::Incomplete
            || parse_x10(buf) == Parse::Incomplete
    }
}

/// Emit the front of an oversized paste buffer and return the tail, which
/// keeps any partial end marker and never splits a UTF-8 character.
fn flush_paste_chunk(buf: &mut Vec<u8>, events: &mut Vec<Event>) -> Vec<u8> {
    let mut cut = buf.len().saturating_sub(PASTE_END.len() - 1);
    let floor = cut.saturating_sub(3);
    while cut > floor && buf.get(cut).is_some_and(|b| b & 0xc0 == 0x80) {
        cut -= 1;
    }
    let rest = buf.split_off(cut);
    trace!(len = buf.len(), "paste chunk flushed");
    events.push(Event::Paste(String::from_utf8_lossy(buf).into_owned()));
    rest
}

/// The literal reading of a byte that starts no known sequence.
fn literal(byte: u8) -> KeyEvent {
    match table().get(&[byte]) {
        Some(Escape::Key(key)) => key,
        _ if (0x20..0x7f).contains(&byte) => KeyEvent::char(char::from(byte)),
        _ => KeyEvent::char(char::REPLACEMENT_CHARACTER),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Utf8 {
    Complete(char),
    Incomplete,
    Invalid,
}

/// Match `buf` against a single multi-byte UTF-8 character.
fn utf8(buf: &[u8]) -> Utf8 {
    let Some(&lead) = buf.first() else {
        return Utf8::Invalid;
    };
    let expected = match lead {
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Utf8::Invalid,
    };
    if buf.len() > expected || !buf[1..].iter().all(|b| b & 0xc0 == 0x80) {
        return Utf8::Invalid;
    }
    if buf.len() < expected {
        return Utf8::Incomplete;
    }
    match std::str::from_utf8(buf).ok().and_then(|s| s.chars().next()) {
        Some(ch) => Utf8::Complete(ch),
        None => Utf8::Invalid,
    }
}
