//! VT100 / xterm escape-sequence table.
//!
//! Exact byte sequences mapped to the key they encode. Several entries are
//! prefixes of longer ones (`ESC` itself, most obviously); the table only
//! records that fact, resolving it is the decoder's job.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use super::events::{Escape, Key, KeyEvent, Mods};

const NONE: Mods = Mods::empty();
const A: Mods = Mods::ALT;
const C: Mods = Mods::CTRL;
const S: Mods = Mods::SHIFT;
const AC: Mods = Mods::ALT.union(Mods::CTRL);
const AS: Mods = Mods::ALT.union(Mods::SHIFT);
const CS: Mods = Mods::CTRL.union(Mods::SHIFT);
const ACS: Mods = Mods::ALT.union(Mods::CTRL).union(Mods::SHIFT);

const fn key(key: Key, mods: Mods) -> Escape {
    Escape::Key(KeyEvent::new(key, mods))
}

/// Every recognized sequence. Control bytes `0x00..=0x1F` and `0x7F` are all
/// present, so a literal control byte always has an interpretation.
pub const ANSI_ESCAPES: &[(&[u8], Escape)] = &[
    (b"\x00", key(Key::Char(' '), C)),
    (b"\x01", key(Key::Char('a'), C)),
    (b"\x02", key(Key::Char('b'), C)),
    (b"\x03", key(Key::Char('c'), C)),
    (b"\x04", key(Key::Char('d'), C)),
    (b"\x05", key(Key::Char('e'), C)),
    (b"\x06", key(Key::Char('f'), C)),
    (b"\x07", key(Key::Char('g'), C)),
    (b"\x08", key(Key::Char('h'), C)),
    (b"\x09", key(Key::Tab, NONE)),
    (b"\x0a", key(Key::Char('j'), C)),
    (b"\x0b", key(Key::Char('k'), C)),
    (b"\x0c", key(Key::Char('l'), C)),
    (b"\x0d", key(Key::Enter, NONE)),
    (b"\x0e", key(Key::Char('n'), C)),
    (b"\x0f", key(Key::Char('o'), C)),
    (b"\x10", key(Key::Char('p'), C)),
    (b"\x11", key(Key::Char('q'), C)),
    (b"\x12", key(Key::Char('r'), C)),
    (b"\x13", key(Key::Char('s'), C)),
    (b"\x14", key(Key::Char('t'), C)),
    (b"\x15", key(Key::Char('u'), C)),
    (b"\x16", key(Key::Char('v'), C)),
    (b"\x17", key(Key::Char('w'), C)),
    (b"\x18", key(Key::Char('x'), C)),
    (b"\x19", key(Key::Char('y'), C)),
    (b"\x1a", key(Key::Char('z'), C)),
    (b"\x1b", key(Key::Escape, NONE)),
    (b"\x9b", key(Key::Escape, S)),
    (b"\xc2\x9b", key(Key::Escape, S)),
    (b"\x1c", key(Key::Char('\\'), C)),
    (b"\x1d", key(Key::Char(']'), C)),
    (b"\x1e", key(Key::Char('^'), C)),
    (b"\x1f", key(Key::Char('-'), C)),
    (b"\x7f", key(Key::Backspace, NONE)),
    (b"\x1b[1~", key(Key::Home, NONE)),
    (b"\x1b[2~", key(Key::Insert, NONE)),
    (b"\x1b[3~", key(Key::Delete, NONE)),
    (b"\x1b[4~", key(Key::End, NONE)),
    (b"\x1b[5~", key(Key::PageUp, NONE)),
    (b"\x1b[6~", key(Key::PageDown, NONE)),
    (b"\x1b[7~", key(Key::Home, NONE)),
    (b"\x1b[8~", key(Key::End, NONE)),
    (b"\x1b[Z", key(Key::Tab, S)),
    (b"\x1b[~", key(Key::Tab, S)),
    (b"\x1bOP", key(Key::F(1), NONE)),
    (b"\x1bOQ", key(Key::F(2), NONE)),
    (b"\x1bOR", key(Key::F(3), NONE)),
    (b"\x1bOS", key(Key::F(4), NONE)),
    (b"\x1b[[A", key(Key::F(1), NONE)),
    (b"\x1b[[B", key(Key::F(2), NONE)),
    (b"\x1b[[C", key(Key::F(3), NONE)),
    (b"\x1b[[D", key(Key::F(4), NONE)),
    (b"\x1b[[E", key(Key::F(5), NONE)),
    (b"\x1b[11~", key(Key::F(1), NONE)),
    (b"\x1b[12~", key(Key::F(2), NONE)),
    (b"\x1b[13~", key(Key::F(3), NONE)),
    (b"\x1b[14~", key(Key::F(4), NONE)),
    (b"\x1b[15~", key(Key::F(5), NONE)),
    (b"\x1b[17~", key(Key::F(6), NONE)),
    (b"\x1b[18~", key(Key::F(7), NONE)),
    (b"\x1b[19~", key(Key::F(8), NONE)),
    (b"\x1b[20~", key(Key::F(9), NONE)),
    (b"\x1b[21~", key(Key::F(10), NONE)),
    (b"\x1b[23~", key(Key::F(11), NONE)),
    (b"\x1b[24~", key(Key::F(12), NONE)),
    (b"\x1b[25~", key(Key::F(13), NONE)),
    (b"\x1b[26~", key(Key::F(14), NONE)),
    (b"\x1b[28~", key(Key::F(15), NONE)),
    (b"\x1b[29~", key(Key::F(16), NONE)),
    (b"\x1b[31~", key(Key::F(17), NONE)),
    (b"\x1b[32~", key(Key::F(18), NONE)),
    (b"\x1b[33~", key(Key::F(19), NONE)),
    (b"\x1b[34~", key(Key::F(20), NONE)),
    (b"\x1b[1;2P", key(Key::F(13), NONE)),
    (b"\x1b[1;2Q", key(Key::F(14), NONE)),
    (b"\x1b[1;2R", key(Key::F(15), NONE)),
    (b"\x1b[1;2S", key(Key::F(16), NONE)),
    (b"\x1b[15;2~", key(Key::F(17), NONE)),
    (b"\x1b[17;2~", key(Key::F(18), NONE)),
    (b"\x1b[18;2~", key(Key::F(19), NONE)),
    (b"\x1b[19;2~", key(Key::F(20), NONE)),
    (b"\x1b[20;2~", key(Key::F(21), NONE)),
    (b"\x1b[21;2~", key(Key::F(22), NONE)),
    (b"\x1b[23;2~", key(Key::F(23), NONE)),
    (b"\x1b[24;2~", key(Key::F(24), NONE)),
    (b"\x1b[1;5P", key(Key::F(1), C)),
    (b"\x1b[1;5Q", key(Key::F(2), C)),
    (b"\x1b[1;5R", key(Key::F(3), C)),
    (b"\x1b[1;5S", key(Key::F(4), C)),
    (b"\x1b[15;5~", key(Key::F(5), C)),
    (b"\x1b[17;5~", key(Key::F(6), C)),
    (b"\x1b[18;5~", key(Key::F(7), C)),
    (b"\x1b[19;5~", key(Key::F(8), C)),
    (b"\x1b[20;5~", key(Key::F(9), C)),
    (b"\x1b[21;5~", key(Key::F(10), C)),
    (b"\x1b[23;5~", key(Key::F(11), C)),
    (b"\x1b[24;5~", key(Key::F(12), C)),
    (b"\x1b[1;6P", key(Key::F(13), C)),
    (b"\x1b[1;6Q", key(Key::F(14), C)),
    (b"\x1b[1;6R", key(Key::F(15), C)),
    (b"\x1b[1;6S", key(Key::F(16), C)),
    (b"\x1b[15;6~", key(Key::F(17), C)),
    (b"\x1b[17;6~", key(Key::F(18), C)),
    (b"\x1b[18;6~", key(Key::F(19), C)),
    (b"\x1b[19;6~", key(Key::F(20), C)),
    (b"\x1b[20;6~", key(Key::F(21), C)),
    (b"\x1b[21;6~", key(Key::F(22), C)),
    (b"\x1b[23;6~", key(Key::F(23), C)),
    (b"\x1b[24;6~", key(Key::F(24), C)),
    (b"\x1b[62~", key(Key::ScrollUp, NONE)),
    (b"\x1b[63~", key(Key::ScrollDown, NONE)),
    (b"\x1b[200~", Escape::BeginPaste),
    (b"\x1b[E", Escape::Ignore),
    (b"\x1b[G", Escape::Ignore),
    (b"\x1b[3;2~", key(Key::Delete, S)),
    (b"\x1b[5;2~", key(Key::PageUp, S)),
    (b"\x1b[6;2~", key(Key::PageDown, S)),
    (b"\x1b[2;3~", key(Key::Insert, A)),
    (b"\x1b[3;3~", key(Key::Delete, A)),
    (b"\x1b[5;3~", key(Key::PageUp, A)),
    (b"\x1b[6;3~", key(Key::PageDown, A)),
    (b"\x1b[2;4~", key(Key::Insert, AS)),
    (b"\x1b[3;4~", key(Key::Delete, AS)),
    (b"\x1b[5;4~", key(Key::PageUp, AS)),
    (b"\x1b[6;4~", key(Key::PageDown, AS)),
    (b"\x1b[3;5~", key(Key::Delete, C)),
    (b"\x1b[5;5~", key(Key::PageUp, C)),
    (b"\x1b[6;5~", key(Key::PageDown, C)),
    (b"\x1b[3;6~", key(Key::Delete, CS)),
    (b"\x1b[5;6~", key(Key::PageUp, CS)),
    (b"\x1b[6;6~", key(Key::PageDown, CS)),
    (b"\x1b[2;7~", key(Key::Insert, AC)),
    (b"\x1b[5;7~", key(Key::PageUp, AC)),
    (b"\x1b[6;7~", key(Key::PageDown, AC)),
    (b"\x1b[2;8~", key(Key::Insert, ACS)),
    (b"\x1b[5;8~", key(Key::PageUp, ACS)),
    (b"\x1b[6;8~", key(Key::PageDown, ACS)),
    (b"\x1b[A", key(Key::Up, NONE)),
    (b"\x1b[B", key(Key::Down, NONE)),
    (b"\x1b[C", key(Key::Right, NONE)),
    (b"\x1b[D", key(Key::Left, NONE)),
    (b"\x1b[F", key(Key::End, NONE)),
    (b"\x1b[H", key(Key::Home, NONE)),
    (b"\x1bOA", key(Key::Up, NONE)),
    (b"\x1bOB", key(Key::Down, NONE)),
    (b"\x1bOC", key(Key::Right, NONE)),
    (b"\x1bOD", key(Key::Left, NONE)),
    (b"\x1bOF", key(Key::End, NONE)),
    (b"\x1bOH", key(Key::Home, NONE)),
    (b"\x1b[1;2A", key(Key::Up, S)),
    (b"\x1b[1;2B", key(Key::Down, S)),
    (b"\x1b[1;2C", key(Key::Right, S)),
    (b"\x1b[1;2D", key(Key::Left, S)),
    (b"\x1b[1;2F", key(Key::End, S)),
    (b"\x1b[1;2H", key(Key::Home, S)),
    (b"\x1b[1;3A", key(Key::Up, A)),
    (b"\x1b[1;3B", key(Key::Down, A)),
    (b"\x1b[1;3C", key(Key::Right, A)),
    (b"\x1b[1;3D", key(Key::Left, A)),
    (b"\x1b[1;3F", key(Key::End, A)),
    (b"\x1b[1;3H", key(Key::Home, A)),
    (b"\x1b[1;4A", key(Key::Up, AS)),
    (b"\x1b[1;4B", key(Key::Down, AS)),
    (b"\x1b[1;4C", key(Key::Right, AS)),
    (b"\x1b[1;4D", key(Key::Left, AS)),
    (b"\x1b[1;4F", key(Key::End, AS)),
    (b"\x1b[1;4H", key(Key::Home, AS)),
    (b"\x1b[1;5A", key(Key::Up, C)),
    (b"\x1b[1;5B", key(Key::Down, C)),
    (b"\x1b[1;5C", key(Key::Right, C)),
    (b"\x1b[1;5D", key(Key::Left, C)),
    (b"\x1b[1;5F", key(Key::End, C)),
    (b"\x1b[1;5H", key(Key::Home, C)),
    (b"\x1b[5A", key(Key::Up, C)),
    (b"\x1b[5B", key(Key::Down, C)),
    (b"\x1b[5C", key(Key::Right, C)),
    (b"\x1b[5D", key(Key::Left, C)),
    (b"\x1bOc", key(Key::Right, C)),
    (b"\x1bOd", key(Key::Left, C)),
    (b"\x1b[1;6A", key(Key::Up, CS)),
    (b"\x1b[1;6B", key(Key::Down, CS)),
    (b"\x1b[1;6C", key(Key::Right, CS)),
    (b"\x1b[1;6D", key(Key::Left, CS)),
    (b"\x1b[1;6F", key(Key::End, CS)),
    (b"\x1b[1;6H", key(Key::Home, CS)),
    (b"\x1b[1;7A", key(Key::Up, AC)),
    (b"\x1b[1;7B", key(Key::Down, AC)),
    (b"\x1b[1;7C", key(Key::Right, AC)),
    (b"\x1b[1;7D", key(Key::Left, AC)),
    (b"\x1b[1;7F", key(Key::End, AC)),
    (b"\x1b[1;7H", key(Key::Home, AC)),
    (b"\x1b[1;8A", key(Key::Up, ACS)),
    (b"\x1b[1;8B", key(Key::Down, ACS)),
    (b"\x1b[1;8C", key(Key::Right, ACS)),
    (b"\x1b[1;8D", key(Key::Left, ACS)),
    (b"\x1b[1;8F", key(Key::End, ACS)),
    (b"\x1b[1;8H", key(Key::Home, ACS)),
    (b"\x1b[1;9A", key(Key::Up, A)),
    (b"\x1b[1;9B", key(Key::Down, A)),
    (b"\x1b[1;9C", key(Key::Right, A)),
    (b"\x1b[1;9D", key(Key::Left, A)),
    (b"\x1b[1;5p", key(Key::Char('0'), C)),
    (b"\x1b[1;5q", key(Key::Char('1'), C)),
    (b"\x1b[1;5r", key(Key::Char('2'), C)),
    (b"\x1b[1;5s", key(Key::Char('3'), C)),
    (b"\x1b[1;5t", key(Key::Char('4'), C)),
    (b"\x1b[1;5u", key(Key::Char('5'), C)),
    (b"\x1b[1;5v", key(Key::Char('6'), C)),
    (b"\x1b[1;5w", key(Key::Char('7'), C)),
    (b"\x1b[1;5x", key(Key::Char('8'), C)),
    (b"\x1b[1;5y", key(Key::Char('9'), C)),
    (b"\x1b[1;6p", key(Key::Char('0'), CS)),
    (b"\x1b[1;6q", key(Key::Char('1'), CS)),
    (b"\x1b[1;6r", key(Key::Char('2'), CS)),
    (b"\x1b[1;6s", key(Key::Char('3'), CS)),
    (b"\x1b[1;6t", key(Key::Char('4'), CS)),
    (b"\x1b[1;6u", key(Key::Char('5'), CS)),
    (b"\x1b[1;6v", key(Key::Char('6'), CS)),
    (b"\x1b[1;6w", key(Key::Char('7'), CS)),
    (b"\x1b[1;6x", key(Key::Char('8'), CS)),
    (b"\x1b[1;6y", key(Key::Char('9'), CS)),
    (b"\x1b[1;7p", key(Key::Char('0'), AC)),
    (b"\x1b[1;7q", key(Key::Char('1'), AC)),
    (b"\x1b[1;7r", key(Key::Char('2'), AC)),
    (b"\x1b[1;7s", key(Key::Char('3'), AC)),
    (b"\x1b[1;7t", key(Key::Char('4'), AC)),
    (b"\x1b[1;7u", key(Key::Char('5'), AC)),
    (b"\x1b[1;7v", key(Key::Char('6'), AC)),
    (b"\x1b[1;7w", key(Key::Char('7'), AC)),
    (b"\x1b[1;7x", key(Key::Char('8'), AC)),
    (b"\x1b[1;7y", key(Key::Char('9'), AC)),
    (b"\x1b[1;8p", key(Key::Char('0'), ACS)),
    (b"\x1b[1;8q", key(Key::Char('1'), ACS)),
    (b"\x1b[1;8r", key(Key::Char('2'), ACS)),
    (b"\x1b[1;8s", key(Key::Char('3'), ACS)),
    (b"\x1b[1;8t", key(Key::Char('4'), ACS)),
    (b"\x1b[1;8u", key(Key::Char('5'), ACS)),
    (b"\x1b[1;8v", key(Key::Char('6'), ACS)),
    (b"\x1b[1;8w", key(Key::Char('7'), ACS)),
    (b"\x1b[1;8x", key(Key::Char('8'), ACS)),
    (b"\x1b[1;8y", key(Key::Char('9'), ACS)),
    // WSL
    (b"\x1b[1;3P", key(Key::F(1), A)),
    (b"\x1b[1;3Q", key(Key::F(2), A)),
    (b"\x1b[1;3R", key(Key::F(3), A)),
    (b"\x1b[15;3~", key(Key::F(5), A)),
    (b"\x1b[17;3~", key(Key::F(6), A)),
    (b"\x1b[18;3~", key(Key::F(7), A)),
    (b"\x1b[19;3~", key(Key::F(8), A)),
    (b"\x1b[20;3~", key(Key::F(9), A)),
    (b"\x1b[21;3~", key(Key::F(10), A)),
    (b"\x1b[23;3~", key(Key::F(11), A)),
    (b"\x1b[24;3~", key(Key::F(12), A)),
    (b"\x1b[1;7P", key(Key::F(1), AC)),
    (b"\x1b[1;7Q", key(Key::F(2), AC)),
    (b"\x1b[1;7R", key(Key::F(3), AC)),
    (b"\x1b[1;7S", key(Key::F(4), AC)),
    (b"\x1b[15;7~", key(Key::F(5), AC)),
    (b"\x1b[17;7~", key(Key::F(6), AC)),
    (b"\x1b[18;7~", key(Key::F(7), AC)),
    (b"\x1b[19;7~", key(Key::F(8), AC)),
    (b"\x1b[20;7~", key(Key::F(9), AC)),
    (b"\x1b[21;7~", key(Key::F(10), AC)),
    (b"\x1b[23;7~", key(Key::F(11), AC)),
    (b"\x1b[24;7~", key(Key::F(12), AC)),
    (b"\x1b[1;4P", key(Key::F(1), AS)),
    (b"\x1b[1;4Q", key(Key::F(2), AS)),
    (b"\x1b[1;4R", key(Key::F(3), AS)),
    (b"\x1b[1;4S", key(Key::F(4), AS)),
    (b"\x1b[15;4~", key(Key::F(5), AS)),
    (b"\x1b[17;4~", key(Key::F(6), AS)),
    (b"\x1b[18;4~", key(Key::F(7), AS)),
    (b"\x1b[19;4~", key(Key::F(8), AS)),
    (b"\x1b[20;4~", key(Key::F(9), AS)),
    (b"\x1b[21;4~", key(Key::F(10), AS)),
    (b"\x1b[23;4~", key(Key::F(11), AS)),
    (b"\x1b[24;4~", key(Key::F(12), AS)),
    (b"\x1b[1;8P", key(Key::F(1), ACS)),
    (b"\x1b[1;8Q", key(Key::F(2), ACS)),
    (b"\x1b[1;8R", key(Key::F(3), ACS)),
    (b"\x1b[1;8S", key(Key::F(4), ACS)),
    (b"\x1b[15;8~", key(Key::F(5), ACS)),
    (b"\x1b[17;8~", key(Key::F(6), ACS)),
    (b"\x1b[18;8~", key(Key::F(7), ACS)),
    (b"\x1b[19;8~", key(Key::F(8), ACS)),
    (b"\x1b[20;8~", key(Key::F(9), ACS)),
    (b"\x1b[21;8~", key(Key::F(10), ACS)),
    (b"\x1b[23;8~", key(Key::F(11), ACS)),
    (b"\x1b[24;8~", key(Key::F(12), ACS)),
    (b"\x1b\x01", key(Key::Char('a'), AC)),
    (b"\x1b\x02", key(Key::Char('b'), AC)),
    (b"\x1b\x03", key(Key::Char('c'), AC)),
    (b"\x1b\x04", key(Key::Char('d'), AC)),
    (b"\x1b\x05", key(Key::Char('e'), AC)),
    (b"\x1b\x06", key(Key::Char('f'), AC)),
    (b"\x1b\x07", key(Key::Char('g'), AC)),
    (b"\x1b\x08", key(Key::Char('h'), AC)),
    (b"\x1b\x09", key(Key::Char('i'), AC)),
    (b"\x1b\x0a", key(Key::Char('j'), AC)),
    (b"\x1b\x0b", key(Key::Char('k'), AC)),
    (b"\x1b\x0c", key(Key::Char('l'), AC)),
    (b"\x1b\x0d", key(Key::Char('m'), AC)),
    (b"\x1b\x0e", key(Key::Char('n'), AC)),
    (b"\x1b\x0f", key(Key::Char('o'), AC)),
    (b"\x1b\x10", key(Key::Char('p'), AC)),
    (b"\x1b\x11", key(Key::Char('q'), AC)),
    (b"\x1b\x12", key(Key::Char('r'), AC)),
    (b"\x1b\x13", key(Key::Char('s'), AC)),
    (b"\x1b\x14", key(Key::Char('t'), AC)),
    (b"\x1b\x15", key(Key::Char('u'), AC)),
    (b"\x1b\x16", key(Key::Char('v'), AC)),
    (b"\x1b\x17", key(Key::Char('w'), AC)),
    (b"\x1b\x18", key(Key::Char('x'), AC)),
    (b"\x1b\x19", key(Key::Char('y'), AC)),
    (b"\x1b\x1a", key(Key::Char('z'), AC)),
];

/// Lookup structure over [`ANSI_ESCAPES`].
pub struct EscapeTable {
    entries: HashMap<&'static [u8], Escape>,
    prefixes: HashSet<&'static [u8]>,
    max_len: usize,
}

impl EscapeTable {
    fn build() -> Self {
        let mut entries = HashMap::with_capacity(ANSI_ESCAPES.len());
        let mut prefixes = HashSet::new();
        let mut max_len = 0;
        for &(bytes, escape) in ANSI_ESCAPES {
            entries.insert(bytes, escape);
            for end in 1..bytes.len() {
                prefixes.insert(&bytes[..end]);
            }
            max_len = max_len.max(bytes.len());
        }
        Self {
            entries,
            prefixes,
            max_len,
        }
    }

    pub fn get(&self, bytes: &[u8]) -> Option<Escape> {
        self.entries.get(bytes).copied()
    }

    /// True if some longer entry starts with `bytes`.
    pub fn is_strict_prefix(&self, bytes: &[u8]) -> bool {
        self.prefixes.contains(bytes)
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The shared, immutable table.
pub fn table() -> &'static EscapeTable {
    static TABLE: OnceLock<EscapeTable> = OnceLock::new();
    TABLE.get_or_init(EscapeTable::build)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequences_are_unique() {
        assert_eq!(table().len(), ANSI_ESCAPES.len());
    }

    #[test]
    fn test_every_control_byte_is_mapped() {
        for byte in (0x00..=0x1f).chain([0x7f]) {
            assert!(table().get(&[byte]).is_some(), "missing {:#04x}", byte);
        }
    }

    #[test]
    fn test_escape_is_a_prefix() {
        assert_eq!(table().get(b"\x1b"), Some(key(Key::Escape, NONE)));
        assert!(table().is_strict_prefix(b"\x1b"));
        assert!(table().is_strict_prefix(b"\x1b[1;5"));
        assert!(!table().is_strict_prefix(b"\x1b[A"));
    }

    #[test]
    fn test_modifier_entries() {
        assert_eq!(table().get(b"\x1b[1;6C"), Some(key(Key::Right, CS)));
        assert_eq!(table().get(b"\x1b[24;8~"), Some(key(Key::F(12), ACS)));
        assert_eq!(table().get(b"\x1b[200~"), Some(Escape::BeginPaste));
        assert!(table().max_len() <= 8);
    }
}
