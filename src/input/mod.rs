//! Terminal input decoding.
//!
//! - **events**: `Event`, `KeyEvent`, `MouseEvent` and the `Mods` bitflags
//! - **escapes**: the static VT100/xterm escape-sequence table
//! - **mouse**: SGR and X10 mouse report grammars
//! - **decoder**: the byte-stream state machine with prefix resolution

pub mod decoder;
pub mod escapes;
pub mod events;
pub mod mouse;

pub use decoder::Decoder;
pub use events::{Escape, Event, Key, KeyEvent, Mods, MouseButton, MouseEvent, MouseEventType};
