//! Terminal output.
//!
//! Every frame is wrapped in a synchronized update so the terminal shows
//! it all at once:
//!
//! ```text
//! begin_frame()  → start sync, disable autowrap, hide cursor
//!     ↓
//! changed cells  → MoveTo / colors / glyphs
//!     ↓
//! end_frame()    → enable autowrap, end sync, flush
//! ```
//!
//! Only cells that differ from the previous frame are written. A size
//! change, or an explicit [`TerminalWriter::invalidate`], forces a full
//! redraw.

use std::io::{self, Stdout, Write};

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute, queue,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;

use super::canvas::{Canvas, WIDE_CONTINUATION};
use crate::colors::ColorPair;
use crate::geometry::{Point, Size};

/// Begin a frame (synchronized update, disable autowrap, hide cursor)
fn begin_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?2026h")?;
    write!(out, "\x1b[?7l")?;
    queue!(out, Hide)?;
    Ok(())
}

/// End a frame (enable autowrap, end synchronized update, flush)
fn end_frame<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "\x1b[?7h")?;
    write!(out, "\x1b[?2026l")?;
    out.flush()
}

/// Run `f` between frame guards; the frame is closed even if `f` fails.
fn with_frame<W: Write, F, R>(out: &mut W, f: F) -> io::Result<R>
where
    F: FnOnce(&mut W) -> io::Result<R>,
{
    begin_frame(out)?;
    let result = f(out);
    let _ = end_frame(out);
    result
}

/// Current terminal size.
pub fn terminal_size() -> io::Result<Size> {
    let (cols, rows) = terminal::size()?;
    Ok(Size::new(rows, cols))
}

pub struct TerminalWriter<W: Write> {
    out: W,
    previous: Option<Canvas>,
    initialized: bool,
}

impl TerminalWriter<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            previous: None,
            initialized: false,
        }
    }

    /// Raw mode, alternate screen, mouse capture and bracketed paste.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.out,
            EnterAlternateScreen,
            EnableMouseCapture,
            EnableBracketedPaste,
            Hide,
            Clear(ClearType::All)
        )?;
        self.previous = None;
        self.initialized = true;
        debug!("terminal initialized");
        Ok(())
    }

    /// Undo [`init`](Self::init). Safe to call more than once.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.initialized {
            return Ok(());
        }
        // Restore state a frame may have left behind
        write!(self.out, "\x1b[?7h")?;
        write!(self.out, "\x1b[?2026l")?;
        execute!(
            self.out,
            ResetColor,
            Show,
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()?;
        self.initialized = false;
        debug!("terminal restored");
        Ok(())
    }

    /// Forget the last frame so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Write `canvas`, skipping cells unchanged since the last draw.
    /// Returns the number of cells written.
    pub fn draw(&mut self, canvas: &Canvas) -> io::Result<usize> {
        let previous = self
            .previous
            .as_ref()
            .filter(|previous| previous.size() == canvas.size());
        let written = with_frame(&mut self.out, |out| {
            if previous.is_none() {
                queue!(out, ResetColor, Clear(ClearType::All))?;
            }
            write_cells(out, canvas, previous)
        })?;
        trace!(written, "frame drawn");
        self.previous = Some(canvas.clone());
        Ok(written)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

fn write_cells<W: Write>(out: &mut W, canvas: &Canvas, previous: Option<&Canvas>) -> io::Result<usize> {
    let size = canvas.size();
    let mut colors: Option<ColorPair> = None;
    let mut written = 0;
    for y in 0..size.height {
        // Column the terminal cursor sits at after the last glyph.
        let mut cursor: Option<u16> = None;
        for x in 0..size.width {
            let pos = Point::new(i32::from(y), i32::from(x));
            let (Some(ch), Some(pair)) = (canvas.char_at(pos), canvas.colors_at(pos)) else {
                continue;
            };
            if ch == WIDE_CONTINUATION {
                continue;
            }
            let unchanged = previous.map_or(false, |previous| {
                previous.char_at(pos) == Some(ch) && previous.colors_at(pos) == Some(pair)
            });
            if unchanged {
                continue;
            }
            if cursor != Some(x) {
                queue!(out, MoveTo(x, y))?;
            }
            if colors != Some(pair) {
                queue!(
                    out,
                    SetForegroundColor(pair.fg.to_crossterm()),
                    SetBackgroundColor(pair.bg.to_crossterm())
                )?;
                colors = Some(pair);
            }
            let ch = if ch.is_control() { ' ' } else { ch };
            queue!(out, Print(ch))?;
            written += 1;
            let width = ch.width().unwrap_or(1).max(1) as u16;
            cursor = Some(x.saturating_add(width));
        }
    }
    queue!(out, ResetColor)?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ColorPair, BLACK, WHITE};

    fn output(writer: TerminalWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_frame_is_synchronized() {
        let mut writer = TerminalWriter::new(Vec::new());
        let canvas = Canvas::filled(Size::new(1, 3), 'x', ColorPair::new(WHITE, BLACK));
        writer.draw(&canvas).unwrap();
        let out = output(writer);
        let begin = out.find("\x1b[?2026h").unwrap();
        let end = out.find("\x1b[?2026l").unwrap();
        let text = out.find("xxx").unwrap();
        assert!(begin < text && text < end);
    }

    #[test]
    fn test_unchanged_cells_are_skipped() {
        let mut writer = TerminalWriter::new(Vec::new());
        let mut canvas = Canvas::new(Size::new(2, 4));
        assert_eq!(writer.draw(&canvas).unwrap(), 8);
        assert_eq!(writer.draw(&canvas).unwrap(), 0);

        if let Some((ch, _)) = canvas.cell_mut(Point::new(1, 2)) {
            *ch = 'z';
        }
        assert_eq!(writer.draw(&canvas).unwrap(), 1);

        writer.invalidate();
        assert_eq!(writer.draw(&canvas).unwrap(), 8);
    }

    #[test]
    fn test_resize_forces_full_redraw() {
        let mut writer = TerminalWriter::new(Vec::new());
        writer.draw(&Canvas::new(Size::new(1, 2))).unwrap();
        assert_eq!(writer.draw(&Canvas::new(Size::new(2, 2))).unwrap(), 4);
    }

    #[test]
    fn test_replaced_wide_glyph_is_repainted() {
        let mut writer = TerminalWriter::new(Vec::new());
        let mut canvas = Canvas::new(Size::new(1, 3));
        let bounds = canvas.bounds();
        canvas.view(Point::ORIGIN, bounds).put_str(Point::ORIGIN, "漢", None);
        writer.draw(&canvas).unwrap();

        canvas.view(Point::ORIGIN, bounds).put_str(Point::ORIGIN, "a", None);
        assert_eq!(writer.draw(&canvas).unwrap(), 2);
    }

    #[test]
    fn test_wide_continuation_is_not_written() {
        let mut writer = TerminalWriter::new(Vec::new());
        let mut canvas = Canvas::new(Size::new(1, 3));
        let bounds = canvas.bounds();
        canvas.view(Point::ORIGIN, bounds).put_str(Point::ORIGIN, "漢", None);
        assert_eq!(writer.draw(&canvas).unwrap(), 2);
        assert!(!output(writer).contains('\0'));
    }
}
