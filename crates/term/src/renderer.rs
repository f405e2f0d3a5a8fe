//! TerminalRenderer: flushes a framebuffer to a real terminal.
//!
//! A frame with no predecessor of the same size is painted whole. Otherwise
//! only the horizontal spans whose cells differ are repainted.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};

/// Owns the terminal session and the last frame it put on screen.
pub struct TerminalRenderer {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    out: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            out: Vec::with_capacity(64 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor and mouse reporting.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.out.clear();
        self.out
            .queue(terminal::EnterAlternateScreen)?
            .queue(cursor::Hide)?
            .queue(terminal::DisableLineWrap)?
            .queue(EnableMouseCapture)?;
        self.write_out()
    }

    /// Undo everything `enter` changed.
    pub fn exit(&mut self) -> Result<()> {
        self.out.clear();
        self.out
            .queue(DisableMouseCapture)?
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?
            .queue(terminal::EnableLineWrap)?
            .queue(cursor::Show)?
            .queue(terminal::LeaveAlternateScreen)?;
        self.write_out()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Repaint everything on the next draw.
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Put `fb` on screen and hand back the frame it replaced.
    ///
    /// On return `fb` holds stale contents of the right size, ready to be
    /// rendered over.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.out.clear();
        let mut spare = match self.shown.take() {
            Some(prev) if same_size(&prev, fb) => {
                write_frame_diff(&prev, fb, &mut self.out)?;
                prev
            }
            Some(mut prev) => {
                write_full_frame(fb, &mut self.out)?;
                prev.resize(fb.width(), fb.height());
                prev
            }
            None => {
                write_full_frame(fb, &mut self.out)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.write_out()?;

        std::mem::swap(&mut spare, fb);
        self.shown = Some(spare);
        Ok(())
    }

    fn write_out(&mut self) -> Result<()> {
        self.stdout.write_all(&self.out)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Clear the screen and paint every cell of `fb` into `out`.
pub fn write_full_frame(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?
        .queue(cursor::MoveTo(0, 0))?;

    let mut painter = Painter::new(out);
    for (y, row) in rows(fb).enumerate() {
        if y > 0 {
            painter.out.queue(Print("\r\n"))?;
        }
        for &cell in row {
            painter.paint(cell)?;
        }
    }
    painter.finish()
}

/// Paint into `out` only the spans of `next` that differ from `prev`.
pub fn write_frame_diff(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter::new(out);
    for span in changed_spans(prev, next) {
        painter.out.queue(cursor::MoveTo(span.x, span.y))?;
        let start = span.y as usize * next.width() as usize + span.x as usize;
        for &cell in &next.cells()[start..start + span.len as usize] {
            painter.paint(cell)?;
        }
    }
    painter.finish()
}

/// Writes glyphs, emitting SGR sequences only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn paint(&mut self, cell: Cell) -> Result<()> {
        if self.style != Some(cell.style) {
            set_style(self.out, cell.style)?;
            self.style = Some(cell.style);
        }
        self.out.queue(Print(cell.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out
            .queue(ResetColor)?
            .queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(term_color(style.fg)))?
        .queue(SetBackgroundColor(term_color(style.bg)))?
        .queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn term_color(Rgb { r, g, b }: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

fn same_size(a: &FrameBuffer, b: &FrameBuffer) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn rows(fb: &FrameBuffer) -> impl Iterator<Item = &[Cell]> {
    fb.cells().chunks_exact(fb.width().max(1) as usize)
}

/// A horizontal run of cells on one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    x: u16,
    y: u16,
    len: u16,
}

/// Maximal runs of differing cells, row by row.
///
/// Frames of different sizes have nothing to compare, so each row of `next`
/// comes back as a single span.
fn changed_spans<'a>(
    prev: &'a FrameBuffer,
    next: &'a FrameBuffer,
) -> Box<dyn Iterator<Item = Span> + 'a> {
    if !same_size(prev, next) {
        let len = next.width();
        return Box::new((0..next.height()).map(move |y| Span { x: 0, y, len }));
    }

    Box::new(
        rows(prev)
            .zip(rows(next))
            .enumerate()
            .flat_map(|(y, (old, new))| row_spans(y as u16, old, new)),
    )
}

fn row_spans(y: u16, old: &[Cell], new: &[Cell]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut open: Option<u16> = None;
    for (x, (a, b)) in old.iter().zip(new).enumerate() {
        let x = x as u16;
        match (a != b, open) {
            (true, None) => open = Some(x),
            (false, Some(start)) => {
                spans.push(Span { x: start, y, len: x - start });
                open = None;
            }
            _ => {}
        }
    }
    if let Some(start) = open {
        spans.push(Span {
            x: start,
            y,
            len: new.len() as u16 - start,
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(a: &FrameBuffer, b: &FrameBuffer) -> Vec<(u16, u16, u16)> {
        changed_spans(a, b).map(|s| (s.x, s.y, s.len)).collect()
    }

    #[test]
    fn colors_pass_through_as_rgb() {
        let fg = CellStyle::default().fg;
        assert_eq!(
            term_color(fg),
            Color::Rgb {
                r: fg.r,
                g: fg.g,
                b: fg.b
            }
        );
    }

    #[test]
    fn adjacent_changes_form_one_span() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(5, 1);
        let mut b = FrameBuffer::new(5, 1);
        for x in 1..=3 {
            b.set(x, 0, Cell { ch: 'X', style });
        }
        assert_eq!(spans(&a, &b), vec![(1, 0, 3)]);
    }

    #[test]
    fn spans_split_on_unchanged_cells_and_reach_row_end() {
        let style = CellStyle::default();
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        b.set(0, 0, Cell { ch: 'A', style });
        b.set(2, 0, Cell { ch: 'B', style });
        b.set(4, 1, Cell { ch: 'C', style });
        b.set(5, 1, Cell { ch: 'D', style });
        assert_eq!(spans(&a, &b), vec![(0, 0, 1), (2, 0, 1), (4, 1, 2)]);
    }

    #[test]
    fn resized_frame_repaints_every_row() {
        let a = FrameBuffer::new(2, 1);
        let b = FrameBuffer::new(3, 2);
        assert_eq!(spans(&a, &b), vec![(0, 0, 3), (0, 1, 3)]);
    }

    #[test]
    fn diff_writes_only_changed_glyphs() {
        let mut a = FrameBuffer::new(4, 2);
        a.put_str(0, 0, "ab", CellStyle::default());
        let mut out = Vec::new();
        write_frame_diff(&a, &a.clone(), &mut out).unwrap();
        assert!(!out.contains(&b'a'));

        let mut c = a.clone();
        c.put_char(1, 1, 'Z', CellStyle::default());
        out.clear();
        write_frame_diff(&a, &c, &mut out).unwrap();
        assert!(out.contains(&b'Z'));
        assert!(!out.contains(&b'b'));
    }

    #[test]
    fn full_frame_writes_every_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", CellStyle::default());
        fb.put_str(0, 1, "xyz", CellStyle::default());
        let mut out = Vec::new();
        write_full_frame(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc\r\n"));
        assert!(text.contains("xyz"));
    }
}
