//! Terminal: presents framebuffers on the real terminal.
//!
//! Frames are diffed against the previously presented one and only changed
//! runs of cells are written. Output is encoded into a byte buffer first and
//! written with a single flush per frame.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

pub struct Terminal {
    stdout: io::Stdout,
    shown: Option<FrameBuffer>,
    buf: Vec<u8>,
}

impl Default for Terminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            shown: None,
            buf: Vec::with_capacity(16 * 1024),
        }
    }

    /// Switch to raw mode on the alternate screen
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Restore the terminal; safe to call after a failed frame
    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next frame to be drawn in full (after a resize).
    pub fn invalidate(&mut self) {
        self.shown = None;
    }

    /// Show `frame`, then swap it with the previously shown buffer.
    ///
    /// The caller gets the old buffer back in `frame` and can draw the next
    /// frame into it without allocating.
    pub fn present(&mut self, frame: &mut FrameBuffer) -> Result<()> {
        self.buf.clear();
        match self.shown.take() {
            Some(mut shown)
                if shown.width() == frame.width() && shown.height() == frame.height() =>
            {
                encode_diff(&shown, frame, &mut self.buf)?;
                std::mem::swap(&mut shown, frame);
                self.shown = Some(shown);
            }
            _ => {
                encode_full(frame, &mut self.buf)?;
                let mut shown = FrameBuffer::new(frame.width(), frame.height());
                std::mem::swap(&mut shown, frame);
                self.shown = Some(shown);
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Writes cells while remembering the active style
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl<'a> Painter<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn cell(&mut self, ch: char, style: CellStyle) -> Result<()> {
        if self.style != Some(style) {
            self.out.queue(SetForegroundColor(to_color(style.fg)))?;
            self.out.queue(SetBackgroundColor(to_color(style.bg)))?;
            self.out.queue(SetAttribute(Attribute::Reset))?;
            if style.bold {
                self.out.queue(SetAttribute(Attribute::Bold))?;
            }
            if style.dim {
                self.out.queue(SetAttribute(Attribute::Dim))?;
            }
            self.style = Some(style);
        }
        self.out.queue(Print(ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

/// Encode a full redraw of `frame` into `out`.
pub fn encode_full(frame: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    for y in 0..frame.height() {
        out.queue(cursor::MoveTo(0, y))?;
        let mut painter = Painter::new(out);
        for cell in frame.row(y) {
            painter.cell(cell.ch, cell.style)?;
        }
        painter.finish()?;
    }
    Ok(())
}

/// Encode the runs that differ between `prev` and `next` into `out`.
///
/// Both buffers must have the same size.
pub fn encode_diff(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    for (y, start, len) in changed_runs(prev, next) {
        out.queue(cursor::MoveTo(start, y))?;
        let mut painter = Painter::new(out);
        for cell in &next.row(y)[start as usize..(start + len) as usize] {
            painter.cell(cell.ch, cell.style)?;
        }
        painter.finish()?;
    }
    Ok(())
}

/// `(row, start, len)` of every horizontal run of changed cells
pub fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<(u16, u16, u16)> {
    let mut runs = Vec::new();
    for y in 0..next.height() {
        let old = prev.row(y);
        let new = next.row(y);
        let mut x = 0;
        while x < new.len() {
            if old.get(x) == Some(&new[x]) {
                x += 1;
                continue;
            }
            let start = x;
            while x < new.len() && old.get(x) != Some(&new[x]) {
                x += 1;
            }
            runs.push((y, start as u16, (x - start) as u16));
        }
    }
    runs
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_runs_coalesce_adjacent_cells() {
        let prev = FrameBuffer::new(6, 2);
        let mut next = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            next.put_char(x, 0, 'X', CellStyle::default());
        }
        next.put_char(5, 1, 'Y', CellStyle::default());

        assert_eq!(changed_runs(&prev, &next), vec![(0, 1, 3), (1, 5, 1)]);
    }

    #[test]
    fn test_identical_frames_encode_nothing() {
        let frame = FrameBuffer::new(4, 4);
        let mut full = Vec::new();
        encode_full(&frame, &mut full).unwrap();
        let mut diff = Vec::new();
        encode_diff(&frame, &frame.clone(), &mut diff).unwrap();
        assert!(diff.is_empty());
        assert!(full.len() > diff.len());
    }

    #[test]
    fn test_style_change_is_encoded_once_per_run() {
        let prev = FrameBuffer::new(3, 1);
        let mut next = FrameBuffer::new(3, 1);
        next.put_str(0, 0, "abc", CellStyle::default().bold());
        let mut out = Vec::new();
        encode_diff(&prev, &next, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("abc"));
    }
}
