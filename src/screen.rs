//! Minimal span and line model plus the raw-mode terminal session that
//! paints it. Widths are measured in display columns so CJK glyphs center
//! correctly.

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{
        self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen, SetTitle,
    },
};
use std::io::{self, Stdout, Write};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// One styled fragment of a line.
#[derive(Clone, Debug)]
pub(crate) struct Span {
    text: String,
    fg: Option<Color>,
    bold: bool,
}

impl Span {
    pub(crate) fn new<S: Into<String>>(text: S) -> Self {
        Self { text: text.into(), fg: None, bold: false }
    }

    pub(crate) fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub(crate) fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Display columns, not chars.
    pub(crate) fn width(&self) -> usize {
        self.text.as_str().width()
    }
}

/// One row of the frame.
#[derive(Clone, Debug, Default)]
pub(crate) struct Line {
    spans: Vec<Span>,
    centered: bool,
}

impl Line {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn blank() -> Self {
        Self::default()
    }

    pub(crate) fn push(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub(crate) fn centered(mut self) -> Self {
        self.centered = true;
        self
    }

    pub(crate) fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The unstyled text of the line, used by hit tests and tests.
    pub(crate) fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

fn center_pad(content: usize, total: usize) -> usize {
    total.saturating_sub(content) / 2
}

/// Wrap `text` to at most `cols` display columns per line, breaking at
/// spaces where possible and inside runs of unspaced wide glyphs where
/// not.
pub(crate) fn wrap(text: &str, cols: usize) -> Vec<String> {
    if cols == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0;
    for word in text.split_whitespace() {
        let word_width = word.width();
        let sep = usize::from(!line.is_empty());
        if line_width + sep + word_width <= cols {
            if sep == 1 {
                line.push(' ');
            }
            line.push_str(word);
            line_width += sep + word_width;
            continue;
        }
        if !line.is_empty() {
            lines.push(std::mem::take(&mut line));
            line_width = 0;
        }
        if word_width <= cols {
            line.push_str(word);
            line_width = word_width;
            continue;
        }
        // A single run wider than the line, typical for unspaced CJK
        // sentences. Break it glyph by glyph.
        for glyph in word.chars() {
            let glyph_width = glyph.width().unwrap_or(0);
            if line_width + glyph_width > cols && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            line.push(glyph);
            line_width += glyph_width;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Raw-mode alternate-screen session. Construction configures the
/// terminal; dropping restores it even on an error path.
pub(crate) struct Screen {
    out: Stdout,
    size: (u16, u16),
}

impl Screen {
    pub(crate) fn open() -> io::Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, EnableMouseCapture)?;
        let size = terminal::size()?;
        Ok(Self { out, size })
    }

    pub(crate) fn size(&self) -> (u16, u16) {
        self.size
    }

    pub(crate) fn resize(&mut self, width: u16, height: u16) {
        self.size = (width, height);
    }

    pub(crate) fn set_title(&mut self, title: &str) -> io::Result<()> {
        execute!(self.out, SetTitle(title))
    }

    /// Repaint the whole frame from row zero. Rows past the last line are
    /// cleared; lines past the bottom are dropped.
    pub(crate) fn draw(&mut self, lines: &[Line]) -> io::Result<()> {
        let (width, height) = self.size;
        for row in 0..height {
            queue!(self.out, MoveTo(0, row), Clear(ClearType::UntilNewLine))?;
            let Some(line) = lines.get(row as usize) else {
                continue;
            };
            let pad = if line.centered {
                center_pad(line.width(), width as usize)
            } else {
                0
            };
            if pad > 0 {
                queue!(self.out, Print(" ".repeat(pad)))?;
            }
            for span in &line.spans {
                if let Some(color) = span.fg {
                    queue!(self.out, SetForegroundColor(color))?;
                }
                if span.bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                queue!(self.out, Print(span.text.as_str()), SetAttribute(Attribute::Reset))?;
            }
        }
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, DisableMouseCapture, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}
