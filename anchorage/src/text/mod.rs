//! Text measurement for annotation sizing.
//!
//! Annotation size drives the placement decision, so it has to be measured
//! with the same metrics the renderer draws with. Surfaces expose a
//! [`TextMetrics`]; [`CellMetrics`] covers cell-grid renderers and tests.

use std::mem;

use unicode_width::UnicodeWidthStr;

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Font metrics as seen by the placement engine.
pub trait TextMetrics {
    /// Advance width of a single line of text.
    fn text_width(&self, text: &str) -> i32;

    /// Height of one line of text, leading included.
    fn line_height(&self) -> i32;
}

/// Fixed-size cell metrics: every column is `cell_width` wide and every
/// row `cell_height` tall. Wide characters take two columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMetrics {
    pub cell_width: i32,
    pub cell_height: i32,
}

impl CellMetrics {
    pub const fn new(cell_width: i32, cell_height: i32) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }
}

impl Default for CellMetrics {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl TextMetrics for CellMetrics {
    fn text_width(&self, text: &str) -> i32 {
        display_width(text) as i32 * self.cell_width
    }

    fn line_height(&self) -> i32 {
        self.cell_height
    }
}

/// Break a message into display lines.
///
/// `max_width` is in metric units; `None` keeps explicit line breaks only.
pub fn layout_lines<M: TextMetrics + ?Sized>(metrics: &M, text: &str, max_width: Option<i32>) -> Vec<String> {
    match max_width {
        Some(max) if max > 0 => wrap(metrics, text, max),
        _ => text.split('\n').map(str::to_string).collect(),
    }
}

/// Greedy word wrap, measured with `metrics`.
///
/// Explicit line breaks are kept and runs of whitespace collapse to one
/// space. A word wider than `max_width` is split between characters; a
/// single character wider than the limit still gets a line of its own.
pub fn wrap<M: TextMetrics + ?Sized>(metrics: &M, text: &str, max_width: i32) -> Vec<String> {
    if max_width <= 0 {
        return Vec::new();
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = LineBuilder {
            metrics,
            max_width,
            current: String::new(),
        };
        for word in paragraph.split_whitespace() {
            line.push_word(word, &mut lines);
        }
        lines.push(line.current);
    }
    lines
}

struct LineBuilder<'m, M: ?Sized> {
    metrics: &'m M,
    max_width: i32,
    current: String,
}

impl<M: TextMetrics + ?Sized> LineBuilder<'_, M> {
    fn fits(&self, text: &str) -> bool {
        self.metrics.text_width(text) <= self.max_width
    }

    fn push_word(&mut self, word: &str, lines: &mut Vec<String>) {
        if self.current.is_empty() {
            if self.fits(word) {
                self.current.push_str(word);
                return;
            }
        } else {
            let joined = format!("{} {}", self.current, word);
            if self.fits(&joined) {
                self.current = joined;
                return;
            }
            lines.push(mem::take(&mut self.current));
            if self.fits(word) {
                self.current.push_str(word);
                return;
            }
        }
        self.split_word(word, lines);
    }

    fn split_word(&mut self, word: &str, lines: &mut Vec<String>) {
        for ch in word.chars() {
            let mut next = self.current.clone();
            next.push(ch);
            if !self.current.is_empty() && !self.fits(&next) {
                lines.push(mem::take(&mut self.current));
                self.current.push(ch);
            } else {
                self.current = next;
            }
        }
    }
}
