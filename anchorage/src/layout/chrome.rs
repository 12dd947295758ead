use super::{Side, Size};
use crate::text::TextMetrics;
use crate::types::Edges;

/// Decorations drawn around annotation text.
///
/// The same `Chrome` must be used to measure an annotation before placing it
/// and to paint it afterwards, otherwise the flip decision is made against
/// the wrong extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chrome {
    /// Space between the text and the body edge.
    pub padding: Edges,
    /// Length of the connector arrow; it grows the annotation along the axis
    /// perpendicular to the side it sits on.
    pub arrow: i32,
    /// Shadow blur drawn on every side of the body.
    pub shadow: i32,
    /// Border stroke on every side of the body.
    pub border: i32,
}

impl Chrome {
    pub const fn new(padding: Edges) -> Self {
        Self {
            padding,
            arrow: 0,
            shadow: 0,
            border: 0,
        }
    }

    pub const fn arrow(mut self, arrow: i32) -> Self {
        self.arrow = arrow;
        self
    }

    pub const fn shadow(mut self, shadow: i32) -> Self {
        self.shadow = shadow;
        self
    }

    pub const fn border(mut self, border: i32) -> Self {
        self.border = border;
        self
    }

    /// Outer size of an annotation showing `lines` on `side` of its target.
    pub fn measure<M: TextMetrics + ?Sized>(&self, metrics: &M, lines: &[String], side: Side) -> Size {
        let text_width = lines
            .iter()
            .map(|line| metrics.text_width(line))
            .max()
            .unwrap_or(0);
        let text_height = metrics.line_height() * lines.len().max(1) as i32;

        let frame = (self.shadow + self.border) * 2;
        let mut width = text_width + self.padding.horizontal_total() + frame;
        let mut height = text_height + self.padding.vertical_total() + frame;
        if side.is_vertical() {
            height += self.arrow;
        } else {
            width += self.arrow;
        }
        Size::new(width, height)
    }
}
