//! Solid error block attached under the target.

use anchorage::{Align, Chrome, Color, Edges, Rect, Side};

use super::overlay::AnnotationRenderer;
use crate::surface::{AnnotationKind, AnnotationStyle};

/// Height of the darker accent rule along the block's bottom edge.
const RULE_HEIGHT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockConfig {
    pub background: Color,
    pub foreground: Color,
    pub padding: Edges,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            background: Color::hex(0xD9534F),
            foreground: Color::WHITE,
            padding: Edges::symmetric(4, 6),
        }
    }
}

/// Renderer behind [`BlockDisplay`](super::BlockDisplay).
///
/// The block is exactly as wide as the target; text wraps inside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockRenderer {
    config: BlockConfig,
}

impl BlockRenderer {
    pub fn new(config: BlockConfig) -> Self {
        Self { config }
    }
}

impl Default for BlockRenderer {
    fn default() -> Self {
        Self::new(BlockConfig::default())
    }
}

impl From<BlockConfig> for BlockRenderer {
    fn from(config: BlockConfig) -> Self {
        Self::new(config)
    }
}

impl AnnotationRenderer for BlockRenderer {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Block
    }

    fn style(&self) -> AnnotationStyle {
        let mut padding = self.config.padding;
        padding.bottom += RULE_HEIGHT;
        AnnotationStyle {
            background: Some(self.config.background),
            foreground: self.config.foreground,
            border: None,
            rule: Some(self.config.background.darken(0.1)),
            corner_radius: 0,
            chrome: Chrome::new(padding),
        }
    }

    fn side(&self) -> Side {
        Side::After
    }

    fn align(&self) -> Align {
        Align::Stretch
    }

    fn flip(&self) -> bool {
        false
    }

    fn max_text_width(&self, target: Rect) -> Option<i32> {
        Some((target.width - self.config.padding.horizontal_total()).max(1))
    }
}
