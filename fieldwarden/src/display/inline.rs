//! Plain error text under the target.

use anchorage::{Align, Chrome, Color, Edges, Side};

use super::overlay::AnnotationRenderer;
use crate::surface::{AnnotationKind, AnnotationStyle};
use crate::widget::Outline;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineLabelConfig {
    pub foreground: Color,
    /// Distance below the target.
    pub gap: i32,
    pub outline: bool,
}

impl Default for InlineLabelConfig {
    fn default() -> Self {
        Self {
            foreground: Color::hex(0xDC3545),
            gap: 2,
            outline: true,
        }
    }
}

/// Renderer behind [`InlineLabelDisplay`](super::InlineLabelDisplay).
///
/// Labels are flush with the target's left edge and never flip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlineLabelRenderer {
    config: InlineLabelConfig,
}

impl InlineLabelRenderer {
    pub fn new(config: InlineLabelConfig) -> Self {
        Self { config }
    }
}

impl Default for InlineLabelRenderer {
    fn default() -> Self {
        Self::new(InlineLabelConfig::default())
    }
}

impl From<InlineLabelConfig> for InlineLabelRenderer {
    fn from(config: InlineLabelConfig) -> Self {
        Self::new(config)
    }
}

impl AnnotationRenderer for InlineLabelRenderer {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Label
    }

    fn style(&self) -> AnnotationStyle {
        AnnotationStyle {
            background: None,
            foreground: self.config.foreground,
            border: None,
            rule: None,
            corner_radius: 0,
            chrome: Chrome::new(Edges::default()),
        }
    }

    fn side(&self) -> Side {
        Side::After
    }

    fn align(&self) -> Align {
        Align::Start
    }

    fn gap(&self) -> i32 {
        self.config.gap
    }

    fn flip(&self) -> bool {
        false
    }

    fn outline(&self) -> Option<Outline> {
        self.config.outline.then_some(Outline::Error)
    }
}
