//! Balloon tooltips.

use std::time::Duration;

use anchorage::{Align, Chrome, Color, Edges, FadeSchedule, Rect, Side};

use super::overlay::AnnotationRenderer;
use crate::surface::{AnnotationKind, AnnotationStyle};
use crate::widget::Outline;

const SHADOW_SIZE: i32 = 4;

/// Theme of a tooltip display.
///
/// Start from a preset and override fields:
///
/// ```ignore
/// let config = TooltipConfig {
///     side: Side::End,
///     fade: None,
///     ..TooltipConfig::danger()
/// };
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipConfig {
    pub background: Color,
    pub foreground: Color,
    pub border: Option<Color>,
    pub corner_radius: i32,
    /// Length of the arrow pointing at the target.
    pub arrow: i32,
    pub shadow: bool,
    pub padding: Edges,
    /// Preferred side; flips to the opposite side when there is no room.
    pub side: Side,
    pub gap: i32,
    /// Messages wider than this wrap onto more lines.
    pub max_text_width: i32,
    /// Fade-in duration, `None` to appear at once.
    pub fade: Option<Duration>,
    /// Also outline the target while the tooltip is shown.
    pub outline: bool,
}

impl TooltipConfig {
    /// Charcoal balloon with white text, below the target.
    pub fn dark() -> Self {
        Self::default()
    }

    /// Dark red balloon with white text, above the target.
    pub fn danger() -> Self {
        Self {
            background: Color::hex(0x8B1A1A),
            side: Side::Before,
            ..Self::default()
        }
    }

    /// Amber balloon with dark text, below the target.
    pub fn warning() -> Self {
        Self {
            background: Color::hex(0xFFC107),
            foreground: Color::hex(0x333333),
            border: Some(Color::hex(0xE0A800)),
            ..Self::default()
        }
    }
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            background: Color::hex(0x333333),
            foreground: Color::WHITE,
            border: None,
            corner_radius: 8,
            arrow: 8,
            shadow: true,
            padding: Edges::symmetric(6, 12),
            side: Side::After,
            gap: 0,
            max_text_width: 280,
            fade: Some(Duration::from_millis(200)),
            outline: true,
        }
    }
}

/// Renderer behind [`TooltipDisplay`](super::TooltipDisplay).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipRenderer {
    config: TooltipConfig,
}

impl TooltipRenderer {
    pub fn new(config: TooltipConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TooltipConfig {
        &self.config
    }
}

impl From<TooltipConfig> for TooltipRenderer {
    fn from(config: TooltipConfig) -> Self {
        Self::new(config)
    }
}

impl AnnotationRenderer for TooltipRenderer {
    fn kind(&self) -> AnnotationKind {
        AnnotationKind::Tooltip
    }

    fn style(&self) -> AnnotationStyle {
        let config = &self.config;
        let chrome = Chrome::new(config.padding)
            .arrow(config.arrow)
            .shadow(if config.shadow { SHADOW_SIZE } else { 0 })
            .border(i32::from(config.border.is_some()));
        AnnotationStyle {
            background: Some(config.background),
            foreground: config.foreground,
            border: config.border,
            rule: None,
            corner_radius: config.corner_radius,
            chrome,
        }
    }

    fn side(&self) -> Side {
        self.config.side
    }

    fn align(&self) -> Align {
        Align::Center
    }

    fn gap(&self) -> i32 {
        self.config.gap
    }

    fn max_text_width(&self, _target: Rect) -> Option<i32> {
        Some(self.config.max_text_width)
    }

    fn fade(&self) -> Option<FadeSchedule> {
        self.config.fade.map(FadeSchedule::new)
    }

    fn outline(&self) -> Option<Outline> {
        self.config.outline.then_some(Outline::Error)
    }
}
