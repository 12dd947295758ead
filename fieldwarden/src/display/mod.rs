//! Error display strategies.
//!
//! A display turns "this widget has this error" into something visible.
//! Overlay displays float an annotation on the widget's overlay surface and
//! keep it glued to the widget; decoration displays only toggle hooks on the
//! widget itself. [`CompositeDisplay`] combines several.
//!
//! Contract shared by every display:
//! - `show_error` is an idempotent update: calling it again replaces the
//!   message and never adds a second annotation;
//! - `hide_error` is a no-op when nothing is shown;
//! - `dispose` releases every annotation, listener and timer.

mod block;
mod composite;
mod decoration;
mod inline;
mod overlay;
mod tooltip;

use std::rc::Rc;

use crate::widget::{WidgetId, WidgetRef};

pub use block::{BlockConfig, BlockRenderer};
pub use composite::CompositeDisplay;
pub use decoration::{MarkerConfig, OutlineDisplay, TrailingMarkerDisplay};
pub use inline::{InlineLabelConfig, InlineLabelRenderer};
pub use overlay::{AnnotationRenderer, OverlayDisplay};
pub use tooltip::{TooltipConfig, TooltipRenderer};

/// Balloon tooltips pointing at the invalid widget.
pub type TooltipDisplay = OverlayDisplay<TooltipRenderer>;
/// Plain text under the invalid widget.
pub type InlineLabelDisplay = OverlayDisplay<InlineLabelRenderer>;
/// Solid block spanning the invalid widget's width.
pub type BlockDisplay = OverlayDisplay<BlockRenderer>;

/// Shows and hides error feedback for widgets.
pub trait ErrorDisplay {
    fn show_error(&self, target: &WidgetRef, message: &str);

    fn hide_error(&self, target: WidgetId);

    /// Whether feedback for `target` is currently shown or waiting for the
    /// target to become visible.
    fn is_showing(&self, target: WidgetId) -> bool;

    fn dispose(&self);
}

/// Shared handle to a display.
pub type DisplayRef = Rc<dyn ErrorDisplay>;

impl<D: ErrorDisplay + ?Sized> ErrorDisplay for Rc<D> {
    fn show_error(&self, target: &WidgetRef, message: &str) {
        (**self).show_error(target, message)
    }

    fn hide_error(&self, target: WidgetId) {
        (**self).hide_error(target)
    }

    fn is_showing(&self, target: WidgetId) -> bool {
        (**self).is_showing(target)
    }

    fn dispose(&self) {
        (**self).dispose()
    }
}
