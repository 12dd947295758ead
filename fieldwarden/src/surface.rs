//! The overlay surface capability: where floating annotations are drawn.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use anchorage::{Chrome, Color, Rect, Side, TextMetrics};

use crate::widget::{ListenerKey, Subscription, WidgetId};

/// Handle for an annotation, issued by the surface on `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnnotationId(u64);

impl AnnotationId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__annotation_{}", self.0)
    }
}

/// Visual family of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    /// Balloon with an arrow pointing at the target.
    Tooltip,
    /// Bare text under the target.
    Label,
    /// Solid block spanning the target width.
    Block,
}

/// Paint attributes of an annotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnotationStyle {
    pub background: Option<Color>,
    pub foreground: Color,
    pub border: Option<Color>,
    /// Accent rule along the bottom edge (blocks).
    pub rule: Option<Color>,
    pub corner_radius: i32,
    pub chrome: Chrome,
}

/// Everything a surface needs to draw one annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub kind: AnnotationKind,
    /// Widget the annotation belongs to.
    pub target: WidgetId,
    /// Text, already wrapped.
    pub lines: Vec<String>,
    pub bounds: Rect,
    /// Side of the target the annotation sits on. Arrows point away from it.
    pub side: Side,
    pub visible: bool,
    /// 0.0 (transparent) to 1.0 (opaque).
    pub opacity: f32,
    pub style: AnnotationStyle,
}

impl Annotation {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Whether a repeating timer keeps going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// Guard for a running timer. Dropping it cancels the timer.
pub type TimerHandle = Subscription;

/// Repeating-timer facility of the host event loop.
pub trait Scheduler {
    /// Run `tick` every `interval` on the UI thread until it returns
    /// [`TimerControl::Stop`] or the handle is dropped.
    fn repeat(&self, interval: Duration, tick: Box<dyn FnMut() -> TimerControl>) -> TimerHandle;
}

/// A layer above the widgets on which annotations float.
pub trait OverlaySurface {
    /// Visible bounds. Annotations are kept inside.
    fn viewport(&self) -> Rect;

    /// Metrics the surface renders text with.
    fn metrics(&self) -> &dyn TextMetrics;

    fn add(&self, annotation: Annotation) -> AnnotationId;

    /// Replace a live annotation. Unknown ids are ignored.
    fn update(&self, id: AnnotationId, annotation: Annotation);

    /// Unknown ids are ignored.
    fn remove(&self, id: AnnotationId);

    /// Timer facility for animations. Without one, annotations appear
    /// fully opaque at once.
    fn scheduler(&self) -> Option<Rc<dyn Scheduler>> {
        None
    }

    /// Install a viewport-resize listener.
    fn on_resize(&self, _key: ListenerKey, _listener: Rc<dyn Fn()>) -> Option<Subscription> {
        None
    }
}
