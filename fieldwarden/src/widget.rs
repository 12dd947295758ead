//! The render-target capability a host widget exposes to the engine.
//!
//! The engine never owns widgets. Forms and displays keep a
//! `Weak<dyn Widget>` plus the [`WidgetId`], and every listener they install
//! comes back as a [`Subscription`] guard that uninstalls itself on drop.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anchorage::{Color, Rect};

use crate::surface::OverlaySurface;

/// Unique identifier for a widget instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(usize);

impl WidgetId {
    /// Allocate a fresh id. Host widgets call this once at construction.
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl Default for WidgetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__widget_{}", self.0)
    }
}

/// Identity of whoever installs a listener: one per form, one per display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(usize);

impl OwnerId {
    pub fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::new()
    }
}

/// What a listener is installed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Purpose {
    /// Value changes of a validated field.
    Validate,
    /// Focus loss of a validated field.
    Commit,
    /// Value changes of another widget that the given field depends on.
    DependsOn(WidgetId),
    /// Waiting for a hidden target to become visible.
    Reveal,
    /// Following target geometry and visibility.
    Track,
    /// Following the surface viewport on behalf of the given target.
    Viewport(WidgetId),
}

/// Key under which a listener is installed.
///
/// Installing a second listener with an equal key replaces the first, so
/// re-registering a field never subscribes twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerKey {
    pub owner: OwnerId,
    pub purpose: Purpose,
}

impl ListenerKey {
    pub const fn new(owner: OwnerId, purpose: Purpose) -> Self {
        Self { owner, purpose }
    }
}

/// Geometry and visibility notifications delivered by a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetEvent {
    Moved,
    Resized,
    Shown,
    Hidden,
    FocusLost,
}

/// RAII guard for an installed listener or running timer.
///
/// Dropping the guard uninstalls the listener (or cancels the timer).
#[must_use = "dropping a Subscription uninstalls the listener immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Uninstall now. Equivalent to dropping the guard.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Outline decoration painted around a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Outline {
    #[default]
    Error,
    Warning,
}

/// Marker painted at the trailing edge inside a widget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingMarker {
    pub glyph: char,
    pub color: Color,
}

/// A host widget, seen through the capabilities the engine needs.
///
/// Only `id`, `as_any`, geometry, visibility, surface lookup and `listen` are
/// required. Everything else has a no-op default so hosts can adopt the
/// decoration hooks gradually.
pub trait Widget: Any {
    fn id(&self) -> WidgetId;

    /// Downcasting hook for value adapters.
    fn as_any(&self) -> &dyn Any;

    /// Bounds in the coordinate space of the overlay surface, or `None` when
    /// the widget is not mounted.
    fn bounds(&self) -> Option<Rect>;

    /// Whether the widget is currently on screen.
    fn is_showing(&self) -> bool;

    /// The overlay surface annotations for this widget are drawn on.
    fn overlay_surface(&self) -> Option<Rc<dyn OverlaySurface>>;

    /// Install a geometry/visibility/focus listener.
    ///
    /// Returns `None` if the widget cannot deliver events.
    fn listen(&self, key: ListenerKey, listener: Rc<dyn Fn(WidgetEvent)>) -> Option<Subscription>;

    /// Generic tagged value channel, used when no adapter claims the widget.
    fn client_value(&self) -> Option<String> {
        None
    }

    fn request_focus(&self) {}

    fn scroll_into_view(&self) {}

    fn set_outline(&self, _outline: Option<Outline>) {}

    /// Hint text, typically rendered as a native tooltip.
    fn set_hint(&self, _hint: Option<&str>) {}

    fn set_trailing_marker(&self, _marker: Option<TrailingMarker>) {}
}

/// Shared handle to a host widget.
pub type WidgetRef = Rc<dyn Widget>;

/// Anything that can hand out a [`WidgetRef`].
///
/// Implemented for `Rc<W>` of every concrete widget type and for
/// `Rc<dyn Widget>`, so form methods accept either without conversions at
/// the call site.
pub trait AsWidget {
    fn to_widget_ref(&self) -> WidgetRef;

    fn widget_id(&self) -> WidgetId;
}

impl<W: Widget> AsWidget for Rc<W> {
    fn to_widget_ref(&self) -> WidgetRef {
        self.clone()
    }

    fn widget_id(&self) -> WidgetId {
        self.id()
    }
}

impl AsWidget for Rc<dyn Widget> {
    fn to_widget_ref(&self) -> WidgetRef {
        Rc::clone(self)
    }

    fn widget_id(&self) -> WidgetId {
        self.id()
    }
}
