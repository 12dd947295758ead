//! Value extraction: turning an arbitrary host widget into a string.
//!
//! Rules only ever see strings. A [`ValueAdapter`] knows how to read one
//! widget family and how to listen for its value changes; the
//! [`AdapterRegistry`] picks the first adapter that claims a widget, custom
//! adapters before built-in ones.

mod builtin;
mod registry;

use std::rc::Rc;

use crate::widget::{ListenerKey, Subscription, Widget};

pub use builtin::{ChoiceAdapter, TextInputAdapter};
pub use registry::AdapterRegistry;

/// Reads the value of one widget family.
pub trait ValueAdapter {
    /// Whether this adapter handles `widget`.
    fn supports(&self, widget: &dyn Widget) -> bool;

    /// Current value, trimmed. Never fails: unreadable values are `""`.
    fn value(&self, widget: &dyn Widget) -> String;

    /// Call `on_change` whenever the value of `widget` changes.
    ///
    /// Subscribing again with an equal `key` must replace the previous
    /// listener rather than add a second one.
    fn subscribe(
        &self,
        widget: &dyn Widget,
        key: ListenerKey,
        on_change: Rc<dyn Fn()>,
    ) -> Option<Subscription>;
}
