use std::cell::RefCell;
use std::rc::Rc;

use super::builtin::{ChoiceAdapter, TextInputAdapter};
use super::ValueAdapter;
use crate::widget::{ListenerKey, Subscription, Widget};

thread_local! {
    static GLOBAL: Rc<AdapterRegistry> = Rc::new(AdapterRegistry::new());
}

/// Ordered adapter lookup: custom adapters first, then built-ins.
pub struct AdapterRegistry {
    custom: RefCell<Vec<Rc<dyn ValueAdapter>>>,
    builtin: Vec<Rc<dyn ValueAdapter>>,
}

impl AdapterRegistry {
    /// A registry with the built-in adapters and no custom ones.
    pub fn new() -> Self {
        Self {
            custom: RefCell::new(Vec::new()),
            builtin: vec![Rc::new(TextInputAdapter), Rc::new(ChoiceAdapter)],
        }
    }

    /// A registry with no adapters at all. Every widget falls back to its
    /// client value.
    pub fn empty() -> Self {
        Self {
            custom: RefCell::new(Vec::new()),
            builtin: Vec::new(),
        }
    }

    /// The shared default registry of the current (UI) thread.
    pub fn global() -> Rc<Self> {
        GLOBAL.with(Rc::clone)
    }

    /// Add a custom adapter. Later registrations are consulted after earlier
    /// ones, and all of them before the built-ins.
    pub fn register(&self, adapter: impl ValueAdapter + 'static) {
        self.custom.borrow_mut().push(Rc::new(adapter));
    }

    pub fn clear_custom(&self) {
        self.custom.borrow_mut().clear();
    }

    pub fn custom_count(&self) -> usize {
        self.custom.borrow().len()
    }

    /// First adapter that supports `widget`.
    pub fn find(&self, widget: &dyn Widget) -> Option<Rc<dyn ValueAdapter>> {
        let custom = self
            .custom
            .borrow()
            .iter()
            .find(|adapter| adapter.supports(widget))
            .cloned();
        custom.or_else(|| {
            self.builtin
                .iter()
                .find(|adapter| adapter.supports(widget))
                .cloned()
        })
    }

    /// Current value of `widget`.
    ///
    /// Falls back to the widget's client value, then to `""`.
    pub fn value_of(&self, widget: &dyn Widget) -> String {
        match self.find(widget) {
            Some(adapter) => adapter.value(widget),
            None => widget
                .client_value()
                .map(|value| value.trim().to_string())
                .unwrap_or_default(),
        }
    }

    /// Listen for value changes of `widget` through its adapter.
    ///
    /// Returns `None` when no adapter claims the widget.
    pub fn subscribe(
        &self,
        widget: &dyn Widget,
        key: ListenerKey,
        on_change: Rc<dyn Fn()>,
    ) -> Option<Subscription> {
        let adapter = self.find(widget);
        match adapter {
            Some(adapter) => adapter.subscribe(widget, key, on_change),
            None => {
                log::trace!("no adapter for {}; value changes are not observed", widget.id());
                None
            }
        }
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
