use std::cell::RefCell;
use std::rc::Rc;

use super::{DisplayRef, ErrorDisplay};
use crate::widget::{WidgetId, WidgetRef};

/// Fans every call out to its children, in order.
///
/// ```ignore
/// let display = CompositeDisplay::new()
///     .with(TooltipDisplay::new(TooltipConfig::dark()))
///     .with(TrailingMarkerDisplay::default());
/// ```
#[derive(Default)]
pub struct CompositeDisplay {
    children: RefCell<Vec<DisplayRef>>,
}

impl CompositeDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, display: impl ErrorDisplay + 'static) -> Self {
        self.push(display);
        self
    }

    pub fn push(&self, display: impl ErrorDisplay + 'static) {
        self.children.borrow_mut().push(Rc::new(display));
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }

    fn snapshot(&self) -> Vec<DisplayRef> {
        self.children.borrow().clone()
    }
}

impl ErrorDisplay for CompositeDisplay {
    fn show_error(&self, target: &WidgetRef, message: &str) {
        for child in self.snapshot() {
            child.show_error(target, message);
        }
    }

    fn hide_error(&self, target: WidgetId) {
        for child in self.snapshot() {
            child.hide_error(target);
        }
    }

    fn is_showing(&self, target: WidgetId) -> bool {
        self.snapshot().iter().any(|child| child.is_showing(target))
    }

    /// Disposes every child and forgets them.
    fn dispose(&self) {
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.dispose();
        }
    }
}
