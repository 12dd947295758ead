//! Displays that only decorate the target widget itself.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use anchorage::Color;

use super::ErrorDisplay;
use crate::widget::{Outline, TrailingMarker, Widget, WidgetId, WidgetRef};

/// Targets currently decorated, so `hide_error(id)` can reach them.
#[derive(Default)]
struct Decorated {
    targets: RefCell<HashMap<WidgetId, Weak<dyn Widget>>>,
}

impl Decorated {
    fn insert(&self, target: &WidgetRef) {
        self.targets
            .borrow_mut()
            .insert(target.id(), Rc::downgrade(target));
    }

    fn remove(&self, id: WidgetId) -> Option<WidgetRef> {
        let removed = self.targets.borrow_mut().remove(&id);
        removed.and_then(|target| target.upgrade())
    }

    fn contains(&self, id: WidgetId) -> bool {
        self.targets.borrow().contains_key(&id)
    }

    fn drain(&self) -> Vec<WidgetRef> {
        let drained: Vec<Weak<dyn Widget>> =
            self.targets.borrow_mut().drain().map(|(_, target)| target).collect();
        drained.iter().filter_map(Weak::upgrade).collect()
    }
}

/// Error outline plus hint text on the target.
pub struct OutlineDisplay {
    outline: Outline,
    decorated: Decorated,
}

impl OutlineDisplay {
    pub fn new(outline: Outline) -> Self {
        Self {
            outline,
            decorated: Decorated::default(),
        }
    }

    fn clear(target: &WidgetRef) {
        target.set_outline(None);
        target.set_hint(None);
    }
}

impl Default for OutlineDisplay {
    fn default() -> Self {
        Self::new(Outline::Error)
    }
}

impl ErrorDisplay for OutlineDisplay {
    fn show_error(&self, target: &WidgetRef, message: &str) {
        target.set_outline(Some(self.outline));
        target.set_hint(Some(message));
        self.decorated.insert(target);
    }

    fn hide_error(&self, target: WidgetId) {
        if let Some(target) = self.decorated.remove(target) {
            Self::clear(&target);
        }
    }

    fn is_showing(&self, target: WidgetId) -> bool {
        self.decorated.contains(target)
    }

    fn dispose(&self) {
        for target in self.decorated.drain() {
            Self::clear(&target);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerConfig {
    pub glyph: char,
    pub color: Color,
    /// Also outline the target.
    pub outline: bool,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            glyph: '✕',
            color: Color::hex(0xD9534F),
            outline: true,
        }
    }
}

/// A marker at the trailing edge of the target, with the message as hint.
pub struct TrailingMarkerDisplay {
    config: MarkerConfig,
    decorated: Decorated,
}

impl TrailingMarkerDisplay {
    pub fn new(config: MarkerConfig) -> Self {
        Self {
            config,
            decorated: Decorated::default(),
        }
    }

    fn clear(&self, target: &WidgetRef) {
        target.set_trailing_marker(None);
        target.set_hint(None);
        if self.config.outline {
            target.set_outline(None);
        }
    }
}

impl Default for TrailingMarkerDisplay {
    fn default() -> Self {
        Self::new(MarkerConfig::default())
    }
}

impl ErrorDisplay for TrailingMarkerDisplay {
    fn show_error(&self, target: &WidgetRef, message: &str) {
        target.set_trailing_marker(Some(TrailingMarker {
            glyph: self.config.glyph,
            color: self.config.color,
        }));
        target.set_hint(Some(message));
        if self.config.outline {
            target.set_outline(Some(Outline::Error));
        }
        self.decorated.insert(target);
    }

    fn hide_error(&self, target: WidgetId) {
        if let Some(target) = self.decorated.remove(target) {
            self.clear(&target);
        }
    }

    fn is_showing(&self, target: WidgetId) -> bool {
        self.decorated.contains(target)
    }

    fn dispose(&self) {
        for target in self.decorated.drain() {
            self.clear(&target);
        }
    }
}
