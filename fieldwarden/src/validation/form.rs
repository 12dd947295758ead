//! The form coordinator: fields, gating and aggregate validity.
//!
//! A field starts *pristine*. While pristine, value changes may clear an
//! error but never surface a new one, so a form does not light up while the
//! user is still typing into it for the first time. A field becomes
//! *touched* when it loses focus, when `validate_all` runs, or for every
//! field at once while `show_while_typing` is on.
//!
//! With real-time validation turned off, widget events do nothing until the
//! first `validate_all`.

use std::cell::RefCell;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use super::field::{Field, FieldState};
use super::result::{FieldError, ValidationResult};
use super::rule::{Rule, Subject};
use crate::adapter::AdapterRegistry;
use crate::display::{DisplayRef, ErrorDisplay, TooltipConfig, TooltipDisplay};
use crate::error::extract_panic_message;
use crate::widget::{AsWidget, ListenerKey, OwnerId, Purpose, WidgetEvent, WidgetId, WidgetRef};

/// Handle returned by [`FormCoordinator::on_validation_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(usize);

type Observer = Rc<dyn Fn(bool)>;

struct FormInner {
    owner: OwnerId,
    registry: Rc<AdapterRegistry>,
    fields: Vec<Rc<FieldState>>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: usize,
    display: DisplayRef,
    /// `validate_all` ran since the last clear.
    validated: bool,
    show_while_typing: bool,
    real_time: bool,
}

impl FormInner {
    fn find(&self, id: WidgetId) -> Option<Rc<FieldState>> {
        self.fields.iter().find(|state| state.id() == id).cloned()
    }

    fn effective_display(&self, state: &FieldState) -> DisplayRef {
        state.display().unwrap_or_else(|| Rc::clone(&self.display))
    }
}

/// Owns the fields of one form and drives their error displays.
///
/// The coordinator is a cheap handle; clones share the same form. It must
/// only be used from the UI thread.
#[derive(Clone)]
pub struct FormCoordinator {
    inner: Rc<RefCell<FormInner>>,
}

impl FormCoordinator {
    /// A form using dark tooltips and the thread's global adapter registry.
    pub fn new() -> Self {
        Self::with_parts(TooltipDisplay::new(TooltipConfig::dark()), AdapterRegistry::global())
    }

    pub fn with_display(display: impl ErrorDisplay + 'static) -> Self {
        Self::with_parts(display, AdapterRegistry::global())
    }

    pub fn with_registry(registry: Rc<AdapterRegistry>) -> Self {
        Self::with_parts(TooltipDisplay::new(TooltipConfig::dark()), registry)
    }

    pub fn with_parts(display: impl ErrorDisplay + 'static, registry: Rc<AdapterRegistry>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FormInner {
                owner: OwnerId::new(),
                registry,
                fields: Vec::new(),
                observers: Vec::new(),
                next_observer: 0,
                display: Rc::new(display),
                validated: false,
                show_while_typing: false,
                real_time: true,
            })),
        }
    }

    fn downgrade(&self) -> Weak<RefCell<FormInner>> {
        Rc::downgrade(&self.inner)
    }

    fn upgrade(weak: &Weak<RefCell<FormInner>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn registry(&self) -> Rc<AdapterRegistry> {
        Rc::clone(&self.inner.borrow().registry)
    }

    // =========================================================================
    // Fields
    // =========================================================================

    /// Start (or continue) attaching rules to `widget`.
    ///
    /// The widget becomes a field of this form when the first rule is
    /// attached.
    pub fn field<W: AsWidget + ?Sized>(&self, widget: &W) -> Field {
        let widget = widget.to_widget_ref();
        let existing = self.inner.borrow().find(widget.id());
        let state = existing.unwrap_or_else(|| Rc::new(FieldState::new(&widget)));
        Field::new(self.clone(), state)
    }

    /// Attach a raw check function to `widget`.
    pub fn add_validator<W, F>(&self, widget: &W, check: F) -> Field
    where
        W: AsWidget + ?Sized,
        F: Fn(&Subject<'_>) -> Option<String> + 'static,
    {
        self.field(widget).rule(Rule::new(check))
    }

    /// Make `state` a field of this form, installing its listeners.
    ///
    /// Returns the registered state for the widget. If another handle
    /// registered the same widget first, `state`'s rules move into it.
    pub(crate) fn attach(&self, state: &Rc<FieldState>) -> Rc<FieldState> {
        if state.is_registered() {
            return Rc::clone(state);
        }
        let Some(widget) = state.widget() else {
            log::debug!("form: {} is gone, not registered", state.id());
            return Rc::clone(state);
        };
        self.prune_dead();

        let id = state.id();
        let existing = self.inner.borrow().find(id);
        if let Some(existing) = existing {
            existing.absorb(state);
            return existing;
        }

        let (owner, registry) = {
            let mut inner = self.inner.borrow_mut();
            inner.fields.push(Rc::clone(state));
            (inner.owner, Rc::clone(&inner.registry))
        };
        state.set_registered(true);
        log::debug!("form: registered field {}", id);

        let weak = self.downgrade();
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(form) = Self::upgrade(&weak) {
                log::trace!("form: {} changed", id);
                form.react(id);
            }
        });
        if let Some(subscription) =
            registry.subscribe(&*widget, ListenerKey::new(owner, Purpose::Validate), on_change)
        {
            state.keep(id, Purpose::Validate, subscription);
        }

        let weak = self.downgrade();
        let on_event: Rc<dyn Fn(WidgetEvent)> = Rc::new(move |event| {
            if event != WidgetEvent::FocusLost {
                return;
            }
            if let Some(form) = Self::upgrade(&weak) {
                log::trace!("form: {} lost focus", id);
                form.touch(id);
            }
        });
        if let Some(subscription) = widget.listen(ListenerKey::new(owner, Purpose::Commit), on_event) {
            state.keep(id, Purpose::Commit, subscription);
        }

        Rc::clone(state)
    }

    /// Re-validate `state` whenever `source` changes.
    pub(crate) fn depend_on(&self, state: &Rc<FieldState>, source: &WidgetRef) {
        let id = state.id();
        let purpose = Purpose::DependsOn(id);
        if !state.is_registered() || state.has_subscription(source.id(), purpose) {
            return;
        }

        let (owner, registry) = {
            let inner = self.inner.borrow();
            (inner.owner, Rc::clone(&inner.registry))
        };
        let weak = self.downgrade();
        let on_change: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(form) = Self::upgrade(&weak) {
                log::trace!("form: dependency of {} changed", id);
                form.react(id);
            }
        });
        if let Some(subscription) =
            registry.subscribe(&**source, ListenerKey::new(owner, purpose), on_change)
        {
            state.keep(source.id(), purpose, subscription);
        }
    }

    /// Stop validating `widget`: hide its error, drop its listeners.
    ///
    /// Returns false if the widget was not a field of this form.
    pub fn remove_field<W: AsWidget + ?Sized>(&self, widget: &W) -> bool {
        let id = widget.widget_id();
        let removed = {
            let mut inner = self.inner.borrow_mut();
            let position = inner.fields.iter().position(|state| state.id() == id);
            position.map(|position| {
                let state = inner.fields.remove(position);
                let display = inner.effective_display(&state);
                (state, display)
            })
        };
        let Some((state, display)) = removed else {
            return false;
        };

        let was_erroneous = state.has_error();
        display.hide_error(id);
        state.set_error(None);
        state.release();
        log::debug!("form: removed field {}", id);

        let pruned_error = self.prune_dead();
        if was_erroneous || pruned_error {
            self.notify(self.erroneous_fields().is_empty());
        }
        true
    }

    /// Drop fields whose widget no longer exists, hiding any error they
    /// left on screen. Returns true if one of them was showing an error.
    fn prune_dead(&self) -> bool {
        let dead: Vec<(Rc<FieldState>, DisplayRef)> = {
            let mut inner = self.inner.borrow_mut();
            let (dead, live): (Vec<_>, Vec<_>) = mem::take(&mut inner.fields)
                .into_iter()
                .partition(|state| state.widget().is_none());
            inner.fields = live;
            dead.into_iter()
                .map(|state| {
                    let display = inner.effective_display(&state);
                    (state, display)
                })
                .collect()
        };

        let mut had_error = false;
        for (state, display) in dead {
            had_error |= state.has_error();
            display.hide_error(state.id());
            state.set_error(None);
            state.release();
            log::debug!("form: dropped field {}, its widget is gone", state.id());
        }
        had_error
    }

    pub fn has_field<W: AsWidget + ?Sized>(&self, widget: &W) -> bool {
        self.inner.borrow().find(widget.widget_id()).is_some()
    }

    /// Fields whose widget still exists.
    pub fn field_count(&self) -> usize {
        self.inner
            .borrow()
            .fields
            .iter()
            .filter(|state| state.widget().is_some())
            .count()
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Validate every field, show or hide every error, and focus the first
    /// invalid field.
    pub fn validate_all(&self) -> ValidationResult {
        self.prune_dead();
        let fields = {
            let mut inner = self.inner.borrow_mut();
            inner.validated = true;
            inner.fields.clone()
        };
        let registry = self.registry();

        let mut errors = Vec::new();
        let mut first_invalid: Option<WidgetRef> = None;
        for state in fields {
            let Some(widget) = state.widget() else {
                continue;
            };
            let display = self.inner.borrow().effective_display(&state);
            match state.evaluate(&registry) {
                Some(message) => {
                    display.show_error(&widget, &message);
                    state.set_error(Some(message.clone()));
                    errors.push(FieldError {
                        widget_id: state.id(),
                        message,
                    });
                    first_invalid.get_or_insert(widget);
                }
                None => {
                    display.hide_error(state.id());
                    state.set_error(None);
                }
            }
        }

        log::debug!(
            "form: validate_all checked {} fields, {} invalid",
            self.field_count(),
            errors.len()
        );
        self.notify(errors.is_empty());

        if let Some(widget) = first_invalid {
            widget.scroll_into_view();
            widget.request_focus();
        }
        ValidationResult::from_errors(errors)
    }

    /// Validate one field, subject to gating.
    pub fn validate_field<W: AsWidget + ?Sized>(&self, widget: &W) {
        self.validate_by_id(widget.widget_id());
    }

    fn touch(&self, id: WidgetId) {
        let state = self.inner.borrow().find(id);
        if let Some(state) = state {
            state.set_touched(true);
            self.react(id);
        }
    }

    /// Validation triggered by a widget event.
    fn react(&self, id: WidgetId) {
        let idle = {
            let inner = self.inner.borrow();
            !inner.real_time && !inner.validated
        };
        if idle {
            log::trace!("form: real-time validation is off, {} ignored", id);
            return;
        }
        self.validate_by_id(id);
    }

    fn validate_by_id(&self, id: WidgetId) {
        let pruned_error = self.prune_dead();
        let found = {
            let inner = self.inner.borrow();
            inner.find(id).map(|state| {
                let display = inner.effective_display(&state);
                let revealing = inner.validated || inner.show_while_typing || state.is_touched();
                (state, display, Rc::clone(&inner.registry), revealing)
            })
        };
        let Some((state, display, registry, revealing)) = found else {
            log::trace!("form: {} is not a field", id);
            if pruned_error {
                self.notify(self.erroneous_fields().is_empty());
            }
            return;
        };
        let Some(widget) = state.widget() else {
            return;
        };

        let was_erroneous = state.has_error();
        match state.evaluate(&registry) {
            Some(message) if revealing => {
                display.show_error(&widget, &message);
                state.set_error(Some(message));
            }
            Some(_) => {
                log::trace!("form: {} is pristine, error not shown", id);
            }
            None if was_erroneous => {
                display.hide_error(id);
                state.set_error(None);
            }
            None => {}
        }

        if was_erroneous != state.has_error() || pruned_error {
            self.notify(self.erroneous_fields().is_empty());
        }
    }

    /// Whether every field currently passes. Nothing is shown or hidden.
    pub fn is_valid(&self) -> bool {
        let (fields, registry) = {
            let inner = self.inner.borrow();
            (inner.fields.clone(), Rc::clone(&inner.registry))
        };
        fields.iter().all(|state| state.evaluate(&registry).is_none())
    }

    /// Current error of `widget`, evaluated now. Nothing is shown or hidden.
    pub fn field_error<W: AsWidget + ?Sized>(&self, widget: &W) -> Option<String> {
        let (state, registry) = {
            let inner = self.inner.borrow();
            (inner.find(widget.widget_id()), Rc::clone(&inner.registry))
        };
        state.and_then(|state| state.evaluate(&registry))
    }

    pub fn is_field_valid<W: AsWidget + ?Sized>(&self, widget: &W) -> bool {
        self.field_error(widget).is_none()
    }

    /// Fields whose error is currently visible, in insertion order.
    pub fn erroneous_fields(&self) -> Vec<WidgetId> {
        self.inner
            .borrow()
            .fields
            .iter()
            .filter(|state| state.has_error() && state.widget().is_some())
            .map(|state| state.id())
            .collect()
    }

    /// Visible error of `widget`, as last rendered.
    pub fn visible_error<W: AsWidget + ?Sized>(&self, widget: &W) -> Option<String> {
        self.inner
            .borrow()
            .find(widget.widget_id())
            .and_then(|state| state.error())
    }

    pub fn is_validated(&self) -> bool {
        self.inner.borrow().validated
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Call `observer` with the form-wide validity whenever it may have
    /// changed.
    pub fn on_validation_changed(&self, observer: impl Fn(bool) + 'static) -> ObserverId {
        let mut inner = self.inner.borrow_mut();
        let id = ObserverId(inner.next_observer);
        inner.next_observer += 1;
        inner.observers.push((id, Rc::new(observer)));
        id
    }

    pub fn remove_observer(&self, id: ObserverId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.observers.len();
        inner.observers.retain(|(observer_id, _)| *observer_id != id);
        inner.observers.len() != before
    }

    fn notify(&self, all_valid: bool) {
        let observers: Vec<Observer> = self
            .inner
            .borrow()
            .observers
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();

        for observer in observers {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(all_valid)));
            if let Err(panic) = outcome {
                log::error!("form: validation observer panicked: {}", extract_panic_message(&*panic));
            }
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Replace the default display.
    ///
    /// The previous display is disposed and every visible error that used
    /// it is shown again on the new one.
    pub fn set_error_display(&self, display: impl ErrorDisplay + 'static) {
        let display: DisplayRef = Rc::new(display);
        let (previous, visible) = {
            let mut inner = self.inner.borrow_mut();
            let previous = mem::replace(&mut inner.display, Rc::clone(&display));
            let visible: Vec<(WidgetRef, String)> = inner
                .fields
                .iter()
                .filter(|state| state.display().is_none())
                .filter_map(|state| Some((state.widget()?, state.error()?)))
                .collect();
            (previous, visible)
        };

        previous.dispose();
        for (widget, message) in visible {
            display.show_error(&widget, &message);
        }
    }

    pub fn error_display(&self) -> DisplayRef {
        Rc::clone(&self.inner.borrow().display)
    }

    /// Treat every field as touched, so errors show while typing.
    pub fn set_show_while_typing(&self, enabled: bool) {
        self.inner.borrow_mut().show_while_typing = enabled;
    }

    pub fn show_while_typing(&self) -> bool {
        self.inner.borrow().show_while_typing
    }

    /// Validate on every value change and focus loss. On by default. When
    /// off, widget events are ignored until `validate_all` has run once.
    pub fn set_real_time(&self, enabled: bool) {
        self.inner.borrow_mut().real_time = enabled;
    }

    pub fn real_time(&self) -> bool {
        self.inner.borrow().real_time
    }

    /// Hide every error and return every field to pristine.
    pub fn clear_validation(&self) {
        let (fields, default) = {
            let mut inner = self.inner.borrow_mut();
            inner.validated = false;
            (inner.fields.clone(), Rc::clone(&inner.display))
        };
        for state in fields {
            let display = state.display().unwrap_or_else(|| Rc::clone(&default));
            display.hide_error(state.id());
            state.set_error(None);
            state.set_touched(false);
        }
        self.notify(true);
    }

    /// Tear the form down: hide everything, drop every listener and
    /// observer, dispose the default display.
    pub fn dispose(&self) {
        self.clear_validation();
        let (fields, display) = {
            let mut inner = self.inner.borrow_mut();
            inner.observers.clear();
            (mem::take(&mut inner.fields), Rc::clone(&inner.display))
        };
        for state in &fields {
            state.release();
        }
        display.dispose();
        log::debug!("form: disposed ({} fields released)", fields.len());
    }
}

impl Default for FormCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
