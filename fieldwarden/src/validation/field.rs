//! Per-field state and the fluent attach API.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::mem;
use std::rc::{Rc, Weak};

use super::form::FormCoordinator;
use super::rule::{Message, Rule, RuleSet, Subject};
use super::rules;
use crate::adapter::AdapterRegistry;
use crate::display::{DisplayRef, ErrorDisplay};
use crate::error::FormError;
use crate::i18n::keys;
use crate::widget::{AsWidget, Purpose, Subscription, Widget, WidgetId, WidgetRef};

/// Everything a form knows about one widget.
pub(crate) struct FieldState {
    id: WidgetId,
    widget: Weak<dyn Widget>,
    rules: RefCell<RuleSet>,
    /// Part of its form's field list, with listeners installed.
    registered: Cell<bool>,
    /// Lost focus at least once since the last clear.
    touched: Cell<bool>,
    /// Error currently rendered through the effective display.
    error: RefCell<Option<String>>,
    display: RefCell<Option<DisplayRef>>,
    subscriptions: RefCell<HashMap<(WidgetId, Purpose), Subscription>>,
}

impl FieldState {
    pub(crate) fn new(widget: &WidgetRef) -> Self {
        Self {
            id: widget.id(),
            widget: Rc::downgrade(widget),
            rules: RefCell::new(RuleSet::new()),
            registered: Cell::new(false),
            touched: Cell::new(false),
            error: RefCell::new(None),
            display: RefCell::new(None),
            subscriptions: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn id(&self) -> WidgetId {
        self.id
    }

    pub(crate) fn widget(&self) -> Option<WidgetRef> {
        self.widget.upgrade()
    }

    pub(crate) fn push_rule(&self, rule: Rule) {
        self.rules.borrow_mut().push(rule);
    }

    pub(crate) fn rule_count(&self) -> usize {
        self.rules.borrow().len()
    }

    /// Move the rules of an unregistered duplicate into this field. Its
    /// display override is kept unless this field already has one.
    pub(crate) fn absorb(&self, other: &FieldState) {
        let rules = mem::take(&mut *other.rules.borrow_mut());
        self.rules.borrow_mut().extend(rules);
        if self.display.borrow().is_none() {
            *self.display.borrow_mut() = other.display.borrow_mut().take();
        }
    }

    pub(crate) fn is_registered(&self) -> bool {
        self.registered.get()
    }

    pub(crate) fn set_registered(&self, registered: bool) {
        self.registered.set(registered);
    }

    /// Run the rules against the current value.
    ///
    /// A widget that no longer exists is valid.
    pub(crate) fn evaluate(&self, registry: &AdapterRegistry) -> Option<String> {
        let widget = self.widget()?;
        let value = registry.value_of(&*widget);
        // Rules may attach more rules to this field; never evaluate under the borrow.
        let rules = self.rules.borrow().clone();
        rules.evaluate(&Subject::new(&*widget, &value))
    }

    pub(crate) fn is_touched(&self) -> bool {
        self.touched.get()
    }

    pub(crate) fn set_touched(&self, touched: bool) {
        self.touched.set(touched);
    }

    pub(crate) fn error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub(crate) fn has_error(&self) -> bool {
        self.error.borrow().is_some()
    }

    pub(crate) fn set_error(&self, error: Option<String>) {
        *self.error.borrow_mut() = error;
    }

    pub(crate) fn display(&self) -> Option<DisplayRef> {
        self.display.borrow().clone()
    }

    pub(crate) fn set_display(&self, display: DisplayRef) {
        *self.display.borrow_mut() = Some(display);
    }

    pub(crate) fn has_subscription(&self, source: WidgetId, purpose: Purpose) -> bool {
        self.subscriptions.borrow().contains_key(&(source, purpose))
    }

    pub(crate) fn keep(&self, source: WidgetId, purpose: Purpose, subscription: Subscription) {
        let previous = self
            .subscriptions
            .borrow_mut()
            .insert((source, purpose), subscription);
        drop(previous);
    }

    /// Drop every listener this field installed and leave the form.
    pub(crate) fn release(&self) {
        self.registered.set(false);
        let subscriptions = mem::take(&mut *self.subscriptions.borrow_mut());
        drop(subscriptions);
    }
}

/// Fluent handle for attaching rules to one field.
///
/// Obtained from [`FormCoordinator::field`]. The field joins the form, and
/// starts listening to its widget, when the first rule is attached. Calling
/// `field` again for the same widget returns a handle to the same field, so
/// rules accumulate.
///
/// ```ignore
/// form.field(&username).required().min_length(3);
/// form.field(&email).required().email();
/// form.field(&confirm).required().matches(&password);
/// ```
pub struct Field {
    form: FormCoordinator,
    state: Rc<FieldState>,
}

impl Field {
    pub(crate) fn new(form: FormCoordinator, state: Rc<FieldState>) -> Self {
        Self { form, state }
    }

    pub fn id(&self) -> WidgetId {
        self.state.id()
    }

    pub fn rule_count(&self) -> usize {
        self.state.rule_count()
    }

    /// Attach any rule.
    pub fn rule(mut self, rule: Rule) -> Self {
        self.state.push_rule(rule);
        self.state = self.form.attach(&self.state);
        self
    }

    /// Attach a raw check function.
    pub fn custom<F>(self, check: F) -> Self
    where
        F: Fn(&Subject<'_>) -> Option<String> + 'static,
    {
        self.rule(rules::custom(check))
    }

    /// Attach `rule`, applied only while `condition` holds.
    pub fn when<C>(self, condition: C, rule: Rule) -> Self
    where
        C: Fn() -> bool + 'static,
    {
        self.rule(Rule::when(condition, rule))
    }

    /// Show this field's errors through `display` instead of the form's
    /// default display.
    pub fn display(self, display: impl ErrorDisplay + 'static) -> Self {
        self.state.set_display(Rc::new(display));
        self
    }

    pub fn required(self) -> Self {
        self.rule(rules::required())
    }

    pub fn required_msg(self, message: impl Into<Message>) -> Self {
        self.rule(rules::required_msg(message))
    }

    pub fn required_when<C>(self, condition: C) -> Self
    where
        C: Fn() -> bool + 'static,
    {
        self.rule(rules::required_when(condition))
    }

    pub fn min_length(self, min: usize) -> Self {
        self.rule(rules::min_length(min))
    }

    pub fn max_length(self, max: usize) -> Self {
        self.rule(rules::max_length(max))
    }

    pub fn length(self, min: usize, max: usize) -> Result<Self, FormError> {
        let [lower, upper] = rules::length(min, max)?;
        Ok(self.rule(lower).rule(upper))
    }

    pub fn pattern(self, pattern: &str) -> Result<Self, FormError> {
        Ok(self.rule(rules::pattern(pattern)?))
    }

    pub fn pattern_msg(self, pattern: &str, message: impl Into<Message>) -> Result<Self, FormError> {
        Ok(self.rule(rules::pattern_msg(pattern, message)?))
    }

    pub fn email(self) -> Self {
        self.rule(rules::email())
    }

    pub fn number(self) -> Self {
        self.rule(rules::number())
    }

    pub fn integer(self) -> Self {
        self.rule(rules::integer())
    }

    pub fn digits(self, count: usize) -> Self {
        self.rule(rules::digits(count))
    }

    pub fn url(self) -> Self {
        self.rule(rules::url())
    }

    pub fn min(self, min: f64) -> Self {
        self.rule(rules::min(min))
    }

    pub fn max(self, max: f64) -> Self {
        self.rule(rules::max(max))
    }

    pub fn between(self, min: f64, max: f64) -> Result<Self, FormError> {
        Ok(self.rule(rules::between(min, max)?))
    }

    pub fn one_of<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rule(rules::one_of(values))
    }

    pub fn matches_value<F>(self, other: F) -> Self
    where
        F: Fn() -> String + 'static,
    {
        self.rule(rules::matches_value(other))
    }

    /// Must equal the current value of `other`.
    ///
    /// Changing `other` re-validates this field.
    pub fn matches<W: AsWidget + ?Sized>(self, other: &W) -> Self {
        self.matches_msg(other, Message::localized(keys::MATCHES))
    }

    pub fn matches_msg<W: AsWidget + ?Sized>(self, other: &W, message: impl Into<Message>) -> Self {
        let other = other.to_widget_ref();
        let registry = self.form.registry();
        let source = Rc::downgrade(&other);
        let rule = rules::matches_value_msg(
            move || {
                source
                    .upgrade()
                    .map(|widget| registry.value_of(&*widget))
                    .unwrap_or_default()
            },
            message,
        );
        let field = self.rule(rule);
        field.form.depend_on(&field.state, &other);
        field
    }
}
