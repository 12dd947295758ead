use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anchorage::Rect;

use super::listeners::Listeners;
use super::surface::HeadlessSurface;
use crate::surface::OverlaySurface;
use crate::widget::{
    ListenerKey, Outline, Subscription, TrailingMarker, Widget, WidgetEvent, WidgetId,
};

/// A headless widget: shared geometry, visibility and decoration state plus
/// a family-specific value `S`.
pub struct Headless<S> {
    id: WidgetId,
    state: S,
    bounds: Cell<Option<Rect>>,
    showing: Cell<bool>,
    surface: RefCell<Option<Rc<HeadlessSurface>>>,
    events: Listeners<WidgetEvent>,
    changes: Listeners<()>,
    client_value: RefCell<Option<String>>,
    outline: Cell<Option<Outline>>,
    hint: RefCell<Option<String>>,
    marker: Cell<Option<TrailingMarker>>,
    focus_requests: Cell<usize>,
    scroll_requests: Cell<usize>,
}

impl<S: 'static> Headless<S> {
    fn with_state(state: S) -> Rc<Self> {
        Rc::new(Self {
            id: WidgetId::new(),
            state,
            bounds: Cell::new(None),
            showing: Cell::new(false),
            surface: RefCell::new(None),
            events: Listeners::new(),
            changes: Listeners::new(),
            client_value: RefCell::new(None),
            outline: Cell::new(None),
            hint: RefCell::new(None),
            marker: Cell::new(None),
            focus_requests: Cell::new(0),
            scroll_requests: Cell::new(0),
        })
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    // -------------------------------------------------------------------------
    // Host-side driving
    // -------------------------------------------------------------------------

    /// Place the widget on `surface` and show it.
    pub fn mount(&self, surface: &Rc<HeadlessSurface>, bounds: Rect) {
        *self.surface.borrow_mut() = Some(Rc::clone(surface));
        self.bounds.set(Some(bounds));
        self.showing.set(true);
        self.events.emit(WidgetEvent::Shown);
    }

    /// Attach to `surface` without showing, like a widget on a hidden tab.
    pub fn attach(&self, surface: &Rc<HeadlessSurface>, bounds: Rect) {
        *self.surface.borrow_mut() = Some(Rc::clone(surface));
        self.bounds.set(Some(bounds));
    }

    pub fn unmount(&self) {
        let was_showing = self.showing.replace(false);
        self.bounds.set(None);
        *self.surface.borrow_mut() = None;
        if was_showing {
            self.events.emit(WidgetEvent::Hidden);
        }
    }

    pub fn show(&self) {
        if !self.showing.replace(true) {
            self.events.emit(WidgetEvent::Shown);
        }
    }

    pub fn hide(&self) {
        if self.showing.replace(false) {
            self.events.emit(WidgetEvent::Hidden);
        }
    }

    pub fn move_to(&self, x: i32, y: i32) {
        if let Some(bounds) = self.bounds.get() {
            self.bounds.set(Some(Rect::new(x, y, bounds.width, bounds.height)));
            self.events.emit(WidgetEvent::Moved);
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        if let Some(bounds) = self.bounds.get() {
            self.bounds.set(Some(Rect::new(bounds.x, bounds.y, width, height)));
            self.events.emit(WidgetEvent::Resized);
        }
    }

    /// Simulate focus leaving the widget.
    pub fn blur(&self) {
        self.events.emit(WidgetEvent::FocusLost);
    }

    /// Set the generic tagged value.
    pub fn set_client_value(&self, value: Option<&str>) {
        *self.client_value.borrow_mut() = value.map(str::to_string);
        self.changes.emit(());
    }

    /// Listen for value changes.
    pub fn on_change(&self, key: ListenerKey, listener: Rc<dyn Fn()>) -> Subscription {
        self.changes.insert(key, Rc::new(move |()| listener()))
    }

    // -------------------------------------------------------------------------
    // Inspection
    // -------------------------------------------------------------------------

    pub fn outline(&self) -> Option<Outline> {
        self.outline.get()
    }

    pub fn hint(&self) -> Option<String> {
        self.hint.borrow().clone()
    }

    pub fn trailing_marker(&self) -> Option<TrailingMarker> {
        self.marker.get()
    }

    pub fn focus_requests(&self) -> usize {
        self.focus_requests.get()
    }

    pub fn scroll_requests(&self) -> usize {
        self.scroll_requests.get()
    }

    pub fn event_listener_count(&self) -> usize {
        self.events.len()
    }

    pub fn change_listener_count(&self) -> usize {
        self.changes.len()
    }
}

impl<S: 'static> Widget for Headless<S> {
    fn id(&self) -> WidgetId {
        self.id
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn bounds(&self) -> Option<Rect> {
        self.bounds.get()
    }

    fn is_showing(&self) -> bool {
        self.showing.get()
    }

    fn overlay_surface(&self) -> Option<Rc<dyn OverlaySurface>> {
        self.surface
            .borrow()
            .as_ref()
            .map(|surface| Rc::clone(surface) as Rc<dyn OverlaySurface>)
    }

    fn listen(&self, key: ListenerKey, listener: Rc<dyn Fn(WidgetEvent)>) -> Option<Subscription> {
        Some(self.events.insert(key, listener))
    }

    fn client_value(&self) -> Option<String> {
        self.client_value.borrow().clone()
    }

    fn request_focus(&self) {
        self.focus_requests.set(self.focus_requests.get() + 1);
    }

    fn scroll_into_view(&self) {
        self.scroll_requests.set(self.scroll_requests.get() + 1);
    }

    fn set_outline(&self, outline: Option<Outline>) {
        self.outline.set(outline);
    }

    fn set_hint(&self, hint: Option<&str>) {
        *self.hint.borrow_mut() = hint.map(str::to_string);
    }

    fn set_trailing_marker(&self, marker: Option<TrailingMarker>) {
        self.marker.set(marker);
    }
}

// =============================================================================
// Text input
// =============================================================================

#[derive(Debug, Default)]
pub struct TextState {
    text: RefCell<String>,
}

/// Single-line free-text input.
pub type TextInput = Headless<TextState>;

impl Headless<TextState> {
    pub fn new() -> Rc<Self> {
        Self::with_state(TextState::default())
    }

    pub fn with_text(text: &str) -> Rc<Self> {
        let input = Self::new();
        *input.state.text.borrow_mut() = text.to_string();
        input
    }

    pub fn text(&self) -> String {
        self.state.text.borrow().clone()
    }

    /// Replace the text and notify value listeners, like a keystroke would.
    pub fn set_text(&self, text: &str) {
        *self.state.text.borrow_mut() = text.to_string();
        self.changes.emit(());
    }
}

// =============================================================================
// Choice
// =============================================================================

#[derive(Debug, Default)]
pub struct ChoiceState {
    options: Vec<String>,
    selected: Cell<Option<usize>>,
}

/// Drop-down style selection.
pub type Choice = Headless<ChoiceState>;

impl Headless<ChoiceState> {
    pub fn new<I, S>(options: I) -> Rc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_state(ChoiceState {
            options: options.into_iter().map(Into::into).collect(),
            selected: Cell::new(None),
        })
    }

    pub fn options(&self) -> &[String] {
        &self.state.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.state.selected.get()
    }

    pub fn selected_option(&self) -> Option<String> {
        self.selected_index()
            .and_then(|index| self.state.options.get(index))
            .cloned()
    }

    /// Select by index; out-of-range indices clear the selection.
    pub fn select(&self, index: Option<usize>) {
        let index = index.filter(|index| *index < self.state.options.len());
        self.state.selected.set(index);
        self.changes.emit(());
    }
}

// =============================================================================
// Tagged
// =============================================================================

#[derive(Debug, Default)]
pub struct TaggedState;

/// A widget no built-in adapter knows; its value comes from the client
/// value channel or a custom adapter.
pub type Tagged = Headless<TaggedState>;

impl Headless<TaggedState> {
    pub fn new() -> Rc<Self> {
        Self::with_state(TaggedState)
    }
}
