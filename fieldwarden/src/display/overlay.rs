//! Floating annotations that follow their target widget.
//!
//! [`OverlayDisplay`] owns the lifecycle shared by every overlay style:
//!
//! - a target that is not showing yet gets a pending entry and a one-shot
//!   visibility listener; the annotation is created when the target shows;
//! - a live annotation is re-placed whenever the target moves, resizes,
//!   shows or hides, and whenever the surface viewport resizes;
//! - an optional fade-in runs on the surface scheduler;
//! - `hide_error` and `dispose` remove the annotation and drop every
//!   listener and timer, including a fade that is still running.
//!
//! What the annotation looks like and where it sits relative to the target
//! is decided by an [`AnnotationRenderer`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use anchorage::text::layout_lines;
use anchorage::{place, Align, FadeSchedule, Placement, PlacementRequest, Rect, Side, TextMetrics};

use super::ErrorDisplay;
use crate::surface::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStyle, OverlaySurface, Scheduler,
    TimerControl, TimerHandle,
};
use crate::widget::{
    ListenerKey, Outline, OwnerId, Purpose, Subscription, Widget, WidgetEvent, WidgetId, WidgetRef,
};

/// Look and placement policy of one overlay style.
pub trait AnnotationRenderer: 'static {
    fn kind(&self) -> AnnotationKind;

    fn style(&self) -> AnnotationStyle;

    /// Preferred side of the target.
    fn side(&self) -> Side;

    fn align(&self) -> Align {
        Align::Center
    }

    fn gap(&self) -> i32 {
        0
    }

    /// Whether the annotation may move to the opposite side when the
    /// preferred one has no room.
    fn flip(&self) -> bool {
        true
    }

    /// Wrap width for the message, in metric units.
    fn max_text_width(&self, _target: Rect) -> Option<i32> {
        None
    }

    fn fade(&self) -> Option<FadeSchedule> {
        None
    }

    /// Outline applied to the target while the annotation exists.
    fn outline(&self) -> Option<Outline> {
        None
    }

    /// Wrap `message` and place it next to `target`.
    fn layout(
        &self,
        metrics: &dyn TextMetrics,
        message: &str,
        target: Rect,
        viewport: Rect,
    ) -> (Vec<String>, Placement) {
        let lines = layout_lines(metrics, message, self.max_text_width(target));
        let size = self.style().chrome.measure(metrics, &lines, self.side());
        let request = PlacementRequest::new(target, size, viewport)
            .side(self.side())
            .align(self.align())
            .gap(self.gap())
            .flip(self.flip());
        (lines, place(&request))
    }
}

struct Active {
    target: Weak<dyn Widget>,
    message: String,
    surface: Rc<dyn OverlaySurface>,
    id: AnnotationId,
    annotation: Annotation,
    _listeners: Vec<Subscription>,
    _fade: Option<TimerHandle>,
}

enum Entry {
    /// Waiting for the target to show.
    Pending {
        target: Weak<dyn Widget>,
        message: String,
        reveal: Option<Subscription>,
    },
    Active(Active),
}

impl Entry {
    fn target(&self) -> &Weak<dyn Widget> {
        match self {
            Entry::Pending { target, .. } => target,
            Entry::Active(active) => &active.target,
        }
    }
}

struct Tracker<R: AnnotationRenderer> {
    owner: OwnerId,
    renderer: R,
    entries: RefCell<HashMap<WidgetId, Entry>>,
    this: Weak<Tracker<R>>,
}

/// Error display drawing one floating annotation per invalid widget.
pub struct OverlayDisplay<R: AnnotationRenderer> {
    tracker: Rc<Tracker<R>>,
}

impl<R: AnnotationRenderer> OverlayDisplay<R> {
    pub fn new(renderer: impl Into<R>) -> Self {
        let renderer = renderer.into();
        Self {
            tracker: Rc::new_cyclic(|this| Tracker {
                owner: OwnerId::new(),
                renderer,
                entries: RefCell::new(HashMap::new()),
                this: this.clone(),
            }),
        }
    }

    pub fn renderer(&self) -> &R {
        &self.tracker.renderer
    }

    /// True while the annotation for `target` waits for the target to show.
    pub fn is_pending(&self, target: WidgetId) -> bool {
        matches!(
            self.tracker.entries.borrow().get(&target),
            Some(Entry::Pending { .. })
        )
    }

    /// Surface handle of the live annotation for `target`.
    pub fn annotation_id(&self, target: WidgetId) -> Option<AnnotationId> {
        match self.tracker.entries.borrow().get(&target) {
            Some(Entry::Active(active)) => Some(active.id),
            _ => None,
        }
    }

    /// Number of targets with a pending or live annotation.
    pub fn tracked_count(&self) -> usize {
        self.tracker.entries.borrow().len()
    }
}

impl<R: AnnotationRenderer> ErrorDisplay for OverlayDisplay<R> {
    fn show_error(&self, target: &WidgetRef, message: &str) {
        self.tracker.show(target, message);
    }

    fn hide_error(&self, target: WidgetId) {
        self.tracker.hide(target);
    }

    fn is_showing(&self, target: WidgetId) -> bool {
        self.tracker.entries.borrow().contains_key(&target)
    }

    fn dispose(&self) {
        self.tracker.dispose();
    }
}

impl<R: AnnotationRenderer> Drop for OverlayDisplay<R> {
    fn drop(&mut self) {
        self.tracker.dispose();
    }
}

enum Existing {
    Active,
    Pending,
    Missing,
}

impl<R: AnnotationRenderer> Tracker<R> {
    fn show(&self, target: &WidgetRef, message: &str) {
        let id = target.id();
        let existing = {
            let mut entries = self.entries.borrow_mut();
            match entries.get_mut(&id) {
                Some(Entry::Active(active)) => {
                    active.message = message.to_string();
                    Existing::Active
                }
                Some(Entry::Pending { message: pending, .. }) => {
                    *pending = message.to_string();
                    Existing::Pending
                }
                None => Existing::Missing,
            }
        };

        match existing {
            Existing::Active => self.refresh(id),
            Existing::Pending => {
                if target.is_showing() {
                    self.reveal(id);
                }
            }
            Existing::Missing => {
                if target.is_showing() {
                    self.create(target, message);
                } else {
                    self.defer(target, message);
                }
            }
        }
    }

    fn defer(&self, target: &WidgetRef, message: &str) {
        let id = target.id();
        let this = self.this.clone();
        let reveal = target.listen(
            ListenerKey::new(self.owner, Purpose::Reveal),
            Rc::new(move |event| {
                if event != WidgetEvent::Shown {
                    return;
                }
                if let Some(tracker) = this.upgrade() {
                    tracker.reveal(id);
                }
            }),
        );
        log::debug!("overlay: {} is not showing, annotation deferred", id);

        let previous = self.entries.borrow_mut().insert(
            id,
            Entry::Pending {
                target: Rc::downgrade(target),
                message: message.to_string(),
                reveal,
            },
        );
        if let Some(previous) = previous {
            self.teardown(previous);
        }
        self.decorate(target);
    }

    fn reveal(&self, id: WidgetId) {
        let pending = {
            let mut entries = self.entries.borrow_mut();
            match entries.get(&id) {
                Some(Entry::Pending { .. }) => entries.remove(&id),
                _ => None,
            }
        };
        let Some(Entry::Pending {
            target,
            message,
            reveal,
        }) = pending
        else {
            return;
        };
        drop(reveal);

        let Some(target) = target.upgrade() else {
            return;
        };
        if target.is_showing() {
            self.create(&target, &message);
        } else {
            self.defer(&target, &message);
        }
    }

    fn create(&self, target: &WidgetRef, message: &str) {
        let id = target.id();
        let Some(surface) = target.overlay_surface() else {
            log::debug!("overlay: {} has no overlay surface, error not drawn", id);
            return;
        };
        let Some(bounds) = target.bounds() else {
            log::debug!("overlay: {} has no bounds, error not drawn", id);
            return;
        };

        let (lines, placement) =
            self.renderer
                .layout(surface.metrics(), message, bounds, surface.viewport());
        let fade = self
            .renderer
            .fade()
            .and_then(|schedule| Some((schedule, surface.scheduler()?)));

        let annotation = Annotation {
            kind: self.renderer.kind(),
            target: id,
            lines,
            bounds: placement.rect,
            side: placement.side,
            visible: true,
            opacity: if fade.is_some() { 0.0 } else { 1.0 },
            style: self.renderer.style(),
        };
        let annotation_id = surface.add(annotation.clone());

        let mut listeners = Vec::new();
        let this = self.this.clone();
        let on_event: Rc<dyn Fn(WidgetEvent)> = Rc::new(move |event| {
            if event == WidgetEvent::FocusLost {
                return;
            }
            if let Some(tracker) = this.upgrade() {
                tracker.refresh(id);
            }
        });
        listeners.extend(target.listen(ListenerKey::new(self.owner, Purpose::Track), on_event));

        let this = self.this.clone();
        let on_resize: Rc<dyn Fn()> = Rc::new(move || {
            if let Some(tracker) = this.upgrade() {
                tracker.refresh(id);
            }
        });
        listeners.extend(surface.on_resize(ListenerKey::new(self.owner, Purpose::Viewport(id)), on_resize));

        let fade = fade.map(|(schedule, scheduler)| self.start_fade(id, schedule, &*scheduler));

        let previous = self.entries.borrow_mut().insert(
            id,
            Entry::Active(Active {
                target: Rc::downgrade(target),
                message: message.to_string(),
                surface,
                id: annotation_id,
                annotation,
                _listeners: listeners,
                _fade: fade,
            }),
        );
        if let Some(previous) = previous {
            self.teardown(previous);
        }
        self.decorate(target);
    }

    /// Re-wrap and re-place a live annotation against current geometry.
    fn refresh(&self, id: WidgetId) {
        let snapshot = match self.entries.borrow().get(&id) {
            Some(Entry::Active(active)) => Some((
                active.target.clone(),
                Rc::clone(&active.surface),
                active.message.clone(),
                active.annotation.clone(),
                active.id,
            )),
            _ => None,
        };
        let Some((target, surface, message, mut annotation, annotation_id)) = snapshot else {
            return;
        };
        let Some(target) = target.upgrade() else {
            self.hide(id);
            return;
        };

        match target.bounds() {
            Some(bounds) if target.is_showing() => {
                let (lines, placement) =
                    self.renderer
                        .layout(surface.metrics(), &message, bounds, surface.viewport());
                annotation.lines = lines;
                annotation.bounds = placement.rect;
                annotation.side = placement.side;
                annotation.visible = true;
            }
            _ => annotation.visible = false,
        }

        if let Some(Entry::Active(active)) = self.entries.borrow_mut().get_mut(&id) {
            annotation.opacity = active.annotation.opacity;
            active.annotation = annotation.clone();
        }
        surface.update(annotation_id, annotation);
    }

    fn start_fade(&self, id: WidgetId, schedule: FadeSchedule, scheduler: &dyn Scheduler) -> TimerHandle {
        let this = self.this.clone();
        let mut step = 0;
        scheduler.repeat(
            schedule.interval(),
            Box::new(move || {
                let Some(tracker) = this.upgrade() else {
                    return TimerControl::Stop;
                };
                step += 1;
                if !tracker.set_opacity(id, schedule.opacity_at(step)) || schedule.is_complete(step) {
                    TimerControl::Stop
                } else {
                    TimerControl::Continue
                }
            }),
        )
    }

    /// Returns false once the annotation is gone.
    fn set_opacity(&self, id: WidgetId, opacity: f32) -> bool {
        let update = match self.entries.borrow_mut().get_mut(&id) {
            Some(Entry::Active(active)) => {
                active.annotation.opacity = opacity;
                Some((Rc::clone(&active.surface), active.id, active.annotation.clone()))
            }
            _ => None,
        };
        match update {
            Some((surface, annotation_id, annotation)) => {
                surface.update(annotation_id, annotation);
                true
            }
            None => false,
        }
    }

    fn hide(&self, id: WidgetId) {
        let removed = self.entries.borrow_mut().remove(&id);
        if let Some(entry) = removed {
            self.teardown(entry);
        }
    }

    fn dispose(&self) {
        let entries: Vec<Entry> = self
            .entries
            .borrow_mut()
            .drain()
            .map(|(_, entry)| entry)
            .collect();
        if !entries.is_empty() {
            log::debug!("overlay: disposing {} annotations", entries.len());
        }
        for entry in entries {
            self.teardown(entry);
        }
    }

    fn decorate(&self, target: &WidgetRef) {
        if let Some(outline) = self.renderer.outline() {
            target.set_outline(Some(outline));
        }
    }

    fn teardown(&self, entry: Entry) {
        let target = entry.target().upgrade();
        if let Entry::Active(active) = entry {
            active.surface.remove(active.id);
        }
        if let (Some(target), Some(_)) = (target, self.renderer.outline()) {
            target.set_outline(None);
        }
    }
}
