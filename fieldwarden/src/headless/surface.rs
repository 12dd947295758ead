use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use anchorage::{CellMetrics, Rect, TextMetrics};

use super::listeners::Listeners;
use super::scheduler::ManualScheduler;
use crate::surface::{Annotation, AnnotationId, OverlaySurface, Scheduler};
use crate::widget::{ListenerKey, Subscription, WidgetId};

/// Overlay surface that keeps annotations in a map instead of drawing them.
pub struct HeadlessSurface {
    viewport: Cell<Rect>,
    metrics: CellMetrics,
    scheduler: Option<Rc<ManualScheduler>>,
    annotations: RefCell<BTreeMap<AnnotationId, Annotation>>,
    next_id: Cell<u64>,
    added: Cell<usize>,
    resize: Listeners<()>,
}

impl HeadlessSurface {
    /// A surface measuring text in 1x1 cells, without a scheduler.
    pub fn new(viewport: Rect) -> Rc<Self> {
        Self::build(viewport, CellMetrics::default(), None)
    }

    pub fn with_metrics(viewport: Rect, metrics: CellMetrics) -> Rc<Self> {
        Self::build(viewport, metrics, None)
    }

    pub fn with_scheduler(viewport: Rect, scheduler: Rc<ManualScheduler>) -> Rc<Self> {
        Self::build(viewport, CellMetrics::default(), Some(scheduler))
    }

    fn build(viewport: Rect, metrics: CellMetrics, scheduler: Option<Rc<ManualScheduler>>) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(viewport),
            metrics,
            scheduler,
            annotations: RefCell::new(BTreeMap::new()),
            next_id: Cell::new(0),
            added: Cell::new(0),
            resize: Listeners::new(),
        })
    }

    /// Change the viewport and notify resize listeners.
    pub fn resize(&self, viewport: Rect) {
        self.viewport.set(viewport);
        self.resize.emit(());
    }

    /// Live annotations in creation order.
    pub fn annotations(&self) -> Vec<Annotation> {
        self.annotations.borrow().values().cloned().collect()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.borrow().len()
    }

    /// The live annotation attached to `target`, if any.
    pub fn annotation_for(&self, target: WidgetId) -> Option<Annotation> {
        self.annotations
            .borrow()
            .values()
            .find(|annotation| annotation.target == target)
            .cloned()
    }

    pub fn annotation(&self, id: AnnotationId) -> Option<Annotation> {
        self.annotations.borrow().get(&id).cloned()
    }

    /// Total number of `add` calls over the surface's lifetime.
    pub fn added_count(&self) -> usize {
        self.added.get()
    }

    pub fn resize_listener_count(&self) -> usize {
        self.resize.len()
    }
}

impl OverlaySurface for HeadlessSurface {
    fn viewport(&self) -> Rect {
        self.viewport.get()
    }

    fn metrics(&self) -> &dyn TextMetrics {
        &self.metrics
    }

    fn add(&self, annotation: Annotation) -> AnnotationId {
        let id = AnnotationId::new(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);
        self.added.set(self.added.get() + 1);
        self.annotations.borrow_mut().insert(id, annotation);
        id
    }

    fn update(&self, id: AnnotationId, annotation: Annotation) {
        if let Some(slot) = self.annotations.borrow_mut().get_mut(&id) {
            *slot = annotation;
        }
    }

    fn remove(&self, id: AnnotationId) {
        self.annotations.borrow_mut().remove(&id);
    }

    fn scheduler(&self) -> Option<Rc<dyn Scheduler>> {
        self.scheduler
            .as_ref()
            .map(|scheduler| Rc::clone(scheduler) as Rc<dyn Scheduler>)
    }

    fn on_resize(&self, key: ListenerKey, listener: Rc<dyn Fn()>) -> Option<Subscription> {
        Some(self.resize.insert(key, Rc::new(move |()| listener())))
    }
}
