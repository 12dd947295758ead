//! In-memory host backend.
//!
//! Headless widgets, an overlay surface that records annotations, and a
//! scheduler driven by hand. They implement the same capability traits a
//! real toolkit binding would, which makes every engine path reachable
//! without a windowing system.
//!
//! ```ignore
//! let surface = HeadlessSurface::new(Rect::new(0, 0, 400, 300));
//! let name = TextInput::new();
//! name.mount(&surface, Rect::new(10, 10, 120, 20));
//!
//! let form = FormCoordinator::new();
//! form.field(&name).required();
//! name.blur();
//! assert_eq!(surface.annotation_count(), 1);
//! ```

mod listeners;
mod scheduler;
mod surface;
mod widget;

pub use listeners::Listeners;
pub use scheduler::ManualScheduler;
pub use surface::HeadlessSurface;
pub use widget::{Choice, ChoiceState, Headless, Tagged, TaggedState, TextInput, TextState};
