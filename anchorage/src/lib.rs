//! Geometry and overlay placement primitives.
//!
//! `anchorage` knows nothing about widgets or validation. It answers one
//! question: given a target rectangle, an annotation size and a viewport,
//! where does the annotation go? Around that sit the helpers a renderer
//! needs to answer it consistently: text measurement, colors and a discrete
//! fade schedule.

pub mod layout;
pub mod text;
pub mod transitions;
pub mod types;

pub use layout::{
    place, Align, Chrome, Placement, PlacementRequest, Point, Rect, Side, Size, DEFAULT_INSET,
};
pub use text::{CellMetrics, TextMetrics};
pub use transitions::{Easing, FadeSchedule};
pub use types::*;
