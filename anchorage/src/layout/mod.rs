mod chrome;
mod placement;
mod rect;

pub use chrome::Chrome;
pub use placement::{place, resolve_side, room, Align, Placement, PlacementRequest, Side, DEFAULT_INSET};
pub use rect::{Point, Rect, Size};
