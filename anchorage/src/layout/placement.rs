//! Placement of a floating annotation next to a target rectangle.
//!
//! The solver is a pure function: same request in, same placement out. It
//! never looks at widgets, surfaces or text; callers measure the annotation
//! first (see [`Chrome`](super::Chrome)) and hand over plain numbers.
//!
//! ```
//! use anchorage::{place, PlacementRequest, Rect, Side, Size};
//!
//! let viewport = Rect::new(0, 0, 200, 100);
//! let target = Rect::new(50, 85, 40, 10);
//!
//! // Not enough room below, so the annotation flips above the target.
//! let placement = place(&PlacementRequest::new(target, Size::new(60, 20), viewport));
//! assert_eq!(placement.side, Side::Before);
//! assert!(viewport.contains_rect(&placement.rect));
//! ```

use super::{Rect, Size};

/// Minimum distance kept between an annotation and any viewport edge.
pub const DEFAULT_INSET: i32 = 2;

/// Which side of the target an annotation sits on.
///
/// `Before` and `After` are on the vertical axis (above and below),
/// `Start` and `End` on the horizontal axis (left and right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Before,
    #[default]
    After,
    Start,
    End,
}

impl Side {
    /// The side on the same axis, facing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Side::Before => Side::After,
            Side::After => Side::Before,
            Side::Start => Side::End,
            Side::End => Side::Start,
        }
    }

    /// True for `Before`/`After`.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Side::Before | Side::After)
    }
}

/// Alignment along the axis parallel to the target edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Align {
    /// Centered on the target's midpoint.
    #[default]
    Center,
    /// Flush with the target's leading edge.
    Start,
    /// Same extent as the target along the parallel axis.
    Stretch,
}

/// Everything the solver needs to place one annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    /// Target rectangle in viewport coordinates.
    pub target: Rect,
    /// Measured annotation size, decorations included.
    pub size: Size,
    /// Preferred side.
    pub side: Side,
    pub align: Align,
    /// Distance between the target edge and the annotation.
    /// Negative values tuck the annotation under the target edge.
    pub gap: i32,
    /// Minimum distance from every viewport edge.
    pub inset: i32,
    /// Visible bounds of the overlay surface.
    pub viewport: Rect,
    /// Whether the solver may switch to the opposite side.
    pub flip: bool,
}

impl PlacementRequest {
    pub fn new(target: Rect, size: Size, viewport: Rect) -> Self {
        Self {
            target,
            size,
            side: Side::default(),
            align: Align::default(),
            gap: 0,
            inset: DEFAULT_INSET,
            viewport,
            flip: true,
        }
    }

    pub fn side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn gap(mut self, gap: i32) -> Self {
        self.gap = gap;
        self
    }

    pub fn inset(mut self, inset: i32) -> Self {
        self.inset = inset.max(0);
        self
    }

    pub fn flip(mut self, enabled: bool) -> Self {
        self.flip = enabled;
        self
    }

    /// Extent the annotation needs on the axis perpendicular to `side`.
    fn needed(&self, side: Side) -> i32 {
        let extent = if side.is_vertical() {
            self.size.height
        } else {
            self.size.width
        };
        extent + self.gap
    }
}

/// Resolved position of an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Side after auto-flip. Renderers orient arrows from this.
    pub side: Side,
    /// Final rectangle, always inside the inset viewport.
    pub rect: Rect,
}

/// Free space between the target and the inset viewport edge on `side`.
pub fn room(request: &PlacementRequest, side: Side) -> i32 {
    let bounds = request.viewport.inset(request.inset);
    let target = request.target;
    match side {
        Side::Before => target.top() - bounds.top(),
        Side::After => bounds.bottom() - target.bottom(),
        Side::Start => target.left() - bounds.left(),
        Side::End => bounds.right() - target.right(),
    }
}

/// Pick the side the annotation ends up on.
///
/// The preferred side wins whenever the annotation fits there. Otherwise the
/// opposite side on the same axis is taken, unless it is even tighter.
pub fn resolve_side(request: &PlacementRequest) -> Side {
    let preferred = request.side;
    if !request.flip {
        return preferred;
    }

    let available = room(request, preferred);
    if available >= request.needed(preferred) {
        return preferred;
    }

    let opposite = preferred.opposite();
    if room(request, opposite) >= available {
        log::trace!(
            "placement: flipping {:?} -> {:?} (room {} < needed {})",
            preferred,
            opposite,
            available,
            request.needed(preferred)
        );
        opposite
    } else {
        preferred
    }
}

/// Compute the final annotation rectangle.
pub fn place(request: &PlacementRequest) -> Placement {
    let side = resolve_side(request);
    let bounds = request.viewport.inset(request.inset);
    let target = request.target;

    let mut width = request.size.width.max(0);
    let mut height = request.size.height.max(0);
    if request.align == Align::Stretch {
        if side.is_vertical() {
            width = target.width.max(0);
        } else {
            height = target.height.max(0);
        }
    }
    // An annotation bigger than the viewport is cut down to it.
    width = width.min(bounds.width);
    height = height.min(bounds.height);

    let along_x = match request.align {
        Align::Center => target.x + (target.width - width) / 2,
        Align::Start | Align::Stretch => target.x,
    };
    let along_y = match request.align {
        Align::Center => target.y + (target.height - height) / 2,
        Align::Start | Align::Stretch => target.y,
    };

    let (x, y) = match side {
        Side::Before => (along_x, target.top() - height - request.gap),
        Side::After => (along_x, target.bottom() + request.gap),
        Side::Start => (target.left() - width - request.gap, along_y),
        Side::End => (target.right() + request.gap, along_y),
    };

    let x = clamp_axis(x, width, bounds.left(), bounds.right());
    let y = clamp_axis(y, height, bounds.top(), bounds.bottom());

    Placement {
        side,
        rect: Rect::new(x, y, width, height),
    }
}

fn clamp_axis(pos: i32, extent: i32, low: i32, high: i32) -> i32 {
    let max = (high - extent).max(low);
    pos.clamp(low, max)
}
