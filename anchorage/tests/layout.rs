use anchorage::{
    place, Align, CellMetrics, Chrome, Color, Edges, PlacementRequest, Rect, Rgb, Side, Size,
};
use anchorage::layout::{resolve_side, room};

const VIEWPORT: Rect = Rect::new(0, 0, 400, 300);

// =============================================================================
// Rect
// =============================================================================

#[test]
fn test_rect_edges() {
    let r = Rect::new(10, 20, 30, 40);
    assert_eq!(r.left(), 10);
    assert_eq!(r.right(), 40);
    assert_eq!(r.top(), 20);
    assert_eq!(r.bottom(), 60);
}

#[test]
fn test_rect_inset_never_negative() {
    let r = Rect::new(0, 0, 3, 10).inset(2);
    assert_eq!(r, Rect::new(2, 2, 0, 6));
}

#[test]
fn test_rect_contains_rect() {
    let outer = Rect::new(0, 0, 100, 100);
    assert!(outer.contains_rect(&Rect::new(10, 10, 20, 20)));
    assert!(outer.contains_rect(&outer));
    assert!(!outer.contains_rect(&Rect::new(90, 90, 20, 20)));
}

#[test]
fn test_rect_intersects() {
    let a = Rect::new(0, 0, 10, 10);
    assert!(a.intersects(&Rect::new(5, 5, 10, 10)));
    assert!(!a.intersects(&Rect::new(10, 0, 10, 10)));
}

// =============================================================================
// Placement: preferred side
// =============================================================================

#[test]
fn test_place_below_centered() {
    let target = Rect::new(100, 50, 80, 20);
    let placement = place(&PlacementRequest::new(target, Size::new(40, 16), VIEWPORT));

    assert_eq!(placement.side, Side::After);
    assert_eq!(placement.rect, Rect::new(120, 70, 40, 16));
}

#[test]
fn test_place_above_with_overlap() {
    let target = Rect::new(100, 100, 80, 20);
    let request = PlacementRequest::new(target, Size::new(40, 16), VIEWPORT)
        .side(Side::Before)
        .gap(-2);
    let placement = place(&request);

    assert_eq!(placement.side, Side::Before);
    assert_eq!(placement.rect.y, 100 - 16 + 2);
}

#[test]
fn test_place_end_centers_vertically() {
    let target = Rect::new(100, 100, 80, 20);
    let request = PlacementRequest::new(target, Size::new(40, 10), VIEWPORT).side(Side::End);
    let placement = place(&request);

    assert_eq!(placement.side, Side::End);
    assert_eq!(placement.rect, Rect::new(180, 105, 40, 10));
}

#[test]
fn test_place_start_align_left_edge() {
    let target = Rect::new(100, 100, 80, 20);
    let request = PlacementRequest::new(target, Size::new(200, 10), VIEWPORT)
        .align(Align::Start)
        .gap(2);
    let placement = place(&request);

    assert_eq!(placement.rect.x, 100);
    assert_eq!(placement.rect.y, 122);
}

#[test]
fn test_place_stretch_matches_target_width() {
    let target = Rect::new(100, 100, 80, 20);
    let request = PlacementRequest::new(target, Size::new(10, 12), VIEWPORT).align(Align::Stretch);
    let placement = place(&request);

    assert_eq!(placement.rect, Rect::new(100, 120, 80, 12));
}

// =============================================================================
// Placement: auto-flip
// =============================================================================

#[test]
fn test_flip_below_to_above_near_bottom_edge() {
    let target = Rect::new(100, 270, 80, 20);
    let request = PlacementRequest::new(target, Size::new(60, 30), VIEWPORT);
    let placement = place(&request);

    assert_eq!(placement.side, Side::Before);
    assert!(VIEWPORT.contains_rect(&placement.rect));
    assert_eq!(placement.rect.bottom(), 270);
}

#[test]
fn test_flip_above_to_below_near_top_edge() {
    let target = Rect::new(100, 5, 80, 20);
    let request = PlacementRequest::new(target, Size::new(60, 30), VIEWPORT).side(Side::Before);

    assert_eq!(resolve_side(&request), Side::After);
}

#[test]
fn test_flip_is_per_axis() {
    let target = Rect::new(370, 100, 20, 20);
    let request = PlacementRequest::new(target, Size::new(60, 10), VIEWPORT).side(Side::End);

    // Horizontal side flips horizontally, never to a vertical side
    assert_eq!(resolve_side(&request), Side::Start);
}

#[test]
fn test_no_flip_when_opposite_is_tighter() {
    let viewport = Rect::new(0, 0, 100, 50);
    let target = Rect::new(10, 10, 20, 20);
    // Below: 48 - 30 = 18, above: 10 - 2 = 8. Neither fits 25.
    let request = PlacementRequest::new(target, Size::new(20, 25), viewport);

    assert_eq!(room(&request, Side::After), 18);
    assert_eq!(room(&request, Side::Before), 8);
    assert_eq!(resolve_side(&request), Side::After);
    assert!(viewport.inset(2).contains_rect(&place(&request).rect));
}

#[test]
fn test_flip_disabled_keeps_preferred_side() {
    let target = Rect::new(100, 270, 80, 20);
    let request = PlacementRequest::new(target, Size::new(60, 30), VIEWPORT).flip(false);

    assert_eq!(place(&request).side, Side::After);
}

// =============================================================================
// Placement: clamping
// =============================================================================

#[test]
fn test_clamp_keeps_minimum_inset() {
    let target = Rect::new(0, 100, 10, 10);
    let placement = place(&PlacementRequest::new(target, Size::new(60, 10), VIEWPORT));

    assert_eq!(placement.rect.x, 2);
}

#[test]
fn test_clamp_right_edge() {
    let target = Rect::new(390, 100, 10, 10);
    let placement = place(&PlacementRequest::new(target, Size::new(60, 10), VIEWPORT));

    assert_eq!(placement.rect.right(), 398);
}

#[test]
fn test_oversized_annotation_shrinks_to_viewport() {
    let target = Rect::new(100, 100, 10, 10);
    let placement = place(&PlacementRequest::new(target, Size::new(1000, 10), VIEWPORT));

    assert_eq!(placement.rect.width, 396);
    assert!(VIEWPORT.contains_rect(&placement.rect));
}

#[test]
fn test_target_outside_viewport_still_clamped() {
    let target = Rect::new(100, -80, 40, 20);
    let placement = place(&PlacementRequest::new(target, Size::new(40, 10), VIEWPORT));

    assert!(VIEWPORT.contains_rect(&placement.rect));
}

// =============================================================================
// Chrome measurement
// =============================================================================

#[test]
fn test_chrome_adds_arrow_on_perpendicular_axis() {
    let metrics = CellMetrics::new(7, 16);
    let chrome = Chrome::new(Edges::symmetric(6, 12)).arrow(8).shadow(4);
    let lines = vec!["Required".to_string()];

    let below = chrome.measure(&metrics, &lines, Side::After);
    assert_eq!(below, Size::new(56 + 24 + 8, 16 + 12 + 8 + 8));

    let beside = chrome.measure(&metrics, &lines, Side::End);
    assert_eq!(beside, Size::new(56 + 24 + 8 + 8, 16 + 12 + 8));
}

#[test]
fn test_chrome_multiline_uses_widest_line() {
    let metrics = CellMetrics::default();
    let chrome = Chrome::new(Edges::all(1));
    let lines = vec!["ab".to_string(), "abcd".to_string()];

    assert_eq!(chrome.measure(&metrics, &lines, Side::After), Size::new(6, 4));
}

// =============================================================================
// Color
// =============================================================================

#[test]
fn test_color_hex() {
    assert_eq!(Color::hex(0x8B1A1A).to_rgb(), Rgb::new(0x8B, 0x1A, 0x1A));
}

#[test]
fn test_color_darken_reduces_lightness() {
    let base = Color::hex(0xD9534F);
    let darker = base.darken(0.15).to_rgb();
    let original = base.to_rgb();

    assert!(darker.r < original.r);
    assert!(darker.g <= original.g);
}

#[test]
fn test_color_with_alpha() {
    let c = Color::WHITE.with_alpha(0.5);
    assert_eq!(c.alpha(), 0.5);
    assert_eq!(Color::WHITE.alpha(), 1.0);
}
