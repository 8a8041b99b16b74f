//! Pure popup position calculation.
//!
//! Everything here is a function of its arguments; the windowing queries that
//! produce those arguments live in [`super::surface`].

use simplemenu_types::{PanelEdge, Point, Rect, Size};
use tracing::debug;

/// Where the anchor sits in global coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorGeometry {
    /// Global top-left of the anchor item, used for centering
    pub origin: Point,
    /// Size of the anchor item itself
    pub size: Size,
    /// Rect the popup attaches to the outside of. Equal to the item rect
    /// unless the item lives on a panel-like surface, in which case it is the
    /// whole host window.
    pub bounds: Rect,
}

impl AnchorGeometry {
    /// Anchor whose containment bound is its own rect
    #[must_use]
    pub const fn from_rect(rect: Rect) -> Self {
        Self {
            origin: rect.top_left(),
            size: rect.size(),
            bounds: rect,
        }
    }
}

/// The four attachment positions around an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidates {
    pub top: Point,
    pub bottom: Point,
    pub left: Point,
    pub right: Point,
}

impl Candidates {
    #[must_use]
    pub fn compute(anchor: &AnchorGeometry, popup: Size) -> Self {
        let centered_x = anchor
            .origin
            .x
            .saturating_add(anchor.size.width.saturating_sub(popup.width) / 2);
        let centered_y = anchor
            .origin
            .y
            .saturating_add(anchor.size.height.saturating_sub(popup.height) / 2);

        Self {
            top: Point::new(centered_x, anchor.bounds.top().saturating_sub(popup.height)),
            bottom: Point::new(centered_x, anchor.bounds.bottom()),
            left: Point::new(anchor.bounds.left().saturating_sub(popup.width), centered_y),
            right: Point::new(anchor.bounds.right(), centered_y),
        }
    }

    /// The popup opens away from the panel: a top panel drops it below the
    /// anchor, a left panel puts it to the right, and so on.
    #[must_use]
    pub const fn for_edge(&self, edge: PanelEdge) -> Point {
        match edge {
            PanelEdge::Top => self.bottom,
            PanelEdge::Bottom => self.top,
            PanelEdge::Left => self.right,
            PanelEdge::Right => self.left,
        }
    }
}

/// Compute the popup's top-left corner.
///
/// The attachment candidate opposite `edge` is corrected once per screen
/// boundary of `available`: left, right, top, bottom, in that order. A
/// correction either slides the popup inside the boundary (`offset` pixels
/// away from it) or swaps to the candidate on the other side of the anchor
/// when sliding would push it under the panel. There is no second pass, so a
/// popup larger than `available` can still end up partly outside. All
/// arithmetic saturates, so extreme coordinates never overflow.
#[must_use]
pub fn compute_position(
    anchor: &AnchorGeometry,
    popup: Size,
    edge: PanelEdge,
    offset: i32,
    available: Rect,
) -> Point {
    let candidates = Candidates::compute(anchor, popup);
    let mut pos = candidates.for_edge(edge);

    if pos.x < available.left() {
        if edge == PanelEdge::Left {
            debug!("popup hits left edge, swapping to right side");
            pos.x = candidates.right.x.saturating_add(offset);
        } else {
            debug!("popup hits left edge, sliding right");
            pos.x = available.left().saturating_add(offset);
        }
    }

    if pos.x.saturating_add(popup.width) > available.right() {
        if edge.is_horizontal() {
            debug!("popup hits right edge, sliding left");
            pos.x = available
                .left()
                .max(available.right().saturating_sub(popup.width))
                .saturating_sub(offset);
        } else {
            debug!("popup hits right edge, swapping to left side");
            pos.x = candidates.left.x.saturating_sub(offset);
        }
    }

    if pos.y < available.top() {
        if edge.is_horizontal() {
            debug!("popup hits top edge, swapping below anchor");
            pos.y = candidates.bottom.y.saturating_add(offset);
        } else {
            debug!("popup hits top edge, sliding down");
            pos.y = available.top().saturating_add(offset);
        }
    }

    if pos.y.saturating_add(popup.height) > available.bottom() {
        if edge.is_horizontal() {
            debug!("popup hits bottom edge, swapping above anchor");
            pos.y = candidates.top.y.saturating_sub(offset);
        } else {
            debug!("popup hits bottom edge, sliding up");
            pos.y = available
                .top()
                .max(available.bottom().saturating_sub(popup.height))
                .saturating_sub(offset);
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

    #[test]
    fn test_candidates_surround_anchor() {
        let anchor = AnchorGeometry::from_rect(Rect::new(100, 200, 40, 20));
        let c = Candidates::compute(&anchor, Size::new(200, 100));

        assert_eq!(c.top, Point::new(20, 100));
        assert_eq!(c.bottom, Point::new(20, 220));
        assert_eq!(c.left, Point::new(-100, 160));
        assert_eq!(c.right, Point::new(140, 160));
    }

    #[test]
    fn test_candidates_use_bounds_for_attachment_and_origin_for_centering() {
        let anchor = AnchorGeometry {
            origin: Point::new(10, 1040),
            size: Size::new(40, 40),
            bounds: Rect::new(0, 1030, 1920, 50),
        };
        let c = Candidates::compute(&anchor, Size::new(300, 400));

        assert_eq!(c.top, Point::new(-120, 630));
        assert_eq!(c.right.x, 1920);
        assert_eq!(c.left.x, -300);
    }

    #[test]
    fn test_for_edge_lookup() {
        let c = Candidates {
            top: Point::new(1, 1),
            bottom: Point::new(2, 2),
            left: Point::new(3, 3),
            right: Point::new(4, 4),
        };
        assert_eq!(c.for_edge(PanelEdge::Top), c.bottom);
        assert_eq!(c.for_edge(PanelEdge::Bottom), c.top);
        assert_eq!(c.for_edge(PanelEdge::Left), c.right);
        assert_eq!(c.for_edge(PanelEdge::Right), c.left);
    }

    #[test]
    fn test_no_correction_when_popup_fits() {
        let anchor = AnchorGeometry::from_rect(Rect::new(900, 1040, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Bottom, 5, SCREEN);
        assert_eq!(pos, Point::new(770, 640));
    }

    #[test]
    fn test_right_overflow_on_horizontal_panel_slides_left() {
        let anchor = AnchorGeometry::from_rect(Rect::new(1880, 1040, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Bottom, 4, SCREEN);
        assert_eq!(pos.x, 1920 - 300 - 4);
        assert_eq!(pos.y, 640);
    }

    #[test]
    fn test_right_overflow_on_vertical_panel_swaps_to_left_candidate() {
        let available = Rect::new(0, 0, 500, 1080);
        let anchor = AnchorGeometry::from_rect(Rect::new(400, 500, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 200), PanelEdge::Left, 3, available);
        // right candidate x = 440 overflows 500 -> swap to left candidate
        assert_eq!(pos.x, 400 - 300 - 3);
    }

    #[test]
    fn test_left_overflow_on_left_panel_swaps_to_right_candidate() {
        let available = Rect::new(100, 0, 1820, 1080);
        // Bound sits left of the available area, as when a panel reserves it
        let anchor = AnchorGeometry::from_rect(Rect::new(0, 500, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 200), PanelEdge::Left, 2, available);
        // right candidate x = 40 < 100 -> swap to right candidate + offset
        assert_eq!(pos.x, 42);
    }

    #[test]
    fn test_top_overflow_on_vertical_panel_slides_down() {
        let anchor = AnchorGeometry::from_rect(Rect::new(0, 10, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Left, 6, SCREEN);
        assert_eq!(pos, Point::new(40, 6));
    }

    #[test]
    fn test_top_overflow_on_horizontal_panel_swaps_below() {
        // Bottom panel anchor too close to the top for the popup to go above
        let anchor = AnchorGeometry::from_rect(Rect::new(900, 100, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Bottom, 7, SCREEN);
        assert_eq!(pos.y, 140 + 7);
    }

    #[test]
    fn test_bottom_overflow_on_horizontal_panel_swaps_above() {
        let anchor = AnchorGeometry::from_rect(Rect::new(900, 900, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Top, 8, SCREEN);
        assert_eq!(pos.y, 900 - 400 - 8);
    }

    #[test]
    fn test_bottom_overflow_on_vertical_panel_slides_up() {
        let anchor = AnchorGeometry::from_rect(Rect::new(1880, 1000, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 400), PanelEdge::Right, 9, SCREEN);
        assert_eq!(pos, Point::new(1580, 1080 - 400 - 9));
    }

    #[test]
    fn test_slide_is_bounded_by_available_origin() {
        // Popup taller than the screen on a vertical panel: bounded by top
        let anchor = AnchorGeometry::from_rect(Rect::new(0, 500, 40, 40));
        let pos = compute_position(&anchor, Size::new(300, 2000), PanelEdge::Left, 0, SCREEN);
        assert_eq!(pos.y, 0);
    }

    #[test]
    fn test_extreme_coordinates_saturate() {
        let available = Rect::new(i32::MAX - 100, i32::MAX - 100, 100, 100);
        let anchor = AnchorGeometry::from_rect(Rect::new(i32::MAX - 10, i32::MAX - 10, 50, 50));
        for edge in PanelEdge::ALL {
            let popup = Size::new(i32::MAX, i32::MAX);
            let _ = compute_position(&anchor, popup, edge, i32::MAX, available);
        }

        let anchor = AnchorGeometry::from_rect(Rect::new(i32::MIN, i32::MIN, 10, 10));
        let pos = compute_position(
            &anchor,
            Size::new(300, 400),
            PanelEdge::Bottom,
            -5,
            Rect::new(i32::MIN, i32::MIN, i32::MAX, i32::MAX),
        );
        assert_eq!(pos.x, i32::MIN);
    }

    #[test]
    fn test_oversized_popup_does_not_panic() {
        let tiny = Rect::new(0, 0, 100, 100);
        let anchor = AnchorGeometry::from_rect(Rect::new(40, 80, 20, 20));
        for edge in PanelEdge::ALL {
            let _ = compute_position(&anchor, Size::new(5000, 5000), edge, 10, tiny);
        }
    }
}
