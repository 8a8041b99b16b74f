//! Windowing seam: what the placer needs to know about the anchor item, its
//! host window and the monitors.

use super::position::AnchorGeometry;
use serde::{Deserialize, Serialize};
use simplemenu_types::{Point, Rect};
use tracing::{debug, warn};

/// Top-level window hosting an anchor item
pub trait HostWindow {
    /// Map a point in the window's scene coordinates to global coordinates
    fn map_to_global(&self, scene_point: Point) -> Point;

    /// Window frame in global coordinates
    fn geometry(&self) -> Rect;

    /// Dock-type windows and windows bypassing the window manager. Popups
    /// anchored in these are placed outside the whole window instead of
    /// next to the item.
    fn is_panel_like_surface(&self) -> bool;
}

/// The UI element a popup is anchored to
pub trait AnchorItem {
    /// Bounding rect mapped to scene coordinates
    fn scene_rect(&self) -> Rect;

    /// Host window, `None` while the item is not on screen
    fn window(&self) -> Option<&dyn HostWindow>;
}

/// Live view of the connected monitors
pub trait ScreenLayout {
    fn screens(&self) -> Vec<Screen>;
}

/// A monitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub name: String,
    pub geometry: Rect,
    /// Geometry minus space reserved by panels
    pub available_geometry: Rect,
}

/// Resolve the anchor's global geometry, or `None` when it has no window.
pub fn anchor_geometry(item: &dyn AnchorItem) -> Option<AnchorGeometry> {
    let window = item.window()?;
    let scene = item.scene_rect();
    let origin = window.map_to_global(scene.top_left());

    let bounds = if window.is_panel_like_surface() {
        window.geometry()
    } else {
        scene.moved_to(origin)
    };

    Some(AnchorGeometry {
        origin,
        size: scene.size(),
        bounds,
    })
}

/// Pick the monitor currently showing `window`.
///
/// Prefers the monitor with the largest overlap, then the one nearest to the
/// window center. Ties keep the earlier monitor.
pub fn host_screen(screens: &[Screen], window: Rect) -> Option<&Screen> {
    let best_overlap = screens
        .iter()
        .map(|s| (s, s.geometry.intersection_area(&window)))
        .filter(|(_, area)| *area > 0)
        .fold(None::<(&Screen, i64)>, |best, (s, area)| match best {
            Some((_, best_area)) if best_area >= area => best,
            _ => Some((s, area)),
        });

    if let Some((screen, _)) = best_overlap {
        return Some(screen);
    }

    let center = window.center();
    screens
        .iter()
        .min_by_key(|s| s.geometry.distance_sq_to(center))
}

/// Available geometry of the monitor hosting `window`, resolved from the
/// live layout on every call.
pub fn available_geometry(layout: &dyn ScreenLayout, window: &dyn HostWindow) -> Rect {
    let frame = window.geometry();
    let screens = layout.screens();

    if let Some(screen) = host_screen(&screens, frame) {
        debug!(
            "window {} is on screen '{}' (available {})",
            frame, screen.name, screen.available_geometry
        );
        screen.available_geometry
    } else {
        warn!("No screens reported, using window geometry {frame} as available area");
        frame
    }
}
