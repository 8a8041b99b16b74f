//! Popup placement for the menu window.
//!
//! [`PopupPlacer`] holds the two settings that survive between calls (panel
//! edge and offset). Geometry is queried fresh on every call through the
//! [`surface`] traits and handed to the pure [`compute_position`].

mod position;
mod scene;
mod surface;

pub use position::{AnchorGeometry, Candidates, compute_position};
pub use scene::{Scene, SceneAnchor, SceneItem, SceneWindow, WindowKind};
pub use surface::{
    AnchorItem, HostWindow, Screen, ScreenLayout, anchor_geometry, available_geometry, host_screen,
};

use crate::config::PopupConfig;
use simplemenu_types::{PanelEdge, Point, Size};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error};

/// Change notifications for placer settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacerEvent {
    OffsetChanged(i32),
    PanelEdgeChanged(PanelEdge),
}

/// Computes where the menu popup opens
pub struct PopupPlacer {
    offset: i32,
    panel_edge: PanelEdge,
    event_tx: UnboundedSender<PlacerEvent>,
}

impl PopupPlacer {
    /// Create a placer with default settings and a receiver for its change
    /// notifications.
    #[must_use]
    pub fn new() -> (Self, UnboundedReceiver<PlacerEvent>) {
        Self::from_config(&PopupConfig::default())
    }

    #[must_use]
    pub fn from_config(config: &PopupConfig) -> (Self, UnboundedReceiver<PlacerEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Self {
                offset: config.offset,
                panel_edge: config.panel_edge,
                event_tx,
            },
            event_rx,
        )
    }

    #[must_use]
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn set_offset(&mut self, offset: i32) {
        if self.offset != offset {
            self.offset = offset;
            self.notify(PlacerEvent::OffsetChanged(offset));
        }
    }

    #[must_use]
    pub fn panel_edge(&self) -> PanelEdge {
        self.panel_edge
    }

    pub fn set_panel_edge(&mut self, edge: PanelEdge) {
        if self.panel_edge != edge {
            self.panel_edge = edge;
            self.notify(PlacerEvent::PanelEdgeChanged(edge));
        }
    }

    /// Apply a (re)loaded config, notifying only for values that changed
    pub fn apply_config(&mut self, config: &PopupConfig) {
        self.set_offset(config.offset);
        self.set_panel_edge(config.panel_edge);
    }

    /// Top-left corner for a popup of `size` anchored at `item`.
    ///
    /// Returns `None` when the item has no host window and the popup should
    /// not be shown. The host monitor is looked up in `layout` on every call,
    /// since windows can move between monitors after creation.
    pub fn popup_position(
        &self,
        item: &dyn AnchorItem,
        size: Size,
        layout: &dyn ScreenLayout,
    ) -> Option<Point> {
        let Some(window) = item.window() else {
            debug!("anchor has no window, not placing popup");
            return None;
        };
        let anchor = anchor_geometry(item)?;
        let available = available_geometry(layout, window);

        let pos = compute_position(&anchor, size, self.panel_edge, self.offset, available);
        debug!(
            "popup {} for anchor {} on {} panel -> {}",
            size, anchor.bounds, self.panel_edge, pos
        );
        Some(pos)
    }

    fn notify(&self, event: PlacerEvent) {
        if let Err(e) = self.event_tx.send(event) {
            error!("Failed to send placer event: {}", e);
        }
    }
}
