//! In-memory windowing scene loaded from JSON.
//!
//! Used by the CLI to run the placer without a panel host, and by tests to
//! move windows between monitors.

use super::surface::{AnchorItem, HostWindow, Screen, ScreenLayout};
use crate::Result;
use serde::{Deserialize, Serialize};
use simplemenu_types::{Point, Rect};
use std::path::Path;
use tracing::debug;

/// Window type as reported by the window manager
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowKind {
    #[default]
    Normal,
    Dock,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneWindow {
    pub id: String,
    pub geometry: Rect,
    #[serde(default)]
    pub kind: WindowKind,
    #[serde(default)]
    pub bypass_window_manager: bool,
}

impl HostWindow for SceneWindow {
    fn map_to_global(&self, scene_point: Point) -> Point {
        scene_point + self.geometry.top_left()
    }

    fn geometry(&self) -> Rect {
        self.geometry
    }

    fn is_panel_like_surface(&self) -> bool {
        self.kind == WindowKind::Dock || self.bypass_window_manager
    }
}

/// Anchor item description: a rect in the scene of window `window`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneAnchor {
    #[serde(default)]
    pub window: Option<String>,
    pub rect: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    #[serde(default)]
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub windows: Vec<SceneWindow>,
    #[serde(default)]
    pub anchor: Option<SceneAnchor>,
}

impl Scene {
    /// Load a scene file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scene: Self = serde_json::from_str(&content)?;
        debug!(
            "Loaded scene from {} ({} screens, {} windows)",
            path.display(),
            scene.screens.len(),
            scene.windows.len()
        );
        Ok(scene)
    }

    #[must_use]
    pub fn window(&self, id: &str) -> Option<&SceneWindow> {
        self.windows.iter().find(|w| w.id == id)
    }

    /// Move a window to a new top-left corner. Returns false if unknown.
    pub fn move_window(&mut self, id: &str, origin: Point) -> bool {
        match self.windows.iter_mut().find(|w| w.id == id) {
            Some(window) => {
                window.geometry = window.geometry.moved_to(origin);
                true
            }
            None => false,
        }
    }

    /// The scene's anchor as an [`AnchorItem`], if one is described
    #[must_use]
    pub fn anchor_item(&self) -> Option<SceneItem<'_>> {
        self.anchor.as_ref().map(|anchor| SceneItem {
            scene: self,
            anchor,
        })
    }
}

impl ScreenLayout for Scene {
    fn screens(&self) -> Vec<Screen> {
        self.screens.clone()
    }
}

/// Borrowed anchor that resolves its window through the scene
#[derive(Debug, Clone, Copy)]
pub struct SceneItem<'a> {
    scene: &'a Scene,
    anchor: &'a SceneAnchor,
}

impl AnchorItem for SceneItem<'_> {
    fn scene_rect(&self) -> Rect {
        self.anchor.rect
    }

    fn window(&self) -> Option<&dyn HostWindow> {
        let id = self.anchor.window.as_deref()?;
        self.scene.window(id).map(|w| w as &dyn HostWindow)
    }
}
