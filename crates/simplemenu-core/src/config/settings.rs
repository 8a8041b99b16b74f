use crate::Result;
use serde::{Deserialize, Serialize};
use simplemenu_types::PanelEdge;
use std::path::Path;
use tracing::{info, warn};

/// Apps per page in paginated groups
pub const DEFAULT_PAGE_SIZE: usize = 24;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub popup: PopupConfig,

    #[serde(default)]
    pub menu: MenuConfig,
}

impl Config {
    /// Load config from file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let mut config: Self = serde_json::from_str(&content)?;
        config.sanitize();

        info!(
            "Loaded config from {} (panel edge {}, offset {})",
            path.display(),
            config.popup.panel_edge,
            config.popup.offset
        );
        Ok(config)
    }

    /// Save config to file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace values that parse but cannot be used
    fn sanitize(&mut self) {
        if self.menu.page_size == 0 {
            warn!("menu.pageSize must be at least 1, using {DEFAULT_PAGE_SIZE}");
            self.menu.page_size = DEFAULT_PAGE_SIZE;
        }
    }
}

/// Popup placement settings, changed when the panel is reconfigured
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupConfig {
    /// Distance kept from a screen edge the popup was pushed against
    #[serde(default)]
    pub offset: i32,

    #[serde(default)]
    pub panel_edge: PanelEdge,
}

/// Root menu settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuConfig {
    /// Show the aggregated "All Applications" group
    #[serde(default = "default_true")]
    pub show_all_subtree: bool,

    #[serde(default)]
    pub show_separators: bool,

    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Favorite app storage ids, in display order
    #[serde(default)]
    pub favorites: Vec<String>,

    /// System action ids shown as favorites, in display order
    #[serde(default = "default_system_favorites")]
    pub system_favorites: Vec<String>,
}

fn default_true() -> bool {
    true
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}
fn default_system_favorites() -> Vec<String> {
    ["lock-screen", "logout", "reboot", "shutdown"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            show_all_subtree: default_true(),
            show_separators: false,
            page_size: default_page_size(),
            favorites: Vec::new(),
            system_favorites: default_system_favorites(),
        }
    }
}
