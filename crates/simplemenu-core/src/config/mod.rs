mod dirs;
mod settings;
mod validation;
mod watcher;

pub use dirs::Directories;
pub use settings::{Config, DEFAULT_PAGE_SIZE, MenuConfig, PopupConfig};
pub use validation::warn_unknown_fields;
pub use watcher::{ConfigWatcher, spawn_config_watcher};
