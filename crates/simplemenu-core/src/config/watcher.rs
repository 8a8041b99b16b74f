//! Configuration file watcher for hot-reload support.

use crate::{Error, Result};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

const CONFIG_DEBOUNCE_DURATION: Duration = Duration::from_millis(500);

/// Keeps the underlying watcher alive; dropping it stops notifications.
pub struct ConfigWatcher {
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    path: PathBuf,
}

impl ConfigWatcher {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Watch `config_path` and send `()` on `tx` after each settled change.
///
/// The parent directory is watched rather than the file, so editors that
/// replace the file on save keep triggering reloads.
///
/// # Errors
///
/// Returns an error if the path has no parent directory or the platform
/// watcher cannot be created.
pub fn spawn_config_watcher(config_path: &Path, tx: UnboundedSender<()>) -> Result<ConfigWatcher> {
    let Some(parent) = config_path.parent() else {
        return Err(Error::Config(format!(
            "Invalid config path: {}",
            config_path.display()
        )));
    };
    let file_name = config_path.file_name().map(ToOwned::to_owned);

    let mut debouncer = new_debouncer(CONFIG_DEBOUNCE_DURATION, move |result: DebounceEventResult| {
        match result {
            Ok(events) => {
                let touched = events
                    .iter()
                    .any(|e| e.path.file_name().map(ToOwned::to_owned) == file_name);
                if touched {
                    debug!("Config file changed, sending reload notification");
                    if tx.send(()).is_err() {
                        debug!("Config reload receiver dropped");
                    }
                }
            }
            Err(e) => error!("Watcher error: {e:?}"),
        }
    })?;

    debouncer
        .watcher()
        .watch(parent, RecursiveMode::NonRecursive)?;
    info!("Watching config directory: {}", parent.display());

    Ok(ConfigWatcher {
        _debouncer: debouncer,
        path: config_path.to_path_buf(),
    })
}
