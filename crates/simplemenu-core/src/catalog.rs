//! Loading the application catalog produced by discovery.

use crate::{Error, Result};
use simplemenu_types::Catalog;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// Load and validate a catalog JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid JSON, names a
/// category twice, or contains an app without a storage id.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    debug!("Loading catalog from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    validate(&catalog)?;

    info!(
        "Loaded catalog with {} categories ({} app entries)",
        catalog.categories.len(),
        catalog.apps().count()
    );
    Ok(catalog)
}

fn validate(catalog: &Catalog) -> Result<()> {
    let mut seen = HashSet::new();
    for category in &catalog.categories {
        if !seen.insert(category.name.as_str()) {
            return Err(Error::Catalog(format!(
                "duplicate category '{}'",
                category.name
            )));
        }
        if let Some(app) = category.apps.iter().find(|a| a.storage_id.is_empty()) {
            return Err(Error::Catalog(format!(
                "app '{}' in category '{}' has no storageId",
                app.name, category.name
            )));
        }
    }
    Ok(())
}
