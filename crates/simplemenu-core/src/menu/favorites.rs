use super::collate::collate;
use super::model::{MenuEntry, MenuModel};
use simplemenu_types::Catalog;
use tracing::debug;

/// Action id understood by the favorites model itself
pub const ACTION_SORT_FAVORITES: &str = "sort-favorites";

/// Favorite apps in user order.
///
/// The id list is the source of truth and may name apps that are not in the
/// current catalog; those stay in the list (they may come back after the
/// next discovery run) but are not shown.
#[derive(Debug, Clone, Default)]
pub struct FavoritesModel {
    ids: Vec<String>,
    model: MenuModel,
}

impl FavoritesModel {
    #[must_use]
    pub fn new(ids: Vec<String>) -> Self {
        let mut ids = ids;
        dedup_keep_first(&mut ids);
        Self {
            ids,
            model: MenuModel::default(),
        }
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Visible favorites
    #[must_use]
    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.model.count()
    }

    #[must_use]
    pub fn is_favorite(&self, storage_id: &str) -> bool {
        self.ids.iter().any(|id| id == storage_id)
    }

    #[must_use]
    pub fn actions(&self) -> &'static [&'static str] {
        &[ACTION_SORT_FAVORITES]
    }

    /// Append a favorite. Returns false if it already was one.
    pub fn add(&mut self, storage_id: &str) -> bool {
        if self.is_favorite(storage_id) {
            return false;
        }
        self.ids.push(storage_id.to_string());
        true
    }

    /// Returns false if `storage_id` was not a favorite.
    pub fn remove(&mut self, storage_id: &str) -> bool {
        let before = self.ids.len();
        self.ids.retain(|id| id != storage_id);
        self.ids.len() != before
    }

    /// Move a favorite to `index` in the id list (clamped to the end).
    /// Returns false if it is not a favorite or already there.
    pub fn move_to(&mut self, storage_id: &str, index: usize) -> bool {
        let Some(from) = self.ids.iter().position(|id| id == storage_id) else {
            return false;
        };
        let to = index.min(self.ids.len() - 1);
        if from == to {
            return false;
        }
        let id = self.ids.remove(from);
        self.ids.insert(to, id);
        true
    }

    /// Sort favorites by display name. Ids unknown to `catalog` keep their
    /// relative order after the known ones.
    pub fn sort_by_name(&mut self, catalog: &Catalog) -> bool {
        let before = self.ids.clone();
        self.ids.sort_by(|a, b| {
            match (catalog.find(a), catalog.find(b)) {
                (Some(x), Some(y)) => collate(&x.name, &y.name),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });
        self.ids != before
    }

    /// Replace the id list, e.g. after a config reload. Returns false if the
    /// de-duplicated list equals the current one.
    pub fn set_ids(&mut self, ids: Vec<String>) -> bool {
        let mut ids = ids;
        dedup_keep_first(&mut ids);
        if ids == self.ids {
            return false;
        }
        self.ids = ids;
        true
    }

    /// Rebuild the visible model from the catalog
    pub fn refresh(&mut self, catalog: Option<&Catalog>) {
        let entries = catalog
            .map(|catalog| {
                self.ids
                    .iter()
                    .filter_map(|id| catalog.find(id))
                    .map(|app| MenuEntry::App(app.clone()))
                    .collect()
            })
            .unwrap_or_default();
        self.model = MenuModel::new(entries);
        debug!(
            "Favorites refreshed: {} of {} visible",
            self.model.count(),
            self.ids.len()
        );
    }
}

fn dedup_keep_first(ids: &mut Vec<String>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(id.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use simplemenu_types::{AppEntry, Category};

    fn catalog() -> Catalog {
        Catalog {
            categories: vec![Category {
                name: "Apps".to_string(),
                icon: None,
                apps: vec![
                    AppEntry::new("zed.desktop", "Zed"),
                    AppEntry::new("firefox.desktop", "Firefox"),
                    AppEntry::new("kate.desktop", "kate"),
                ],
            }],
        }
    }

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_new_deduplicates() {
        let fav = FavoritesModel::new(ids(&["a", "b", "a"]));
        assert_eq!(fav.ids(), ids(&["a", "b"]).as_slice());
    }

    #[test]
    fn test_set_ids_compares_after_dedup() {
        let mut fav = FavoritesModel::new(ids(&["a", "b", "a"]));
        assert!(!fav.set_ids(ids(&["a", "a", "b"])));
        assert!(fav.set_ids(ids(&["b", "a"])));
        assert_eq!(fav.ids(), ids(&["b", "a"]).as_slice());
    }

    #[test]
    fn test_refresh_hides_unknown_ids() {
        let mut fav = FavoritesModel::new(ids(&["zed.desktop", "gone.desktop", "kate.desktop"]));
        fav.refresh(Some(&catalog()));
        assert_eq!(fav.count(), 2);
        assert_eq!(fav.ids().len(), 3);
        assert_eq!(fav.model().entry(1).unwrap().name(), "kate");
    }

    #[test]
    fn test_refresh_without_catalog_is_empty() {
        let mut fav = FavoritesModel::new(ids(&["zed.desktop"]));
        fav.refresh(None);
        assert_eq!(fav.count(), 0);
    }

    #[test]
    fn test_add_remove() {
        let mut fav = FavoritesModel::default();
        assert!(fav.add("zed.desktop"));
        assert!(!fav.add("zed.desktop"));
        assert!(fav.is_favorite("zed.desktop"));
        assert!(fav.remove("zed.desktop"));
        assert!(!fav.remove("zed.desktop"));
        assert!(!fav.is_favorite("zed.desktop"));
    }

    #[test]
    fn test_move_to() {
        let mut fav = FavoritesModel::new(ids(&["a", "b", "c"]));
        assert!(fav.move_to("c", 0));
        assert_eq!(fav.ids(), ids(&["c", "a", "b"]).as_slice());
        assert!(fav.move_to("c", 99));
        assert_eq!(fav.ids(), ids(&["a", "b", "c"]).as_slice());
        assert!(!fav.move_to("c", 2));
        assert!(!fav.move_to("missing", 0));
    }

    #[test]
    fn test_sort_by_name() {
        let mut fav = FavoritesModel::new(ids(&[
            "zed.desktop",
            "gone.desktop",
            "kate.desktop",
            "firefox.desktop",
        ]));
        assert!(fav.sort_by_name(&catalog()));
        assert_eq!(
            fav.ids(),
            ids(&["firefox.desktop", "kate.desktop", "zed.desktop", "gone.desktop"]).as_slice()
        );
        assert!(!fav.sort_by_name(&catalog()));
    }
}
