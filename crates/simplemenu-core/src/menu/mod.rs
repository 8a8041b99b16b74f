//! Root model of the application menu.
//!
//! Top-level rows, in order:
//! - "All Applications" (when `show_all_subtree`): a page of favorites
//!   followed by every app, de-duplicated, sorted and paginated
//! - a separator (when `show_separators`)
//! - one group per catalog category, its apps paginated
//!
//! The system actions model is rebuilt on each refresh and exposed
//! separately, as is the favorites model.

mod collate;
mod favorites;
mod model;
mod system;

pub use favorites::{ACTION_SORT_FAVORITES, FavoritesModel};
pub use model::{GroupChild, GroupEntry, MenuEntry, MenuModel};
pub use system::{AllCapabilities, SessionCapabilities, SystemModel};

use crate::config::{DEFAULT_PAGE_SIZE, MenuConfig};
use collate::{paginate, sort_apps};
use simplemenu_types::{AppEntry, Catalog, MenuAction};
use std::collections::HashMap;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

pub const ALL_APPLICATIONS_LABEL: &str = "All Applications";
/// Description tagging the aggregated model so views can style it
pub const ALL_MODEL_DESCRIPTION: &str = "SIMPLEMENU_ALL_MODEL";

pub const ACTION_LAUNCH: &str = "launch";
pub const ACTION_ADD_FAVORITE: &str = "add-to-favorites";
pub const ACTION_REMOVE_FAVORITE: &str = "remove-from-favorites";
/// Argument is the target index
pub const ACTION_MOVE_FAVORITE: &str = "move-favorite";
pub const ACTION_RUN: &str = "run";

/// Change notifications emitted by [`RootModel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    Refreshed,
    CountChanged(usize),
    SeparatorCountChanged(usize),
    FavoritesChanged,
    SystemFavoritesChanged,
    ShowAllSubtreeChanged(bool),
    ShowSeparatorsChanged(bool),
    PageSizeChanged(usize),
}

pub struct RootModel {
    show_all_subtree: bool,
    show_separators: bool,
    page_size: usize,

    catalog: Option<Catalog>,
    entries: Vec<MenuEntry>,
    separator_count: usize,

    favorites: FavoritesModel,
    system: Option<SystemModel>,
    system_favorite_ids: Vec<String>,
    capabilities: Box<dyn SessionCapabilities>,

    event_tx: UnboundedSender<MenuEvent>,
}

impl RootModel {
    /// Create an empty model; it fills on the first [`RootModel::set_catalog`].
    #[must_use]
    pub fn new(config: &MenuConfig) -> (Self, UnboundedReceiver<MenuEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (
            Self {
                show_all_subtree: config.show_all_subtree,
                show_separators: config.show_separators,
                page_size: if config.page_size == 0 {
                    DEFAULT_PAGE_SIZE
                } else {
                    config.page_size
                },
                catalog: None,
                entries: Vec::new(),
                separator_count: 0,
                favorites: FavoritesModel::new(config.favorites.clone()),
                system: None,
                system_favorite_ids: config.system_favorites.clone(),
                capabilities: Box::new(AllCapabilities),
                event_tx,
            },
            event_rx,
        )
    }

    // ---- properties ----

    #[must_use]
    pub fn show_all_subtree(&self) -> bool {
        self.show_all_subtree
    }

    pub fn set_show_all_subtree(&mut self, show: bool) {
        if self.show_all_subtree != show {
            self.show_all_subtree = show;
            self.refresh();
            self.notify(MenuEvent::ShowAllSubtreeChanged(show));
        }
    }

    #[must_use]
    pub fn show_separators(&self) -> bool {
        self.show_separators
    }

    pub fn set_show_separators(&mut self, show: bool) {
        if self.show_separators != show {
            self.show_separators = show;
            self.refresh();
            self.notify(MenuEvent::ShowSeparatorsChanged(show));
        }
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            warn!("Ignoring page size 0");
            return;
        }
        if self.page_size != page_size {
            self.page_size = page_size;
            self.refresh();
            self.notify(MenuEvent::PageSizeChanged(page_size));
        }
    }

    /// Replace the catalog and rebuild
    pub fn set_catalog(&mut self, catalog: Catalog) {
        self.catalog = Some(catalog);
        self.refresh();
    }

    #[must_use]
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Replace which system actions the session allows
    pub fn set_capabilities(&mut self, capabilities: Box<dyn SessionCapabilities>) {
        self.capabilities = capabilities;
        self.rebuild_system();
    }

    pub fn set_system_favorites(&mut self, ids: Vec<String>) {
        if self.system_favorite_ids != ids {
            self.system_favorite_ids = ids;
            self.rebuild_system();
        }
    }

    pub fn set_favorites(&mut self, ids: Vec<String>) {
        if self.favorites.set_ids(ids) {
            self.favorites_changed();
        }
    }

    /// Apply a (re)loaded config. Refreshes at most once.
    pub fn apply_config(&mut self, config: &MenuConfig) {
        let mut changes = Vec::new();
        if self.show_all_subtree != config.show_all_subtree {
            self.show_all_subtree = config.show_all_subtree;
            changes.push(MenuEvent::ShowAllSubtreeChanged(config.show_all_subtree));
        }
        if self.show_separators != config.show_separators {
            self.show_separators = config.show_separators;
            changes.push(MenuEvent::ShowSeparatorsChanged(config.show_separators));
        }
        if config.page_size != 0 && self.page_size != config.page_size {
            self.page_size = config.page_size;
            changes.push(MenuEvent::PageSizeChanged(config.page_size));
        }

        if !changes.is_empty() {
            self.refresh();
            for event in changes {
                self.notify(event);
            }
        }

        self.set_favorites(config.favorites.clone());
        self.set_system_favorites(config.system_favorites.clone());
    }

    // ---- rows ----

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entry(&self, row: usize) -> Option<&MenuEntry> {
        self.entries.get(row)
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn separator_count(&self) -> usize {
        self.separator_count
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesModel {
        &self.favorites
    }

    #[must_use]
    pub fn system_model(&self) -> Option<&SystemModel> {
        self.system.as_ref()
    }

    /// System actions pinned as favorites, once the model has been built
    #[must_use]
    pub fn system_favorites_model(&self) -> Option<&MenuModel> {
        self.system.as_ref().map(SystemModel::favorites)
    }

    /// Children of `group`, resolving the shared favorites model
    #[must_use]
    pub fn child_model<'a>(&'a self, group: &'a GroupEntry) -> &'a MenuModel {
        match &group.child {
            GroupChild::Model(model) => model,
            GroupChild::Favorites => self.favorites.model(),
        }
    }

    #[must_use]
    pub fn has_children(&self, group: &GroupEntry) -> bool {
        !self.child_model(group).is_empty()
    }

    /// Follow `path` (row indices, outermost first) to an entry
    #[must_use]
    pub fn entry_at(&self, path: &[usize]) -> Option<&MenuEntry> {
        let (&first, rest) = path.split_first()?;
        let mut entry = self.entries.get(first)?;
        for &row in rest {
            let group = entry.as_group()?;
            entry = self.child_model(group).entry(row)?;
        }
        Some(entry)
    }

    // ---- refresh ----

    /// Rebuild all rows from the catalog. Does nothing before a catalog is set.
    pub fn refresh(&mut self) {
        let Some(catalog) = self.catalog.as_ref() else {
            debug!("No catalog yet, skipping refresh");
            return;
        };

        let mut entries = category_groups(catalog, self.page_size);
        let all_model = self
            .show_all_subtree
            .then(|| all_applications_model(&entries, self.page_size));

        let mut separator_count = 0;
        if self.show_separators {
            entries.insert(0, MenuEntry::Separator);
            separator_count += 1;
        }

        if let Some(all_model) = all_model {
            entries.insert(
                0,
                MenuEntry::Group(GroupEntry::new(
                    ALL_APPLICATIONS_LABEL,
                    None,
                    GroupChild::Model(all_model),
                )),
            );
        }

        self.entries = entries;
        self.separator_count = separator_count;
        self.system = Some(SystemModel::new(
            self.capabilities.as_ref(),
            &self.system_favorite_ids,
        ));
        self.favorites.refresh(self.catalog.as_ref());

        info!(
            "Menu refreshed: {} rows, {} favorites",
            self.entries.len(),
            self.favorites.count()
        );

        self.notify(MenuEvent::SystemFavoritesChanged);
        self.notify(MenuEvent::CountChanged(self.entries.len()));
        self.notify(MenuEvent::SeparatorCountChanged(separator_count));
        self.notify(MenuEvent::Refreshed);
    }

    fn rebuild_system(&mut self) {
        if self.catalog.is_none() {
            return;
        }
        self.system = Some(SystemModel::new(
            self.capabilities.as_ref(),
            &self.system_favorite_ids,
        ));
        self.notify(MenuEvent::SystemFavoritesChanged);
    }

    fn favorites_changed(&mut self) {
        self.favorites.refresh(self.catalog.as_ref());
        self.notify(MenuEvent::FavoritesChanged);
    }

    // ---- actions ----

    /// Trigger a top-level row. See [`RootModel::trigger_path`].
    pub fn trigger(
        &mut self,
        row: usize,
        action_id: &str,
        argument: Option<&str>,
    ) -> Option<MenuAction> {
        self.trigger_path(&[row], action_id, argument)
    }

    /// Trigger the entry at `path`.
    ///
    /// Groups forward `action_id` to their child model when it has actions of
    /// its own. Apps launch on an empty or `launch` action and handle the
    /// favorites actions. System rows run on an empty or `run` action.
    /// Returns what the host should do, or `None` when nothing applies.
    pub fn trigger_path(
        &mut self,
        path: &[usize],
        action_id: &str,
        argument: Option<&str>,
    ) -> Option<MenuAction> {
        let entry = self.entry_at(path)?.clone();

        match entry {
            MenuEntry::Group(group) => {
                if group.is_favorites() && self.favorites.actions().iter().any(|a| *a == action_id)
                {
                    self.trigger_favorites_action(action_id)
                } else {
                    debug!("group '{}' has no action '{}'", group.name, action_id);
                    None
                }
            }
            MenuEntry::App(app) => self.trigger_app(&app, action_id, argument),
            MenuEntry::System(action) => match action_id {
                "" | ACTION_RUN => Some(MenuAction::System { action }),
                _ => None,
            },
            MenuEntry::Separator => None,
        }
    }

    /// Trigger a row of the system actions model
    #[must_use]
    pub fn trigger_system(&self, row: usize, action_id: &str) -> Option<MenuAction> {
        let entry = self.system.as_ref()?.model().entry(row)?;
        match (entry, action_id) {
            (MenuEntry::System(action), "" | ACTION_RUN) => {
                Some(MenuAction::System { action: *action })
            }
            _ => None,
        }
    }

    fn trigger_favorites_action(&mut self, action_id: &str) -> Option<MenuAction> {
        if action_id != ACTION_SORT_FAVORITES {
            return None;
        }
        let catalog = self.catalog.as_ref()?;
        if !self.favorites.sort_by_name(catalog) {
            debug!("favorites already sorted");
            return None;
        }
        self.favorites_changed();
        Some(self.favorites_action())
    }

    fn trigger_app(
        &mut self,
        app: &AppEntry,
        action_id: &str,
        argument: Option<&str>,
    ) -> Option<MenuAction> {
        let id = app.storage_id.as_str();
        let changed = match action_id {
            "" | ACTION_LAUNCH => {
                return Some(MenuAction::Launch {
                    storage_id: id.to_string(),
                });
            }
            ACTION_ADD_FAVORITE => self.favorites.add(id),
            ACTION_REMOVE_FAVORITE => self.favorites.remove(id),
            ACTION_MOVE_FAVORITE => {
                let Some(index) = argument.and_then(|a| a.trim().parse::<usize>().ok()) else {
                    warn!("{ACTION_MOVE_FAVORITE} needs a numeric argument, got {argument:?}");
                    return None;
                };
                self.favorites.move_to(id, index)
            }
            other => {
                debug!("app '{}' has no action '{}'", id, other);
                return None;
            }
        };

        if changed {
            self.favorites_changed();
            Some(self.favorites_action())
        } else {
            None
        }
    }

    fn favorites_action(&self) -> MenuAction {
        MenuAction::FavoritesChanged {
            favorites: self.favorites.ids().to_vec(),
        }
    }

    fn notify(&self, event: MenuEvent) {
        if let Err(e) = self.event_tx.send(event) {
            error!("Failed to send menu event: {}", e);
        }
    }
}

/// One group per non-empty category, each holding its apps in pages
fn category_groups(catalog: &Catalog, page_size: usize) -> Vec<MenuEntry> {
    catalog
        .categories
        .iter()
        .filter_map(|category| {
            if category.apps.is_empty() {
                debug!("Skipping empty category '{}'", category.name);
                return None;
            }
            let apps = category.apps.iter().cloned().map(MenuEntry::App).collect();
            let pages = MenuModel::new(paginate(apps, page_size));
            Some(MenuEntry::Group(GroupEntry::new(
                category.name.clone(),
                category.icon.clone(),
                GroupChild::Model(pages),
            )))
        })
        .collect()
}

/// Gather every app from the category pages into one sorted, paginated
/// model whose first page is the favorites.
fn all_applications_model(categories: &[MenuEntry], page_size: usize) -> MenuModel {
    let mut by_id: HashMap<&str, &AppEntry> = HashMap::new();

    let pages = categories
        .iter()
        .filter_map(MenuEntry::as_group)
        .filter_map(|group| match &group.child {
            GroupChild::Model(model) => Some(model),
            GroupChild::Favorites => None,
        })
        .flat_map(MenuModel::entries)
        .filter_map(MenuEntry::as_group);

    for page in pages {
        let GroupChild::Model(page_model) = &page.child else {
            continue;
        };
        for entry in page_model.entries() {
            if let MenuEntry::App(app) = entry {
                if app.name.is_empty() {
                    continue;
                }
                by_id.insert(app.storage_id.as_str(), app);
            }
        }
    }

    let mut apps: Vec<AppEntry> = by_id.into_values().cloned().collect();
    sort_apps(&mut apps);

    let mut groups = paginate(apps.into_iter().map(MenuEntry::App).collect(), page_size);
    groups.insert(
        0,
        MenuEntry::Group(GroupEntry::new(String::new(), None, GroupChild::Favorites)),
    );

    MenuModel::new(groups).with_description(ALL_MODEL_DESCRIPTION)
}
