use super::model::{MenuEntry, MenuModel};
use simplemenu_types::SystemAction;
use tracing::warn;

/// What the session manager allows right now
pub trait SessionCapabilities {
    fn can(&self, action: SystemAction) -> bool;
}

/// Every action is offered
#[derive(Debug, Clone, Copy, Default)]
pub struct AllCapabilities;

impl SessionCapabilities for AllCapabilities {
    fn can(&self, _action: SystemAction) -> bool {
        true
    }
}

impl<F> SessionCapabilities for F
where
    F: Fn(SystemAction) -> bool,
{
    fn can(&self, action: SystemAction) -> bool {
        self(action)
    }
}

/// Session actions plus the subset pinned as favorites
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemModel {
    model: MenuModel,
    favorites: MenuModel,
}

impl SystemModel {
    #[must_use]
    pub fn new(capabilities: &dyn SessionCapabilities, favorite_ids: &[String]) -> Self {
        let entries = SystemAction::ALL
            .into_iter()
            .filter(|a| capabilities.can(*a))
            .map(MenuEntry::System)
            .collect();

        let mut favorites = Vec::new();
        for id in favorite_ids {
            match id.parse::<SystemAction>() {
                Ok(action) if capabilities.can(action) => {
                    let entry = MenuEntry::System(action);
                    if !favorites.contains(&entry) {
                        favorites.push(entry);
                    }
                }
                Ok(_) => {}
                Err(e) => warn!("Ignoring system favorite: {e}"),
            }
        }

        Self {
            model: MenuModel::new(entries),
            favorites: MenuModel::new(favorites),
        }
    }

    #[must_use]
    pub fn model(&self) -> &MenuModel {
        &self.model
    }

    #[must_use]
    pub fn favorites(&self) -> &MenuModel {
        &self.favorites
    }
}
