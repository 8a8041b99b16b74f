use simplemenu_types::{AppEntry, EntryKind, SystemAction};

/// One row of a menu model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEntry {
    App(AppEntry),
    Group(GroupEntry),
    Separator,
    System(SystemAction),
}

impl MenuEntry {
    #[must_use]
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::App(_) => EntryKind::App,
            Self::Group(_) => EntryKind::Group,
            Self::Separator => EntryKind::Separator,
            Self::System(_) => EntryKind::System,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::App(app) => &app.name,
            Self::Group(group) => &group.name,
            Self::Separator => "",
            Self::System(action) => action.label(),
        }
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        match self {
            Self::App(app) => app.icon.as_deref(),
            Self::Group(group) => group.icon.as_deref(),
            Self::Separator => None,
            Self::System(action) => Some(action.icon()),
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&GroupEntry> {
        match self {
            Self::Group(group) => Some(group),
            _ => None,
        }
    }
}

/// Where a group's children come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupChild {
    /// Children owned by the group
    Model(MenuModel),
    /// The root model's favorites, shared rather than copied
    Favorites,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub name: String,
    pub icon: Option<String>,
    pub child: GroupChild,
}

impl GroupEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, icon: Option<String>, child: GroupChild) -> Self {
        Self {
            name: name.into(),
            icon,
            child,
        }
    }

    /// A nameless group holding one page of entries
    #[must_use]
    pub fn page(model: MenuModel) -> Self {
        Self::new(String::new(), None, GroupChild::Model(model))
    }

    #[must_use]
    pub fn is_favorites(&self) -> bool {
        self.child == GroupChild::Favorites
    }
}

/// An ordered list of entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    description: Option<String>,
    entries: Vec<MenuEntry>,
}

impl MenuModel {
    #[must_use]
    pub fn new(entries: Vec<MenuEntry>) -> Self {
        Self {
            description: None,
            entries,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entry(&self, row: usize) -> Option<&MenuEntry> {
        self.entries.get(row)
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }
}
