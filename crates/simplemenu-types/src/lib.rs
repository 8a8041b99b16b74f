//! Shared types for simplemenu components.
//!
//! This crate provides the geometry primitives used by the popup placer and
//! the catalog/menu types used by the root model. All types are serializable
//! so scenes and catalogs can be loaded from JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deserialize a Vec that may be null or missing (both become empty vec)
fn deserialize_null_as_empty_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let opt: Option<Vec<T>> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

// ============================================================================
// Geometry
// ============================================================================

/// A point in integer screen coordinates (y grows downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl std::ops::Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned rectangle.
///
/// `right()` and `bottom()` are exclusive: a rect at x=0 with width 10
/// has `right() == 10`, which is also where an adjacent rect starts.
/// Edge arithmetic saturates at the `i32` range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    #[must_use]
    pub const fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[inline]
    #[must_use]
    pub const fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    #[must_use]
    pub const fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Same size, new top-left corner
    #[must_use]
    pub const fn moved_to(&self, origin: Point) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Whether `p` lies inside the rect (right/bottom exclusive)
    #[must_use]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x < self.right() && p.y >= self.top() && p.y < self.bottom()
    }

    /// Area of the overlap between two rects, 0 when disjoint
    #[must_use]
    pub fn intersection_area(&self, other: &Self) -> i64 {
        let w = i64::from(self.right().min(other.right()))
            - i64::from(self.left().max(other.left()));
        let h = i64::from(self.bottom().min(other.bottom()))
            - i64::from(self.top().max(other.top()));
        if w <= 0 || h <= 0 {
            0
        } else {
            w.saturating_mul(h)
        }
    }

    /// Squared distance from `p` to the nearest point of the rect, 0 inside
    #[must_use]
    pub fn distance_sq_to(&self, p: Point) -> i64 {
        fn axis(v: i32, start: i32, end: i32) -> i64 {
            if v < start {
                i64::from(start) - i64::from(v)
            } else if v >= end {
                i64::from(v) - i64::from(end) + 1
            } else {
                0
            }
        }
        let dx = axis(p.x, self.left(), self.right());
        let dy = axis(p.y, self.top(), self.bottom());
        dx.saturating_mul(dx).saturating_add(dy.saturating_mul(dy))
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

// ============================================================================
// Panel edge
// ============================================================================

/// Screen edge the host panel is docked to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelEdge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl PanelEdge {
    pub const ALL: [Self; 4] = [Self::Top, Self::Bottom, Self::Left, Self::Right];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Top and bottom panels run along the horizontal screen edges
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for PanelEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown panel edge or system action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseNameError {}

impl FromStr for PanelEdge {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|edge| edge.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                kind: "panel edge",
                value: s.to_string(),
            })
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// An installed application as seen by the menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppEntry {
    /// Unique menu id (desktop file id), used for de-duplication and favorites
    pub storage_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<String>,
}

impl AppEntry {
    #[must_use]
    pub fn new(storage_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            storage_id: storage_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A menu category with its applications in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub apps: Vec<AppEntry>,
}

/// Result of application discovery, in menu order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default, deserialize_with = "deserialize_null_as_empty_vec")]
    pub categories: Vec<Category>,
}

impl Catalog {
    /// Iterate every app in every category, duplicates included
    pub fn apps(&self) -> impl Iterator<Item = &AppEntry> {
        self.categories.iter().flat_map(|c| c.apps.iter())
    }

    /// Find an app by storage id (first occurrence)
    #[must_use]
    pub fn find(&self, storage_id: &str) -> Option<&AppEntry> {
        self.apps().find(|app| app.storage_id == storage_id)
    }
}

// ============================================================================
// Menu entries
// ============================================================================

/// Entry kind, ordered the way aggregated lists sort them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    App,
    Group,
    Separator,
    System,
}

/// Session actions offered by the system model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SystemAction {
    LockScreen,
    SwitchUser,
    Logout,
    SaveSession,
    Suspend,
    Hibernate,
    Reboot,
    Shutdown,
}

impl SystemAction {
    /// Menu order
    pub const ALL: [Self; 8] = [
        Self::LockScreen,
        Self::SwitchUser,
        Self::Logout,
        Self::SaveSession,
        Self::Suspend,
        Self::Hibernate,
        Self::Reboot,
        Self::Shutdown,
    ];

    /// Stable id used in config and action triggers
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::LockScreen => "lock-screen",
            Self::SwitchUser => "switch-user",
            Self::Logout => "logout",
            Self::SaveSession => "save-session",
            Self::Suspend => "suspend",
            Self::Hibernate => "hibernate",
            Self::Reboot => "reboot",
            Self::Shutdown => "shutdown",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LockScreen => "Lock",
            Self::SwitchUser => "Switch User",
            Self::Logout => "Log Out",
            Self::SaveSession => "Save Session",
            Self::Suspend => "Suspend",
            Self::Hibernate => "Hibernate",
            Self::Reboot => "Restart",
            Self::Shutdown => "Shut Down",
        }
    }

    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::LockScreen => "system-lock-screen",
            Self::SwitchUser => "system-switch-user",
            Self::Logout => "system-log-out",
            Self::SaveSession => "document-save",
            Self::Suspend => "system-suspend",
            Self::Hibernate => "system-suspend-hibernate",
            Self::Reboot => "system-reboot",
            Self::Shutdown => "system-shutdown",
        }
    }
}

impl fmt::Display for SystemAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SystemAction {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.id() == s.trim())
            .ok_or_else(|| ParseNameError {
                kind: "system action",
                value: s.to_string(),
            })
    }
}

/// What the host should do after a menu entry was triggered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuAction {
    /// Launch the application with this storage id
    Launch { storage_id: String },
    /// Run a session action
    System { action: SystemAction },
    /// The favorites list changed; persist it
    FavoritesChanged { favorites: Vec<String> },
}




#[cfg(test)]
mod proptest_geometry_tests {
    use super::*;
    use proptest::prelude::*;

    prop_compose! {
        fn arb_rect()(
            x in -5000i32..5000,
            y in -5000i32..5000,
            width in 0i32..4000,
            height in 0i32..4000,
        ) -> Rect {
            Rect::new(x, y, width, height)
        }
    }

    proptest! {
        #[test]
        fn intersection_is_symmetric(a in arb_rect(), b in arb_rect()) {
            prop_assert_eq!(a.intersection_area(&b), b.intersection_area(&a));
        }

        #[test]
        fn intersection_never_exceeds_either_area(a in arb_rect(), b in arb_rect()) {
            let overlap = a.intersection_area(&b);
            prop_assert!(overlap <= i64::from(a.width) * i64::from(a.height));
            prop_assert!(overlap <= i64::from(b.width) * i64::from(b.height));
        }

        #[test]
        fn contained_points_have_zero_distance(r in arb_rect(), dx in 0i32..4000, dy in 0i32..4000) {
            prop_assume!(!r.is_empty());
            let p = Point::new(r.x + dx % r.width, r.y + dy % r.height);
            prop_assert!(r.contains(p));
            prop_assert_eq!(r.distance_sq_to(p), 0);
        }
    }
}
