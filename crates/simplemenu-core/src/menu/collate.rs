//! Sorting and pagination of app lists.

use super::model::{GroupEntry, MenuEntry, MenuModel};
use simplemenu_types::AppEntry;
use std::cmp::Ordering;

/// Case-insensitive name order, falling back to exact comparison so that
/// names differing only in case still sort deterministically.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    folded.then_with(|| a.cmp(b))
}

/// Sort apps by collated name; the storage id breaks remaining ties.
pub(crate) fn sort_apps(apps: &mut [AppEntry]) {
    apps.sort_by(|a, b| collate(&a.name, &b.name).then_with(|| a.storage_id.cmp(&b.storage_id)));
}

/// Split `entries` into nameless page groups of at most `page_size` rows.
pub(crate) fn paginate(entries: Vec<MenuEntry>, page_size: usize) -> Vec<MenuEntry> {
    let page_size = page_size.max(1);
    let mut pages = Vec::with_capacity(entries.len().div_ceil(page_size));
    let mut page = Vec::with_capacity(page_size);

    for entry in entries {
        page.push(entry);
        if page.len() == page_size {
            let full = std::mem::replace(&mut page, Vec::with_capacity(page_size));
            pages.push(MenuEntry::Group(GroupEntry::page(MenuModel::new(full))));
        }
    }

    if !page.is_empty() {
        pages.push(MenuEntry::Group(GroupEntry::page(MenuModel::new(page))));
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::GroupChild;

    fn apps(names: &[&str]) -> Vec<MenuEntry> {
        names
            .iter()
            .map(|n| MenuEntry::App(AppEntry::new(format!("{n}.desktop"), *n)))
            .collect()
    }

    fn page_sizes(pages: &[MenuEntry]) -> Vec<usize> {
        pages
            .iter()
            .map(|p| match &p.as_group().unwrap().child {
                GroupChild::Model(m) => m.count(),
                GroupChild::Favorites => 0,
            })
            .collect()
    }

    #[test]
    fn test_collate_ignores_case_first() {
        assert_eq!(collate("apple", "Banana"), Ordering::Less);
        assert_eq!(collate("Zebra", "apple"), Ordering::Greater);
        assert_eq!(collate("Kate", "kate"), Ordering::Less);
        assert_eq!(collate("kate", "kate"), Ordering::Equal);
    }

    #[test]
    fn test_sort_apps_ties_on_storage_id() {
        let mut list = vec![
            AppEntry::new("b.desktop", "Terminal"),
            AppEntry::new("a.desktop", "Terminal"),
            AppEntry::new("c.desktop", "files"),
        ];
        sort_apps(&mut list);
        let ids: Vec<_> = list.iter().map(|a| a.storage_id.as_str()).collect();
        assert_eq!(ids, vec!["c.desktop", "a.desktop", "b.desktop"]);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let pages = paginate(apps(&["a", "b", "c", "d"]), 2);
        assert_eq!(page_sizes(&pages), vec![2, 2]);
    }

    #[test]
    fn test_paginate_remainder_page() {
        let pages = paginate(apps(&["a", "b", "c", "d", "e"]), 2);
        assert_eq!(page_sizes(&pages), vec![2, 2, 1]);
    }

    #[test]
    fn test_paginate_empty() {
        assert!(paginate(Vec::new(), 24).is_empty());
    }

    #[test]
    fn test_paginate_zero_page_size_is_one() {
        let pages = paginate(apps(&["a", "b"]), 0);
        assert_eq!(page_sizes(&pages), vec![1, 1]);
    }
}
