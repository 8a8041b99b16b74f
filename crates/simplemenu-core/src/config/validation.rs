//! Config validation - warns about unknown fields

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// Validate JSON config and warn about unknown fields.
pub fn warn_unknown_fields(content: &str, config_name: &str) {
    let Ok(value) = serde_json::from_str::<Value>(content) else {
        return;
    };

    let expected = expected_config_keys();
    for path in find_unknown_keys(&value, &expected, "") {
        warn!("Unknown config field in {config_name}: {path}");
    }
}

/// Find unknown keys in JSON value compared to expected keys.
/// Returns paths like "popup.unknownField" for unknown fields.
fn find_unknown_keys(value: &Value, expected: &ExpectedKeys, prefix: &str) -> Vec<String> {
    let mut unknowns = Vec::new();

    let Value::Object(obj) = value else {
        return unknowns;
    };

    for (key, child) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        if let Some(nested) = expected.nested.get(key.as_str()) {
            unknowns.extend(find_unknown_keys(child, nested, &path));
        } else if !expected.fields.contains(key.as_str()) {
            unknowns.push(path);
        }
    }

    unknowns
}

/// Expected keys for a config section.
/// `fields` are leaf fields, `nested` are nested objects with their own expected keys.
struct ExpectedKeys {
    fields: HashSet<&'static str>,
    nested: HashMap<&'static str, ExpectedKeys>,
}

impl ExpectedKeys {
    fn new(fields: &[&'static str]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
            nested: HashMap::new(),
        }
    }

    fn with_nested(mut self, key: &'static str, nested: ExpectedKeys) -> Self {
        self.nested.insert(key, nested);
        self
    }
}

/// Expected keys for `Config` (settings.rs)
fn expected_config_keys() -> ExpectedKeys {
    let popup_keys = ExpectedKeys::new(&["offset", "panelEdge"]);
    let menu_keys = ExpectedKeys::new(&[
        "showAllSubtree",
        "showSeparators",
        "pageSize",
        "favorites",
        "systemFavorites",
    ]);

    ExpectedKeys::new(&[])
        .with_nested("popup", popup_keys)
        .with_nested("menu", menu_keys)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unknowns_in(json: &str) -> Vec<String> {
        let value: Value = serde_json::from_str(json).unwrap();
        let mut unknowns = find_unknown_keys(&value, &expected_config_keys(), "");
        unknowns.sort();
        unknowns
    }

    #[test]
    fn test_valid_config_no_warnings() {
        let unknowns = unknowns_in(
            r#"{
                "popup": {"offset": 4, "panelEdge": "top"},
                "menu": {"pageSize": 10, "favorites": ["a.desktop"]}
            }"#,
        );
        assert!(
            unknowns.is_empty(),
            "Expected no unknowns, got: {unknowns:?}"
        );
    }

    #[test]
    fn test_unknown_top_level_field() {
        let unknowns = unknowns_in(r#"{"popup": {}, "search": {}}"#);
        assert_eq!(unknowns, vec!["search"]);
    }

    #[test]
    fn test_unknown_nested_fields() {
        let unknowns = unknowns_in(
            r#"{"popup": {"ofset": 4}, "menu": {"showRecentApps": true, "pageSize": 3}}"#,
        );
        assert_eq!(unknowns, vec!["menu.showRecentApps", "popup.ofset"]);
    }

    #[test]
    fn test_array_values_are_leaves() {
        let unknowns = unknowns_in(r#"{"menu": {"favorites": [{"nested": 1}]}}"#);
        assert!(unknowns.is_empty());
    }

    #[test]
    fn test_invalid_json_is_ignored() {
        warn_unknown_fields("{not json", "config.json");
    }
}
