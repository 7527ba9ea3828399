//! Immutable tag rules.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A rule marking matching tags of a project immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImmutableRule {
    /// Server-assigned rule ID.
    #[serde(default)]
    pub id: i64,

    /// Rule priority.
    #[serde(default)]
    pub priority: i64,

    /// Whether the rule is disabled.
    #[serde(default)]
    pub disabled: bool,

    /// Rule action, `immutable`.
    #[serde(default)]
    pub action: String,

    /// Rule template, `immutable_template`.
    #[serde(default)]
    pub template: String,

    /// Template parameters.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Tag selectors.
    #[serde(default)]
    pub tag_selectors: Vec<ImmutableSelector>,

    /// Repository selectors keyed by selector kind.
    #[serde(default)]
    pub scope_selectors: BTreeMap<String, Vec<ImmutableSelector>>,
}

impl ImmutableRule {
    /// Creates a rule protecting tags matching `tag_pattern` in repositories
    /// matching `repo_pattern`.
    #[must_use]
    pub fn matching(repo_pattern: impl Into<String>, tag_pattern: impl Into<String>) -> Self {
        let mut scope_selectors = BTreeMap::new();
        scope_selectors.insert(
            "repository".to_string(),
            vec![ImmutableSelector::matches(repo_pattern)],
        );

        Self {
            action: "immutable".to_string(),
            template: "immutable_template".to_string(),
            tag_selectors: vec![ImmutableSelector::matches(tag_pattern)],
            scope_selectors,
            ..Self::default()
        }
    }
}

/// Selector of an [`ImmutableRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImmutableSelector {
    /// Selector kind, `doublestar`.
    #[serde(default)]
    pub kind: String,

    /// `matches` or `excludes`.
    #[serde(default)]
    pub decoration: String,

    /// Pattern.
    #[serde(default)]
    pub pattern: String,

    /// Extra selector settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<String>,
}

impl ImmutableSelector {
    /// Creates a `doublestar` selector matching `pattern`.
    #[must_use]
    pub fn matches(pattern: impl Into<String>) -> Self {
        Self {
            kind: "doublestar".to_string(),
            decoration: "matches".to_string(),
            pattern: pattern.into(),
            extras: None,
        }
    }
}
