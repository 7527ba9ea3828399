//! Tag retention policies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A tag retention policy.
///
/// A project is bound to its policy through the `retention_id` project
/// metadata value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    /// Server-assigned policy ID.
    #[serde(default)]
    pub id: i64,

    /// Rule combination algorithm, `or`.
    #[serde(default)]
    pub algorithm: String,

    /// Retention rules.
    #[serde(default)]
    pub rules: Vec<RetentionRule>,

    /// What starts a retention run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<RetentionRuleTrigger>,

    /// Scope the policy applies to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<RetentionPolicyScope>,
}

impl RetentionPolicy {
    /// Creates an empty `or` policy scoped to a project.
    #[must_use]
    pub fn for_project(project_id: i64) -> Self {
        Self {
            algorithm: "or".to_string(),
            scope: Some(RetentionPolicyScope {
                level: "project".to_string(),
                reference: project_id,
            }),
            ..Self::default()
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: RetentionRule) -> Self {
        self.rules.push(rule);
        self
    }
}

/// A single retention rule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionRule {
    /// Rule ID.
    #[serde(default)]
    pub id: i64,

    /// Rule priority.
    #[serde(default)]
    pub priority: i64,

    /// Whether the rule is disabled.
    #[serde(default)]
    pub disabled: bool,

    /// Rule action, `retain`.
    #[serde(default)]
    pub action: String,

    /// Rule template, e.g. `latestPushedK`.
    #[serde(default)]
    pub template: String,

    /// Template parameters.
    #[serde(default)]
    pub params: BTreeMap<String, serde_json::Value>,

    /// Tag selectors.
    #[serde(default)]
    pub tag_selectors: Vec<RetentionSelector>,

    /// Repository selectors keyed by selector kind.
    #[serde(default)]
    pub scope_selectors: BTreeMap<String, Vec<RetentionSelector>>,
}

/// Selector of a [`RetentionRule`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionSelector {
    /// Selector kind, e.g. `doublestar`.
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

/// Trigger of a [`RetentionPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionRuleTrigger {
    /// Trigger kind, `Schedule`.
    #[serde(default)]
    pub kind: String,

    /// Trigger settings, e.g. `{"cron": "0 0 0 * * *"}`.
    #[serde(default)]
    pub settings: serde_json::Value,
}

/// Scope of a [`RetentionPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicyScope {
    /// Scope level, `project`.
    #[serde(default)]
    pub level: String,

    /// ID of the scoped object.
    #[serde(rename = "ref", default)]
    pub reference: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_project_sets_scope() {
        let policy = RetentionPolicy::for_project(5);
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["scope"], serde_json::json!({ "level": "project", "ref": 5 }));
        assert_eq!(policy.algorithm, "or");
    }
}
