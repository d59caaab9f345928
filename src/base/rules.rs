//! Static subscription rules: who gets notified about what.

use serde::Deserialize;

/// Notify `channel` whenever an issue or comment body contains `mention`.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MentionRule {
    /// GitHub handle to look for, including the `@` (e.g. `@andrkrn`).
    pub mention: String,
    /// Slack channel to post into.
    pub channel: String,
}

/// Notify `channel` whenever a project card lands in `column_id`.
///
/// Only `column_id` takes part in matching; `project_id` is used to build
/// the link back to the project board.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ProjectColumnRule {
    /// Project number, as it appears in the board URL.
    pub project_id: i64,
    /// Column that triggers the notification.
    pub column_id: i64,
    /// Human-readable column name used in the message text.
    pub column_name: String,
    /// Slack channel to post into.
    pub channel: String,
}

/// The full rule table, read once at startup.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RuleTable {
    /// Rules for issue and comment bodies.
    #[serde(default)]
    pub mentions: Vec<MentionRule>,
    /// Rules for project card events.
    #[serde(default)]
    pub project_columns: Vec<ProjectColumnRule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self {
            mentions: vec![MentionRule {
                mention: "@andrkrn".to_string(),
                channel: "#id-andrkrn".to_string(),
            }],
            // TODO: look up the project id and column name through the GitHub API instead of hardcoding them.
            project_columns: vec![ProjectColumnRule {
                project_id: 1,
                column_id: 13982492,
                column_name: "QA Test".to_string(),
                channel: "#id-andrkrn".to_string(),
            }],
        }
    }
}

impl RuleTable {
    /// Returns `true` when there is nothing to match against.
    pub fn is_empty(&self) -> bool {
        self.mentions.is_empty() && self.project_columns.is_empty()
    }
}
