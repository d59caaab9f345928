//! Wire shapes for the GitHub webhook payloads we care about.
//!
//! Only the fields the relay reads are declared; everything else in the
//! delivery is ignored by `serde`.

use serde::Deserialize;

/// The `issue` object of `issues` and `issue_comment` deliveries.
#[derive(Debug, Deserialize, Clone)]
pub struct Issue {
    /// Issue title.
    pub title: String,
    /// GitHub sends `null` for an issue without a description.
    #[serde(default)]
    pub body: Option<String>,
    /// Browser link to the issue.
    pub html_url: String,
}

/// The `comment` object of an `issue_comment` delivery.
#[derive(Debug, Deserialize, Clone)]
pub struct Comment {
    /// Comment text; `None` when GitHub sends `null`.
    #[serde(default)]
    pub body: Option<String>,
    /// Browser link to the comment.
    pub html_url: String,
}

/// `issues` delivery.
#[derive(Debug, Deserialize, Clone)]
pub struct IssuesPayload {
    /// What happened, e.g. `opened` or `edited`.
    pub action: String,
    pub issue: Issue,
}

/// `issue_comment` delivery.
#[derive(Debug, Deserialize, Clone)]
pub struct IssueCommentPayload {
    /// What happened, e.g. `created` or `edited`.
    pub action: String,
    /// The issue the comment belongs to.
    pub issue: Issue,
    /// The comment itself.
    pub comment: Comment,
}

/// Repository the delivery came from; absent for organization projects.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Repository {
    /// `owner/name`.
    #[serde(default)]
    pub full_name: String,
}

/// The `project_card` object; `column_id` is the column the card is in now.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectCard {
    /// Card id.
    pub id: i64,
    /// Column holding the card after the event.
    pub column_id: i64,
}

/// `project_card` delivery.
///
/// Deliberately loose: organization-level projects carry no `repository`,
/// and most of the card object is skipped.
#[derive(Debug, Deserialize, Clone)]
pub struct ProjectCardPayload {
    /// What happened, e.g. `created` or `moved`.
    #[serde(default)]
    pub action: String,
    /// The card that changed.
    pub project_card: ProjectCard,
    /// Source repository, defaulted when missing.
    #[serde(default)]
    pub repository: Repository,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issue_with_null_body() {
        let payload: IssuesPayload = serde_json::from_value(json!({
            "action": "opened",
            "issue": { "title": "Broken", "body": null, "html_url": "https://github.com/o/r/issues/1", "number": 1 },
            "repository": { "full_name": "o/r" }
        }))
        .unwrap();

        assert_eq!(payload.action, "opened");
        assert_eq!(payload.issue.body, None);
    }

    #[test]
    fn project_card_without_repository() {
        let payload: ProjectCardPayload = serde_json::from_value(json!({
            "action": "moved",
            "project_card": { "id": 5, "column_id": 13982492, "note": null }
        }))
        .unwrap();

        assert_eq!(payload.project_card.column_id, 13982492);
        assert_eq!(payload.repository.full_name, "");
    }
}
