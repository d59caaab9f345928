//! Turns a rule match into the Slack message that announces it.

use crate::base::types::{Attachment, Field, OutboundMessage};

use super::matcher::Match;

/// Display name of the posting bot.
pub const USERNAME: &str = "Github Notification";
/// Avatar of the posting bot.
pub const ICON_EMOJI: &str = ":github:";

const MENTION_FALLBACK: &str = "You have been mentioned";
const MENTION_COLOR: &str = "warning";

/// Builds the message for one match.
pub fn format_match(m: &Match<'_>) -> OutboundMessage {
    let (text, attachments) = match m {
        Match::Issue { event, .. } => (slack_link(&event.url, &event.title), vec![mention_attachment(&event.body)]),
        Match::IssueComment { event, .. } => (slack_link(&event.comment_url, &event.issue_title), vec![mention_attachment(&event.comment_body)]),
        Match::ProjectCard { event, rule } => {
            let url = project_card_url(&event.repository_full_name, rule.project_id, event.card_id);
            (format!("{} just moved to {}", slack_link(&url, "This issue"), rule.column_name), Vec::new())
        }
    };

    OutboundMessage {
        username: USERNAME.to_string(),
        channel: m.channel().to_string(),
        text,
        icon_emoji: ICON_EMOJI.to_string(),
        attachments,
    }
}

/// Link to a card on a repository project board.
pub fn project_card_url(repository_full_name: &str, project_id: i64, card_id: i64) -> String {
    format!("https://github.com/{repository_full_name}/projects/{project_id}#card-{card_id}")
}

/// Slack `mrkdwn` link syntax.
fn slack_link(url: &str, label: &str) -> String {
    format!("<{url}|{label}>")
}

fn mention_attachment(body: &str) -> Attachment {
    Attachment {
        fallback: MENTION_FALLBACK.to_string(),
        pretext: String::new(),
        color: MENTION_COLOR.to_string(),
        fields: vec![Field {
            title: String::new(),
            value: body.to_string(),
            short: false,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        base::rules::{MentionRule, ProjectColumnRule},
        github::{IssueCommentEvent, IssueEvent, ProjectCardEvent},
    };

    fn mention_rule() -> MentionRule {
        MentionRule { mention: "@andrkrn".to_string(), channel: "#id-andrkrn".to_string() }
    }

    #[test]
    fn issue_message() {
        let event = IssueEvent {
            action: "opened".to_string(),
            title: "Login is broken".to_string(),
            body: "ping @andrkrn".to_string(),
            url: "https://github.com/o/r/issues/4".to_string(),
        };
        let rule = mention_rule();

        let message = format_match(&Match::Issue { event: &event, rule: &rule });

        assert_eq!(message.username, "Github Notification");
        assert_eq!(message.icon_emoji, ":github:");
        assert_eq!(message.channel, "#id-andrkrn");
        assert_eq!(message.text, "<https://github.com/o/r/issues/4|Login is broken>");
        assert_eq!(
            message.attachments,
            vec![Attachment {
                fallback: "You have been mentioned".to_string(),
                pretext: String::new(),
                color: "warning".to_string(),
                fields: vec![Field { title: String::new(), value: "ping @andrkrn".to_string(), short: false }],
            }]
        );
    }

    #[test]
    fn comment_message_links_comment_with_issue_title() {
        let event = IssueCommentEvent {
            action: "created".to_string(),
            issue_title: "Login is broken".to_string(),
            comment_body: "@andrkrn can you check?".to_string(),
            comment_url: "https://github.com/o/r/issues/4#issuecomment-1".to_string(),
        };
        let rule = mention_rule();

        let message = format_match(&Match::IssueComment { event: &event, rule: &rule });

        assert_eq!(message.text, "<https://github.com/o/r/issues/4#issuecomment-1|Login is broken>");
        assert_eq!(message.attachments[0].fields[0].value, "@andrkrn can you check?");
    }

    #[test]
    fn project_card_message() {
        let event = ProjectCardEvent {
            action: "moved".to_string(),
            repository_full_name: "o/r".to_string(),
            card_id: 321,
            column_id: 13982492,
        };
        let rule = ProjectColumnRule { project_id: 1, column_id: 13982492, column_name: "QA Test".to_string(), channel: "#qa".to_string() };

        let message = format_match(&Match::ProjectCard { event: &event, rule: &rule });

        assert_eq!(message.channel, "#qa");
        assert_eq!(message.text, "<https://github.com/o/r/projects/1#card-321|This issue> just moved to QA Test");
        assert!(message.attachments.is_empty());
    }

    #[test]
    fn serializes_with_slack_field_names() {
        let event = IssueEvent {
            action: "opened".to_string(),
            title: "t".to_string(),
            body: "b".to_string(),
            url: "u".to_string(),
        };
        let rule = mention_rule();
        let value = serde_json::to_value(format_match(&Match::Issue { event: &event, rule: &rule })).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "username": "Github Notification",
                "channel": "#id-andrkrn",
                "text": "<u|t>",
                "icon_emoji": ":github:",
                "attachments": [{
                    "fallback": "You have been mentioned",
                    "pretext": "",
                    "color": "warning",
                    "fields": [{ "title": "", "value": "b", "short": false }]
                }]
            })
        );
    }
}
