//! Shared result aliases and the outbound Slack message shape.

use serde::{Deserialize, Serialize};

/// Error type used across the crate.
pub type Err = anyhow::Error;
/// Result with the crate error type.
pub type Res<T> = Result<T, Err>;
/// Result carrying no value.
pub type Void = Res<()>;

/// A single `title`/`value` pair rendered inside a Slack attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Bold heading above the value; may be empty.
    pub title: String,
    /// Field content.
    pub value: String,
    /// Whether Slack may lay this field out side by side with another.
    pub short: bool,
}

/// A legacy Slack message attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Plain-text summary for clients that cannot render attachments.
    pub fallback: String,
    /// Text shown above the attachment block.
    pub pretext: String,
    /// Sidebar color (`good`, `warning`, `danger`, or a hex code).
    pub color: String,
    /// Fields, rendered in order.
    pub fields: Vec<Field>,
}

/// The JSON body posted to a Slack incoming webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Display name of the poster.
    pub username: String,
    /// Channel to post into, e.g. `#id-andrkrn`.
    pub channel: String,
    /// Main message text, in Slack `mrkdwn`.
    pub text: String,
    /// Emoji used as the poster's avatar.
    pub icon_emoji: String,
    /// Attachments, rendered in order; may be empty.
    pub attachments: Vec<Attachment>,
}
