//! Inbound GitHub deliveries: signature checks, decoding, and routing.
//!
//! Every delivery ends up as exactly one [`InboundEvent`]. Event types the
//! relay does not handle become [`InboundEvent::Unrecognized`] and are never
//! decoded or verified.

pub mod payload;
pub mod signature;

use axum::http::HeaderMap;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::base::config::Config;

use self::payload::{IssueCommentPayload, IssuesPayload, ProjectCardPayload};

/// Header carrying the GitHub event type.
pub const HEADER_EVENT: &str = "x-github-event";
/// Header carrying the HMAC-SHA256 signature.
pub const HEADER_SIGNATURE: &str = "x-hub-signature-256";

/// Event type for issue deliveries.
pub const EVENT_ISSUES: &str = "issues";
/// Event type for issue comment deliveries.
pub const EVENT_ISSUE_COMMENT: &str = "issue_comment";
/// Event type for project card deliveries.
pub const EVENT_PROJECT_CARD: &str = "project_card";

// Events.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEvent {
    pub action: String,
    pub title: String,
    pub body: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCommentEvent {
    pub action: String,
    pub issue_title: String,
    pub comment_body: String,
    pub comment_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCardEvent {
    pub action: String,
    pub repository_full_name: String,
    pub card_id: i64,
    pub column_id: i64,
}

/// A fully decoded delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Issue(IssueEvent),
    IssueComment(IssueCommentEvent),
    ProjectCard(ProjectCardEvent),
    /// Any other event type; carries the raw `X-GitHub-Event` value.
    Unrecognized(String),
}

impl From<IssuesPayload> for IssueEvent {
    fn from(payload: IssuesPayload) -> Self {
        Self {
            action: payload.action,
            title: payload.issue.title,
            body: payload.issue.body.unwrap_or_default(),
            url: payload.issue.html_url,
        }
    }
}

impl From<IssueCommentPayload> for IssueCommentEvent {
    fn from(payload: IssueCommentPayload) -> Self {
        Self {
            action: payload.action,
            issue_title: payload.issue.title,
            comment_body: payload.comment.body.unwrap_or_default(),
            comment_url: payload.comment.html_url,
        }
    }
}

impl From<ProjectCardPayload> for ProjectCardEvent {
    fn from(payload: ProjectCardPayload) -> Self {
        Self {
            action: payload.action,
            repository_full_name: payload.repository.full_name,
            card_id: payload.project_card.id,
            column_id: payload.project_card.column_id,
        }
    }
}

// Errors.

/// Reasons a delivery is rejected before any rule is evaluated.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("missing required header: {0}")]
    MissingHeader(&'static str),

    #[error("missing signature header")]
    MissingSignature,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("empty request body")]
    EmptyBody,

    #[error("invalid JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

// Parsing.

/// Verifies and decodes one delivery.
#[instrument(skip_all)]
pub fn parse_event(headers: &HeaderMap, body: &[u8], config: &Config) -> Result<InboundEvent, VerifyError> {
    let event_type = headers
        .get(HEADER_EVENT)
        .and_then(|v| v.to_str().ok())
        .ok_or(VerifyError::MissingHeader(HEADER_EVENT))?;

    debug!(event_type, body_len = body.len(), "Received delivery");

    let event = match event_type {
        EVENT_ISSUES => {
            check_delivery(headers, body, config)?;
            let payload: IssuesPayload = serde_json::from_slice(body)?;
            InboundEvent::Issue(payload.into())
        }
        EVENT_ISSUE_COMMENT => {
            check_delivery(headers, body, config)?;
            let payload: IssueCommentPayload = serde_json::from_slice(body)?;
            InboundEvent::IssueComment(payload.into())
        }
        EVENT_PROJECT_CARD => {
            if config.verify_project_card_signature {
                check_delivery(headers, body, config)?;
            } else if body.is_empty() {
                return Err(VerifyError::EmptyBody);
            }
            let payload: ProjectCardPayload = serde_json::from_slice(body)?;
            InboundEvent::ProjectCard(payload.into())
        }
        other => InboundEvent::Unrecognized(other.to_string()),
    };

    Ok(event)
}

/// Rejects empty bodies and, when a secret is configured, bad signatures.
fn check_delivery(headers: &HeaderMap, body: &[u8], config: &Config) -> Result<(), VerifyError> {
    if body.is_empty() {
        return Err(VerifyError::EmptyBody);
    }

    if !config.verifies_signatures() {
        return Ok(());
    }

    let header = headers.get(HEADER_SIGNATURE).and_then(|v| v.to_str().ok()).ok_or(VerifyError::MissingSignature)?;

    if !signature::verify_signature(body, header, config.secret.as_bytes()) {
        warn!("Invalid webhook signature");
        return Err(VerifyError::InvalidSignature);
    }

    Ok(())
}
