//! Event handling for the relay.
//!
//! This module turns decoded GitHub events into Slack notifications:
//! - Matching events against the rule table
//! - Formatting one message per match
//! - Handing the messages to the notify service

pub mod github_event;
pub mod matcher;
pub mod notification;
