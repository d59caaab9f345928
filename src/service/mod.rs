//! Service integrations for external APIs and clients.
//!
//! The only outbound integration is notification delivery (a Slack
//! incoming webhook). The module defines a generic trait and a concrete
//! implementation, allowing for extensibility and easy testing.

pub mod notify;
