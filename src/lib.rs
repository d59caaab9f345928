//! Library root for `notify-relay`.
//!
//! Notify-relay listens for GitHub webhook deliveries and forwards the ones
//! someone cares about to Slack:
//! - Issues and issue comments that @-mention a configured handle
//! - Project cards that land in a configured column
//!
//! Deliveries are verified against the shared webhook secret, matched against
//! a static rule table loaded at startup, and posted to a Slack incoming
//! webhook. Nothing is stored, queued, or retried.

#[deny(missing_docs)]
pub mod base;
pub mod github;
pub mod interaction;
pub mod runtime;
pub mod server;
pub mod service;

use base::{config::Config, types::Void};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the relay:
/// - Creates the runtime context with the configuration and Slack client
/// - Serves webhook deliveries until Ctrl-C
pub async fn start(config: Config) -> Void {
    info!("Starting notify-relay ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}
