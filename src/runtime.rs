//! Runtime services and shared state for the relay.

use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    server,
    service::notify::NotifyClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the notify client. It is
/// designed to be trivially cloneable, allowing it to be handed to every
/// request without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application, including the rule table.
    pub config: Config,
    /// The notification delivery client.
    pub notify: NotifyClient,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        let notify = NotifyClient::slack(&config)?;

        Ok(Self { config, notify })
    }

    /// Bind the listener and serve until Ctrl-C.
    pub async fn start(&self) -> Void {
        if !self.config.verifies_signatures() {
            warn!("`SECRET` is empty; webhook signatures will not be checked.");
        } else if !self.config.verify_project_card_signature {
            warn!("Project card deliveries are accepted without signature verification.");
        }

        if self.config.rules.is_empty() {
            warn!("The rule table is empty; no notifications will be sent.");
        }

        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;

        info!(
            "Listening on {} with {} mention rule(s) and {} project column rule(s).",
            listener.local_addr()?,
            self.config.rules.mentions.len(),
            self.config.rules.project_columns.len()
        );

        axum::serve(listener, server::build_router(self.clone()))
            .with_graceful_shutdown(shutdown_signal(tokio::signal::ctrl_c()))
            .await?;

        Ok(())
    }
}

/// Resolves once `signal` fires.
///
/// If the signal handler could not be installed, this never resolves and the
/// server runs until the process is killed.
async fn shutdown_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!("Failed to listen for Ctrl-C: {}", err);
        std::future::pending::<()>().await;
    }

    info!("Shutting down ...");
}
