pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{OutboundMessage, Void};

// Traits.

/// Generic "notify" trait that delivery clients must implement.
///
/// Implementing this trait allows the relay to post to something other than
/// a Slack incoming webhook, and lets tests observe what would be sent.
#[async_trait]
pub trait GenericNotifyClient: Send + Sync + 'static {
    /// Deliver a single message.
    ///
    /// Called once per rule match. Implementations make one attempt and
    /// do not retry.
    async fn send_message(&self, message: &OutboundMessage) -> Void;
}

// Structs.

/// Notification client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct NotifyClient {
    inner: Arc<dyn GenericNotifyClient>,
}

impl Deref for NotifyClient {
    type Target = dyn GenericNotifyClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl NotifyClient {
    pub fn new(inner: Arc<dyn GenericNotifyClient>) -> Self {
        Self { inner }
    }
}
