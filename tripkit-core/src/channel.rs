use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel not configured: {0}")]
    NotConfigured(String),

    #[error("Provider rejected message: {0}")]
    Rejected(String),

    #[error("Provider unreachable: {0}")]
    Transport(String),

    #[error("Provider call timed out after {0}s")]
    Timeout(u64),
}

/// Outbound delivery channel for emergency alerts (SMS, WhatsApp, ...).
#[async_trait]
pub trait AlertChannel: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the channel has everything it needs to attempt delivery.
    fn is_configured(&self) -> bool;

    fn contacts_count(&self) -> usize;

    /// Deliver `body` to every configured contact and return the provider's
    /// message identifiers. An empty list means nothing was delivered.
    async fn deliver(&self, body: &str) -> Result<Vec<String>, ChannelError>;
}

/// Channel used when provider credentials are missing; always fails so that
/// alerts fall through to the offline queue.
pub struct UnconfiguredChannel {
    reason: String,
}

impl UnconfiguredChannel {
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

#[async_trait]
impl AlertChannel for UnconfiguredChannel {
    fn name(&self) -> &str {
        "unconfigured"
    }

    fn is_configured(&self) -> bool {
        false
    }

    fn contacts_count(&self) -> usize {
        0
    }

    async fn deliver(&self, _body: &str) -> Result<Vec<String>, ChannelError> {
        Err(ChannelError::NotConfigured(self.reason.clone()))
    }
}
