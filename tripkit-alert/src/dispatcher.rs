use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{info, warn};
use tripkit_core::channel::{AlertChannel, ChannelError};
use tripkit_core::location::{GeoPoint, LocationLookup, LOCATION_UNAVAILABLE};
use tripkit_core::repository::AlertRepository;
use tripkit_core::CoreError;
use tripkit_shared::AlertRecord;

use crate::body::compose_body;
use crate::twilio::TwilioMode;

/// Notice returned to the caller when an alert lands in the offline queue.
pub const QUEUED_NOTICE: &str = "No internet/SMS failed. Saved offline.";

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Sent { ids: Vec<String> },
    Queued { record: AlertRecord },
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChannelStatus {
    pub channel: String,
    pub configured: bool,
    pub whatsapp_enabled: bool,
    pub contacts_count: usize,
    pub pending_count: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AlertError {
    #[error(transparent)]
    Storage(#[from] CoreError),
}

/// Delivers emergency alerts, falling back to the offline queue.
///
/// Delivery failures never surface to the caller: the alert is persisted as
/// `pending` and reported as queued. Only a broken queue is an error.
pub struct AlertDispatcher {
    channel: Arc<dyn AlertChannel>,
    queue: Arc<dyn AlertRepository>,
    locator: Arc<dyn LocationLookup>,
    send_timeout: Duration,
    retry_gate: Mutex<()>,
}

impl AlertDispatcher {
    pub fn new(
        channel: Arc<dyn AlertChannel>,
        queue: Arc<dyn AlertRepository>,
        locator: Arc<dyn LocationLookup>,
        send_timeout: Duration,
    ) -> Self {
        Self {
            channel,
            queue,
            locator,
            send_timeout,
            retry_gate: Mutex::new(()),
        }
    }

    pub async fn dispatch(
        &self,
        message: Option<&str>,
        coords: Option<GeoPoint>,
    ) -> Result<DispatchOutcome, AlertError> {
        let link = match coords {
            Some(point) => point.maps_link(),
            None => self
                .locator
                .locate()
                .await
                .unwrap_or_else(|| LOCATION_UNAVAILABLE.to_string()),
        };
        let body = compose_body(message, &link, Utc::now());

        if let Some(ids) = self.attempt(&body).await {
            info!(channel = self.channel.name(), messages = ids.len(), "Alert delivered");
            return Ok(DispatchOutcome::Sent { ids });
        }

        let record = self.queue.enqueue(&body).await?;
        warn!(alert_id = record.id, "Alert queued for retry");
        Ok(DispatchOutcome::Queued { record })
    }

    /// Re-attempt every pending alert, oldest first. Returns how many were sent.
    ///
    /// Retry passes are serialised so two concurrent calls cannot deliver the
    /// same record twice.
    pub async fn retry_all_pending(&self) -> Result<usize, AlertError> {
        let _gate = self.retry_gate.lock().await;

        let pending = self.queue.pending().await?;
        let total = pending.len();
        let mut sent = 0;

        for record in pending {
            if self.attempt(&record.message).await.is_none() {
                continue;
            }
            match self.queue.mark_sent(record.id).await {
                Ok(true) => sent += 1,
                Ok(false) => {}
                Err(e) => warn!(
                    alert_id = record.id,
                    error = %e,
                    "Delivered alert could not be marked sent"
                ),
            }
        }

        info!(attempted = total, sent, "Offline alert retry finished");
        Ok(sent)
    }

    pub async fn status(&self) -> Result<ChannelStatus, AlertError> {
        Ok(ChannelStatus {
            channel: self.channel.name().to_string(),
            configured: self.channel.is_configured(),
            whatsapp_enabled: self.channel.name() == TwilioMode::WhatsApp.channel_name(),
            contacts_count: self.channel.contacts_count(),
            pending_count: self.queue.pending().await?.len(),
        })
    }

    /// `Some(ids)` only when the channel confirmed at least one message.
    async fn attempt(&self, body: &str) -> Option<Vec<String>> {
        let delivery = self.channel.deliver(body);
        let result = match tokio::time::timeout(self.send_timeout, delivery).await {
            Ok(result) => result,
            Err(_) => Err(ChannelError::Timeout(self.send_timeout.as_secs())),
        };

        match result {
            Ok(ids) if !ids.is_empty() => Some(ids),
            Ok(_) => {
                warn!(channel = self.channel.name(), "Alert channel delivered no messages");
                None
            }
            Err(e) => {
                warn!(channel = self.channel.name(), error = %e, "Alert delivery failed");
                None
            }
        }
    }
}
