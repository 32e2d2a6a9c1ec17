use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use tripkit_core::channel::{AlertChannel, ChannelError};
use tripkit_shared::Masked;

pub const TWILIO_API_BASE: &str = "https://api.twilio.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwilioMode {
    Sms,
    WhatsApp,
}

impl TwilioMode {
    pub fn channel_name(&self) -> &'static str {
        match self {
            TwilioMode::Sms => "sms",
            TwilioMode::WhatsApp => "whatsapp",
        }
    }

    fn recipient(&self, contact: &str) -> String {
        match self {
            TwilioMode::WhatsApp if !contact.starts_with("whatsapp:") => {
                format!("whatsapp:{}", contact)
            }
            _ => contact.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: Masked<String>,
    /// Sender number, `whatsapp:`-prefixed in WhatsApp mode
    pub from: String,
}

#[derive(Debug, Deserialize)]
struct MessageResource {
    #[serde(default)]
    sid: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorBody {
    #[serde(default)]
    message: String,
}

/// Sends alerts through the Twilio Messages API, one message per contact.
pub struct TwilioChannel {
    client: Client,
    base_url: String,
    credentials: TwilioCredentials,
    contacts: Vec<Masked<String>>,
    mode: TwilioMode,
}

impl TwilioChannel {
    pub fn new(
        credentials: TwilioCredentials,
        contacts: Vec<String>,
        mode: TwilioMode,
        timeout: Duration,
    ) -> Result<Self, ChannelError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: TWILIO_API_BASE.to_string(),
            credentials,
            contacts: contacts
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .map(Masked)
                .collect(),
            mode,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.base_url, self.credentials.account_sid
        )
    }

    async fn send_one(&self, to: &Masked<String>, body: &str) -> Result<String, ChannelError> {
        let recipient = self.mode.recipient(to.expose());
        let params = [
            ("To", recipient.as_str()),
            ("From", self.credentials.from.as_str()),
            ("Body", body),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.credentials.account_sid, Some(self.credentials.auth_token.expose()))
            .form(&params)
            .send()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = response
                .json::<TwilioErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            warn!(
                contact = %to,
                status = status.as_u16(),
                reason = %reason,
                "Twilio rejected message"
            );
            return Err(ChannelError::Rejected(format!("HTTP {}: {}", status.as_u16(), reason)));
        }

        let resource: MessageResource = response
            .json()
            .await
            .map_err(|e| ChannelError::Transport(e.to_string()))?;
        debug!(contact = %to, sid = %resource.sid, "Twilio accepted message");
        Ok(resource.sid)
    }
}

#[async_trait]
impl AlertChannel for TwilioChannel {
    fn name(&self) -> &str {
        self.mode.channel_name()
    }

    fn is_configured(&self) -> bool {
        !self.credentials.account_sid.is_empty()
            && !self.credentials.auth_token.expose().is_empty()
            && !self.credentials.from.is_empty()
    }

    fn contacts_count(&self) -> usize {
        self.contacts.len()
    }

    /// Any single contact failure fails the whole attempt.
    async fn deliver(&self, body: &str) -> Result<Vec<String>, ChannelError> {
        if !self.is_configured() {
            return Err(ChannelError::NotConfigured(format!(
                "Twilio {} credentials incomplete",
                self.mode.channel_name()
            )));
        }

        let mut sids = Vec::with_capacity(self.contacts.len());
        for contact in &self.contacts {
            sids.push(self.send_one(contact, body).await?);
        }
        Ok(sids)
    }
}
