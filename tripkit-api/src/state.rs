use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tripkit_alert::{AlertDispatcher, IpInfoLookup, TwilioChannel, TwilioCredentials, TwilioMode};
use tripkit_catalog::PricingEngine;
use tripkit_core::channel::{AlertChannel, UnconfiguredChannel};
use tripkit_core::location::{LocationLookup, NoLocation};
use tripkit_core::repository::{AlertRepository, BookingHistoryRepository};
use tripkit_order::BookingDesk;
use tripkit_shared::Masked;
use tripkit_store::app_config::{AlertChannelKind, AlertsConfig, LocationConfig};
use tripkit_store::{
    load_catalog, Config, DbClient, MemoryAlertRepository, MemoryBookingHistoryRepository,
    PgAlertRepository, PgBookingHistoryRepository,
};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: Masked<String>,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub pricing: Arc<PricingEngine>,
    pub desk: Arc<BookingDesk>,
    pub alerts: Arc<AlertDispatcher>,
    pub auth: AuthConfig,
}

impl AppState {
    /// Wire every component from configuration.
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = load_catalog(config.catalog.path.as_deref().map(Path::new))?;
        let pricing = Arc::new(PricingEngine::new(catalog, &config.pricing));

        let (history, queue): (Arc<dyn BookingHistoryRepository>, Arc<dyn AlertRepository>) =
            match config.database.url.as_deref() {
                Some(url) => {
                    let db = DbClient::new(url, config.database.max_connections).await?;
                    db.migrate().await?;
                    (
                        Arc::new(PgBookingHistoryRepository::new(db.pool.clone())),
                        Arc::new(PgAlertRepository::new(db.pool)),
                    )
                }
                None => {
                    warn!("No database configured, booking history and alert queue are in-memory");
                    (
                        Arc::new(MemoryBookingHistoryRepository::new()),
                        Arc::new(MemoryAlertRepository::new()),
                    )
                }
            };

        let alerts = AlertDispatcher::new(
            build_channel(&config.alerts),
            queue,
            build_locator(&config.location),
            Duration::from_secs(config.alerts.timeout_seconds),
        );

        Ok(Self {
            pricing,
            desk: Arc::new(
                BookingDesk::new(history).with_pending_ttl(chrono::Duration::seconds(
                    config.auth.jwt_expiration_seconds as i64,
                )),
            ),
            alerts: Arc::new(alerts),
            auth: AuthConfig {
                secret: config.auth.jwt_secret.clone(),
                expiration: config.auth.jwt_expiration_seconds,
            },
        })
    }
}

/// Twilio channel for the configured mode, or an always-failing channel
/// when credentials or the sender are missing.
pub fn build_channel(alerts: &AlertsConfig) -> Arc<dyn AlertChannel> {
    let twilio = &alerts.twilio;
    let (mode, from) = match alerts.channel {
        AlertChannelKind::Sms => (TwilioMode::Sms, twilio.from_number.trim().to_string()),
        AlertChannelKind::Whatsapp => {
            let from = twilio.whatsapp_from.trim();
            let from = if from.is_empty() || from.starts_with("whatsapp:") {
                from.to_string()
            } else {
                format!("whatsapp:{}", from)
            };
            (TwilioMode::WhatsApp, from)
        }
    };

    if twilio.account_sid.is_empty() || twilio.auth_token.expose().is_empty() || from.is_empty() {
        warn!(channel = mode.channel_name(), "Twilio not configured, alerts will be queued");
        return Arc::new(UnconfiguredChannel::new("Twilio not configured"));
    }

    let credentials = TwilioCredentials {
        account_sid: twilio.account_sid.clone(),
        auth_token: twilio.auth_token.clone(),
        from,
    };
    match TwilioChannel::new(
        credentials,
        alerts.contacts.clone(),
        mode,
        Duration::from_secs(alerts.timeout_seconds),
    ) {
        Ok(channel) => {
            info!(
                channel = mode.channel_name(),
                contacts = channel.contacts_count(),
                "Twilio alert channel ready"
            );
            Arc::new(channel)
        }
        Err(e) => {
            warn!(error = %e, "Failed to build Twilio client, alerts will be queued");
            Arc::new(UnconfiguredChannel::new(e.to_string()))
        }
    }
}

pub fn build_locator(location: &LocationConfig) -> Arc<dyn LocationLookup> {
    if !location.enabled {
        return Arc::new(NoLocation);
    }
    let timeout = Duration::from_secs(location.timeout_seconds);
    match IpInfoLookup::new(location.ipinfo_url.clone(), timeout) {
        Ok(lookup) => Arc::new(lookup),
        Err(e) => {
            warn!(error = %e, "Failed to build IP location client");
            Arc::new(NoLocation)
        }
    }
}
