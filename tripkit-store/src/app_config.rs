use serde::{Deserialize, Deserializer};
use std::env;
use tripkit_catalog::PricingConfig;
use tripkit_shared::Masked;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub pricing: PricingConfig,
    pub alerts: AlertsConfig,
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 3000 }
    }
}

/// Without a url the service keeps history and the alert queue in memory.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: Masked<String>,
    pub jwt_expiration_seconds: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Masked("tripkit-dev-secret".to_string()),
            jwt_expiration_seconds: 86_400,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// JSON reference data file; built-in tables are used when unset or missing.
    pub path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertChannelKind {
    #[default]
    Sms,
    Whatsapp,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AlertsConfig {
    pub channel: AlertChannelKind,
    /// Accepts a list or a single comma-separated string.
    #[serde(deserialize_with = "comma_list")]
    pub contacts: Vec<String>,
    pub timeout_seconds: u64,
    pub twilio: TwilioConfig,
}

impl Default for AlertsConfig {
    fn default() -> Self {
        Self {
            channel: AlertChannelKind::Sms,
            contacts: Vec::new(),
            timeout_seconds: 10,
            twilio: TwilioConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: Masked<String>,
    pub from_number: String,
    pub whatsapp_from: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LocationConfig {
    pub enabled: bool,
    pub ipinfo_url: String,
    pub timeout_seconds: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ipinfo_url: "https://ipinfo.io/".to_string(),
            timeout_seconds: 3,
        }
    }
}

fn comma_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        One(String),
        Many(Vec<String>),
    }

    let items = match Raw::deserialize(deserializer)? {
        Raw::One(joined) => joined.split(',').map(str::to_string).collect(),
        Raw::Many(list) => list,
    };
    Ok(items
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `TRIPKIT__ALERTS__TWILIO__ACCOUNT_SID=AC...`
            .add_source(config::Environment::with_prefix("TRIPKIT").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_toml(raw: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(raw, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
