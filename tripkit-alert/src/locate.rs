use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;
use tripkit_core::location::LocationLookup;

pub const IPINFO_URL: &str = "https://ipinfo.io/";

#[derive(Debug, Deserialize)]
struct IpInfo {
    #[serde(default)]
    loc: Option<String>,
}

/// Resolves an approximate position from the server's public IP.
pub struct IpInfoLookup {
    client: Client,
    url: String,
}

impl IpInfoLookup {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url: url.into() })
    }

    async fn fetch(&self) -> Result<Option<String>, reqwest::Error> {
        let info: IpInfo = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info
            .loc
            .map(|loc| loc.trim().to_string())
            .filter(|loc| !loc.is_empty())
            .map(|loc| format!("https://maps.google.com/?q={}", loc)))
    }
}

#[async_trait]
impl LocationLookup for IpInfoLookup {
    async fn locate(&self) -> Option<String> {
        match self.fetch().await {
            Ok(link) => link,
            Err(e) => {
                warn!(error = %e, "IP location lookup failed");
                None
            }
        }
    }
}
