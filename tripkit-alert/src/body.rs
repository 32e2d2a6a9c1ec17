use chrono::{DateTime, Utc};

pub const DEFAULT_ALERT_MESSAGE: &str = "HELP! I am in trouble.";

/// Render the outbound alert text.
///
/// A blank `message` falls back to the stock distress line.
pub fn compose_body(message: Option<&str>, location_link: &str, at: DateTime<Utc>) -> String {
    let message = message
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(DEFAULT_ALERT_MESSAGE);

    format!(
        "🚨 {}\nLocation: {}\nTime: {}",
        message,
        location_link,
        at.format("%Y-%m-%d %H:%M:%S UTC")
    )
}
