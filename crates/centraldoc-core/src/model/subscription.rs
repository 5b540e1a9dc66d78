// ── Licensing subscription ──

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use super::{lenient_i64, lenient_text};

/// Subscription entry from `GET /platform/licensing/v1/subscriptions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default, deserialize_with = "lenient_text")]
    pub sku: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub license_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub quantity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub available: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub active: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subscription_key: Option<String>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub start_date: Option<i64>,
    /// Milliseconds since the Unix epoch.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub end_date: Option<i64>,
}

impl Subscription {
    pub fn display_sku(&self) -> &str {
        self.sku.as_deref().unwrap_or("")
    }

    /// Evaluation licenses are left out of the subscriptions report.
    pub fn is_evaluation(&self) -> bool {
        self.display_sku().contains("EVAL")
    }
}

/// Format a millisecond epoch timestamp as `dd.mm.YYYY` (UTC).
pub fn format_epoch_millis(millis: Option<i64>) -> String {
    millis
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.format("%d.%m.%Y").to_string())
        .unwrap_or_default()
}
