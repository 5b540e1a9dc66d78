// ── Site domain types ──

use serde::{Deserialize, Serialize};

use super::lenient_text;

/// Site entry from `GET /central/v2/sites`.
///
/// `site_name` is the join key to device records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    pub site_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub site_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub zipcode: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub associated_device_count: Option<String>,
}

impl Site {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            site_name: name.into(),
            ..Self::default()
        }
    }
}
