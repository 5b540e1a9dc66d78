// ── Domain model ──
//
// Canonical shapes for the records the pipeline reads from Central. The
// remote API is loose about types (counts arrive as numbers or strings,
// coordinates as floats or text), so scalar fields are normalized to
// display text at the deserialization boundary.

pub mod device;
pub mod group;
pub mod inventory;
pub mod site;
pub mod subscription;
pub mod topology;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use device::{DeviceRecord, MonitoredAp, RadioInterface};
pub use group::{RfProfile, Wlan};
pub use inventory::InventoryDevice;
pub use site::Site;
pub use subscription::Subscription;
pub use topology::{ApLocation, Building, Campus, Floor};

/// Render an arbitrary JSON value as a single line of display text.
///
/// `null` renders empty, arrays render comma-separated, nested objects
/// fall back to compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => value.to_string(),
    }
}

/// Deserialize any scalar as optional display text.
pub(crate) fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(display_value(&other)),
    }))
}

/// Deserialize a list of scalars as optional display text entries.
pub(crate) fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => Some(items.iter().map(display_value).collect()),
        Some(other) => Some(vec![display_value(&other)]),
    })
}

/// Deserialize an integer that may arrive as a number or numeric string.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
