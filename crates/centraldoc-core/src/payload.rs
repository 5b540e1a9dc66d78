// ── Payload ingestion ──
//
// Raw Central payloads are checked against their expected shape exactly once,
// here. Everything downstream works with `Payload::Parsed` values; a payload
// that does not have the expected shape is carried as `Payload::Malformed`
// with the raw value kept for logging.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;
use crate::model::{
    ApLocation, Building, Campus, Floor, InventoryDevice, MonitoredAp, RfProfile, Site,
    Subscription, Wlan,
};

/// Result of checking a raw payload against its expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    Parsed(T),
    Malformed(Value),
}

impl<T> Payload<T> {
    /// Convert into a `Result`, turning a malformed payload into
    /// [`CoreError::MalformedPayload`] for `endpoint`.
    pub fn into_result(self, endpoint: &str) -> Result<T, CoreError> {
        match self {
            Self::Parsed(value) => Ok(value),
            Self::Malformed(raw) => Err(CoreError::malformed(endpoint, describe(&raw))),
        }
    }

    pub fn parsed(self) -> Option<T> {
        match self {
            Self::Parsed(value) => Some(value),
            Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Payload<U> {
        match self {
            Self::Parsed(value) => Payload::Parsed(f(value)),
            Self::Malformed(raw) => Payload::Malformed(raw),
        }
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total reported by the server, when it reports one.
    pub total: Option<usize>,
}

/// Short human-readable reason for a malformed payload.
fn describe(raw: &Value) -> String {
    if let Some(text) = raw
        .get("description")
        .or_else(|| raw.get("detail"))
        .and_then(Value::as_str)
    {
        return text.to_owned();
    }
    match raw {
        Value::Null => "empty payload".into(),
        Value::String(_) => "unexpected text payload".into(),
        Value::Array(_) => "unexpected list payload".into(),
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("unexpected object with keys [{}]", keys.join(", "))
        }
        Value::Bool(_) | Value::Number(_) => format!("unexpected scalar payload {raw}"),
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

/// Deserialize each element on its own; elements that do not fit are logged
/// and skipped so one bad record never hides the rest.
fn items<T: DeserializeOwned>(kind: &str, values: &[Value]) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| match T::deserialize(value) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(kind, error = %e, "skipping malformed record");
                None
            }
        })
        .collect()
}

fn listed<T: DeserializeOwned>(raw: Value, key: &str) -> Payload<Vec<T>> {
    match raw.get(key).and_then(Value::as_array) {
        Some(values) => Payload::Parsed(items(key, values)),
        None => Payload::Malformed(raw),
    }
}

fn paged<T: DeserializeOwned>(raw: Value, key: &str) -> Payload<Page<T>> {
    let total = raw
        .get("total")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());
    listed(raw, key).map(|items| Page { items, total })
}

// ── Central listings ────────────────────────────────────────────────

/// `GET /central/v2/sites` → `{ "sites": [...] }`.
pub fn sites(raw: Value) -> Payload<Vec<Site>> {
    listed(raw, "sites")
}

/// `GET /configuration/v2/groups` → `{ "data": [["g1"], ["g2"]] }`.
///
/// Each entry is a one-element list; bare strings are accepted as well.
pub fn group_page(raw: Value) -> Payload<Page<String>> {
    let total = raw
        .get("total")
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok());
    let Some(rows) = raw.get("data").and_then(Value::as_array) else {
        return Payload::Malformed(raw);
    };
    let names = rows
        .iter()
        .filter_map(|row| match row {
            Value::String(name) => Some(name.clone()),
            Value::Array(cols) => cols.first().and_then(Value::as_str).map(str::to_owned),
            _ => None,
        })
        .collect();
    Payload::Parsed(Page {
        items: names,
        total,
    })
}

/// `GET /monitoring/v2/aps` → `{ "aps": [...], "total": n }`.
pub fn monitoring_page(raw: Value) -> Payload<Page<MonitoredAp>> {
    paged(raw, "aps")
}

/// `GET /platform/device_inventory/v1/devices` → `{ "devices": [...], "total": n }`.
pub fn inventory_page(raw: Value) -> Payload<Page<InventoryDevice>> {
    paged(raw, "devices")
}

/// `GET /platform/licensing/v1/subscriptions` → `{ "subscriptions": [...] }`.
///
/// A `status` key in the response means the account has no subscription
/// information.
pub fn subscriptions(raw: Value) -> Payload<Vec<Subscription>> {
    if raw.get("status").is_some() {
        return Payload::Malformed(raw);
    }
    listed(raw, "subscriptions")
}

// ── Per-device payloads ─────────────────────────────────────────────

/// `GET /configuration/v1/ap_settings_cli/{serial}` → list of text lines.
pub fn settings_lines(raw: Value) -> Payload<Vec<String>> {
    match raw {
        Value::Array(lines) => Payload::Parsed(
            lines
                .iter()
                .map(|line| match line {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => Payload::Malformed(other),
    }
}

/// `GET /configuration/v1/devices/{serial}/configuration` → raw text.
///
/// Anything that is not text (an error mapping, typically) is dumped as
/// pretty-printed JSON so the report still shows what came back.
pub fn configuration_text(raw: &Value) -> String {
    match raw {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

// ── Group payloads ──────────────────────────────────────────────────

/// `GET /configuration/v1/dot11a_radio_profiles/{group}` → list of mappings.
pub fn rf_profiles(raw: Value) -> Payload<Vec<RfProfile>> {
    match raw {
        Value::Array(values) => Payload::Parsed(
            values
                .iter()
                .filter_map(Value::as_object)
                .map(RfProfile::from_map)
                .collect(),
        ),
        other => Payload::Malformed(other),
    }
}

/// `GET /configuration/full_wlan/{group}` → JSON encoded in a string,
/// `{ "wlans": [...] }`. An object response is the server's error mapping.
pub fn wlans(raw: Value) -> Payload<Vec<Wlan>> {
    let decoded: Value = match raw {
        Value::String(text) => match serde_json::from_str(&text) {
            Ok(v) => v,
            Err(_) => return Payload::Malformed(Value::String(text)),
        },
        other => return Payload::Malformed(other),
    };
    match decoded.get("wlans").and_then(Value::as_array) {
        Some(values) => Payload::Parsed(
            values
                .iter()
                .filter_map(Value::as_object)
                .map(Wlan::from_map)
                .collect(),
        ),
        None => Payload::Malformed(decoded),
    }
}

// ── VisualRF ────────────────────────────────────────────────────────

pub fn campuses(raw: Value) -> Payload<Vec<Campus>> {
    listed(raw, "campus")
}

pub fn buildings(raw: Value) -> Payload<Vec<Building>> {
    listed(raw, "buildings")
}

pub fn floors(raw: Value) -> Payload<Vec<Floor>> {
    listed(raw, "floors")
}

pub fn ap_locations(raw: Value) -> Payload<Vec<ApLocation>> {
    listed(raw, "access_points")
}

/// Floor image endpoint → base64 text.
pub fn floor_image(raw: Value) -> Payload<String> {
    match raw {
        Value::String(encoded) => Payload::Parsed(encoded),
        other => Payload::Malformed(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn group_names_flatten_nested_rows() {
        let page = group_page(json!({ "data": [["default"], ["branch"], "lab"] }))
            .parsed()
            .unwrap();
        assert_eq!(page.items, vec!["default", "branch", "lab"]);
        assert_eq!(page.total, None);
    }

    #[test]
    fn monitoring_page_skips_records_without_serial() {
        let page = monitoring_page(json!({
            "aps": [{ "serial": "SN1", "name": "a" }, { "name": "no-serial" }],
            "total": 2
        }))
        .parsed()
        .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.total, Some(2));
    }

    #[test]
    fn wlans_decode_json_encoded_string() {
        let raw = Value::String(r#"{"wlans":[{"name":"corp","vlan":{"value":"10"}}]}"#.into());
        let wlans = wlans(raw).parsed().unwrap();
        assert_eq!(wlans.len(), 1);
        assert_eq!(wlans[0].name, "corp");
    }

    #[test]
    fn rf_profile_settings_keep_payload_key_order() {
        let raw: Value = serde_json::from_str(
            r#"[{"profile_name":"default","min_tx_power":9,"band":"5GHz"}]"#,
        )
        .unwrap();
        let profiles = rf_profiles(raw).parsed().unwrap();
        let keys: Vec<&str> = profiles[0].settings.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["profile_name", "min_tx_power", "band"]);
    }

    #[test]
    fn wlan_settings_keep_payload_key_order() {
        let raw = Value::String(
            r#"{"wlans":[{"name":"corp","vlan":{"value":"10"},"essid":"CORP","auth":"wpa3"}]}"#
                .into(),
        );
        let wlans = wlans(raw).parsed().unwrap();
        let keys: Vec<&str> = wlans[0].settings.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["name", "vlan", "essid", "auth"]);
    }

    #[test]
    fn wlans_error_mapping_is_malformed() {
        let payload = wlans(json!({ "description": "Group not found" }));
        let err = payload.into_result("/configuration/full_wlan/x").unwrap_err();
        assert!(err.to_string().contains("Group not found"), "{err}");
    }

    #[test]
    fn subscriptions_status_key_means_no_information() {
        assert!(subscriptions(json!({ "status": "Failed" })).is_malformed());
        assert!(
            subscriptions(json!({ "subscriptions": [] }))
                .parsed()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn settings_lines_require_a_list() {
        assert!(settings_lines(json!({ "detail": "not found" })).is_malformed());
        let lines = settings_lines(json!(["a", "b"])).parsed().unwrap();
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn configuration_text_passes_text_through() {
        assert_eq!(configuration_text(&json!("line 1\nline 2")), "line 1\nline 2");
        assert_eq!(configuration_text(&Value::Null), "");
        assert!(configuration_text(&json!({ "detail": "x" })).contains("\"detail\""));
    }
}
