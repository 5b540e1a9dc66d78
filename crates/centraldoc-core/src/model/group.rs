// ── Configuration group payloads ──
//
// RF and WLAN profiles are rendered field-by-field, so they stay as
// key/value lists in payload order rather than typed structs.

use serde_json::{Map, Value};

use super::display_value;

/// One 5 GHz radio profile from a configuration group.
#[derive(Debug, Clone, PartialEq)]
pub struct RfProfile {
    pub settings: Vec<(String, String)>,
}

impl RfProfile {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            settings: map
                .iter()
                .map(|(k, v)| (k.clone(), display_value(v)))
                .collect(),
        }
    }
}

/// One WLAN from a configuration group.
///
/// Settings may be nested as `{ "value": ... }` objects; those are unwrapped
/// to their inner value.
#[derive(Debug, Clone, PartialEq)]
pub struct Wlan {
    pub name: String,
    pub settings: Vec<(String, String)>,
}

impl Wlan {
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let name = map.get("name").map(display_value).unwrap_or_default();
        let settings = map
            .iter()
            .map(|(k, v)| {
                let shown = match v {
                    Value::Object(inner) => inner.get("value").map_or_else(
                        || display_value(v),
                        display_value,
                    ),
                    other => display_value(other),
                };
                (k.clone(), shown)
            })
            .collect();
        Self { name, settings }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn wlan_unwraps_nested_value_objects() {
        let raw = json!({
            "name": "corp",
            "vlan": { "value": "10", "inherited": false },
            "opmode": "wpa3-aes-ccm-128"
        });
        let wlan = Wlan::from_map(raw.as_object().expect("object"));

        assert_eq!(wlan.name, "corp");
        assert!(wlan.settings.contains(&("vlan".into(), "10".into())));
        assert!(
            wlan.settings
                .contains(&("opmode".into(), "wpa3-aes-ccm-128".into()))
        );
    }
}
