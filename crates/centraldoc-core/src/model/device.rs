// ── Device domain types ──

use serde::{Deserialize, Serialize};

use super::{lenient_list, lenient_text};

/// One radio on an access point, as reported by the monitoring snapshot.
///
/// Only the attributes shown in reports are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadioInterface {
    #[serde(default, deserialize_with = "lenient_text")]
    pub index: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub macaddr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub radio_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub radio_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub spatial_stream: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tx_power: Option<String>,
}

impl RadioInterface {
    /// The attributes rendered in the radio table, in display order.
    pub fn attributes(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("macaddr", self.macaddr.as_deref()),
            ("radio_name", self.radio_name.as_deref()),
            ("radio_type", self.radio_type.as_deref()),
            ("spatial_stream", self.spatial_stream.as_deref()),
            ("tx_power", self.tx_power.as_deref()),
        ]
    }
}

/// Access point entry from `GET /monitoring/v2/aps`.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitoredAp {
    pub serial: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub site: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub group_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub macaddr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub mesh_role: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ip_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub public_ip_address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub firmware_version: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub ssid_count: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(default)]
    pub radios: Option<Vec<RadioInterface>>,
}

/// The canonical per-device record held in the registry.
///
/// Assembled incrementally from several endpoints; every attribute except
/// the serial is optional because any single source may omit it. A record
/// with no name or site yet is a stub, rendered with empty placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub serial: String,

    // Monitoring snapshot
    pub name: Option<String>,
    pub site: Option<String>,
    pub group: Option<String>,
    pub model: Option<String>,
    pub macaddr: Option<String>,
    pub mesh_role: Option<String>,
    pub ip_address: Option<String>,
    pub public_ip_address: Option<String>,
    pub firmware_version: Option<String>,
    pub ssid_count: Option<String>,
    pub labels: Option<Vec<String>>,
    pub notes: Option<String>,
    pub radios: Option<Vec<RadioInterface>>,

    // Per-device settings
    pub rf_zone: Option<String>,

    // Device inventory
    pub part_number: Option<String>,
    pub device_type: Option<String>,
    pub subscription_key: Option<String>,
    pub tier: Option<String>,
}

/// Copy every field that is present in `$from` over `$into`.
macro_rules! overlay_present {
    ($into:ident, $from:ident, $($field:ident),+ $(,)?) => {
        $(
            if $from.$field.is_some() {
                $into.$field = $from.$field;
            }
        )+
    };
}

impl DeviceRecord {
    /// An empty record that carries only its identity.
    pub fn stub(serial: impl Into<String>) -> Self {
        Self {
            serial: serial.into(),
            ..Self::default()
        }
    }

    /// Name used for display and ordering; empty for stubs.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Site used for display; empty when unknown.
    pub fn display_site(&self) -> &str {
        self.site.as_deref().unwrap_or("")
    }

    /// Non-destructive merge: fields present in `newer` win, fields absent
    /// in `newer` leave the existing value alone.
    pub fn merge(&mut self, newer: DeviceRecord) {
        debug_assert_eq!(self.serial, newer.serial, "merge across serials");
        overlay_present!(
            self,
            newer,
            name,
            site,
            group,
            model,
            macaddr,
            mesh_role,
            ip_address,
            public_ip_address,
            firmware_version,
            ssid_count,
            labels,
            notes,
            radios,
            rf_zone,
            part_number,
            device_type,
            subscription_key,
            tier,
        );
    }
}

impl From<MonitoredAp> for DeviceRecord {
    fn from(ap: MonitoredAp) -> Self {
        Self {
            serial: ap.serial,
            name: ap.name,
            site: ap.site,
            group: ap.group_name,
            model: ap.model,
            macaddr: ap.macaddr,
            mesh_role: ap.mesh_role,
            ip_address: ap.ip_address,
            public_ip_address: ap.public_ip_address,
            firmware_version: ap.firmware_version,
            ssid_count: ap.ssid_count,
            labels: ap.labels,
            notes: ap.notes,
            radios: ap.radios,
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn monitored_ap_tolerates_mixed_scalar_types() {
        let ap: MonitoredAp = serde_json::from_value(json!({
            "serial": "CNF7JSS9L1",
            "name": "hq-ap-01",
            "ssid_count": 3,
            "labels": ["lobby", 7],
            "radios": [{ "index": 0, "tx_power": 18, "spatial_stream": "2x2:2", "band": 1 }]
        }))
        .unwrap();

        assert_eq!(ap.ssid_count.as_deref(), Some("3"));
        assert_eq!(ap.labels, Some(vec!["lobby".to_owned(), "7".to_owned()]));
        let radio = &ap.radios.as_ref().unwrap()[0];
        assert_eq!(radio.index.as_deref(), Some("0"));
        assert_eq!(radio.tx_power.as_deref(), Some("18"));
    }

    #[test]
    fn merge_keeps_fields_absent_from_newer_record() {
        let mut record = DeviceRecord {
            name: Some("ap-1".into()),
            site: Some("HQ".into()),
            ..DeviceRecord::stub("SN1")
        };
        record.merge(DeviceRecord {
            part_number: Some("R4W02A".into()),
            ..DeviceRecord::stub("SN1")
        });

        assert_eq!(record.name.as_deref(), Some("ap-1"));
        assert_eq!(record.site.as_deref(), Some("HQ"));
        assert_eq!(record.part_number.as_deref(), Some("R4W02A"));
    }

    #[test]
    fn merge_lets_newer_value_win_on_overlap() {
        let mut record = DeviceRecord {
            model: Some("AP-505".into()),
            ..DeviceRecord::stub("SN1")
        };
        record.merge(DeviceRecord {
            model: Some("AP-515".into()),
            ..DeviceRecord::stub("SN1")
        });
        assert_eq!(record.model.as_deref(), Some("AP-515"));
    }

    #[test]
    fn stub_displays_empty_placeholders() {
        let stub = DeviceRecord::stub("SN9");
        assert_eq!(stub.display_name(), "");
        assert_eq!(stub.display_site(), "");
        assert_eq!(stub.rf_zone, None);
        assert_eq!(stub.part_number, None);
    }
}
