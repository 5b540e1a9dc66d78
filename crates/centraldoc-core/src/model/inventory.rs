// ── Device inventory ──

use serde::Deserialize;

use super::device::DeviceRecord;
use super::lenient_text;

/// Device entry from `GET /platform/device_inventory/v1/devices`.
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryDevice {
    pub serial: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub aruba_part_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub device_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub macaddr: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subscription_key: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tier_type: Option<String>,
}

impl From<InventoryDevice> for DeviceRecord {
    fn from(d: InventoryDevice) -> Self {
        Self {
            serial: d.serial,
            part_number: d.aruba_part_no,
            device_type: d.device_type,
            macaddr: d.macaddr,
            model: d.model,
            subscription_key: d.subscription_key,
            tier: d.tier_type,
            ..Self::default()
        }
    }
}
