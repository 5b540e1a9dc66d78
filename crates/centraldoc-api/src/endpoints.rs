// Central REST endpoint paths
//
// Paths are kept as plain builders so the fetch layer, the tests, and the
// scripted data sources all agree on the exact strings.

pub const SITES: &str = "/central/v2/sites";
pub const GROUPS: &str = "/configuration/v2/groups";
pub const MONITORING_APS: &str = "/monitoring/v2/aps";
pub const SUBSCRIPTIONS: &str = "/platform/licensing/v1/subscriptions";
pub const DEVICE_INVENTORY: &str = "/platform/device_inventory/v1/devices";

const VISUALRF: &str = "/visualrf_api/v1";

/// `GET /configuration/v1/ap_settings_cli/{serial}` -- per-AP CLI settings lines.
pub fn ap_settings(serial: &str) -> String {
    format!("/configuration/v1/ap_settings_cli/{serial}")
}

/// `GET /configuration/v1/devices/{serial}/configuration` -- raw running config.
pub fn device_configuration(serial: &str) -> String {
    format!("/configuration/v1/devices/{serial}/configuration")
}

/// `GET /configuration/v1/dot11a_radio_profiles/{group}` -- 5 GHz RF profiles.
pub fn rf_profiles(group: &str) -> String {
    format!("/configuration/v1/dot11a_radio_profiles/{group}")
}

/// `GET /configuration/full_wlan/{group}` -- every WLAN in a group.
pub fn full_wlan(group: &str) -> String {
    format!("/configuration/full_wlan/{group}")
}

// ── VisualRF ─────────────────────────────────────────────────────────

pub fn campuses() -> String {
    format!("{VISUALRF}/campus")
}

pub fn campus(campus_id: &str) -> String {
    format!("{VISUALRF}/campus/{campus_id}")
}

pub fn building(building_id: &str) -> String {
    format!("{VISUALRF}/building/{building_id}")
}

pub fn floor_image(floor_id: &str) -> String {
    format!("{VISUALRF}/floor/{floor_id}/image")
}

pub fn floor_ap_locations(floor_id: &str) -> String {
    format!("{VISUALRF}/floor/{floor_id}/access_point_location")
}
