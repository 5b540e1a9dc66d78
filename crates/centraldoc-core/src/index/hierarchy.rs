// ── Site/group membership ──
//
// Built once per run from the monitoring snapshot. Membership lists hold
// serials in display-name order; the records themselves live in the
// registry.

use std::collections::BTreeMap;

use tracing::debug;

use crate::model::{DeviceRecord, MonitoredAp};

use super::registry::Registry;
use super::sort::ordered_positions;

#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    sites: BTreeMap<String, Vec<String>>,
    groups: BTreeMap<String, Vec<String>>,
    registry: Registry,
}

fn push_member(index: &mut BTreeMap<String, Vec<String>>, key: &str, serial: &str) {
    let members = index.entry(key.to_owned()).or_default();
    if !members.iter().any(|s| s == serial) {
        members.push(serial.to_owned());
    }
}

impl Hierarchy {
    /// Index one monitoring snapshot.
    ///
    /// Devices are visited in display-name order (ties in snapshot order) so
    /// every membership list comes out sorted.
    pub fn index_snapshot(aps: Vec<MonitoredAp>) -> Self {
        let order = ordered_positions(&aps, |ap| ap.name.clone().unwrap_or_default());
        let mut slots: Vec<Option<MonitoredAp>> = aps.into_iter().map(Some).collect();
        let mut hierarchy = Self::default();

        for idx in order {
            let Some(ap) = slots[idx].take() else {
                continue;
            };
            let record = DeviceRecord::from(ap);

            match record.site.as_deref() {
                Some(site) => push_member(&mut hierarchy.sites, site, &record.serial),
                None => debug!(serial = %record.serial, "device has no site assignment"),
            }
            if let Some(group) = record.group.as_deref() {
                push_member(&mut hierarchy.groups, group, &record.serial);
            }

            hierarchy.registry.upsert(record);
        }

        hierarchy
    }

    /// Site names present in the snapshot, ascending.
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn has_site(&self, site: &str) -> bool {
        self.sites.contains_key(site)
    }

    /// Serials assigned to `site`, in display order.
    pub fn site_members(&self, site: &str) -> &[String] {
        self.sites.get(site).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn group_members(&self, group: &str) -> &[String] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or_default()
    }

    /// Records assigned to `site`, in display order.
    pub fn devices_in_site(&self, site: &str) -> Vec<&DeviceRecord> {
        self.site_members(site)
            .iter()
            .filter_map(|serial| self.registry.get(serial))
            .collect()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn into_registry(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn aps(value: serde_json::Value) -> Vec<MonitoredAp> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn site_members_follow_display_name_order() {
        let hierarchy = Hierarchy::index_snapshot(aps(json!([
            { "serial": "BB", "name": "zeta", "site": "S1", "group_name": "g" },
            { "serial": "AA", "name": "alpha", "site": "S1", "group_name": "g" },
            { "serial": "CC", "name": "mid", "site": "S2", "group_name": "g" }
        ])));

        assert_eq!(hierarchy.site_members("S1"), ["AA", "BB"]);
        assert_eq!(hierarchy.site_members("S2"), ["CC"]);
        assert_eq!(hierarchy.group_members("g"), ["AA", "CC", "BB"]);
        assert_eq!(hierarchy.site_names().collect::<Vec<_>>(), vec!["S1", "S2"]);
    }

    #[test]
    fn devices_without_site_stay_in_registry() {
        let hierarchy = Hierarchy::index_snapshot(aps(json!([
            { "serial": "AA", "name": "a", "site": "S1" },
            { "serial": "XX", "name": "x" }
        ])));

        assert_eq!(hierarchy.registry().len(), 2);
        assert!(hierarchy.registry().contains("XX"));
        assert_eq!(hierarchy.site_members("S1"), ["AA"]);
    }

    #[test]
    fn unknown_site_has_no_members() {
        let hierarchy = Hierarchy::index_snapshot(Vec::new());
        assert!(hierarchy.site_members("nowhere").is_empty());
        assert!(!hierarchy.has_site("nowhere"));
    }
}
