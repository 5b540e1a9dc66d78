// ── Serial-keyed device registry ──
//
// The run's accumulator. Every pass (monitoring, settings, inventory) feeds
// partial `DeviceRecord`s in; records are keyed by serial and merged
// non-destructively, so a field once known is only ever replaced by a newer
// present value.

use indexmap::IndexMap;
use indexmap::map::Entry;

use crate::model::{DeviceRecord, InventoryDevice};

use super::sort::ordered_positions;

/// Merged device records keyed by serial, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    records: IndexMap<String, DeviceRecord>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `record` into the entry for its serial, creating it if needed.
    pub fn upsert(&mut self, record: DeviceRecord) {
        match self.records.entry(record.serial.clone()) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(record),
            Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    /// Fold `other` into `self`, record by record.
    #[must_use]
    pub fn merge(mut self, other: Registry) -> Self {
        for record in other.records.into_values() {
            self.upsert(record);
        }
        self
    }

    /// Merge an inventory listing; unknown serials become stub records
    /// carrying only inventory fields.
    pub fn apply_inventory(&mut self, devices: Vec<InventoryDevice>) {
        for device in devices {
            self.upsert(DeviceRecord::from(device));
        }
    }

    pub fn get(&self, serial: &str) -> Option<&DeviceRecord> {
        self.records.get(serial)
    }

    pub fn contains(&self, serial: &str) -> bool {
        self.records.contains_key(serial)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceRecord> {
        self.records.values()
    }

    /// Records ordered by display name, ties kept in first-seen order.
    pub fn sorted_by_name(&self) -> Vec<&DeviceRecord> {
        let records: Vec<&DeviceRecord> = self.records.values().collect();
        ordered_positions(&records, |r| r.display_name().to_owned())
            .into_iter()
            .map(|idx| records[idx])
            .collect()
    }
}

impl FromIterator<DeviceRecord> for Registry {
    fn from_iter<I: IntoIterator<Item = DeviceRecord>>(iter: I) -> Self {
        let mut registry = Self::new();
        for record in iter {
            registry.upsert(record);
        }
        registry
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn named(serial: &str, name: &str) -> DeviceRecord {
        DeviceRecord {
            name: Some(name.into()),
            ..DeviceRecord::stub(serial)
        }
    }

    #[test]
    fn every_serial_appears_exactly_once() {
        let mut registry: Registry = [named("A", "ap-a"), named("B", "ap-b")].into_iter().collect();
        registry.upsert(named("A", "ap-a-renamed"));
        registry.apply_inventory(vec![InventoryDevice {
            serial: "C".into(),
            aruba_part_no: Some("R4W02A".into()),
            device_type: None,
            macaddr: None,
            model: None,
            subscription_key: None,
            tier_type: None,
        }]);

        assert_eq!(registry.len(), 3);
        let serials: Vec<_> = registry.iter().map(|r| r.serial.as_str()).collect();
        assert_eq!(serials, vec!["A", "B", "C"]);
        assert_eq!(registry.get("A").unwrap().display_name(), "ap-a-renamed");
    }

    #[test]
    fn unknown_inventory_serial_becomes_stub() {
        let mut registry = Registry::new();
        registry.apply_inventory(vec![InventoryDevice {
            serial: "Z".into(),
            aruba_part_no: Some("JZ336A".into()),
            device_type: Some("AP".into()),
            macaddr: None,
            model: None,
            subscription_key: None,
            tier_type: Some("foundation".into()),
        }]);

        let stub = registry.get("Z").unwrap();
        assert_eq!(stub.display_name(), "");
        assert_eq!(stub.display_site(), "");
        assert_eq!(stub.part_number.as_deref(), Some("JZ336A"));
        assert_eq!(stub.tier.as_deref(), Some("foundation"));
    }

    #[test]
    fn merging_registries_is_non_destructive() {
        let left: Registry = [DeviceRecord {
            site: Some("HQ".into()),
            ..named("A", "ap-a")
        }]
        .into_iter()
        .collect();
        let right: Registry = [DeviceRecord {
            rf_zone: Some("warehouse".into()),
            ..DeviceRecord::stub("A")
        }]
        .into_iter()
        .collect();

        let merged = left.merge(right);
        let record = merged.get("A").unwrap();

        assert_eq!(merged.len(), 1);
        assert_eq!(record.display_name(), "ap-a");
        assert_eq!(record.display_site(), "HQ");
        assert_eq!(record.rf_zone.as_deref(), Some("warehouse"));
    }

    #[test]
    fn sorted_by_name_is_stable_for_duplicates() {
        let registry: Registry = [
            named("S1", "lobby"),
            named("S2", "atrium"),
            named("S3", "lobby"),
        ]
        .into_iter()
        .collect();

        let order: Vec<_> = registry
            .sorted_by_name()
            .iter()
            .map(|r| r.serial.as_str())
            .collect();
        assert_eq!(order, vec!["S2", "S1", "S3"]);
    }
}
