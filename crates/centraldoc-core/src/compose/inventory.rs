// Consolidated reports: licensing subscriptions and device inventory.

use crate::document::{Cell, ComposedDocument, Paragraph, Style, Table};
use crate::index::{Registry, ordered_positions};
use crate::model::Subscription;
use crate::model::subscription::format_epoch_millis;

use super::ReportContext;

const SUBSCRIPTION_COLUMNS: [&str; 8] = [
    "SKU",
    "License Type",
    "Quantity",
    "Available",
    "Active",
    "Subscription Key",
    "Start Date",
    "End Date",
];

const INVENTORY_COLUMNS: [&str; 7] = [
    "Part No",
    "Device type",
    "MAC Address",
    "Model",
    "Serial",
    "Subscription Key",
    "Tier",
];

fn body(value: Option<&str>) -> Cell {
    Cell::text(value.unwrap_or_default(), Style::TableBody)
}

/// Subscriptions ordered by SKU; evaluation licenses are left out.
pub fn compose_subscriptions_report(
    ctx: &ReportContext,
    subscriptions: &[Subscription],
) -> ComposedDocument {
    let mut doc = ctx.cover("Subscriptions");
    doc.paragraph(Paragraph::styled("Subscriptions", Style::Heading));

    let mut table = Table::new();
    table.push_header(&SUBSCRIPTION_COLUMNS);
    for idx in ordered_positions(subscriptions, |s| s.display_sku().to_owned()) {
        let sub = &subscriptions[idx];
        if sub.is_evaluation() {
            continue;
        }
        table.push_row(vec![
            body(sub.sku.as_deref()),
            body(sub.license_type.as_deref()),
            body(sub.quantity.as_deref()),
            body(sub.available.as_deref()),
            body(sub.active.as_deref()),
            body(sub.subscription_key.as_deref()),
            Cell::text(format_epoch_millis(sub.start_date), Style::TableBody),
            Cell::text(format_epoch_millis(sub.end_date), Style::TableBody),
        ]);
    }
    doc.table(table);
    doc
}

/// Every registry record ordered by display name. Each device takes two
/// rows: name and site, then the inventory details.
pub fn compose_inventory_report(
    ctx: &ReportContext,
    registry: &Registry,
    total: usize,
) -> ComposedDocument {
    let mut doc = ctx.cover("Device Inventory");
    doc.paragraph(Paragraph::styled("Device Inventory", Style::Heading));
    doc.paragraph(Paragraph::styled(
        format!("Total devices: {total}"),
        Style::Heading,
    ));

    let mut table = Table::new();
    table.push_header(&INVENTORY_COLUMNS);
    for record in registry.sorted_by_name() {
        table.push_row(vec![
            Cell::text(format!("\n{}", record.display_name()), Style::TableBody).spanning(4),
            Cell::text(format!("\n{}", record.display_site()), Style::TableBody).spanning(3),
        ]);
        table.push_row(vec![
            body(record.part_number.as_deref()),
            body(record.device_type.as_deref()),
            body(record.macaddr.as_deref()),
            body(record.model.as_deref()),
            Cell::text(record.serial.as_str(), Style::TableBody),
            body(record.subscription_key.as_deref()),
            body(record.tier.as_deref()),
        ]);
    }
    doc.table(table);
    doc
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compose::fixtures::context;
    use crate::document::Block;
    use crate::model::DeviceRecord;

    fn only_table(doc: &ComposedDocument) -> &Table {
        doc.blocks()
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t),
                _ => None,
            })
            .unwrap()
    }

    fn sub(sku: &str) -> Subscription {
        Subscription {
            sku: Some(sku.into()),
            start_date: Some(1_709_640_000_000),
            ..Subscription::default()
        }
    }

    #[test]
    fn subscriptions_skip_evaluation_and_sort_by_sku() {
        let doc = compose_subscriptions_report(
            &context(),
            &[sub("Q9Y62AAE"), sub("JZ493EVAL"), sub("Q9Y59AAE")],
        );
        let rows = only_table(&doc).text_rows();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], SUBSCRIPTION_COLUMNS.to_vec());
        assert_eq!(rows[1][0], "Q9Y59AAE");
        assert_eq!(rows[1][6], "05.03.2024");
        assert_eq!(rows[2][0], "Q9Y62AAE");
    }

    #[test]
    fn inventory_lists_stubs_with_empty_name_and_site() {
        let registry: Registry = [
            DeviceRecord {
                name: Some("beta".into()),
                site: Some("HQ".into()),
                ..DeviceRecord::stub("BB")
            },
            DeviceRecord {
                part_number: Some("R4W02A".into()),
                ..DeviceRecord::stub("ZZ")
            },
        ]
        .into_iter()
        .collect();

        let doc = compose_inventory_report(&context(), &registry, 2);
        let table = only_table(&doc);
        let rows = table.text_rows();

        assert!(doc.paragraph_texts().contains(&"Total devices: 2"));
        // Stub sorts first on its empty name.
        assert_eq!(rows[1], vec!["\n", "\n"]);
        assert_eq!(rows[2][0], "R4W02A");
        assert_eq!(rows[2][4], "ZZ");
        assert_eq!(rows[3], vec!["\nbeta", "\nHQ"]);
        assert_eq!(table.rows[3][0].span, 4);
        assert_eq!(table.rows[3][1].span, 3);
    }
}
