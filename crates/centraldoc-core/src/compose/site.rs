// Site reports: summary table, one section per device, appended
// sub-documents.

use tracing::{debug, info};

use crate::artifacts::{ArtifactLookup, ArtifactQuery};
use crate::document::{
    Block, Cell, ComposedDocument, LOCATION_WIDTH_MM, PHOTO_WIDTH_MM, PHOTOS_PER_ROW, Paragraph,
    Picture, Style, Table,
};
use crate::index::DEFAULT_RF_ZONE;
use crate::model::{DeviceRecord, RadioInterface, Site};

use super::ReportContext;

/// A device ready for rendering: its merged record plus the raw
/// configuration dump fetched for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDetail {
    pub record: DeviceRecord,
    pub configuration: String,
}

fn text(value: Option<&str>) -> String {
    value.unwrap_or_default().to_owned()
}

/// Compose the report for one site.
///
/// `devices` must already be in display order.
pub fn compose_site_report(
    ctx: &ReportContext,
    site: &Site,
    devices: &[DeviceDetail],
    artifacts: &impl ArtifactLookup,
) -> ComposedDocument {
    let mut doc = ctx.cover(&site.site_name);

    doc.paragraph(Paragraph::styled(
        format!("Site: {}", site.site_name),
        Style::Heading,
    ));
    let mut summary = Table::new().columns(&[30, 130]);
    summary.push_pair(
        "Number of devices",
        text(site.associated_device_count.as_deref()),
    );
    summary.push_pair("Address", text(site.address.as_deref()));
    summary.push_pair("Post Code", text(site.zipcode.as_deref()));
    summary.push_pair("City", text(site.city.as_deref()));
    summary.push_pair("Country", text(site.country.as_deref()));
    summary.push_pair("Longitude", text(site.longitude.as_deref()));
    summary.push_pair("Latitude", text(site.latitude.as_deref()));
    for device in devices {
        summary.push_pair("AP", device.record.display_name());
    }
    doc.table(summary);
    doc.page_break();

    for device in devices {
        compose_device_section(&mut doc, device, artifacts);
        doc.page_break();
    }

    let sub_documents = artifacts.find_artifacts(&ArtifactQuery::SubDocuments {
        site: site.site_name.clone(),
    });
    if sub_documents.is_empty() {
        debug!(site = %site.site_name, "no sub-documents for site");
    }
    for path in sub_documents {
        info!(site = %site.site_name, document = %path.display(), "appending sub-document");
        doc.push(Block::SubDocument(path));
    }

    doc
}

/// Append the section for one device: settings and radio tables, notes,
/// location images, photos, then the configuration dump on its own page.
pub fn compose_device_section(
    doc: &mut ComposedDocument,
    device: &DeviceDetail,
    artifacts: &impl ArtifactLookup,
) {
    let record = &device.record;
    info!(name = record.display_name(), serial = %record.serial, "Add AP");

    doc.paragraph(Paragraph::styled(
        format!("AP: {}", record.display_name()),
        Style::Heading,
    ));

    let mut layout = Table::new().columns(&[80, 80]);
    layout.push_row(vec![
        Cell::table(settings_table(record)),
        Cell::table(radio_table(record.radios.as_deref().unwrap_or_default())),
    ]);
    doc.table(layout);

    doc.paragraph(Paragraph::styled("Notes: ", Style::TableHead));
    doc.paragraph(Paragraph::styled(
        text(record.notes.as_deref()),
        Style::TableBody,
    ));

    doc.paragraph(Paragraph::styled("Location: ", Style::TableHead));
    let site = record.display_site().to_owned();
    for path in artifacts.find_artifacts(&ArtifactQuery::LocationSnapshots {
        site: site.clone(),
        serial: record.serial.clone(),
    }) {
        doc.push(Block::Picture(Picture {
            path,
            width_mm: LOCATION_WIDTH_MM,
        }));
    }
    doc.paragraph(Paragraph::styled(" ", Style::TableHead));

    let photos = artifacts.find_artifacts(&ArtifactQuery::DevicePhotos {
        site,
        serial: record.serial.clone(),
    });
    for row in photos.chunks(PHOTOS_PER_ROW) {
        doc.push(Block::PictureRow(
            row.iter()
                .map(|path| Picture {
                    path: path.clone(),
                    width_mm: PHOTO_WIDTH_MM,
                })
                .collect(),
        ));
    }

    doc.page_break();
    doc.paragraph(Paragraph::styled("Configuration", Style::TableHead));
    doc.paragraph(Paragraph::monospace(device.configuration.as_str()));
}

fn settings_table(record: &DeviceRecord) -> Table {
    let mut table = Table::new().columns(&[30, 50]);
    table.push_header(&["Parameter", "Value"]);
    table.push_pair("Site", record.display_site());
    table.push_pair("AP Group", text(record.group.as_deref()));
    table.push_pair("AP Model", text(record.model.as_deref()));
    table.push_pair("Serial No", record.serial.as_str());
    table.push_pair(
        "Labels",
        record.labels.as_deref().unwrap_or_default().join(", "),
    );
    table.push_pair("MAC address", text(record.macaddr.as_deref()));
    table.push_pair("Mesh role", text(record.mesh_role.as_deref()));
    table.push_pair("IP address", text(record.ip_address.as_deref()));
    table.push_pair(
        "Public IP address",
        text(record.public_ip_address.as_deref()),
    );
    table.push_pair(
        "Firmware version",
        text(record.firmware_version.as_deref()),
    );
    table.push_pair("SSID count", text(record.ssid_count.as_deref()));
    table.push_pair(
        "RF zone",
        record.rf_zone.as_deref().unwrap_or(DEFAULT_RF_ZONE),
    );
    table
}

fn radio_table(radios: &[RadioInterface]) -> Table {
    let mut table = Table::new().columns(&[20, 60]);
    table.push_header(&["Radio", "Parameter"]);
    for radio in radios {
        let mut attributes = Table::new();
        for (name, value) in radio.attributes() {
            if let Some(value) = value {
                attributes.push_pair(name, value);
            }
        }
        table.push_row(vec![
            Cell::text(
                format!("Radio {}:", radio.index.as_deref().unwrap_or_default()),
                Style::TableHead,
            ),
            Cell::table(attributes),
        ]);
    }
    table
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::compose::fixtures::context;
    use crate::document::CellContent;

    /// Lookup that serves a fixed answer per query kind.
    #[derive(Default)]
    struct Artifacts {
        locations: Vec<PathBuf>,
        photos: Vec<PathBuf>,
        sub_documents: Vec<PathBuf>,
    }

    impl ArtifactLookup for Artifacts {
        fn find_artifacts(&self, query: &ArtifactQuery) -> Vec<PathBuf> {
            match query {
                ArtifactQuery::LocationSnapshots { .. } => self.locations.clone(),
                ArtifactQuery::DevicePhotos { .. } => self.photos.clone(),
                ArtifactQuery::SubDocuments { .. } => self.sub_documents.clone(),
            }
        }
    }

    fn device(serial: &str, name: &str) -> DeviceDetail {
        DeviceDetail {
            record: DeviceRecord {
                name: Some(name.into()),
                site: Some("HQ".into()),
                radios: Some(vec![RadioInterface {
                    index: Some("0".into()),
                    tx_power: Some("18".into()),
                    ..RadioInterface::default()
                }]),
                ..DeviceRecord::stub(serial)
            },
            configuration: "hostname ap\nzonename default".into(),
        }
    }

    fn site() -> Site {
        Site {
            city: Some("Ljubljana".into()),
            associated_device_count: Some("2".into()),
            ..Site::named("HQ")
        }
    }

    #[test]
    fn site_report_orders_sections() {
        let devices = [device("AA", "alpha"), device("BB", "beta")];
        let artifacts = Artifacts {
            sub_documents: vec![PathBuf::from("bom/HQ_bom.docx")],
            ..Artifacts::default()
        };

        let doc = compose_site_report(&context(), &site(), &devices, &artifacts);
        let texts = doc.paragraph_texts();

        assert_eq!(texts[0], "HQ");
        assert_eq!(texts[2], "Site: HQ");
        let alpha = texts.iter().position(|t| *t == "AP: alpha").unwrap();
        let beta = texts.iter().position(|t| *t == "AP: beta").unwrap();
        assert!(alpha < beta);
        assert_eq!(
            doc.blocks().last(),
            Some(&Block::SubDocument(PathBuf::from("bom/HQ_bom.docx")))
        );
    }

    #[test]
    fn summary_table_lists_site_fields_then_devices() {
        let devices = [device("AA", "alpha"), device("BB", "beta")];
        let doc = compose_site_report(&context(), &site(), &devices, &Artifacts::default());

        let summary = doc
            .blocks()
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t.text_rows()),
                _ => None,
            })
            .unwrap();

        assert_eq!(summary[0], vec!["Number of devices:", "2"]);
        assert_eq!(summary[3], vec!["City:", "Ljubljana"]);
        assert_eq!(summary[7], vec!["AP:", "alpha"]);
        assert_eq!(summary[8], vec!["AP:", "beta"]);
    }

    #[test]
    fn device_without_artifacts_still_renders() {
        let mut doc = ComposedDocument::new();
        compose_device_section(&mut doc, &device("AA", "alpha"), &Artifacts::default());

        assert!(
            !doc.blocks()
                .iter()
                .any(|b| matches!(b, Block::Picture(_) | Block::PictureRow(_)))
        );
        let texts = doc.paragraph_texts();
        assert!(texts.contains(&"Configuration"));
        assert_eq!(texts.last(), Some(&"hostname ap\nzonename default"));
    }

    #[test]
    fn photos_are_laid_out_two_per_row() {
        let artifacts = Artifacts {
            locations: vec![PathBuf::from("images/HQ/AA-1_location.png")],
            photos: vec![
                PathBuf::from("images/HQ/AA_1.jpg"),
                PathBuf::from("images/HQ/AA_2.jpg"),
                PathBuf::from("images/HQ/AA_3.jpg"),
            ],
            ..Artifacts::default()
        };
        let mut doc = ComposedDocument::new();
        compose_device_section(&mut doc, &device("AA", "alpha"), &artifacts);

        let rows: Vec<usize> = doc
            .blocks()
            .iter()
            .filter_map(|b| match b {
                Block::PictureRow(row) => Some(row.len()),
                _ => None,
            })
            .collect();
        assert_eq!(rows, vec![2, 1]);
        assert!(doc.blocks().iter().any(|b| matches!(
            b,
            Block::Picture(Picture { width_mm: LOCATION_WIDTH_MM, .. })
        )));
    }

    #[test]
    fn settings_fall_back_to_default_zone_and_filter_radio_fields() {
        let mut doc = ComposedDocument::new();
        compose_device_section(&mut doc, &device("AA", "alpha"), &Artifacts::default());

        let Some(Block::Table(layout)) = doc
            .blocks()
            .iter()
            .find(|b| matches!(b, Block::Table(_)))
        else {
            panic!("device section has no table");
        };
        let [settings_cell, radio_cell] = layout.rows[0].as_slice() else {
            panic!("layout row must have two cells");
        };
        let CellContent::Table(settings) = &settings_cell.content[0] else {
            panic!("settings cell holds no table");
        };
        assert_eq!(
            settings.text_rows().last().unwrap(),
            &vec!["RF zone:".to_owned(), "default".to_owned()]
        );

        let CellContent::Table(radios) = &radio_cell.content[0] else {
            panic!("radio cell holds no table");
        };
        let CellContent::Table(attributes) = &radios.rows[1][1].content[0] else {
            panic!("radio row holds no attribute table");
        };
        assert_eq!(
            attributes.text_rows(),
            vec![vec!["tx_power:".to_owned(), "18".to_owned()]]
        );
    }
}
