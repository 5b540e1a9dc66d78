// Configuration group reports: 5 GHz RF profiles and WLANs.

use crate::document::{ComposedDocument, Paragraph, Style, Table};
use crate::model::{RfProfile, Wlan};

use super::{ReportContext, group_title};

fn settings_table(settings: &[(String, String)]) -> Table {
    let mut table = Table::new().columns(&[50, 110]);
    for (key, value) in settings {
        table.push_pair(key, value.as_str());
    }
    table
}

/// One section per RF profile of `group`.
pub fn compose_rf_report(
    ctx: &ReportContext,
    group: &str,
    profiles: &[RfProfile],
) -> ComposedDocument {
    let mut doc = ctx.cover(&group_title(group));
    for profile in profiles {
        doc.paragraph(Paragraph::styled(
            format!("RF Group: {group}"),
            Style::Heading,
        ));
        doc.table(settings_table(&profile.settings));
        doc.page_break();
    }
    doc
}

/// One section per WLAN of `group`.
pub fn compose_wlan_report(ctx: &ReportContext, group: &str, wlans: &[Wlan]) -> ComposedDocument {
    let mut doc = ctx.cover(&group_title(group));
    for wlan in wlans {
        doc.paragraph(Paragraph::styled(
            format!("WLAN: {}", wlan.name),
            Style::Heading,
        ));
        doc.table(settings_table(&wlan.settings));
        doc.page_break();
    }
    doc
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::compose::fixtures::context;
    use crate::document::Block;

    #[test]
    fn rf_report_has_one_section_per_profile() {
        let profiles: Vec<RfProfile> = [
            json!({ "name": "default", "min_tx_power": 9 }),
            json!({ "name": "warehouse", "min_tx_power": 12 }),
        ]
        .iter()
        .map(|v| RfProfile::from_map(v.as_object().unwrap()))
        .collect();

        let doc = compose_rf_report(&context(), "branch", &profiles);

        assert_eq!(doc.paragraph_texts()[0], "Configuration group\nbranch");
        let headings = doc
            .paragraph_texts()
            .into_iter()
            .filter(|t| t.starts_with("RF Group:"))
            .count();
        assert_eq!(headings, 2);
        let tables = doc
            .blocks()
            .iter()
            .filter(|b| matches!(b, Block::Table(_)))
            .count();
        assert_eq!(tables, 2);
    }

    #[test]
    fn wlan_report_shows_unwrapped_values() {
        let raw = json!({ "name": "corp", "vlan": { "value": "10" } });
        let wlans = [Wlan::from_map(raw.as_object().unwrap())];

        let doc = compose_wlan_report(&context(), "branch", &wlans);

        assert!(doc.paragraph_texts().contains(&"WLAN: corp"));
        let rows = doc
            .blocks()
            .iter()
            .find_map(|b| match b {
                Block::Table(t) => Some(t.text_rows()),
                _ => None,
            })
            .unwrap();
        assert!(rows.contains(&vec!["vlan:".to_owned(), "10".to_owned()]));
    }

    #[test]
    fn empty_group_yields_cover_only() {
        let doc = compose_wlan_report(&context(), "empty", &[]);
        assert_eq!(doc.len(), 3);
    }
}
