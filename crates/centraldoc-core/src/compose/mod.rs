// ── Report composition ──
//
// Pure functions from indexed data to `ComposedDocument`s. Composition never
// fetches; the only outside lookups are local artifacts, and a missing
// artifact just leaves its section empty.

mod group;
mod inventory;
mod site;

use chrono::{NaiveDate, Utc};

use crate::document::{ComposedDocument, Paragraph, Style};

pub use group::{compose_rf_report, compose_wlan_report};
pub use inventory::{compose_inventory_report, compose_subscriptions_report};
pub use site::{DeviceDetail, compose_device_section, compose_site_report};

/// Fields shared by every report's cover header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub customer_name: String,
    pub document_title: String,
    pub date: NaiveDate,
}

impl ReportContext {
    /// Context dated today (UTC).
    pub fn today(customer_name: impl Into<String>, document_title: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            document_title: document_title.into(),
            date: Utc::now().date_naive(),
        }
    }

    /// Start a document with the cover header for `title`, followed by a
    /// page break.
    pub fn cover(&self, title: &str) -> ComposedDocument {
        let mut doc = ComposedDocument::new();
        doc.paragraph(Paragraph::styled(title, Style::CoverTitle));
        doc.paragraph(Paragraph::styled(
            format!(
                "\n\n{}\n\n{} {}\n\n\n\n",
                self.customer_name,
                self.document_title,
                self.date.format("%Y-%m-%d")
            ),
            Style::CoverSubtitle,
        ));
        doc.page_break();
        doc
    }
}

/// Cover title of the per-group reports.
fn group_title(group: &str) -> String {
    format!("Configuration group\n{group}")
}
