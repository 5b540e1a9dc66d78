// ── Batch orchestrator ──
//
// Drives one documentation run end to end, strictly in sequence:
// subscriptions, per-group RF and WLAN reports, one monitoring snapshot,
// per-site reports (enriching the registry as it goes), then the inventory
// pass and its report. A failing report is recorded and the run moves on;
// only fatal errors (rejected credentials) stop the batch.

use std::path::PathBuf;

use centraldoc_api::{DataSource, endpoints};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::artifacts::ArtifactLookup;
use crate::compose::{
    DeviceDetail, ReportContext, compose_inventory_report, compose_rf_report,
    compose_site_report, compose_subscriptions_report, compose_wlan_report,
};
use crate::config::BatchConfig;
use crate::document::{ComposedDocument, DocumentWriter};
use crate::error::CoreError;
use crate::fetch::Fetcher;
use crate::index::{Hierarchy, Registry, ordered_positions, rf_zone};
use crate::model::{DeviceRecord, Site};
use crate::payload::{self, Payload};

/// Kind of report produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReportKind {
    Subscriptions,
    RfGroup,
    WlanGroup,
    Site,
    Inventory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportStatus {
    Written {
        docx: PathBuf,
        pdf: Option<PathBuf>,
    },
    Skipped {
        reason: String,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    pub kind: ReportKind,
    pub target: String,
    #[serde(flatten)]
    pub status: ReportStatus,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub reports: Vec<ReportOutcome>,
    /// Final merged device registry.
    #[serde(skip)]
    pub registry: Registry,
}

impl BatchSummary {
    pub fn written(&self) -> usize {
        self.count(|s| matches!(s, ReportStatus::Written { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, ReportStatus::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ReportStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.status)).count()
    }

    pub fn outcome(&self, kind: ReportKind, target: &str) -> Option<&ReportOutcome> {
        self.reports
            .iter()
            .find(|r| r.kind == kind && r.target == target)
    }
}

/// Groups and sites to document, resolved once per run.
#[derive(Debug, Clone, Default)]
struct ResolvedSelection {
    groups: Vec<String>,
    sites: Vec<Site>,
}

/// Replace characters that would escape the output directory.
fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' => '_',
            other => other,
        })
        .collect()
}

/// One documentation run over a data source.
pub struct Batch<S, W, A> {
    fetcher: Fetcher<S>,
    writer: W,
    artifacts: A,
    config: BatchConfig,
    context: ReportContext,
}

impl<S, W, A> Batch<S, W, A>
where
    S: DataSource + Sync,
    W: DocumentWriter,
    A: ArtifactLookup,
{
    pub fn new(
        fetcher: Fetcher<S>,
        writer: W,
        artifacts: A,
        config: BatchConfig,
        context: ReportContext,
    ) -> Self {
        Self {
            fetcher,
            writer,
            artifacts,
            config,
            context,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn fetcher(&self) -> &Fetcher<S> {
        &self.fetcher
    }

    /// Run the whole batch.
    pub async fn run(&self) -> Result<BatchSummary, CoreError> {
        let selection = self.resolve_selection().await?;
        let mut reports = Vec::new();

        info!(groups = ?selection.groups, "Write documentation for following group(s)");
        let status = self.subscriptions_report().await;
        reports.push(settle(ReportKind::Subscriptions, "subscriptions", status)?);

        for group in &selection.groups {
            info!(group = %group, "Working on group");
            let status = self.rf_report(group).await;
            reports.push(settle(ReportKind::RfGroup, group, status)?);
            let status = self.wlan_report(group).await;
            reports.push(settle(ReportKind::WlanGroup, group, status)?);
        }

        let hierarchy = self.monitoring_snapshot().await?;
        for site in hierarchy.site_names() {
            if !selection.sites.iter().any(|s| s.site_name == site) {
                warn!(site, "site in monitoring snapshot is not selected, skipping");
            }
        }
        for group in hierarchy.group_names() {
            let devices = hierarchy.group_members(group).len();
            if selection.groups.iter().any(|g| g == group) {
                info!(group, devices, "group devices in monitoring snapshot");
            } else {
                warn!(group, devices, "group in monitoring snapshot is not selected");
            }
        }

        let mut registry = hierarchy.registry().clone();
        let site_names: Vec<&str> = selection.sites.iter().map(|s| s.site_name.as_str()).collect();
        info!(sites = ?site_names, "Write documentation for following site(s)");

        for idx in ordered_positions(&selection.sites, |s| s.site_name.clone()) {
            let site = &selection.sites[idx];
            if !hierarchy.has_site(&site.site_name) {
                info!(site = %site.site_name, "site has no devices in monitoring snapshot");
                reports.push(ReportOutcome {
                    kind: ReportKind::Site,
                    target: site.site_name.clone(),
                    status: ReportStatus::Skipped {
                        reason: "no devices in monitoring snapshot".into(),
                    },
                });
                continue;
            }

            info!(site = %site.site_name, "Processed site");
            let details = self.enrich(hierarchy.devices_in_site(&site.site_name)).await?;
            registry = registry.merge(details.iter().map(|d| d.record.clone()).collect());
            info!(
                site = %site.site_name,
                registry = registry.len(),
                "Adding APs to list"
            );

            let status = self.site_report(site, &details).await;
            reports.push(settle(ReportKind::Site, &site.site_name, status)?);
        }

        let total = self.inventory_pass(&mut registry).await?;
        let status = self.inventory_report(&registry, total).await;
        reports.push(settle(ReportKind::Inventory, "device_inventory", status)?);

        Ok(BatchSummary { reports, registry })
    }

    // ── Selection ───────────────────────────────────────────────────

    async fn resolve_selection(&self) -> Result<ResolvedSelection, CoreError> {
        let wanted = &self.config.selection;

        let all_sites = match payload::sites(self.fetcher.fetch(endpoints::SITES, &[]).await?) {
            Payload::Parsed(sites) => sites,
            Payload::Malformed(raw) => {
                warn!(payload = %raw, "site listing unavailable, no site reports");
                Vec::new()
            }
        };
        let sites = if wanted.sites.is_empty() {
            all_sites
        } else {
            all_sites
                .into_iter()
                .filter(|s| wanted.sites.contains(&s.site_name))
                .collect()
        };

        let groups = if wanted.groups.is_empty() {
            match self
                .fetcher
                .fetch_paged(
                    endpoints::GROUPS,
                    &[],
                    self.config.paging.groups,
                    payload::group_page,
                )
                .await?
            {
                Payload::Parsed(page) => page.items,
                Payload::Malformed(raw) => {
                    warn!(payload = %raw, "group listing unavailable, no group reports");
                    Vec::new()
                }
            }
        } else {
            wanted.groups.clone()
        };

        Ok(ResolvedSelection { groups, sites })
    }

    // ── Reports ─────────────────────────────────────────────────────

    async fn subscriptions_report(&self) -> Result<ReportStatus, CoreError> {
        let raw = self.fetcher.fetch(endpoints::SUBSCRIPTIONS, &[]).await?;
        let Payload::Parsed(subscriptions) = payload::subscriptions(raw) else {
            info!("No Subscription Information Available");
            return Ok(ReportStatus::Skipped {
                reason: "no subscription information available".into(),
            });
        };
        let doc = compose_subscriptions_report(&self.context, &subscriptions);
        self.write("subscriptions", &doc).await
    }

    async fn rf_report(&self, group: &str) -> Result<ReportStatus, CoreError> {
        let path = endpoints::rf_profiles(group);
        let profiles = payload::rf_profiles(self.fetcher.fetch(&path, &[]).await?)
            .into_result(&path)?;
        let doc = compose_rf_report(&self.context, group, &profiles);
        self.write(&format!("{}_rf_groups", file_stem(group)), &doc)
            .await
    }

    async fn wlan_report(&self, group: &str) -> Result<ReportStatus, CoreError> {
        let path = endpoints::full_wlan(group);
        let wlans = payload::wlans(self.fetcher.fetch(&path, &[]).await?);
        if wlans.is_malformed() {
            error!(group, "No data returned for WLANs on group");
        }
        let wlans = wlans.into_result(&path)?;
        let doc = compose_wlan_report(&self.context, group, &wlans);
        self.write(&format!("{}_wlan_groups", file_stem(group)), &doc)
            .await
    }

    async fn site_report(
        &self,
        site: &Site,
        details: &[DeviceDetail],
    ) -> Result<ReportStatus, CoreError> {
        let doc = compose_site_report(&self.context, site, details, &self.artifacts);
        self.write(&file_stem(&site.site_name), &doc).await
    }

    async fn inventory_report(
        &self,
        registry: &Registry,
        total: usize,
    ) -> Result<ReportStatus, CoreError> {
        let doc = compose_inventory_report(&self.context, registry, total);
        self.write("device_inventory", &doc).await
    }

    /// Save `<stem>.docx` in the output directory and convert it.
    /// Conversion failures are logged and leave the PDF out.
    async fn write(&self, stem: &str, doc: &ComposedDocument) -> Result<ReportStatus, CoreError> {
        let docx = self.config.documents.output_dir.join(format!("{stem}.docx"));
        self.writer.save(doc, &docx)?;

        let pdf = match self.config.documents.conversion.convert(&docx).await {
            Ok(pdf) => pdf,
            Err(e) => {
                warn!(error = %e, "conversion failed, keeping docx only");
                None
            }
        };
        Ok(ReportStatus::Written { docx, pdf })
    }

    // ── Data passes ─────────────────────────────────────────────────

    /// One monitoring snapshot for the whole run.
    async fn monitoring_snapshot(&self) -> Result<Hierarchy, CoreError> {
        let params = [
            ("calculate_total", "true".to_owned()),
            ("calculate_ssid_count", "true".to_owned()),
            ("show_resource_details", "true".to_owned()),
        ];
        let listing = self
            .fetcher
            .fetch_paged(
                endpoints::MONITORING_APS,
                &params,
                self.config.paging.monitoring,
                payload::monitoring_page,
            )
            .await;
        let aps = match listing {
            Ok(Payload::Parsed(page)) => page.items,
            Ok(Payload::Malformed(raw)) => {
                error!(payload = %raw, "No APs returned from Central");
                Vec::new()
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                error!(error = %e, "No APs returned from Central");
                Vec::new()
            }
        };
        info!(devices = aps.len(), "monitoring snapshot indexed");
        Ok(Hierarchy::index_snapshot(aps))
    }

    /// Fetch per-device settings and configuration for `devices`.
    ///
    /// Per-device failures degrade to defaults; only fatal errors escape.
    async fn enrich(&self, devices: Vec<&DeviceRecord>) -> Result<Vec<DeviceDetail>, CoreError> {
        let mut details = Vec::with_capacity(devices.len());
        for record in devices {
            let serial = record.serial.as_str();

            let zone = match self.fetcher.fetch(&endpoints::ap_settings(serial), &[]).await {
                Ok(raw) => rf_zone(&payload::settings_lines(raw).parsed().unwrap_or_default()),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(serial, error = %e, "settings unavailable, using default zone");
                    rf_zone(&[])
                }
            };

            let configuration = match self
                .fetcher
                .fetch(
                    &endpoints::device_configuration(serial),
                    &[("limit", "0".to_owned())],
                )
                .await
            {
                Ok(raw) => payload::configuration_text(&raw),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!(serial, error = %e, "configuration unavailable");
                    String::new()
                }
            };

            let mut enriched = record.clone();
            enriched.merge(DeviceRecord {
                rf_zone: Some(zone),
                ..DeviceRecord::stub(serial)
            });
            details.push(DeviceDetail {
                record: enriched,
                configuration,
            });
        }
        Ok(details)
    }

    /// Merge the paged inventory into `registry`; returns the device total
    /// reported by the inventory endpoint.
    async fn inventory_pass(&self, registry: &mut Registry) -> Result<usize, CoreError> {
        let listing = self
            .fetcher
            .fetch_paged(
                endpoints::DEVICE_INVENTORY,
                &[("sku_type", "all".to_owned())],
                self.config.paging.inventory,
                payload::inventory_page,
            )
            .await;

        match listing {
            Ok(Payload::Parsed(page)) => {
                let total = page.total.unwrap_or(page.items.len());
                registry.apply_inventory(page.items);
                Ok(total)
            }
            Ok(Payload::Malformed(raw)) => {
                warn!(payload = %raw, "device inventory unavailable");
                Ok(registry.len())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(error = %e, "device inventory unavailable");
                Ok(registry.len())
            }
        }
    }
}

/// Turn a report result into an outcome; fatal errors stop the batch.
fn settle(
    kind: ReportKind,
    target: &str,
    result: Result<ReportStatus, CoreError>,
) -> Result<ReportOutcome, CoreError> {
    let status = match result {
        Ok(status) => status,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            error!(%kind, report = target, error = %e, "report failed");
            ReportStatus::Failed {
                reason: e.to_string(),
            }
        }
    };
    Ok(ReportOutcome {
        kind,
        target: target.to_owned(),
        status,
    })
}
