//! Output formatting for the run summary: table, JSON, YAML.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use centraldoc_core::{BatchSummary, FloorplanExport, ReportOutcome, ReportStatus};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

// ── Rows ─────────────────────────────────────────────────────────────

#[derive(Tabled)]
struct ReportRow {
    #[tabled(rename = "Report")]
    kind: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "File")]
    file: String,
}

#[derive(Tabled)]
struct FloorRow {
    #[tabled(rename = "Floor")]
    floor: String,
    #[tabled(rename = "Floor ID")]
    floor_id: String,
    #[tabled(rename = "APs")]
    aps: usize,
}

fn report_row(outcome: &ReportOutcome, color: bool) -> ReportRow {
    let (status, file) = match &outcome.status {
        ReportStatus::Written { docx, pdf } => (
            paint("written", color, |s| s.green().to_string()),
            pdf.as_deref().unwrap_or(docx).display().to_string(),
        ),
        ReportStatus::Skipped { reason } => (
            paint("skipped", color, |s| s.yellow().to_string()),
            reason.clone(),
        ),
        ReportStatus::Failed { reason } => (
            paint("failed", color, |s| s.red().to_string()),
            reason.clone(),
        ),
    };
    ReportRow {
        kind: outcome.kind.to_string(),
        target: outcome.target.clone(),
        status,
        file,
    }
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color { style(text) } else { text.to_owned() }
}

// ── Renderers ────────────────────────────────────────────────────────

pub fn render_summary(
    format: &OutputFormat,
    summary: &BatchSummary,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<ReportRow> = summary
                .reports
                .iter()
                .map(|r| report_row(r, color))
                .collect();
            Ok(format!(
                "{}\n{} written, {} failed, {} devices",
                render_table(&rows),
                summary.written(),
                summary.failed(),
                summary.registry.len()
            ))
        }
        OutputFormat::Json => render_json(summary),
        OutputFormat::Yaml => render_yaml(summary),
    }
}

pub fn render_floorplans(
    format: &OutputFormat,
    export: &FloorplanExport,
    images_dir: &Path,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<FloorRow> = export
                .floors
                .iter()
                .map(|(name, placement)| FloorRow {
                    floor: name.clone(),
                    floor_id: placement.floor_id.clone(),
                    aps: placement.aps.len(),
                })
                .collect();
            Ok(format!(
                "{}\n{} image(s) saved to {}",
                render_table(&rows),
                export.images.len(),
                images_dir.display()
            ))
        }
        OutputFormat::Json => render_json(export),
        OutputFormat::Yaml => render_yaml(export),
    }
}

pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_json::to_string_pretty(data).map_err(|e| CliError::Render(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Render(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::path::PathBuf;

    use centraldoc_core::ReportKind;

    use super::*;

    fn summary() -> BatchSummary {
        BatchSummary {
            reports: vec![
                ReportOutcome {
                    kind: ReportKind::Site,
                    target: "HQ".into(),
                    status: ReportStatus::Written {
                        docx: PathBuf::from("docx/HQ.docx"),
                        pdf: None,
                    },
                },
                ReportOutcome {
                    kind: ReportKind::WlanGroup,
                    target: "branch".into(),
                    status: ReportStatus::Failed {
                        reason: "Group not found".into(),
                    },
                },
            ],
            ..BatchSummary::default()
        }
    }

    #[test]
    fn table_lists_one_row_per_report() {
        let out = render_summary(&OutputFormat::Table, &summary(), false).unwrap();
        assert!(out.contains("docx/HQ.docx"));
        assert!(out.contains("wlan_group"));
        assert!(out.contains("1 written, 1 failed"));
    }

    #[test]
    fn json_flattens_status() {
        let out = render_summary(&OutputFormat::Json, &summary(), false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["reports"][0]["status"], "written");
        assert_eq!(value["reports"][1]["kind"], "wlan_group");
        assert_eq!(value["reports"][1]["reason"], "Group not found");
    }
}
