//! CLI configuration: thin wrapper around `centraldoc_config`.
//!
//! Loads both JSON files and applies `GlobalOpts` overrides
//! (--customer-name, --document-title, --data-directory).

use std::path::PathBuf;

use tracing::info;

use centraldoc_core::{BatchConfig, ConnectionConfig, Conversion, ReportContext};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Directory for result files and the log; the working directory by default.
pub fn data_directory(global: &GlobalOpts) -> PathBuf {
    global
        .data_directory
        .clone()
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Connection settings from `--json-central`.
pub fn connection(global: &GlobalOpts) -> Result<ConnectionConfig, CliError> {
    let central = centraldoc_config::load_central(&global.json_central)?;
    info!(base_url = %central.base_url, customer_id = %central.customer_id, "Using Central");
    Ok(centraldoc_config::connection_config(&central)?)
}

/// Batch settings from `--json-filter` plus flag overrides.
pub fn batch(global: &GlobalOpts, no_pdf: bool) -> Result<BatchConfig, CliError> {
    let filter = centraldoc_config::load_filter(&global.json_filter)?;
    info!(groups = ?filter.group_list, "Using group list from filter");

    let mut batch = centraldoc_config::batch_config(filter, global.data_directory.as_deref());
    if let Some(ref name) = global.customer_name {
        batch.customer.name.clone_from(name);
    }
    if let Some(ref title) = global.document_title {
        batch.customer.document_title.clone_from(title);
    }
    if no_pdf {
        batch.documents.conversion = Conversion::Disabled;
    }

    info!(customer = %batch.customer.name, "Customer name");
    info!(title = %batch.customer.document_title, "Document title");
    info!(inverse_search = global.inverse_search, "Search conditions");
    Ok(batch)
}

/// Cover fields for every document of this run, dated today.
pub fn report_context(batch: &BatchConfig) -> ReportContext {
    ReportContext::today(
        batch.customer.name.clone(),
        batch.customer.document_title.clone(),
    )
}
