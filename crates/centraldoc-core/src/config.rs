// ── Runtime batch configuration ──
//
// These types describe *what* to document and *how* to reach Central. They
// carry credential data and output settings but never touch disk; the CLI
// builds them from its config files and hands them in.

use std::path::PathBuf;
use std::time::Duration;

use centraldoc_api::{CentralClient, RefreshCredentials, TlsMode, TokenAuth, TransportConfig};
use secrecy::SecretString;
use url::Url;

use crate::document::Conversion;
use crate::error::CoreError;

/// Which groups and sites to document. Empty lists mean "all".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub groups: Vec<String>,
    pub sites: Vec<String>,
}

/// Cover header fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub name: String,
    pub document_title: String,
}

/// Where inputs are found and outputs go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSettings {
    /// Seed document for styles and boilerplate.
    pub template: Option<PathBuf>,
    pub images_dir: PathBuf,
    pub bom_dir: PathBuf,
    pub output_dir: PathBuf,
    pub conversion: Conversion,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            template: Some(PathBuf::from("template/template.docx")),
            images_dir: PathBuf::from("images"),
            bom_dir: PathBuf::from("bom"),
            output_dir: PathBuf::from("docx"),
            conversion: Conversion::default(),
        }
    }
}

/// Page sizes for the paged listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub groups: usize,
    pub monitoring: usize,
    pub inventory: usize,
}

impl Default for Paging {
    fn default() -> Self {
        Self {
            groups: 20,
            monitoring: 1000,
            inventory: 120,
        }
    }
}

/// Everything one documentation run needs apart from the connection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchConfig {
    pub customer: Customer,
    pub selection: Selection,
    pub documents: DocumentSettings,
    pub paging: Paging,
}

/// How to reach the Central API gateway.
///
/// Built by the CLI, passed to [`ConnectionConfig::connect`] -- core never
/// reads config files.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// API gateway URL (e.g., `https://apigw-eucentral3.central.arubanetworks.com`).
    pub base_url: Url,
    pub access_token: SecretString,
    /// OAuth client and refresh token, when token refresh is possible.
    pub refresh: Option<RefreshCredentials>,
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl ConnectionConfig {
    /// Build the HTTP client for this connection.
    pub fn connect(&self) -> Result<CentralClient, CoreError> {
        let mut auth = TokenAuth::bearer(self.access_token.clone());
        if let Some(refresh) = &self.refresh {
            auth = auth.with_refresh(refresh.clone());
        }
        let transport = TransportConfig {
            tls: self.tls.clone(),
            timeout: self.timeout,
        };
        Ok(CentralClient::new(self.base_url.clone(), auth, &transport)?)
    }
}
