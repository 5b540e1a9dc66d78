//! Configuration for the centraldoc CLI.
//!
//! Two JSON files drive a run: `central.json` says how to reach Central and
//! `filter.json` says what to document. This crate loads both (file + env),
//! resolves the access token (env, keyring, plaintext) and translates the
//! result into `centraldoc_core` runtime types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use centraldoc_api::{RefreshCredentials, TlsMode};
use centraldoc_core::{
    BatchConfig, ConnectionConfig, Conversion, Customer, DocumentSettings, Paging, Selection,
};

pub const CENTRAL_FILE: &str = "central.json";
pub const FILTER_FILE: &str = "filter.json";

const KEYRING_SERVICE: &str = "centraldoc";
const TOKEN_ENV: &str = "CENTRALDOC_ACCESS_TOKEN";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no access token configured for customer '{customer}'")]
    NoCredentials { customer: String },

    #[error("config file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── central.json ────────────────────────────────────────────────────

/// Connection settings for the Central API gateway.
#[derive(Debug, Deserialize, Serialize)]
pub struct CentralFile {
    /// API gateway URL (e.g., "https://apigw-eucentral3.central.arubanetworks.com").
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub token: TokenFile,

    /// OAuth client, needed only for token refresh.
    pub client_id: Option<String>,
    pub client_secret: Option<String>,

    /// Customer id; also names the keyring entry.
    #[serde(default)]
    pub customer_id: String,

    #[serde(default = "default_true")]
    pub ssl_verify: bool,

    /// Path to a custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for CentralFile {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            token: TokenFile::default(),
            client_id: None,
            client_secret: None,
            customer_id: String::new(),
            ssl_verify: true,
            ca_cert: None,
            timeout: default_timeout(),
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TokenFile {
    /// Plaintext access token (prefer keyring or env var).
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

// ── filter.json ─────────────────────────────────────────────────────

/// What to document and where the documents go.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FilterFile {
    /// Configuration groups; empty means every group.
    #[serde(default)]
    pub group_list: Vec<String>,

    /// Sites; empty means every site.
    #[serde(default)]
    pub site_list: Vec<String>,

    #[serde(default)]
    pub customer: CustomerFile,

    #[serde(default)]
    pub documents: DocumentsFile,

    /// Devices per inventory page.
    #[serde(default = "default_inventory_page")]
    pub inventory_page_size: usize,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CustomerFile {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub document_title: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DocumentsFile {
    #[serde(default = "default_template")]
    pub template: Option<PathBuf>,
    #[serde(default = "default_images")]
    pub images_dir: PathBuf,
    #[serde(default = "default_bom")]
    pub bom_dir: PathBuf,
    #[serde(default = "default_output")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub convert_pdf: bool,
    #[serde(default = "default_converter")]
    pub converter: String,
}

impl Default for DocumentsFile {
    fn default() -> Self {
        Self {
            template: default_template(),
            images_dir: default_images(),
            bom_dir: default_bom(),
            output_dir: default_output(),
            convert_pdf: true,
            converter: default_converter(),
        }
    }
}

fn default_template() -> Option<PathBuf> {
    Some(PathBuf::from("template/template.docx"))
}
fn default_images() -> PathBuf {
    PathBuf::from("images")
}
fn default_bom() -> PathBuf {
    PathBuf::from("bom")
}
fn default_output() -> PathBuf {
    PathBuf::from("docx")
}
fn default_converter() -> String {
    centraldoc_core::document::convert::DEFAULT_CONVERTER.into()
}
fn default_inventory_page() -> usize {
    Paging::default().inventory
}

// ── File lookup ─────────────────────────────────────────────────────

/// Platform config directory, e.g. `~/.config/centraldoc`.
pub fn config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "centraldoc", "centraldoc").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Use `path` when it exists; otherwise look for its file name in the
/// platform config directory. Falls back to `path` unchanged.
pub fn locate(path: &Path) -> PathBuf {
    if path.exists() {
        return path.to_path_buf();
    }
    let fallback = config_dir()
        .zip(path.file_name())
        .map(|(dir, name)| dir.join(name))
        .filter(|candidate| candidate.exists());
    match fallback {
        Some(candidate) => {
            debug!(path = %candidate.display(), "using config from platform directory");
            candidate
        }
        None => path.to_path_buf(),
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load `central.json` (required) with `CENTRALDOC_*` env overrides.
pub fn load_central(path: &Path) -> Result<CentralFile, ConfigError> {
    let path = locate(path);
    if !path.exists() {
        return Err(ConfigError::Missing { path });
    }

    let central: CentralFile = Figment::new()
        .merge(Serialized::defaults(CentralFile::default()))
        .merge(Json::file(&path))
        .merge(Env::prefixed("CENTRALDOC_").only(&[
            "base_url",
            "customer_id",
            "client_id",
            "ssl_verify",
            "timeout",
        ]))
        .extract()?;
    Ok(central)
}

/// Load `filter.json` with `CENTRALDOC_FILTER_*` env overrides. A missing
/// file means "document everything" with default paths.
pub fn load_filter(path: &Path) -> Result<FilterFile, ConfigError> {
    let path = locate(path);
    if !path.exists() {
        info!(path = %path.display(), "no filter file, documenting all groups and sites");
    }

    let filter: FilterFile = Figment::new()
        .merge(Serialized::defaults(FilterFile::default()))
        .merge(Json::file(&path))
        .merge(Env::prefixed("CENTRALDOC_FILTER_").split("__"))
        .extract()?;
    Ok(filter)
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve the access token: env var, then system keyring, then plaintext.
pub fn resolve_access_token(central: &CentralFile) -> Result<SecretString, ConfigError> {
    first_token(
        std::env::var(TOKEN_ENV).ok(),
        || keyring_token(&central.customer_id),
        central.token.access_token.as_deref(),
    )
    .ok_or_else(|| ConfigError::NoCredentials {
        customer: central.customer_id.clone(),
    })
}

fn keyring_token(customer_id: &str) -> Option<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, &format!("{customer_id}/access-token")).ok()?;
    entry.get_password().ok()
}

fn first_token(
    env: Option<String>,
    keyring: impl FnOnce() -> Option<String>,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    env.filter(|t| !t.is_empty())
        .or_else(|| keyring().filter(|t| !t.is_empty()))
        .or_else(|| plaintext.filter(|t| !t.is_empty()).map(str::to_owned))
        .map(SecretString::from)
}

/// OAuth refresh credentials, when client id, secret and refresh token
/// are all configured.
pub fn refresh_credentials(central: &CentralFile) -> Option<RefreshCredentials> {
    let client_id = central.client_id.clone().filter(|s| !s.is_empty())?;
    let client_secret = central.client_secret.clone().filter(|s| !s.is_empty())?;
    let refresh_token = central.token.refresh_token.clone().filter(|s| !s.is_empty())?;
    Some(RefreshCredentials {
        client_id,
        client_secret: SecretString::from(client_secret),
        refresh_token: SecretString::from(refresh_token),
    })
}

// ── Translation ─────────────────────────────────────────────────────

/// Build a `ConnectionConfig` from `central.json`.
pub fn connection_config(central: &CentralFile) -> Result<ConnectionConfig, ConfigError> {
    let base_url: url::Url = central
        .base_url
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "base_url".into(),
            reason: format!("invalid URL: '{}'", central.base_url),
        })?;

    let access_token = resolve_access_token(central)?;

    let tls = if !central.ssl_verify {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = central.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    Ok(ConnectionConfig {
        base_url,
        access_token,
        refresh: refresh_credentials(central),
        tls,
        timeout: Duration::from_secs(central.timeout),
    })
}

/// Build a `BatchConfig` from `filter.json`.
///
/// Relative document paths are resolved against `data_dir` when given.
pub fn batch_config(filter: FilterFile, data_dir: Option<&Path>) -> BatchConfig {
    let rooted = |p: PathBuf| match data_dir {
        Some(dir) if p.is_relative() => dir.join(p),
        _ => p,
    };
    let docs = filter.documents;

    let conversion = if docs.convert_pdf {
        Conversion::Office {
            program: docs.converter,
        }
    } else {
        Conversion::Disabled
    };

    BatchConfig {
        customer: Customer {
            name: filter.customer.customer_name,
            document_title: filter.customer.document_title,
        },
        selection: Selection {
            groups: filter.group_list,
            sites: filter.site_list,
        },
        documents: DocumentSettings {
            template: docs.template.map(&rooted),
            images_dir: rooted(docs.images_dir),
            bom_dir: rooted(docs.bom_dir),
            output_dir: rooted(docs.output_dir),
            conversion,
        },
        paging: Paging {
            inventory: filter.inventory_page_size,
            ..Paging::default()
        },
    }
}
