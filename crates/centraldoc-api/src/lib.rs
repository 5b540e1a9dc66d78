// centraldoc-api: Async Rust client for the Aruba Central REST API

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod source;
pub mod transport;

pub use auth::{RefreshCredentials, TokenAuth};
pub use client::CentralClient;
pub use error::Error;
pub use source::{ApiResponse, DataSource};
pub use transport::{TlsMode, TransportConfig};
