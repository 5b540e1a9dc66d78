// Request/response seam between the pipeline and the remote API.
//
// Everything above this trait works against `DataSource`, so the batch can be
// driven by the real `CentralClient` or by an in-memory script in tests.

use std::future::Future;

use serde_json::Value;

use crate::error::Error;

/// One raw response from the data source: HTTP status plus decoded payload.
///
/// JSON bodies are decoded into their natural `Value`; anything that is not
/// JSON (raw device configuration, for example) arrives as `Value::String`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub payload: Value,
}

impl ApiResponse {
    pub fn new(status: u16, payload: Value) -> Self {
        Self { status, payload }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Human-readable detail from an error payload, if one is present.
    pub fn detail(&self) -> Option<&str> {
        match &self.payload {
            Value::Object(map) => map
                .get("detail")
                .or_else(|| map.get("description"))
                .or_else(|| map.get("error_description"))
                .and_then(Value::as_str),
            Value::String(s) if !self.is_success() => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A remote source of Central data.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for failures where no usable
/// response exists (transport errors, rejected credentials).
pub trait DataSource {
    fn get(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> impl Future<Output = Result<ApiResponse, Error>> + Send;

    fn post(
        &self,
        path: &str,
        body: &Value,
    ) -> impl Future<Output = Result<ApiResponse, Error>> + Send;
}
