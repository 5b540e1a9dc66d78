// Central REST API HTTP client
//
// Wraps `reqwest::Client` with bearer authentication, transparent token
// refresh, and body decoding. Status codes are passed through untouched;
// retry decisions belong to the caller.

use secrecy::ExposeSecret;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};
use url::Url;

use crate::auth::{self, TokenAuth};
use crate::error::Error;
use crate::source::{ApiResponse, DataSource};
use crate::transport::TransportConfig;

/// Raw HTTP client for the Central API gateway.
///
/// Every method returns the status code and decoded payload. A 401 triggers
/// one token refresh (when refresh credentials are configured) and a replay
/// of the request; a second 401 becomes [`Error::Authentication`].
pub struct CentralClient {
    http: reqwest::Client,
    base_url: Url,
    auth: RwLock<TokenAuth>,
}

#[derive(Clone, Copy)]
enum Method {
    Get,
    Post,
}

impl CentralClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the API gateway root, e.g.
    /// `https://apigw-eucentral3.central.arubanetworks.com`.
    pub fn new(base_url: Url, auth: TokenAuth, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, auth))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, auth: TokenAuth) -> Self {
        Self {
            http,
            base_url,
            auth: RwLock::new(auth),
        }
    }

    /// The API gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<ApiResponse, Error> {
        let url = self.url(path)?;

        let resp = self.dispatch(method, url.clone(), params, body).await?;
        if resp.status() != reqwest::StatusCode::UNAUTHORIZED {
            return decode(resp).await;
        }

        if !self.try_refresh().await? {
            return Err(Error::Authentication {
                message: format!("access token rejected for {path}"),
            });
        }

        let resp = self.dispatch(method, url, params, body).await?;
        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("refreshed access token rejected for {path}"),
            });
        }
        decode(resp).await
    }

    async fn dispatch(
        &self,
        method: Method,
        url: Url,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<reqwest::Response, Error> {
        let token = self.auth.read().await.access_token.clone();

        let request = match method {
            Method::Get => {
                debug!("GET {}", url);
                self.http.get(url).query(params)
            }
            Method::Post => {
                debug!("POST {}", url);
                let req = self.http.post(url);
                match body {
                    Some(b) => req.json(b),
                    None => req,
                }
            }
        };

        request
            .bearer_auth(token.expose_secret())
            .send()
            .await
            .map_err(Error::Transport)
    }

    /// Refresh the access token. Returns `false` when no refresh
    /// credentials are configured.
    async fn try_refresh(&self) -> Result<bool, Error> {
        let mut auth = self.auth.write().await;
        let Some(creds) = auth.refresh.clone() else {
            return Ok(false);
        };

        let pair = auth::refresh_access_token(&self.http, &self.base_url, &creds).await?;
        auth.access_token = pair.access_token;
        if let (Some(token), Some(refresh)) = (pair.refresh_token, auth.refresh.as_mut()) {
            refresh.refresh_token = token;
        }
        info!("access token refreshed");
        Ok(true)
    }
}

/// Read the body and decode it as JSON, falling back to a plain string.
async fn decode(resp: reqwest::Response) -> Result<ApiResponse, Error> {
    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(Error::Transport)?;

    let payload = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&body).unwrap_or(Value::String(body))
    };

    Ok(ApiResponse::new(status, payload))
}

impl DataSource for CentralClient {
    async fn get(&self, path: &str, params: &[(&str, String)]) -> Result<ApiResponse, Error> {
        self.send(Method::Get, path, params, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, Error> {
        self.send(Method::Post, path, &[], Some(body)).await
    }
}
