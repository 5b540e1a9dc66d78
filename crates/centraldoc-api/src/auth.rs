// Access-token handling for the Central API gateway.
//
// The gateway authenticates every request with a bearer token. When the
// token expires the gateway answers 401 and, if OAuth client credentials are
// available, a fresh pair is obtained from `/oauth2/token`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Client credentials needed to refresh an expired access token.
#[derive(Debug, Clone)]
pub struct RefreshCredentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub refresh_token: SecretString,
}

/// Bearer token plus optional refresh credentials.
#[derive(Debug, Clone)]
pub struct TokenAuth {
    pub access_token: SecretString,
    pub refresh: Option<RefreshCredentials>,
}

impl TokenAuth {
    pub fn bearer(access_token: SecretString) -> Self {
        Self {
            access_token,
            refresh: None,
        }
    }

    pub fn with_refresh(mut self, refresh: RefreshCredentials) -> Self {
        self.refresh = Some(refresh);
        self
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
}

/// A freshly issued token pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: SecretString,
    pub refresh_token: Option<SecretString>,
}

/// Exchange a refresh token for a new access token.
///
/// `POST {base}/oauth2/token?client_id=..&client_secret=..&grant_type=refresh_token&refresh_token=..`
pub(crate) async fn refresh_access_token(
    http: &reqwest::Client,
    base_url: &Url,
    creds: &RefreshCredentials,
) -> Result<TokenPair, Error> {
    let url = base_url.join("oauth2/token")?;
    debug!("refreshing access token");

    let resp = http
        .post(url)
        .query(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.expose_secret()),
            ("grant_type", "refresh_token"),
            ("refresh_token", creds.refresh_token.expose_secret()),
        ])
        .send()
        .await
        .map_err(Error::Transport)?;

    let status = resp.status();
    let body = resp.text().await.map_err(Error::Transport)?;

    if !status.is_success() {
        return Err(Error::TokenRefresh {
            status: status.as_u16(),
            message: body,
        });
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

    Ok(TokenPair {
        access_token: SecretString::from(token.access_token),
        refresh_token: token.refresh_token.map(SecretString::from),
    })
}
