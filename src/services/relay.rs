use async_trait::async_trait;
use serde::Deserialize;

use crate::utils::dclogin::{DcLogin, DcLoginError};

/// Default account-creation endpoint of a chatmail relay
pub const NEW_ACCOUNT_PATH: &str = "/new";

/// Response of the relay's account-creation endpoint
///
/// Only `dclogin_url` is rendered. The relay omits it unless it runs with
/// a self-signed certificate, so a payload without it fails to decode.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CredentialRecord {
    pub dclogin_url: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl CredentialRecord {
    /// Decode the JSON body returned by the relay
    pub fn from_json(body: &str) -> Result<Self, RelayError> {
        serde_json::from_str(body).map_err(|e| RelayError::Parse(e.to_string()))
    }

    /// Parse and validate the activation URL
    pub fn login(&self) -> Result<DcLogin, DcLoginError> {
        DcLogin::parse(&self.dclogin_url)
    }
}

/// Error type for credential fetching
#[derive(Debug, Clone, PartialEq)]
pub enum RelayError {
    Fetch(String),
    Status(u16),
    Parse(String),
}

impl std::fmt::Display for RelayError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            RelayError::Fetch(e) => write!(f, "Fetch error: {}", e),
            RelayError::Status(code) => write!(f, "HTTP error: {}", code),
            RelayError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for RelayError {}

/// Anything that can hand out a fresh credential record
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait CredentialSource {
    async fn fetch_credentials(&self) -> Result<CredentialRecord, RelayError>;
}

/// HTTP client for the relay's `/new` endpoint
#[derive(Debug, Clone)]
pub struct RelayClient {
    endpoint: String,
    /// Base for resolving relative endpoints outside the browser
    base: Option<String>,
}

impl RelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            base: None,
        }
    }

    #[cfg(test)]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    /// Absolute URL to request
    ///
    /// In the browser a relative endpoint is resolved by `fetch` against the
    /// page origin, so it is returned as-is when no base is configured.
    pub fn request_url(&self) -> Result<String, RelayError> {
        match &self.base {
            Some(base) => {
                let base = url::Url::parse(base).map_err(|e| RelayError::Fetch(e.to_string()))?;
                base.join(&self.endpoint)
                    .map(|u| u.to_string())
                    .map_err(|e| RelayError::Fetch(e.to_string()))
            }
            None => Ok(self.endpoint.clone()),
        }
    }
}

impl Default for RelayClient {
    fn default() -> Self {
        Self::new(NEW_ACCOUNT_PATH)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl CredentialSource for RelayClient {
    async fn fetch_credentials(&self) -> Result<CredentialRecord, RelayError> {
        let url = self.request_url()?;
        log::info!("Requesting new credentials from {}", url);

        #[cfg(target_arch = "wasm32")]
        let body = fetch_body_wasm(&url).await?;

        #[cfg(not(target_arch = "wasm32"))]
        let body = fetch_body_native(&url).await?;

        CredentialRecord::from_json(&body)
    }
}

/// Fetch the response body using gloo-net (WASM)
#[cfg(target_arch = "wasm32")]
async fn fetch_body_wasm(url: &str) -> Result<String, RelayError> {
    use gloo_net::http::Request;

    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))?;

    if !response.ok() {
        return Err(RelayError::Status(response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))
}

/// Fetch the response body using reqwest (native)
#[cfg(not(target_arch = "wasm32"))]
async fn fetch_body_native(url: &str) -> Result<String, RelayError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))?;

    if !response.status().is_success() {
        return Err(RelayError::Status(response.status().as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| RelayError::Fetch(e.to_string()))
}
