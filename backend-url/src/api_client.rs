use crate::{BackendUrl, responses};
use reqwest::StatusCode;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl APIClient {
    /// Build a client for `backend`, resolving "same origin" to the page's
    /// own `origin`.
    pub fn new(backend: &BackendUrl, origin: &str) -> Self {
        let address = if backend.is_same_origin() {
            origin.trim_end_matches('/').to_string()
        } else {
            backend.to_string()
        };

        Self {
            address,
            inner_client: reqwest::Client::new(),
        }
    }
}

/// Helper methods for http actions
impl APIClient {
    pub fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Get the market frequencies, default symbols and server timezone.
    pub async fn init_config(
        &self,
    ) -> Result<responses::InitConfig, ClientError> {
        let response = self.empty_get("init_config").await?;
        ok_body(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}
