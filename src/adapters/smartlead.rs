//! `reqwest`-backed implementation of the platform port.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use tokio::time::timeout;
use tracing::{debug, warn};
use url::Url;

use crate::config::PlatformConfig;
use crate::domain::models::{BlockListRequest, ClientRecord};
use crate::domain::ports::{PlatformClient, PlatformError, PlatformResult};

const CLIENTS_PATH: &str = "api/v1/client/";
const BLOCK_LIST_PATH: &str = "api/v1/leads/add-domain-block-list";

impl From<reqwest::Error> for PlatformError {
    fn from(error: reqwest::Error) -> Self {
        // the request URL carries the API key as a query parameter
        let error = error.without_url();
        if error.is_decode() {
            PlatformError::Malformed(error.to_string())
        } else {
            PlatformError::Transport(error.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmartleadClient {
    client: Client,
    base_url: Url,
    api_key: SecretString,
    lookup_timeout: Duration,
    submit_timeout: Duration,
}

impl SmartleadClient {
    pub fn new(config: &PlatformConfig) -> PlatformResult<Self> {
        // a trailing slash keeps any path prefix when joining endpoints
        let base = format!("{}/", config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)
            .map_err(|e| PlatformError::Other(format!("Invalid platform base URL: {e}")))?;

        let client = Client::builder()
            .build()
            .map_err(|e| PlatformError::Other(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key.clone(),
            lookup_timeout: config.lookup_timeout(),
            submit_timeout: config.submit_timeout(),
        })
    }

    fn endpoint(&self, path: &str) -> PlatformResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| PlatformError::Other(format!("Invalid endpoint path {path}: {e}")))?;
        url.query_pairs_mut()
            .append_pair("api_key", self.api_key.expose_secret());
        Ok(url)
    }

    /// Sends the request and reads the whole body, all within `deadline`.
    async fn exchange(&self, request: RequestBuilder, deadline: Duration) -> PlatformResult<Vec<u8>> {
        let call = async {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PlatformError::Status(status.as_u16()));
            }
            Ok::<_, PlatformError>(response.bytes().await?.to_vec())
        };

        match timeout(deadline, call).await {
            Ok(result) => result,
            Err(_) => Err(PlatformError::Timeout(deadline)),
        }
    }
}

/// Decodes the client listing, insisting on a JSON array.
///
/// Records that do not decode (missing id, non-string email, ...) are skipped
/// so that one broken account does not hide every other one.
fn decode_clients(body: &[u8]) -> PlatformResult<Vec<ClientRecord>> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| PlatformError::Malformed(format!("invalid JSON: {e}")))?;
    let serde_json::Value::Array(items) = value else {
        return Err(PlatformError::Malformed(
            "expected a JSON array of clients".into(),
        ));
    };

    let clients: Vec<ClientRecord> = items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable client record");
                None
            }
        })
        .collect();
    Ok(clients)
}

#[async_trait]
impl PlatformClient for SmartleadClient {
    async fn list_clients(&self) -> PlatformResult<Vec<ClientRecord>> {
        let url = self.endpoint(CLIENTS_PATH)?;
        debug!(path = CLIENTS_PATH, "Fetching client list");

        let body = self
            .exchange(self.client.get(url), self.lookup_timeout)
            .await?;
        decode_clients(&body)
    }

    async fn add_domain_block_list(&self, request: &BlockListRequest) -> PlatformResult<()> {
        let url = self.endpoint(BLOCK_LIST_PATH)?;
        debug!(
            path = BLOCK_LIST_PATH,
            entries = request.domain_block_list.len(),
            "Submitting block list"
        );

        self.exchange(self.client.post(url).json(request), self.submit_timeout)
            .await
            .map(|_| ())
    }
}
