//! Node RPC access for contract ABIs

mod memory;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::config::DecoderConfig;
use crate::constants::rpc::GET_ABI_PATH;
use crate::errors::{DecodeError, DecodeResult};
use crate::models::abi::AbiDocument;

pub use self::memory::MemoryAbiProvider;

/// Source of contract ABIs.
///
/// The decoder only needs "give me the ABI of this account"; tests plug in
/// in-memory providers, production uses [`HttpAbiProvider`].
#[async_trait]
pub trait AbiProvider: Send + Sync {
    /// Fetch the ABI deployed on `account`
    async fn fetch_abi(&self, account: &str) -> DecodeResult<AbiDocument>;
}

#[async_trait]
impl<P: AbiProvider + ?Sized> AbiProvider for Arc<P> {
    async fn fetch_abi(&self, account: &str) -> DecodeResult<AbiDocument> {
        (**self).fetch_abi(account).await
    }
}

/// `get_abi` response body
#[derive(Debug, Deserialize)]
struct GetAbiResponse {
    #[serde(default)]
    abi: Option<AbiDocument>,
}

/// ABI provider backed by a node's chain API
pub struct HttpAbiProvider {
    /// HTTP client
    client: Client,
    /// Node base URL
    node_url: String,
}

impl HttpAbiProvider {
    /// Create a provider for the node named in `config`
    pub fn new(config: &DecoderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            node_url: config.node_url.trim_end_matches('/').to_string(),
        })
    }

    /// Full URL of the `get_abi` endpoint
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.node_url, GET_ABI_PATH)
    }
}

#[async_trait]
impl AbiProvider for HttpAbiProvider {
    async fn fetch_abi(&self, account: &str) -> DecodeResult<AbiDocument> {
        let fetch_error = |reason: String| DecodeError::AbiFetch {
            account: account.to_string(),
            reason,
        };

        debug!("Fetching ABI for {} from {}", account, self.endpoint());
        let response = self.client.post(self.endpoint())
            .json(&json!({ "account_name": account }))
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_error(format!("node returned HTTP {}", status)));
        }

        let body: GetAbiResponse = response
            .json()
            .await
            .map_err(|e| fetch_error(format!("malformed get_abi response: {}", e)))?;

        body.abi.ok_or_else(|| DecodeError::AbiNotFound(account.to_string()))
    }
}
