//! Decoder configuration

use std::time::Duration;

use log::warn;

use crate::constants::rpc::{DEFAULT_NODE_URL, DEFAULT_TIMEOUT_SECS, NODE_URL_ENV, TIMEOUT_ENV};

/// Settings for talking to the node that serves ABIs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Node base URL, without the `/v1/...` path
    pub node_url: String,
    /// Timeout applied to each ABI request
    pub timeout: Duration,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            node_url: DEFAULT_NODE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DecoderConfig {
    /// Defaults overridden by `EOSIO_NODE_URL` and `EOSIO_RPC_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(NODE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.node_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => config.timeout = Duration::from_secs(secs),
                Err(e) => warn!("Ignoring {}={:?}: {}", TIMEOUT_ENV, raw, e),
            }
        }

        config
    }

    /// Use a different node
    pub fn with_node_url(mut self, node_url: impl Into<String>) -> Self {
        self.node_url = node_url.into();
        self
    }

    /// Use a different request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
