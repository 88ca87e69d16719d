//! In-memory ABI provider

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::errors::{DecodeError, DecodeResult};
use crate::models::abi::AbiDocument;
use super::AbiProvider;

/// Provider serving ABIs from a map, for offline decoding and tests.
///
/// Counts every fetch so callers can observe cache behaviour. Accounts that
/// were never registered answer with `AbiNotFound`.
#[derive(Default)]
pub struct MemoryAbiProvider {
    abis: RwLock<HashMap<String, AbiDocument>>,
    fetches: AtomicUsize,
}

impl MemoryAbiProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the ABI served for `account`
    pub fn with_abi(self, account: impl Into<String>, abi: AbiDocument) -> Self {
        self.set_abi(account, abi);
        self
    }

    pub fn set_abi(&self, account: impl Into<String>, abi: AbiDocument) {
        let mut abis = self.abis.write().unwrap_or_else(|e| e.into_inner());
        abis.insert(account.into(), abi);
    }

    /// Number of `fetch_abi` calls served so far, successful or not
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AbiProvider for MemoryAbiProvider {
    async fn fetch_abi(&self, account: &str) -> DecodeResult<AbiDocument> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let abis = self.abis.read().unwrap_or_else(|e| e.into_inner());
        abis.get(account)
            .cloned()
            .ok_or_else(|| DecodeError::AbiNotFound(account.to_string()))
    }
}
