//! In-memory cache of contract ABIs

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, warn};

use crate::errors::DecodeResult;
use crate::models::abi::AbiDocument;
use crate::rpc::AbiProvider;


/// Cache mapping contract accounts to their ABI.
///
/// Entries live as long as the cache; nothing is evicted or refreshed.
/// Failed fetches are not remembered, so a later lookup for the same account
/// asks the provider again. Two tasks missing on the same account at once may
/// both fetch; the first result stored wins and the map stays consistent.
pub struct AbiCache<P> {
    /// Where misses are fetched from
    provider: P,
    /// Cached ABIs by account name
    entries: RwLock<HashMap<String, Arc<AbiDocument>>>,
}

impl<P: AbiProvider> AbiCache<P> {
    /// Create an empty cache in front of `provider`
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Provider used on cache misses
    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<AbiDocument>>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<AbiDocument>>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Cached ABI for `account`, without fetching
    pub fn cached(&self, account: &str) -> Option<Arc<AbiDocument>> {
        self.read().get(account).cloned()
    }

    /// ABI for `account`, fetching and caching it on a miss
    pub async fn try_get_abi(&self, account: &str) -> DecodeResult<Arc<AbiDocument>> {
        if let Some(abi) = self.cached(account) {
            debug!("ABI cache hit for {}", account);
            return Ok(abi);
        }

        debug!("ABI cache miss for {}", account);
        let fetched = Arc::new(self.provider.fetch_abi(account).await?);

        let stored = {
            let mut entries = self.write();
            entries
                .entry(account.to_string())
                .or_insert(fetched)
                .clone()
        };
        Ok(stored)
    }

    /// ABI for `account`, or `None` when it cannot be fetched
    pub async fn get_abi(&self, account: &str) -> Option<Arc<AbiDocument>> {
        match self.try_get_abi(account).await {
            Ok(abi) => Some(abi),
            Err(e) => {
                warn!("No ABI available for {}: {}", account, e);
                None
            }
        }
    }

    /// Seed the cache, replacing any existing entry
    pub fn insert(&self, account: impl Into<String>, abi: AbiDocument) {
        self.write().insert(account.into(), Arc::new(abi));
    }

    pub fn contains(&self, account: &str) -> bool {
        self.read().contains_key(account)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached ABI
    pub fn clear(&self) {
        let mut entries = self.write();
        debug!("Clearing {} cached ABI(s)", entries.len());
        entries.clear();
    }
}
