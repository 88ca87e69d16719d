//! Transaction assembly: envelope decoding plus per-action ABI decoding
//!
//! One action that cannot be decoded (no ABI, unknown action, bad payload)
//! never fails the transaction: its `data` falls back to the raw payload hex
//! and the remaining actions are decoded normally.

pub mod envelope;

use std::sync::Arc;

use log::{debug, info, warn};
use serde_json::{Map, Value};

use crate::abi;
use crate::abi::values::format_time_point_sec;
use crate::cache::AbiCache;
use crate::errors::{DecodeResult, ErrorExt};
use crate::models::trace::{flatten_traces, ActionTrace};
use crate::models::transaction::{ActionData, ParsedAction, ParsedTransaction};
use crate::rpc::AbiProvider;

pub use self::envelope::{RawAction, RawTransaction};

/// Decodes packed transactions, resolving action payloads through an ABI cache
pub struct TransactionDecoder<P> {
    cache: Arc<AbiCache<P>>,
}

impl<P: AbiProvider> TransactionDecoder<P> {
    /// Create a decoder with its own, empty ABI cache
    pub fn new(provider: P) -> Self {
        Self::with_cache(Arc::new(AbiCache::new(provider)))
    }

    /// Create a decoder sharing an existing ABI cache
    pub fn with_cache(cache: Arc<AbiCache<P>>) -> Self {
        Self { cache }
    }

    /// ABI cache used by this decoder
    pub fn cache(&self) -> &Arc<AbiCache<P>> {
        &self.cache
    }

    /// Decode a hex-encoded packed transaction.
    ///
    /// Fails with `MalformedTransaction` only when the envelope itself cannot
    /// be read; per-action problems degrade to raw hex payloads.
    pub async fn parse_transaction(&self, hex_trx: &str) -> DecodeResult<ParsedTransaction> {
        let bytes = envelope::decode_hex(hex_trx)?;
        self.parse_transaction_bytes(&bytes).await
    }

    /// Decode a packed transaction given as bytes
    pub async fn parse_transaction_bytes(&self, bytes: &[u8]) -> DecodeResult<ParsedTransaction> {
        let raw = envelope::read_transaction(bytes)?;
        debug!(
            "Read envelope: {} context-free action(s), {} action(s), {} extension(s)",
            raw.context_free_actions.len(),
            raw.actions.len(),
            raw.transaction_extensions.len()
        );

        let expiration = format_time_point_sec(raw.expiration).in_envelope("expiration")?;
        let context_free_actions = self.decode_actions(&raw.context_free_actions).await;
        let actions = self.decode_actions(&raw.actions).await;

        let parsed = ParsedTransaction {
            expiration,
            ref_block_num: raw.ref_block_num,
            ref_block_prefix: raw.ref_block_prefix,
            max_net_usage_words: raw.max_net_usage_words,
            max_cpu_usage_ms: raw.max_cpu_usage_ms,
            delay_sec: raw.delay_sec,
            context_free_actions,
            actions,
            transaction_extensions: raw.transaction_extensions,
        };

        let undecoded = parsed.undecoded_action_count();
        if undecoded > 0 {
            info!("Decoded transaction with {} action(s) left as raw hex", undecoded);
        }
        Ok(parsed)
    }

    /// Decode actions in wire order
    async fn decode_actions(&self, actions: &[RawAction]) -> Vec<ParsedAction> {
        let mut parsed = Vec::with_capacity(actions.len());
        for action in actions {
            parsed.push(self.decode_action(action).await);
        }
        parsed
    }

    /// Decode one action, falling back to its raw hex payload on any error
    pub async fn decode_action(&self, action: &RawAction) -> ParsedAction {
        match self.try_decode_action(action).await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Leaving {}::{} undecoded: {}", action.account, action.name, e);
                let hex_data = hex::encode(&action.data);
                ParsedAction {
                    account: action.account.clone(),
                    name: action.name.clone(),
                    authorization: action.authorization.clone(),
                    data: ActionData::Raw(hex_data.clone()),
                    hex_data,
                }
            }
        }
    }

    /// Decode one action through its contract's ABI
    pub async fn try_decode_action(&self, action: &RawAction) -> DecodeResult<ParsedAction> {
        let fields = self.decode_payload(&action.account, &action.name, &action.data).await?;
        Ok(ParsedAction {
            account: action.account.clone(),
            name: action.name.clone(),
            authorization: action.authorization.clone(),
            data: ActionData::Decoded(fields),
            hex_data: hex::encode(&action.data),
        })
    }

    async fn decode_payload(&self, account: &str, name: &str, data: &[u8]) -> DecodeResult<Map<String, Value>> {
        let abi = self.cache.try_get_abi(account).await?;
        abi::decode_action_data(&abi, name, data)
    }

    /// Flatten traces (each action before its inline actions) and decode
    /// their payloads.
    ///
    /// Payloads the node already rendered as objects are kept; otherwise
    /// `hex_data` (or a hex string in `data`) is decoded with the same
    /// raw-hex fallback as transaction actions.
    pub async fn decode_traces(&self, traces: &[ActionTrace]) -> Vec<ParsedAction> {
        let flattened = flatten_traces(traces);
        let mut parsed = Vec::with_capacity(flattened.len());

        for trace in flattened {
            let act = &trace.act;
            let hex_data = act
                .hex_data
                .clone()
                .or_else(|| act.data.as_str().map(str::to_string))
                .unwrap_or_default();

            let data = match &act.data {
                Value::Object(fields) => ActionData::Decoded(fields.clone()),
                _ => match hex::decode(&hex_data) {
                    Ok(bytes) => match self.decode_payload(&act.account, &act.name, &bytes).await {
                        Ok(fields) => ActionData::Decoded(fields),
                        Err(e) => {
                            warn!("Leaving trace {}::{} undecoded: {}", act.account, act.name, e);
                            ActionData::Raw(hex_data.clone())
                        }
                    },
                    Err(e) => {
                        warn!("Trace {}::{} carries invalid hex: {}", act.account, act.name, e);
                        ActionData::Raw(hex_data.clone())
                    }
                },
            };

            parsed.push(ParsedAction {
                account: act.account.clone(),
                name: act.name.clone(),
                authorization: act.authorization.clone(),
                data,
                hex_data,
            });
        }
        parsed
    }
}
