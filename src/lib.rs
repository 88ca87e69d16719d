//! A library for decoding EOSIO packed transactions
//!
//! This crate turns the hex-encoded binary form of a transaction into a
//! structured object, resolving each action's payload into named fields
//! through the ABI of the contract it targets. ABIs are fetched from a node
//! on first use and cached for the lifetime of the decoder.

pub mod abi;
pub mod cache;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod rpc;
pub mod serialization;
pub mod transaction;

use anyhow::Result;

pub use crate::cache::AbiCache;
pub use crate::config::DecoderConfig;
pub use crate::errors::{DecodeError, DecodeResult};
pub use crate::models::{ActionData, ParsedAction, ParsedTransaction};
pub use crate::rpc::{AbiProvider, HttpAbiProvider, MemoryAbiProvider};
pub use crate::transaction::TransactionDecoder;

/// Decode a single hex-encoded transaction against the node in `config`.
///
/// Builds a fresh decoder (and ABI cache) per call; callers decoding many
/// transactions should keep a [`TransactionDecoder`] around instead.
pub async fn decode_packed_transaction(hex_trx: &str, config: &DecoderConfig) -> Result<ParsedTransaction> {
    let provider = HttpAbiProvider::new(config)?;
    let decoder = TransactionDecoder::new(provider);
    Ok(decoder.parse_transaction(hex_trx).await?)
}

/// Version of the decoder
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
