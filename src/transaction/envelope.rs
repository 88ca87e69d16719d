//! Transaction envelope layout
//!
//! Reads everything that does not need an ABI: the header fields, the
//! action records with their still-packed payloads and the extensions.

use crate::errors::{DecodeError, DecodeResult, ErrorExt};
use crate::models::transaction::{PermissionLevel, TransactionExtension};
use crate::serialization::ByteCursor;

/// Action record with its payload still packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAction {
    pub account: String,
    pub name: String,
    pub authorization: Vec<PermissionLevel>,
    pub data: Vec<u8>,
}

/// Transaction with every action payload still packed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTransaction {
    /// Expiration, seconds since the Unix epoch
    pub expiration: u32,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
    pub context_free_actions: Vec<RawAction>,
    pub actions: Vec<RawAction>,
    pub transaction_extensions: Vec<TransactionExtension>,
}

fn read_permission_level(cursor: &mut ByteCursor<'_>) -> DecodeResult<PermissionLevel> {
    Ok(PermissionLevel {
        actor: cursor.read_name()?,
        permission: cursor.read_name()?,
    })
}

fn read_action(cursor: &mut ByteCursor<'_>) -> DecodeResult<RawAction> {
    let account = cursor.read_name()?;
    let name = cursor.read_name()?;
    let authorization = cursor.read_array(read_permission_level)?;
    let data = cursor.read_blob()?.to_vec();
    Ok(RawAction { account, name, authorization, data })
}

fn read_extension(cursor: &mut ByteCursor<'_>) -> DecodeResult<TransactionExtension> {
    let ty = cursor.read_u16()?;
    let data = hex::encode(cursor.read_blob()?);
    Ok(TransactionExtension { ty, data })
}

/// Read a packed transaction.
///
/// The extensions list may be missing entirely (some serializers stop after
/// the actions); anything else missing, or bytes left over, is malformed.
pub fn read_transaction(bytes: &[u8]) -> DecodeResult<RawTransaction> {
    let mut cursor = ByteCursor::new(bytes);

    let expiration = cursor.read_u32().in_envelope("expiration")?;
    let ref_block_num = cursor.read_u16().in_envelope("ref_block_num")?;
    let ref_block_prefix = cursor.read_u32().in_envelope("ref_block_prefix")?;
    let max_net_usage_words = cursor.read_varuint32().in_envelope("max_net_usage_words")?;
    let max_cpu_usage_ms = cursor.read_u8().in_envelope("max_cpu_usage_ms")?;
    let delay_sec = cursor.read_varuint32().in_envelope("delay_sec")?;
    let context_free_actions = cursor.read_array(read_action).in_envelope("context_free_actions")?;
    let actions = cursor.read_array(read_action).in_envelope("actions")?;

    let transaction_extensions = if cursor.is_empty() {
        Vec::new()
    } else {
        cursor.read_array(read_extension).in_envelope("transaction_extensions")?
    };

    if !cursor.is_empty() {
        return Err(DecodeError::MalformedTransaction {
            reason: format!("{} trailing byte(s) after transaction_extensions", cursor.remaining()),
            source: None,
        });
    }

    Ok(RawTransaction {
        expiration,
        ref_block_num,
        ref_block_prefix,
        max_net_usage_words,
        max_cpu_usage_ms,
        delay_sec,
        context_free_actions,
        actions,
        transaction_extensions,
    })
}

/// Parse a hex string (optionally `0x`-prefixed, surrounding whitespace
/// ignored) into bytes
pub fn decode_hex(input: &str) -> DecodeResult<Vec<u8>> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    hex::decode(digits).map_err(|e| DecodeError::MalformedTransaction {
        reason: format!("invalid hex: {}", e),
        source: None,
    })
}
