//! ABI-driven decoding of contract action payloads
//!
//! Type names from the ABI are parsed into [`AbiType`], a closed enum over
//! the built-in EOSIO types plus array, optional, binary-extension and named
//! (struct, alias or variant) composites. Decoding walks that enum with a
//! [`ByteCursor`](crate::serialization::ByteCursor).

mod decoder;
pub mod types;
pub mod values;
#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

use crate::errors::DecodeResult;
use crate::models::abi::AbiDocument;

pub use self::decoder::ActionDecoder;
pub use self::types::{AbiType, BuiltinType};

/// Decode an action payload into its named fields, in declaration order.
///
/// Fails with `UnknownAction` when the ABI does not list `action_name`,
/// `UnknownStruct` when its payload struct is missing, `UnsupportedType` for
/// an unresolvable field type and `TruncatedBuffer` when the payload is too
/// short. No partial maps are returned.
pub fn decode_action_data(
    abi: &AbiDocument,
    action_name: &str,
    data: &[u8],
) -> DecodeResult<Map<String, Value>> {
    ActionDecoder::new(abi).decode_action(action_name, data)
}
