//! Decoded transaction model

use serde::{Serialize, Deserialize};
use serde_json::{Map, Value};

/// Authorization entry of an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionLevel {
    /// Authorizing account
    pub actor: String,
    /// Permission of `actor` being used
    pub permission: String,
}

/// Payload of an action.
///
/// Either the ABI-decoded fields, in declaration order, or the original
/// payload as lowercase hex when structured decoding was not possible.
/// Serialized untagged: consumers see a JSON object or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionData {
    Decoded(Map<String, Value>),
    Raw(String),
}

impl ActionData {
    /// Whether the payload was decoded through the contract ABI
    pub fn is_decoded(&self) -> bool {
        matches!(self, ActionData::Decoded(_))
    }

    /// Decoded fields, if any
    pub fn as_decoded(&self) -> Option<&Map<String, Value>> {
        match self {
            ActionData::Decoded(fields) => Some(fields),
            ActionData::Raw(_) => None,
        }
    }

    /// Raw hex payload, if decoding was skipped or failed
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ActionData::Raw(hex) => Some(hex),
            ActionData::Decoded(_) => None,
        }
    }
}

/// A single contract action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAction {
    /// Contract account
    pub account: String,
    /// Action name
    pub name: String,
    /// Authorizations, in wire order
    pub authorization: Vec<PermissionLevel>,
    /// Decoded payload or raw hex fallback
    pub data: ActionData,
    /// Original payload as hex
    pub hex_data: String,
}

/// Extension attached to a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionExtension {
    #[serde(rename = "type")]
    pub ty: u16,
    /// Extension payload as hex
    pub data: String,
}

/// A fully decoded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedTransaction {
    /// Expiration time, ISO-8601 without zone (UTC)
    pub expiration: String,
    pub ref_block_num: u16,
    pub ref_block_prefix: u32,
    pub max_net_usage_words: u32,
    pub max_cpu_usage_ms: u8,
    pub delay_sec: u32,
    /// Context-free actions, in wire order
    pub context_free_actions: Vec<ParsedAction>,
    /// Actions, in wire (execution) order
    pub actions: Vec<ParsedAction>,
    pub transaction_extensions: Vec<TransactionExtension>,
}

impl ParsedTransaction {
    /// Number of actions whose payload fell back to raw hex
    pub fn undecoded_action_count(&self) -> usize {
        self.context_free_actions
            .iter()
            .chain(self.actions.iter())
            .filter(|a| !a.data.is_decoded())
            .count()
    }
}
