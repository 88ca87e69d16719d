//! Data models for ABIs, decoded transactions and action traces

pub mod abi;
pub mod trace;
pub mod transaction;

pub use self::abi::AbiDocument;
pub use self::trace::{ActionTrace, flatten_traces};
pub use self::transaction::{ActionData, ParsedAction, ParsedTransaction, PermissionLevel};
