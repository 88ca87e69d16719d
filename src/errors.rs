//! Error handling for the packed-transaction decoder.
//!
//! This module provides the error taxonomy shared by every decoding stage:
//! the byte cursor, ABI resolution, ABI fetching, and the transaction
//! envelope. Errors raised while decoding a single action are caught by the
//! transaction assembler and turned into a raw-hex fallback; only envelope
//! errors reach the caller.

use thiserror::Error;

/// Main error type for the decoder.
///
/// Each variant corresponds to one category of failure. Variants carry the
/// names or offsets needed to diagnose the problem without a debugger.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// A read would run past the end of the buffer.
    #[error("Truncated buffer: needed {needed} byte(s) at offset {offset}, {remaining} remaining")]
    TruncatedBuffer {
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes left in the buffer.
        remaining: usize,
        /// Cursor offset at the time of the read.
        offset: usize,
    },

    /// Bytes were present but do not form a valid value (bad UTF-8, varint
    /// overflow, unknown variant index, trailing bytes, ...).
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// The ABI does not declare the requested action.
    #[error("Unknown action '{0}'")]
    UnknownAction(String),

    /// A struct referenced by an action, a field, or a `base` is missing.
    #[error("Unknown struct '{0}'")]
    UnknownStruct(String),

    /// A field type name is neither built in nor declared by the ABI.
    #[error("Unsupported type '{type_name}' for field '{field}'")]
    UnsupportedType {
        /// Field being decoded.
        field: String,
        /// Declared type name.
        type_name: String,
    },

    /// The ABI could not be fetched from the node (network or HTTP error).
    #[error("ABI fetch error for '{account}': {reason}")]
    AbiFetch {
        /// Contract account whose ABI was requested.
        account: String,
        /// Human readable cause.
        reason: String,
    },

    /// The node answered but the account has no ABI deployed.
    #[error("No ABI deployed for account '{0}'")]
    AbiNotFound(String),

    /// The outer transaction envelope could not be decoded at all.
    #[error("Malformed transaction: {reason}")]
    MalformedTransaction {
        /// Which part of the envelope failed.
        reason: String,
        /// Underlying decode failure, if any.
        #[source]
        source: Option<Box<DecodeError>>,
    },
}

/// Result type alias for the decoder.
pub type DecodeResult<T> = Result<T, DecodeError>;

impl DecodeError {
    /// Wrap an error raised while decoding the envelope.
    pub fn malformed(reason: impl Into<String>, source: DecodeError) -> Self {
        DecodeError::MalformedTransaction {
            reason: reason.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is the cursor running out of bytes, directly or
    /// wrapped by the envelope decoder.
    pub fn is_truncation(&self) -> bool {
        match self {
            DecodeError::TruncatedBuffer { .. } => true,
            DecodeError::MalformedTransaction { source: Some(inner), .. } => inner.is_truncation(),
            _ => false,
        }
    }
}

/// Extension trait for attaching envelope context to errors.
pub trait ErrorExt<T> {
    /// Convert any decode failure into a `MalformedTransaction` naming the
    /// envelope field being read.
    fn in_envelope(self, field: &str) -> DecodeResult<T>;
}

impl<T> ErrorExt<T> for DecodeResult<T> {
    fn in_envelope(self, field: &str) -> DecodeResult<T> {
        self.map_err(|e| DecodeError::malformed(format!("failed to read {}", field), e))
    }
}
