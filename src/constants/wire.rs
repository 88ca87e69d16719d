//! EOSIO binary format constants

/// Alphabet of the base-32 account name encoding
pub const NAME_CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

/// Maximum characters in an encoded name
pub const NAME_MAX_LEN: usize = 13;

/// A varuint32 never spans more than five bytes
pub const VARUINT32_MAX_BYTES: usize = 5;

/// Size of a K1/R1 compressed public key
pub const PUBLIC_KEY_DATA_LEN: usize = 33;

/// Size of a K1/R1 compact signature
pub const SIGNATURE_DATA_LEN: usize = 65;

/// Block timestamps count half-second slots from this epoch (2000-01-01T00:00:00Z), in ms
pub const BLOCK_TIMESTAMP_EPOCH_MS: i64 = 946_684_800_000;

/// Length of a block timestamp slot, in ms
pub const BLOCK_INTERVAL_MS: i64 = 500;

/// Deepest struct/array nesting the action decoder will follow
pub const MAX_DECODE_DEPTH: usize = 32;

/// Longest array accepted when its elements occupy no bytes on the wire
pub const MAX_ARRAY_LEN: usize = 65_536;
