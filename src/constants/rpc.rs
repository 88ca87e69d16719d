//! Node RPC constants

/// Node queried when neither the environment nor the CLI names one
pub const DEFAULT_NODE_URL: &str = "https://eos.greymass.com";

/// Path of the chain plugin endpoint returning a contract's ABI
pub const GET_ABI_PATH: &str = "/v1/chain/get_abi";

/// HTTP timeout applied to ABI fetches, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the node URL
pub const NODE_URL_ENV: &str = "EOSIO_NODE_URL";

/// Environment variable overriding the HTTP timeout
pub const TIMEOUT_ENV: &str = "EOSIO_RPC_TIMEOUT_SECS";
