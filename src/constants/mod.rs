//! Constants used throughout the decoder

pub mod rpc;
pub mod wire;
