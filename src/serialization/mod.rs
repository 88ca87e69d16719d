//! EOSIO binary serialization primitives

mod cursor;
pub mod name;

pub use self::cursor::ByteCursor;
pub use self::name::{name_to_string, string_to_name};
