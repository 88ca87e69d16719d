//! ABI type names and their dispatch table

/// Types with a fixed binary layout known without consulting an ABI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinType {
    Bool,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Int128,
    Uint128,
    VarInt32,
    VarUint32,
    Float32,
    Float64,
    TimePoint,
    TimePointSec,
    BlockTimestamp,
    Name,
    Bytes,
    String,
    Checksum160,
    Checksum256,
    Checksum512,
    PublicKey,
    Signature,
    Symbol,
    SymbolCode,
    Asset,
    ExtendedAsset,
}

const BUILTIN_TYPES: &[(&str, BuiltinType)] = &[
    ("bool", BuiltinType::Bool),
    ("int8", BuiltinType::Int8),
    ("uint8", BuiltinType::Uint8),
    ("int16", BuiltinType::Int16),
    ("uint16", BuiltinType::Uint16),
    ("int32", BuiltinType::Int32),
    ("uint32", BuiltinType::Uint32),
    ("int64", BuiltinType::Int64),
    ("uint64", BuiltinType::Uint64),
    ("int128", BuiltinType::Int128),
    ("uint128", BuiltinType::Uint128),
    ("varint32", BuiltinType::VarInt32),
    ("varuint32", BuiltinType::VarUint32),
    ("float32", BuiltinType::Float32),
    ("float64", BuiltinType::Float64),
    ("time_point", BuiltinType::TimePoint),
    ("time_point_sec", BuiltinType::TimePointSec),
    ("block_timestamp_type", BuiltinType::BlockTimestamp),
    ("name", BuiltinType::Name),
    ("bytes", BuiltinType::Bytes),
    ("string", BuiltinType::String),
    ("checksum160", BuiltinType::Checksum160),
    ("checksum256", BuiltinType::Checksum256),
    ("checksum512", BuiltinType::Checksum512),
    ("public_key", BuiltinType::PublicKey),
    ("signature", BuiltinType::Signature),
    ("symbol", BuiltinType::Symbol),
    ("symbol_code", BuiltinType::SymbolCode),
    ("asset", BuiltinType::Asset),
    ("extended_asset", BuiltinType::ExtendedAsset),
];

impl BuiltinType {
    /// Look up a built-in type by its ABI name
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_TYPES
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, t)| *t)
    }

    /// ABI name of this type
    pub fn name(self) -> &'static str {
        BUILTIN_TYPES
            .iter()
            .find(|(_, t)| *t == self)
            .map(|(n, _)| *n)
            .unwrap_or("unknown")
    }
}

/// A parsed ABI type expression.
///
/// Suffixes are peeled outermost first: `T$` is a binary extension, `T?` an
/// optional, `T[]` an array. Anything that is not a built-in is left as a
/// name for the ABI to resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiType {
    Builtin(BuiltinType),
    Array(Box<AbiType>),
    Optional(Box<AbiType>),
    Extension(Box<AbiType>),
    Named(String),
}

impl AbiType {
    pub fn parse(type_name: &str) -> Self {
        let type_name = type_name.trim();
        if let Some(inner) = type_name.strip_suffix('$') {
            AbiType::Extension(Box::new(Self::parse(inner)))
        } else if let Some(inner) = type_name.strip_suffix('?') {
            AbiType::Optional(Box::new(Self::parse(inner)))
        } else if let Some(inner) = type_name.strip_suffix("[]") {
            AbiType::Array(Box::new(Self::parse(inner)))
        } else if let Some(builtin) = BuiltinType::from_name(type_name) {
            AbiType::Builtin(builtin)
        } else {
            AbiType::Named(type_name.to_string())
        }
    }
}
