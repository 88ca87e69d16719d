//! Contract ABI model, as returned by the node's `get_abi` endpoint

use serde::{Serialize, Deserialize};

/// ABI document describing a contract's actions and their payload layouts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AbiDocument {
    /// ABI version string (e.g. `eosio::abi/1.1`)
    #[serde(default)]
    pub version: String,
    /// Type aliases
    #[serde(default)]
    pub types: Vec<AbiTypeDef>,
    /// Struct layouts
    #[serde(default)]
    pub structs: Vec<AbiStruct>,
    /// Actions and the struct carrying each one's payload
    #[serde(default)]
    pub actions: Vec<AbiAction>,
    /// Tables; not used for action decoding
    #[serde(default)]
    pub tables: Vec<AbiTable>,
    /// Tagged unions
    #[serde(default)]
    pub variants: Vec<AbiVariant>,
}

/// Alias `new_type_name` for `ty`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiTypeDef {
    pub new_type_name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Struct definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiStruct {
    /// Struct name
    pub name: String,
    /// Struct whose fields come first; empty or absent when there is none
    #[serde(default)]
    pub base: Option<String>,
    /// Own fields, in wire order
    #[serde(default)]
    pub fields: Vec<AbiField>,
}

/// Struct field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiField {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

/// Action definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiAction {
    /// Action name
    pub name: String,
    /// Name of the struct encoding the payload
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub ricardian_contract: String,
}

/// Table definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiTable {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub index_type: String,
    #[serde(default)]
    pub key_names: Vec<String>,
    #[serde(default)]
    pub key_types: Vec<String>,
}

/// Variant definition; the wire form is a varuint32 index into `types`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbiVariant {
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
}

impl AbiStruct {
    /// Name of the base struct, if one is declared
    pub fn base_name(&self) -> Option<&str> {
        self.base.as_deref().filter(|b| !b.is_empty())
    }
}

impl AbiDocument {
    /// Find an action by name
    pub fn find_action(&self, name: &str) -> Option<&AbiAction> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Find a struct by name
    pub fn find_struct(&self, name: &str) -> Option<&AbiStruct> {
        self.structs.iter().find(|s| s.name == name)
    }

    /// Find a variant by name
    pub fn find_variant(&self, name: &str) -> Option<&AbiVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// Find the target of a type alias
    pub fn find_alias(&self, name: &str) -> Option<&str> {
        self.types
            .iter()
            .find(|t| t.new_type_name == name)
            .map(|t| t.ty.as_str())
    }
}
