//! ABI-driven decoding of action payloads

use log::trace;
use serde_json::{json, Map, Value};

use crate::abi::types::AbiType;
use crate::abi::values;
use crate::constants::wire::MAX_DECODE_DEPTH;
use crate::errors::{DecodeError, DecodeResult};
use crate::models::abi::{AbiDocument, AbiStruct};
use crate::serialization::ByteCursor;

/// Decoder bound to one contract's ABI
pub struct ActionDecoder<'a> {
    abi: &'a AbiDocument,
}

fn enter(depth: usize) -> DecodeResult<()> {
    if depth > MAX_DECODE_DEPTH {
        return Err(DecodeError::InvalidData(format!(
            "type nesting deeper than {} levels (recursive struct, base or alias?)",
            MAX_DECODE_DEPTH
        )));
    }
    Ok(())
}

impl<'a> ActionDecoder<'a> {
    pub fn new(abi: &'a AbiDocument) -> Self {
        Self { abi }
    }

    /// Decode the payload of `action_name`.
    ///
    /// The payload must be consumed exactly; leftover bytes mean the ABI does
    /// not describe this data and the decode is rejected.
    pub fn decode_action(&self, action_name: &str, data: &[u8]) -> DecodeResult<Map<String, Value>> {
        let action = self
            .abi
            .find_action(action_name)
            .ok_or_else(|| DecodeError::UnknownAction(action_name.to_string()))?;
        let struct_def = self.resolve_struct(&action.ty)?;

        let mut cursor = ByteCursor::new(data);
        let mut fields = Map::new();
        self.decode_struct_fields(struct_def, &mut cursor, &mut fields, 0)?;

        if !cursor.is_empty() {
            return Err(DecodeError::InvalidData(format!(
                "{} trailing byte(s) after decoding action '{}'",
                cursor.remaining(),
                action_name
            )));
        }
        Ok(fields)
    }

    /// Decode a single struct from `cursor`
    pub fn decode_struct(&self, name: &str, cursor: &mut ByteCursor<'_>) -> DecodeResult<Map<String, Value>> {
        let struct_def = self.resolve_struct(name)?;
        let mut fields = Map::new();
        self.decode_struct_fields(struct_def, cursor, &mut fields, 0)?;
        Ok(fields)
    }

    /// Find a struct by name, looking through type aliases
    fn resolve_struct(&self, name: &str) -> DecodeResult<&'a AbiStruct> {
        let mut current = name;
        for _ in 0..=MAX_DECODE_DEPTH {
            if let Some(def) = self.abi.find_struct(current) {
                return Ok(def);
            }
            match self.abi.find_alias(current) {
                Some(target) => current = target,
                None => break,
            }
        }
        Err(DecodeError::UnknownStruct(name.to_string()))
    }

    /// Base fields first, then own fields, both in declaration order
    fn decode_struct_fields(
        &self,
        def: &AbiStruct,
        cursor: &mut ByteCursor<'_>,
        out: &mut Map<String, Value>,
        depth: usize,
    ) -> DecodeResult<()> {
        enter(depth)?;
        if let Some(base) = def.base_name() {
            let base_def = self
                .abi
                .find_struct(base)
                .ok_or_else(|| DecodeError::UnknownStruct(base.to_string()))?;
            self.decode_struct_fields(base_def, cursor, out, depth + 1)?;
        }

        for field in &def.fields {
            let ty = AbiType::parse(&field.ty);
            if matches!(ty, AbiType::Extension(_)) && cursor.is_empty() {
                trace!("Binary extension field {}.{} absent", def.name, field.name);
                continue;
            }
            let value = self.decode_value(&ty, &field.name, cursor, depth + 1)?;
            out.insert(field.name.clone(), value);
        }
        Ok(())
    }

    fn decode_value(
        &self,
        ty: &AbiType,
        field: &str,
        cursor: &mut ByteCursor<'_>,
        depth: usize,
    ) -> DecodeResult<Value> {
        enter(depth)?;
        match ty {
            AbiType::Builtin(builtin) => values::read_builtin(*builtin, cursor),
            AbiType::Array(inner) => {
                let items = cursor.read_array(|c| self.decode_value(inner, field, c, depth + 1))?;
                Ok(Value::Array(items))
            }
            AbiType::Optional(inner) => match cursor.read_u8()? {
                0 => Ok(Value::Null),
                1 => self.decode_value(inner, field, cursor, depth + 1),
                other => Err(DecodeError::InvalidData(format!(
                    "optional flag {} for field '{}' is neither 0 nor 1",
                    other, field
                ))),
            },
            AbiType::Extension(inner) => {
                if cursor.is_empty() {
                    Ok(Value::Null)
                } else {
                    self.decode_value(inner, field, cursor, depth + 1)
                }
            }
            AbiType::Named(name) => self.decode_named(name, field, cursor, depth),
        }
    }

    /// Resolve a non built-in name: alias, then struct, then variant
    fn decode_named(
        &self,
        name: &str,
        field: &str,
        cursor: &mut ByteCursor<'_>,
        depth: usize,
    ) -> DecodeResult<Value> {
        if let Some(target) = self.abi.find_alias(name) {
            return self.decode_value(&AbiType::parse(target), field, cursor, depth + 1);
        }

        if let Some(def) = self.abi.find_struct(name) {
            let mut fields = Map::new();
            self.decode_struct_fields(def, cursor, &mut fields, depth + 1)?;
            return Ok(Value::Object(fields));
        }

        if let Some(variant) = self.abi.find_variant(name) {
            let index = cursor.read_varuint32()? as usize;
            let type_name = variant.types.get(index).ok_or_else(|| {
                DecodeError::InvalidData(format!(
                    "variant '{}' has no alternative {} (field '{}')",
                    name, index, field
                ))
            })?;
            let value = self.decode_value(&AbiType::parse(type_name), field, cursor, depth + 1)?;
            return Ok(json!([type_name, value]));
        }

        Err(DecodeError::UnsupportedType {
            field: field.to_string(),
            type_name: name.to_string(),
        })
    }
}
