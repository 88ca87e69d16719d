//! Decoding of built-in types into JSON values

use serde_json::{json, Value};
use time::macros::format_description;
use time::OffsetDateTime;

use crate::abi::types::BuiltinType;
use crate::constants::wire::{
    BLOCK_INTERVAL_MS, BLOCK_TIMESTAMP_EPOCH_MS, PUBLIC_KEY_DATA_LEN, SIGNATURE_DATA_LEN,
};
use crate::errors::{DecodeError, DecodeResult};
use crate::serialization::ByteCursor;

/// Read one built-in value.
///
/// Integers up to 32 bits become JSON numbers; wider integers become decimal
/// strings so no precision is lost in JavaScript consumers.
pub fn read_builtin(ty: BuiltinType, cursor: &mut ByteCursor<'_>) -> DecodeResult<Value> {
    let value = match ty {
        BuiltinType::Bool => match cursor.read_u8()? {
            0 => Value::Bool(false),
            1 => Value::Bool(true),
            other => return Err(DecodeError::InvalidData(format!("bool byte {} is neither 0 nor 1", other))),
        },
        BuiltinType::Int8 => Value::from(cursor.read_i8()?),
        BuiltinType::Uint8 => Value::from(cursor.read_u8()?),
        BuiltinType::Int16 => Value::from(cursor.read_i16()?),
        BuiltinType::Uint16 => Value::from(cursor.read_u16()?),
        BuiltinType::Int32 => Value::from(cursor.read_i32()?),
        BuiltinType::Uint32 => Value::from(cursor.read_u32()?),
        BuiltinType::Int64 => Value::String(cursor.read_i64()?.to_string()),
        BuiltinType::Uint64 => Value::String(cursor.read_u64()?.to_string()),
        BuiltinType::Int128 => Value::String(cursor.read_i128()?.to_string()),
        BuiltinType::Uint128 => Value::String(cursor.read_u128()?.to_string()),
        BuiltinType::VarInt32 => Value::from(cursor.read_varint32()?),
        BuiltinType::VarUint32 => Value::from(cursor.read_varuint32()?),
        BuiltinType::Float32 => Value::from(f64::from(cursor.read_f32()?)),
        BuiltinType::Float64 => Value::from(cursor.read_f64()?),
        BuiltinType::TimePoint => {
            let micros = cursor.read_i64()?;
            Value::String(format_millis(micros.div_euclid(1000), true)?)
        }
        BuiltinType::TimePointSec => Value::String(format_time_point_sec(cursor.read_u32()?)?),
        BuiltinType::BlockTimestamp => {
            let slot = i64::from(cursor.read_u32()?);
            Value::String(format_millis(slot * BLOCK_INTERVAL_MS + BLOCK_TIMESTAMP_EPOCH_MS, true)?)
        }
        BuiltinType::Name => Value::String(cursor.read_name()?),
        BuiltinType::Bytes => Value::String(hex::encode(cursor.read_blob()?)),
        BuiltinType::String => Value::String(cursor.read_string()?),
        BuiltinType::Checksum160 => Value::String(hex::encode(cursor.read_bytes(20)?)),
        BuiltinType::Checksum256 => Value::String(hex::encode(cursor.read_bytes(32)?)),
        BuiltinType::Checksum512 => Value::String(hex::encode(cursor.read_bytes(64)?)),
        BuiltinType::PublicKey => read_public_key(cursor)?,
        BuiltinType::Signature => read_signature(cursor)?,
        BuiltinType::Symbol => {
            let (precision, code) = split_symbol(cursor.read_u64()?)?;
            Value::String(format!("{},{}", precision, code))
        }
        BuiltinType::SymbolCode => Value::String(symbol_code_to_string(cursor.read_u64()?)?),
        BuiltinType::Asset => Value::String(read_asset(cursor)?),
        BuiltinType::ExtendedAsset => {
            let quantity = read_asset(cursor)?;
            let contract = cursor.read_name()?;
            json!({ "quantity": quantity, "contract": contract })
        }
    };
    Ok(value)
}

/// Render seconds since the Unix epoch as `YYYY-MM-DDTHH:MM:SS`
pub fn format_time_point_sec(seconds: u32) -> DecodeResult<String> {
    format_millis(i64::from(seconds) * 1000, false)
}

fn format_millis(millis: i64, with_fraction: bool) -> DecodeResult<String> {
    let nanos = i128::from(millis) * 1_000_000;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|e| DecodeError::InvalidData(format!("timestamp {}ms out of range: {}", millis, e)))?;
    let formatted = if with_fraction {
        dt.format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]"
        ))
    } else {
        dt.format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
    };
    formatted.map_err(|e| DecodeError::InvalidData(format!("timestamp {}ms not formattable: {}", millis, e)))
}

fn symbol_code_to_string(raw: u64) -> DecodeResult<String> {
    let mut code = String::new();
    let mut rest = raw;
    while rest != 0 {
        let c = (rest & 0xff) as u8;
        if !c.is_ascii_uppercase() {
            return Err(DecodeError::InvalidData(format!("symbol code {:#x} contains non A-Z byte {:#x}", raw, c)));
        }
        code.push(c as char);
        rest >>= 8;
    }
    Ok(code)
}

fn split_symbol(raw: u64) -> DecodeResult<(u8, String)> {
    let precision = (raw & 0xff) as u8;
    Ok((precision, symbol_code_to_string(raw >> 8)?))
}

fn read_asset(cursor: &mut ByteCursor<'_>) -> DecodeResult<String> {
    let amount = cursor.read_i64()?;
    let (precision, code) = split_symbol(cursor.read_u64()?)?;
    Ok(format!("{} {}", format_amount(amount, precision), code))
}

fn format_amount(amount: i64, precision: u8) -> String {
    let digits = amount.unsigned_abs().to_string();
    let precision = usize::from(precision);
    let sign = if amount < 0 { "-" } else { "" };
    if precision == 0 {
        return format!("{}{}", sign, digits);
    }
    let padded = format!("{:0>width$}", digits, width = precision + 1);
    let (whole, fraction) = padded.split_at(padded.len() - precision);
    format!("{}{}.{}", sign, whole, fraction)
}

fn key_type_name(tag: u8) -> DecodeResult<&'static str> {
    match tag {
        0 => Ok("K1"),
        1 => Ok("R1"),
        2 => Ok("WA"),
        other => Err(DecodeError::InvalidData(format!("unknown key type {}", other))),
    }
}

fn read_public_key(cursor: &mut ByteCursor<'_>) -> DecodeResult<Value> {
    let key_type = key_type_name(cursor.read_u8()?)?;
    let data = hex::encode(cursor.read_bytes(PUBLIC_KEY_DATA_LEN)?);
    if key_type == "WA" {
        let user_presence = cursor.read_u8()?;
        let rpid = cursor.read_string()?;
        return Ok(json!({ "type": key_type, "data": data, "user_presence": user_presence, "rpid": rpid }));
    }
    Ok(json!({ "type": key_type, "data": data }))
}

fn read_signature(cursor: &mut ByteCursor<'_>) -> DecodeResult<Value> {
    let key_type = key_type_name(cursor.read_u8()?)?;
    let data = hex::encode(cursor.read_bytes(SIGNATURE_DATA_LEN)?);
    if key_type == "WA" {
        let auth_data = hex::encode(cursor.read_blob()?);
        let client_json = cursor.read_string()?;
        return Ok(json!({ "type": key_type, "data": data, "auth_data": auth_data, "client_json": client_json }));
    }
    Ok(json!({ "type": key_type, "data": data }))
}
