//! EOSIO account/action name codec
//!
//! Names are 64-bit integers holding up to 12 five-bit symbols followed by
//! one four-bit symbol, most significant first.

use crate::constants::wire::{NAME_CHARMAP, NAME_MAX_LEN};
use crate::errors::{DecodeError, DecodeResult};

/// Render a packed name as text, dropping trailing `.` padding
pub fn name_to_string(value: u64) -> String {
    let mut chars = [b'.'; NAME_MAX_LEN];
    let mut tmp = value;
    for i in 0..NAME_MAX_LEN {
        let (mask, shift) = if i == 0 { (0x0f, 4) } else { (0x1f, 5) };
        chars[NAME_MAX_LEN - 1 - i] = NAME_CHARMAP[(tmp & mask) as usize];
        tmp >>= shift;
    }
    let end = chars.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
    String::from_utf8_lossy(&chars[..end]).into_owned()
}

fn symbol_value(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Pack a textual name into its 64-bit form
pub fn string_to_name(text: &str) -> DecodeResult<u64> {
    let bytes = text.as_bytes();
    if bytes.len() > NAME_MAX_LEN {
        return Err(DecodeError::InvalidData(format!("name '{}' is longer than {} characters", text, NAME_MAX_LEN)));
    }

    let mut value = 0u64;
    for (i, &c) in bytes.iter().enumerate() {
        let symbol = symbol_value(c)
            .ok_or_else(|| DecodeError::InvalidData(format!("invalid character '{}' in name '{}'", c as char, text)))?;
        if i < NAME_MAX_LEN - 1 {
            value |= (symbol & 0x1f) << (64 - 5 * (i + 1));
        } else {
            if symbol > 0x0f {
                return Err(DecodeError::InvalidData(format!("13th character of name '{}' must be in [.1-5a-j]", text)));
            }
            value |= symbol;
        }
    }
    Ok(value)
}
