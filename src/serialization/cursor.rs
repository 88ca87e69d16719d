//! Cursor over an EOSIO binary buffer

use crate::constants::wire::{MAX_ARRAY_LEN, VARUINT32_MAX_BYTES};
use crate::errors::{DecodeError, DecodeResult};
use super::name;

/// Reader over a borrowed byte buffer.
///
/// Every read advances the offset by exactly the number of bytes consumed.
/// The offset never moves backwards and never passes the end of the buffer;
/// a primitive read that would do so fails with
/// [`DecodeError::TruncatedBuffer`] and leaves the offset untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.offset
    }

    /// Bytes left to read
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Whether every byte has been consumed
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Read exactly `n` raw bytes
    pub fn read_bytes(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        if n > self.remaining() {
            return Err(DecodeError::TruncatedBuffer {
                needed: n,
                remaining: self.remaining(),
                offset: self.offset,
            });
        }
        let slice = &self.data[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn read_fixed<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.read_fixed::<1>()?[0])
    }

    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        Ok(u16::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        Ok(u32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        Ok(u64::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_u128(&mut self) -> DecodeResult<u128> {
        Ok(u128::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i8(&mut self) -> DecodeResult<i8> {
        Ok(i8::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        Ok(i16::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        Ok(i32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        Ok(i64::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_i128(&mut self) -> DecodeResult<i128> {
        Ok(i128::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        Ok(f32::from_le_bytes(self.read_fixed()?))
    }

    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        Ok(f64::from_le_bytes(self.read_fixed()?))
    }

    /// Read a little-endian base-128 varint (7 data bits per byte, high bit
    /// set on every byte but the last).
    pub fn read_varuint32(&mut self) -> DecodeResult<u32> {
        let start = self.offset;
        let mut value: u64 = 0;
        for i in 0..VARUINT32_MAX_BYTES {
            let byte = match self.read_u8() {
                Ok(b) => b,
                Err(e) => {
                    self.offset = start;
                    return Err(e);
                }
            };
            value |= u64::from(byte & 0x7f) << (7 * i);
            if byte & 0x80 == 0 {
                return u32::try_from(value).map_err(|_| {
                    self.offset = start;
                    DecodeError::InvalidData(format!("varuint32 at offset {} overflows 32 bits", start))
                });
            }
        }
        self.offset = start;
        Err(DecodeError::InvalidData(format!(
            "varuint32 at offset {} is longer than {} bytes",
            start, VARUINT32_MAX_BYTES
        )))
    }

    /// Read a zig-zag encoded signed varint
    pub fn read_varint32(&mut self) -> DecodeResult<i32> {
        let raw = self.read_varuint32()?;
        Ok(((raw >> 1) as i32) ^ -((raw & 1) as i32))
    }

    /// Read a varuint32 length and use it as a `usize`
    pub fn read_length(&mut self) -> DecodeResult<usize> {
        Ok(self.read_varuint32()? as usize)
    }

    /// Read a length-prefixed byte blob
    pub fn read_blob(&mut self) -> DecodeResult<&'a [u8]> {
        let start = self.offset;
        let len = self.read_length()?;
        self.read_bytes(len).map_err(|e| {
            self.offset = start;
            e
        })
    }

    /// Read a length-prefixed UTF-8 string
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let start = self.offset;
        let bytes = self.read_blob()?;
        String::from_utf8(bytes.to_vec()).map_err(|e| {
            DecodeError::InvalidData(format!("string at offset {} is not UTF-8: {}", start, e))
        })
    }

    /// Read a varuint32 element count, then `read_element` that many times.
    ///
    /// Elements that consume bytes are bounded by the buffer itself. Once an
    /// element reads nothing, a count above [`MAX_ARRAY_LEN`] is rejected with
    /// [`DecodeError::InvalidData`].
    pub fn read_array<T, F>(&mut self, mut read_element: F) -> DecodeResult<Vec<T>>
    where
        F: FnMut(&mut Self) -> DecodeResult<T>,
    {
        let start = self.offset;
        let count = self.read_length()?;
        // Untrusted count; cap the preallocation.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            let before = self.offset;
            items.push(read_element(self)?);
            if self.offset == before && count > MAX_ARRAY_LEN {
                return Err(DecodeError::InvalidData(format!(
                    "array at offset {} claims {} zero-width elements (limit {})",
                    start, count, MAX_ARRAY_LEN
                )));
            }
        }
        Ok(items)
    }

    /// Read an 8-byte account/action name and render it as text
    pub fn read_name(&mut self) -> DecodeResult<String> {
        Ok(name::name_to_string(self.read_u64()?))
    }
}
