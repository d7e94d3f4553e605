//! Bounds-checked little-endian reads over datagram bytes.
//!
//! Every read checks `offset + width` against the buffer length before
//! touching it, with overflow treated as truncation. Nothing here panics on
//! short or hostile input.

use super::{FieldType, Value};
use crate::{Result, TelemetryError};

/// Fail with `TruncatedBuffer` unless `data` holds at least `needed` bytes.
pub fn ensure_len(data: &[u8], needed: usize, context: &str) -> Result<()> {
    if data.len() < needed {
        return Err(TelemetryError::truncated(context, needed, data.len()));
    }
    Ok(())
}

/// Decode a single field at `offset`.
///
/// Returns the decoded value and the number of bytes consumed, which is
/// always `field.size()` on success.
pub fn read_value(data: &[u8], offset: usize, field: FieldType) -> Result<(Value, usize)> {
    let mut reader = WireReader::at(data, offset, "field");
    let value = match field {
        FieldType::UInt8 => Value::UInt8(reader.u8()?),
        FieldType::Int8 => Value::Int8(reader.i8()?),
        FieldType::UInt16 => Value::UInt16(reader.u16()?),
        FieldType::Int16 => Value::Int16(reader.i16()?),
        FieldType::UInt32 => Value::UInt32(reader.u32()?),
        FieldType::UInt64 => Value::UInt64(reader.u64()?),
        FieldType::Float32 => Value::Float32(reader.f32()?),
        FieldType::Float64 => Value::Float64(reader.f64()?),
        FieldType::Text(width) => Value::Text(reader.text(width, "text")?),
    };
    Ok((value, field.size()))
}

/// Sequential reader over a datagram.
///
/// `context` names what is being decoded and ends up in truncation errors.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    data: &'a [u8],
    pos: usize,
    context: &'static str,
}

impl<'a> WireReader<'a> {
    pub fn new(data: &'a [u8], context: &'static str) -> Self {
        Self { data, pos: 0, context }
    }

    pub fn at(data: &'a [u8], offset: usize, context: &'static str) -> Self {
        Self { data, pos: offset, context }
    }

    /// Current byte position from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute position. Reads past the end still fail.
    pub fn seek(&mut self, offset: usize) {
        self.pos = offset;
    }

    pub fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(count).ok_or_else(|| {
            TelemetryError::truncated(self.context, usize::MAX, self.data.len())
        })?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| TelemetryError::truncated(self.context, end, self.data.len()))?;
        self.pos = end;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8> {
        self.take_array().map(i8::from_le_bytes)
    }

    #[inline]
    pub fn u16(&mut self) -> Result<u16> {
        self.take_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn i16(&mut self) -> Result<i16> {
        self.take_array().map(i16::from_le_bytes)
    }

    #[inline]
    pub fn u32(&mut self) -> Result<u32> {
        self.take_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn u64(&mut self) -> Result<u64> {
        self.take_array().map(u64::from_le_bytes)
    }

    #[inline]
    pub fn f32(&mut self) -> Result<f32> {
        self.take_array().map(f32::from_le_bytes)
    }

    #[inline]
    pub fn f64(&mut self) -> Result<f64> {
        self.take_array().map(f64::from_le_bytes)
    }

    /// Read exactly `width` bytes of NUL-padded UTF-8.
    ///
    /// Content after the first NUL is discarded. The cursor always advances
    /// by `width`, even when the text is invalid.
    pub fn text(&mut self, width: usize, field: &str) -> Result<String> {
        let raw = self.take(width)?;
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        std::str::from_utf8(&raw[..end]).map(str::to_owned).map_err(|source| {
            TelemetryError::InvalidText { field: field.to_string(), source }
        })
    }

    pub fn u8_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        self.take_array()
    }

    pub fn u16_array<const N: usize>(&mut self) -> Result<[u16; N]> {
        let mut out = [0u16; N];
        for slot in &mut out {
            *slot = self.u16()?;
        }
        Ok(out)
    }

    pub fn f32_array<const N: usize>(&mut self) -> Result<[f32; N]> {
        let mut out = [0f32; N];
        for slot in &mut out {
            *slot = self.f32()?;
        }
        Ok(out)
    }

    /// Decode `N` fixed-stride records in slot order.
    ///
    /// Each record starts exactly `stride` bytes after the previous one,
    /// regardless of how many bytes `decode` consumed.
    pub fn records<T, const N: usize>(
        &mut self,
        stride: usize,
        mut decode: impl FnMut(&mut WireReader<'a>) -> Result<T>,
    ) -> Result<[T; N]> {
        let start = self.pos;
        let mut out = Vec::with_capacity(N);
        for slot in 0..N {
            self.pos = start.saturating_add(slot.saturating_mul(stride));
            out.push(decode(self)?);
        }
        self.pos = start.saturating_add(N.saturating_mul(stride));
        out.try_into().map_err(|v: Vec<T>| TelemetryError::truncated(self.context, N, v.len()))
    }
}
