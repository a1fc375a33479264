use bytes::{BufMut, BytesMut};
use tracing::{debug, warn};

use crate::error::{CodecError, Result};
use crate::record::Record;
use crate::wire::read_u8;

/// The record count travels in a single byte.
pub const MAX_RECORDS: usize = 255;

/// How decode treats a trailing record count that differs from the leading one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountCheck {
    /// Fail with `CodecError::CountMismatch`.
    #[default]
    Strict,
    /// Log a warning and return the packet.
    Warn,
}

/// A decoded payload: codec id plus records in transmission order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Packet {
    /// Codec identifier byte. Carried as-is, never validated.
    pub codec_id: u8,
    pub records: Vec<Record>,
}

impl Packet {
    pub fn new(codec_id: u8, records: Vec<Record>) -> Self {
        Self { codec_id, records }
    }

    /// A packet carrying exactly one record.
    pub fn single(codec_id: u8, record: Record) -> Self {
        Self::new(codec_id, vec![record])
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Exact number of bytes `encode` writes: codec id, both counts and the records.
    pub fn encoded_len(&self) -> usize {
        3 + self.records.iter().map(Record::encoded_len).sum::<usize>()
    }

    /// Append the packet to `dst`.
    ///
    /// Wire format:
    /// ```text
    /// ┌──────────┬───────┬─────────────────┬───────┐
    /// │ Codec ID │ Count │ Records         │ Count │
    /// │ (1B)     │ (1B)  │ (variable)      │ (1B)  │
    /// └──────────┴───────┴─────────────────┴───────┘
    /// ```
    pub fn encode(&self, dst: &mut BytesMut) -> Result<()> {
        if self.records.len() > MAX_RECORDS {
            return Err(CodecError::TooManyRecords(self.records.len()));
        }
        let count = self.records.len() as u8;

        dst.reserve(self.encoded_len());
        dst.put_u8(self.codec_id);
        dst.put_u8(count);
        for record in &self.records {
            record.encode(dst)?;
        }
        dst.put_u8(count);
        Ok(())
    }

    /// Encode into a fresh buffer.
    pub fn to_bytes(&self) -> Result<BytesMut> {
        let mut buf = BytesMut::with_capacity(self.encoded_len());
        self.encode(&mut buf)?;
        Ok(buf)
    }

    /// Decode a packet that must span all of `src`.
    pub fn decode(src: &[u8], count_check: CountCheck) -> Result<Self> {
        let mut cursor = src;
        let codec_id = read_u8(&mut cursor)?;
        let count = read_u8(&mut cursor)?;

        let mut records = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            let (record, consumed) = Record::decode(cursor)?;
            cursor = &cursor[consumed..];
            records.push(record);
        }

        let trailing = read_u8(&mut cursor)?;
        if !cursor.is_empty() {
            return Err(CodecError::TrailingData(cursor.len()));
        }

        if trailing != count {
            match count_check {
                CountCheck::Strict => {
                    return Err(CodecError::CountMismatch {
                        leading: count,
                        trailing,
                    });
                }
                CountCheck::Warn => {
                    warn!(leading = count, trailing, "record count mismatch");
                }
            }
        }

        debug!(codec_id, records = records.len(), "decoded packet");
        Ok(Self { codec_id, records })
    }
}
