use std::fmt;

use bytes::{Buf, BufMut};

use crate::error::Result;
use crate::gps::{GpsFix, GPS_ELEMENT_SIZE};
use crate::io::IoReadings;
use crate::wire::{ensure, read_u8};

/// Timestamp (8) + priority (1).
const RECORD_HEADER_SIZE: usize = 9;

/// Urgency of a record.
///
/// Carried as its wire ordinal. Bytes outside the three known levels are kept
/// in `Other` so they survive decode and re-encode unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    #[default]
    Low,
    High,
    /// Generated by an alarm.
    Panic,
    /// Any other ordinal. Serialized as a bare number. Build it with
    /// `Priority::from(u8)`; `Other(0..=2)` encodes as the matching level.
    #[cfg_attr(feature = "serde", serde(untagged))]
    Other(u8),
}

impl Priority {
    /// Lowercase name of a known level, `None` for `Other`.
    pub fn name(self) -> Option<&'static str> {
        match self {
            Priority::Low => Some("low"),
            Priority::High => Some("high"),
            Priority::Panic => Some("panic"),
            Priority::Other(_) => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "other({})", u8::from(*self)),
        }
    }
}

impl From<u8> for Priority {
    fn from(value: u8) -> Self {
        match value {
            0 => Priority::Low,
            1 => Priority::High,
            2 => Priority::Panic,
            other => Priority::Other(other),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        match priority {
            Priority::Low => 0,
            Priority::High => 1,
            Priority::Panic => 2,
            Priority::Other(value) => value,
        }
    }
}

/// One timestamped telemetry sample.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub priority: Priority,
    pub gps: GpsFix,
    pub io: IoReadings,
}

impl Record {
    pub fn new(timestamp: u64, priority: Priority, gps: GpsFix, io: IoReadings) -> Self {
        Self {
            timestamp,
            priority,
            gps,
            io,
        }
    }

    /// Exact number of bytes `encode` writes.
    pub fn encoded_len(&self) -> usize {
        RECORD_HEADER_SIZE + GPS_ELEMENT_SIZE + self.io.encoded_len()
    }

    /// Append the record to `dst`.
    ///
    /// Wire order: timestamp, priority, GPS element, event IO id, total IO
    /// count, then the 1, 2, 4 and 8-byte groups.
    pub fn encode(&self, dst: &mut impl BufMut) -> Result<()> {
        dst.put_u64(self.timestamp);
        dst.put_u8(self.priority.into());
        self.gps.encode(dst);
        self.io.encode(dst)
    }

    /// Decode a record from the start of `src`.
    ///
    /// Records carry no length prefix, so the number of bytes consumed is
    /// returned alongside the record for the caller to advance past it.
    pub fn decode(src: &[u8]) -> Result<(Self, usize)> {
        let mut cursor = src;
        let record = Self::decode_from(&mut cursor)?;
        Ok((record, src.len() - cursor.len()))
    }

    /// Decode a record from the front of a buffer, advancing it.
    pub fn decode_from(src: &mut impl Buf) -> Result<Self> {
        ensure(src, RECORD_HEADER_SIZE)?;
        let timestamp = src.get_u64();
        let priority = Priority::from(read_u8(src)?);
        let gps = GpsFix::decode(src)?;
        let io = IoReadings::decode(src)?;

        Ok(Self {
            timestamp,
            priority,
            gps,
            io,
        })
    }
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::error::CodecError;

    // Record from a Codec 8 sample frame: timestamp 0x016B40D8EA30, priority high,
    // empty GPS fix, event id 1, five IO readings.
    const SAMPLE_RECORD: [u8; 51] = [
        0x00, 0x00, 0x01, 0x6B, 0x40, 0xD8, 0xEA, 0x30, // timestamp
        0x01, // priority
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, // gps
        0x01, 0x05, // event id, total
        0x02, 0x15, 0x03, 0x01, 0x01, // n1
        0x01, 0x42, 0x5E, 0x0F, // n2
        0x01, 0xF1, 0x00, 0x00, 0x60, 0x1A, // n4
        0x01, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // n8
    ];

    #[test]
    fn decode_sample_record() {
        let (record, consumed) = Record::decode(&SAMPLE_RECORD).unwrap();

        assert_eq!(consumed, SAMPLE_RECORD.len());
        assert_eq!(record.timestamp, 0x016B_40D8_EA30);
        assert_eq!(record.priority, Priority::High);
        assert_eq!(record.gps, GpsFix::default());
        assert!(record.gps.is_valid());
        assert_eq!(record.io.event_io_id, 1);
        assert_eq!(record.io.total_count(), 5);
        assert_eq!(record.io.n1.get(0x15), Some(3));
        assert_eq!(record.io.n1.get(0x01), Some(1));
        assert_eq!(record.io.n2.get(0x42), Some(0x5E0F));
        assert_eq!(record.io.n4.get(0xF1), Some(0x601A));
        assert_eq!(record.io.n8.get(0x4E), Some(0));
    }

    #[test]
    fn encode_reproduces_sample() {
        let (record, _) = Record::decode(&SAMPLE_RECORD).unwrap();

        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();

        assert_eq!(&buf[..], &SAMPLE_RECORD[..]);
        assert_eq!(record.encoded_len(), SAMPLE_RECORD.len());
    }

    #[test]
    fn decode_reports_consumed_with_trailing_bytes() {
        let mut wire = SAMPLE_RECORD.to_vec();
        wire.extend_from_slice(&[0xAA, 0xBB]);

        let (_, consumed) = Record::decode(&wire).unwrap();
        assert_eq!(consumed, SAMPLE_RECORD.len());
    }

    #[test]
    fn decode_truncated_at_every_length() {
        for len in 0..SAMPLE_RECORD.len() {
            let result = Record::decode(&SAMPLE_RECORD[..len]);
            assert!(
                matches!(result, Err(CodecError::TruncatedInput { .. })),
                "length {len} gave {result:?}"
            );
        }
    }

    #[test]
    fn unknown_priority_round_trips() {
        let mut wire = SAMPLE_RECORD;
        wire[8] = 3;

        let (record, consumed) = Record::decode(&wire).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(record.priority, Priority::Other(3));

        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        assert_eq!(&buf[..], &wire[..]);
    }

    #[test]
    fn priority_ordinals() {
        for (byte, priority) in [(0, Priority::Low), (1, Priority::High), (2, Priority::Panic)] {
            assert_eq!(Priority::from(byte), priority);
            assert_eq!(u8::from(priority), byte);
        }
        for byte in 3..=u8::MAX {
            assert_eq!(u8::from(Priority::from(byte)), byte);
        }
    }

    #[test]
    fn priority_display() {
        assert_eq!(Priority::Panic.to_string(), "panic");
        assert_eq!(Priority::Other(7).to_string(), "other(7)");
        assert_eq!(Priority::Other(7).name(), None);
    }

    #[test]
    fn wrong_total_io_count_is_ignored() {
        let mut wire = SAMPLE_RECORD;
        wire[25] = 9; // declares 9 readings, groups carry 5

        let (record, consumed) = Record::decode(&wire).unwrap();
        assert_eq!(consumed, wire.len());
        assert_eq!(record.io.total_count(), 5);
        assert_eq!(record.io.n2.get(0x42), Some(0x5E0F));

        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        assert_eq!(buf[25], 5);
        assert_eq!(&buf[..], &SAMPLE_RECORD[..]);
    }

    #[test]
    fn round_trip_with_gps_fix() {
        let mut io = IoReadings::new(0);
        io.add_n1(21, 4).unwrap();
        io.add_n4(199, 123_456).unwrap();
        let record = Record::new(
            1_700_000_000_000,
            Priority::Panic,
            GpsFix {
                longitude: 24.9384,
                latitude: 60.1699,
                altitude: 17,
                angle: 270,
                satellites: 9,
                speed: 42,
            },
            io,
        );

        let mut buf = BytesMut::new();
        record.encode(&mut buf).unwrap();
        assert_eq!(buf.len(), record.encoded_len());

        let (decoded, consumed) = Record::decode(&buf).unwrap();
        assert_eq!(consumed, buf.len());
        assert_eq!(decoded, record);
        assert!(!decoded.gps.is_valid());
    }
}
