use avlprims_codec::{crc16_arc, CountCheck, Packet};
use bytes::{Buf, BufMut, BytesMut};
use tracing::debug;

use crate::error::{FrameError, Result};

/// Frame header: preamble (4) + payload length (4) = 8 bytes.
pub const HEADER_SIZE: usize = 8;

/// Header plus the 4-byte trailing checksum.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + 4;

/// Every frame starts with four zero bytes.
pub const PREAMBLE: u32 = 0;

/// Decode options for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Verify the trailing CRC against the payload. Default: true.
    pub verify_checksum: bool,
    /// Handling of disagreeing leading/trailing record counts. Default: strict.
    pub count_check: CountCheck,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            count_check: CountCheck::Strict,
        }
    }
}

/// The total wire size of a frame carrying `packet`.
pub fn wire_size(packet: &Packet) -> usize {
    FRAME_OVERHEAD + packet.encoded_len()
}

/// Encode a packet into the wire format.
///
/// Wire format:
/// ```text
/// ┌──────────────┬───────────┬─────────────────┬──────────────┐
/// │ Preamble     │ Length    │ Payload         │ CRC-16/ARC   │
/// │ 0x00000000   │ (4B BE)   │ (Length bytes)  │ (4B BE)      │
/// └──────────────┴───────────┴─────────────────┴──────────────┘
/// ```
pub fn encode_frame(packet: &Packet, dst: &mut BytesMut) -> Result<()> {
    let payload = packet.to_bytes()?;
    encode_frame_payload(&payload, dst);
    Ok(())
}

/// Wrap already serialized packet bytes in the envelope.
pub fn encode_frame_payload(payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_u32(PREAMBLE);
    // A packet is at most 255 records of a few KiB each, far below u32::MAX.
    dst.put_u32(payload.len() as u32);
    dst.put_slice(payload);
    dst.put_u32(u32::from(crc16_arc(payload)));
}

/// Validate the envelope of `src` and return the payload span.
///
/// Checks, in order: preamble, declared length against the buffer size and,
/// when `verify_checksum` is set, the trailing CRC. A buffer too short for
/// the field being checked fails with `TruncatedInput`.
pub fn split_frame(src: &[u8], verify_checksum: bool) -> Result<&[u8]> {
    let mut header = src;
    ensure_header(header, 4)?;
    let preamble = header.get_u32();
    if preamble != PREAMBLE {
        return Err(FrameError::BadPreamble(preamble));
    }

    ensure_header(src, HEADER_SIZE)?;
    let declared = header.get_u32();
    if u64::from(declared) + FRAME_OVERHEAD as u64 != src.len() as u64 {
        return Err(FrameError::BadLength {
            declared,
            actual: src.len(),
        });
    }

    let (rest, mut trailer) = src.split_at(src.len() - 4);
    let payload = &rest[HEADER_SIZE..];

    if verify_checksum {
        let claimed = trailer.get_u32();
        let computed = crc16_arc(payload);
        if claimed != u32::from(computed) {
            return Err(FrameError::ChecksumMismatch {
                expected: computed,
                actual: claimed,
            });
        }
    }

    Ok(payload)
}

fn ensure_header(src: &[u8], needed: usize) -> Result<()> {
    if src.len() < needed {
        return Err(FrameError::TruncatedInput {
            needed,
            remaining: src.len(),
        });
    }
    Ok(())
}

/// Decode one complete frame into a packet.
pub fn decode_frame(src: &[u8], config: &FrameConfig) -> Result<Packet> {
    let payload = split_frame(src, config.verify_checksum)?;
    debug!(
        payload_len = payload.len(),
        verified = config.verify_checksum,
        "frame envelope accepted"
    );
    Ok(Packet::decode(payload, config.count_check)?)
}
