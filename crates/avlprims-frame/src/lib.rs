//! TCP envelope around AVL packets.
//!
//! Every packet sent over TCP is framed with:
//! - A 4-byte zero preamble
//! - A 4-byte big-endian payload length
//! - A 4-byte big-endian CRC-16/ARC of the payload (upper half zero)
//!
//! Decoding works on one complete frame buffer; there is no stream reassembly.

pub mod codec;
pub mod error;

pub use codec::{
    decode_frame, encode_frame, encode_frame_payload, split_frame, wire_size, FrameConfig,
    FRAME_OVERHEAD, HEADER_SIZE, PREAMBLE,
};
pub use error::{FrameError, Result};
