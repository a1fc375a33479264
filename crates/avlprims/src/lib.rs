//! Codec for AVL telemetry frames from vehicle-tracking devices.
//!
//! A tracker sends each batch of timestamped GPS and IO samples as one TCP
//! frame. avlprims turns such a frame into typed values and back.
//!
//! # Crate Structure
//!
//! - [`codec`] — Checksum, GPS element, IO groups, records and packets
//! - [`frame`] — TCP envelope: preamble, length and CRC validation
//!
//! # Example
//!
//! ```
//! use avlprims::codec::{GpsFix, IoReadings, Packet, Priority, Record, CODEC_8};
//! use avlprims::frame::{decode_frame, encode_frame, FrameConfig};
//!
//! let mut io = IoReadings::new(0);
//! io.add_n1(21, 5).unwrap();
//! let packet = Packet::single(
//!     CODEC_8,
//!     Record::new(1_560_161_086_000, Priority::Low, GpsFix::default(), io),
//! );
//!
//! let mut wire = bytes::BytesMut::new();
//! encode_frame(&packet, &mut wire).unwrap();
//! let decoded = decode_frame(&wire, &FrameConfig::default()).unwrap();
//! assert_eq!(decoded, packet);
//! ```

/// Re-export codec types.
pub mod codec {
    pub use avlprims_codec::*;
}

/// Re-export frame types.
pub mod frame {
    pub use avlprims_frame::*;
}
