//! AVL record and packet codec for vehicle-tracking telemetry.
//!
//! A packet carries one or more timestamped records. Every record holds:
//! - A GPS fix (15 bytes, coordinates scaled by 10,000,000)
//! - An event IO id and four IO groups keyed by value width (1, 2, 4, 8 bytes)
//!
//! All multi-byte integers are big-endian. The TCP envelope around a packet
//! (preamble, length, CRC) lives in `avlprims-frame`.

pub mod checksum;
pub mod codec_id;
pub mod error;
pub mod gps;
pub mod io;
pub mod packet;
pub mod record;

mod wire;

pub use checksum::crc16_arc;
pub use codec_id::{codec_name, CODEC_12, CODEC_16, CODEC_8, CODEC_8_EXTENDED};
pub use error::{CodecError, Result};
pub use gps::{GpsFix, COORDINATE_SCALE, GPS_ELEMENT_SIZE};
pub use io::{IoGroup, IoReadings, IoValue, MAX_GROUP_ELEMENTS};
pub use packet::{CountCheck, Packet, MAX_RECORDS};
pub use record::{Priority, Record};
