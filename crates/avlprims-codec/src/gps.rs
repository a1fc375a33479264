use bytes::{Buf, BufMut};

use crate::error::Result;
use crate::wire::ensure;

/// Wire size of a GPS element: lon (4) + lat (4) + altitude (2) + angle (2) + satellites (1) + speed (2).
pub const GPS_ELEMENT_SIZE: usize = 15;

/// Coordinates travel as degrees multiplied by this factor.
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

/// A GPS fix as reported by the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsFix {
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Altitude in meters above sea level.
    pub altitude: u16,
    /// Heading in degrees from north.
    pub angle: u16,
    /// Number of visible satellites.
    pub satellites: u8,
    /// Speed in km/h.
    pub speed: u16,
}

impl GpsFix {
    /// True when altitude, satellites and speed are all zero.
    ///
    /// Devices send this all-zero shape when they have no fix. A stationary
    /// fix at sea level with no satellites is indistinguishable from it.
    pub fn is_valid(&self) -> bool {
        self.altitude == 0 && self.satellites == 0 && self.speed == 0
    }

    /// Append the 15-byte wire form to `dst`.
    pub fn encode(&self, dst: &mut impl BufMut) {
        dst.put_i32(scale_coordinate(self.longitude));
        dst.put_i32(scale_coordinate(self.latitude));
        dst.put_u16(self.altitude);
        dst.put_u16(self.angle);
        dst.put_u8(self.satellites);
        dst.put_u16(self.speed);
    }

    /// Read a GPS element from the front of `src`.
    pub fn decode(src: &mut impl Buf) -> Result<Self> {
        ensure(src, GPS_ELEMENT_SIZE)?;
        let longitude = f64::from(src.get_i32()) / COORDINATE_SCALE;
        let latitude = f64::from(src.get_i32()) / COORDINATE_SCALE;
        Ok(Self {
            longitude,
            latitude,
            altitude: src.get_u16(),
            angle: src.get_u16(),
            satellites: src.get_u8(),
            speed: src.get_u16(),
        })
    }
}

// `as` saturates out-of-range values and maps NaN to 0.
fn scale_coordinate(degrees: f64) -> i32 {
    (degrees * COORDINATE_SCALE).round() as i32
}

#[cfg(test)]
mod tests {
    use bytes::BytesMut;

    use super::*;
    use crate::error::CodecError;

    fn sample() -> GpsFix {
        GpsFix {
            longitude: 25.3032016,
            latitude: 54.7146368,
            altitude: 111,
            angle: 214,
            satellites: 4,
            speed: 4,
        }
    }

    #[test]
    fn encodes_fixed_layout() {
        let mut buf = BytesMut::new();
        sample().encode(&mut buf);

        assert_eq!(buf.len(), GPS_ELEMENT_SIZE);
        assert_eq!(
            &buf[..],
            &[
                0x0F, 0x14, 0xF6, 0x50, // lon 253032016
                0x20, 0x9C, 0xCA, 0x80, // lat 547146368
                0x00, 0x6F, // altitude
                0x00, 0xD6, // angle
                0x04, // satellites
                0x00, 0x04, // speed
            ]
        );
    }

    #[test]
    fn decode_reverses_encode() {
        let mut buf = BytesMut::new();
        sample().encode(&mut buf);

        let mut src = &buf[..];
        let gps = GpsFix::decode(&mut src).unwrap();
        assert_eq!(gps, sample());
        assert!(src.is_empty());
    }

    #[test]
    fn negative_coordinates() {
        let fix = GpsFix {
            longitude: -73.9856644,
            latitude: -40.7484405,
            ..GpsFix::default()
        };
        let mut buf = BytesMut::new();
        fix.encode(&mut buf);
        assert_eq!(&buf[..4], &(-739_856_644i32).to_be_bytes());

        let decoded = GpsFix::decode(&mut &buf[..]).unwrap();
        assert_eq!(decoded, fix);
    }

    #[test]
    fn rounds_to_nearest_unit() {
        let fix = GpsFix {
            longitude: 0.000_000_06,
            ..GpsFix::default()
        };
        let mut buf = BytesMut::new();
        fix.encode(&mut buf);
        assert_eq!(&buf[..4], &1i32.to_be_bytes());
    }

    #[test]
    fn out_of_range_coordinate_saturates() {
        let fix = GpsFix {
            longitude: 1_000.0,
            ..GpsFix::default()
        };
        let mut buf = BytesMut::new();
        fix.encode(&mut buf);
        assert_eq!(&buf[..4], &i32::MAX.to_be_bytes());
    }

    #[test]
    fn decode_truncated() {
        let short = [0u8; GPS_ELEMENT_SIZE - 1];
        let result = GpsFix::decode(&mut &short[..]);
        assert_eq!(
            result,
            Err(CodecError::TruncatedInput {
                needed: GPS_ELEMENT_SIZE,
                remaining: GPS_ELEMENT_SIZE - 1
            })
        );
    }

    #[test]
    fn no_fix_sentinel() {
        assert!(GpsFix::default().is_valid());
        assert!(!sample().is_valid());

        let only_angle = GpsFix {
            angle: 90,
            longitude: 10.0,
            ..GpsFix::default()
        };
        assert!(only_angle.is_valid());
    }
}
