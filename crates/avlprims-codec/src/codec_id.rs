//! Well-known codec identifiers.
//!
//! The codec id byte is carried opaquely: decode never rejects an unknown id and
//! the record layout is always the single one this crate implements. These
//! constants exist for display and for building packets.

/// Codec 8, the layout implemented here.
pub const CODEC_8: u8 = 0x08;

/// Codec 8 Extended.
pub const CODEC_8_EXTENDED: u8 = 0x8E;

/// Codec 12 (GPRS commands).
pub const CODEC_12: u8 = 0x0C;

/// Codec 16.
pub const CODEC_16: u8 = 0x10;

/// Returns a human-readable name for a codec id.
pub fn codec_name(id: u8) -> &'static str {
    match id {
        CODEC_8 => "CODEC_8",
        CODEC_8_EXTENDED => "CODEC_8E",
        CODEC_12 => "CODEC_12",
        CODEC_16 => "CODEC_16",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_known_ids() {
        assert_eq!(codec_name(0x08), "CODEC_8");
        assert_eq!(codec_name(0x8E), "CODEC_8E");
        assert_eq!(codec_name(0x42), "UNKNOWN");
    }
}
