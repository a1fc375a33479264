//! CRC-16/ARC checksum used by the TCP envelope.

const POLY_REFLECTED: u16 = 0xA001;

/// Compute the CRC-16/ARC of `data`.
///
/// Parameters: poly 0x8005 (0xA001 reflected), init 0x0000, refin/refout,
/// no final xor. Computed bit at a time, no lookup table. Empty input yields 0.
pub fn crc16_arc(data: &[u8]) -> u16 {
    let mut crc: u16 = 0x0000;
    for &byte in data {
        crc ^= u16::from(byte);
        for _ in 0..8 {
            crc = if crc & 1 != 0 {
                (crc >> 1) ^ POLY_REFLECTED
            } else {
                crc >> 1
            };
        }
    }
    crc
}
