//! Decode a captured Codec 8 frame and print every reading.
//!
//! Run with:
//!   cargo run --example decode-sample

use avlprims::codec::codec_name;
use avlprims::frame::{decode_frame, FrameConfig};

const FRAME: [u8; 66] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x36, 0x08, 0x01, 0x00, 0x00, 0x01, 0x6B, 0x40,
    0xD8, 0xEA, 0x30, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x01, 0x05, 0x02, 0x15, 0x03, 0x01, 0x01, 0x01, 0x42, 0x5E, 0x0F,
    0x01, 0xF1, 0x00, 0x00, 0x60, 0x1A, 0x01, 0x4E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01, 0x00, 0x00, 0xC7, 0xCF,
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let packet = decode_frame(&FRAME, &FrameConfig::default())?;
    println!(
        "codec {} ({}), {} record(s)",
        packet.codec_id,
        codec_name(packet.codec_id),
        packet.record_count()
    );

    for record in &packet.records {
        println!(
            "  t={} priority={} fix={}",
            record.timestamp,
            record.priority,
            if record.gps.is_valid() { "none" } else { "yes" }
        );
        for (id, value) in record.io.n1.iter() {
            println!("    n1 id={id} value={value}");
        }
        for (id, value) in record.io.n2.iter() {
            println!("    n2 id={id} value={value}");
        }
        for (id, value) in record.io.n4.iter() {
            println!("    n4 id={id} value={value}");
        }
        for (id, value) in record.io.n8.iter() {
            println!("    n8 id={id} value={value}");
        }
    }
    Ok(())
}
