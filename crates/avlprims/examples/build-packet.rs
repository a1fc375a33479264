//! Build a two-record packet in code and frame it for sending.
//!
//! Run with:
//!   cargo run --example build-packet
//!
//! Decode the printed hex with:
//!   cargo run --features cli -- --format pretty decode <HEX>

use avlprims::codec::{GpsFix, IoReadings, Packet, Priority, Record, CODEC_8};
use avlprims::frame::{encode_frame, wire_size};
use bytes::BytesMut;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let fix = GpsFix {
        longitude: 25.279_651,
        latitude: 54.687_157,
        altitude: 112,
        angle: 180,
        satellites: 11,
        speed: 38,
    };

    let mut moving = IoReadings::new(0);
    moving.add_n1(239, 1)?; // ignition
    moving.add_n2(66, 12_800)?; // external voltage, mV
    moving.add_n4(199, 1_250)?; // trip odometer, m

    let mut alarm = IoReadings::new(247);
    alarm.add_n1(247, 1)?;
    alarm.add_n8(78, 0x0000_1A2B_3C4D_5E6F)?;

    let packet = Packet::new(
        CODEC_8,
        vec![
            Record::new(1_700_000_000_000, Priority::Low, fix, moving),
            Record::new(1_700_000_005_000, Priority::Panic, fix, alarm),
        ],
    );

    let mut frame = BytesMut::with_capacity(wire_size(&packet));
    encode_frame(&packet, &mut frame)?;

    let hex: String = frame.iter().map(|b| format!("{b:02X}")).collect();
    println!("{hex}");
    eprintln!("{} bytes", frame.len());
    Ok(())
}
