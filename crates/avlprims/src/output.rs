use std::io::{IsTerminal, Write};

use avlprims::codec::{codec_name, IoGroup, IoReadings, IoValue, Packet, Record};
use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

use crate::hex::to_hex;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketOutput<'a> {
    codec_id: u8,
    codec_name: &'a str,
    record_count: usize,
    frame_size: usize,
    records: &'a [Record],
}

/// Render a decoded packet. `frame` is the wire form it was decoded from.
pub fn print_packet(packet: &Packet, frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PacketOutput {
                codec_id: packet.codec_id,
                codec_name: codec_name(packet.codec_id),
                record_count: packet.record_count(),
                frame_size: frame.len(),
                records: &packet.records,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            println!("{}", packet_table(packet));
        }
        OutputFormat::Pretty => {
            print!("{}", packet_pretty(packet));
        }
        OutputFormat::Raw => {
            print_raw(frame);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

#[derive(Serialize)]
struct EncodedOutput {
    frame_size: usize,
    frame_hex: String,
}

pub fn print_encoded(frame: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                frame_size: frame.len(),
                frame_hex: to_hex(frame),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => println!("{}", to_hex(frame)),
        OutputFormat::Raw => print_raw(frame),
    }
}

fn packet_table(packet: &Packet) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "#", "TIMESTAMP", "PRIORITY", "LAT", "LON", "ALT", "ANGLE", "SATS", "SPEED", "EVENT",
            "IO",
        ]);
    for (index, record) in packet.records.iter().enumerate() {
        table.add_row(vec![
            index.to_string(),
            record.timestamp.to_string(),
            record.priority.to_string(),
            format!("{:.7}", record.gps.latitude),
            format!("{:.7}", record.gps.longitude),
            record.gps.altitude.to_string(),
            record.gps.angle.to_string(),
            record.gps.satellites.to_string(),
            record.gps.speed.to_string(),
            record.io.event_io_id.to_string(),
            io_summary(&record.io),
        ]);
    }
    table
}

fn packet_pretty(packet: &Packet) -> String {
    let mut out = format!(
        "Codec: {} ({})\nRecords: {}\n",
        packet.codec_id,
        codec_name(packet.codec_id),
        packet.record_count()
    );
    for (index, record) in packet.records.iter().enumerate() {
        let gps = &record.gps;
        out.push_str(&format!("Record {index}:\n"));
        out.push_str(&format!("  Timestamp:  {}\n", record.timestamp));
        out.push_str(&format!("  Priority:   {}\n", record.priority));
        out.push_str(&format!(
            "  GPS:        lat={:.7} lon={:.7} alt={} angle={} sats={} speed={}{}\n",
            gps.latitude,
            gps.longitude,
            gps.altitude,
            gps.angle,
            gps.satellites,
            gps.speed,
            if gps.is_valid() { " (no fix)" } else { "" }
        ));
        out.push_str(&format!("  Event IO:   {}\n", record.io.event_io_id));
        for line in io_lines(&record.io) {
            out.push_str(&format!("  {line}\n"));
        }
    }
    out
}

// Groups are always listed N1, N2, N4, N8; entries keep their stored order.
fn io_lines(io: &IoReadings) -> Vec<String> {
    vec![
        group_line("N1", &io.n1),
        group_line("N2", &io.n2),
        group_line("N4", &io.n4),
        group_line("N8", &io.n8),
    ]
}

fn io_summary(io: &IoReadings) -> String {
    [
        group_summary("N1", &io.n1),
        group_summary("N2", &io.n2),
        group_summary("N4", &io.n4),
        group_summary("N8", &io.n8),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

fn group_summary<V: IoValue>(label: &str, group: &IoGroup<V>) -> Option<String> {
    if group.is_empty() {
        return None;
    }
    let entries: Vec<String> = group.iter().map(entry).collect();
    Some(format!("{label}[{}]", entries.join(" ")))
}

fn group_line<V: IoValue>(label: &str, group: &IoGroup<V>) -> String {
    let entries: Vec<String> = group.iter().map(entry).collect();
    if entries.is_empty() {
        format!("{label}: -")
    } else {
        format!("{label}: {}", entries.join(", "))
    }
}

fn entry<V: IoValue>((id, value): (u8, V)) -> String {
    let value: u64 = value.into();
    format!("{id}={value}")
}
