use avlprims::codec::Packet;
use avlprims::frame::encode_frame;
use bytes::BytesMut;
use tracing::info;

use crate::cmd::EncodeArgs;
use crate::exit::{frame_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let text = resolve_json(&args)?;
    let packet = parse_packet(&text)?;

    let mut frame = BytesMut::new();
    encode_frame(&packet, &mut frame).map_err(|err| frame_error("encode failed", err))?;
    info!(
        records = packet.record_count(),
        frame_size = frame.len(),
        "packet encoded"
    );

    print_encoded(&frame, format);
    Ok(SUCCESS)
}

fn resolve_json(args: &EncodeArgs) -> CliResult<String> {
    if let Some(json) = &args.json {
        return Ok(json.clone());
    }
    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }
    Err(CliError::usage("provide --json or --file"))
}

// Group caps and priority names are checked while deserializing.
fn parse_packet(text: &str) -> CliResult<Packet> {
    serde_json::from_str(text)
        .map_err(|err| CliError::new(DATA_INVALID, format!("invalid packet JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use avlprims::codec::{Priority, CODEC_8};

    use super::*;

    const PACKET_JSON: &str = r#"{
        "codec_id": 8,
        "records": [{
            "timestamp": 1560161086000,
            "priority": "high",
            "gps": {"longitude": 0.0, "latitude": 0.0, "altitude": 0, "angle": 0, "satellites": 0, "speed": 0},
            "io": {"event_io_id": 1, "n1": [[21, 3], [1, 1]], "n2": [[66, 24079]], "n4": [[241, 24602]], "n8": [[78, 0]]}
        }]
    }"#;

    #[test]
    fn parses_packet_json() {
        let packet = parse_packet(PACKET_JSON).unwrap();
        assert_eq!(packet.codec_id, CODEC_8);
        assert_eq!(packet.records[0].priority, Priority::High);
        assert_eq!(packet.records[0].io.n2.get(66), Some(24_079));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = parse_packet("{\"codec_id\": 8").unwrap_err();
        assert_eq!(err.code, DATA_INVALID);
    }

    #[test]
    fn requires_input() {
        let err = resolve_json(&EncodeArgs {
            json: None,
            file: None,
        })
        .unwrap_err();
        assert_eq!(err.code, crate::exit::USAGE);
    }
}
