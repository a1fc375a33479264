use avlprims::codec::CountCheck;
use avlprims::frame::{decode_frame, FrameConfig};
use tracing::info;

use crate::cmd::{load_frame, DecodeArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let frame = load_frame(args.hex.as_deref(), args.file.as_deref())?;
    let config = frame_config(&args);

    let packet = decode_frame(&frame, &config).map_err(|err| frame_error("decode failed", err))?;
    info!(
        codec_id = packet.codec_id,
        records = packet.record_count(),
        frame_size = frame.len(),
        "frame decoded"
    );

    print_packet(&packet, &frame, format);
    Ok(SUCCESS)
}

fn frame_config(args: &DecodeArgs) -> FrameConfig {
    FrameConfig {
        verify_checksum: !args.no_verify_checksum,
        count_check: if args.lenient_count {
            CountCheck::Warn
        } else {
            CountCheck::Strict
        },
    }
}
