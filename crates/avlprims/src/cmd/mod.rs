use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};

use crate::exit::{io_error, CliError, CliResult};
use crate::hex::parse_hex;
use crate::output::OutputFormat;

pub mod bench;
pub mod decode;
pub mod encode;
pub mod version;

/// Codec 8 frame with one record (priority high, no GPS fix, five IO readings).
pub const SAMPLE_FRAME_HEX: &str = "000000000000003608010000016B40D8EA30010000000000000000000000000000000105021503010101425E0F01F10000601A014E0000000000000000010000C7CF";

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode one frame and print its records.
    Decode(DecodeArgs),
    /// Encode a JSON packet into a frame.
    Encode(EncodeArgs),
    /// Measure decode throughput on one frame.
    Bench(BenchArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Encode(args) => encode::run(args, format),
        Command::Bench(args) => bench::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Frame as hex text.
    #[arg(conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read the raw binary frame from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
    /// Skip CRC verification of the payload.
    #[arg(long)]
    pub no_verify_checksum: bool,
    /// Warn instead of failing when leading and trailing record counts differ.
    #[arg(long)]
    pub lenient_count: bool,
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Packet as JSON text.
    #[arg(long, conflicts_with = "file")]
    pub json: Option<String>,
    /// Read the JSON packet from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Frame as hex text. Default: a built-in Codec 8 sample frame.
    pub hex: Option<String>,
    /// How long to run, in seconds.
    #[arg(long, default_value = "10")]
    pub seconds: u64,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

/// Frame bytes from a hex argument or a binary file.
pub(crate) fn load_frame(hex: Option<&str>, file: Option<&Path>) -> CliResult<Vec<u8>> {
    match (hex, file) {
        (Some(text), _) => parse_hex(text)
            .map_err(|err| CliError::usage(format!("invalid hex frame: {err}"))),
        (None, Some(path)) => std::fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err)),
        (None, None) => Err(CliError::usage("provide a hex frame or --file")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::{FAILURE, USAGE};

    #[test]
    fn load_frame_from_hex() {
        let bytes = load_frame(Some("0008"), None).unwrap();
        assert_eq!(bytes, vec![0x00, 0x08]);
    }

    #[test]
    fn load_frame_requires_input() {
        let err = load_frame(None, None).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn load_frame_bad_hex_is_usage() {
        let err = load_frame(Some("0g"), None).unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn load_frame_missing_file() {
        let path = Path::new("/nonexistent/avlprims/frame.bin");
        let err = load_frame(None, Some(path)).unwrap_err();
        assert_eq!(err.code, FAILURE);
    }

    #[test]
    fn sample_frame_is_well_formed() {
        let bytes = parse_hex(SAMPLE_FRAME_HEX).unwrap();
        assert_eq!(bytes.len(), 66);
    }
}
