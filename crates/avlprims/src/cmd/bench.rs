use std::hint::black_box;
use std::time::{Duration, Instant};

use avlprims::frame::{decode_frame, FrameConfig};
use serde::Serialize;
use tracing::info;

use crate::cmd::{load_frame, BenchArgs, SAMPLE_FRAME_HEX};
use crate::exit::{frame_error, CliError, CliResult, SUCCESS};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct BenchOutput {
    frame_size: usize,
    seconds: f64,
    iterations: u64,
    decodes_per_second: f64,
}

pub fn run(args: BenchArgs, format: OutputFormat) -> CliResult<i32> {
    if args.seconds == 0 {
        return Err(CliError::usage("--seconds must be greater than zero"));
    }
    let hex = args.hex.as_deref().unwrap_or(SAMPLE_FRAME_HEX);
    let frame = load_frame(Some(hex), None)?;
    let config = FrameConfig::default();

    // Fail fast on a frame that does not decode at all.
    decode_frame(&frame, &config).map_err(|err| frame_error("bench frame rejected", err))?;

    info!(seconds = args.seconds, frame_size = frame.len(), "starting decode benchmark");
    let (iterations, elapsed) = measure(&frame, &config, Duration::from_secs(args.seconds))?;

    let out = BenchOutput {
        frame_size: frame.len(),
        seconds: elapsed.as_secs_f64(),
        iterations,
        decodes_per_second: iterations as f64 / elapsed.as_secs_f64(),
    };
    print_bench(&out, format);
    Ok(SUCCESS)
}

fn measure(frame: &[u8], config: &FrameConfig, budget: Duration) -> CliResult<(u64, Duration)> {
    let start = Instant::now();
    let mut iterations = 0u64;
    loop {
        black_box(decode_frame(black_box(frame), config))
            .map_err(|err| frame_error("decode failed", err))?;
        iterations += 1;

        let elapsed = start.elapsed();
        if elapsed >= budget {
            return Ok((iterations, elapsed));
        }
    }
}

fn print_bench(out: &BenchOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
        ),
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("Decode benchmark:");
            println!("  Frame size:   {} bytes", out.frame_size);
            println!("  Duration:     {:.2}s", out.seconds);
            println!("  Iterations:   {}", out.iterations);
            println!("  Decodes/sec:  {:.2}", out.decodes_per_second);
        }
        OutputFormat::Raw => println!("{:.2}", out.decodes_per_second),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit::USAGE;

    #[test]
    fn measure_counts_iterations() {
        let frame = load_frame(Some(SAMPLE_FRAME_HEX), None).unwrap();
        let (iterations, elapsed) = measure(
            &frame,
            &FrameConfig::default(),
            Duration::from_millis(20),
        )
        .unwrap();
        assert!(iterations > 0);
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn rejects_zero_seconds() {
        let err = run(
            BenchArgs {
                hex: None,
                seconds: 0,
            },
            OutputFormat::Json,
        )
        .unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn rejects_undecodable_frame() {
        let err = run(
            BenchArgs {
                hex: Some("00000000000000010800".to_string()),
                seconds: 1,
            },
            OutputFormat::Json,
        )
        .unwrap_err();
        assert_eq!(err.code, crate::exit::DATA_INVALID);
    }
}
