use std::io::Read;

use framelink_stream::FileSource;
use framelink_wire::{ParseEvent, Parser};
use tracing::info;

use crate::cmd::ScanArgs;
use crate::exit::{stream_error, CliResult, SUCCESS};
use crate::output::{print_frame, OutputFormat};

const SCAN_CHUNK_SIZE: usize = 512;

/// Drives the incremental parser over a byte stream of unknown alignment.
/// Unlike `recv`, leading garbage and inter-frame noise are skipped, and
/// corrupted frames are printed rather than aborting the scan.
pub fn run(args: ScanArgs, format: OutputFormat) -> CliResult<i32> {
    let mut source =
        FileSource::open(&args.path).map_err(|err| stream_error("source open failed", err))?;

    let label = args.path.display().to_string();
    let mut parser = Parser::new();
    let mut valid = 0usize;
    let mut corrupted = 0usize;
    let mut chunk = [0u8; SCAN_CHUNK_SIZE];

    'scan: loop {
        let read = source
            .read(&mut chunk)
            .map_err(|err| crate::exit::io_error("read failed", err))?;
        if read == 0 {
            break;
        }

        for byte in &chunk[..read] {
            match parser.push_byte(*byte) {
                ParseEvent::Incomplete => {}
                ParseEvent::Valid(frame) => {
                    valid += 1;
                    print_frame(&frame, &label, format);
                }
                ParseEvent::Corrupted(frame) => {
                    corrupted += 1;
                    print_frame(&frame, &label, format);
                }
            }

            if let Some(count) = args.count {
                if valid + corrupted >= count {
                    break 'scan;
                }
            }
        }
    }

    info!(valid, corrupted, "scan complete");
    Ok(SUCCESS)
}
