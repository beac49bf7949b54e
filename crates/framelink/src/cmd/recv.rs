use framelink_wire::FrameReader;
use tracing::{info, warn};

use crate::cmd::RecvArgs;
use crate::exit::{wire_error, CliError, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: RecvArgs, format: OutputFormat) -> CliResult<i32> {
    let mut reader =
        FrameReader::open(&args.path).map_err(|err| wire_error("source open failed", err))?;

    let source = args.path.display().to_string();
    let mut received = 0usize;
    let mut corrupted = 0usize;

    loop {
        let frame = match reader.read_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(err) => return Err(wire_error("receive failed", err)),
        };

        let valid = frame.verify();
        if !valid {
            corrupted += 1;
            warn!(
                message_id = frame.message_id,
                length = frame.length(),
                "received frame failed checksum verification"
            );
        }
        print_frame(&frame, &source, format);

        if args.strict && !valid {
            return Err(CliError::new(
                DATA_INVALID,
                format!("frame {} failed checksum verification", frame.message_id),
            ));
        }

        received += 1;
        if let Some(count) = args.count {
            if received >= count {
                break;
            }
        }
    }

    info!(received, corrupted, "receive complete");
    Ok(SUCCESS)
}
