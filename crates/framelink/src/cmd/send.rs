use std::fs;

use bytes::Bytes;
use framelink_wire::{Frame, FrameWriter};
use tracing::info;

use crate::cmd::SendArgs;
use crate::exit::{wire_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frame, OutputFormat};

pub fn run(args: SendArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;
    let frame = Frame::new(args.id, Bytes::from(payload))
        .map_err(|err| wire_error("frame build failed", err))?;

    let mut writer = FrameWriter::create(&args.path)
        .map_err(|err| wire_error("sink create failed", err))?;
    writer
        .write_frame(&frame)
        .map_err(|err| wire_error("write failed", err))?;
    writer
        .sync()
        .map_err(|err| wire_error("sync failed", err))?;

    info!(
        message_id = frame.message_id,
        length = frame.length(),
        path = %args.path.display(),
        "frame transmitted"
    );
    print_frame(&frame, &args.path.display().to_string(), format);

    Ok(SUCCESS)
}

fn resolve_payload(args: &SendArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path).map_err(|err| {
            crate::exit::io_error(&format!("failed reading {}", path.display()), err)
        });
    }
    Ok(Vec::new())
}

fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "hex payload needs an even digit count"));
    }
    (0..compact.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&compact[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {}", &compact[i..i + 2])))
        })
        .collect()
}
