use std::io::{Read, Write};

use bytes::BytesMut;
use framelink_stream::{FileSink, FileSource};
use framelink_wire::{decode_frame, encode_frame, FaultInjector};
use tracing::info;

use crate::cmd::CorruptArgs;
use crate::exit::{io_error, stream_error, wire_error, CliResult, SUCCESS};

pub fn run(args: CorruptArgs) -> CliResult<i32> {
    let mut source =
        FileSource::open(&args.path).map_err(|err| stream_error("source open failed", err))?;
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|err| io_error("read failed", err))?;

    let mut injector = FaultInjector::seeded(args.seed, args.probability);
    let mut buf = BytesMut::from(bytes.as_slice());
    let mut out = Vec::with_capacity(bytes.len());
    let mut frames = 0usize;
    let mut faults = 0usize;

    // Split the stream into frames so each gets its own corruption roll; a
    // trailing partial frame is a data error, same as on the receive path.
    loop {
        let frame = match decode_frame(&mut buf) {
            Ok(Some(frame)) => frame,
            Ok(None) if buf.is_empty() => break,
            Ok(None) => {
                let needed = if buf.len() >= framelink_wire::HEADER_SIZE {
                    framelink_wire::HEADER_SIZE + buf[2] as usize + 1
                } else {
                    framelink_wire::HEADER_SIZE + 1
                };
                return Err(wire_error(
                    "corrupt failed",
                    framelink_wire::WireError::Truncated {
                        needed,
                        got: buf.len(),
                    },
                ));
            }
            Err(err) => return Err(wire_error("corrupt failed", err)),
        };

        let mut wire = BytesMut::new();
        encode_frame(&frame, &mut wire);
        let mut wire = wire.to_vec();
        if let Some(corruption) = injector.corrupt_wire(&mut wire) {
            faults += 1;
            info!(
                frame = frames,
                index = corruption.index,
                bit = corruption.bit,
                "injected fault"
            );
        }
        out.extend_from_slice(&wire);
        frames += 1;
    }

    let mut sink =
        FileSink::create(&args.output).map_err(|err| stream_error("sink create failed", err))?;
    sink.write_all(&out)
        .map_err(|err| io_error("write failed", err))?;
    sink.sync().map_err(|err| stream_error("sync failed", err))?;

    info!(frames, faults, output = %args.output.display(), "corruption pass complete");
    Ok(SUCCESS)
}
