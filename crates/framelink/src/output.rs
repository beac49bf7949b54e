use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use framelink_wire::Frame;
use serde::Serialize;

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
struct FrameOutput<'a> {
    message_id: u8,
    length: u8,
    checksum: String,
    valid: bool,
    payload: String,
    source: &'a str,
}

pub fn print_frame(frame: &Frame, source: &str, format: OutputFormat) {
    let valid = frame.verify();
    match format {
        OutputFormat::Json => {
            let out = FrameOutput {
                message_id: frame.message_id,
                length: frame.length(),
                checksum: format!("{:#04x}", frame.checksum),
                valid,
                payload: payload_preview(frame.payload.as_ref()),
                source,
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["ID", "LEN", "CHECKSUM", "VALID", "PAYLOAD"])
                .add_row(vec![
                    frame.message_id.to_string(),
                    frame.length().to_string(),
                    format!("{:#04x}", frame.checksum),
                    valid.to_string(),
                    payload_preview(frame.payload.as_ref()),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "id={} len={} checksum={:#04x} valid={} payload={}",
                frame.message_id,
                frame.length(),
                frame.checksum,
                valid,
                payload_preview(frame.payload.as_ref())
            );
        }
        OutputFormat::Raw => {
            print_raw(frame.payload.as_ref());
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", payload.len()),
    }
}
