use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod corrupt;
pub mod recv;
pub mod scan;
pub mod send;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build a frame and write it to a frame file.
    Send(SendArgs),
    /// Read frames from a file, verify, and print them.
    Recv(RecvArgs),
    /// Feed a file through the incremental parser one byte at a time.
    Scan(ScanArgs),
    /// Inject reproducible bit faults into a frame file.
    Corrupt(CorruptArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Send(args) => send::run(args, format),
        Command::Recv(args) => recv::run(args, format),
        Command::Scan(args) => scan::run(args, format),
        Command::Corrupt(args) => corrupt::run(args),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Destination frame file.
    pub path: PathBuf,
    /// Message id for the frame.
    #[arg(long, short = 'i', default_value = "1")]
    pub id: u8,
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex-encoded payload (e.g. 48 69 or 4869).
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct RecvArgs {
    /// Frame file to read.
    pub path: PathBuf,
    /// Stop after N frames.
    #[arg(long)]
    pub count: Option<usize>,
    /// Exit nonzero on the first frame that fails verification.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Byte stream to scan (need not start at a frame boundary).
    pub path: PathBuf,
    /// Stop after N completed frames.
    #[arg(long)]
    pub count: Option<usize>,
}

#[derive(Args, Debug)]
pub struct CorruptArgs {
    /// Frame file to corrupt.
    pub path: PathBuf,
    /// Where to write the corrupted copy.
    #[arg(long, short = 'o')]
    pub output: PathBuf,
    /// Per-frame corruption probability (0.0 - 1.0).
    #[arg(long, default_value = "1.0")]
    pub probability: f64,
    /// RNG seed; the same seed reproduces the same faults.
    #[arg(long, default_value = "0")]
    pub seed: u64,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
