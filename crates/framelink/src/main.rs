mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "framelink", version, about = "Sentinel-framed byte protocol CLI")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "plain", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_send_subcommand() {
        let cli = Cli::try_parse_from([
            "framelink",
            "send",
            "/tmp/frames.bin",
            "--id",
            "7",
            "--data",
            "Hi",
        ])
        .expect("send args should parse");

        assert!(matches!(cli.command, Command::Send(_)));
    }

    #[test]
    fn rejects_conflicting_payload_args() {
        let err = Cli::try_parse_from([
            "framelink",
            "send",
            "/tmp/frames.bin",
            "--data",
            "Hi",
            "--hex",
            "4869",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn parses_corrupt_subcommand() {
        let cli = Cli::try_parse_from([
            "framelink",
            "corrupt",
            "/tmp/frames.bin",
            "--output",
            "/tmp/bad.bin",
            "--seed",
            "42",
            "--probability",
            "0.5",
        ])
        .expect("corrupt args should parse");

        match cli.command {
            Command::Corrupt(args) => {
                assert_eq!(args.seed, 42);
                assert_eq!(args.probability, 0.5);
            }
            other => panic!("expected corrupt, got {other:?}"),
        }
    }

    #[test]
    fn scan_accepts_count_limit() {
        let cli =
            Cli::try_parse_from(["framelink", "scan", "/tmp/frames.bin", "--count", "3"])
                .expect("scan args should parse");
        match cli.command {
            Command::Scan(args) => assert_eq!(args.count, Some(3)),
            other => panic!("expected scan, got {other:?}"),
        }
    }
}
