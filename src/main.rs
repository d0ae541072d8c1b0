use std::io::Write;
use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;
use log::{debug, error, info, LevelFilter};

use velocio_ctl::commands::{self, Command};
use velocio_ctl::devices::{self, SerialConfig};
use velocio_ctl::errors::DecodeError;
use velocio_ctl::protocol::Dispatcher;

/// Interact with Velocio PLC
#[derive(Parser, Debug)]
#[command(after_help = commands::usage())]
struct Cli {
    /// Command to execute (-h for a list)
    command: String,

    /// Logging level (info, debug, etc)
    #[arg(long = "loglevel", default_value = "info")]
    loglevel: String,
}

/// Parses a log level, accepting the `warning`, `critical` and `fatal` spellings too.
/// Unknown levels fall back to info.
fn parse_level(name: &str) -> LevelFilter {
    match name.to_ascii_lowercase().as_str() {
        "warning" => LevelFilter::Warn,
        "critical" | "fatal" => LevelFilter::Error,
        other => LevelFilter::from_str(other).unwrap_or(LevelFilter::Info),
    }
}

/// Maps the outcome of a command to the process exit status.
///
/// Handlers report protocol mismatches themselves, so only the other failures are logged here.
fn exit_status(result: Result<(), DecodeError>) -> anyhow::Result<u8> {
    match result {
        Ok(()) => Ok(0),
        Err(DecodeError::DeviceError(e)) => Err(e.into()),
        Err(DecodeError::ProtocolMismatch { .. }) => Ok(1),
        Err(e) => {
            error!("{}", e);
            Ok(1)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(parse_level(&args.loglevel))
        .format(|buf, record| writeln!(buf, "{}:{}", record.level(), record.args()))
        .init();

    debug!("Starting up");

    // Check the command before touching the port
    if let Err(e) = Command::from_str(&args.command) {
        error!("{} - please check usage", e);
        return Ok(ExitCode::FAILURE);
    }

    let mut transport = devices::open_device(&SerialConfig::default())?;
    debug!("Opened {}", transport.name().unwrap_or_default());

    let dispatcher = Dispatcher::default();
    let status = exit_status(dispatcher.execute(&mut transport, &args.command))?;

    // Closes the port
    drop(transport);

    info!("Done");
    Ok(ExitCode::from(status))
}
