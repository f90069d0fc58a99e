//! Multi Serial Dump
//!
//! Watch the traffic of several serial interfaces at once. Every chunk read
//! from an interface is printed as a hex+ASCII dump tagged with the
//! interface alias.
//!
//! # Usage
//!
//! ```bash
//! # Two ports, the second one shown as "gps"
//! multi-serial-dump -I /dev/ttyUSB0:115200 -I "/dev/ttyUSB1(gps):9600,8n1"
//!
//! # Print the resolved settings before capturing
//! multi-serial-dump -v -I com1:14400,8n1 -I "com2(alt):7e2"
//! ```
//!
//! Set `RUST_LOG=info` (or `debug`) to see port setup on stderr.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::process::ExitCode;

use multi_serial_dump::interface::InterfaceDescriptor;
use multi_serial_dump::serial::{self, TokioSerialIo};

/// Multi Serial Dump
///
/// Hex dump of several serial interfaces at once
#[derive(Parser, Debug)]
#[command(name = "multi-serial-dump")]
#[command(author = "Prasanna Gautam")]
#[command(version = "0.1.0")]
#[command(about = "Dump the traffic of several serial interfaces as hex and ASCII")]
struct Cli {
    /// Interface definition: <device>[(<alias>)][:<baud>[,<bits><parity><stop>]|:<bits><parity><stop>]
    #[arg(short = 'I', long = "interface", value_name = "DESCRIPTOR")]
    interfaces: Vec<String>,

    /// List the resolved interfaces before capturing
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    colored::control::set_override(io::stderr().is_terminal());

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap prints help/version to stdout and its own "error: ..." to stderr
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };

    std::panic::set_hook(Box::new(|info| log::debug!("{}", info)));

    let outcome = std::panic::catch_unwind(|| run(cli));
    report(outcome, &mut io::stderr().lock())
}

/// Print the outcome of a run to `err` and pick the exit code
fn report(outcome: std::thread::Result<Result<()>>, err: &mut impl Write) -> ExitCode {
    let message = match outcome {
        Ok(Ok(())) => return ExitCode::SUCCESS,
        Ok(Err(e)) => format!("{} {}", "error:".red().bold(), e),
        // panics carry no message worth showing; the hook logs them at debug level
        Err(_) => "unknow error!".to_string(),
    };

    let _ = writeln!(err, "{}", message);
    ExitCode::FAILURE
}

fn run(cli: Cli) -> Result<()> {
    let descriptors = parse_interfaces(&cli.interfaces)?;

    if cli.verbose {
        print_interfaces(&descriptors, &mut io::stdout().lock())?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(async {
        let sessions = serial::open_all(&mut TokioSerialIo, descriptors)?;
        serial::run_monitor(sessions, io::stdout()).await
    })?;

    Ok(())
}

/// Parse every `--interface` argument, failing on the first bad one
fn parse_interfaces(texts: &[String]) -> Result<Vec<InterfaceDescriptor>> {
    let descriptors = texts
        .iter()
        .map(|text| InterfaceDescriptor::parse(text))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(descriptors)
}

fn print_interfaces(descriptors: &[InterfaceDescriptor], out: &mut impl Write) -> io::Result<()> {
    for descriptor in descriptors {
        writeln!(out, " * {}:{}", descriptor.device(), descriptor.settings())?;
    }
    out.flush()
}
