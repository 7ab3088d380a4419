//! # schemacheck-cli — Command-Line Interface
//!
//! Provides the `schemacheck` binary:
//!
//! ```bash
//! schemacheck compile <schema-file>
//! schemacheck validate <schema-file> <data-file>
//! ```
//!
//! Exit code 0 means the operation succeeded. Every failure (usage error,
//! unknown command, missing argument, compile error, validation failure)
//! exits with 1; only the printed text tells them apart.
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers in [`compile`] and
//!   [`validate`], which delegate to `schemacheck-schema`.
//! - Handlers write to caller-supplied stdout/stderr writers and return the
//!   exit code. `Err` is reserved for failures writing that output.

pub mod compile;
pub mod validate;

use std::ffi::OsString;
use std::io::Write;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use compile::{run_compile, CompileArgs};
use validate::{run_validate, ValidateArgs};

/// Usage text printed when too few arguments are given.
pub const USAGE: &str = "\
Usage:
  schemacheck compile <schema-file>
  schemacheck validate <schema-file> <data-file>";

/// Compile JSON Schemas and validate JSON/YAML documents against them.
#[derive(Parser, Debug)]
#[command(
    name = "schemacheck",
    version,
    about,
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that a JSON Schema file parses and compiles.
    Compile(CompileArgs),

    /// Validate a JSON or YAML data file against a JSON Schema.
    Validate(ValidateArgs),
}

/// Result of argument parsing.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Arguments were valid; run the command.
    Run(Cli),
    /// Parsing finished the invocation (help, version, or an error that has
    /// already been reported); exit with this code.
    Exit(u8),
}

/// Parse process arguments (including the program name).
///
/// clap's own failures are mapped onto the exit-code contract: fewer than
/// two arguments print [`USAGE`] to stdout, an unknown command and a
/// `validate` without a data file print a message to stderr, and all of
/// them exit with 1. `--help` and `--version` exit with 0.
///
/// Every argument except the `-v` verbosity flag counts towards the
/// two-argument minimum, and the first such argument is the command. Paths
/// starting with `-` go after a `--` separator.
pub fn parse_args<I, T>(
    args: I,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<ParseOutcome>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let parse_error = match Cli::try_parse_from(&args) {
        Ok(cli) => return Ok(ParseOutcome::Run(cli)),
        Err(e) => e,
    };

    if matches!(
        parse_error.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    ) {
        write!(out, "{}", parse_error.render())?;
        return Ok(ParseOutcome::Exit(0));
    }

    let operands: Vec<String> = args
        .iter()
        .skip(1)
        .map(|a| a.to_string_lossy().into_owned())
        .filter(|a| !is_verbosity_flag(a))
        .collect();

    if operands.len() < 2 {
        writeln!(out, "{USAGE}")?;
        return Ok(ParseOutcome::Exit(1));
    }

    let command = operands[0].as_str();
    match command {
        "compile" | "validate" => {}
        _ => {
            writeln!(err, "❌ unknown command: {command}")?;
            return Ok(ParseOutcome::Exit(1));
        }
    }

    if command == "validate" && parse_error.kind() == ErrorKind::MissingRequiredArgument {
        writeln!(err, "❌ validate requires a data file argument")?;
        return Ok(ParseOutcome::Exit(1));
    }

    write!(err, "{}", parse_error.render())?;
    Ok(ParseOutcome::Exit(1))
}

/// `-v`, `-vv`, ... or `--verbose`.
fn is_verbosity_flag(arg: &str) -> bool {
    match arg.strip_prefix('-') {
        Some("-verbose") => true,
        Some(flags) => !flags.is_empty() && flags.bytes().all(|b| b == b'v'),
        None => false,
    }
}

/// Run the parsed command and return its exit code.
pub fn dispatch(cli: &Cli, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    match &cli.command {
        Commands::Compile(args) => run_compile(args, out, err),
        Commands::Validate(args) => run_validate(args, out, err),
    }
}

/// Parse `args` and run the selected command.
pub fn run<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> Result<u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    match parse_args(args, out, err)? {
        ParseOutcome::Run(cli) => dispatch(&cli, out, err),
        ParseOutcome::Exit(code) => Ok(code),
    }
}

/// Install the stderr tracing subscriber for the given `-v` count.
pub fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
