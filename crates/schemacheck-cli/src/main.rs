//! # schemacheck CLI entry point
//!
//! Parses arguments, installs the tracing subscriber, and dispatches to the
//! subcommand handlers.

use std::process::ExitCode;

use schemacheck_cli::{dispatch, init_tracing, parse_args, ParseOutcome};

fn main() -> ExitCode {
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();

    let cli = match parse_args(std::env::args_os(), &mut out, &mut err) {
        Ok(ParseOutcome::Run(cli)) => cli,
        Ok(ParseOutcome::Exit(code)) => return ExitCode::from(code),
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::from(1);
        }
    };

    init_tracing(cli.verbose);
    tracing::debug!(command = ?cli.command, "schemacheck starting");

    match dispatch(&cli, &mut out, &mut err) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
