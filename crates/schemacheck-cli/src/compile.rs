//! # Compile Subcommand
//!
//! Checks that a schema file parses as JSON and compiles with the fixed
//! validator configuration.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use schemacheck_schema::{compile_schema, ValidatorConfig};

/// Arguments for `schemacheck compile`.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// Path to the JSON Schema file.
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema: PathBuf,
}

/// Execute the compile subcommand.
///
/// Returns exit code 0 if the schema compiled, 1 otherwise.
pub fn run_compile(args: &CompileArgs, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    writeln!(out, "Compiling schema: {}", args.schema.display())?;

    match compile_schema(&args.schema, ValidatorConfig::default()) {
        Ok(_) => {
            writeln!(out, "✅ Schema compiled successfully")?;
            Ok(0)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "schema compilation failed");
            writeln!(err, "❌ Schema compilation failed: {e}")?;
            Ok(1)
        }
    }
}
