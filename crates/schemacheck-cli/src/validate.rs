//! # Validate Subcommand
//!
//! Validates one JSON or YAML data file against a schema file. The data
//! format follows the data file's suffix (`.yaml`/`.yml` → YAML).

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use schemacheck_schema::{validate_file, SchemaCheckError, ValidatorConfig};

/// Arguments for `schemacheck validate`.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON Schema file.
    #[arg(value_name = "SCHEMA_FILE")]
    pub schema: PathBuf,

    /// Path to the JSON or YAML document to validate.
    #[arg(value_name = "DATA_FILE")]
    pub data: PathBuf,
}

/// Execute the validate subcommand.
///
/// Pass and fail headers go to `out`; violation lines and operational
/// errors go to `err`. Each violation is printed as `  - ` followed by its
/// `Display` form, so root violations keep an empty pointer. Returns exit code 0 if the document is valid, 1 for
/// any failure.
pub fn run_validate(args: &ValidateArgs, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    match validate_file(&args.schema, &args.data, ValidatorConfig::default()) {
        Ok(()) => {
            writeln!(out, "{}", pass_line(&args.data))?;
            Ok(0)
        }
        Err(SchemaCheckError::ValidationFailed { violations, .. }) => {
            writeln!(out, "{}", fail_header(&args.data))?;
            for violation in &violations {
                writeln!(err, "  - {violation}")?;
            }
            Ok(1)
        }
        Err(e) => {
            writeln!(err, "❌ Error validating {}: {e}", args.data.display())?;
            Ok(1)
        }
    }
}

/// Line printed when the document conforms.
pub fn pass_line(data: &Path) -> String {
    format!("✅ {} passed validation", data.display())
}

/// Header printed before the violation list.
pub fn fail_header(data: &Path) -> String {
    format!("❌ {} failed validation:", data.display())
}
