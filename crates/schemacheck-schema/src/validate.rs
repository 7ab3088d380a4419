//! # Schema Compilation & Validation
//!
//! Reads a schema file, compiles it with `jsonschema`, and validates data
//! documents against the result.
//!
//! ## Pipeline
//!
//! `read schema → parse JSON → compile → read data → parse JSON/YAML →
//! validate`. Each stage has its own [`SchemaCheckError`] variant, so
//! callers can tell a malformed schema from a failing document even
//! though the CLI collapses all of them to exit code 1.
//!
//! Only [`SchemaCheckError::ValidationFailed`] carries a structured list of
//! violations; every other failure is a single message.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::config::ValidatorConfig;
use crate::document::{load_document, DocumentFormat};

/// Error raised anywhere in the compile/validate pipeline.
#[derive(Error, Debug)]
pub enum SchemaCheckError {
    /// The schema file could not be read.
    #[error("cannot read schema '{path}': {reason}")]
    SchemaRead {
        /// Path to the schema file.
        path: String,
        /// Underlying I/O message.
        reason: String,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON in schema '{path}': {reason}")]
    SchemaParse {
        /// Path to the schema file.
        path: String,
        /// Parser message.
        reason: String,
    },

    /// The parsed schema was rejected by the validator.
    #[error("schema '{path}' failed to compile: {reason}")]
    SchemaCompile {
        /// Path to the schema file.
        path: String,
        /// Compiler message.
        reason: String,
    },

    /// The data file could not be read.
    #[error("cannot read document '{path}': {reason}")]
    DocumentRead {
        /// Path to the data file.
        path: String,
        /// Underlying I/O message.
        reason: String,
    },

    /// The data file is not valid in its detected format.
    #[error("invalid {format} in document '{path}': {reason}")]
    DocumentParse {
        /// Path to the data file.
        path: String,
        /// Format chosen from the path.
        format: DocumentFormat,
        /// Parser message.
        reason: String,
    },

    /// The document parsed but does not conform to the schema.
    #[error("document violates schema '{schema}' ({} violation(s))", .violations.len())]
    ValidationFailed {
        /// Path to the schema that was violated.
        schema: String,
        /// Every violation, in validator order.
        violations: Vec<Violation>,
    },
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the instance. Empty for the root.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Validator message.
    pub message: String,
}

/// Renders as `<instance path>: <message>`. The pointer is printed as the
/// validator produced it, so a root violation starts with `: `.
impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.instance_path, self.message)
    }
}

/// A schema compiled from a file, ready to validate documents.
///
/// Only usable for the schema it was built from; nothing is shared between
/// instances.
pub struct CompiledSchema {
    path: PathBuf,
    validator: Validator,
    config: ValidatorConfig,
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("path", &self.path)
            .field("config", &self.config)
            .finish()
    }
}

impl CompiledSchema {
    /// Compile an already-parsed schema value.
    ///
    /// `path` is only used to label errors.
    pub fn from_value(
        path: impl Into<PathBuf>,
        schema: &Value,
        config: ValidatorConfig,
    ) -> Result<Self, SchemaCheckError> {
        let path = path.into();
        let validator = config.build_options().build(schema).map_err(|e| {
            SchemaCheckError::SchemaCompile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
        })?;
        Ok(Self {
            path,
            validator,
            config,
        })
    }

    /// Path of the schema file this validator was compiled from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaCheckError::ValidationFailed`] with every violation,
    /// or only the first one when `collect_all_errors` is off.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaCheckError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .take(self.config.violation_limit())
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            return Ok(());
        }

        for v in &violations {
            tracing::debug!(
                schema = %self.path.display(),
                instance_path = %v.instance_path,
                schema_path = %v.schema_path,
                "violation"
            );
        }

        Err(SchemaCheckError::ValidationFailed {
            schema: self.path.display().to_string(),
            violations,
        })
    }
}

/// Read, parse and compile the schema at `schema_path`.
///
/// # Errors
///
/// Returns [`SchemaCheckError::SchemaRead`], [`SchemaCheckError::SchemaParse`]
/// or [`SchemaCheckError::SchemaCompile`] for the stage that failed.
pub fn compile_schema(
    schema_path: &Path,
    config: ValidatorConfig,
) -> Result<CompiledSchema, SchemaCheckError> {
    let content =
        std::fs::read_to_string(schema_path).map_err(|e| SchemaCheckError::SchemaRead {
            path: schema_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let schema: Value =
        serde_json::from_str(&content).map_err(|e| SchemaCheckError::SchemaParse {
            path: schema_path.display().to_string(),
            reason: e.to_string(),
        })?;

    let dialect = schema
        .get("$schema")
        .and_then(|v| v.as_str())
        .unwrap_or("(default)");
    tracing::debug!(schema = %schema_path.display(), dialect, "compiling schema");

    CompiledSchema::from_value(schema_path, &schema, config)
}

/// Compile the schema at `schema_path` and validate the document at
/// `data_path` against it.
///
/// The data file is parsed as YAML when its path ends in `.yaml` or `.yml`
/// and as JSON otherwise.
pub fn validate_file(
    schema_path: &Path,
    data_path: &Path,
    config: ValidatorConfig,
) -> Result<(), SchemaCheckError> {
    let compiled = compile_schema(schema_path, config)?;
    let document = load_document(data_path)?;
    let result = compiled.validate(&document);
    match &result {
        Ok(()) => tracing::info!(
            schema = %compiled.path().display(),
            data = %data_path.display(),
            "document is valid"
        ),
        Err(SchemaCheckError::ValidationFailed { violations, .. }) => tracing::info!(
            schema = %compiled.path().display(),
            data = %data_path.display(),
            count = violations.len(),
            "document failed validation"
        ),
        Err(_) => {}
    }
    result
}
