//! # schemacheck-schema — Schema Compilation & Document Validation
//!
//! Compiles JSON Schema documents and validates JSON or YAML data files
//! against them. All schema semantics come from the `jsonschema` crate;
//! this crate decides how files are read, which parser a data file goes
//! through, and how failures are reported.
//!
//! ## Modules
//!
//! - [`config`] — the fixed [`ValidatorConfig`] used for every compile.
//! - [`document`] — reading files and dispatching on [`DocumentFormat`].
//! - [`validate`] — [`compile_schema`], [`validate_file`] and the
//!   [`SchemaCheckError`] taxonomy.
//!
//! ## Crate Policy
//!
//! - Nothing is cached: each call builds a fresh configuration and a
//!   fresh compiled validator.
//! - Violations are reported in the order the validator yields them,
//!   without sorting or de-duplication.

pub mod config;
pub mod document;
pub mod validate;

pub use config::ValidatorConfig;
pub use document::{load_document, parse_document, DocumentFormat};
pub use validate::{compile_schema, validate_file, CompiledSchema, SchemaCheckError, Violation};
