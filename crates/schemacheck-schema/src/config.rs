//! # Validator Configuration
//!
//! The options every compiled validator is built with. The configuration
//! is a plain value constructed per operation; there is no process-wide
//! validator state.
//!
//! ## Extra formats
//!
//! On top of the formats `jsonschema` ships with, the OpenAPI-style names
//! below are registered so they are checked (or at least recognised)
//! instead of falling through as unknown:
//!
//! - `byte`: base64 text, length a multiple of four.
//! - `url`: absolute `http`, `https` or `ftp` URL with a host.
//! - `int32`, `int64`, `float`, `double`, `password`, `binary`: known
//!   names. `jsonschema` only applies `format` to string instances, and
//!   these impose nothing on strings.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use jsonschema::ValidationOptions;
use url::Url;

/// Lenient about trailing bits, strict about alphabet and padding.
const BYTE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Format names with no constraint on string values.
const ANNOTATION_FORMATS: [&str; 6] = ["int32", "int64", "float", "double", "password", "binary"];

/// Options applied when compiling a schema.
///
/// [`ValidatorConfig::default`] is the configuration the CLI always uses:
/// every violation is collected, strict schema checks are off, and
/// `format` keywords are asserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Report every violation instead of stopping at the first one.
    pub collect_all_errors: bool,
    /// Reject schemas that use `format` names the validator does not know.
    pub strict: bool,
    /// Assert `format` keywords (date, email, uri, byte, url, ...) instead
    /// of treating them as annotations.
    pub validate_formats: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            collect_all_errors: true,
            strict: false,
            validate_formats: true,
        }
    }
}

impl ValidatorConfig {
    /// Build `jsonschema` options from this configuration.
    ///
    /// No draft is pinned: the dialect is detected from the schema's
    /// `$schema` keyword, falling back to the library default.
    pub fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.should_validate_formats(self.validate_formats)
            .should_ignore_unknown_formats(!self.strict)
            .with_format("byte", is_byte)
            .with_format("url", is_url);
        for name in ANNOTATION_FORMATS {
            opts.with_format(name, |_: &str| true);
        }
        opts
    }

    /// Cap on the number of violations kept from one validation run.
    pub fn violation_limit(&self) -> usize {
        if self.collect_all_errors {
            usize::MAX
        } else {
            1
        }
    }
}

fn is_byte(value: &str) -> bool {
    value.len() % 4 == 0 && BYTE_ENGINE.decode(value).is_ok()
}

fn is_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https" | "ftp") && url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validator_for(schema: serde_json::Value) -> jsonschema::Validator {
        ValidatorConfig::default()
            .build_options()
            .build(&schema)
            .unwrap()
    }

    #[test]
    fn default_collects_all_errors_non_strict_with_formats() {
        let cfg = ValidatorConfig::default();
        assert!(cfg.collect_all_errors);
        assert!(!cfg.strict);
        assert!(cfg.validate_formats);
        assert_eq!(cfg.violation_limit(), usize::MAX);
    }

    #[test]
    fn first_error_only_limits_to_one() {
        let cfg = ValidatorConfig {
            collect_all_errors: false,
            ..ValidatorConfig::default()
        };
        assert_eq!(cfg.violation_limit(), 1);
    }

    #[test]
    fn formats_are_asserted_by_default() {
        let validator = validator_for(json!({"type": "string", "format": "email"}));
        assert!(validator.is_valid(&json!("someone@example.com")));
        assert!(!validator.is_valid(&json!("not an email")));
    }

    #[test]
    fn formats_are_annotations_when_disabled() {
        let schema = json!({"type": "string", "format": "email"});
        let cfg = ValidatorConfig {
            validate_formats: false,
            ..ValidatorConfig::default()
        };
        let validator = cfg.build_options().build(&schema).unwrap();
        assert!(validator.is_valid(&json!("not an email")));
    }

    #[test]
    fn byte_format_requires_base64() {
        let validator = validator_for(json!({"format": "byte"}));
        assert!(validator.is_valid(&json!("aGVsbG8gd29ybGQ=")));
        assert!(validator.is_valid(&json!("")));
        assert!(!validator.is_valid(&json!("%%% not base64 %%%")));
        assert!(!validator.is_valid(&json!("abc")));
    }

    #[test]
    fn url_format_requires_web_scheme_and_host() {
        let validator = validator_for(json!({"format": "url"}));
        assert!(validator.is_valid(&json!("https://example.com/path?q=1")));
        assert!(validator.is_valid(&json!("ftp://files.example.org/pub")));
        assert!(!validator.is_valid(&json!("not a url")));
        assert!(!validator.is_valid(&json!("mailto:someone@example.com")));
    }

    #[test]
    fn byte_and_url_violations_reported_together() {
        let validator = validator_for(json!({
            "properties": {"b": {"format": "byte"}, "u": {"format": "url"}}
        }));
        let doc = json!({"b": "%%% not base64 %%%", "u": "not a url"});
        assert_eq!(validator.iter_errors(&doc).count(), 2);
    }

    #[test]
    fn numeric_and_annotation_formats_are_known_names() {
        let cfg = ValidatorConfig {
            strict: true,
            ..ValidatorConfig::default()
        };
        for name in ANNOTATION_FORMATS {
            let schema = json!({"format": name});
            let validator = cfg
                .build_options()
                .build(&schema)
                .unwrap_or_else(|e| panic!("{name}: {e}"));
            assert!(validator.is_valid(&json!("anything")), "{name}");
            assert!(validator.is_valid(&json!(12)), "{name}");
        }
    }

    #[test]
    fn unknown_format_tolerated_when_not_strict() {
        let schema = json!({"type": "string", "format": "x-custom-format"});
        let result = ValidatorConfig::default().build_options().build(&schema);
        assert!(result.is_ok());
    }

    #[test]
    fn unknown_format_rejected_when_strict() {
        let schema = json!({"type": "string", "format": "x-custom-format"});
        let cfg = ValidatorConfig {
            strict: true,
            ..ValidatorConfig::default()
        };
        assert!(cfg.build_options().build(&schema).is_err());
    }
}
