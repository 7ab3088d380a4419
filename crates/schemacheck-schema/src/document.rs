//! # Document Loading
//!
//! Reads data files and parses them into `serde_json::Value`, choosing the
//! parser from the file name. YAML is converted into the JSON value space
//! so the validator sees the same tree regardless of the source format.

use std::fmt;
use std::path::Path;

use serde_json::Value;
use serde_yaml::Value as Yaml;

use crate::validate::SchemaCheckError;

/// Serialization format of a data document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a path.
    ///
    /// Paths whose text ends with `.yaml` or `.yml` are YAML; everything
    /// else is JSON. The match is a literal, case-sensitive suffix check,
    /// so `DATA.YAML` is parsed as JSON.
    pub fn from_path(path: &Path) -> Self {
        let text = path.to_string_lossy();
        if text.ends_with(".yaml") || text.ends_with(".yml") {
            DocumentFormat::Yaml
        } else {
            DocumentFormat::Json
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => f.write_str("JSON"),
            DocumentFormat::Yaml => f.write_str("YAML"),
        }
    }
}

/// Read a data document from disk and parse it according to its path.
///
/// # Errors
///
/// Returns [`SchemaCheckError::DocumentRead`] if the file cannot be read and
/// [`SchemaCheckError::DocumentParse`] if its content is not valid for the
/// detected format.
pub fn load_document(path: &Path) -> Result<Value, SchemaCheckError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| SchemaCheckError::DocumentRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), %format, "parsing data document");

    parse_document(&content, format).map_err(|reason| SchemaCheckError::DocumentParse {
        path: path.display().to_string(),
        format,
        reason,
    })
}

/// Parse document text in the given format.
///
/// YAML merge keys (`<<: *anchor`) are expanded before the tree is handed
/// to the validator. Returns the parser's message on failure.
pub fn parse_document(content: &str, format: DocumentFormat) -> Result<Value, String> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => {
            let mut yaml: Yaml = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
            yaml.apply_merge().map_err(|e| e.to_string())?;
            into_json(yaml)
        }
    }
}

/// Move a YAML tree into the JSON value space.
///
/// Tags are dropped. Scalar mapping keys are stringified; sequence and
/// mapping keys are rejected.
fn into_json(yaml: Yaml) -> Result<Value, String> {
    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => Value::Number(json_number(&n)?),
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(into_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| -> Result<(String, Value), String> {
                    Ok((json_key(k)?, into_json(v)?))
                })
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Tagged(tagged) => into_json(tagged.value)?,
    })
}

// NaN and the infinities have no JSON form.
fn json_number(n: &serde_yaml::Number) -> Result<serde_json::Number, String> {
    if let Some(i) = n.as_i64() {
        return Ok(i.into());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.into());
    }
    n.as_f64()
        .and_then(serde_json::Number::from_f64)
        .ok_or_else(|| format!("YAML number {n} has no JSON equivalent"))
}

fn json_key(key: Yaml) -> Result<String, String> {
    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => json_key(tagged.value),
        other => Err(format!("mapping key {other:?} is not a scalar")),
    }
}
