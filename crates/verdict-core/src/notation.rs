//! Textual conventions used when rendering statements, reasons and justifications.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, VerdictError};

/// Rendering notation shared by specifications and the results they produce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notation {
    /// Spaces emitted per nesting level in justifications and expressions.
    #[serde(default = "Notation::default_indent")]
    pub indent: usize,
    /// Prefix marking a negated operand or block.
    #[serde(default = "Notation::default_not_symbol")]
    pub not_symbol: String,
    /// Prefix applied to a statement when it stands in for a false assertion.
    #[serde(default = "Notation::default_false_prefix")]
    pub false_prefix: String,
    /// Separator joining several assertions declared by one node.
    #[serde(default = "Notation::default_assertion_separator")]
    pub assertion_separator: String,
}

impl Notation {
    const fn default_indent() -> usize {
        2
    }

    fn default_not_symbol() -> String {
        "!".to_string()
    }

    fn default_false_prefix() -> String {
        "¬".to_string()
    }

    fn default_assertion_separator() -> String {
        ", ".to_string()
    }

    /// Returns the whitespace prefix for the given nesting depth.
    pub fn pad(&self, depth: usize) -> String {
        " ".repeat(self.indent * depth)
    }

    /// Synthesizes the assertion standing in for an outcome from a bare statement.
    pub fn fallback_assertion(&self, statement: &str, satisfied: bool) -> String {
        if satisfied {
            statement.to_string()
        } else {
            format!("{}{}", self.false_prefix, statement)
        }
    }
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            indent: Self::default_indent(),
            not_symbol: Self::default_not_symbol(),
            false_prefix: Self::default_false_prefix(),
            assertion_separator: Self::default_assertion_separator(),
        }
    }
}

fn map_err(err: impl std::fmt::Display, code: &str) -> VerdictError {
    VerdictError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Parses a notation from JSON, filling omitted fields with defaults.
pub fn notation_from_json(json: &str) -> Result<Notation, VerdictError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "notation-json"))
}

/// Parses a notation from YAML, filling omitted fields with defaults.
pub fn notation_from_yaml(yaml: &str) -> Result<Notation, VerdictError> {
    serde_yaml::from_str(yaml).map_err(|err| map_err(err, "notation-yaml"))
}

/// Serialises a notation to pretty JSON.
pub fn notation_to_json(notation: &Notation) -> Result<String, VerdictError> {
    serde_json::to_string_pretty(notation).map_err(|err| map_err(err, "notation-serialize"))
}

/// Loads a notation file, choosing the format from its extension (`json`, `yaml`, `yml`).
pub fn notation_from_path(path: impl AsRef<Path>) -> Result<Notation, VerdictError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|err| {
        VerdictError::Serde(
            ErrorInfo::new("notation-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => notation_from_json(&text),
        Some("yaml") | Some("yml") => notation_from_yaml(&text),
        other => Err(VerdictError::Serde(
            ErrorInfo::new("notation-format", "unsupported notation file extension")
                .with_context("path", path.display().to_string())
                .with_context("extension", other.unwrap_or(""))
                .with_hint("use a .json, .yaml or .yml file"),
        )),
    }
}
