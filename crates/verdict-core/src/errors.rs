//! Structured error types shared across verdict crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Boxed error produced by fallible user callbacks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Structured payload attached to every [`VerdictError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (statements, roles, counts, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

/// User callback slot that failed during evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FactoryRole {
    /// The predicate deciding satisfaction.
    Predicate,
    /// The factory producing values for the satisfied branch.
    WhenTrue,
    /// The factory producing values for the unsatisfied branch.
    WhenFalse,
}

impl FactoryRole {
    /// Returns the role name used in diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            FactoryRole::Predicate => "predicate",
            FactoryRole::WhenTrue => "WhenTrue",
            FactoryRole::WhenFalse => "WhenFalse",
        }
    }

    /// Returns the role that produces values for the given outcome.
    pub fn for_outcome(satisfied: bool) -> Self {
        if satisfied {
            FactoryRole::WhenTrue
        } else {
            FactoryRole::WhenFalse
        }
    }

    fn code(&self) -> &'static str {
        match self {
            FactoryRole::Predicate => "predicate-failed",
            FactoryRole::WhenTrue => "when-true-failed",
            FactoryRole::WhenFalse => "when-false-failed",
        }
    }
}

impl Display for FactoryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user predicate or factory failure, captured at its invocation boundary.
#[derive(Debug, Error)]
#[error("{info}")]
pub struct EvaluationFailure {
    info: ErrorInfo,
    role: FactoryRole,
    #[source]
    source: BoxError,
}

impl EvaluationFailure {
    /// Wraps `source` raised by the `role` callback of the specification named `statement`.
    pub fn new(statement: &str, role: FactoryRole, source: BoxError) -> Self {
        let info = ErrorInfo::new(
            role.code(),
            format!("the {role} of '{statement}' failed: {source}"),
        )
        .with_context("statement", statement)
        .with_context("role", role.as_str());
        Self { info, role, source }
    }

    /// Returns the structured payload.
    pub fn info(&self) -> &ErrorInfo {
        &self.info
    }

    /// Returns the callback slot that failed.
    pub fn role(&self) -> FactoryRole {
        self.role
    }

    /// Returns the statement of the specification owning the failed callback.
    pub fn statement(&self) -> &str {
        self.info
            .context
            .get("statement")
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Returns the original error raised by the callback.
    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.source.as_ref()
    }
}

/// Canonical error type for verdict specifications.
#[derive(Debug, Error)]
pub enum VerdictError {
    /// Invalid builder input, raised synchronously when a specification is created.
    #[error("construction error: {0}")]
    Construction(ErrorInfo),
    /// A user callback failed while a model was being evaluated.
    #[error("evaluation error: {0}")]
    Evaluation(#[source] EvaluationFailure),
    /// Serialization of reports or notation configuration failed.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl VerdictError {
    /// Builds a construction error with the given code and message.
    pub fn construction(code: &str, message: impl Into<String>) -> Self {
        VerdictError::Construction(ErrorInfo::new(code, message))
    }

    /// Wraps a callback failure, passing an already wrapped [`VerdictError`] through untouched.
    pub fn evaluation(statement: &str, role: FactoryRole, source: BoxError) -> Self {
        match source.downcast::<VerdictError>() {
            Ok(inner) => *inner,
            Err(source) => VerdictError::Evaluation(EvaluationFailure::new(statement, role, source)),
        }
    }

    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VerdictError::Construction(info) | VerdictError::Serde(info) => info,
            VerdictError::Evaluation(failure) => failure.info(),
        }
    }

    /// Returns the evaluation failure, if this error was raised by a user callback.
    pub fn as_evaluation(&self) -> Option<&EvaluationFailure> {
        match self {
            VerdictError::Evaluation(failure) => Some(failure),
            _ => None,
        }
    }
}
