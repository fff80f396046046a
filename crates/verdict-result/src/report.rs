//! Serializable audit records of evaluated results.

use serde::{Deserialize, Serialize};
use verdict_core::{ErrorInfo, Metadata, VerdictError};

use crate::hash::hash_report;
use crate::result::BooleanResult;

/// Audit record capturing everything needed to explain one decision after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionReport {
    /// Statement of the evaluated specification.
    pub statement: String,
    /// Whether the model satisfied the specification.
    pub satisfied: bool,
    /// Single-line causal summary.
    pub reason: String,
    /// Causal assertions of the first declaring nodes.
    pub assertions: Vec<String>,
    /// Number of operands selected as causes.
    pub causal_operand_count: usize,
    /// Justification, one entry per line.
    pub justification: Vec<String>,
    /// SHA-256 digest over every other field.
    #[serde(default)]
    pub digest: String,
}

impl DecisionReport {
    /// Captures `result` and stamps the digest.
    pub fn from_result<T: Metadata>(result: &BooleanResult<T>) -> Result<Self, VerdictError> {
        let description = result.description();
        let mut report = Self {
            statement: description.statement.clone(),
            satisfied: result.satisfied(),
            reason: description.reason.clone(),
            assertions: result.assertions(),
            causal_operand_count: description.causal_operand_count,
            justification: description
                .justification_lines()
                .into_iter()
                .map(str::to_string)
                .collect(),
            digest: String::new(),
        };
        report.digest = hash_report(&report)?;
        Ok(report)
    }

    /// Returns whether the stored digest matches the report contents.
    pub fn verify(&self) -> Result<bool, VerdictError> {
        Ok(hash_report(self)? == self.digest)
    }
}

fn map_err(err: serde_json::Error, code: &str) -> VerdictError {
    VerdictError::Serde(ErrorInfo::new(code, err.to_string()))
}

/// Serialises a decision report to JSON.
pub fn report_to_json(report: &DecisionReport) -> Result<String, VerdictError> {
    serde_json::to_string_pretty(report).map_err(|err| map_err(err, "report-serialize"))
}

/// Restores a decision report from JSON.
pub fn report_from_json(json: &str) -> Result<DecisionReport, VerdictError> {
    serde_json::from_str(json).map_err(|err| map_err(err, "report-deserialize"))
}
