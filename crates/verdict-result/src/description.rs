use serde::{Deserialize, Serialize};

/// Textual description of one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultDescription {
    /// Single-line causal summary.
    pub reason: String,
    /// Statement of the specification that was evaluated.
    pub statement: String,
    /// Number of operands selected as causes.
    pub causal_operand_count: usize,
    /// Indented multi-line rendering of the causal explanation.
    pub justification: String,
}

impl ResultDescription {
    /// Returns the justification split into lines.
    pub fn justification_lines(&self) -> Vec<&str> {
        if self.justification.is_empty() {
            return Vec::new();
        }
        self.justification.lines().collect()
    }
}
