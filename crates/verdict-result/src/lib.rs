#![deny(missing_docs)]
#![doc = "Boolean results carrying causal explanations, with statement, reason and justification rendering."]

/// Determinate-operand selection for every operator.
pub mod causality;
mod description;
/// Canonical hashing helpers.
pub mod hash;
mod ops;
pub mod render;
pub mod report;
mod result;

pub use causality::{determine, Determination};
pub use description::ResultDescription;
pub use hash::{hash_report, stable_hash_string, to_canonical_json_bytes};
pub use render::statement::{compose_expression, compose_statement};
pub use report::{report_from_json, report_to_json, DecisionReport};
pub use result::{BooleanResult, Declaration, ResultKind};
