#![deny(missing_docs)]
#![doc = "Core operator, notation, error and explanation-tier types shared by the verdict crates."]

pub mod errors;
pub mod metadata;
pub mod notation;
mod operator;
pub mod tier;

pub use errors::{BoxError, ErrorInfo, EvaluationFailure, FactoryRole, VerdictError};
pub use metadata::{assertions_for, Metadata};
pub use notation::{
    notation_from_json, notation_from_path, notation_from_yaml, notation_to_json, Notation,
};
pub use operator::{Operator, OperatorFamily};
pub use tier::{Explanation, MetadataNode, Tier};
