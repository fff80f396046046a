#![deny(missing_docs)]
#![doc = "Composable specifications over domain models whose evaluations explain themselves."]

pub mod builder;
pub mod factory;
mod ops;
pub mod policy;
pub mod quantifier;
mod spec;

pub use builder::{FactoryBuilder, PredicateBuilder, Spec, TrueBuilder, WrapperBuilder};
pub use factory::{Factory, ModelFn, ResultFn};
pub use policy::{Policy, PolicyResult};
pub use quantifier::{
    Evaluation, EvaluationFactory, EvaluationFn, Quantifier, QuantifierBuilder, Selection,
};
pub use spec::Specification;
pub use verdict_core::{
    notation_from_json, notation_from_path, notation_from_yaml, FactoryRole, Metadata,
    Notation, Operator, VerdictError,
};
pub use verdict_result::{BooleanResult, DecisionReport};
