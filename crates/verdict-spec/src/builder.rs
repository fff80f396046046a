//! Fluent construction of atomic and wrapper specifications.
//!
//! The builders run in a fixed order: predicate, then `when_true`, then `when_false`,
//! then `create`. Input validation happens in `create`, which reports problems as
//! [`VerdictError::Construction`].

use std::sync::Arc;

use verdict_core::{BoxError, ErrorInfo, Metadata, Notation, VerdictError};
use verdict_result::BooleanResult;

use crate::factory::{Factory, ModelFn};
use crate::policy::Policy;
use crate::spec::{Atomic, Predicate, SpecKind, Specification};

/// Entry point for building specifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spec;

impl Spec {
    /// Starts a specification from a boolean predicate.
    pub fn build<M, F>(predicate: F) -> PredicateBuilder<M>
    where
        M: ?Sized + 'static,
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        PredicateBuilder {
            predicate: Arc::new(move |model: &M| Ok(predicate(model))),
        }
    }

    /// Starts a specification from a fallible boolean predicate.
    pub fn try_build<M, F, E>(predicate: F) -> PredicateBuilder<M>
    where
        M: ?Sized + 'static,
        F: Fn(&M) -> Result<bool, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        PredicateBuilder {
            predicate: Arc::new(move |model: &M| predicate(model).map_err(Into::into)),
        }
    }

    /// Starts a wrapper around an existing specification.
    ///
    /// Without factories the wrapper only renames; its explanation is the inner one.
    pub fn from_spec<M, T>(spec: &Specification<M, T>) -> WrapperBuilder<M, T>
    where
        M: ?Sized + 'static,
        T: Metadata,
    {
        WrapperBuilder {
            predicate: Predicate::Spec(spec.clone()),
        }
    }

    /// Starts a wrapper around a function producing results.
    pub fn from_result_fn<M, T, F>(function: F) -> WrapperBuilder<M, T>
    where
        M: ?Sized + 'static,
        T: Metadata,
        F: Fn(&M) -> BooleanResult<T> + Send + Sync + 'static,
    {
        WrapperBuilder {
            predicate: Predicate::Result(Arc::new(move |model: &M| Ok(function(model)))),
        }
    }

    /// Starts a wrapper around a fallible function producing results.
    ///
    /// A [`VerdictError`] returned by the function is passed through unchanged.
    pub fn try_from_result_fn<M, T, F, E>(function: F) -> WrapperBuilder<M, T>
    where
        M: ?Sized + 'static,
        T: Metadata,
        F: Fn(&M) -> Result<BooleanResult<T>, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        WrapperBuilder {
            predicate: Predicate::Result(Arc::new(move |model: &M| {
                function(model).map_err(Into::into)
            })),
        }
    }
}

/// Builder holding a boolean predicate.
pub struct PredicateBuilder<M: ?Sized> {
    predicate: ModelFn<M, bool>,
}

impl<M: ?Sized + 'static> PredicateBuilder<M> {
    /// Creates a specification whose statement stands in for its outcome.
    pub fn create(self, statement: impl Into<String>) -> Result<Specification<M, String>, VerdictError> {
        let statement = check_statement(statement.into())?;
        Ok(atomic(statement, Predicate::Bool(self.predicate), None))
    }

    /// Assertion declared when the predicate holds.
    pub fn when_true(self, assertion: impl Into<String>) -> TrueBuilder<M, String> {
        self.when_true_with(Factory::Constant(assertion.into()))
    }

    /// Factory producing the values declared when the predicate holds.
    pub fn when_true_with<T: Metadata>(self, factory: Factory<M, T>) -> TrueBuilder<M, T> {
        TrueBuilder {
            predicate: Predicate::Bool(self.predicate),
            when_true: factory,
        }
    }
}

/// Builder wrapping an existing specification or result function.
pub struct WrapperBuilder<M: ?Sized, T> {
    predicate: Predicate<M, T>,
}

impl<M: ?Sized + 'static, T: Metadata> WrapperBuilder<M, T> {
    /// Creates a wrapper that renames the inner proposition and forwards its explanation.
    pub fn create(self, statement: impl Into<String>) -> Result<Specification<M, T>, VerdictError> {
        let statement = check_statement(statement.into())?;
        Ok(atomic(statement, self.predicate, None))
    }

    /// Value declared when the inner proposition holds.
    pub fn when_true(self, value: impl Into<T>) -> TrueBuilder<M, T> {
        self.when_true_with(Factory::Constant(value.into()))
    }

    /// Factory producing the values declared when the inner proposition holds.
    pub fn when_true_with(self, factory: Factory<M, T>) -> TrueBuilder<M, T> {
        TrueBuilder {
            predicate: self.predicate,
            when_true: factory,
        }
    }
}

/// Builder awaiting the unsatisfied-branch factory.
pub struct TrueBuilder<M: ?Sized, T> {
    predicate: Predicate<M, T>,
    when_true: Factory<M, T>,
}

impl<M: ?Sized + 'static, T: Metadata> TrueBuilder<M, T> {
    /// Value declared when the proposition fails.
    pub fn when_false(self, value: impl Into<T>) -> FactoryBuilder<M, T> {
        self.when_false_with(Factory::Constant(value.into()))
    }

    /// Factory producing the values declared when the proposition fails.
    pub fn when_false_with(self, factory: Factory<M, T>) -> FactoryBuilder<M, T> {
        FactoryBuilder {
            predicate: self.predicate,
            when_true: self.when_true,
            when_false: factory,
            notation: None,
        }
    }
}

/// Builder with both factories in place, ready to create.
pub struct FactoryBuilder<M: ?Sized, T> {
    predicate: Predicate<M, T>,
    when_true: Factory<M, T>,
    when_false: Factory<M, T>,
    notation: Option<Notation>,
}

impl<M: ?Sized + 'static, T: Metadata> FactoryBuilder<M, T> {
    /// Renders results of the created specification with `notation`.
    pub fn notation(mut self, notation: Notation) -> Self {
        self.notation = Some(notation);
        self
    }

    /// Creates the specification under `statement`.
    pub fn create(self, statement: impl Into<String>) -> Result<Specification<M, T>, VerdictError> {
        let statement = check_statement(statement.into())?;
        check_fixed(&statement, self.when_true.fixed())?;
        check_fixed(&statement, self.when_false.fixed())?;
        if matches!(self.predicate, Predicate::Bool(_))
            && (self.when_true.needs_underlying() || self.when_false.needs_underlying())
        {
            return Err(VerdictError::Construction(
                ErrorInfo::new(
                    "unsupported-factory",
                    "a boolean predicate has no underlying result to pass to a factory",
                )
                .with_context("statement", statement.as_str())
                .with_hint("use Spec::from_spec or Spec::from_result_fn to wrap a result"),
            ));
        }
        let spec = atomic(
            statement,
            self.predicate,
            Some((self.when_true, self.when_false)),
        );
        Ok(match self.notation {
            Some(notation) => spec.with_notation(notation),
            None => spec,
        })
    }

    /// Creates the specification named after the constant textual true assertion.
    pub fn create_default(self) -> Result<Specification<M, T>, VerdictError> {
        let statement = match &self.when_true {
            Factory::Constant(value) => value.as_assertion(),
            _ => None,
        };
        match statement {
            Some(statement) => self.create(statement),
            None => Err(VerdictError::construction(
                "missing-statement",
                "a default statement requires a constant textual true assertion",
            )),
        }
    }

    /// Creates a policy whose branches each decide exactly one value.
    pub fn create_policy(self, statement: impl Into<String>) -> Result<Policy<M, T>, VerdictError> {
        if !self.when_true.is_single_valued() || !self.when_false.is_single_valued() {
            return Err(VerdictError::construction(
                "multi-valued-policy",
                "policy factories must each yield exactly one value",
            ));
        }
        self.create(statement).map(Policy::new)
    }
}

fn atomic<M: ?Sized, T>(
    statement: String,
    predicate: Predicate<M, T>,
    factories: Option<(Factory<M, T>, Factory<M, T>)>,
) -> Specification<M, T> {
    Specification::from_kind(
        statement,
        Arc::new(Notation::default()),
        SpecKind::Atomic(Atomic {
            predicate,
            factories,
        }),
    )
}

pub(crate) fn check_statement(statement: String) -> Result<String, VerdictError> {
    if statement.trim().is_empty() {
        return Err(VerdictError::construction(
            "empty-statement",
            "statement must not be empty",
        ));
    }
    Ok(statement)
}

pub(crate) fn check_fixed<T: Metadata>(statement: &str, values: &[T]) -> Result<(), VerdictError> {
    let blank = values
        .iter()
        .filter_map(Metadata::as_assertion)
        .any(|assertion| assertion.trim().is_empty());
    if blank {
        return Err(VerdictError::Construction(
            ErrorInfo::new("empty-assertion", "assertion must not be empty")
                .with_context("statement", statement),
        ));
    }
    Ok(())
}
