//! Specifications deciding exactly one value per evaluation.

use std::fmt;
use std::ops::Deref;

use verdict_core::{BoxError, FactoryRole, Metadata, VerdictError};
use verdict_result::BooleanResult;

use crate::spec::Specification;

/// A specification whose branches each yield a single value.
pub struct Policy<M: ?Sized, T> {
    spec: Specification<M, T>,
}

impl<M: ?Sized, T> Clone for Policy<M, T> {
    fn clone(&self) -> Self {
        Self {
            spec: self.spec.clone(),
        }
    }
}

impl<M: ?Sized, T> fmt::Debug for Policy<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("statement", &self.spec.statement())
            .finish_non_exhaustive()
    }
}

impl<M: ?Sized + 'static, T: Metadata> Policy<M, T> {
    pub(crate) fn new(spec: Specification<M, T>) -> Self {
        Self { spec }
    }

    /// Evaluates the policy and extracts the decided value.
    pub fn execute(&self, model: &M) -> Result<PolicyResult<T>, VerdictError> {
        let result = self.spec.is_satisfied_by(model)?;
        match result.declared_values() {
            [value] => Ok(PolicyResult {
                value: value.clone(),
                result,
            }),
            values => {
                let role = FactoryRole::for_outcome(result.satisfied());
                let cause = format!("decided {} values instead of one", values.len());
                Err(VerdictError::evaluation(
                    self.spec.statement(),
                    role,
                    BoxError::from(cause),
                ))
            }
        }
    }

    /// The underlying specification.
    pub fn specification(&self) -> &Specification<M, T> {
        &self.spec
    }
}

/// Result of executing a policy.
#[derive(Debug, Clone)]
pub struct PolicyResult<T> {
    value: T,
    result: BooleanResult<T>,
}

impl<T> PolicyResult<T> {
    /// The decided value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The full evaluation result.
    pub fn result(&self) -> &BooleanResult<T> {
        &self.result
    }

    /// Consumes the result, returning the decided value.
    pub fn into_value(self) -> T {
        self.value
    }
}

impl<T> Deref for PolicyResult<T> {
    type Target = BooleanResult<T>;

    fn deref(&self) -> &BooleanResult<T> {
        &self.result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Factory, Spec};

    #[test]
    fn value_count_mismatch_is_an_evaluation_failure() {
        let spec = Spec::build(|n: &i32| *n > 0)
            .when_true_with(Factory::Constants(vec![
                "positive".to_string(),
                "non-zero".to_string(),
            ]))
            .when_false("not positive")
            .create("sign")
            .unwrap();
        let policy = Policy::new(spec);

        let err = policy.execute(&1).unwrap_err();
        let failure = err.as_evaluation().expect("evaluation failure");
        assert_eq!(failure.role(), FactoryRole::WhenTrue);
        assert_eq!(failure.statement(), "sign");
        assert_eq!(failure.info().code, "when-true-failed");
        assert_eq!(policy.execute(&-1).unwrap().into_value(), "not positive");
    }
}
