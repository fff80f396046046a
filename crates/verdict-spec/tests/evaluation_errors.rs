use std::error::Error;
use std::fmt;

use verdict_spec::{Factory, FactoryRole, Spec, Specification, VerdictError};

#[derive(Debug)]
struct LookupFailed(&'static str);

impl fmt::Display for LookupFailed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lookup failed for {}", self.0)
    }
}

impl Error for LookupFailed {}

fn left() -> Specification<i32> {
    Spec::build(|_: &i32| false).create("left").unwrap()
}

fn exploding_right() -> Specification<i32> {
    Spec::build(|_: &i32| true)
        .when_true_with(Factory::try_model(|_: &i32| {
            Err::<String, _>(LookupFailed("right"))
        }))
        .when_false("right failed")
        .create("right")
        .unwrap()
}

#[test]
fn short_circuit_skips_failing_factories() {
    let spec = left().and_also(&exploding_right());
    let result = spec.is_satisfied_by(&1).unwrap();
    assert!(!result.satisfied());
    assert_eq!(result.reason(), "¬left");
}

#[test]
fn full_conjunction_surfaces_the_failure() {
    let err = left().and(&exploding_right()).is_satisfied_by(&1).unwrap_err();
    let failure = err.as_evaluation().expect("evaluation failure");
    assert_eq!(failure.role(), FactoryRole::WhenTrue);
    assert_eq!(failure.statement(), "right");
    assert_eq!(failure.info().code, "when-true-failed");
    assert_eq!(failure.cause().to_string(), "lookup failed for right");
    assert!(failure.cause().downcast_ref::<LookupFailed>().is_some());
}

#[test]
fn predicate_failures_are_wrapped() {
    let spec = Spec::try_build(|n: &i32| {
        if *n < 0 {
            Err("negative input")
        } else {
            Ok(*n > 10)
        }
    })
    .create("greater than ten")
    .unwrap();
    let err = spec.is_satisfied_by(&-1).unwrap_err();
    assert!(matches!(&err, VerdictError::Evaluation(failure) if failure.role() == FactoryRole::Predicate));
    assert_eq!(err.info().code, "predicate-failed");
    assert_eq!(err.info().context.get("role").map(String::as_str), Some("predicate"));
    assert!(err.to_string().contains("the predicate of 'greater than ten' failed: negative input"));
}

#[test]
fn nested_failures_are_wrapped_once() {
    let outer = Spec::from_spec(&exploding_right())
        .when_true("outer true")
        .when_false("outer false")
        .create("outer")
        .unwrap();
    let composite = &outer | &left();
    let err = composite.is_satisfied_by(&1).unwrap_err();
    let failure = err.as_evaluation().expect("evaluation failure");
    assert_eq!(failure.statement(), "right");
    assert!(failure.source().is_some());
    assert!(failure
        .source()
        .and_then(|cause| cause.source())
        .is_none());
}

#[test]
fn result_functions_pass_wrapped_errors_through() {
    let inner = exploding_right();
    let wrapper = Spec::try_from_result_fn(move |n: &i32| inner.is_satisfied_by(n))
        .create("wrapper")
        .unwrap();
    let err = wrapper.is_satisfied_by(&1).unwrap_err();
    assert_eq!(err.as_evaluation().map(|failure| failure.statement()), Some("right"));
    assert_eq!(err.info().code, "when-true-failed");
}

#[test]
fn result_function_failures_are_attributed_to_the_wrapper() {
    let wrapper = Spec::try_from_result_fn(|_: &i32| {
        Err::<verdict_spec::BooleanResult<String>, _>(LookupFailed("wrapper"))
    })
    .create("wrapper")
    .unwrap();
    let err = wrapper.is_satisfied_by(&1).unwrap_err();
    let failure = err.as_evaluation().expect("evaluation failure");
    assert_eq!(failure.statement(), "wrapper");
    assert_eq!(failure.role(), FactoryRole::Predicate);
}
