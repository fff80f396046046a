use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use verdict_spec::{BooleanResult, Notation, Operator, Spec, Specification};

fn is_even() -> Specification<i32> {
    Spec::build(|n: &i32| n % 2 == 0).create("is even").unwrap()
}

fn positive() -> Specification<i32> {
    Spec::build(|n: &i32| *n > 0).create("positive").unwrap()
}

fn small() -> Specification<i32> {
    Spec::build(|n: &i32| *n < 100).create("small").unwrap()
}

fn counted(name: &str, outcome: bool, calls: &Arc<AtomicUsize>) -> Specification<i32> {
    let calls = Arc::clone(calls);
    Spec::build(move |_: &i32| {
        calls.fetch_add(1, Ordering::SeqCst);
        outcome
    })
    .create(name)
    .unwrap()
}

#[test]
fn atomic_results_fall_back_to_the_statement() {
    let spec = is_even();
    let even = spec.is_satisfied_by(&4).unwrap();
    assert!(even.satisfied());
    assert_eq!(even.reason(), "is even");
    let odd = spec.is_satisfied_by(&3).unwrap();
    assert_eq!(odd.reason(), "¬is even");
    assert_eq!(odd.justification(), "¬is even");
    assert_eq!(odd.assertions(), vec!["¬is even"]);
    assert_eq!(spec.expression(), "is even");
}

#[test]
fn chained_operators_flatten_except_xor() {
    let a = is_even();
    let b = positive();
    let c = small();
    let conjunction = &(&a & &b) & &c;
    assert_eq!(conjunction.operator(), Some(Operator::And));
    assert_eq!(conjunction.operands().len(), 3);
    assert_eq!(conjunction.statement(), "is even & positive & small");

    let exclusive = &(&a ^ &b) ^ &c;
    assert_eq!(exclusive.operands().len(), 2);
    assert_eq!(exclusive.operands()[0].operator(), Some(Operator::Xor));

    let result = conjunction.is_satisfied_by(&42).unwrap();
    assert_eq!(result.justification(), "AND\n  is even\n  positive\n  small");
}

#[test]
fn negated_disjunction_renders_with_brackets() {
    let spec = &is_even() & &!(&positive() | &small());
    assert_eq!(spec.statement(), "is even & !(positive | small)");
    assert_eq!(
        spec.expression(),
        "is even & !(positive | small)\n  is even\n  !(positive | small)"
    );

    let result = spec.is_satisfied_by(&4).unwrap();
    assert!(!result.satisfied());
    assert_eq!(result.reason(), "!(positive | small)");
    assert_eq!(result.justification(), "!OR\n  positive\n  small");
}

#[test]
fn disjunctions_report_their_witnesses() {
    let first = Spec::build(|flags: &[bool; 4]| flags[0]).create("first").unwrap();
    let second = Spec::build(|flags: &[bool; 4]| flags[1]).create("second").unwrap();
    let third = Spec::build(|flags: &[bool; 4]| flags[2]).create("third").unwrap();
    let fourth = Spec::build(|flags: &[bool; 4]| flags[3]).create("fourth").unwrap();
    let spec = (first | second) & (third | fourth);
    let result = spec.is_satisfied_by(&[true, false, true, false]).unwrap();
    assert_eq!(result.reason(), "first & third");
    assert_eq!(result.description().causal_operand_count, 2);
}

#[test]
fn and_also_never_evaluates_past_a_failure() {
    let calls = Arc::new(AtomicUsize::new(0));
    let left = counted("left", false, &calls);
    let right = counted("right", true, &calls);
    let result = left.and_also(&right).is_satisfied_by(&0).unwrap();
    assert!(!result.satisfied());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.underlying().len(), 1);
    assert_eq!(result.reason(), "¬left");

    let both = left.and(&right).is_satisfied_by(&0).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(both.underlying().len(), 2);
}

#[test]
fn or_else_stops_at_the_first_success() {
    let calls = Arc::new(AtomicUsize::new(0));
    let spec = counted("a", false, &calls)
        .or_else(&counted("b", true, &calls))
        .or_else(&counted("c", true, &calls));
    assert_eq!(spec.operands().len(), 3);
    assert_eq!(spec.statement(), "a || b || c");
    let result = spec.is_satisfied_by(&0).unwrap();
    assert!(result.satisfied());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(result.reason(), "b");
}

#[test]
fn n_ary_constructors_need_operands() {
    let all = Specification::all_of([is_even(), positive(), small()]).unwrap();
    assert_eq!(all.statement(), "is even & positive & small");
    let any = Specification::any_of(vec![is_even(), positive()]).unwrap();
    assert!(any.is_satisfied_by(&-4).unwrap().satisfied());

    let err = Specification::<i32>::all_of(Vec::new()).unwrap_err();
    assert_eq!(err.info().code, "missing-operand");
}

#[test]
fn notation_is_carried_into_results() {
    let notation = Notation {
        not_symbol: "~".to_string(),
        ..Notation::default()
    };
    let spec = (!(&positive() & &small())).with_notation(notation);
    assert_eq!(spec.statement(), "~(positive & small)");
    let result = spec.is_satisfied_by(&5).unwrap();
    assert_eq!(result.reason(), "~(positive & small)");
    assert_eq!(result.justification(), "~AND\n  positive\n  small");
}

#[test]
fn notation_reaches_nested_operands() {
    let notation = Notation {
        not_symbol: "~".to_string(),
        false_prefix: "NOT ".to_string(),
        ..Notation::default()
    };
    let spec = (&!is_even() & &positive()).with_notation(notation.clone());
    assert_eq!(spec.statement(), "~is even & positive");
    assert_eq!(spec.operands()[0].statement(), "~is even");
    let result = spec.is_satisfied_by(&-4).unwrap();
    assert!(!result.satisfied());
    assert_eq!(result.reason(), "is even & NOT positive");

    let grouped = (&!(&positive() | &small()) & &is_even()).with_notation(notation.clone());
    assert_eq!(grouped.statement(), "~(positive | small) & is even");

    let wrapper = Spec::from_spec(&positive()).create("sign").unwrap();
    let restyled = wrapper.with_notation(notation.clone());
    assert_eq!(restyled.is_satisfied_by(&-1).unwrap().reason(), "NOT positive");
    assert_eq!(wrapper.is_satisfied_by(&-1).unwrap().reason(), "¬positive");

    let all_positive = positive()
        .as_all_satisfied()
        .create("all positive")
        .unwrap()
        .with_notation(notation);
    let result = all_positive.is_satisfied_by(&[1, -2]).unwrap();
    assert_eq!(result.justification(), "NOT all positive\n  NOT positive");
}

#[test]
fn shared_results_keep_their_identity() {
    let shared = is_even().is_satisfied_by(&4).unwrap();
    let first_view = shared.clone();
    let second_view = shared.clone();
    let first = Spec::from_result_fn(move |_: &i32| first_view.clone())
        .create("first view")
        .unwrap();
    let second = Spec::from_result_fn(move |_: &i32| second_view.clone())
        .create("second view")
        .unwrap();
    let result = (first & second).is_satisfied_by(&0).unwrap();

    let left = &result.underlying()[0].underlying()[0];
    let right = &result.underlying()[1].underlying()[0];
    assert!(BooleanResult::ptr_eq(left, &shared));
    assert!(BooleanResult::ptr_eq(right, &shared));
    assert!(Arc::ptr_eq(left.explanation(), right.explanation()));
    assert_eq!(result.assertions(), vec!["is even"]);
    assert_eq!(result.explanation().all_values().len(), 1);
}

#[test]
fn specifications_evaluate_across_threads() {
    let spec = &is_even() & &positive();
    thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|offset| {
                let spec = &spec;
                scope.spawn(move || {
                    (0..50)
                        .map(|n| spec.is_satisfied_by(&(n * 4 + offset)).unwrap().satisfied())
                        .filter(|satisfied| *satisfied)
                        .count()
                })
            })
            .collect();
        let counts: Vec<usize> = handles.into_iter().map(|handle| handle.join().unwrap()).collect();
        assert_eq!(counts, vec![49, 0, 50, 0]);
    });
}

#[test]
fn descriptions_serialize() {
    let result = (is_even() & positive()).is_satisfied_by(&-3).unwrap();
    let json = serde_json::to_value(result.description()).unwrap();
    assert_eq!(json["reason"], "¬is even & ¬positive");
    assert_eq!(json["statement"], "is even & positive");
    assert_eq!(json["causal_operand_count"], 2);
}
