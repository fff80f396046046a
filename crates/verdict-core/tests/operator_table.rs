use verdict_core::{Operator, OperatorFamily};

#[test]
fn symbols_and_keywords() {
    let table: Vec<_> = Operator::ALL
        .iter()
        .map(|op| (op.statement_symbol(), op.reason_symbol(), op.keyword()))
        .collect();
    assert_eq!(
        table,
        vec![
            ("&", "&", "AND"),
            ("|", "|", "OR"),
            ("^", "^", "XOR"),
            ("", "", "NOT"),
            ("&&", "&", "AND ALSO"),
            ("||", "|", "OR ELSE"),
        ]
    );
    assert_eq!(Operator::OrElse.to_string(), "OR ELSE");
}

#[test]
fn collapsing_follows_families() {
    assert!(Operator::And.collapses_with(Operator::AndAlso));
    assert!(Operator::AndAlso.collapses_with(Operator::And));
    assert!(Operator::Or.collapses_with(Operator::OrElse));
    assert!(!Operator::And.collapses_with(Operator::Or));
    assert!(!Operator::Xor.collapses_with(Operator::Xor));
    assert_eq!(Operator::OrElse.family(), OperatorFamily::Disjunction);
}

#[test]
fn xor_and_not_do_not_flatten() {
    assert!(!Operator::Xor.is_associative());
    assert!(!Operator::Not.is_associative());
    assert!(Operator::AndAlso.short_circuits());
    assert!(!Operator::And.short_circuits());
}

#[test]
fn bracketing_depends_on_the_pair() {
    assert!(!Operator::And.brackets_child(None));
    assert!(!Operator::And.brackets_child(Some(Operator::And)));
    assert!(Operator::And.brackets_child(Some(Operator::Or)));
    assert!(Operator::And.brackets_child(Some(Operator::AndAlso)));
    assert!(!Operator::Or.brackets_child(Some(Operator::Not)));
    assert!(Operator::Not.brackets_child(Some(Operator::Xor)));
    assert!(!Operator::Not.brackets_child(None));
}

#[test]
fn operators_serialize_in_kebab_case() {
    let json = serde_json::to_string(&Operator::AndAlso).unwrap();
    assert_eq!(json, "\"and-also\"");
    let op: Operator = serde_json::from_str("\"or-else\"").unwrap();
    assert_eq!(op, Operator::OrElse);
}
