use std::sync::Arc;

use verdict_core::{Metadata, Notation, Operator};
use verdict_result::{compose_expression, compose_statement, BooleanResult, Declaration};

fn atom(name: &str, satisfied: bool) -> BooleanResult<String> {
    let notation = Arc::new(Notation::default());
    BooleanResult::atomic(satisfied, Declaration::fallback(name, notation, satisfied))
}

#[derive(Debug, Clone, PartialEq)]
struct Code(u32);

impl Metadata for Code {}

#[test]
fn flat_conjunction_renders_one_block() {
    let result = atom("first", true) & atom("second", true) & atom("third", true);
    assert_eq!(result.reason(), "first & second & third");
    assert_eq!(result.justification(), "AND\n  first\n  second\n  third");
    assert_eq!(result.description().causal_operand_count, 3);
}

#[test]
fn xor_chains_render_nested_blocks() {
    let result = atom("first", true) ^ atom("second", false) ^ atom("third", true) ^ atom("fourth", false);
    assert_eq!(result.statement(), "first ^ second ^ third ^ fourth");
    assert_eq!(
        result.justification(),
        "XOR\n  XOR\n    XOR\n      first\n      ¬second\n    third\n  ¬fourth"
    );
    assert_eq!(result.reason(), "first ^ ¬second ^ third ^ ¬fourth");
}

#[test]
fn disjunction_witnesses_are_inlined() {
    let left = atom("first", true) | atom("second", false);
    let right = atom("third", true) | atom("fourth", false);
    let result = left & right;
    assert_eq!(result.statement(), "(first | second) & (third | fourth)");
    assert_eq!(result.reason(), "first & third");
    assert_eq!(result.justification(), "AND\n  first\n  third");
    assert_eq!(result.assertions(), vec!["first", "third"]);
    assert_eq!(
        result.explanation().all_assertions(),
        vec!["first", "¬second", "third", "¬fourth"]
    );
}

#[test]
fn mixed_families_are_bracketed() {
    let result = (atom("a", true) | atom("b", true)) & atom("c", true);
    assert_eq!(result.reason(), "(a | b) & c");
    assert_eq!(result.justification(), "AND\n  OR\n    a\n    b\n  c");
}

#[test]
fn same_family_blocks_collapse() {
    let inner = atom("a", true) & atom("b", true);
    let result = inner.and_also(&atom("c", true));
    assert_eq!(result.statement(), "(a & b) && c");
    assert_eq!(result.justification(), "AND ALSO\n  a\n  b\n  c");
    assert_eq!(result.reason(), "a & b & c");
}

#[test]
fn single_causes_are_elided() {
    let result = atom("a", true) & atom("b", false) & atom("c", true);
    assert_eq!(result.reason(), "¬b");
    assert_eq!(result.justification(), "¬b");
}

#[test]
fn negation_collapses_to_parity() {
    let block = atom("a", true) & atom("b", true);
    let once = !&block;
    let twice = !&once;
    let thrice = !&twice;
    assert_eq!(once.reason(), "!(a & b)");
    assert_eq!(once.justification(), "!AND\n  a\n  b");
    assert_eq!(twice.justification(), "AND\n  a\n  b");
    assert_eq!(thrice.justification(), "!AND\n  a\n  b");
    assert_eq!(thrice.statement(), "!!!(a & b)");
}

#[test]
fn negated_leaves_keep_their_assertion() {
    let even = atom("even", false);
    let negated = !&even;
    assert!(negated.satisfied());
    assert_eq!(negated.reason(), "¬even");
    assert_eq!(negated.statement(), "!even");
}

#[test]
fn repeated_operand_is_printed_once() {
    let a = atom("a", true);
    let result = a.and(&a);
    assert_eq!(result.causes().len(), 2);
    assert_eq!(result.reason(), "a");
    assert_eq!(result.assertions(), vec!["a"]);
}

#[test]
fn declared_nodes_print_their_causes_beneath() {
    let notation = Arc::new(Notation::default());
    let items = vec![atom("is even", true), atom("is even", false)];
    let declaration = Declaration::new(
        "all even",
        vec!["not every number is even".to_string()],
        notation,
        false,
    );
    let result = BooleanResult::declared(false, declaration, items, vec![1]).unwrap();
    assert_eq!(result.reason(), "not every number is even");
    assert_eq!(
        result.justification(),
        "not every number is even\n  ¬is even"
    );
    assert_eq!(result.explanation().sub_assertions(), vec!["¬is even"]);
}

#[test]
fn forwarding_declarations_show_the_inner_explanation() {
    let notation = Arc::new(Notation::default());
    let inner = atom("a", false) | atom("b", false);
    let declaration = Declaration::forwarding("renamed", notation);
    let result = BooleanResult::declared(false, declaration, vec![inner], vec![0]).unwrap();
    assert_eq!(result.statement(), "renamed");
    assert_eq!(result.reason(), "¬a | ¬b");
    assert_eq!(result.justification(), "OR\n  ¬a\n  ¬b");
}

#[test]
fn typed_metadata_falls_back_to_the_statement() {
    let notation = Arc::new(Notation::default());
    let declaration = Declaration::new("limit ok", vec![Code(7)], notation, false);
    let result = BooleanResult::atomic(false, declaration);
    assert_eq!(result.values(), vec![&Code(7)]);
    assert_eq!(result.reason(), "¬limit ok");
    assert_eq!(result.metadata_tier().own_values(), &[Code(7)]);
}

#[test]
fn multiple_assertions_share_a_line_in_the_reason() {
    let notation = Arc::new(Notation::default());
    let declaration = Declaration::new(
        "pricing",
        vec!["discount applied".to_string(), "free shipping".to_string()],
        notation,
        true,
    );
    let pricing = BooleanResult::atomic(true, declaration);
    assert_eq!(pricing.reason(), "discount applied, free shipping");
    assert_eq!(pricing.justification(), "discount applied\nfree shipping");

    let result = pricing.and(&atom("in stock", true));
    assert_eq!(result.reason(), "(discount applied, free shipping) & in stock");
}

#[test]
fn explicit_notation_overrides_defaults() {
    let block = !(atom("a", true) & atom("b", true));
    let notation = Notation {
        indent: 4,
        not_symbol: "~".to_string(),
        ..Notation::default()
    };
    assert_eq!(block.reason_with(&notation), "~(a & b)");
    assert_eq!(block.justification_with(&notation), "~AND\n    a\n    b");
    assert_eq!(block.reason(), "!(a & b)");
}

#[test]
fn display_prints_the_reason() {
    let result = atom("a", true) | atom("b", false);
    assert_eq!(result.to_string(), "a");
}

#[test]
fn statement_helpers_bracket_by_operator() {
    let notation = Notation::default();
    let statement = compose_statement(
        Operator::Or,
        &[(Some(Operator::And), "a & b"), (None, "c"), (Some(Operator::Not), "!d")],
        &notation,
    );
    assert_eq!(statement, "(a & b) | c | !d");
    let negated = compose_statement(Operator::Not, &[(Some(Operator::Or), "a | b")], &notation);
    assert_eq!(negated, "!(a | b)");
    assert_eq!(
        compose_expression("a & (b | c)", ["a", "b | c"], &notation),
        "a & (b | c)\n  a\n  b | c"
    );
}
