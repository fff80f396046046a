//! Normalized causal view of a result tree.
//!
//! Both the reason and the justification are printed from this view, so collapsing,
//! single-child elision and negation parity are decided in exactly one place.

use std::collections::HashSet;

use verdict_core::Operator;

use crate::result::{BooleanResult, ResultKind};

#[derive(Debug)]
pub(crate) enum View<'a> {
    /// A node declaring assertions, with the views of its causes beneath it.
    Lines {
        assertions: &'a [String],
        children: Vec<View<'a>>,
    },
    /// An operator block with at least two items.
    Block {
        negated: bool,
        op: Operator,
        items: Vec<View<'a>>,
    },
    /// Several causes forwarded by a node that declares nothing itself.
    Group(Vec<View<'a>>),
}

pub(crate) fn build<T>(result: &BooleanResult<T>) -> Option<View<'_>> {
    view(result, false)
}

fn view<T>(result: &BooleanResult<T>, negated: bool) -> Option<View<'_>> {
    match result.kind() {
        ResultKind::Atomic => {
            let assertions = result.declared_assertions();
            (!assertions.is_empty()).then(|| View::Lines {
                assertions,
                children: Vec::new(),
            })
        }
        ResultKind::Declared => {
            let assertions = result.declared_assertions();
            if assertions.is_empty() {
                let mut items = children(result.causes());
                return match items.len() {
                    0 => None,
                    1 => items.pop().map(|item| negate(item, negated)),
                    _ => Some(View::Group(items)),
                };
            }
            Some(View::Lines {
                assertions,
                children: children(result.causes()),
            })
        }
        ResultKind::Operator(Operator::Not) => result
            .causes()
            .first()
            .and_then(|operand| view(operand, !negated)),
        ResultKind::Operator(op) => {
            let mut items = Vec::new();
            let mut seen = HashSet::new();
            for cause in result.causes() {
                if !seen.insert(cause.id()) {
                    continue;
                }
                match view(cause, false) {
                    Some(View::Block {
                        negated: false,
                        op: inner,
                        items: nested,
                    }) if op.collapses_with(inner) => items.extend(nested),
                    Some(item) => items.push(item),
                    None => {}
                }
            }
            match items.len() {
                0 => None,
                1 => items.pop().map(|item| negate(item, negated)),
                _ => Some(View::Block { negated, op, items }),
            }
        }
    }
}

fn children<T>(causes: &[BooleanResult<T>]) -> Vec<View<'_>> {
    let mut seen = HashSet::new();
    causes
        .iter()
        .filter(|cause| seen.insert(cause.id()))
        .filter_map(|cause| view(cause, false))
        .collect()
}

/// Declared assertions already state the observed outcome, so negation only marks blocks.
fn negate(item: View<'_>, negated: bool) -> View<'_> {
    match item {
        View::Block {
            negated: inner,
            op,
            items,
        } => View::Block {
            negated: inner != negated,
            op,
            items,
        },
        other => other,
    }
}
