//! Reason and justification rendering for result trees.

pub mod statement;
mod view;

use verdict_core::{Notation, Operator};

use crate::result::BooleanResult;
use view::View;

/// Renders the single-line causal summary of `result`.
pub fn reason<T>(result: &BooleanResult<T>, notation: &Notation) -> String {
    view::build(result)
        .map(|view| reason_of(&view, notation))
        .unwrap_or_default()
}

/// Renders the indented causal explanation of `result`, one line per assertion or block.
pub fn justification<T>(result: &BooleanResult<T>, notation: &Notation) -> String {
    let mut lines = Vec::new();
    if let Some(view) = view::build(result) {
        write_view(&view, 0, notation, &mut lines);
    }
    lines.join("\n")
}

fn reason_of(view: &View<'_>, notation: &Notation) -> String {
    match view {
        View::Lines { assertions, .. } => assertions.join(&notation.assertion_separator),
        View::Group(items) => items
            .iter()
            .map(|item| nested_reason(item, None, notation))
            .collect::<Vec<_>>()
            .join(&notation.assertion_separator),
        View::Block { negated, op, items } => {
            let body = items
                .iter()
                .map(|item| nested_reason(item, Some(*op), notation))
                .collect::<Vec<_>>()
                .join(&format!(" {} ", op.reason_symbol()));
            if *negated {
                format!("{}({body})", notation.not_symbol)
            } else {
                body
            }
        }
    }
}

fn nested_reason(view: &View<'_>, parent: Option<Operator>, notation: &Notation) -> String {
    let text = reason_of(view, notation);
    let needs_brackets = match view {
        View::Lines { assertions, .. } => assertions.len() > 1,
        View::Group(items) => items.len() > 1,
        View::Block {
            negated: false, op, ..
        } => parent.map_or(true, |parent| parent.reason_symbol() != op.reason_symbol()),
        View::Block { negated: true, .. } => false,
    };
    if needs_brackets {
        format!("({text})")
    } else {
        text
    }
}

fn write_view(view: &View<'_>, depth: usize, notation: &Notation, lines: &mut Vec<String>) {
    let pad = notation.pad(depth);
    match view {
        View::Lines {
            assertions,
            children,
        } => {
            lines.extend(assertions.iter().map(|assertion| format!("{pad}{assertion}")));
            for child in children {
                write_view(child, depth + 1, notation, lines);
            }
        }
        View::Group(items) => {
            for item in items {
                write_view(item, depth, notation, lines);
            }
        }
        View::Block { negated, op, items } => {
            let not = if *negated {
                notation.not_symbol.as_str()
            } else {
                ""
            };
            lines.push(format!("{pad}{not}{}", op.keyword()));
            for item in items {
                write_view(item, depth + 1, notation, lines);
            }
        }
    }
}
