//! Statement and expression composition for specifications and results.

use verdict_core::{Notation, Operator};

/// Composes the statement of `op` applied to operands given as `(operator, statement)`.
///
/// Operands whose own operator would read ambiguously under `op` are bracketed;
/// operands built from the same operator are not.
pub fn compose_statement(
    op: Operator,
    operands: &[(Option<Operator>, &str)],
    notation: &Notation,
) -> String {
    let bracketed: Vec<String> = operands
        .iter()
        .map(|(child, statement)| bracket(op, *child, statement))
        .collect();
    match op {
        Operator::Not => format!(
            "{}{}",
            notation.not_symbol,
            bracketed.first().map(String::as_str).unwrap_or_default()
        ),
        _ => bracketed.join(&format!(" {} ", op.statement_symbol())),
    }
}

fn bracket(parent: Operator, child: Option<Operator>, statement: &str) -> String {
    if parent.brackets_child(child) {
        format!("({statement})")
    } else {
        statement.to_string()
    }
}

/// Renders an expression: the statement followed by each operand statement one level deeper.
pub fn compose_expression<'a>(
    statement: &str,
    operands: impl IntoIterator<Item = &'a str>,
    notation: &Notation,
) -> String {
    let pad = notation.pad(1);
    let mut lines = vec![statement.to_string()];
    lines.extend(operands.into_iter().map(|operand| format!("{pad}{operand}")));
    lines.join("\n")
}
