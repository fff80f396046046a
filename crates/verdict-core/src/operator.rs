//! The closed set of composition operators and their rendering properties.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// Closed set of composition operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    /// Conjunction evaluating every operand.
    And,
    /// Disjunction evaluating every operand.
    Or,
    /// Binary exclusive disjunction.
    Xor,
    /// Unary negation.
    Not,
    /// Conjunction that stops at the first unsatisfied operand.
    AndAlso,
    /// Disjunction that stops at the first satisfied operand.
    OrElse,
}

/// Operators that render into the same flat justification block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorFamily {
    /// AND and AND ALSO.
    Conjunction,
    /// OR and OR ELSE.
    Disjunction,
    /// XOR; never merged, not even with itself.
    Exclusive,
    /// NOT.
    Negation,
}

impl Operator {
    /// Returns every operator in declaration order.
    pub const ALL: [Operator; 6] = [
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Not,
        Operator::AndAlso,
        Operator::OrElse,
    ];

    /// Returns the family used for justification collapsing.
    pub fn family(&self) -> OperatorFamily {
        match self {
            Operator::And | Operator::AndAlso => OperatorFamily::Conjunction,
            Operator::Or | Operator::OrElse => OperatorFamily::Disjunction,
            Operator::Xor => OperatorFamily::Exclusive,
            Operator::Not => OperatorFamily::Negation,
        }
    }

    /// Returns whether a child block of operator `child` merges into a block of `self`.
    pub fn collapses_with(&self, child: Operator) -> bool {
        match self.family() {
            OperatorFamily::Conjunction | OperatorFamily::Disjunction => {
                self.family() == child.family()
            }
            OperatorFamily::Exclusive | OperatorFamily::Negation => false,
        }
    }

    /// Returns whether chaining the operator flattens into a single n-ary node.
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::AndAlso | Operator::OrElse
        )
    }

    /// Returns whether operands after a determining one are left unevaluated.
    pub fn short_circuits(&self) -> bool {
        matches!(self, Operator::AndAlso | Operator::OrElse)
    }

    /// Returns the infix symbol used in statements. NOT has no infix form.
    pub fn statement_symbol(&self) -> &'static str {
        match self {
            Operator::And => "&",
            Operator::Or => "|",
            Operator::Xor => "^",
            Operator::AndAlso => "&&",
            Operator::OrElse => "||",
            Operator::Not => "",
        }
    }

    /// Returns the infix symbol used when joining causal reasons.
    pub fn reason_symbol(&self) -> &'static str {
        match self.family() {
            OperatorFamily::Conjunction => "&",
            OperatorFamily::Disjunction => "|",
            OperatorFamily::Exclusive => "^",
            OperatorFamily::Negation => "",
        }
    }

    /// Returns the keyword heading a justification block.
    pub fn keyword(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::AndAlso => "AND ALSO",
            Operator::OrElse => "OR ELSE",
            Operator::Not => "NOT",
        }
    }

    /// Returns whether a child statement of operator `child` needs brackets under `self`.
    pub fn brackets_child(&self, child: Option<Operator>) -> bool {
        match (self, child) {
            (_, None) | (_, Some(Operator::Not)) => false,
            (Operator::Not, Some(_)) => true,
            (parent, Some(child)) => *parent != child,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
