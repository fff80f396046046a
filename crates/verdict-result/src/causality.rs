use verdict_core::Operator;

/// Outcome of applying an operator's determinate-operand rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Determination {
    /// Whether the composite is satisfied.
    pub satisfied: bool,
    /// Number of leading operands that were (or would have been) evaluated.
    pub evaluated: usize,
    /// Indices of the operands that causally explain the outcome.
    pub causes: Vec<usize>,
}

/// Applies the truth table and causality rule of `op` to operand outcomes in order.
///
/// Short-circuiting operators only consider the prefix up to and including the first
/// determining operand; `evaluated` reports the length of that prefix.
pub fn determine(op: Operator, outcomes: &[bool]) -> Determination {
    let evaluated = match op {
        Operator::AndAlso => first_index(outcomes, false).map_or(outcomes.len(), |idx| idx + 1),
        Operator::OrElse => first_index(outcomes, true).map_or(outcomes.len(), |idx| idx + 1),
        _ => outcomes.len(),
    };
    let prefix = &outcomes[..evaluated];
    let all = || (0..prefix.len()).collect::<Vec<_>>();
    let matching = |wanted: bool| {
        prefix
            .iter()
            .enumerate()
            .filter(|(_, outcome)| **outcome == wanted)
            .map(|(idx, _)| idx)
            .collect::<Vec<_>>()
    };

    let (satisfied, causes) = match op {
        Operator::And | Operator::AndAlso => {
            let satisfied = prefix.iter().all(|outcome| *outcome);
            let causes = if satisfied { all() } else { matching(false) };
            (satisfied, causes)
        }
        Operator::Or | Operator::OrElse => {
            let satisfied = prefix.iter().any(|outcome| *outcome);
            let causes = if satisfied { matching(true) } else { all() };
            (satisfied, causes)
        }
        Operator::Xor => {
            let satisfied = prefix.iter().filter(|outcome| **outcome).count() % 2 == 1;
            (satisfied, all())
        }
        Operator::Not => {
            let satisfied = !prefix.first().copied().unwrap_or(false);
            (satisfied, all())
        }
    };

    Determination {
        satisfied,
        evaluated,
        causes,
    }
}

fn first_index(outcomes: &[bool], wanted: bool) -> Option<usize> {
    outcomes.iter().position(|outcome| *outcome == wanted)
}
