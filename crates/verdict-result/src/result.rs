use std::fmt;
use std::sync::{Arc, OnceLock};

use verdict_core::{
    ErrorInfo, Explanation, Metadata, MetadataNode, Notation, Operator, Tier, VerdictError,
};

use crate::causality::determine;
use crate::description::ResultDescription;
use crate::render::{self, statement::compose_statement};

/// Shape of the node that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// A predicate evaluated directly against the model.
    Atomic,
    /// A node declaring its own values over underlying results (wrappers, quantifiers).
    Declared,
    /// An operator applied to operand results.
    Operator(Operator),
}

/// Values a node declares for the branch it took.
#[derive(Debug, Clone)]
pub struct Declaration<T> {
    /// Statement of the specification that produced the result.
    pub statement: String,
    /// Metadata declared for the taken branch.
    pub values: Vec<T>,
    /// Assertions declared for the taken branch.
    pub assertions: Vec<String>,
    /// Notation used when rendering the result.
    pub notation: Arc<Notation>,
}

impl<T> Declaration<T> {
    /// Declares nothing; the node forwards the explanation of its causes.
    pub fn forwarding(statement: impl Into<String>, notation: Arc<Notation>) -> Self {
        Self {
            statement: statement.into(),
            values: Vec::new(),
            assertions: Vec::new(),
            notation,
        }
    }
}

impl<T: Metadata> Declaration<T> {
    /// Declares `values`, deriving assertions from them or from the statement.
    ///
    /// An empty `values` yields a forwarding declaration.
    pub fn new(
        statement: impl Into<String>,
        values: Vec<T>,
        notation: Arc<Notation>,
        satisfied: bool,
    ) -> Self {
        let statement = statement.into();
        let assertions = if values.is_empty() {
            Vec::new()
        } else {
            verdict_core::assertions_for(&values, || {
                notation.fallback_assertion(&statement, satisfied)
            })
        };
        Self {
            statement,
            values,
            assertions,
            notation,
        }
    }

    /// Declares the statement itself as the outcome (`statement` or `¬statement`).
    pub fn fallback(
        statement: impl Into<String>,
        notation: Arc<Notation>,
        satisfied: bool,
    ) -> Self {
        let statement = statement.into();
        let assertion = notation.fallback_assertion(&statement, satisfied);
        let values = T::from_statement(assertion.clone()).into_iter().collect();
        Self {
            statement,
            values,
            assertions: vec![assertion],
            notation,
        }
    }
}

struct ResultNode<T> {
    satisfied: bool,
    kind: ResultKind,
    statement: String,
    values: Vec<T>,
    assertions: Vec<String>,
    underlying: Vec<BooleanResult<T>>,
    causes: Vec<BooleanResult<T>>,
    notation: Arc<Notation>,
    explanation: OnceLock<Arc<Explanation>>,
    metadata: OnceLock<Arc<MetadataNode<T>>>,
    description: OnceLock<ResultDescription>,
}

/// Outcome of one evaluation together with its causal explanation.
///
/// Cloning is cheap and preserves identity: clones share the same node, so derived
/// views computed through one handle are visible through every other.
pub struct BooleanResult<T> {
    node: Arc<ResultNode<T>>,
}

impl<T> Clone for BooleanResult<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<T: Metadata> BooleanResult<T> {
    fn from_parts(
        satisfied: bool,
        kind: ResultKind,
        declaration: Declaration<T>,
        underlying: Vec<BooleanResult<T>>,
        causes: Vec<usize>,
    ) -> Self {
        let causes = causes
            .into_iter()
            .filter_map(|idx| underlying.get(idx).cloned())
            .collect();
        Self {
            node: Arc::new(ResultNode {
                satisfied,
                kind,
                statement: declaration.statement,
                values: declaration.values,
                assertions: declaration.assertions,
                underlying,
                causes,
                notation: declaration.notation,
                explanation: OnceLock::new(),
                metadata: OnceLock::new(),
                description: OnceLock::new(),
            }),
        }
    }

    /// Creates the result of a predicate evaluated directly against a model.
    pub fn atomic(satisfied: bool, declaration: Declaration<T>) -> Self {
        Self::from_parts(satisfied, ResultKind::Atomic, declaration, Vec::new(), Vec::new())
    }

    /// Creates a declaring result over `underlying`, with `causes` indexing into it.
    pub fn declared(
        satisfied: bool,
        declaration: Declaration<T>,
        underlying: Vec<BooleanResult<T>>,
        causes: Vec<usize>,
    ) -> Result<Self, VerdictError> {
        if let Some(idx) = causes.iter().find(|idx| **idx >= underlying.len()) {
            return Err(VerdictError::Construction(
                ErrorInfo::new("invalid-cause", "cause index outside the underlying results")
                    .with_context("index", idx.to_string())
                    .with_context("underlying", underlying.len().to_string()),
            ));
        }
        Ok(Self::from_parts(
            satisfied,
            ResultKind::Declared,
            declaration,
            underlying,
            causes,
        ))
    }

    /// Applies `op` to already evaluated operands under an explicit statement.
    ///
    /// Short-circuiting operators keep only the prefix up to the determining operand.
    pub fn from_operator(
        op: Operator,
        operands: Vec<BooleanResult<T>>,
        statement: impl Into<String>,
        notation: Arc<Notation>,
    ) -> Result<Self, VerdictError> {
        check_arity(op, operands.len())?;
        let outcomes: Vec<bool> = operands.iter().map(BooleanResult::satisfied).collect();
        let determination = determine(op, &outcomes);
        let mut operands = operands;
        operands.truncate(determination.evaluated);
        let declaration = Declaration::forwarding(statement, notation);
        Ok(Self::from_parts(
            determination.satisfied,
            ResultKind::Operator(op),
            declaration,
            operands,
            determination.causes,
        ))
    }

    /// Applies `op` to operands, composing the statement from theirs.
    pub fn compose(op: Operator, operands: Vec<BooleanResult<T>>) -> Result<Self, VerdictError> {
        check_arity(op, operands.len())?;
        let notation = operands
            .first()
            .map(|first| Arc::clone(&first.node.notation))
            .unwrap_or_default();
        let parts: Vec<(Option<Operator>, &str)> = operands
            .iter()
            .map(|operand| (operand.operator(), operand.statement()))
            .collect();
        let statement = compose_statement(op, &parts, &notation);
        Self::from_operator(op, operands, statement, notation)
    }

    fn combine(&self, op: Operator, other: &BooleanResult<T>) -> Self {
        let mut operands = Vec::new();
        for side in [self, other] {
            match side.kind() {
                ResultKind::Operator(kind)
                    if kind == op && op.is_associative() && !op.short_circuits() =>
                {
                    operands.extend(side.underlying().iter().cloned())
                }
                _ => operands.push(side.clone()),
            }
        }
        let notation = Arc::clone(&self.node.notation);
        let parts: Vec<(Option<Operator>, &str)> = operands
            .iter()
            .map(|operand| (operand.operator(), operand.statement()))
            .collect();
        let statement = compose_statement(op, &parts, &notation);
        let outcomes: Vec<bool> = operands.iter().map(BooleanResult::satisfied).collect();
        let determination = determine(op, &outcomes);
        operands.truncate(determination.evaluated);
        let declaration = Declaration::forwarding(statement, notation);
        Self::from_parts(
            determination.satisfied,
            ResultKind::Operator(op),
            declaration,
            operands,
            determination.causes,
        )
    }

    /// Conjunction over every result in order.
    pub fn all_of(results: Vec<BooleanResult<T>>) -> Result<Self, VerdictError> {
        Self::compose(Operator::And, results)
    }

    /// Disjunction over every result in order.
    pub fn any_of(results: Vec<BooleanResult<T>>) -> Result<Self, VerdictError> {
        Self::compose(Operator::Or, results)
    }

    /// Conjunction of two results; chained conjunctions flatten into one node.
    pub fn and(&self, other: &BooleanResult<T>) -> Self {
        self.combine(Operator::And, other)
    }

    /// Disjunction of two results; chained disjunctions flatten into one node.
    pub fn or(&self, other: &BooleanResult<T>) -> Self {
        self.combine(Operator::Or, other)
    }

    /// Exclusive disjunction of two results. Chained XOR nests.
    pub fn xor(&self, other: &BooleanResult<T>) -> Self {
        self.combine(Operator::Xor, other)
    }

    /// Conjunction that disregards `other` when `self` is unsatisfied.
    pub fn and_also(&self, other: &BooleanResult<T>) -> Self {
        self.combine(Operator::AndAlso, other)
    }

    /// Disjunction that disregards `other` when `self` is satisfied.
    pub fn or_else(&self, other: &BooleanResult<T>) -> Self {
        self.combine(Operator::OrElse, other)
    }

    /// Negation of the result.
    pub fn not(&self) -> Self {
        let notation = Arc::clone(&self.node.notation);
        let statement = compose_statement(
            Operator::Not,
            &[(self.operator(), self.statement())],
            &notation,
        );
        let declaration = Declaration::forwarding(statement, notation);
        Self::from_parts(
            !self.satisfied(),
            ResultKind::Operator(Operator::Not),
            declaration,
            vec![self.clone()],
            vec![0],
        )
    }

    /// Returns the metadata tier, computing it on first access.
    pub fn metadata_tier(&self) -> &Arc<MetadataNode<T>> {
        self.node.metadata.get_or_init(|| {
            let causal = self
                .causes()
                .iter()
                .map(|cause| Arc::clone(cause.metadata_tier()))
                .collect();
            let operands = self
                .underlying()
                .iter()
                .map(|operand| Arc::clone(operand.metadata_tier()))
                .collect();
            Arc::new(Tier::new(self.node.values.clone(), causal, operands))
        })
    }

    /// Metadata of the first declaring nodes along causal paths.
    pub fn values(&self) -> Vec<&T> {
        self.metadata_tier().values()
    }

    /// Returns the reason, statement, causal count and justification, computed once.
    pub fn description(&self) -> &ResultDescription {
        self.node.description.get_or_init(|| ResultDescription {
            reason: render::reason(self, &self.node.notation),
            statement: self.node.statement.clone(),
            causal_operand_count: self.node.causes.len(),
            justification: render::justification(self, &self.node.notation),
        })
    }

    /// Single-line causal summary.
    pub fn reason(&self) -> &str {
        &self.description().reason
    }

    /// Indented multi-line rendering of the causal explanation.
    pub fn justification(&self) -> &str {
        &self.description().justification
    }

    /// Renders the reason under a different notation; not cached.
    pub fn reason_with(&self, notation: &Notation) -> String {
        render::reason(self, notation)
    }

    /// Renders the justification under a different notation; not cached.
    pub fn justification_with(&self, notation: &Notation) -> String {
        render::justification(self, notation)
    }
}

impl<T> BooleanResult<T> {
    /// Whether the model satisfied the specification.
    pub fn satisfied(&self) -> bool {
        self.node.satisfied
    }

    /// Shape of the node that produced this result.
    pub fn kind(&self) -> ResultKind {
        self.node.kind
    }

    /// Operator applied at this node, if any.
    pub fn operator(&self) -> Option<Operator> {
        match self.node.kind {
            ResultKind::Operator(op) => Some(op),
            _ => None,
        }
    }

    /// Statement of the specification that produced the result.
    pub fn statement(&self) -> &str {
        &self.node.statement
    }

    /// Assertions declared at this node for the taken branch.
    pub fn declared_assertions(&self) -> &[String] {
        &self.node.assertions
    }

    /// Metadata declared at this node for the taken branch.
    pub fn declared_values(&self) -> &[T] {
        &self.node.values
    }

    /// Every evaluated operand result, in order.
    pub fn underlying(&self) -> &[BooleanResult<T>] {
        &self.node.underlying
    }

    /// Operand results selected as explaining the outcome.
    pub fn causes(&self) -> &[BooleanResult<T>] {
        &self.node.causes
    }

    /// Notation the result renders with by default.
    pub fn notation(&self) -> &Arc<Notation> {
        &self.node.notation
    }

    /// Identity of the underlying node; equal for clones of one result.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.node) as *const () as usize
    }

    /// Returns whether both handles refer to the same result node.
    pub fn ptr_eq(a: &BooleanResult<T>, b: &BooleanResult<T>) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    /// Returns the assertion tier, computing it on first access.
    pub fn explanation(&self) -> &Arc<Explanation> {
        self.node.explanation.get_or_init(|| {
            let causal = self
                .causes()
                .iter()
                .map(|cause| Arc::clone(cause.explanation()))
                .collect();
            let operands = self
                .underlying()
                .iter()
                .map(|operand| Arc::clone(operand.explanation()))
                .collect();
            Arc::new(Tier::new(self.node.assertions.clone(), causal, operands))
        })
    }

    /// Assertions of the first declaring nodes along causal paths.
    pub fn assertions(&self) -> Vec<String> {
        self.explanation().assertions()
    }
}

impl<T: Metadata> fmt::Display for BooleanResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

impl<T> fmt::Debug for BooleanResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BooleanResult")
            .field("satisfied", &self.node.satisfied)
            .field("kind", &self.node.kind)
            .field("statement", &self.node.statement)
            .field("assertions", &self.node.assertions)
            .field("causes", &self.node.causes.len())
            .finish_non_exhaustive()
    }
}

fn check_arity(op: Operator, count: usize) -> Result<(), VerdictError> {
    let valid = match op {
        Operator::Not => count == 1,
        Operator::Xor => count == 2,
        _ => count >= 1,
    };
    if valid {
        return Ok(());
    }
    Err(VerdictError::Construction(
        ErrorInfo::new("invalid-arity", "operator applied to the wrong number of operands")
            .with_context("operator", op.keyword())
            .with_context("operands", count.to_string()),
    ))
}
