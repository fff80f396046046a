use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};
use verdict_core::{BoxError, FactoryRole, Metadata, Notation, Operator, VerdictError};
use verdict_result::{compose_expression, compose_statement, BooleanResult, Declaration};

use crate::factory::{Factory, ModelFn};

/// What decides satisfaction for an atomic specification.
pub(crate) enum Predicate<M: ?Sized, T> {
    /// A boolean predicate over the model.
    Bool(ModelFn<M, bool>),
    /// An existing specification being renamed or re-explained.
    Spec(Specification<M, T>),
    /// A function producing a full result.
    Result(ModelFn<M, BooleanResult<T>>),
}

impl<M: ?Sized, T> Clone for Predicate<M, T> {
    fn clone(&self) -> Self {
        match self {
            Predicate::Bool(predicate) => Predicate::Bool(Arc::clone(predicate)),
            Predicate::Spec(spec) => Predicate::Spec(spec.clone()),
            Predicate::Result(predicate) => Predicate::Result(Arc::clone(predicate)),
        }
    }
}

/// Type-erased collection-level evaluation, implemented by quantifier specifications.
pub(crate) trait Quantified<M: ?Sized, T>: Send + Sync {
    fn evaluate(
        &self,
        models: &M,
        statement: &str,
        notation: &Arc<Notation>,
    ) -> Result<BooleanResult<T>, VerdictError>;

    fn item_statement(&self) -> &str;

    fn renotate(&self, notation: &Arc<Notation>) -> Arc<dyn Quantified<M, T>>;
}

pub(crate) struct Atomic<M: ?Sized, T> {
    pub(crate) predicate: Predicate<M, T>,
    pub(crate) factories: Option<(Factory<M, T>, Factory<M, T>)>,
}

pub(crate) enum SpecKind<M: ?Sized, T> {
    Atomic(Atomic<M, T>),
    Operator {
        op: Operator,
        operands: Vec<Specification<M, T>>,
    },
    Quantified(Arc<dyn Quantified<M, T>>),
}

struct SpecNode<M: ?Sized, T> {
    statement: String,
    notation: Arc<Notation>,
    kind: SpecKind<M, T>,
}

/// Immutable, composable predicate over `M` whose evaluations explain themselves.
///
/// Clones share the same node. A specification may be evaluated concurrently from
/// several threads as long as the supplied callbacks are free of side effects.
pub struct Specification<M: ?Sized, T = String> {
    node: Arc<SpecNode<M, T>>,
}

impl<M: ?Sized, T> Clone for Specification<M, T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

impl<M: ?Sized, T> Specification<M, T> {
    pub(crate) fn from_kind(
        statement: String,
        notation: Arc<Notation>,
        kind: SpecKind<M, T>,
    ) -> Self {
        Self {
            node: Arc::new(SpecNode {
                statement,
                notation,
                kind,
            }),
        }
    }

    /// Single-line summary of the proposition.
    pub fn statement(&self) -> &str {
        &self.node.statement
    }

    /// Operator applied at this node, if the specification is a composite.
    pub fn operator(&self) -> Option<Operator> {
        match &self.node.kind {
            SpecKind::Operator { op, .. } => Some(*op),
            _ => None,
        }
    }

    /// Immediate operands of a composite; empty otherwise.
    pub fn operands(&self) -> &[Specification<M, T>] {
        match &self.node.kind {
            SpecKind::Operator { operands, .. } => operands,
            _ => &[],
        }
    }

    /// Notation used by this specification and the results it produces.
    pub fn notation(&self) -> &Arc<Notation> {
        &self.node.notation
    }

    /// The statement followed by each immediate operand statement one level deeper.
    pub fn expression(&self) -> String {
        let operands: Vec<&str> = match &self.node.kind {
            SpecKind::Operator { operands, .. } => {
                operands.iter().map(Specification::statement).collect()
            }
            SpecKind::Atomic(Atomic {
                predicate: Predicate::Spec(inner),
                ..
            }) => vec![inner.statement()],
            SpecKind::Atomic(_) => Vec::new(),
            SpecKind::Quantified(quantified) => vec![quantified.item_statement()],
        };
        compose_expression(&self.node.statement, operands, &self.node.notation)
    }

    /// Returns whether both handles refer to the same specification node.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }
}

impl<M: ?Sized + 'static, T: Metadata> Specification<M, T> {
    /// Evaluates the specification against `model`.
    ///
    /// Short-circuit operators never invoke operands past the determining one. A failing
    /// callback surfaces as [`VerdictError::Evaluation`], wrapped once at its boundary.
    pub fn is_satisfied_by(&self, model: &M) -> Result<BooleanResult<T>, VerdictError> {
        let statement = &self.node.statement;
        let notation = &self.node.notation;
        match &self.node.kind {
            SpecKind::Atomic(atomic) => evaluate_atomic(atomic, model, statement, notation),
            SpecKind::Operator { op, operands } => {
                evaluate_operator(*op, operands, model, statement, notation)
            }
            SpecKind::Quantified(quantified) => quantified.evaluate(model, statement, notation),
        }
    }

    /// Returns a copy rendering with `notation` at every depth.
    ///
    /// Operands, wrapped specifications and quantified items are restyled too, and
    /// composite statements are recomposed from the restyled operands.
    pub fn with_notation(&self, notation: Notation) -> Self {
        self.renotate(&Arc::new(notation))
    }

    pub(crate) fn renotate(&self, notation: &Arc<Notation>) -> Self {
        match &self.node.kind {
            SpecKind::Operator { op, operands } => {
                let operands = operands
                    .iter()
                    .map(|operand| operand.renotate(notation))
                    .collect();
                Self::from_operands(*op, operands, Arc::clone(notation))
            }
            SpecKind::Atomic(atomic) => {
                let predicate = match &atomic.predicate {
                    Predicate::Spec(inner) => Predicate::Spec(inner.renotate(notation)),
                    other => other.clone(),
                };
                let kind = SpecKind::Atomic(Atomic {
                    predicate,
                    factories: atomic.factories.clone(),
                });
                Self::from_kind(self.node.statement.clone(), Arc::clone(notation), kind)
            }
            SpecKind::Quantified(quantified) => Self::from_kind(
                self.node.statement.clone(),
                Arc::clone(notation),
                SpecKind::Quantified(quantified.renotate(notation)),
            ),
        }
    }

    /// Conjunction; chained conjunctions flatten into one node.
    pub fn and(&self, other: &Self) -> Self {
        self.combine(Operator::And, other)
    }

    /// Disjunction; chained disjunctions flatten into one node.
    pub fn or(&self, other: &Self) -> Self {
        self.combine(Operator::Or, other)
    }

    /// Exclusive disjunction of exactly two operands. Chained XOR nests.
    pub fn xor(&self, other: &Self) -> Self {
        self.combine(Operator::Xor, other)
    }

    /// Conjunction evaluated left to right, stopping at the first unsatisfied operand.
    pub fn and_also(&self, other: &Self) -> Self {
        self.combine(Operator::AndAlso, other)
    }

    /// Disjunction evaluated left to right, stopping at the first satisfied operand.
    pub fn or_else(&self, other: &Self) -> Self {
        self.combine(Operator::OrElse, other)
    }

    /// Negation.
    pub fn not(&self) -> Self {
        Self::from_operands(Operator::Not, vec![self.clone()], Arc::clone(&self.node.notation))
    }

    /// Conjunction of every specification, in order.
    pub fn all_of(specs: impl IntoIterator<Item = Self>) -> Result<Self, VerdictError> {
        Self::n_ary(Operator::And, specs)
    }

    /// Disjunction of every specification, in order.
    pub fn any_of(specs: impl IntoIterator<Item = Self>) -> Result<Self, VerdictError> {
        Self::n_ary(Operator::Or, specs)
    }

    fn n_ary(op: Operator, specs: impl IntoIterator<Item = Self>) -> Result<Self, VerdictError> {
        let operands: Vec<Self> = specs.into_iter().collect();
        let Some(first) = operands.first() else {
            return Err(VerdictError::construction(
                "missing-operand",
                format!("{} requires at least one operand", op.keyword()),
            ));
        };
        let notation = Arc::clone(&first.node.notation);
        Ok(Self::from_operands(op, operands, notation))
    }

    fn combine(&self, op: Operator, other: &Self) -> Self {
        let mut operands = Vec::new();
        for side in [self, other] {
            match side.operator() {
                Some(kind) if kind == op && op.is_associative() => {
                    operands.extend(side.operands().iter().cloned())
                }
                _ => operands.push(side.clone()),
            }
        }
        Self::from_operands(op, operands, Arc::clone(&self.node.notation))
    }

    fn from_operands(op: Operator, operands: Vec<Self>, notation: Arc<Notation>) -> Self {
        let statement = compose(op, &operands, &notation);
        Self::from_kind(statement, notation, SpecKind::Operator { op, operands })
    }
}

fn compose<M: ?Sized, T>(op: Operator, operands: &[Specification<M, T>], notation: &Notation) -> String {
    let parts: Vec<(Option<Operator>, &str)> = operands
        .iter()
        .map(|operand| (operand.operator(), operand.statement()))
        .collect();
    compose_statement(op, &parts, notation)
}

fn wrap(statement: &str, role: FactoryRole, err: BoxError) -> VerdictError {
    debug!(statement, role = role.as_str(), error = %err, "callback failed");
    VerdictError::evaluation(statement, role, err)
}

fn evaluate_atomic<M: ?Sized + 'static, T: Metadata>(
    atomic: &Atomic<M, T>,
    model: &M,
    statement: &str,
    notation: &Arc<Notation>,
) -> Result<BooleanResult<T>, VerdictError> {
    let (satisfied, underlying) = match &atomic.predicate {
        Predicate::Bool(predicate) => {
            let satisfied =
                predicate(model).map_err(|err| wrap(statement, FactoryRole::Predicate, err))?;
            (satisfied, None)
        }
        Predicate::Spec(inner) => {
            let result = inner.is_satisfied_by(model)?;
            (result.satisfied(), Some(result))
        }
        Predicate::Result(predicate) => {
            let result =
                predicate(model).map_err(|err| wrap(statement, FactoryRole::Predicate, err))?;
            (result.satisfied(), Some(result))
        }
    };
    trace!(statement, satisfied, "evaluated predicate");

    let declaration = match &atomic.factories {
        Some((when_true, when_false)) => {
            let factory = if satisfied { when_true } else { when_false };
            let role = FactoryRole::for_outcome(satisfied);
            let values = factory
                .resolve(model, underlying.as_ref())
                .map_err(|err| wrap(statement, role, err))?;
            if values.is_empty() && underlying.is_none() {
                Declaration::fallback(statement, Arc::clone(notation), satisfied)
            } else {
                Declaration::new(statement, values, Arc::clone(notation), satisfied)
            }
        }
        None if underlying.is_none() => {
            Declaration::fallback(statement, Arc::clone(notation), satisfied)
        }
        None => Declaration::forwarding(statement, Arc::clone(notation)),
    };

    match underlying {
        None => Ok(BooleanResult::atomic(satisfied, declaration)),
        Some(inner) => BooleanResult::declared(satisfied, declaration, vec![inner], vec![0]),
    }
}

fn evaluate_operator<M: ?Sized + 'static, T: Metadata>(
    op: Operator,
    operands: &[Specification<M, T>],
    model: &M,
    statement: &str,
    notation: &Arc<Notation>,
) -> Result<BooleanResult<T>, VerdictError> {
    let mut results = Vec::with_capacity(operands.len());
    for operand in operands {
        let result = operand.is_satisfied_by(model)?;
        let stop = match op {
            Operator::AndAlso => !result.satisfied(),
            Operator::OrElse => result.satisfied(),
            _ => false,
        };
        results.push(result);
        if stop {
            if results.len() < operands.len() {
                debug!(
                    statement,
                    evaluated = results.len(),
                    skipped = operands.len() - results.len(),
                    "short-circuited"
                );
            }
            break;
        }
    }
    let result = BooleanResult::from_operator(op, results, statement, Arc::clone(notation))?;
    debug!(
        operator = %op,
        operands = operands.len(),
        causes = result.causes().len(),
        satisfied = result.satisfied(),
        "evaluated composite"
    );
    Ok(result)
}

impl<M: ?Sized, T> fmt::Debug for Specification<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("statement", &self.node.statement)
            .field("operator", &self.operator())
            .finish_non_exhaustive()
    }
}

impl<M: ?Sized, T> fmt::Display for Specification<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.statement)
    }
}
