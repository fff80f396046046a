//! Collection-level specifications lifted from a per-item specification.
//!
//! Each quantifier compares the number of satisfied items against its bound and selects
//! the items that explain the outcome. Those items become the causes of the aggregate
//! result, so its reason and justification only mention them.

use std::fmt;
use std::sync::Arc;

use tracing::debug;
use verdict_core::{BoxError, FactoryRole, Metadata, Notation, VerdictError};
use verdict_result::{BooleanResult, Declaration};

use crate::builder::{check_fixed, check_statement};
use crate::policy::Policy;
use crate::spec::{Quantified, SpecKind, Specification};

/// Counting rule applied by a quantifier specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// No item may be unsatisfied.
    All,
    /// At least one item must be satisfied.
    Any,
    /// No item may be satisfied.
    None,
    /// At least `n` items must be satisfied.
    AtLeast(usize),
    /// At most `n` items may be satisfied.
    AtMost(usize),
    /// Exactly `n` items must be satisfied.
    Exactly(usize),
}

/// Outcome of a quantifier over item outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Whether the bound holds.
    pub satisfied: bool,
    /// Indices of the items explaining the outcome, in order.
    pub causes: Vec<usize>,
}

impl Quantifier {
    /// Judges `outcomes` and selects the causal items.
    pub fn select(&self, outcomes: &[bool]) -> Selection {
        let all: Vec<usize> = (0..outcomes.len()).collect();
        let (trues, falses): (Vec<usize>, Vec<usize>) =
            all.iter().partition(|idx| outcomes[**idx]);
        let true_count = trues.len();
        let (satisfied, causes) = match *self {
            Quantifier::All => {
                let satisfied = falses.is_empty();
                (satisfied, if satisfied { all } else { falses })
            }
            Quantifier::Any => {
                let satisfied = !trues.is_empty();
                (satisfied, if satisfied { trues } else { all })
            }
            Quantifier::None => {
                let satisfied = trues.is_empty();
                (satisfied, if satisfied { all } else { trues })
            }
            Quantifier::AtLeast(0) => (true, all),
            Quantifier::AtLeast(n) => {
                let satisfied = true_count >= n;
                (satisfied, if satisfied { trues } else { all })
            }
            Quantifier::AtMost(n) => {
                let satisfied = true_count <= n;
                (satisfied, if satisfied { all } else { trues })
            }
            Quantifier::Exactly(n) => {
                if true_count == n {
                    (true, all)
                } else if true_count > n {
                    (false, trues)
                } else {
                    (false, falses)
                }
            }
        };
        Selection { satisfied, causes }
    }
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::All => f.write_str("all satisfied"),
            Quantifier::Any => f.write_str("any satisfied"),
            Quantifier::None => f.write_str("none satisfied"),
            Quantifier::AtLeast(n) => write!(f, "at least {n} satisfied"),
            Quantifier::AtMost(n) => write!(f, "at most {n} satisfied"),
            Quantifier::Exactly(n) => write!(f, "exactly {n} satisfied"),
        }
    }
}

/// Read-only snapshot of one quantifier evaluation, handed to its factories.
pub struct Evaluation<'a, I, T> {
    models: &'a [I],
    results: &'a [BooleanResult<T>],
    causes: &'a [usize],
}

impl<'a, I, T> Evaluation<'a, I, T> {
    fn new(models: &'a [I], results: &'a [BooleanResult<T>], causes: &'a [usize]) -> Self {
        Self {
            models,
            results,
            causes,
        }
    }

    /// Every evaluated item, in order.
    pub fn models(&self) -> &'a [I] {
        self.models
    }

    /// Per-item results, parallel to [`Evaluation::models`].
    pub fn results(&self) -> &'a [BooleanResult<T>] {
        self.results
    }

    /// Items that satisfied the per-item specification.
    pub fn true_models(&self) -> Vec<&'a I> {
        self.filter(true)
    }

    /// Items that did not satisfy the per-item specification.
    pub fn false_models(&self) -> Vec<&'a I> {
        self.filter(false)
    }

    fn filter(&self, satisfied: bool) -> Vec<&'a I> {
        self.models
            .iter()
            .zip(self.results)
            .filter(|(_, result)| result.satisfied() == satisfied)
            .map(|(model, _)| model)
            .collect()
    }

    /// Number of items.
    pub fn count(&self) -> usize {
        self.models.len()
    }

    /// Number of satisfied items.
    pub fn true_count(&self) -> usize {
        self.results.iter().filter(|result| result.satisfied()).count()
    }

    /// Number of unsatisfied items.
    pub fn false_count(&self) -> usize {
        self.count() - self.true_count()
    }

    /// Items selected as explaining the outcome.
    pub fn causal_models(&self) -> Vec<&'a I> {
        self.causes.iter().map(|idx| &self.models[*idx]).collect()
    }

    /// Results of the items selected as explaining the outcome.
    pub fn causal_results(&self) -> Vec<&'a BooleanResult<T>> {
        self.causes.iter().map(|idx| &self.results[*idx]).collect()
    }

    /// Whether every item is satisfied (vacuously true when empty).
    pub fn all_satisfied(&self) -> bool {
        self.true_count() == self.count()
    }

    /// Whether no item is satisfied.
    pub fn none_satisfied(&self) -> bool {
        self.true_count() == 0
    }
}

/// Callback over a quantifier evaluation snapshot.
pub type EvaluationFn<I, T, R> =
    Arc<dyn for<'a> Fn(&Evaluation<'a, I, T>) -> Result<R, BoxError> + Send + Sync>;

/// Produces the values declared for one branch of a quantifier specification.
pub enum EvaluationFactory<I, T> {
    /// A single fixed value.
    Constant(T),
    /// A fixed list of values.
    Constants(Vec<T>),
    /// One value computed from the evaluation.
    Evaluation(EvaluationFn<I, T, T>),
    /// Several values computed from the evaluation.
    EvaluationMany(EvaluationFn<I, T, Vec<T>>),
}

impl<I: 'static, T: Metadata> EvaluationFactory<I, T> {
    /// A single fixed value.
    pub fn constant(value: impl Into<T>) -> Self {
        EvaluationFactory::Constant(value.into())
    }

    /// A fixed list of values.
    pub fn constants<V>(values: V) -> Self
    where
        V: IntoIterator,
        V::Item: Into<T>,
    {
        EvaluationFactory::Constants(values.into_iter().map(Into::into).collect())
    }

    /// One value computed from the evaluation.
    pub fn evaluation<F>(factory: F) -> Self
    where
        F: for<'a> Fn(&Evaluation<'a, I, T>) -> T + Send + Sync + 'static,
    {
        EvaluationFactory::Evaluation(shared(move |evaluation| Ok(factory(evaluation))))
    }

    /// One value computed from the evaluation by a fallible callback.
    pub fn try_evaluation<F, E>(factory: F) -> Self
    where
        F: for<'a> Fn(&Evaluation<'a, I, T>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        EvaluationFactory::Evaluation(shared(move |evaluation| {
            factory(evaluation).map_err(Into::into)
        }))
    }

    /// Several values computed from the evaluation.
    pub fn evaluation_many<F, V>(factory: F) -> Self
    where
        F: for<'a> Fn(&Evaluation<'a, I, T>) -> V + Send + Sync + 'static,
        V: IntoIterator<Item = T>,
    {
        EvaluationFactory::EvaluationMany(shared(move |evaluation| {
            Ok(factory(evaluation).into_iter().collect())
        }))
    }

    /// Several values computed from the evaluation by a fallible callback.
    pub fn try_evaluation_many<F, V, E>(factory: F) -> Self
    where
        F: for<'a> Fn(&Evaluation<'a, I, T>) -> Result<V, E> + Send + Sync + 'static,
        V: IntoIterator<Item = T>,
        E: Into<BoxError>,
    {
        EvaluationFactory::EvaluationMany(shared(move |evaluation| {
            factory(evaluation)
                .map(|values| values.into_iter().collect())
                .map_err(Into::into)
        }))
    }

    /// Returns whether the factory always yields exactly one value.
    pub fn is_single_valued(&self) -> bool {
        matches!(
            self,
            EvaluationFactory::Constant(_) | EvaluationFactory::Evaluation(_)
        )
    }

    fn fixed(&self) -> &[T] {
        match self {
            EvaluationFactory::Constant(value) => std::slice::from_ref(value),
            EvaluationFactory::Constants(values) => values,
            _ => &[],
        }
    }

    fn resolve(&self, evaluation: &Evaluation<'_, I, T>) -> Result<Vec<T>, BoxError> {
        match self {
            EvaluationFactory::Constant(value) => Ok(vec![value.clone()]),
            EvaluationFactory::Constants(values) => Ok(values.clone()),
            EvaluationFactory::Evaluation(factory) => factory(evaluation).map(|value| vec![value]),
            EvaluationFactory::EvaluationMany(factory) => factory(evaluation),
        }
    }
}

fn shared<I, T, R, F>(factory: F) -> EvaluationFn<I, T, R>
where
    F: for<'a> Fn(&Evaluation<'a, I, T>) -> Result<R, BoxError> + Send + Sync + 'static,
{
    Arc::new(factory)
}

impl<I, T: Clone> Clone for EvaluationFactory<I, T> {
    fn clone(&self) -> Self {
        match self {
            EvaluationFactory::Constant(value) => EvaluationFactory::Constant(value.clone()),
            EvaluationFactory::Constants(values) => EvaluationFactory::Constants(values.clone()),
            EvaluationFactory::Evaluation(factory) => {
                EvaluationFactory::Evaluation(Arc::clone(factory))
            }
            EvaluationFactory::EvaluationMany(factory) => {
                EvaluationFactory::EvaluationMany(Arc::clone(factory))
            }
        }
    }
}

struct QuantifiedSpec<I, T> {
    item: Specification<I, T>,
    quantifier: Quantifier,
    factories: Option<(EvaluationFactory<I, T>, EvaluationFactory<I, T>)>,
}

impl<I: Sync + 'static, T: Metadata> Quantified<[I], T> for QuantifiedSpec<I, T> {
    fn evaluate(
        &self,
        models: &[I],
        statement: &str,
        notation: &Arc<Notation>,
    ) -> Result<BooleanResult<T>, VerdictError> {
        let results = models
            .iter()
            .map(|model| self.item.is_satisfied_by(model))
            .collect::<Result<Vec<_>, _>>()?;
        let outcomes: Vec<bool> = results.iter().map(BooleanResult::satisfied).collect();
        let Selection { satisfied, causes } = self.quantifier.select(&outcomes);
        debug!(
            statement,
            quantifier = %self.quantifier,
            items = models.len(),
            causes = causes.len(),
            satisfied,
            "evaluated quantifier"
        );

        let declaration = match &self.factories {
            Some((when_true, when_false)) => {
                let factory = if satisfied { when_true } else { when_false };
                let role = FactoryRole::for_outcome(satisfied);
                let evaluation = Evaluation::new(models, &results, &causes);
                let values = factory.resolve(&evaluation).map_err(|err| {
                    debug!(statement, role = role.as_str(), error = %err, "callback failed");
                    VerdictError::evaluation(statement, role, err)
                })?;
                Declaration::new(statement, values, Arc::clone(notation), satisfied)
            }
            None => Declaration::fallback(statement, Arc::clone(notation), satisfied),
        };
        BooleanResult::declared(satisfied, declaration, results, causes)
    }

    fn item_statement(&self) -> &str {
        self.item.statement()
    }

    fn renotate(&self, notation: &Arc<Notation>) -> Arc<dyn Quantified<[I], T>> {
        Arc::new(QuantifiedSpec {
            item: self.item.renotate(notation),
            quantifier: self.quantifier,
            factories: self.factories.clone(),
        })
    }
}

/// Builds a quantifier specification over a slice of items.
pub struct QuantifierBuilder<I, T> {
    item: Specification<I, T>,
    quantifier: Quantifier,
    when_true: Option<EvaluationFactory<I, T>>,
    when_false: Option<EvaluationFactory<I, T>>,
}

impl<I: Sync + 'static, T: Metadata> QuantifierBuilder<I, T> {
    pub(crate) fn new(item: Specification<I, T>, quantifier: Quantifier) -> Self {
        Self {
            item,
            quantifier,
            when_true: None,
            when_false: None,
        }
    }

    /// Value declared when the bound holds.
    pub fn when_true(self, value: impl Into<T>) -> Self {
        self.when_true_with(EvaluationFactory::Constant(value.into()))
    }

    /// Factory producing the values declared when the bound holds.
    pub fn when_true_with(mut self, factory: EvaluationFactory<I, T>) -> Self {
        self.when_true = Some(factory);
        self
    }

    /// Value declared when the bound fails.
    pub fn when_false(self, value: impl Into<T>) -> Self {
        self.when_false_with(EvaluationFactory::Constant(value.into()))
    }

    /// Factory producing the values declared when the bound fails.
    pub fn when_false_with(mut self, factory: EvaluationFactory<I, T>) -> Self {
        self.when_false = Some(factory);
        self
    }

    /// Creates the specification under `statement`.
    ///
    /// Without factories the statement stands in for the outcome, which requires
    /// metadata that can be synthesized from a statement.
    pub fn create(self, statement: impl Into<String>) -> Result<Specification<[I], T>, VerdictError> {
        let statement = check_statement(statement.into())?;
        let factories = match (self.when_true, self.when_false) {
            (Some(when_true), Some(when_false)) => {
                check_fixed(&statement, when_true.fixed())?;
                check_fixed(&statement, when_false.fixed())?;
                Some((when_true, when_false))
            }
            (None, None) if T::from_statement(statement.clone()).is_some() => None,
            (when_true, _) => {
                let missing = if when_true.is_none() { "WhenTrue" } else { "WhenFalse" };
                return Err(VerdictError::Construction(
                    verdict_core::ErrorInfo::new(
                        "missing-factory",
                        "quantifier specification is missing a factory",
                    )
                    .with_context("statement", statement.as_str())
                    .with_context("role", missing)
                    .with_hint("supply both when_true and when_false, or use string metadata"),
                ));
            }
        };
        let notation = Arc::clone(self.item.notation());
        let kind = SpecKind::Quantified(Arc::new(QuantifiedSpec {
            item: self.item,
            quantifier: self.quantifier,
            factories,
        }));
        Ok(Specification::from_kind(statement, notation, kind))
    }

    /// Creates the specification named after the constant true assertion.
    pub fn create_default(self) -> Result<Specification<[I], T>, VerdictError> {
        let statement = match &self.when_true {
            Some(EvaluationFactory::Constant(value)) => value.as_assertion(),
            _ => None,
        };
        match statement {
            Some(statement) => self.create(statement),
            None => Err(VerdictError::construction(
                "missing-statement",
                "a default statement requires a constant textual true assertion",
            )),
        }
    }

    /// Creates a policy whose branches each decide exactly one value.
    pub fn create_policy(self, statement: impl Into<String>) -> Result<Policy<[I], T>, VerdictError> {
        let single = [&self.when_true, &self.when_false]
            .into_iter()
            .all(|factory| matches!(factory, Some(factory) if factory.is_single_valued()));
        if !single {
            return Err(VerdictError::construction(
                "multi-valued-policy",
                "policy factories must each yield exactly one value",
            ));
        }
        self.create(statement).map(Policy::new)
    }
}

impl<I: Sync + 'static, T: Metadata> Specification<I, T> {
    /// Satisfied when every item satisfies this specification.
    pub fn as_all_satisfied(&self) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::All)
    }

    /// Satisfied when at least one item satisfies this specification.
    pub fn as_any_satisfied(&self) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::Any)
    }

    /// Satisfied when no item satisfies this specification.
    pub fn as_none_satisfied(&self) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::None)
    }

    /// Satisfied when at least `n` items satisfy this specification.
    pub fn as_at_least_n_satisfied(&self, n: usize) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::AtLeast(n))
    }

    /// Satisfied when at most `n` items satisfy this specification.
    pub fn as_at_most_n_satisfied(&self, n: usize) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::AtMost(n))
    }

    /// Satisfied when exactly `n` items satisfy this specification.
    pub fn as_n_satisfied(&self, n: usize) -> QuantifierBuilder<I, T> {
        QuantifierBuilder::new(self.clone(), Quantifier::Exactly(n))
    }
}
