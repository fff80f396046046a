//! Normalized true/false factories.
//!
//! Every callback shape accepted by the builders is folded into one closed set of
//! variants here, so evaluation never has to reason about overloads.

use std::fmt;
use std::sync::Arc;

use verdict_core::{BoxError, Metadata};
use verdict_result::BooleanResult;

/// Callback over the model.
pub type ModelFn<M, R> = Arc<dyn Fn(&M) -> Result<R, BoxError> + Send + Sync>;

/// Callback over the model and the underlying result of a wrapped specification.
pub type ResultFn<M, T, R> = Arc<dyn Fn(&M, &BooleanResult<T>) -> Result<R, BoxError> + Send + Sync>;

/// Produces the values declared for one branch of a specification.
pub enum Factory<M: ?Sized, T> {
    /// A single fixed value.
    Constant(T),
    /// A fixed list of values.
    Constants(Vec<T>),
    /// One value computed from the model.
    Model(ModelFn<M, T>),
    /// Several values computed from the model.
    ModelMany(ModelFn<M, Vec<T>>),
    /// One value computed from the model and the underlying result.
    Result(ResultFn<M, T, T>),
    /// Several values computed from the model and the underlying result.
    ResultMany(ResultFn<M, T, Vec<T>>),
}

impl<M: ?Sized + 'static, T: Metadata> Factory<M, T> {
    /// A single fixed value.
    pub fn constant(value: impl Into<T>) -> Self {
        Factory::Constant(value.into())
    }

    /// A fixed list of values.
    pub fn constants<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<T>,
    {
        Factory::Constants(values.into_iter().map(Into::into).collect())
    }

    /// One value computed from the model.
    pub fn model<F>(factory: F) -> Self
    where
        F: Fn(&M) -> T + Send + Sync + 'static,
    {
        Factory::Model(Arc::new(move |model: &M| Ok(factory(model))))
    }

    /// One value computed from the model by a fallible callback.
    pub fn try_model<F, E>(factory: F) -> Self
    where
        F: Fn(&M) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Factory::Model(Arc::new(move |model: &M| factory(model).map_err(Into::into)))
    }

    /// Several values computed from the model.
    pub fn model_many<F, I>(factory: F) -> Self
    where
        F: Fn(&M) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Factory::ModelMany(Arc::new(move |model: &M| {
            Ok(factory(model).into_iter().collect())
        }))
    }

    /// Several values computed from the model by a fallible callback.
    pub fn try_model_many<F, I, E>(factory: F) -> Self
    where
        F: Fn(&M) -> Result<I, E> + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        E: Into<BoxError>,
    {
        Factory::ModelMany(Arc::new(move |model: &M| {
            factory(model)
                .map(|values| values.into_iter().collect())
                .map_err(Into::into)
        }))
    }

    /// One value computed from the model and the underlying result.
    pub fn result<F>(factory: F) -> Self
    where
        F: Fn(&M, &BooleanResult<T>) -> T + Send + Sync + 'static,
    {
        Factory::Result(Arc::new(move |model: &M, result: &BooleanResult<T>| {
            Ok(factory(model, result))
        }))
    }

    /// One value computed from the model and the underlying result by a fallible callback.
    pub fn try_result<F, E>(factory: F) -> Self
    where
        F: Fn(&M, &BooleanResult<T>) -> Result<T, E> + Send + Sync + 'static,
        E: Into<BoxError>,
    {
        Factory::Result(Arc::new(move |model: &M, result: &BooleanResult<T>| {
            factory(model, result).map_err(Into::into)
        }))
    }

    /// Several values computed from the model and the underlying result.
    pub fn result_many<F, I>(factory: F) -> Self
    where
        F: Fn(&M, &BooleanResult<T>) -> I + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
    {
        Factory::ResultMany(Arc::new(move |model: &M, result: &BooleanResult<T>| {
            Ok(factory(model, result).into_iter().collect())
        }))
    }

    /// Several values computed from the model and the underlying result by a fallible callback.
    pub fn try_result_many<F, I, E>(factory: F) -> Self
    where
        F: Fn(&M, &BooleanResult<T>) -> Result<I, E> + Send + Sync + 'static,
        I: IntoIterator<Item = T>,
        E: Into<BoxError>,
    {
        Factory::ResultMany(Arc::new(move |model: &M, result: &BooleanResult<T>| {
            factory(model, result)
                .map(|values| values.into_iter().collect())
                .map_err(Into::into)
        }))
    }

    /// Returns whether the factory reads the underlying result.
    pub fn needs_underlying(&self) -> bool {
        matches!(self, Factory::Result(_) | Factory::ResultMany(_))
    }

    /// Returns whether the factory always yields exactly one value.
    pub fn is_single_valued(&self) -> bool {
        matches!(
            self,
            Factory::Constant(_) | Factory::Model(_) | Factory::Result(_)
        )
    }

    /// Fixed values known at construction time.
    pub(crate) fn fixed(&self) -> &[T] {
        match self {
            Factory::Constant(value) => std::slice::from_ref(value),
            Factory::Constants(values) => values,
            _ => &[],
        }
    }

    pub(crate) fn resolve(
        &self,
        model: &M,
        underlying: Option<&BooleanResult<T>>,
    ) -> Result<Vec<T>, BoxError> {
        match self {
            Factory::Constant(value) => Ok(vec![value.clone()]),
            Factory::Constants(values) => Ok(values.clone()),
            Factory::Model(factory) => factory(model).map(|value| vec![value]),
            Factory::ModelMany(factory) => factory(model),
            Factory::Result(factory) => factory(model, require(underlying)?).map(|value| vec![value]),
            Factory::ResultMany(factory) => factory(model, require(underlying)?),
        }
    }
}

fn require<T>(underlying: Option<&BooleanResult<T>>) -> Result<&BooleanResult<T>, BoxError> {
    underlying.ok_or_else(|| BoxError::from("factory requires an underlying result"))
}

impl<M: ?Sized, T: Clone> Clone for Factory<M, T> {
    fn clone(&self) -> Self {
        match self {
            Factory::Constant(value) => Factory::Constant(value.clone()),
            Factory::Constants(values) => Factory::Constants(values.clone()),
            Factory::Model(factory) => Factory::Model(Arc::clone(factory)),
            Factory::ModelMany(factory) => Factory::ModelMany(Arc::clone(factory)),
            Factory::Result(factory) => Factory::Result(Arc::clone(factory)),
            Factory::ResultMany(factory) => Factory::ResultMany(Arc::clone(factory)),
        }
    }
}

impl<M: ?Sized, T: fmt::Debug> fmt::Debug for Factory<M, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Factory::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            Factory::Constants(values) => f.debug_tuple("Constants").field(values).finish(),
            Factory::Model(_) => f.write_str("Model(..)"),
            Factory::ModelMany(_) => f.write_str("ModelMany(..)"),
            Factory::Result(_) => f.write_str("Result(..)"),
            Factory::ResultMany(_) => f.write_str("ResultMany(..)"),
        }
    }
}
