//! Typed metadata attached to evaluation outcomes.

/// Values attached to the outcome of an evaluation.
///
/// Strings double as human readable assertions and can be synthesized from a
/// specification's statement. Other types keep the defaults, in which case the
/// explanation tier falls back to the statement for its assertions.
pub trait Metadata: Clone + Send + Sync + 'static {
    /// Returns the assertion text this value stands for, if any.
    fn as_assertion(&self) -> Option<String> {
        None
    }

    /// Synthesizes a value from a statement when no factory was supplied.
    fn from_statement(_statement: String) -> Option<Self> {
        None
    }
}

impl Metadata for String {
    fn as_assertion(&self) -> Option<String> {
        Some(self.clone())
    }

    fn from_statement(statement: String) -> Option<Self> {
        Some(statement)
    }
}

/// Resolves the assertions standing for `values`, falling back to `fallback` when any
/// value has no textual form.
pub fn assertions_for<T: Metadata>(values: &[T], fallback: impl FnOnce() -> String) -> Vec<String> {
    let texts: Option<Vec<String>> = values.iter().map(Metadata::as_assertion).collect();
    match texts {
        Some(texts) if !texts.is_empty() => texts,
        _ => vec![fallback()],
    }
}
