//! # Deferred
//!
//! The value primitive the rest of the crate composes over. A [`Deferred`] either carries a value
//! that can be handed out right away or a suspended computation whose inputs are produced by work
//! the host scheduler has not run yet. This module never runs the scheduler, it only builds
//! compositions that the scheduler can force later through [`Deferred::resolve`].

use std::fmt::{self, Debug, Formatter};
use std::sync::Arc;

/// Suspended computations must be pure, they can be re-run on every resolution.
pub type Thunk<T> = Arc<dyn Fn() -> Result<T, EvaluationError> + Send + Sync>;

#[derive(Clone)]
pub enum Deferred<T> {
    /// A value that can be produced without running any upstream work.
    Immediate(T),

    /// A computation whose inputs depend on work owned by the external scheduler.
    Pending(Thunk<T>),
}

impl<T: Clone + Send + Sync + 'static> Deferred<T> {
    pub fn of(value: T) -> Self {
        Self::Immediate(value)
    }

    pub fn pending<F>(compute: F) -> Self
    where
        F: Fn() -> Result<T, EvaluationError> + Send + Sync + 'static,
    {
        Self::Pending(Arc::new(compute))
    }

    /// The value if no upstream work stands between the caller and it.
    pub fn immediate(&self) -> Option<&T> {
        match self {
            Self::Immediate(value) => Some(value),
            Self::Pending(_) => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// Produces the value, running the recorded computation if there is one. Safe to call any
    /// number of times, every resolution recomputes from the same sources.
    pub fn resolve(&self) -> Result<T, EvaluationError> {
        match self {
            Self::Immediate(value) => Ok(value.clone()),
            Self::Pending(compute) => compute(),
        }
    }

    /// Applies a pure transform without forcing a pending source. Immediate values are transformed
    /// on the spot, pending ones stay pending.
    pub fn map<U, F>(&self, transform: F) -> Deferred<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        match self {
            Self::Immediate(value) => Deferred::Immediate(transform(value.clone())),
            Self::Pending(compute) => {
                let source = Arc::clone(compute);
                Deferred::Pending(Arc::new(move || source().map(|value| transform(value))))
            }
        }
    }

    /// Applies a fallible transform. The result is always suspended, a failure has no immediate
    /// representation so it can only surface through [`Deferred::resolve`].
    pub fn try_map<U, F>(&self, transform: F) -> Deferred<U>
    where
        U: Clone + Send + Sync + 'static,
        F: Fn(T) -> Result<U, EvaluationError> + Send + Sync + 'static,
    {
        let source = self.clone();
        Deferred::Pending(Arc::new(move || transform(source.resolve()?)))
    }

    /// Combines two values with a pure combinator. The combination is only performed eagerly when
    /// neither side depends on unexecuted work.
    pub fn zip<U, V, F>(&self, other: &Deferred<U>, combine: F) -> Deferred<V>
    where
        U: Clone + Send + Sync + 'static,
        V: Clone + Send + Sync + 'static,
        F: Fn(T, U) -> V + Send + Sync + 'static,
    {
        match (self, other) {
            (Self::Immediate(left), Deferred::Immediate(right)) => {
                Deferred::Immediate(combine(left.clone(), right.clone()))
            }
            _ => {
                let left = self.clone();
                let right = other.clone();
                Deferred::Pending(Arc::new(move || Ok(combine(left.resolve()?, right.resolve()?))))
            }
        }
    }
}

impl<T: Clone + Send + Sync + 'static> From<T> for Deferred<T> {
    fn from(value: T) -> Self {
        Self::Immediate(value)
    }
}

impl<T: Debug> Debug for Deferred<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate(value) => f.debug_tuple("Immediate").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct EvaluationError(String);

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<&'static str> for EvaluationError {
    fn from(val: &'static str) -> Self {
        Self(val.to_string())
    }
}

impl From<String> for EvaluationError {
    fn from(val: String) -> Self {
        Self(val)
    }
}
