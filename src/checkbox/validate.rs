//! Submit gating: the caller's verdict on a candidate selection.

use std::future::Future;

use futures::future::{BoxFuture, FutureExt};

/// Outcome of validating a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// Accept and resolve the prompt.
    Valid,
    /// Reject with the default message.
    Invalid,
    /// Reject with a message shown verbatim.
    Rejected(String),
}

impl From<bool> for Validation {
    fn from(valid: bool) -> Self {
        if valid { Validation::Valid } else { Validation::Invalid }
    }
}

/// An empty message rejects with the default message.
impl From<String> for Validation {
    fn from(message: String) -> Self {
        if message.is_empty() {
            Validation::Invalid
        } else {
            Validation::Rejected(message)
        }
    }
}

impl From<&str> for Validation {
    fn from(message: &str) -> Self {
        Validation::from(message.to_string())
    }
}

/// Async predicate over the ordered selection.
///
/// An `Err` aborts the prompt and is handed back to the caller unchanged.
pub type Validator<V> =
    Box<dyn Fn(Vec<V>) -> BoxFuture<'static, anyhow::Result<Validation>> + Send + Sync>;

/// Validator that accepts every selection.
pub fn accept_all<V: 'static>() -> Validator<V> {
    Box::new(|_: Vec<V>| async { anyhow::Ok(Validation::Valid) }.boxed())
}

/// Wrap an async closure as a [`Validator`].
///
/// The closure may return anything convertible into [`Validation`]:
/// `bool`, `String`, `&str`, or a `Validation` itself.
pub fn validator<V, F, Fut, R>(f: F) -> Validator<V>
where
    V: 'static,
    F: Fn(Vec<V>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<R>> + Send + 'static,
    R: Into<Validation>,
{
    Box::new(move |selection: Vec<V>| {
        let verdict = f(selection);
        async move {
            let verdict: Validation = verdict.await?.into();
            anyhow::Ok(verdict)
        }
        .boxed()
    })
}

// ============================================================================
// TESTS
// ============================================================================
