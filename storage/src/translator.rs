use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::driver::DriverError;
use crate::registry::ErrorMapping;

/// Error surfaced by `ErrorTranslator`.
#[derive(Debug)]
pub enum TranslatedError<E, D> {
    /// A registered constraint was violated. `cause` is kept for diagnostics
    /// and exposed through `Error::source`.
    Domain { error: E, cause: D },
    /// Any other driver error, unchanged.
    Unhandled(D),
}

impl<E, D> TranslatedError<E, D> {
    /// Split into the domain error, or the untouched driver error.
    pub fn into_domain(self) -> Result<E, D> {
        match self {
            TranslatedError::Domain { error, .. } => Ok(error),
            TranslatedError::Unhandled(cause) => Err(cause),
        }
    }

    /// The domain error, if any, and the driver error it came from.
    pub fn into_parts(self) -> (Option<E>, D) {
        match self {
            TranslatedError::Domain { error, cause } => (Some(error), cause),
            TranslatedError::Unhandled(cause) => (None, cause),
        }
    }

    pub fn domain(&self) -> Option<&E> {
        match self {
            TranslatedError::Domain { error, .. } => Some(error),
            TranslatedError::Unhandled(_) => None,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, TranslatedError::Domain { .. })
    }
}

impl<E: fmt::Display, D: fmt::Display> fmt::Display for TranslatedError<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslatedError::Domain { error, .. } => error.fmt(f),
            TranslatedError::Unhandled(cause) => cause.fmt(f),
        }
    }
}

impl<E, D> Error for TranslatedError<E, D>
where
    E: Error,
    D: Error + 'static,
{
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TranslatedError::Domain { cause, .. } => Some(cause),
            TranslatedError::Unhandled(cause) => cause.source(),
        }
    }
}

/// How a wrapped operation ended.
enum Outcome<T, E, D> {
    Clean(T),
    Translated { error: E, cause: D },
    Propagated(D),
}

impl<T, E, D> From<Outcome<T, E, D>> for Result<T, TranslatedError<E, D>> {
    fn from(outcome: Outcome<T, E, D>) -> Self {
        match outcome {
            Outcome::Clean(value) => Ok(value),
            Outcome::Translated { error, cause } => Err(TranslatedError::Domain { error, cause }),
            Outcome::Propagated(cause) => Err(TranslatedError::Unhandled(cause)),
        }
    }
}

/// Converts integrity violations of registered constraints into domain errors.
///
/// Wraps exactly one storage operation per call. It never retries, spawns or
/// locks; the caller's transaction is left as it is.
pub struct ErrorTranslator<E> {
    mapping: Arc<ErrorMapping<E>>,
}

impl<E> ErrorTranslator<E> {
    pub fn new(mapping: ErrorMapping<E>) -> Self {
        Self::shared(Arc::new(mapping))
    }

    pub fn shared(mapping: Arc<ErrorMapping<E>>) -> Self {
        Self { mapping }
    }

    pub fn mapping(&self) -> &ErrorMapping<E> {
        &self.mapping
    }

    /// Translate the result of an operation that already completed.
    pub fn translate<T, D>(&self, result: Result<T, D>) -> Result<T, TranslatedError<E, D>>
    where
        D: DriverError,
    {
        self.classify(result).into()
    }

    /// Await `operation` and translate its result.
    ///
    /// Dropping the returned future drops `operation` with it; cancellation is
    /// not observed.
    pub async fn run<T, D, F>(&self, operation: F) -> Result<T, TranslatedError<E, D>>
    where
        D: DriverError,
        F: Future<Output = Result<T, D>>,
    {
        self.translate(operation.await)
    }

    fn classify<T, D>(&self, result: Result<T, D>) -> Outcome<T, E, D>
    where
        D: DriverError,
    {
        let cause = match result {
            Ok(value) => return Outcome::Clean(value),
            Err(cause) => cause,
        };

        let translated = cause.integrity_violation().and_then(|violation| {
            let constraint = violation.constraint_name?;
            let constructor = self.mapping.lookup(constraint)?;
            tracing::debug!(constraint, "Integrity violation translated to domain error");
            Some(constructor(violation.detail.map(Cow::into_owned)))
        });

        match translated {
            Some(error) => Outcome::Translated { error, cause },
            None => Outcome::Propagated(cause),
        }
    }
}

impl<E> Clone for ErrorTranslator<E> {
    fn clone(&self) -> Self {
        Self {
            mapping: Arc::clone(&self.mapping),
        }
    }
}

impl<E> fmt::Debug for ErrorTranslator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorTranslator")
            .field("mapping", &self.mapping)
            .finish()
    }
}
