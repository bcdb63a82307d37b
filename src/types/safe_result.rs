//! The success-or-failure container.
//!
//! [`SafeResult`] is what every adapter in this crate returns. It holds
//! either a value or a failure (never both), and a failure-bearing result
//! also carries an optional diagnostic captured when it was built.
//!
//! # Examples
//!
//! ```
//! use safe_rail::SafeResult;
//!
//! let ok: SafeResult<i32, &str> = SafeResult::of_value(42);
//! assert!(ok.is_success());
//! assert_eq!(ok.unwrap_or(0), 42);
//!
//! let failed: SafeResult<i32, &str> = SafeResult::of_failure("disk full");
//! assert!(failed.is_failure());
//! assert_eq!(failed.to_string(), "Error: disk full");
//! assert_eq!(failed.unwrap_or(0), 0);
//! ```
use core::fmt;

#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::traits::Failure;
use crate::types::diagnostic::{self, DiagnosticCapture};
use crate::types::{BoxError, Fault};

#[derive(Clone, PartialEq, Eq)]
enum Outcome<T, F> {
    Value(T),
    Failure { failure: F, diagnostic: Option<String> },
}

/// Either a success value or a captured failure.
///
/// # Type Parameters
///
/// * `T` - The success value type (`()` for operations with no return)
/// * `F` - The failure type, [`Fault`] unless stated otherwise
#[must_use = "this `SafeResult` may hold a failure that should be inspected"]
#[derive(Clone, PartialEq, Eq)]
pub struct SafeResult<T, F = Fault> {
    outcome: Outcome<T, F>,
}

impl<T, F> SafeResult<T, F> {
    /// Creates a success-bearing result.
    #[inline]
    pub fn of_value(value: T) -> Self {
        Self { outcome: Outcome::Value(value) }
    }

    /// Returns `true` if a failure is held.
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, Outcome::Failure { .. })
    }

    /// Returns `true` if a value is held.
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Value(_))
    }

    /// Borrows the value, if any.
    #[inline]
    pub fn value(&self) -> Option<&T> {
        match &self.outcome {
            Outcome::Value(value) => Some(value),
            Outcome::Failure { .. } => None,
        }
    }

    /// Borrows the failure, if any.
    #[inline]
    pub fn failure(&self) -> Option<&F> {
        match &self.outcome {
            Outcome::Value(_) => None,
            Outcome::Failure { failure, .. } => Some(failure),
        }
    }

    /// Borrows the diagnostic captured with the failure, if any.
    #[inline]
    pub fn diagnostic(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Value(_) => None,
            Outcome::Failure { diagnostic, .. } => diagnostic.as_deref(),
        }
    }

    /// Returns the value, or `default` if a failure is held.
    #[inline]
    pub fn unwrap_or(self, default: T) -> T {
        match self.outcome {
            Outcome::Value(value) => value,
            Outcome::Failure { .. } => default,
        }
    }

    /// Returns the value, or computes one from the failure.
    #[inline]
    pub fn unwrap_or_else<O>(self, op: O) -> T
    where
        O: FnOnce(F) -> T,
    {
        match self.outcome {
            Outcome::Value(value) => value,
            Outcome::Failure { failure, .. } => op(failure),
        }
    }

    /// Converts into a standard `Result` for `?` propagation, dropping the
    /// diagnostic.
    #[inline]
    pub fn into_result(self) -> Result<T, F> {
        match self.outcome {
            Outcome::Value(value) => Ok(value),
            Outcome::Failure { failure, .. } => Err(failure),
        }
    }

    /// Maps the success value, keeping a failure and its diagnostic as is.
    #[inline]
    pub fn map<U, O>(self, op: O) -> SafeResult<U, F>
    where
        O: FnOnce(T) -> U,
    {
        let outcome = match self.outcome {
            Outcome::Value(value) => Outcome::Value(op(value)),
            Outcome::Failure { failure, diagnostic } => Outcome::Failure { failure, diagnostic },
        };
        SafeResult { outcome }
    }
}

impl<T, F> SafeResult<T, F>
where
    F: Failure,
{
    /// Creates a failure-bearing result, capturing a diagnostic according to
    /// the process-wide [`DiagnosticCapture`] mode.
    #[inline]
    pub fn of_failure(failure: F) -> Self {
        Self::of_failure_with(failure, diagnostic::diagnostic_capture())
    }

    /// Creates a failure-bearing result with an explicit capture mode.
    pub fn of_failure_with(failure: F, capture: DiagnosticCapture) -> Self {
        let diagnostic = diagnostic::describe(&failure, capture);
        Self { outcome: Outcome::Failure { failure, diagnostic } }
    }

    /// Returns the value, or raises the held failure.
    ///
    /// The failure is raised through [`Failure::resume`], which unwinds with
    /// the original failure as the panic payload. For a [`Fault::Panic`] that
    /// is the payload of the panic that was captured, so a caller that
    /// catches and downcasts sees exactly what was thrown.
    ///
    /// # Panics
    ///
    /// Unwinds when a failure is held.
    ///
    /// # Examples
    ///
    /// ```
    /// use safe_rail::SafeResult;
    ///
    /// let failed: SafeResult<u8, &str> = SafeResult::of_failure("boom");
    /// let payload = std::panic::catch_unwind(move || failed.unwrap()).unwrap_err();
    /// assert_eq!(payload.downcast_ref::<&str>(), Some(&"boom"));
    /// ```
    pub fn unwrap(self) -> T {
        match self.outcome {
            Outcome::Value(value) => value,
            Outcome::Failure { failure, .. } => failure.resume(),
        }
    }
}

impl<T, F> From<Result<T, F>> for SafeResult<T, F>
where
    F: Failure,
{
    fn from(result: Result<T, F>) -> Self {
        match result {
            Ok(value) => Self::of_value(value),
            Err(failure) => Self::of_failure(failure),
        }
    }
}

impl<T, E> SafeResult<Result<T, E>, Fault>
where
    E: Into<BoxError>,
{
    /// Collapses a wrapped `Result`: an inner `Err(e)` becomes
    /// [`Fault::Error`].
    ///
    /// ```
    /// use safe_rail::{safe, FaultKind};
    ///
    /// let parse = safe(|text: &str| text.parse::<u16>());
    ///
    /// assert_eq!(parse("8080").flatten().unwrap(), 8080);
    ///
    /// let failed = parse("eighty").flatten();
    /// assert_eq!(failed.failure().map(|f| f.kind()), Some(FaultKind::Error));
    /// ```
    pub fn flatten(self) -> SafeResult<T, Fault> {
        match self.outcome {
            Outcome::Value(Ok(value)) => SafeResult::of_value(value),
            Outcome::Value(Err(error)) => SafeResult::of_failure(Fault::error(error)),
            Outcome::Failure { failure, diagnostic } => {
                SafeResult { outcome: Outcome::Failure { failure, diagnostic } }
            },
        }
    }
}

impl<T, F> fmt::Display for SafeResult<T, F>
where
    T: fmt::Display,
    F: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Value(value) => fmt::Display::fmt(value, f),
            Outcome::Failure { failure, .. } => write!(f, "Error: {}", failure),
        }
    }
}

impl<T, F> fmt::Debug for SafeResult<T, F>
where
    T: fmt::Debug,
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            Outcome::Value(value) => f.debug_struct("SafeResult").field("value", value).finish(),
            Outcome::Failure { failure, .. } => {
                f.debug_struct("SafeResult").field("failure", failure).finish()
            },
        }
    }
}

#[cfg(feature = "serde")]
impl<T, F> Serialize for SafeResult<T, F>
where
    T: Serialize,
    F: Failure,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.outcome {
            Outcome::Value(value) => {
                let mut state = serializer.serialize_struct("SafeResult", 1)?;
                state.serialize_field("value", value)?;
                state.end()
            },
            Outcome::Failure { failure, diagnostic } => {
                let mut state = serializer.serialize_struct("SafeResult", 3)?;
                state.serialize_field("failure", &failure.to_string())?;
                state.serialize_field("kind", failure.label().as_ref())?;
                state.serialize_field("diagnostic", diagnostic)?;
                state.end()
            },
        }
    }
}
