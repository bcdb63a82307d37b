//! Synchronous wrapping adapter.
//!
//! [`safe`] turns any callable that might panic into one that always returns
//! a [`SafeResult`]. Multi-argument functions take their arguments as a
//! tuple; for definition-time wrapping that keeps the real signature, see
//! [`safe_fn!`](crate::safe_fn).
//!
//! Panics are caught with [`std::panic::catch_unwind`]; the resulting
//! [`Fault::Panic`] remembers the `file:line:column` it was raised at, which
//! becomes the result's diagnostic. A build with
//! `panic = "abort"`, `std::process::exit` or a stack overflow cannot be
//! caught and still terminates the process.

use crate::types::panic_origin::catch;
use crate::types::{Fault, SafeResult};

/// Wraps `f` so that it returns a [`SafeResult`] instead of panicking.
///
/// # Examples
///
/// ```
/// use safe_rail::{safe, FaultKind};
///
/// fn divide(a: i32, b: i32) -> i32 {
///     a / b
/// }
///
/// let divide = safe(|(a, b): (i32, i32)| divide(a, b));
///
/// assert_eq!(divide((10, 2)).unwrap(), 5);
///
/// let failed = divide((10, 0));
/// assert_eq!(failed.failure().map(|f| f.kind()), Some(FaultKind::Panic));
/// assert!(failed.to_string().contains("attempt to divide by zero"));
/// ```
pub fn safe<A, T, F>(f: F) -> impl Fn(A) -> SafeResult<T>
where
    F: Fn(A) -> T,
{
    move |args| capture(|| f(args))
}

/// Runs `f` once, capturing a panic as a failure-bearing [`SafeResult`].
///
/// This is the primitive behind [`safe`] and [`safe_fn!`](crate::safe_fn).
///
/// ```
/// use safe_rail::capture;
///
/// let result = capture(|| "42".parse::<i32>().unwrap());
/// assert_eq!(result.unwrap(), 42);
/// ```
pub fn capture<T, F>(f: F) -> SafeResult<T>
where
    F: FnOnce() -> T,
{
    match catch(f) {
        Ok(value) => SafeResult::of_value(value),
        Err(fault) => captured(fault),
    }
}

/// Builds the failure-bearing result for a fault caught by an adapter and
/// reports it to the `tracing` subscriber when that feature is enabled.
pub(crate) fn captured<T>(fault: Fault) -> SafeResult<T> {
    record(&fault);
    SafeResult::of_failure(fault)
}

#[cfg(feature = "tracing")]
pub(crate) fn record(fault: &Fault) {
    use crate::types::FaultKind;

    match fault.kind() {
        FaultKind::Cancelled => {
            tracing::debug!(kind = %FaultKind::Cancelled, message = %fault, "operation cancelled")
        },
        kind => tracing::warn!(kind = %kind, message = %fault, "failure captured"),
    }
}

#[cfg(not(feature = "tracing"))]
#[inline]
pub(crate) fn record(_fault: &Fault) {}
