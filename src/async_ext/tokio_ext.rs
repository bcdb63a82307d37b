//! Tokio-specific async extensions.
//!
//! Tokio reports the end of a spawned task through [`JoinError`]: the task
//! either panicked or was aborted. This module maps both onto
//! [`SafeResult`], so spawned work is observed the same way as work wrapped
//! with [`safe_async`](super::safe_async).
//!
//! # Feature Flag
//!
//! Requires the `async-tokio` feature:
//!
//! ```toml
//! [dependencies]
//! safe-rail = { version = "0.3", features = ["async-tokio"] }
//! ```

use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use tokio::task::{JoinError, JoinHandle};

use crate::adapter::captured;
use crate::types::{Cancelled, Fault, SafeResult};

/// A spawned task whose outcome is a [`SafeResult`].
///
/// Aborting the task through [`SafeTask::abort`] makes it resolve to a
/// [`Fault::Cancelled`] failure; a panic inside the task resolves to a
/// [`Fault::Panic`] carrying the original payload.
///
/// # Example
///
/// ```rust,ignore
/// use safe_rail::async_ext::spawn_safe;
///
/// let task = spawn_safe(async { fetch_data().await });
/// task.abort();
/// assert!(task.await.failure().is_some_and(|fault| fault.is_cancelled()));
/// ```
#[derive(Debug)]
#[must_use = "futures do nothing unless polled"]
pub struct SafeTask<T> {
    handle: JoinHandle<T>,
    done: bool,
}

impl<T> SafeTask<T> {
    /// Requests cancellation of the task.
    #[inline]
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns `true` once the task has stopped running.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl<T> From<JoinHandle<T>> for SafeTask<T> {
    #[inline]
    fn from(handle: JoinHandle<T>) -> Self {
        Self { handle, done: false }
    }
}

impl<T> Future for SafeTask<T> {
    type Output = SafeResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let joined = match Pin::new(&mut self.handle).poll(cx) {
            Poll::Ready(joined) => joined,
            Poll::Pending => return Poll::Pending,
        };
        self.done = true;
        Poll::Ready(from_join(joined))
    }
}

impl<T> FusedFuture for SafeTask<T> {
    #[inline]
    fn is_terminated(&self) -> bool {
        self.done
    }
}

/// Spawns `future` on the current Tokio runtime.
///
/// # Panics
///
/// Panics if called outside a Tokio runtime, like [`tokio::spawn`].
pub fn spawn_safe<Fut>(future: Fut) -> SafeTask<Fut::Output>
where
    Fut: Future + Send + 'static,
    Fut::Output: Send + 'static,
{
    SafeTask::from(tokio::spawn(future))
}

/// Awaits an existing task handle, turning its [`JoinError`] into a failure.
///
/// # Example
///
/// ```rust,ignore
/// use safe_rail::async_ext::join_safe;
///
/// let handle = tokio::spawn(async { 42 });
/// assert_eq!(join_safe(handle).await.unwrap(), 42);
/// ```
pub async fn join_safe<T>(handle: JoinHandle<T>) -> SafeResult<T> {
    SafeTask::from(handle).await
}

fn from_join<T>(joined: Result<T, JoinError>) -> SafeResult<T> {
    match joined {
        Ok(value) => SafeResult::of_value(value),
        Err(error) => match error.try_into_panic() {
            Ok(payload) => captured(Fault::from_panic(payload)),
            Err(error) => captured(Fault::Cancelled(Cancelled::with_reason(error.to_string()))),
        },
    }
}
