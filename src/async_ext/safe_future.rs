//! Future wrapper that never panics and absorbs cancellation.
//!
//! [`SafeFuture`] polls an inner future under `catch_unwind` and, when given a
//! cancellation signal with [`SafeFuture::cancel_on`], resolves to a
//! [`Fault::Cancelled`] result as soon as the signal fires while the inner
//! future is suspended.

use core::future::{self, Future};
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;

use crate::adapter::captured;
use crate::types::panic_origin::catch;
use crate::types::{Cancelled, Fault, SafeResult};

pin_project! {
    #[project = StageProj]
    enum Stage<Fut> {
        Running {
            #[pin]
            future: Fut,
        },
        Failed {
            fault: Option<Fault>,
        },
        Done,
    }
}

pin_project! {
    /// A future that resolves to a [`SafeResult`] instead of panicking.
    ///
    /// Created by [`safe_async`](super::safe_async) or [`SafeFuture::new`].
    ///
    /// # Cancellation
    ///
    /// A signal attached with [`cancel_on`](SafeFuture::cancel_on) is polled
    /// before the inner future on every poll. Once it is ready the inner
    /// future is dropped and the result is a [`Fault::Cancelled`] failure.
    /// The cancellation is absorbed: it is reported as data and does not
    /// propagate further.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use safe_rail::async_ext::SafeFuture;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let result = SafeFuture::new(async { 21 * 2 }).await;
    ///     assert_eq!(result.unwrap(), 42);
    /// }
    /// ```
    #[must_use = "futures do nothing unless polled"]
    pub struct SafeFuture<Fut, C = future::Pending<()>> {
        #[pin]
        stage: Stage<Fut>,
        #[pin]
        signal: C,
    }
}

impl<Fut> SafeFuture<Fut> {
    /// Wraps `future` without a cancellation signal.
    #[inline]
    pub fn new(future: Fut) -> Self {
        Self { stage: Stage::Running { future }, signal: future::pending() }
    }

    /// A future that resolves immediately to `fault`.
    #[inline]
    pub(crate) fn failed(fault: Fault) -> Self {
        Self { stage: Stage::Failed { fault: Some(fault) }, signal: future::pending() }
    }
}

impl<Fut, C> SafeFuture<Fut, C> {
    /// Attaches a cancellation signal, replacing any previous one.
    ///
    /// Any `Future<Output = ()>` works: a timer, a oneshot receiver mapped to
    /// `()`, or a cancellation token's wait future.
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use safe_rail::async_ext::SafeFuture;
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let result = SafeFuture::new(tokio::time::sleep(Duration::from_secs(60)))
    ///         .cancel_on(tokio::time::sleep(Duration::from_millis(5)))
    ///         .await;
    ///     assert!(result.failure().is_some_and(|fault| fault.is_cancelled()));
    /// }
    /// ```
    #[inline]
    pub fn cancel_on<S>(self, signal: S) -> SafeFuture<Fut, S>
    where
        S: Future<Output = ()>,
    {
        SafeFuture { stage: self.stage, signal }
    }
}

impl<Fut, C> Future for SafeFuture<Fut, C>
where
    Fut: Future,
    C: Future<Output = ()>,
{
    type Output = SafeResult<Fut::Output>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut this = self.project();

        let outcome = match this.stage.as_mut().project() {
            StageProj::Running { future } => {
                if this.signal.as_mut().poll(cx).is_ready() {
                    Err(Fault::Cancelled(Cancelled::new()))
                } else {
                    match catch(|| future.poll(cx)) {
                        Ok(Poll::Pending) => return Poll::Pending,
                        Ok(Poll::Ready(value)) => Ok(value),
                        Err(fault) => Err(fault),
                    }
                }
            },
            StageProj::Failed { fault } => {
                Err(fault.take().expect("SafeFuture polled after completion; this is a bug"))
            },
            StageProj::Done => panic!("SafeFuture polled after completion"),
        };

        // Drops the inner future before the result is handed out. A panicking
        // destructor is reported unless a failure is already held.
        let outcome = match (catch(|| this.stage.set(Stage::Done)), outcome) {
            (Err(fault), Ok(_)) => Err(fault),
            (_, outcome) => outcome,
        };

        Poll::Ready(match outcome {
            Ok(value) => SafeResult::of_value(value),
            Err(fault) => captured(fault),
        })
    }
}

impl<Fut, C> FusedFuture for SafeFuture<Fut, C>
where
    Fut: Future,
    C: Future<Output = ()>,
{
    fn is_terminated(&self) -> bool {
        matches!(self.stage, Stage::Done)
    }
}
