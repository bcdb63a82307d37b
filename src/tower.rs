//! Tower integration for safe-rail.
//!
//! This module provides a Tower `Layer` and `Service` that apply the
//! wrapping adapter at a service boundary: the wrapped service never fails,
//! and every response is a [`SafeResult`] holding either the inner response
//! or the captured [`Fault`].
//!
//! # Feature Flag
//!
//! Requires the `tower` feature:
//!
//! ```toml
//! [dependencies]
//! safe-rail = { version = "0.3", features = ["tower"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use safe_rail::tower::SafeLayer;
//! use tower::ServiceBuilder;
//!
//! let service = ServiceBuilder::new()
//!     .layer(SafeLayer::new())
//!     .service(my_service);
//! ```

use core::convert::Infallible;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

use futures_core::future::FusedFuture;
use pin_project_lite::pin_project;
use tower::{Layer, Service};

use crate::adapter::record;
use crate::async_ext::SafeFuture;
use crate::types::panic_origin::catch;
use crate::types::{BoxError, Fault, SafeResult};

/// A Tower [`Layer`] that wraps services in [`SafeService`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SafeLayer;

impl SafeLayer {
    /// Creates a new `SafeLayer`.
    #[inline]
    pub const fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for SafeLayer {
    type Service = SafeService<S>;

    #[inline]
    fn layer(&self, inner: S) -> Self::Service {
        SafeService::new(inner)
    }
}

/// A Tower [`Service`] whose calls always succeed with a [`SafeResult`].
///
/// - An error returned by the inner service becomes [`Fault::Error`].
/// - A panic in `poll_ready`, `call` or the response future becomes
///   [`Fault::Panic`].
/// - A readiness failure is reported as the response to the next call, so
///   `poll_ready` itself never fails.
#[derive(Debug)]
pub struct SafeService<S> {
    inner: S,
    pending: Option<Fault>,
}

impl<S> SafeService<S> {
    /// Creates a new `SafeService` wrapping the given service.
    #[inline]
    pub const fn new(inner: S) -> Self {
        Self { inner, pending: None }
    }

    /// Returns a reference to the inner service.
    #[inline]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns a mutable reference to the inner service.
    #[inline]
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the wrapper and returns the inner service.
    #[inline]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Clone> Clone for SafeService<S> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<S, Request> Service<Request> for SafeService<S>
where
    S: Service<Request>,
    S::Error: Into<BoxError>,
{
    type Response = SafeResult<S::Response>;
    type Error = Infallible;
    type Future = SafeServiceFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        if self.pending.is_some() {
            return Poll::Ready(Ok(()));
        }

        let inner = &mut self.inner;
        match catch(|| inner.poll_ready(cx)) {
            Ok(Poll::Pending) => Poll::Pending,
            Ok(Poll::Ready(Ok(()))) => Poll::Ready(Ok(())),
            Ok(Poll::Ready(Err(error))) => {
                self.pending = Some(Fault::error(error));
                Poll::Ready(Ok(()))
            },
            Err(fault) => {
                self.pending = Some(fault);
                Poll::Ready(Ok(()))
            },
        }
    }

    fn call(&mut self, request: Request) -> Self::Future {
        if let Some(fault) = self.pending.take() {
            return SafeServiceFuture::new(SafeFuture::failed(fault));
        }

        let inner = &mut self.inner;
        let future = match catch(|| inner.call(request)) {
            Ok(future) => SafeFuture::new(future),
            Err(fault) => SafeFuture::failed(fault),
        };
        SafeServiceFuture::new(future)
    }
}

pin_project! {
    /// Future returned by [`SafeService`].
    #[must_use = "futures do nothing unless polled"]
    pub struct SafeServiceFuture<F> {
        #[pin]
        inner: SafeFuture<F>,
    }
}

impl<F> SafeServiceFuture<F> {
    #[inline]
    fn new(inner: SafeFuture<F>) -> Self {
        Self { inner }
    }
}

impl<F, T, E> Future for SafeServiceFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    type Output = Result<SafeResult<T>, Infallible>;

    #[inline]
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.project().inner.poll(cx).map(|result| {
            let returned_error = result.value().is_some_and(Result::is_err);
            let result = result.flatten();
            if returned_error {
                if let Some(fault) = result.failure() {
                    record(fault);
                }
            }
            Ok(result)
        })
    }
}

impl<F, T, E> FusedFuture for SafeServiceFuture<F>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    #[inline]
    fn is_terminated(&self) -> bool {
        self.inner.is_terminated()
    }
}

/// Extension trait for easily wrapping services in [`SafeService`].
pub trait ServiceSafeExt<Request>: Service<Request> + Sized {
    /// Wraps this service so that its calls never fail.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use safe_rail::tower::ServiceSafeExt;
    ///
    /// let wrapped = my_service.into_safe();
    /// ```
    fn into_safe(self) -> SafeService<Self> {
        SafeService::new(self)
    }
}

impl<S, Request> ServiceSafeExt<Request> for S where S: Service<Request> {}
