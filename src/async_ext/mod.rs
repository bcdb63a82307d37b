//! Async extensions for safe-rail.
//!
//! This module provides the asynchronous counterpart of [`safe`](crate::safe):
//! [`safe_async`] wraps a future-returning callable so the future it returns
//! resolves to a [`SafeResult`](crate::SafeResult), whether the operation
//! completes, panics at any point while suspended, or is cancelled.
//!
//! # Feature Flag
//!
//! Requires the `async` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! safe-rail = { version = "0.3", features = ["async"] }
//! ```
//!
//! # Examples
//!
//! ```ignore
//! use safe_rail::prelude_async::*;
//!
//! let fetch = safe_async(|id: u64| fetch_user(id));
//!
//! match fetch(7).await.into_result() {
//!     Ok(user) => println!("{user:?}"),
//!     Err(fault) if fault.is_cancelled() => println!("cancelled"),
//!     Err(fault) => eprintln!("{fault}"),
//! }
//! ```

use core::future::Future;

use crate::types::panic_origin::catch;

mod safe_future;
#[cfg(feature = "async-tokio")]
mod tokio_ext;

pub use safe_future::SafeFuture;
#[cfg(feature = "async-tokio")]
pub use tokio_ext::{join_safe, spawn_safe, SafeTask};

/// Wraps a future-returning callable so that awaiting its result never
/// panics.
///
/// The call to `f` itself and every poll of the returned future run under
/// `catch_unwind`. Attach a cancellation signal to the returned
/// [`SafeFuture`] with [`cancel_on`](SafeFuture::cancel_on).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use safe_rail::async_ext::safe_async;
///
/// async fn slow_fail() -> u32 {
///     tokio::time::sleep(Duration::from_millis(1)).await;
///     panic!("async error")
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let run = safe_async(|()| slow_fail());
///     let result = run(()).await;
///     assert!(result.to_string().contains("async error"));
/// }
/// ```
pub fn safe_async<A, Fut, F>(f: F) -> impl Fn(A) -> SafeFuture<Fut>
where
    F: Fn(A) -> Fut,
    Fut: Future,
{
    move |args| match catch(|| f(args)) {
        Ok(future) => SafeFuture::new(future),
        Err(fault) => SafeFuture::failed(fault),
    }
}
