//! safe-rail turns abrupt failure into a value. It supplies one container,
//! [`SafeResult`], and two adapters: [`safe`] for ordinary callables and
//! [`async_ext::safe_async`] for future-returning ones. A wrapped callable
//! never unwinds; it returns a `SafeResult` holding either its value or the
//! captured [`Fault`].
//!
//! Each submodule re-exports its public surface from here, so consumers can
//! simply depend on `safe_rail::*` or pick focused pieces as needed.
//!
//! # Examples
//!
//! ## Wrapping a Function
//!
//! ```
//! use safe_rail::{safe, FaultKind};
//!
//! let divide = safe(|(a, b): (i32, i32)| a / b);
//!
//! assert_eq!(divide((10, 2)).unwrap(), 5);
//!
//! let failed = divide((10, 0));
//! assert!(failed.is_failure());
//! assert_eq!(failed.failure().map(|f| f.kind()), Some(FaultKind::Panic));
//! assert_eq!(failed.unwrap_or(0), 0);
//! ```
//!
//! ## Declaring Wrapped Functions
//!
//! ```
//! use safe_rail::safe_fn;
//!
//! safe_fn! {
//!     /// Reads an element by position.
//!     pub fn element(items: &[i32], index: usize) -> i32 {
//!         items[index]
//!     }
//! }
//!
//! assert_eq!(element(&[1, 2, 3], 1).unwrap(), 2);
//! assert!(element(&[1, 2, 3], 10).is_failure());
//! ```
//!
//! ## Building Results Directly
//!
//! ```
//! use safe_rail::SafeResult;
//!
//! let ok: SafeResult<&str, std::io::Error> = SafeResult::of_value("ready");
//! assert_eq!(ok.to_string(), "ready");
//!
//! let err: SafeResult<&str, std::io::Error> =
//!     SafeResult::of_failure(std::io::Error::other("disk unplugged"));
//! assert_eq!(err.to_string(), "Error: disk unplugged");
//! ```

/// Synchronous wrapping adapter
pub mod adapter;
/// Definition-time wrapping macros
pub mod macros;
/// Convenience re-exports for quick starts
pub mod prelude;
/// Core traits for failure values
pub mod traits;
/// SafeResult and failure structures
pub mod types;

/// Async extensions (requires `async` feature)
#[cfg(feature = "async")]
pub mod async_ext;

/// Async prelude - all async utilities in one import (requires `async` feature)
#[cfg(feature = "async")]
pub mod prelude_async;

/// Tower integration - Layer and Service implementations (requires `tower` feature)
#[cfg(feature = "tower")]
pub mod tower;

pub use adapter::{capture, safe};
pub use traits::Failure;
pub use types::{
    diagnostic_capture, set_diagnostic_capture, BoxError, Cancelled, DiagnosticCapture, Fault,
    FaultKind, Panicked, SafeResult,
};
