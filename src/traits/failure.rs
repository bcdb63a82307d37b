//! The bound on the failure slot of a [`SafeResult`](crate::SafeResult).
//!
//! Anything stored as a failure must describe itself (`Display`), may carry
//! an originating context, and knows how to be raised again when a caller
//! asks for the value with [`SafeResult::unwrap`](crate::SafeResult::unwrap).
//!
//! # Examples
//!
//! ```
//! use safe_rail::traits::Failure;
//! use safe_rail::SafeResult;
//!
//! #[derive(Debug)]
//! struct Overdrawn {
//!     account: u32,
//! }
//!
//! impl std::fmt::Display for Overdrawn {
//!     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
//!         write!(f, "account {} is overdrawn", self.account)
//!     }
//! }
//!
//! impl Failure for Overdrawn {}
//!
//! let result: SafeResult<u64, Overdrawn> = SafeResult::of_failure(Overdrawn { account: 7 });
//! assert_eq!(result.to_string(), "Error: account 7 is overdrawn");
//! ```
use core::fmt;
use std::borrow::Cow;

use crate::types::{BoxError, Cancelled, Fault, Panicked};

/// A value that can occupy the failure slot of a [`SafeResult`](crate::SafeResult).
pub trait Failure: fmt::Display + fmt::Debug + Send + 'static {
    /// Short label naming the kind of failure, used as the first word of a
    /// diagnostic. Defaults to the type name.
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(core::any::type_name::<Self>())
    }

    /// Where the failure originated, if the failure itself knows.
    ///
    /// When present it is used as the diagnostic instead of a backtrace.
    fn origin(&self) -> Option<String> {
        None
    }

    /// Returns `true` if this failure represents a cancellation.
    fn is_cancellation(&self) -> bool {
        false
    }

    /// Raises this failure as an unwinding panic whose payload is the failure
    /// itself, so `catch_unwind` callers can downcast to the original type.
    fn resume(self) -> !
    where
        Self: Sized,
    {
        std::panic::panic_any(self)
    }
}

impl Failure for Fault {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.kind().as_str())
    }

    fn origin(&self) -> Option<String> {
        self.as_panic().and_then(Panicked::origin).map(str::to_owned)
    }

    fn is_cancellation(&self) -> bool {
        self.is_cancelled()
    }

    /// Panics resume their original payload; other faults unwind with the
    /// inner value (the boxed error or the [`Cancelled`] signal).
    fn resume(self) -> ! {
        match self {
            Fault::Panic(panicked) => panicked.resume(),
            Fault::Error(error) => std::panic::panic_any(error),
            Fault::Cancelled(cancelled) => std::panic::panic_any(cancelled),
        }
    }
}

impl Failure for Panicked {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("panic")
    }

    fn origin(&self) -> Option<String> {
        Panicked::origin(self).map(str::to_owned)
    }

    fn resume(self) -> ! {
        Panicked::resume(self)
    }
}

impl Failure for Cancelled {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("cancelled")
    }

    fn is_cancellation(&self) -> bool {
        true
    }
}

impl Failure for BoxError {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("error")
    }
}

impl Failure for std::io::Error {}

impl Failure for String {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("error")
    }
}

impl Failure for &'static str {
    fn label(&self) -> Cow<'static, str> {
        Cow::Borrowed("error")
    }
}
