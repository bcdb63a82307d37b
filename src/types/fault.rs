//! The built-in failure type produced by the wrapping adapters.
//!
//! A [`Fault`] records *how* a wrapped operation failed:
//!
//! - [`Fault::Panic`] - the callable panicked; the original payload is kept so
//!   it can be resumed unchanged.
//! - [`Fault::Error`] - the callable handed back an error value.
//! - [`Fault::Cancelled`] - an async operation was cancelled while suspended.
//!
//! # Examples
//!
//! ```
//! use safe_rail::{Fault, FaultKind};
//!
//! let payload = std::panic::catch_unwind(|| {
//!     let items: Vec<u8> = Vec::new();
//!     items[3]
//! })
//! .unwrap_err();
//!
//! let fault = Fault::from_panic(payload);
//! assert_eq!(fault.kind(), FaultKind::Panic);
//! assert!(fault.to_string().contains("index out of bounds"));
//! ```
use core::any::Any;
use core::fmt;
use std::borrow::Cow;
use std::error::Error;
use std::sync::{Mutex, PoisonError};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Boxed, thread-safe error value carried by [`Fault::Error`].
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Discriminant of a [`Fault`], for branching without matching on payloads.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The callable panicked.
    Panic,
    /// The callable returned an error value.
    Error,
    /// The operation was cancelled.
    Cancelled,
}

impl FaultKind {
    /// Short lowercase label, as used in diagnostics and logs.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            FaultKind::Panic => "panic",
            FaultKind::Error => "error",
            FaultKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure captured by the adapters.
#[derive(Debug)]
pub enum Fault {
    /// A panic unwound out of the wrapped callable.
    Panic(Panicked),
    /// The wrapped callable produced an error value.
    Error(BoxError),
    /// The wrapped operation was cancelled before it finished.
    Cancelled(Cancelled),
}

impl Fault {
    /// Classifies a payload obtained from [`std::panic::catch_unwind`].
    ///
    /// A payload of type [`Cancelled`] (raised with
    /// `std::panic::panic_any(Cancelled::new())`) becomes
    /// [`Fault::Cancelled`]; anything else becomes [`Fault::Panic`].
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        match payload.downcast::<Cancelled>() {
            Ok(cancelled) => Fault::Cancelled(*cancelled),
            Err(payload) => Fault::Panic(Panicked::new(payload)),
        }
    }

    /// Like [`Fault::from_panic`], attaching the panic site recorded by the
    /// adapters.
    pub(crate) fn from_caught(payload: Box<dyn Any + Send>, origin: Option<String>) -> Self {
        match Fault::from_panic(payload) {
            Fault::Panic(panicked) => Fault::Panic(Panicked { origin, ..panicked }),
            fault => fault,
        }
    }

    /// Wraps an error value.
    #[inline]
    pub fn error<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Fault::Error(error.into())
    }

    /// Returns the kind of this fault.
    #[inline]
    pub fn kind(&self) -> FaultKind {
        match self {
            Fault::Panic(_) => FaultKind::Panic,
            Fault::Error(_) => FaultKind::Error,
            Fault::Cancelled(_) => FaultKind::Cancelled,
        }
    }

    /// Returns `true` if the callable panicked.
    #[inline]
    pub fn is_panic(&self) -> bool {
        matches!(self, Fault::Panic(_))
    }

    /// Returns `true` if the callable produced an error value.
    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Fault::Error(_))
    }

    /// Returns `true` if the operation was cancelled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Fault::Cancelled(_))
    }

    /// Returns the captured panic, if any.
    #[inline]
    pub fn as_panic(&self) -> Option<&Panicked> {
        match self {
            Fault::Panic(panicked) => Some(panicked),
            _ => None,
        }
    }

    /// Attempts to view the carried error as a concrete type.
    ///
    /// Works for [`Fault::Error`] and, with `E = Cancelled`, for
    /// [`Fault::Cancelled`]. Panics are inspected through [`Fault::as_panic`].
    pub fn downcast_ref<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        match self {
            Fault::Error(error) => error.downcast_ref::<E>(),
            Fault::Cancelled(cancelled) => (cancelled as &dyn Error).downcast_ref::<E>(),
            Fault::Panic(_) => None,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Panic(panicked) => fmt::Display::fmt(panicked, f),
            Fault::Error(error) => fmt::Display::fmt(error, f),
            Fault::Cancelled(cancelled) => fmt::Display::fmt(cancelled, f),
        }
    }
}

impl Error for Fault {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Fault::Error(error) => Some(error.as_ref()),
            Fault::Cancelled(cancelled) => Some(cancelled),
            Fault::Panic(_) => None,
        }
    }
}

impl From<Panicked> for Fault {
    #[inline]
    fn from(panicked: Panicked) -> Self {
        Fault::Panic(panicked)
    }
}

impl From<Cancelled> for Fault {
    #[inline]
    fn from(cancelled: Cancelled) -> Self {
        Fault::Cancelled(cancelled)
    }
}

impl From<BoxError> for Fault {
    #[inline]
    fn from(error: BoxError) -> Self {
        Fault::Error(error)
    }
}

/// A panic captured while running a wrapped callable.
///
/// The original payload is retained behind a mutex so `Panicked` stays `Sync`
/// even though panic payloads are only `Send`.
pub struct Panicked {
    message: Option<String>,
    origin: Option<String>,
    payload: Mutex<Box<dyn Any + Send>>,
}

impl Panicked {
    /// Wraps a panic payload, extracting its message when it is a string.
    pub fn new(payload: Box<dyn Any + Send>) -> Self {
        let message = payload
            .downcast_ref::<&'static str>()
            .map(|message| (*message).to_owned())
            .or_else(|| payload.downcast_ref::<String>().cloned());
        Self { message, origin: None, payload: Mutex::new(payload) }
    }

    /// The panic message, or `None` for non-string payloads.
    #[inline]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Where the panic was raised (`file:line:column`, followed by a
    /// backtrace when one was captured), if it was caught by an adapter.
    #[inline]
    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Returns `true` if the original payload is of type `P`.
    pub fn payload_is<P: Any>(&self) -> bool {
        self.payload.lock().unwrap_or_else(PoisonError::into_inner).is::<P>()
    }

    /// Consumes the capture and returns the original payload.
    pub fn into_payload(self) -> Box<dyn Any + Send> {
        self.payload.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Continues unwinding with the original payload.
    ///
    /// The panic hook is not invoked again.
    pub fn resume(self) -> ! {
        std::panic::resume_unwind(self.into_payload())
    }
}

impl fmt::Debug for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panicked").field("message", &self.message()).finish_non_exhaustive()
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message().unwrap_or("Box<dyn Any>"))
    }
}

/// Cancellation signal captured from an async operation.
///
/// Raising it with `std::panic::panic_any(Cancelled::new())` from inside a
/// wrapped operation is classified as a cancellation, not a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cancelled {
    reason: Option<Cow<'static, str>>,
}

impl Cancelled {
    /// Cancellation without a reason.
    #[inline]
    pub const fn new() -> Self {
        Self { reason: None }
    }

    /// Cancellation with a human-readable reason.
    #[inline]
    pub fn with_reason(reason: impl Into<Cow<'static, str>>) -> Self {
        Self { reason: Some(reason.into()) }
    }

    /// Returns the reason, if one was given.
    #[inline]
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "operation cancelled: {}", reason),
            None => f.write_str("operation cancelled"),
        }
    }
}

impl Error for Cancelled {}
