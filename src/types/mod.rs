//! Result container and failure types.
//!
//! This module provides [`SafeResult`], the container every adapter returns,
//! and [`Fault`], the failure the adapters put in it.
//!
//! # Examples
//!
//! ```
//! use safe_rail::{Fault, SafeResult};
//!
//! let result: SafeResult<(), Fault> = SafeResult::of_failure(Fault::error("quota exceeded"));
//!
//! assert!(result.is_failure());
//! println!("{:?}", result);
//! // Output: SafeResult { failure: Error("quota exceeded") }
//! ```
pub mod diagnostic;
pub mod fault;
pub(crate) mod panic_origin;
pub mod safe_result;

pub use diagnostic::*;
pub use fault::*;
pub use safe_result::*;
