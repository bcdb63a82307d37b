//! Convenience re-exports for common usage patterns.
//!
//! ```
//! use safe_rail::prelude::*;
//! ```
//!
//! # What's Included
//!
//! - **Macros**: [`safe_fn!`]
//! - **Adapters**: [`safe`], [`capture`]
//! - **Types**: [`SafeResult`], [`Fault`], [`FaultKind`], [`Cancelled`]
//! - **Traits**: [`Failure`]
//!
//! # Examples
//!
//! ```
//! use safe_rail::prelude::*;
//!
//! fn load(path: &str) -> SafeResult<String> {
//!     capture(|| std::fs::read_to_string(path)).flatten()
//! }
//!
//! let result = load("does/not/exist.toml");
//! assert_eq!(result.failure().map(Fault::kind), Some(FaultKind::Error));
//! ```

// Macros
pub use crate::safe_fn;

// Adapters
pub use crate::adapter::{capture, safe};

// Core types
pub use crate::types::{Cancelled, Fault, FaultKind, SafeResult};

// Traits
pub use crate::traits::Failure;
