//! Core traits.
//!
//! - [`Failure`]: the bound on what a [`SafeResult`](crate::SafeResult) may
//!   hold as its failure
//!
//! # Examples
//!
//! ```
//! use safe_rail::traits::Failure;
//! use safe_rail::{Cancelled, Fault};
//!
//! assert!(Fault::from(Cancelled::new()).is_cancellation());
//! assert!(!Fault::error("io").is_cancellation());
//! ```

pub mod failure;

pub use failure::Failure;
