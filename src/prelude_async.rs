//! Async prelude - all async utilities in one import.
//!
//! Re-exports everything from the sync [`prelude`](crate::prelude) plus the
//! async adapter.
//!
//! # Usage
//!
//! ```ignore
//! use safe_rail::prelude_async::*;
//!
//! let fetch = safe_async(|id: u64| fetch_user(id));
//! let user = fetch(7).cancel_on(shutdown.cancelled_owned()).await;
//! ```
//!
//! # What's Included
//!
//! ## From Sync Prelude
//!
//! - **Macros**: [`safe_fn!`]
//! - **Types**: [`SafeResult`], [`Fault`], [`FaultKind`], [`Cancelled`]
//! - **Adapters**: [`safe`], [`capture`]
//!
//! ## Async-Specific
//!
//! - **Adapter**: [`safe_async`](crate::async_ext::safe_async)
//! - **Types**: [`SafeFuture`](crate::async_ext::SafeFuture)
//! - **Tokio** (`async-tokio`): `spawn_safe`, `join_safe`, `SafeTask`

// Re-export everything from sync prelude
pub use crate::prelude::*;

// Async-specific exports
pub use crate::async_ext::{safe_async, SafeFuture};

#[cfg(feature = "async-tokio")]
pub use crate::async_ext::{join_safe, spawn_safe, SafeTask};
