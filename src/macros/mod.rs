//! Definition-time wrapping.
//!
//! - [`macro@crate::safe_fn`] - Declares functions whose bodies run under the
//!   wrapping adapters. The generated function keeps its name, doc comments,
//!   attributes, visibility and argument list; only its return type changes
//!   from `T` to [`SafeResult<T>`](crate::SafeResult).
//!
//! # Examples
//!
//! ```
//! use safe_rail::safe_fn;
//!
//! safe_fn! {
//!     /// Looks up the third reading.
//!     pub fn third(readings: &[u32]) -> u32 {
//!         readings[2]
//!     }
//! }
//!
//! assert_eq!(third(&[1, 2, 3]).unwrap(), 3);
//! assert!(third(&[1]).to_string().contains("index out of bounds"));
//! ```

/// Declares one or more functions whose bodies never unwind out of the call.
///
/// A synchronous `fn name(args) -> T { body }` becomes
/// `fn name(args) -> SafeResult<T>` running `body` through
/// [`capture`](crate::capture). An `async fn` becomes an `async fn` returning
/// `SafeResult<T>` that awaits `body` through
/// [`SafeFuture`](crate::async_ext::SafeFuture) (requires the `async`
/// feature). Omitting `-> T` means `-> ()`.
///
/// Arguments must be plain identifiers; generics and `where` clauses are not
/// supported. `return` inside the body returns from the wrapped body.
///
/// # Examples
///
/// ```
/// use safe_rail::{safe_fn, FaultKind};
///
/// safe_fn! {
///     /// Integer division.
///     fn divide(a: i32, b: i32) -> i32 {
///         a / b
///     }
///
///     fn check(limit: usize, len: usize) {
///         assert!(len <= limit, "too long");
///     }
/// }
///
/// assert_eq!(divide(10, 2).unwrap(), 5);
/// assert_eq!(divide(10, 0).failure().map(|f| f.kind()), Some(FaultKind::Panic));
/// assert!(check(4, 8).is_failure());
/// ```
#[macro_export]
macro_rules! safe_fn {
    () => {};
    (
        $(#[$meta:meta])*
        $vis:vis async fn $name:ident ( $($arg:ident : $ty:ty),* $(,)? ) $(-> $ret:ty)? $body:block
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis async fn $name($($arg: $ty),*) -> $crate::SafeResult<$crate::__safe_fn_ret!($($ret)?)> {
            $crate::async_ext::SafeFuture::new(async move { $body }).await
        }

        $crate::safe_fn! { $($rest)* }
    };
    (
        $(#[$meta:meta])*
        $vis:vis fn $name:ident ( $($arg:ident : $ty:ty),* $(,)? ) $(-> $ret:ty)? $body:block
        $($rest:tt)*
    ) => {
        $(#[$meta])*
        $vis fn $name($($arg: $ty),*) -> $crate::SafeResult<$crate::__safe_fn_ret!($($ret)?)> {
            $crate::capture(move || -> $crate::__safe_fn_ret!($($ret)?) { $body })
        }

        $crate::safe_fn! { $($rest)* }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __safe_fn_ret {
    () => {
        ()
    };
    ($ret:ty) => {
        $ret
    };
}
