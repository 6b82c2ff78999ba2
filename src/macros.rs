//! Macro for wiring a cached accessor into a module.
//!
//! The generated module owns a hidden static [`Accessor`](crate::Accessor)
//! and exposes only free functions, so the wrapped type can stay private to
//! the defining scope while the accessor is exported in its place.

/// Defines a module wrapping one cached accessor.
///
/// The macro generates a module containing:
/// - A hidden static `Accessor` built lazily from the given constructor
///   expression
/// - Free functions `get()` and `is_cached()` delegating to it
///
/// The constructor expression is evaluated at most once, on the first `get()`
/// anywhere in the process. Names in the expression resolve in the scope
/// surrounding the macro invocation.
///
/// # Examples
///
/// ```rust
/// use singleton_strategies::define_accessor;
/// use std::sync::Arc;
///
/// pub struct AppConfig {
///     pub retries: u32,
/// }
///
/// define_accessor!(app_config, AppConfig, AppConfig { retries: 3 });
///
/// fn main() {
///     let one = app_config::get();
///     let two = app_config::get();
///
///     assert_eq!(two.retries, 3);
///     assert!(Arc::ptr_eq(&one, &two));
/// }
/// ```
///
/// # Replacing the type with the accessor
///
/// Keep the type private and re-export only the module; downstream code then
/// interacts with `get()` alone and has no type to subclass-style extend or
/// match on:
///
/// ```rust
/// mod config {
///     use singleton_strategies::define_accessor;
///
///     struct Inner {
///         retries: u32,
///     }
///
///     define_accessor!(handle, Inner, Inner { retries: 3 });
///
///     pub fn retries() -> u32 {
///         handle::get().retries
///     }
/// }
///
/// assert_eq!(config::retries(), 3);
/// ```
#[macro_export]
macro_rules! define_accessor {
    ($name:ident, $ty:ty, $construct:expr) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            use std::sync::{Arc, LazyLock};

            // The accessor itself stays hidden; only the functions below are
            // part of the module's surface.
            static ACCESSOR: LazyLock<$crate::Accessor<$ty>> =
                LazyLock::new(|| $crate::singleton(|| $construct));

            /// Return the one cached instance, constructing it on first call.
            pub fn get() -> Arc<$ty> {
                ACCESSOR.get()
            }

            /// Whether the instance has been constructed yet.
            pub fn is_cached() -> bool {
                ACCESSOR.is_cached()
            }
        }
    };
}
