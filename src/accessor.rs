//! Cached-accessor factories.
//!
//! [`singleton`] wraps a constructor closure and hands back an [`Accessor`]:
//! a zero-argument entry point over a private cache. The first call to
//! [`Accessor::get`] runs the constructor; every later call returns the
//! cached `Arc`. Construction arguments are whatever the closure captured at
//! wrap time; nothing can be passed at call time.
//!
//! The accessor, not the type, becomes the public entry point. The idiomatic
//! deployment keeps the wrapped type private and exports only the accessor
//! (see [`define_accessor!`](crate::define_accessor)), after which downstream
//! code has no type to name, implement traits for, or match on.
//!
//! Each call to [`singleton`] owns an independent cache: wrapping the same
//! type twice yields two accessors with two instances.
//!
//! # Examples
//!
//! ```
//! use singleton_strategies::singleton;
//! use std::sync::Arc;
//!
//! struct AppConfig {
//!     retries: u32,
//! }
//!
//! // Construction arguments are fixed here, at wrap time.
//! let retries = 3;
//! let app_config = singleton(move || AppConfig { retries });
//!
//! let one = app_config.get();
//! let two = app_config.get();
//!
//! assert_eq!(two.retries, 3);
//! assert!(Arc::ptr_eq(&one, &two));
//! ```

use std::sync::{Arc, OnceLock};

use crate::singleton_event::{emit, SingletonEvent, Strategy};

/// Wraps a constructor into a zero-argument cached accessor.
///
/// The closure runs at most once, on the first [`Accessor::get`]. Anything
/// the instance needs must be captured by the closure now.
pub fn singleton<T, F>(construct: F) -> Accessor<T>
where
    T: Send + Sync + 'static,
    F: Fn() -> T + Send + Sync + 'static,
{
    Accessor {
        cache: OnceLock::new(),
        construct: Box::new(construct),
    }
}

/// A zero-argument accessor over a private instance cache.
///
/// Produced by [`singleton`]; there is no other way to build one.
pub struct Accessor<T> {
    cache: OnceLock<Arc<T>>,
    construct: Box<dyn Fn() -> T + Send + Sync>,
}

impl<T: Send + Sync + 'static> Accessor<T> {
    /// Returns the one cached instance, constructing it on first call.
    ///
    /// Concurrent first calls block until the constructor finishes; exactly
    /// one instance is ever built per accessor.
    pub fn get(&self) -> Arc<T> {
        let mut constructed = false;
        let cached = self
            .cache
            .get_or_init(|| {
                constructed = true;
                Arc::new((self.construct)())
            })
            .clone();

        emit(&SingletonEvent::Construct {
            strategy: Strategy::Accessor,
            type_name: std::any::type_name::<T>(),
            reused: !constructed,
        });

        cached
    }

    /// Whether the instance has been constructed yet.
    pub fn is_cached(&self) -> bool {
        let found = self.cache.get().is_some();

        emit(&SingletonEvent::Cached {
            strategy: Strategy::Accessor,
            type_name: std::any::type_name::<T>(),
            found,
        });

        found
    }
}
