//! Construction interception for arbitrary constructible types.
//!
//! Where [`SelfCaching`](crate::SelfCaching) requires a type to manage its own
//! slot, this module intercepts the construction of *any* type implementing
//! [`Construct`], without the type opting in to caching: the type defines
//! only its normal constructor, and [`instance`] does the rest.
//!
//! # Arguments are captured once
//!
//! The first call to [`instance`] for a type constructs it with the supplied
//! arguments. Every later call returns the cached instance unconditionally
//! and **silently discards its arguments**. Passing different arguments on
//! the second call therefore has no effect, which is surprising enough that
//! the test suite verifies it explicitly.
//!
//! # Examples
//!
//! ```
//! use singleton_strategies::intercept::{self, Construct};
//! use std::sync::Arc;
//!
//! struct Endpoint {
//!     port: u16,
//! }
//!
//! impl Construct for Endpoint {
//!     type Args = u16;
//!
//!     fn construct(port: u16) -> Self {
//!         Endpoint { port }
//!     }
//! }
//!
//! let one = intercept::instance::<Endpoint>(8080).unwrap();
//! let two = intercept::instance::<Endpoint>(9999).unwrap();
//!
//! // The second request's arguments were discarded.
//! assert_eq!(two.port, 8080);
//! assert!(Arc::ptr_eq(&one, &two));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::singleton_event::{emit, SingletonEvent, Strategy};
use crate::SingletonError;

/// One cached instance per intercepted type.
///
/// The mutex is held across the check-and-insert in `instance`, so two racing
/// first constructions yield the same instance.
static INSTANCES: LazyLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// A type constructible through [`instance`].
///
/// Implementors define their normal constructor; caching happens outside the
/// type, in this module.
pub trait Construct: Send + Sync + Sized + 'static {
    /// Arguments the constructor takes. Use a tuple for more than one.
    type Args;

    /// The normal allocation path, invoked at most once per type.
    ///
    /// Must not call [`instance`] for any type; the instance lock is held
    /// while it runs.
    fn construct(args: Self::Args) -> Self;
}

/// Intercepts a construction request for `T`.
///
/// The first call per type constructs with `args` and caches the instance;
/// later calls return the cached instance and discard `args` (see the module
/// documentation).
///
/// # Errors
///
/// - The instance lock is poisoned
pub fn instance<T: Construct>(args: T::Args) -> Result<Arc<T>, SingletonError> {
    let mut instances = INSTANCES.lock().map_err(|_| SingletonError::LockPoisoned)?;

    let reused = instances.contains_key(&TypeId::of::<T>());
    // An existing entry leaves the closure uncalled, dropping `args` unused.
    let cached = instances
        .entry(TypeId::of::<T>())
        .or_insert_with(|| Arc::new(T::construct(args)) as Arc<dyn Any + Send + Sync>)
        .clone();

    drop(instances);

    emit(&SingletonEvent::Construct {
        strategy: Strategy::Intercept,
        type_name: std::any::type_name::<T>(),
        reused,
    });

    // The entry was stored under T's own TypeId, so the downcast only fails
    // if the map was corrupted (extremely rare).
    cached
        .downcast::<T>()
        .map_err(|_| SingletonError::SlotMismatch {
            type_name: std::any::type_name::<T>(),
        })
}

/// Whether an instance of `T` has been constructed yet.
///
/// # Errors
///
/// - The instance lock is poisoned
pub fn is_cached<T: Construct>() -> Result<bool, SingletonError> {
    let found = INSTANCES
        .lock()
        .map(|instances| instances.contains_key(&TypeId::of::<T>()))
        .map_err(|_| SingletonError::LockPoisoned)?;

    emit(&SingletonEvent::Cached {
        strategy: Strategy::Intercept,
        type_name: std::any::type_name::<T>(),
        found,
    });

    Ok(found)
}

/// Drops every cached instance. Test support only.
///
/// Already-retrieved `Arc` handles remain valid; only future requests
/// construct anew.
#[doc(hidden)]
pub fn reset() {
    emit(&SingletonEvent::Reset {
        strategy: Strategy::Intercept,
    });

    if let Ok(mut instances) = INSTANCES.lock() {
        instances.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct Endpoint {
        port: u16,
    }

    impl Construct for Endpoint {
        type Args = u16;

        fn construct(port: u16) -> Self {
            Endpoint { port }
        }
    }

    struct Plain;

    impl Construct for Plain {
        type Args = ();

        fn construct(_args: ()) -> Self {
            Plain
        }
    }

    #[test]
    #[serial]
    fn test_instance_is_cached_after_first_call() {
        reset();

        assert!(!is_cached::<Endpoint>().unwrap());

        let one = instance::<Endpoint>(8080).unwrap();
        assert!(is_cached::<Endpoint>().unwrap());

        let two = instance::<Endpoint>(8080).unwrap();
        assert!(Arc::ptr_eq(&one, &two));
    }

    #[test]
    #[serial]
    fn test_later_arguments_are_discarded() {
        reset();

        let one = instance::<Endpoint>(8080).unwrap();
        let two = instance::<Endpoint>(9999).unwrap();

        assert_eq!(one.port, 8080);
        assert_eq!(two.port, 8080);
    }

    #[test]
    #[serial]
    fn test_types_are_cached_independently() {
        reset();

        let endpoint = instance::<Endpoint>(8080).unwrap();
        let plain = instance::<Plain>(()).unwrap();

        assert_eq!(endpoint.port, 8080);
        assert!(is_cached::<Plain>().unwrap());
        drop(plain);
    }

    #[test]
    #[serial]
    fn test_reset_empties_the_cache() {
        reset();

        let before = instance::<Endpoint>(8080).unwrap();
        reset();
        assert!(!is_cached::<Endpoint>().unwrap());

        let after = instance::<Endpoint>(1234).unwrap();
        assert_eq!(before.port, 8080);
        assert_eq!(after.port, 1234);
        assert!(!Arc::ptr_eq(&before, &after));
    }
}
