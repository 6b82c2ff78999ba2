//! Types that cache their own single instance.
//!
//! A type opts in by implementing [`SelfCaching`] with its normal allocation
//! path in [`construct`](SelfCaching::construct). Every call to
//! [`instance`](SelfCaching::instance) then returns one shared `Arc`: the
//! first call constructs and caches, later calls return the cached instance.
//!
//! # The shared-slot footgun
//!
//! The cache is keyed by [`slot`](SelfCaching::slot), which defaults to the
//! implementing type's own `TypeId`. A type may override `slot` to point at
//! another type's slot, and the two then contend for one cached instance:
//! whichever constructs first occupies the slot, and the other type's lookup
//! fails with [`SingletonError::SlotMismatch`]. This mirrors what happens when
//! a cached-instance slot is naively reused across a family of related types.
//! It is a documented footgun, not a feature.
//!
//! # Examples
//!
//! ```
//! use singleton_strategies::SelfCaching;
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use std::sync::Arc;
//!
//! struct Counter {
//!     a: AtomicI64,
//! }
//!
//! impl SelfCaching for Counter {
//!     fn construct() -> Self {
//!         Counter { a: AtomicI64::new(1) }
//!     }
//! }
//!
//! let one = Counter::instance().unwrap();
//! let two = Counter::instance().unwrap();
//!
//! // Both handles alias the one cached instance.
//! two.a.store(3, Ordering::SeqCst);
//! assert_eq!(one.a.load(Ordering::SeqCst), 3);
//! assert!(Arc::ptr_eq(&one, &two));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use crate::singleton_event::{emit, SingletonEvent, Strategy};
use crate::SingletonError;

/// Cached-instance slots for every `SelfCaching` type in the process.
///
/// The mutex is held across the check-and-insert in `instance`, so two racing
/// first constructions yield the same instance.
static SLOTS: LazyLock<Mutex<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// A type that intercepts its own construction and caches one instance.
pub trait SelfCaching: Send + Sync + Sized + 'static {
    /// The normal allocation path, invoked at most once per occupied slot.
    ///
    /// Must not call [`instance`](SelfCaching::instance) on any `SelfCaching`
    /// type; the slot lock is held while it runs.
    fn construct() -> Self;

    /// The cached-instance slot this type looks up.
    ///
    /// Defaults to the type's own `TypeId`. Overriding it to another type's
    /// slot reproduces the shared-slot footgun described in the module
    /// documentation.
    fn slot() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the one shared instance, constructing it on first call.
    ///
    /// # Errors
    ///
    /// - The slot is occupied by an instance of a different type
    ///   (shared-slot footgun)
    /// - The slot lock is poisoned
    fn instance() -> Result<Arc<Self>, SingletonError> {
        let mut slots = SLOTS.lock().map_err(|_| SingletonError::LockPoisoned)?;

        let reused = slots.contains_key(&Self::slot());
        let occupant = slots
            .entry(Self::slot())
            .or_insert_with(|| Arc::new(Self::construct()) as Arc<dyn Any + Send + Sync>)
            .clone();

        drop(slots);

        emit(&SingletonEvent::Construct {
            strategy: Strategy::SelfCaching,
            type_name: std::any::type_name::<Self>(),
            reused,
        });

        occupant
            .downcast::<Self>()
            .map_err(|_| SingletonError::SlotMismatch {
                type_name: std::any::type_name::<Self>(),
            })
    }

    /// Whether this type's slot is currently occupied.
    ///
    /// # Errors
    ///
    /// - The slot lock is poisoned
    fn is_cached() -> Result<bool, SingletonError> {
        let found = SLOTS
            .lock()
            .map(|slots| slots.contains_key(&Self::slot()))
            .map_err(|_| SingletonError::LockPoisoned)?;

        emit(&SingletonEvent::Cached {
            strategy: Strategy::SelfCaching,
            type_name: std::any::type_name::<Self>(),
            found,
        });

        Ok(found)
    }
}

/// Empties every slot. Test support only.
///
/// Already-retrieved `Arc` handles remain valid; only future lookups see the
/// empty slots.
#[doc(hidden)]
pub fn reset() {
    emit(&SingletonEvent::Reset {
        strategy: Strategy::SelfCaching,
    });

    if let Ok(mut slots) = SLOTS.lock() {
        slots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct Widget {
        label: &'static str,
    }

    impl SelfCaching for Widget {
        fn construct() -> Self {
            Widget { label: "first" }
        }
    }

    #[test]
    #[serial]
    fn test_instance_is_cached_after_first_call() {
        reset();

        assert!(!Widget::is_cached().unwrap());

        let one = Widget::instance().unwrap();
        assert!(Widget::is_cached().unwrap());

        let two = Widget::instance().unwrap();
        assert!(Arc::ptr_eq(&one, &two));
        assert_eq!(two.label, "first");
    }

    #[test]
    #[serial]
    fn test_reset_empties_the_slot() {
        reset();

        let before = Widget::instance().unwrap();
        reset();
        assert!(!Widget::is_cached().unwrap());

        // The old handle stays valid; a new lookup constructs a new instance.
        let after = Widget::instance().unwrap();
        assert_eq!(before.label, "first");
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    #[serial]
    fn test_default_slot_is_the_own_type_id() {
        assert_eq!(Widget::slot(), TypeId::of::<Widget>());
    }
}
