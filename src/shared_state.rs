//! Handles that share one attribute storage per class.
//!
//! Every call to [`Handle::new`] allocates a genuinely new handle, but the
//! handle's attribute storage aliases one process-wide map owned by the
//! handle's class (the marker type `C`). Handles of the same class are
//! therefore never reference-identical, yet a mutation through any one of
//! them is immediately visible through all others. This is a materially
//! weaker guarantee than true instance identity: state is unified, identity
//! is not.
//!
//! Attributes are stored type-erased (`String` name to
//! `Arc<dyn Any + Send + Sync>`) and downcast on read.
//!
//! # Examples
//!
//! ```
//! use singleton_strategies::shared_state::Handle;
//! use std::sync::Arc;
//!
//! struct Settings;
//!
//! let one = Handle::<Settings>::new();
//! let two = Handle::<Settings>::new();
//!
//! // Distinct handles, one storage.
//! two.set("a", 3i64);
//! let seen: Arc<i64> = one.get("a").unwrap();
//! assert_eq!(*seen, 3);
//!
//! assert!(!std::ptr::eq(&one, &two));
//! assert!(one.shares_storage_with(&two));
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::{Arc, LazyLock, Mutex};

use crate::singleton_event::{emit, SingletonEvent, Strategy};
use crate::SingletonError;

/// Type-erased attribute storage, keyed by attribute name.
type AttrMap = HashMap<String, Arc<dyn Any + Send + Sync>>;

/// The storage object every handle of one class aliases.
type SharedMap = Arc<Mutex<AttrMap>>;

/// One shared attribute map per class, keyed by the class's `TypeId`.
static CLASS_STATE: LazyLock<Mutex<HashMap<TypeId, SharedMap>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// A handle onto the class-wide shared state of `C`.
///
/// Constructing a handle never returns an existing one; it returns a new
/// value attached to the one storage map of class `C`. Equality compares
/// storage identity, so any two handles of the same class compare equal.
pub struct Handle<C: 'static> {
    storage: SharedMap,
    _class: PhantomData<fn() -> C>,
}

impl<C: 'static> Handle<C> {
    /// Allocates a new handle attached to class `C`'s shared storage.
    ///
    /// The storage map is created lazily by the first handle of the class
    /// and lives for the remaining process lifetime.
    pub fn new() -> Self {
        let mut classes = CLASS_STATE.lock().unwrap_or_else(|p| p.into_inner());

        let first = !classes.contains_key(&TypeId::of::<C>());
        let storage = classes
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Arc::new(Mutex::new(HashMap::new())))
            .clone();

        drop(classes);

        emit(&SingletonEvent::Attach {
            type_name: std::any::type_name::<C>(),
            first,
        });

        Handle {
            storage,
            _class: PhantomData,
        }
    }

    /// Writes an attribute, visible through every handle of this class.
    ///
    /// Replaces any previous value stored under the same name, regardless of
    /// its type. Lock poisoning is recovered; a write cannot fail.
    pub fn set<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) {
        let name = name.into();

        emit(&SingletonEvent::AttrSet {
            type_name: std::any::type_name::<C>(),
            name: name.clone(),
        });

        self.storage
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .insert(name, Arc::new(value));
    }

    /// Reads an attribute written through any handle of this class.
    ///
    /// # Errors
    ///
    /// - No attribute with this name exists
    /// - The attribute holds a value of a different type
    /// - The storage lock is poisoned
    pub fn get<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, SingletonError> {
        let attrs = self
            .storage
            .lock()
            .map_err(|_| SingletonError::LockPoisoned)?;

        let stored = attrs.get(name).cloned();

        drop(attrs);

        let result = match stored {
            Some(any_arc) => any_arc
                .downcast::<T>()
                .map_err(|_| SingletonError::AttrTypeMismatch {
                    name: name.to_string(),
                }),
            None => Err(SingletonError::AttrNotFound {
                name: name.to_string(),
            }),
        };

        emit(&SingletonEvent::AttrGet {
            type_name: std::any::type_name::<C>(),
            name: name.to_string(),
            found: result.is_ok(),
        });

        result
    }

    /// Reads an attribute as an owned clone.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Handle::get).
    pub fn get_cloned<T: Send + Sync + Clone + 'static>(
        &self,
        name: &str,
    ) -> Result<T, SingletonError> {
        let arc = self.get::<T>(name)?;
        Ok((*arc).clone())
    }

    /// Whether an attribute with this name exists.
    ///
    /// # Errors
    ///
    /// - The storage lock is poisoned
    pub fn contains(&self, name: &str) -> Result<bool, SingletonError> {
        self.storage
            .lock()
            .map(|attrs| attrs.contains_key(name))
            .map_err(|_| SingletonError::LockPoisoned)
    }

    /// Whether two handles alias the same storage object.
    ///
    /// True for any two handles of the same class.
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.storage, &other.storage)
    }

    /// The identity of the underlying storage object.
    pub fn storage_ptr(&self) -> *const () {
        Arc::as_ptr(&self.storage) as *const ()
    }
}

impl<C: 'static> Default for Handle<C> {
    fn default() -> Self {
        Self::new()
    }
}

/// State equality: handles compare equal when they alias the same storage.
/// Reference identity is deliberately not provided.
impl<C: 'static> PartialEq for Handle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.shares_storage_with(other)
    }
}

impl<C: 'static> fmt::Debug for Handle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("class", &std::any::type_name::<C>())
            .field("storage", &self.storage_ptr())
            .finish()
    }
}

/// Drops every class's shared storage map. Test support only.
///
/// Existing handles keep their storage alive through their own `Arc`; only
/// handles constructed afterwards get fresh maps.
#[doc(hidden)]
pub fn reset() {
    emit(&SingletonEvent::Reset {
        strategy: Strategy::SharedState,
    });

    if let Ok(mut classes) = CLASS_STATE.lock() {
        classes.clear();
    }
}
