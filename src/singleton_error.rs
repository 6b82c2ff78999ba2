use std::fmt;

/// Errors surfaced by fallible lookups across the strategy modules.
///
/// Writes recover from lock poisoning silently; only reads report it.
#[derive(Debug, PartialEq)]
pub enum SingletonError {
    /// A storage lock was poisoned by a panic in another thread.
    LockPoisoned,
    /// The cached-instance slot holds an instance of a different type.
    ///
    /// Reachable only when two types report the same slot key; see the
    /// `self_caching` module documentation.
    SlotMismatch {
        /// The type that performed the lookup.
        type_name: &'static str,
    },
    /// No attribute with this name exists in the shared state.
    AttrNotFound {
        /// The requested attribute name.
        name: String,
    },
    /// The attribute exists but holds a value of a different type.
    AttrTypeMismatch {
        /// The requested attribute name.
        name: String,
    },
}

impl fmt::Display for SingletonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingletonError::LockPoisoned => write!(f, "Failed to acquire storage lock"),
            SingletonError::SlotMismatch { type_name } => {
                write!(f, "Instance slot holds a different type (requested: {type_name})")
            }
            SingletonError::AttrNotFound { name } => {
                write!(f, "Attribute not found in shared state: {name}")
            }
            SingletonError::AttrTypeMismatch { name } => {
                write!(f, "Attribute type mismatch in shared state: {name}")
            }
        }
    }
}

impl std::error::Error for SingletonError {}
