//! Observation hooks shared by the strategy modules.
//!
//! Every strategy emits a [`SingletonEvent`] for each construction request,
//! attribute access, or reset. A process-wide callback set via
//! [`set_trace_callback`] receives them; with no callback set, emission is a
//! no-op.

use std::fmt;
use std::sync::{Arc, LazyLock, Mutex};

/// Which strategy module emitted an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Types caching their own instance (`self_caching`).
    SelfCaching,
    /// Shared-state handles (`shared_state`).
    SharedState,
    /// Generic construction interception (`intercept`).
    Intercept,
    /// Cached-accessor factories (`accessor`).
    Accessor,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Strategy::SelfCaching => "self_caching",
            Strategy::SharedState => "shared_state",
            Strategy::Intercept => "intercept",
            Strategy::Accessor => "accessor",
        };
        write!(f, "{label}")
    }
}

/// Events emitted by the strategy modules.
///
/// These events are passed to the callback set via [`set_trace_callback`].
/// The `Clone` derive allows callbacks to store or forward events if needed.
#[derive(Debug, Clone)]
pub enum SingletonEvent {
    /// A construction request was served.
    Construct {
        /// The strategy that served the request.
        strategy: Strategy,
        /// The type of the requested instance.
        type_name: &'static str,
        /// Whether an already-cached instance was returned.
        reused: bool,
    },

    /// A shared-state handle was attached to its class-wide storage.
    Attach {
        /// The class the handle belongs to.
        type_name: &'static str,
        /// Whether this attachment created the class storage.
        first: bool,
    },

    /// An attribute was written through a shared-state handle.
    AttrSet {
        /// The class the handle belongs to.
        type_name: &'static str,
        /// The attribute name.
        name: String,
    },

    /// An attribute was read through a shared-state handle.
    AttrGet {
        /// The class the handle belongs to.
        type_name: &'static str,
        /// The attribute name.
        name: String,
        /// Whether the read succeeded.
        found: bool,
    },

    /// A cached-instance query was performed.
    Cached {
        /// The strategy that was queried.
        strategy: Strategy,
        /// The queried type.
        type_name: &'static str,
        /// Whether an instance was cached.
        found: bool,
    },

    /// A strategy's storage was reset (test support).
    Reset {
        /// The strategy that was reset.
        strategy: Strategy,
    },
}

impl fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SingletonEvent::Construct {
                strategy,
                type_name,
                reused,
            } => write!(
                f,
                "construct {{ strategy: {strategy}, type_name: {type_name}, reused: {reused} }}"
            ),
            SingletonEvent::Attach { type_name, first } => {
                write!(f, "attach {{ type_name: {type_name}, first: {first} }}")
            }
            SingletonEvent::AttrSet { type_name, name } => {
                write!(f, "attr_set {{ type_name: {type_name}, name: {name} }}")
            }
            SingletonEvent::AttrGet {
                type_name,
                name,
                found,
            } => write!(
                f,
                "attr_get {{ type_name: {type_name}, name: {name}, found: {found} }}"
            ),
            SingletonEvent::Cached {
                strategy,
                type_name,
                found,
            } => write!(
                f,
                "cached {{ strategy: {strategy}, type_name: {type_name}, found: {found} }}"
            ),
            SingletonEvent::Reset { strategy } => {
                write!(f, "reset {{ strategy: {strategy} }}")
            }
        }
    }
}

/// Type alias for the user-supplied tracing callback.
///
/// The callback receives a reference to a `SingletonEvent` every time a
/// strategy module is interacted with. It must be thread-safe because the
/// strategy storages are globally shared.
pub type TraceCallback = dyn Fn(&SingletonEvent) + Send + Sync + 'static;

/// Holds an optional user-defined tracing callback.
static TRACE_CALLBACK: LazyLock<Mutex<Option<Arc<TraceCallback>>>> =
    LazyLock::new(|| Mutex::new(None));

/// Sets a tracing callback that will be invoked on every strategy interaction.
///
/// Call [`clear_trace_callback`] to disable tracing again.
///
/// The callback must NOT call back into this crate, as it is invoked while
/// the trace lock is held and would deadlock.
///
/// # Example
/// ```rust
/// use singleton_strategies::set_trace_callback;
///
/// set_trace_callback(|event| println!("[trace] {event}"));
/// # singleton_strategies::clear_trace_callback();
/// ```
pub fn set_trace_callback(callback: impl Fn(&SingletonEvent) + Send + Sync + 'static) {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = Some(Arc::new(callback));
}

/// Clears the tracing callback (disables tracing).
pub fn clear_trace_callback() {
    let mut guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    *guard = None;
}

/// Emits an event through the current callback, if any.
///
/// Lock poisoning is recovered; tracing is non-critical.
pub(crate) fn emit(event: &SingletonEvent) {
    let guard = TRACE_CALLBACK.lock().unwrap_or_else(|p| p.into_inner());
    if let Some(callback) = guard.as_ref() {
        callback(event);
    }
}
