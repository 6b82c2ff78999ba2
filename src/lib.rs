//! # Singleton Strategies
//!
//! Four thread-safe strategies for at-most-one-instance semantics, each a
//! self-contained module:
//!
//! - [`self_caching`] - a type intercepts its own construction and caches one
//!   shared instance in a per-type slot
//! - [`shared_state`] - handles stay distinct objects but alias one
//!   class-wide attribute storage, unifying state instead of identity
//! - [`intercept`] - construction interception generalized to any
//!   constructible type, without the type opting in to caching
//! - [`accessor`] - a constructor is wrapped into a zero-argument accessor
//!   over a private cache
//!
//! The first, third, and fourth guarantee reference-identical handles for
//! repeated construction requests on the same class. The second deliberately
//! does not: it guarantees only that every handle observes the same state.
//!
//! ## Quick Start
//!
//! ```rust
//! use singleton_strategies::singleton;
//! use std::sync::Arc;
//!
//! struct AppConfig {
//!     retries: u32,
//! }
//!
//! let app_config = singleton(|| AppConfig { retries: 3 });
//!
//! let one = app_config.get();
//! let two = app_config.get();
//!
//! assert!(Arc::ptr_eq(&one, &two));
//! assert_eq!(two.retries, 3);
//! ```
//!
//! ## Features
//!
//! - **Thread-safe**: every cache is a guarded lookup-or-insert; two racing
//!   first constructions yield the same instance
//! - **Type-safe**: instances are stored type-erased and downcast with full
//!   type information on the way out
//! - **Tracing support**: an optional callback observes every construction
//!   request, attribute access, and reset
//!
//! ## Main items
//!
//! - [`SelfCaching`] - trait for types caching their own instance
//! - [`shared_state::Handle`] - shared-state handle onto class-wide storage
//! - [`Construct`] / [`intercept::instance`] - generic construction interception
//! - [`singleton`] / [`Accessor`] - cached-accessor factory
//! - [`define_accessor!`] - wire an accessor into a module
//! - [`set_trace_callback`] - observe strategy operations
//!
//! ## Caveats
//!
//! Documented quirks, each covered by tests: `self_caching` slots can be
//! shared across types and then contend for one instance; `intercept` and
//! `accessor` fix construction arguments at the first request and silently
//! discard later ones.

pub mod accessor;
pub mod intercept;
mod macros;
pub mod self_caching;
pub mod shared_state;
mod singleton_error;
mod singleton_event;

// Re-export the main public API
pub use accessor::{singleton, Accessor};
pub use intercept::Construct;
pub use self_caching::SelfCaching;
pub use singleton_error::SingletonError;
pub use singleton_event::{
    clear_trace_callback, set_trace_callback, SingletonEvent, Strategy, TraceCallback,
};
