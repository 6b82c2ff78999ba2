//! Integration tests for the cached-accessor strategy.
//!
//! Covers the identity guarantee, wrap-time argument capture, per-accessor
//! cache independence, and the `define_accessor!` deployment where only the
//! accessor is exported.

use singleton_strategies::{define_accessor, singleton};
use std::sync::Arc;

pub struct Connection {
    pub url: String,
    pub pool_size: u32,
}

#[test]
fn test_repeated_calls_return_the_same_instance() {
    let connect = singleton(|| Connection {
        url: "localhost:5432".into(),
        pool_size: 4,
    });

    let one = connect.get();
    let two = connect.get();

    assert!(Arc::ptr_eq(&one, &two));
    assert_eq!(two.pool_size, 4);
}

#[test]
fn test_arguments_are_fixed_at_wrap_time() {
    // Everything the constructor needs is captured here, once. There is no
    // way to pass anything at call time; later callers get the instance
    // these values built.
    let pool_size = 5;
    let connect = singleton(move || Connection {
        url: "localhost:5432".into(),
        pool_size,
    });

    let one = connect.get();
    let two = connect.get();

    assert_eq!(one.pool_size, 5);
    assert_eq!(two.pool_size, 5);
}

#[test]
fn test_wrapping_twice_yields_two_independent_caches() {
    let first = singleton(|| Connection {
        url: "a".into(),
        pool_size: 1,
    });
    let second = singleton(|| Connection {
        url: "b".into(),
        pool_size: 2,
    });

    let a = first.get();
    let b = second.get();

    // The cache belongs to the wrap, not the type.
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.url, "a");
    assert_eq!(b.url, "b");
}

#[test]
fn test_is_cached_flips_on_first_get() {
    let connect = singleton(|| Connection {
        url: "localhost:5432".into(),
        pool_size: 4,
    });

    assert!(!connect.is_cached());
    let _instance = connect.get();
    assert!(connect.is_cached());
}

#[test]
fn test_constructor_runs_exactly_once() {
    use std::sync::atomic::{AtomicU32, Ordering};

    static RUNS: AtomicU32 = AtomicU32::new(0);

    let connect = singleton(|| {
        RUNS.fetch_add(1, Ordering::SeqCst);
        Connection {
            url: "localhost:5432".into(),
            pool_size: 4,
        }
    });

    for _ in 0..5 {
        let _instance = connect.get();
    }

    assert_eq!(RUNS.load(Ordering::SeqCst), 1);
}

// The module-level deployment: the type could stay private; callers only see
// the generated module.

define_accessor!(primary, Connection, Connection {
    url: "primary:5432".into(),
    pool_size: 8,
});

#[test]
fn test_define_accessor_wires_a_module_level_cache() {
    let one = primary::get();
    let two = primary::get();

    assert!(primary::is_cached());
    assert!(Arc::ptr_eq(&one, &two));
    assert_eq!(one.url, "primary:5432");
}
