//! Integration tests for generic construction interception.
//!
//! Covers the identity guarantee, the documented argument-discarding quirk,
//! and at-most-one-creation under concurrent first construction.
//!
//! NOTE: All tests use #[serial] because the instance map is a process-wide
//! static. Running them in parallel could cause interference.

use serial_test::serial;
use singleton_strategies::intercept::{self, Construct};
use std::sync::{Arc, Barrier};
use std::thread;

struct Endpoint {
    host: String,
    port: u16,
}

impl Construct for Endpoint {
    type Args = (String, u16);

    fn construct((host, port): (String, u16)) -> Self {
        Endpoint { host, port }
    }
}

#[test]
#[serial]
fn test_repeated_construction_returns_the_same_instance() {
    intercept::reset();

    let one = intercept::instance::<Endpoint>(("localhost".into(), 8080)).unwrap();
    let two = intercept::instance::<Endpoint>(("localhost".into(), 8080)).unwrap();

    assert!(Arc::ptr_eq(&one, &two));
    assert_eq!(one.host, "localhost");
}

#[test]
#[serial]
fn test_second_construction_arguments_are_silently_discarded() {
    intercept::reset();

    let one = intercept::instance::<Endpoint>(("first".into(), 5)).unwrap();
    let two = intercept::instance::<Endpoint>(("second".into(), 99)).unwrap();

    // Surprising, documented behavior: the second request's arguments never
    // reach a constructor.
    assert_eq!(two.port, 5);
    assert_eq!(two.host, "first");
    assert_eq!(one.port, 5);

    assert!(Arc::ptr_eq(&one, &two));
}

#[test]
#[serial]
fn test_types_are_cached_independently() {
    intercept::reset();

    struct Limits {
        max: u32,
    }

    impl Construct for Limits {
        type Args = u32;

        fn construct(max: u32) -> Self {
            Limits { max }
        }
    }

    let endpoint = intercept::instance::<Endpoint>(("localhost".into(), 8080)).unwrap();
    let limits = intercept::instance::<Limits>(64).unwrap();

    assert_eq!(endpoint.port, 8080);
    assert_eq!(limits.max, 64);
    assert!(intercept::is_cached::<Endpoint>().unwrap());
    assert!(intercept::is_cached::<Limits>().unwrap());
}

#[test]
#[serial]
fn test_is_cached_reflects_the_first_request_only() {
    intercept::reset();

    assert!(!intercept::is_cached::<Endpoint>().unwrap());

    let _instance = intercept::instance::<Endpoint>(("localhost".into(), 8080)).unwrap();

    assert!(intercept::is_cached::<Endpoint>().unwrap());
}

#[test]
#[serial]
fn test_concurrent_first_construction_yields_one_instance() {
    intercept::reset();

    struct Racy {
        tag: u8,
    }

    impl Construct for Racy {
        type Args = u8;

        fn construct(tag: u8) -> Self {
            Racy { tag }
        }
    }

    let barrier = Arc::new(Barrier::new(2));

    let barrier_clone = barrier.clone();
    let handle = thread::spawn(move || {
        barrier_clone.wait();
        intercept::instance::<Racy>(1).unwrap()
    });

    barrier.wait();
    let mine = intercept::instance::<Racy>(2).unwrap();
    let theirs = handle.join().unwrap();

    // One of the two argument sets won; both handles alias that instance.
    assert!(Arc::ptr_eq(&mine, &theirs));
    assert!(mine.tag == 1 || mine.tag == 2);
}
