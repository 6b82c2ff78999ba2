//! Aliasing demonstration for singleton-strategies.
//!
//! For each of the four strategies: construct two handles, mutate an
//! attribute through one, then print the value observed through each handle,
//! each handle's identity, whether they compare equal, and whether they are
//! reference-identical.
//!
//! Run with: `cargo run --example aliasing_demo`

use singleton_strategies::intercept::{self, Construct};
use singleton_strategies::shared_state::Handle;
use singleton_strategies::{singleton, SelfCaching};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

fn main() {
    println!("=== singleton-strategies: Aliasing Demonstration ===\n");

    // -------------------------------------------------------------------------
    // 1. Self-caching: one instance, reference-identical handles
    // -------------------------------------------------------------------------
    println!("1. Self-caching construction...");

    struct Counter {
        a: AtomicI64,
    }

    impl SelfCaching for Counter {
        fn construct() -> Self {
            Counter {
                a: AtomicI64::new(1),
            }
        }
    }

    let one = Counter::instance().unwrap();
    let two = Counter::instance().unwrap();

    two.a.store(3, Ordering::SeqCst);

    println!("   one.a observed: {}", one.a.load(Ordering::SeqCst));
    println!("   two.a observed: {}", two.a.load(Ordering::SeqCst));
    println!(
        "   one ptr: {:p}, two ptr: {:p}",
        Arc::as_ptr(&one),
        Arc::as_ptr(&two)
    );
    println!(
        "   equal: {}",
        one.a.load(Ordering::SeqCst) == two.a.load(Ordering::SeqCst)
    );
    println!("   reference-identical: {}", Arc::ptr_eq(&one, &two));

    // -------------------------------------------------------------------------
    // 2. Shared state: distinct handles, one storage
    // -------------------------------------------------------------------------
    println!("\n2. Shared-state handles...");

    struct Settings;

    let one = Handle::<Settings>::new();
    let two = Handle::<Settings>::new();

    two.set("a", 3i64);

    println!("   one[\"a\"] observed: {}", one.get::<i64>("a").unwrap());
    println!("   two[\"a\"] observed: {}", two.get::<i64>("a").unwrap());
    println!(
        "   one addr: {:p}, two addr: {:p}",
        std::ptr::addr_of!(one),
        std::ptr::addr_of!(two)
    );
    println!("   equal: {}", one == two);
    println!("   reference-identical: {}", std::ptr::eq(&one, &two));
    println!(
        "   storage object: {:?} vs {:?} (same: {})",
        one.storage_ptr(),
        two.storage_ptr(),
        one.shares_storage_with(&two)
    );

    // -------------------------------------------------------------------------
    // 3. Interception: caching imposed on an ordinary constructible type
    // -------------------------------------------------------------------------
    println!("\n3. Generic construction interception...");

    struct Endpoint {
        x: i64,
    }

    impl Construct for Endpoint {
        type Args = i64;

        fn construct(x: i64) -> Self {
            Endpoint { x }
        }
    }

    let one = intercept::instance::<Endpoint>(5).unwrap();
    let two = intercept::instance::<Endpoint>(99).unwrap();

    println!("   requested x=5 then x=99");
    println!("   one.x observed: {}", one.x);
    println!("   two.x observed: {} (second argument discarded)", two.x);
    println!(
        "   one ptr: {:p}, two ptr: {:p}",
        Arc::as_ptr(&one),
        Arc::as_ptr(&two)
    );
    println!("   equal: {}", one.x == two.x);
    println!("   reference-identical: {}", Arc::ptr_eq(&one, &two));

    // -------------------------------------------------------------------------
    // 4. Cached accessor: the wrap, not the type, owns the instance
    // -------------------------------------------------------------------------
    println!("\n4. Cached accessor...");

    struct Widget {
        x: i64,
    }

    let x = 5;
    let widget = singleton(move || Widget { x });

    let one = widget.get();
    let two = widget.get();

    println!("   wrapped with x=5; accessor takes no arguments");
    println!("   one.x observed: {}", one.x);
    println!("   two.x observed: {}", two.x);
    println!(
        "   one ptr: {:p}, two ptr: {:p}",
        Arc::as_ptr(&one),
        Arc::as_ptr(&two)
    );
    println!("   equal: {}", one.x == two.x);
    println!("   reference-identical: {}", Arc::ptr_eq(&one, &two));

    // -------------------------------------------------------------------------
    // Summary
    // -------------------------------------------------------------------------
    println!("\n=== Demonstration Complete ===");
    println!("Key takeaways:");
    println!("  - Self-caching, interception, and accessors unify identity:");
    println!("    every handle is the same instance");
    println!("  - Shared state unifies only state: handles stay distinct but");
    println!("    alias one storage object");
    println!("  - Interception and accessors fix construction arguments at the");
    println!("    first request; later arguments are silently discarded");
}
