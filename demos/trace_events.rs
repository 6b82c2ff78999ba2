//! Tracing demonstration for singleton-strategies.
//!
//! Installs a trace callback and exercises each strategy so the emitted
//! events can be watched on stdout.
//!
//! Run with: `cargo run --example trace_events`

use singleton_strategies::intercept::{self, Construct};
use singleton_strategies::shared_state::Handle;
use singleton_strategies::{clear_trace_callback, set_trace_callback, singleton, SelfCaching};

fn main() {
    println!("=== singleton-strategies: Trace Events ===\n");

    set_trace_callback(|event| println!("   [trace] {event}"));

    // -------------------------------------------------------------------------
    // 1. Self-caching: first construction, then a reuse
    // -------------------------------------------------------------------------
    println!("1. Self-caching...");

    struct Cache;

    impl SelfCaching for Cache {
        fn construct() -> Self {
            Cache
        }
    }

    let _one = Cache::instance().unwrap();
    let _two = Cache::instance().unwrap();

    // -------------------------------------------------------------------------
    // 2. Shared state: attachments and attribute traffic
    // -------------------------------------------------------------------------
    println!("\n2. Shared state...");

    struct Session;

    let writer = Handle::<Session>::new();
    let reader = Handle::<Session>::new();
    writer.set("user", "ada".to_string());
    let _user = reader.get::<String>("user").unwrap();
    let _absent = reader.get::<String>("token");

    // -------------------------------------------------------------------------
    // 3. Interception: cache query, construction, reuse
    // -------------------------------------------------------------------------
    println!("\n3. Interception...");

    struct Endpoint {
        port: u16,
    }

    impl Construct for Endpoint {
        type Args = u16;

        fn construct(port: u16) -> Self {
            Endpoint { port }
        }
    }

    let _cached = intercept::is_cached::<Endpoint>().unwrap();
    let _one = intercept::instance::<Endpoint>(8080).unwrap();
    let _two = intercept::instance::<Endpoint>(9999).unwrap();

    // -------------------------------------------------------------------------
    // 4. Accessor: one construction per wrap
    // -------------------------------------------------------------------------
    println!("\n4. Accessor...");

    struct Widget;

    let widget = singleton(|| Widget);
    let _one = widget.get();
    let _two = widget.get();

    clear_trace_callback();

    println!("\n=== Demonstration Complete ===");
    println!("The callback saw every construction request, attribute access,");
    println!("and cache query; reuse shows up as `reused: true`.");
}
