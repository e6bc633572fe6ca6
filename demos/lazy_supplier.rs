//! # Lazy Payload Example
//!
//! Shows the supplier form of publishing: the payload is produced at
//! most once per emit, and not at all while nobody subscribes.
//!
//! ## Run
//! ```bash
//! cargo run --example lazy_supplier
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use fanhub::{Hub, Name};

fn main() -> Result<(), fanhub::NameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let hub: Hub<String> = Hub::new();
    let snapshots = hub.inlet(Name::parse("probe.snapshot")?);

    static PRODUCED: AtomicUsize = AtomicUsize::new(0);

    let expensive_snapshot = || {
        PRODUCED.fetch_add(1, Ordering::SeqCst);
        // Stands in for a costly capture (stack walk, stat scrape, ...).
        format!("snapshot #{}", PRODUCED.load(Ordering::SeqCst))
    };

    // Nobody listens yet: the supplier must not run.
    snapshots.emit_with(expensive_snapshot);
    println!("produced with no subscribers: {}", PRODUCED.load(Ordering::SeqCst));

    let listeners: Vec<_> = (0..3)
        .map(|id| {
            hub.subscribe_fn(move |_source, registrar| {
                registrar.register_fn(move |event| {
                    println!("listener {id} got '{}'", event.payload());
                    Ok(())
                });
                Ok(())
            })
        })
        .collect();

    // Three listeners, one production.
    snapshots.emit_with(expensive_snapshot);
    println!("produced with 3 subscribers:  {}", PRODUCED.load(Ordering::SeqCst));

    for listener in &listeners {
        listener.cancel().expect("first cancel succeeds");
    }

    // Everyone cancelled: back to zero productions per emit.
    snapshots.emit_with(expensive_snapshot);
    println!("produced after cancelling:    {}", PRODUCED.load(Ordering::SeqCst));

    Ok(())
}
