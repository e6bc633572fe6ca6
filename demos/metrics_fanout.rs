//! # Per-Source Metrics Example
//!
//! Shows how one subscriber keeps independent state per source: each
//! sensor gets its own running-average outlet, created on first contact
//! and reused for every later reading.
//!
//! ## Run
//! ```bash
//! cargo run --example metrics_fanout
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use fanhub::{DeliveryResult, Event, Hub, Name, Outlet};

/// Running average for one source.
struct RunningAverage {
    label: String,
    count: AtomicU64,
    sum: AtomicU64,
}

impl RunningAverage {
    fn new(label: String) -> Self {
        Self {
            label,
            count: AtomicU64::new(0),
            sum: AtomicU64::new(0),
        }
    }

    fn print(&self) {
        let count = self.count.load(Ordering::Relaxed);
        let sum = self.sum.load(Ordering::Relaxed);
        let mean = if count == 0 { 0 } else { sum / count };
        println!(" ├─► {:<18} samples={count:<3} mean={mean}", self.label);
    }
}

impl Outlet<u64> for RunningAverage {
    fn accept(&self, event: &Event<u64>) -> DeliveryResult {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum.fetch_add(*event.payload(), Ordering::Relaxed);
        Ok(())
    }
}

fn main() -> Result<(), fanhub::NameError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let hub: Hub<u64> = Hub::new();

    // One averager per CPU source; everything else is discarded.
    let averages = Arc::new(std::sync::Mutex::new(Vec::<Arc<RunningAverage>>::new()));
    let registry = Arc::clone(&averages);
    let _sub = hub.subscribe_fn(move |source, registrar| {
        if source.parent().map(Name::segment) == Some("cpu") {
            let average = Arc::new(RunningAverage::new(source.path().to_string()));
            registry.lock().unwrap().push(Arc::clone(&average));
            registrar.register(average);
        }
        Ok(())
    });

    let load = hub.inlet(Name::parse("host.cpu.load")?);
    let temp = hub.inlet(Name::parse("host.cpu.temp")?);
    let noise = hub.inlet(Name::parse("host.disk.iops")?);

    for n in 1..=5 {
        load.emit(n * 10);
        temp.emit(40 + n);
        noise.emit(9_000); // no outlet registered: silently discarded
    }

    println!("Per-source averages:");
    for average in averages.lock().unwrap().iter() {
        average.print();
    }
    println!(" └─► {} live subscription(s)", hub.len());

    Ok(())
}
