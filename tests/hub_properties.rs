//! End-to-end properties of the hub, exercised through the public API
//! only: per-source routing, lazy payloads, cancellation and fault
//! isolation across subscribers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use fanhub::{Environment, Event, Hub, HubError, Name, Outlet, Subscription, Variable};

fn name(path: &str) -> Name {
    Name::parse(path).unwrap()
}

/// Subscribes a recorder that registers one outlet per source in
/// `accepted` and discards everything else.
fn record_sources(
    hub: &Hub<i64>,
    accepted: &[Name],
    seen: &Arc<Mutex<Vec<(Name, i64)>>>,
) -> Subscription<i64> {
    let accepted = accepted.to_vec();
    let seen = Arc::clone(seen);

    hub.subscribe_fn(move |source, registrar| {
        if accepted.contains(source) {
            let seen = Arc::clone(&seen);
            registrar.register_fn(move |event| {
                seen.lock()
                    .unwrap()
                    .push((event.source().clone(), *event.payload()));
                Ok(())
            });
        }
        Ok(())
    })
}

#[test]
fn two_subscribers_route_by_source() {
    let hub: Hub<i64> = Hub::new();
    let r1 = name("props.route.r1");
    let r2 = name("props.route.r2");

    let s1_seen = Arc::new(Mutex::new(Vec::new()));
    let s2_seen = Arc::new(Mutex::new(Vec::new()));
    let _s1 = record_sources(&hub, &[r1.clone()], &s1_seen);
    let _s2 = record_sources(&hub, &[r2.clone()], &s2_seen);

    hub.inlet(r1.clone()).emit(42);
    hub.inlet(r2.clone()).emit(7);

    assert_eq!(*s1_seen.lock().unwrap(), [(r1.clone(), 42)]);
    assert_eq!(*s2_seen.lock().unwrap(), [(r2.clone(), 7)]);
}

#[test]
fn one_subscriber_keeps_distinct_outlets_per_source() {
    let hub: Hub<i64> = Hub::new();
    let a = name("props.outlets.a");
    let b = name("props.outlets.b");

    let a_seen = Arc::new(Mutex::new(Vec::new()));
    let b_seen = Arc::new(Mutex::new(Vec::new()));

    let a_sink = Arc::clone(&a_seen);
    let b_sink = Arc::clone(&b_seen);
    let a_key = a.clone();
    let b_key = b.clone();
    let _sub = hub.subscribe_fn(move |source, registrar| {
        if *source == a_key {
            let sink = Arc::clone(&a_sink);
            registrar.register_fn(move |event| {
                sink.lock().unwrap().push(*event.payload());
                Ok(())
            });
        } else if *source == b_key {
            let sink = Arc::clone(&b_sink);
            registrar.register_fn(move |event| {
                sink.lock().unwrap().push(*event.payload());
                Ok(())
            });
        }
        Ok(())
    });

    let to_a = hub.inlet(a);
    let to_b = hub.inlet(b);
    to_a.emit(1);
    to_b.emit(2);
    to_a.emit(3);

    assert_eq!(*a_seen.lock().unwrap(), [1, 3]);
    assert_eq!(*b_seen.lock().unwrap(), [2]);
}

#[test]
fn supplier_is_skipped_without_subscribers_and_runs_once_with_them() {
    let hub: Hub<i64> = Hub::new();
    let source = name("props.lazy");
    let produced = AtomicUsize::new(0);

    hub.inlet(source.clone()).emit_with(|| {
        produced.fetch_add(1, Ordering::SeqCst);
        1
    });
    assert_eq!(produced.load(Ordering::SeqCst), 0);

    let seen_one = Arc::new(Mutex::new(Vec::new()));
    let seen_two = Arc::new(Mutex::new(Vec::new()));
    let _one = record_sources(&hub, &[source.clone()], &seen_one);
    let _two = record_sources(&hub, &[source.clone()], &seen_two);

    hub.inlet(source.clone()).emit_with(|| {
        produced.fetch_add(1, Ordering::SeqCst);
        9
    });

    assert_eq!(produced.load(Ordering::SeqCst), 1);
    assert_eq!(*seen_one.lock().unwrap(), [(source.clone(), 9)]);
    assert_eq!(*seen_two.lock().unwrap(), [(source.clone(), 9)]);
}

#[test]
fn cancelled_subscription_stops_receiving() {
    let hub: Hub<i64> = Hub::new();
    let source = name("props.cancelled");

    let kept_seen = Arc::new(Mutex::new(Vec::new()));
    let gone_seen = Arc::new(Mutex::new(Vec::new()));
    let _kept = record_sources(&hub, &[source.clone()], &kept_seen);
    let gone = record_sources(&hub, &[source.clone()], &gone_seen);

    hub.inlet(source.clone()).emit(1);
    gone.cancel().unwrap();
    hub.inlet(source.clone()).emit(2);

    assert_eq!(
        *kept_seen.lock().unwrap(),
        [(source.clone(), 1), (source.clone(), 2)]
    );
    assert_eq!(*gone_seen.lock().unwrap(), [(source.clone(), 1)]);
    assert!(matches!(gone.cancel(), Err(HubError::AlreadyCancelled)));
    assert_eq!(hub.len(), 1);
}

#[test]
fn faulty_subscriber_does_not_break_the_rest() {
    let hub: Hub<i64> = Hub::new();
    let source = name("props.faulty");

    // Subscribed first, so it is delivered last.
    let healthy_seen = Arc::new(Mutex::new(Vec::new()));
    let _healthy = record_sources(&hub, &[source.clone()], &healthy_seen);

    let faulty = hub.subscribe_fn(|_source, registrar| {
        registrar.register_fn(|_event| Err("sink failed".into()));
        Ok(())
    });

    hub.inlet(source.clone()).emit(1);
    hub.inlet(source.clone()).emit(2);

    assert_eq!(
        *healthy_seen.lock().unwrap(),
        [(source.clone(), 1), (source.clone(), 2)]
    );
    assert!(faulty.is_cancelled());
    assert_eq!(hub.len(), 1);
}

#[test]
fn map_derives_events_for_downstream_hubs() {
    // A relay: events from one hub re-published into another with a
    // transformed payload, same source.
    let upstream: Hub<i64> = Hub::new();
    let downstream: Hub<String> = Hub::new();

    let relay = downstream.clone();
    let _bridge = upstream.subscribe_fn(move |_source, registrar| {
        let relay = relay.clone();
        registrar.register_fn(move |event| {
            let labelled = event.map(|n| format!("reading={n}"));
            let source = labelled.source().clone();
            relay.publish(&source, labelled.into_payload());
            Ok(())
        });
        Ok(())
    });

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _tail = downstream.subscribe_fn(move |_source, registrar| {
        let sink = Arc::clone(&sink);
        registrar.register_fn(move |event| {
            sink.lock()
                .unwrap()
                .push((event.source().clone(), event.payload().clone()));
            Ok(())
        });
        Ok(())
    });

    let source = name("props.mapped");
    upstream.inlet(source.clone()).emit(5);

    assert_eq!(
        *seen.lock().unwrap(),
        [(source.clone(), String::from("reading=5"))]
    );
}

#[test]
fn shared_outlet_serves_several_sources() {
    struct Tally {
        total: AtomicUsize,
    }

    impl Outlet<i64> for Tally {
        fn accept(&self, event: &Event<i64>) -> fanhub::DeliveryResult {
            self.total.fetch_add(*event.payload() as usize, Ordering::SeqCst);
            Ok(())
        }
    }

    let hub: Hub<i64> = Hub::new();
    let tally = Arc::new(Tally {
        total: AtomicUsize::new(0),
    });

    let shared = Arc::clone(&tally);
    let _sub = hub.subscribe_fn(move |_source, registrar| {
        registrar.register(Arc::clone(&shared));
        Ok(())
    });

    hub.inlet(name("props.tally.a")).emit(3);
    hub.inlet(name("props.tally.b")).emit(4);

    assert_eq!(tally.total.load(Ordering::SeqCst), 7);
}

#[test]
fn environment_parametrizes_subscribers() {
    let window_key = name("props.env.window");
    let environment = Environment::single(window_key.clone(), 4i64).memorize();
    let hub: Hub<i64> = Hub::with_environment(environment);

    // The subscriber sizes its window from the hub's environment.
    let window = Variable::new(window_key, 16i64).resolve(hub.environment());
    assert_eq!(window, 4);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _sub = hub.subscribe_fn(move |_source, registrar| {
        let sink = Arc::clone(&sink);
        let window = window as usize;
        registrar.register_fn(move |event| {
            let mut seen = sink.lock().unwrap();
            if seen.len() < window {
                seen.push(*event.payload());
            }
            Ok(())
        });
        Ok(())
    });

    let inlet = hub.inlet(name("props.env.readings"));
    for n in 0..10 {
        inlet.emit(n);
    }

    assert_eq!(*seen.lock().unwrap(), [0, 1, 2, 3]);
}

#[test]
fn publishers_on_many_threads_reach_every_subscriber() {
    let hub: Hub<i64> = Hub::new();
    let source = name("props.threads");

    let counters: Vec<Arc<AtomicUsize>> =
        (0..4).map(|_| Arc::new(AtomicUsize::new(0))).collect();
    let _subs: Vec<_> = counters
        .iter()
        .map(|counter| {
            let counter = Arc::clone(counter);
            hub.subscribe_fn(move |_source, registrar| {
                let counter = Arc::clone(&counter);
                registrar.register_fn(move |_event| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(())
                });
                Ok(())
            })
        })
        .collect();

    let threads: Vec<_> = (0..4)
        .map(|_| {
            let inlet = hub.inlet(source.clone());
            thread::spawn(move || {
                for n in 0..100 {
                    inlet.emit(n);
                }
            })
        })
        .collect();
    for handle in threads {
        handle.join().unwrap();
    }

    // 4 publishers x 100 events, all subscribers live throughout.
    for counter in &counters {
        assert_eq!(counter.load(Ordering::SeqCst), 400);
    }
}
