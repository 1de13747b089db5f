use fibre_registry::{Lifecycle, Registry};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc, Barrier,
};
use std::thread;
use std::time::{Duration, Instant};

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

struct HelloGreeter;
impl Greeter for HelloGreeter {
  fn greet(&self) -> String {
    "Hello World".to_string()
  }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_share_one_singleton() {
  let registry = Arc::new(Registry::new());
  registry.register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(HelloGreeter));

  let first = {
    let registry = Arc::clone(&registry);
    tokio::spawn(async move { registry.resolve::<dyn Greeter>() })
  };
  let second = {
    let registry = Arc::clone(&registry);
    tokio::spawn(async move { registry.resolve::<dyn Greeter>() })
  };

  let first = first.await.unwrap().unwrap();
  let second = second.await.unwrap().unwrap();

  assert_eq!(first.greet(), "Hello World");
  assert_eq!(second.greet(), "Hello World");
  assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_tasks_report_missing_dependency() {
  trait Clock: Send + Sync {}

  let registry = Arc::new(Registry::new());
  let handles: Vec<_> = (0..8)
    .map(|_| {
      let registry = Arc::clone(&registry);
      tokio::spawn(async move { registry.resolve::<dyn Clock>().is_err() })
    })
    .collect();

  for handle in handles {
    assert!(handle.await.unwrap());
  }
  assert!(registry.is_empty());
}

#[test]
fn test_racing_singleton_registrations_construct_exactly_once() {
  let constructions = Arc::new(AtomicUsize::new(0));
  let registry = Registry::new();
  let barrier = Barrier::new(16);

  struct Service {
    registered_by: usize,
  }

  thread::scope(|s| {
    for i in 0..16 {
      let constructions = Arc::clone(&constructions);
      let registry = &registry;
      let barrier = &barrier;
      s.spawn(move || {
        barrier.wait();
        registry.register(Lifecycle::Singleton, move || {
          constructions.fetch_add(1, Ordering::SeqCst);
          Service { registered_by: i }
        });
      });
    }
  });

  assert_eq!(constructions.load(Ordering::SeqCst), 1);

  // Whichever registration won, every resolution sees the same instance.
  let winner = registry.resolve::<Service>().unwrap();
  assert!(winner.registered_by < 16);
  assert!(Arc::ptr_eq(&winner, &registry.resolve::<Service>().unwrap()));
}

#[test]
fn test_concurrent_registration_and_resolution() {
  let registry = Registry::new();
  registry.register_named("common", Lifecycle::Singleton, || 42_i32);

  thread::scope(|s| {
    for i in 0..10_usize {
      let registry = &registry;
      s.spawn(move || {
        registry.register_instance_named(&format!("thread_service_{}", i), i);

        for _ in 0..100 {
          assert_eq!(*registry.resolve_named::<i32>("common").unwrap(), 42);
        }

        let mine = registry.resolve_named::<usize>(&format!("thread_service_{}", i)).unwrap();
        assert_eq!(*mine, i);
      });
    }
  });

  assert_eq!(registry.len(), 11);
  assert_eq!(*registry.resolve_named::<usize>("thread_service_5").unwrap(), 5);
}

#[test]
fn test_transient_overwrites_race_without_torn_state() {
  let registry = Registry::new();
  registry.register(Lifecycle::Transient, || 0_u64);

  thread::scope(|s| {
    for writer in 1..=4_u64 {
      let registry = &registry;
      s.spawn(move || {
        for _ in 0..50 {
          registry.register(Lifecycle::Transient, move || writer);
        }
      });
    }
    for _ in 0..4 {
      let registry = &registry;
      s.spawn(move || {
        for _ in 0..200 {
          let value = *registry.resolve::<u64>().unwrap();
          assert!(value <= 4);
        }
      });
    }
  });

  // One transient entry survives, produced by one of the writers.
  assert_eq!(registry.len(), 1);
  let last = *registry.resolve::<u64>().unwrap();
  assert!((1..=4).contains(&last));
}

#[test]
fn test_slow_constructor_holds_the_registry() {
  let registry = Registry::new();
  let constructing = Arc::new(Barrier::new(2));

  thread::scope(|s| {
    let signal = Arc::clone(&constructing);
    let registry_ref = &registry;
    s.spawn(move || {
      // The singleton constructor runs inside the critical section.
      registry_ref.register(Lifecycle::Singleton, move || {
        signal.wait();
        thread::sleep(Duration::from_millis(50));
        String::from("slow")
      });
    });

    constructing.wait();
    let started = Instant::now();
    // Blocks until the slow registration has completed.
    let value = registry.resolve::<String>().unwrap();
    assert_eq!(*value, "slow");
    assert!(started.elapsed() >= Duration::from_millis(25));
  });
}

#[test]
#[should_panic(expected = "re-entrant access to registry")]
fn test_constructor_resolving_from_same_registry_panics() {
  let registry = Arc::new(Registry::new());
  registry.register(Lifecycle::Singleton, || 1_u32);

  let inner = Arc::clone(&registry);
  registry.register(Lifecycle::Transient, move || {
    let base = inner.resolve::<u32>().unwrap();
    *base as u64
  });

  let _ = registry.resolve::<u64>();
}

#[test]
fn test_registry_usable_after_reentrant_panic() {
  let registry = Arc::new(Registry::new());

  let inner = Arc::clone(&registry);
  let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    registry.register(Lifecycle::Singleton, move || {
      inner.register(Lifecycle::Transient, || 0_u8);
      1_u16
    });
  }));

  assert!(outcome.is_err());
  assert!(registry.is_empty());

  registry.register(Lifecycle::Singleton, || 2_u16);
  assert_eq!(*registry.resolve::<u16>().unwrap(), 2);
}
