use fibre_registry::{global, resolve, Lifecycle};
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

// A global, thread-safe counter to generate unique IDs.
static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  // --- Singleton Registration ---
  // This constructor runs right here, exactly once.
  global().register_named("singleton_tracker", Lifecycle::Singleton, || {
    println!("Creating SINGLETON RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  // --- Transient Registration ---
  // This constructor runs on EVERY resolution.
  global().register_named("transient_tracker", Lifecycle::Transient, || {
    println!("Creating TRANSIENT RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  println!("--- Resolving Singletons ---");
  let s1 = resolve!(RequestTracker, "singleton_tracker");
  let s2 = resolve!(RequestTracker, "singleton_tracker");
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = resolve!(RequestTracker, "transient_tracker");
  let t2 = resolve!(RequestTracker, "transient_tracker");
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!(t1.id, 1);
  assert_eq!(t2.id, 2);
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");

  // --- Registering the same key again ---
  global().register_named("singleton_tracker", Lifecycle::Singleton, || RequestTracker { id: 99 });
  assert_eq!(resolve!(RequestTracker, "singleton_tracker").id, 0);
  println!("Duplicate singleton registration was ignored.");
}
