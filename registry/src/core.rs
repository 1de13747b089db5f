//! Core, non-public data structures for the registry.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::warn;

static NEXT_REGISTRY_ID: AtomicUsize = AtomicUsize::new(0);

/// Hands out a process-unique id for a new registry instance.
pub(crate) fn next_registry_id() -> usize {
  NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed)
}

thread_local! {
  // Ids of the registries whose critical section the current thread is inside.
  // Constructors run while the registry lock is held, so a constructor that calls
  // back into the same registry would block forever on the lock.
  static ACTIVE_REGISTRIES: RefCell<HashSet<usize>> = RefCell::new(HashSet::new());
}

/// An RAII guard marking the current thread as inside a registry's critical section.
///
/// Must be created *before* the registry lock is taken. If the thread is already
/// inside the same registry, it panics instead of deadlocking on the lock.
/// Dropping the guard clears the mark.
pub(crate) struct AccessGuard {
  registry_id: usize,
}

impl AccessGuard {
  pub(crate) fn enter(registry_id: usize) -> Self {
    ACTIVE_REGISTRIES.with(|active| {
      // `insert` returns `false` if the id was already present.
      if !active.borrow_mut().insert(registry_id) {
        panic!(
          "re-entrant access to registry #{}: a constructor must not register or resolve on the registry running it",
          registry_id
        );
      }
    });
    Self { registry_id }
  }
}

impl Drop for AccessGuard {
  fn drop(&mut self) {
    ACTIVE_REGISTRIES.with(|active| {
      active.borrow_mut().remove(&self.registry_id);
    });
  }
}

/// Identity of a registry entry: the requested type plus an optional name.
///
/// `type_name` is carried for diagnostics only and takes no part in equality.
#[derive(Clone)]
pub(crate) struct TypeKey {
  type_id: TypeId,
  type_name: &'static str,
  name: Option<String>,
}

impl TypeKey {
  pub(crate) fn of<T: ?Sized + Any>(name: Option<&str>) -> Self {
    Self {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
      name: name.map(str::to_owned),
    }
  }

  pub(crate) fn type_name(&self) -> &'static str {
    self.type_name
  }

  pub(crate) fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

impl PartialEq for TypeKey {
  fn eq(&self, other: &Self) -> bool {
    self.type_id == other.type_id && self.name == other.name
  }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.type_id.hash(state);
    self.name.hash(state);
  }
}

impl fmt::Debug for TypeKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.name {
      Some(name) => write!(f, "Key({}, Name({}))", self.type_name, name),
      None => write!(f, "Key({})", self.type_name),
    }
  }
}

/// Type-erased singleton instance of the thread-safe registry. Always holds an `Arc<T>`.
pub(crate) type SharedInstance = Box<dyn Any + Send + Sync>;
/// Type-erased transient constructor of the thread-safe registry.
pub(crate) type SharedConstructor = Box<dyn Fn() -> SharedInstance + Send + Sync>;

/// The two mappings owned by a registry.
///
/// `I` is the erased instance type and `C` the erased constructor type, so the
/// thread-safe and single-threaded registries share the same entry policies.
pub(crate) struct Entries<I, C> {
  singletons: HashMap<TypeKey, I>,
  transients: HashMap<TypeKey, C>,
}

impl<I, C> Default for Entries<I, C> {
  fn default() -> Self {
    Self {
      singletons: HashMap::new(),
      transients: HashMap::new(),
    }
  }
}

impl<I, C> Entries<I, C> {
  /// Stores a singleton built by `construct`, unless one already exists for `key`.
  ///
  /// The first registration wins. A duplicate is ignored with a warning and its
  /// constructor is never run. Returns whether the entry was inserted.
  pub(crate) fn insert_singleton(&mut self, key: TypeKey, construct: impl FnOnce() -> I) -> bool {
    match self.singletons.entry(key) {
      Entry::Occupied(occupied) => {
        warn!(
          type_name = occupied.key().type_name(),
          name = ?occupied.key().name(),
          "singleton already registered, ignoring duplicate singleton registration"
        );
        false
      }
      Entry::Vacant(vacant) => {
        vacant.insert(construct());
        true
      }
    }
  }

  /// Stores a transient constructor, replacing any previous one for `key`.
  pub(crate) fn set_transient(&mut self, key: TypeKey, constructor: C) {
    self.transients.insert(key, constructor);
  }

  pub(crate) fn singleton(&self, key: &TypeKey) -> Option<&I> {
    self.singletons.get(key)
  }

  pub(crate) fn transient(&self, key: &TypeKey) -> Option<&C> {
    self.transients.get(key)
  }

  pub(crate) fn contains(&self, key: &TypeKey) -> bool {
    self.singletons.contains_key(key) || self.transients.contains_key(key)
  }

  pub(crate) fn len(&self) -> usize {
    self.singletons.len() + self.transients.len()
  }

  pub(crate) fn clear(&mut self) {
    self.singletons.clear();
    self.transients.clear();
  }
}
