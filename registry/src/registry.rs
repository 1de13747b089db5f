//! The main `Registry` struct and its associated methods.

use crate::core::{next_registry_id, AccessGuard, Entries, SharedConstructor, SharedInstance, TypeKey};
use crate::error::{RegistryError, Result};
use crate::lifecycle::Lifecycle;
use parking_lot::Mutex;
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// A concurrency-safe dependency registry.
///
/// Every registration and resolution runs as one critical section on a single
/// lock, so concurrent callers never observe a partially applied registration.
/// Constructors run inside that critical section: singleton constructors once,
/// at registration time, and transient constructors once per resolution.
///
/// Separate `Registry` instances are fully independent of each other and of
/// the [`global`](crate::global) registry.
///
/// # Examples
///
/// ```
/// use fibre_registry::{Lifecycle, Registry};
/// use std::sync::Arc;
///
/// let registry = Registry::new();
/// registry.register(Lifecycle::Singleton, || String::from("Hello World"));
///
/// let a = registry.resolve::<String>().unwrap();
/// let b = registry.resolve::<String>().unwrap();
/// assert_eq!(*a, "Hello World");
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct Registry {
  id: usize,
  entries: Mutex<Entries<SharedInstance, SharedConstructor>>,
}

impl Default for Registry {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Registry").field("id", &self.id).finish_non_exhaustive()
  }
}

impl Registry {
  /// Creates a new, empty `Registry`.
  pub fn new() -> Self {
    Self {
      id: next_registry_id(),
      entries: Mutex::new(Entries::default()),
    }
  }

  // --- PRIVATE HELPERS ---

  /// Runs `f` as this registry's critical section.
  fn with_entries<R>(&self, f: impl FnOnce(&mut Entries<SharedInstance, SharedConstructor>) -> R) -> R {
    let _guard = AccessGuard::enter(self.id);
    let mut entries = self.entries.lock();
    f(&mut *entries)
  }

  fn add_singleton(&self, key: TypeKey, construct: impl FnOnce() -> SharedInstance) {
    debug!(type_name = key.type_name(), name = ?key.name(), "registering singleton");
    self.with_entries(|entries| {
      entries.insert_singleton(key, construct);
    });
  }

  fn add_transient(&self, key: TypeKey, constructor: SharedConstructor) {
    debug!(type_name = key.type_name(), name = ?key.name(), "registering transient");
    self.with_entries(|entries| entries.set_transient(key, constructor));
  }

  fn register_internal<I: ?Sized + Any + Send + Sync>(
    &self,
    key: TypeKey,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    match lifecycle {
      Lifecycle::Singleton => {
        self.add_singleton(key, || -> SharedInstance { Box::new(constructor()) })
      }
      Lifecycle::Transient => self.add_transient(
        key,
        Box::new(move || -> SharedInstance { Box::new(constructor()) }),
      ),
    }
  }

  fn resolve_internal<T: ?Sized + Any + Send + Sync>(&self, key: TypeKey) -> Result<Arc<T>> {
    let resolved = self.with_entries(|entries| {
      if let Some(instance) = entries
        .singleton(&key)
        .and_then(|instance| instance.downcast_ref::<Arc<T>>())
      {
        return Some(Arc::clone(instance));
      }
      entries
        .transient(&key)
        .and_then(|construct| construct().downcast::<Arc<T>>().ok())
        .map(|arc_in_a_box| *arc_in_a_box)
    });

    match resolved {
      Some(instance) => {
        trace!(type_name = key.type_name(), name = ?key.name(), "resolved dependency");
        Ok(instance)
      }
      None => {
        debug!(type_name = key.type_name(), name = ?key.name(), "dependency not found");
        Err(RegistryError::not_found(&key))
      }
    }
  }

  // --- PUBLIC API ---

  // --- Registration ---

  /// Registers a constructor for `T` with the given lifecycle.
  ///
  /// For [`Lifecycle::Singleton`] the constructor runs immediately, before this
  /// call returns, unless a singleton for `T` already exists, in which case the
  /// call is ignored with a warning. For [`Lifecycle::Transient`] the constructor
  /// replaces any previously registered transient constructor for `T`.
  ///
  /// # Panics
  ///
  /// Panics if called from inside a constructor running on this same registry.
  pub fn register<T: Any + Send + Sync>(
    &self,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.register_internal(TypeKey::of::<T>(None), lifecycle, move || Arc::new(constructor()));
  }

  /// Like [`register`](Self::register), keyed by `T` and `name`.
  pub fn register_named<T: Any + Send + Sync>(
    &self,
    name: &str,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> T + Send + Sync + 'static,
  ) {
    self.register_internal(
      TypeKey::of::<T>(Some(name)),
      lifecycle,
      move || Arc::new(constructor()),
    );
  }

  /// Registers a constructor for a trait object `I` (e.g. `dyn Greeter`).
  ///
  /// The entry is keyed by `I` itself, so it is resolved with `resolve::<dyn Greeter>()`.
  pub fn register_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.register_internal(TypeKey::of::<I>(None), lifecycle, constructor);
  }

  /// Like [`register_trait`](Self::register_trait), keyed by `I` and `name`.
  pub fn register_trait_named<I: ?Sized + Any + Send + Sync>(
    &self,
    name: &str,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Arc<I> + Send + Sync + 'static,
  ) {
    self.register_internal(TypeKey::of::<I>(Some(name)), lifecycle, constructor);
  }

  /// Registers an already built instance as the singleton for `T`.
  ///
  /// Follows the singleton policy: ignored with a warning if one already exists.
  pub fn register_instance<T: Any + Send + Sync>(&self, instance: T) {
    self.add_singleton(TypeKey::of::<T>(None), move || -> SharedInstance {
      Box::new(Arc::new(instance))
    });
  }

  /// Like [`register_instance`](Self::register_instance), keyed by `T` and `name`.
  pub fn register_instance_named<T: Any + Send + Sync>(&self, name: &str, instance: T) {
    self.add_singleton(TypeKey::of::<T>(Some(name)), move || -> SharedInstance {
      Box::new(Arc::new(instance))
    });
  }

  // --- Resolution ---

  /// Resolves an instance of `T`.
  ///
  /// A singleton entry is preferred; it is returned as the same `Arc` on every
  /// call. Otherwise a transient constructor is run and its fresh result returned.
  ///
  /// # Errors
  ///
  /// Returns [`RegistryError::DependencyNotFound`] if no entry exists for `T`.
  /// The registry is left untouched in that case.
  ///
  /// # Panics
  ///
  /// Panics if called from inside a constructor running on this same registry.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>> {
    self.resolve_internal(TypeKey::of::<T>(None))
  }

  /// Like [`resolve`](Self::resolve), keyed by `T` and `name`.
  pub fn resolve_named<T: ?Sized + Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>> {
    self.resolve_internal(TypeKey::of::<T>(Some(name)))
  }

  // --- Inspection ---

  /// Returns `true` if a singleton or transient entry exists for `T`.
  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    let key = TypeKey::of::<T>(None);
    self.with_entries(|entries| entries.contains(&key))
  }

  /// Like [`contains`](Self::contains), keyed by `T` and `name`.
  pub fn contains_named<T: ?Sized + Any>(&self, name: &str) -> bool {
    let key = TypeKey::of::<T>(Some(name));
    self.with_entries(|entries| entries.contains(&key))
  }

  /// Number of stored entries, singleton and transient combined.
  pub fn len(&self) -> usize {
    self.with_entries(|entries| entries.len())
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Removes every entry.
  ///
  /// Singletons are released, not torn down: instances still held by callers
  /// stay alive until their last `Arc` is dropped.
  pub fn clear(&self) {
    debug!(registry = self.id, "clearing registry");
    self.with_entries(|entries| entries.clear());
  }
}
