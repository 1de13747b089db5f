// registry/src/local_registry.rs

//! A single-threaded, non-thread-safe dependency registry.

use crate::core::{Entries, TypeKey};
use crate::error::{RegistryError, Result};
use crate::lifecycle::Lifecycle;
use std::any::Any;
use std::rc::Rc;
use tracing::debug;

type LocalInstance = Box<dyn Any>;
type LocalConstructor = Box<dyn Fn() -> LocalInstance>;

/// A single-threaded dependency registry.
///
/// Same lifecycle policies as [`Registry`](crate::Registry): singletons are
/// built at registration time and the first one wins, transient constructors
/// are replaced by later registrations. It stores instances behind `Rc`, so
/// services do not need to be `Send` or `Sync`.
///
/// # Note on API
///
/// There is no lock. Registration takes `&mut self`, so the borrow checker
/// provides the exclusive access that `Registry` gets from its mutex.
#[derive(Default)]
pub struct LocalRegistry {
  entries: Entries<LocalInstance, LocalConstructor>,
}

impl LocalRegistry {
  /// Creates a new, empty `LocalRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn register_internal<I: ?Sized + Any>(
    &mut self,
    key: TypeKey,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Rc<I> + 'static,
  ) {
    debug!(type_name = key.type_name(), name = ?key.name(), ?lifecycle, "registering local dependency");
    match lifecycle {
      Lifecycle::Singleton => {
        self
          .entries
          .insert_singleton(key, || -> LocalInstance { Box::new(constructor()) });
      }
      Lifecycle::Transient => self.entries.set_transient(
        key,
        Box::new(move || -> LocalInstance { Box::new(constructor()) }),
      ),
    }
  }

  fn register_instance_internal<T: Any>(&mut self, key: TypeKey, instance: T) {
    debug!(type_name = key.type_name(), name = ?key.name(), "registering local instance");
    self
      .entries
      .insert_singleton(key, move || -> LocalInstance { Box::new(Rc::new(instance)) });
  }

  fn resolve_internal<T: ?Sized + Any>(&self, key: TypeKey) -> Result<Rc<T>> {
    if let Some(instance) = self
      .entries
      .singleton(&key)
      .and_then(|instance| instance.downcast_ref::<Rc<T>>())
    {
      return Ok(Rc::clone(instance));
    }

    self
      .entries
      .transient(&key)
      .and_then(|construct| construct().downcast::<Rc<T>>().ok())
      .map(|rc_in_a_box| *rc_in_a_box)
      .ok_or_else(|| RegistryError::not_found(&key))
  }

  // --- PUBLIC API ---

  pub fn register<T: Any>(&mut self, lifecycle: Lifecycle, constructor: impl Fn() -> T + 'static) {
    self.register_internal(TypeKey::of::<T>(None), lifecycle, move || Rc::new(constructor()));
  }

  pub fn register_named<T: Any>(
    &mut self,
    name: &str,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> T + 'static,
  ) {
    self.register_internal(
      TypeKey::of::<T>(Some(name)),
      lifecycle,
      move || Rc::new(constructor()),
    );
  }

  pub fn register_trait<I: ?Sized + Any>(
    &mut self,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Rc<I> + 'static,
  ) {
    self.register_internal(TypeKey::of::<I>(None), lifecycle, constructor);
  }

  pub fn register_trait_named<I: ?Sized + Any>(
    &mut self,
    name: &str,
    lifecycle: Lifecycle,
    constructor: impl Fn() -> Rc<I> + 'static,
  ) {
    self.register_internal(TypeKey::of::<I>(Some(name)), lifecycle, constructor);
  }

  pub fn register_instance<T: Any>(&mut self, instance: T) {
    self.register_instance_internal(TypeKey::of::<T>(None), instance);
  }

  pub fn register_instance_named<T: Any>(&mut self, name: &str, instance: T) {
    self.register_instance_internal(TypeKey::of::<T>(Some(name)), instance);
  }

  /// Resolves an instance of `T`.
  ///
  /// Returns [`RegistryError::DependencyNotFound`] if `T` is not registered.
  pub fn resolve<T: ?Sized + Any>(&self) -> Result<Rc<T>> {
    self.resolve_internal(TypeKey::of::<T>(None))
  }

  pub fn resolve_named<T: ?Sized + Any>(&self, name: &str) -> Result<Rc<T>> {
    self.resolve_internal(TypeKey::of::<T>(Some(name)))
  }

  pub fn contains<T: ?Sized + Any>(&self) -> bool {
    self.entries.contains(&TypeKey::of::<T>(None))
  }

  pub fn contains_named<T: ?Sized + Any>(&self, name: &str) -> bool {
    self.entries.contains(&TypeKey::of::<T>(Some(name)))
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.len() == 0
  }

  pub fn clear(&mut self) {
    self.entries.clear();
  }
}
