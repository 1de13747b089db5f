//! A cached handle to a resolved dependency.

use crate::error::Result;
use crate::global::global;
use crate::registry::Registry;
use std::any::{type_name, Any};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A dependency resolved once, when the handle is built, and cached for the
/// lifetime of its owner.
///
/// Resolution happens only at construction. `Inject` never resolves lazily on
/// access, so reading the value cannot block or fail.
///
/// The panicking constructors treat a missing dependency as a wiring bug and
/// halt. Use [`Inject::try_from_registry`] where a missing dependency is an
/// expected condition.
///
/// # Examples
///
/// ```
/// use fibre_registry::{Inject, Lifecycle, Registry};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///   fn greet(&self) -> String;
/// }
///
/// struct HelloGreeter;
/// impl Greeter for HelloGreeter {
///   fn greet(&self) -> String {
///     "Hello World".to_string()
///   }
/// }
///
/// let registry = Registry::new();
/// registry.register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(HelloGreeter));
///
/// let greeter: Inject<dyn Greeter> = Inject::from_registry(&registry);
/// assert_eq!(greeter.greet(), "Hello World");
/// ```
pub struct Inject<T: ?Sized> {
  value: Arc<T>,
}

impl<T: ?Sized + Any + Send + Sync> Inject<T> {
  /// Resolves `T` from the [`global`] registry.
  ///
  /// # Panics
  ///
  /// Panics if `T` is not registered.
  pub fn new() -> Self {
    Self::from_registry(global())
  }

  /// Resolves `T` from `registry`.
  ///
  /// # Panics
  ///
  /// Panics if `T` is not registered.
  pub fn from_registry(registry: &Registry) -> Self {
    Self::try_from_registry(registry)
      .unwrap_or_else(|err| panic!("Failed to inject required dependency: {}", err))
  }

  /// Resolves `T` from `registry`, reporting a missing dependency as an error.
  pub fn try_from_registry(registry: &Registry) -> Result<Self> {
    registry.resolve::<T>().map(|value| Self { value })
  }

  /// Resolves `T` registered under `name` from `registry`.
  ///
  /// # Panics
  ///
  /// Panics if no such entry is registered.
  pub fn from_registry_named(registry: &Registry, name: &str) -> Self {
    Self::try_from_registry_named(registry, name)
      .unwrap_or_else(|err| panic!("Failed to inject required dependency: {}", err))
  }

  /// Resolves `T` registered under `name` from `registry`, reporting a missing
  /// entry as an error.
  pub fn try_from_registry_named(registry: &Registry, name: &str) -> Result<Self> {
    registry.resolve_named::<T>(name).map(|value| Self { value })
  }
}

impl<T: ?Sized> Inject<T> {
  /// Consumes the handle, returning the shared instance.
  pub fn into_inner(self) -> Arc<T> {
    self.value
  }
}

impl<T: ?Sized + Any + Send + Sync> Default for Inject<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T: ?Sized> Deref for Inject<T> {
  type Target = T;

  fn deref(&self) -> &T {
    &self.value
  }
}

impl<T: ?Sized> Clone for Inject<T> {
  fn clone(&self) -> Self {
    Self {
      value: Arc::clone(&self.value),
    }
  }
}

impl<T: ?Sized> fmt::Debug for Inject<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("Inject").field(&type_name::<T>()).finish()
  }
}
