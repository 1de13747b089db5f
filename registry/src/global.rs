//! The global registry instance and its access function.

use crate::registry::Registry;
use once_cell::sync::Lazy;

// Created on first access, in a thread-safe manner.
static GLOBAL_REGISTRY: Lazy<Registry> = Lazy::new(Registry::new);

/// Provides a reference to the process-wide registry.
///
/// Wiring code can register dependencies here from any thread, and the
/// [`resolve!`](crate::resolve) macro and [`Inject::new`](crate::Inject::new)
/// resolve from it.
///
/// # Examples
///
/// ```
/// use fibre_registry::{global, Lifecycle};
///
/// fn register_services() {
///   global().register(Lifecycle::Singleton, || String::from("Hello from global!"));
/// }
/// ```
pub fn global() -> &'static Registry {
  &GLOBAL_REGISTRY
}
