//! # Fibre Registry
//!
//! A concurrency-safe dependency registry for Rust.
//!
//! Callers register constructors or fixed instances keyed by type, and later
//! resolve instances of that type through a single serialized access point.
//! It decouples building a component from using it in applications where
//! several startup tasks resolve shared services in parallel.
//!
//! ## Core Concepts
//!
//! - **Registry**: owns every registered entry behind one lock. Each
//!   registration and resolution is one critical section.
//! - **Lifecycles**: a [`Lifecycle::Singleton`] is built eagerly, at registration
//!   time, and shared by every resolution. The first singleton registration wins.
//!   A [`Lifecycle::Transient`] is built anew on each resolution, and the last
//!   transient registration wins.
//! - **Resolution**: [`Registry::resolve`] returns `Result<Arc<T>, RegistryError>`.
//!   A missing dependency is a recoverable error.
//! - **Must-have dependencies**: the [`resolve!`] macro and [`Inject`] treat a
//!   missing dependency as a wiring bug and panic.
//! - **Global Registry**: a process-wide registry, accessible via [`global()`].
//!
//! ## Quick Start
//!
//! ```
//! use fibre_registry::{Lifecycle, Registry, RegistryError};
//! use std::sync::Arc;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct HelloGreeter;
//!
//! impl Greeter for HelloGreeter {
//!     fn greet(&self) -> String {
//!         "Hello World".to_string()
//!     }
//! }
//!
//! trait Clock: Send + Sync {}
//!
//! let registry = Registry::new();
//! registry.register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(HelloGreeter));
//!
//! let greeter = registry.resolve::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "Hello World");
//!
//! let missing = registry.resolve::<dyn Clock>();
//! assert!(matches!(missing, Err(RegistryError::DependencyNotFound { .. })));
//! ```
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events and installs no subscriber. An ignored
//! duplicate singleton registration is reported at `WARN`.

mod core;
mod error;
mod global;
mod inject;
mod lifecycle;
#[cfg(feature = "local")]
mod local_registry;
mod macros;
mod registry;

pub use error::{RegistryError, Result};
pub use global::global;
pub use inject::Inject;
pub use lifecycle::Lifecycle;
#[cfg(feature = "local")]
pub use local_registry::LocalRegistry;
pub use registry::Registry;
