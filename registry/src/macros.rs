//! Public macros for resolving dependencies that must be present.

/// Resolves a dependency from the global registry.
///
/// A missing dependency is a wiring bug, so this macro panics instead of
/// returning an error. For a recoverable lookup, call
/// `global().resolve::<T>()` directly.
///
/// # Panics
///
/// Panics if the dependency is not registered.
///
/// # Examples
///
/// ```
/// use fibre_registry::{global, resolve, Lifecycle};
///
/// global().register_named("greeting", Lifecycle::Singleton, || String::from("hello"));
///
/// let message = resolve!(String, "greeting");
/// assert_eq!(*message, "hello");
/// ```
///
/// ```
/// use fibre_registry::{global, resolve, Lifecycle};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// global().register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(EnglishGreeter));
///
/// let greeter = resolve!(trait Greeter);
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
#[macro_export]
macro_rules! resolve {
    // resolve!(trait MyTrait)
    (trait $trait_ident:ident) => {
        $crate::resolve_from!($crate::global(), trait $trait_ident)
    };

    // resolve!(trait MyTrait, "name")
    (trait $trait_ident:ident, $name:expr) => {
        $crate::resolve_from!($crate::global(), trait $trait_ident, $name)
    };

    // resolve!(MyService)
    ($type:ty) => {
        $crate::resolve_from!($crate::global(), $type)
    };

    // resolve!(MyService, "name")
    ($type:ty, $name:expr) => {
        $crate::resolve_from!($crate::global(), $type, $name)
    };
}

/// Resolves a dependency from an explicit registry, panicking if it is missing.
///
/// Accepts the same forms as [`resolve!`], preceded by the registry expression.
///
/// ```
/// use fibre_registry::{resolve_from, Lifecycle, Registry};
///
/// let registry = Registry::new();
/// registry.register(Lifecycle::Transient, || 42_u32);
/// assert_eq!(*resolve_from!(registry, u32), 42);
/// ```
#[macro_export]
macro_rules! resolve_from {
    ($registry:expr, trait $trait_ident:ident) => {
        $registry
            .resolve::<dyn $trait_ident>()
            .unwrap_or_else(|err| panic!("Failed to resolve required trait dependency: {}", err))
    };

    ($registry:expr, trait $trait_ident:ident, $name:expr) => {
        $registry
            .resolve_named::<dyn $trait_ident>($name)
            .unwrap_or_else(|err| panic!("Failed to resolve required trait dependency: {}", err))
    };

    ($registry:expr, $type:ty) => {
        $registry
            .resolve::<$type>()
            .unwrap_or_else(|err| panic!("Failed to resolve required dependency: {}", err))
    };

    ($registry:expr, $type:ty, $name:expr) => {
        $registry
            .resolve_named::<$type>($name)
            .unwrap_or_else(|err| panic!("Failed to resolve required dependency: {}", err))
    };
}
