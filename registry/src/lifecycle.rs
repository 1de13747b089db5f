//! Lifecycle policies for registered dependencies.

/// How long a registered dependency lives and how often it is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifecycle {
  /// Constructed once, at registration time, and shared by every resolution.
  ///
  /// A second singleton registration for the same key is ignored with a warning.
  Singleton,
  /// Constructed anew on every resolution.
  ///
  /// A second transient registration for the same key replaces the first.
  #[default]
  Transient,
}
