//! The registry's error type.

use crate::core::TypeKey;

/// Errors reported by [`Registry::resolve`](crate::Registry::resolve).
///
/// Registration never fails, so resolution is the only source of errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
  /// No entry of either lifecycle exists for the requested type (and name).
  #[error("dependency of type {type_name} not found in the registry{}", name_suffix(.name))]
  DependencyNotFound {
    type_name: &'static str,
    name: Option<String>,
  },
}

impl RegistryError {
  pub(crate) fn not_found(key: &TypeKey) -> Self {
    RegistryError::DependencyNotFound {
      type_name: key.type_name(),
      name: key.name().map(str::to_owned),
    }
  }

  /// The fully qualified name of the type that was requested.
  pub fn type_name(&self) -> &'static str {
    match self {
      RegistryError::DependencyNotFound { type_name, .. } => *type_name,
    }
  }
}

fn name_suffix(name: &Option<String>) -> String {
  match name {
    Some(name) => format!(" (name: {:?})", name),
    None => String::new(),
  }
}

/// A specialized `Result` type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
