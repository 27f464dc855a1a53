//! VSL Registry crate.
//!
//! Holds the two name tables the front-end fills before code generation:
//!
//! - [`TypeRegistry`]: builtin and user-defined types by name
//! - [`ScopeTable`]: global variable declarations by name

mod builtins;
pub mod scope;
pub mod type_registry;

pub use builtins::builtin_types;
pub use scope::ScopeTable;
pub use type_registry::TypeRegistry;

// Re-export the core model so callers only need this crate for registration.
pub use vsl_core::{RegistrationError, ShaderType, TypeRef, Variable};
