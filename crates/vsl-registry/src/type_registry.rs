//! TypeRegistry - builtin and user-defined types by name.
//!
//! The builtin table is shared by every registry and cannot be changed. User
//! types are kept in a per-registry map and may never reuse a name from either
//! table: adding `float` or adding the same struct twice both fail, so a name
//! always resolves to exactly one descriptor.
//!
//! # Example
//!
//! ```
//! use vsl_core::{ShaderType, StructMember, StructType};
//! use vsl_registry::TypeRegistry;
//!
//! let mut registry = TypeRegistry::new();
//! let float4 = registry.resolve("float4").unwrap();
//!
//! let light = StructType::new("Light", vec![StructMember::new("color", float4)]);
//! registry.add("Light", ShaderType::Struct(light)).unwrap();
//!
//! assert!(registry.resolve("Light").is_some());
//! assert!(registry.add("float", ShaderType::Void).is_err());
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use vsl_core::{RegistrationError, ShaderType, TypeRef};

use crate::builtins::builtin_types;

/// Type lookup for one compilation.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    /// User types; never contains a builtin name.
    added: FxHashMap<String, TypeRef>,
}

impl TypeRegistry {
    /// Create a registry with only the builtin types visible.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user type.
    ///
    /// Fails without modifying the registry if `name` is already a user type
    /// or a builtin type.
    pub fn add(
        &mut self,
        name: impl Into<String>,
        ty: ShaderType,
    ) -> Result<TypeRef, RegistrationError> {
        let name = name.into();
        self.check_name(&name)?;

        log::trace!("registered type '{name}' as {ty}");
        let type_ref = Arc::new(ty);
        self.added.insert(name, Arc::clone(&type_ref));
        Ok(type_ref)
    }

    /// Check that `name` is free for a new user type.
    pub fn check_name(&self, name: &str) -> Result<(), RegistrationError> {
        if Self::is_builtin(name) {
            return Err(RegistrationError::BuiltinShadowed(name.to_string()));
        }
        if self.added.contains_key(name) {
            return Err(RegistrationError::DuplicateType(name.to_string()));
        }
        Ok(())
    }

    /// Look up a type by name, user types first, then builtins.
    pub fn resolve(&self, name: &str) -> Option<TypeRef> {
        self.added
            .get(name)
            .or_else(|| builtin_types().get(name))
            .cloned()
    }

    /// Check if a name resolves to any type.
    pub fn contains(&self, name: &str) -> bool {
        self.added.contains_key(name) || Self::is_builtin(name)
    }

    /// Check if a name belongs to the builtin table.
    pub fn is_builtin(name: &str) -> bool {
        builtin_types().contains_key(name)
    }

    /// The shared builtin table.
    pub fn builtin_types() -> &'static FxHashMap<String, TypeRef> {
        builtin_types()
    }

    /// Number of user types.
    pub fn len(&self) -> usize {
        self.added.len()
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
    }
}
