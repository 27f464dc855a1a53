//! Global scope management.
//!
//! `ScopeTable` records every global declaration (inputs, outputs, bindings,
//! the uniform, locals shared between stages) and rejects a second global with
//! the same name. There is no shadowing at this level; block scoping belongs
//! to the front-end.

use rustc_hash::FxHashMap;
use vsl_core::{RegistrationError, Variable};

/// Global variables in declaration order.
#[derive(Debug, Default)]
pub struct ScopeTable {
    globals: Vec<Variable>,
    by_name: FxHashMap<String, usize>,
}

impl ScopeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a global.
    ///
    /// Returns `false`, leaving the table untouched, if the name is taken.
    pub fn add_global(&mut self, var: impl Into<Variable>) -> bool {
        self.try_add_global(var).is_ok()
    }

    /// Add a global, reporting a collision as a typed error.
    pub fn try_add_global(&mut self, var: impl Into<Variable>) -> Result<(), RegistrationError> {
        let var = var.into();
        self.check_global(&var.name)?;

        log::trace!("declared global '{}' ({:?})", var.name, var.kind);
        self.by_name.insert(var.name.clone(), self.globals.len());
        self.globals.push(var);
        Ok(())
    }

    /// Check that `name` is free for a new global.
    pub fn check_global(&self, name: &str) -> Result<(), RegistrationError> {
        if self.by_name.contains_key(name) {
            return Err(RegistrationError::DuplicateGlobal(name.to_string()));
        }
        Ok(())
    }

    /// Check if a global with this exact name exists.
    pub fn has_global(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Look up a global by name.
    pub fn get_global(&self, name: &str) -> Option<&Variable> {
        self.by_name.get(name).map(|&index| &self.globals[index])
    }

    /// Iterate globals in the order they were declared.
    pub fn globals(&self) -> impl Iterator<Item = &Variable> {
        self.globals.iter()
    }

    pub fn len(&self) -> usize {
        self.globals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use vsl_core::{
        BindingVariable, ImageDims, NumericType, ScalarKind, ShaderType, VariableKind,
    };

    fn float2() -> Arc<ShaderType> {
        Arc::new(NumericType::vector(ScalarKind::Float, 2).into())
    }

    #[test]
    fn add_and_lookup() {
        let mut scope = ScopeTable::new();
        assert!(scope.add_global(Variable::local("uv", float2(), false)));
        assert!(scope.has_global("uv"));
        assert!(!scope.has_global("UV"));
        assert_eq!(
            scope.get_global("uv").unwrap().kind,
            VariableKind::Local { flat: false }
        );
    }

    #[test]
    fn duplicate_global_keeps_first_entry() {
        let mut scope = ScopeTable::new();
        assert!(scope.add_global(Variable::local("uv", float2(), false)));
        assert!(!scope.add_global(Variable::local("uv", float2(), true)));

        assert_eq!(scope.len(), 1);
        assert!(!scope.get_global("uv").unwrap().is_flat());
    }

    #[test]
    fn try_add_reports_name() {
        let mut scope = ScopeTable::new();
        let sampler = Arc::new(ShaderType::BoundSampler {
            dims: ImageDims::D2,
        });
        scope
            .try_add_global(BindingVariable::new("albedo", sampler.clone()))
            .unwrap();

        let err = scope
            .try_add_global(BindingVariable::new("albedo", sampler))
            .unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateGlobal("albedo".into()));
        assert_eq!(scope.check_global("albedo"), Err(err));
        assert_eq!(scope.check_global("normal"), Ok(()));
        assert_eq!(scope.len(), 1);
    }

    #[test]
    fn globals_keep_declaration_order() {
        let mut scope = ScopeTable::new();
        for name in ["c", "a", "b"] {
            scope.add_global(Variable::private(name, float2()));
        }
        let names: Vec<_> = scope.globals().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }
}
