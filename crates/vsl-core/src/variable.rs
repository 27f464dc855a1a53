//! Declared variables.
//!
//! [`Variable`] is what the scope table stores. The generator's global
//! emission calls take the narrower specializations ([`InterfaceVariable`],
//! [`BindingVariable`], [`UniformVariable`], [`SubpassInputVariable`]), each of
//! which converts into a [`Variable`] for registration.

use std::sync::Arc;

use crate::types::{ScalarKind, ShaderType, TexelType, TypeRef};

/// Storage class and stage-specific extras of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    /// Function-private value.
    Private,
    /// Value passed between adjacent stages.
    Local { flat: bool },
    /// Vertex input at an interface location.
    Input { location: u32 },
    /// Fragment output at an interface location.
    Output { location: u32 },
    /// Resource bound through a binding table.
    Binding,
    /// The uniform block.
    Uniform,
    /// Subpass input attachment.
    SubpassInput { index: u8 },
}

/// A declared variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
    pub data_type: TypeRef,
    /// Array length; 1 means not an array.
    pub array_size: u32,
    pub kind: VariableKind,
}

impl Variable {
    /// Create a non-array variable.
    pub fn new(name: impl Into<String>, data_type: TypeRef, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            data_type,
            array_size: 1,
            kind,
        }
    }

    /// Create a function-private variable.
    pub fn private(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self::new(name, data_type, VariableKind::Private)
    }

    /// Create an interpolated stage local.
    pub fn local(name: impl Into<String>, data_type: TypeRef, flat: bool) -> Self {
        Self::new(name, data_type, VariableKind::Local { flat })
    }

    /// Set the array length.
    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    pub fn is_array(&self) -> bool {
        self.array_size != 1
    }

    /// Whether this is a flat-interpolated local.
    pub fn is_flat(&self) -> bool {
        matches!(self.kind, VariableKind::Local { flat: true })
    }
}

/// A vertex input or fragment output with an explicit location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceVariable {
    pub name: String,
    pub data_type: TypeRef,
    pub array_size: u32,
    pub location: u32,
}

impl InterfaceVariable {
    pub fn new(name: impl Into<String>, data_type: TypeRef, location: u32) -> Self {
        Self {
            name: name.into(),
            data_type,
            array_size: 1,
            location,
        }
    }

    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }

    /// Convert into a vertex-input [`Variable`].
    pub fn into_input(self) -> Variable {
        Variable {
            name: self.name,
            data_type: self.data_type,
            array_size: self.array_size,
            kind: VariableKind::Input {
                location: self.location,
            },
        }
    }

    /// Convert into a fragment-output [`Variable`].
    pub fn into_output(self) -> Variable {
        Variable {
            name: self.name,
            data_type: self.data_type,
            array_size: self.array_size,
            kind: VariableKind::Output {
                location: self.location,
            },
        }
    }
}

/// A resource placed in a binding table.
///
/// The descriptor set and slot are derived from the type by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingVariable {
    pub name: String,
    pub data_type: TypeRef,
}

impl BindingVariable {
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl From<BindingVariable> for Variable {
    fn from(value: BindingVariable) -> Self {
        Variable::new(value.name, value.data_type, VariableKind::Binding)
    }
}

/// The uniform block variable. `data_type` is a `Uniform` buffer type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniformVariable {
    pub name: String,
    pub data_type: TypeRef,
}

impl UniformVariable {
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl From<UniformVariable> for Variable {
    fn from(value: UniformVariable) -> Self {
        Variable::new(value.name, value.data_type, VariableKind::Uniform)
    }
}

/// A fragment-stage subpass input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpassInputVariable {
    pub name: String,
    pub component: ScalarKind,
    pub index: u8,
}

impl SubpassInputVariable {
    pub fn new(name: impl Into<String>, component: ScalarKind, index: u8) -> Self {
        Self {
            name: name.into(),
            component,
            index,
        }
    }
}

impl From<SubpassInputVariable> for Variable {
    fn from(value: SubpassInputVariable) -> Self {
        let data_type = Arc::new(ShaderType::SubpassInput {
            texel: TexelType::new(value.component, 4, 4),
        });
        Variable::new(
            value.name,
            data_type,
            VariableKind::SubpassInput { index: value.index },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericType;

    fn float4() -> TypeRef {
        Arc::new(ShaderType::Numeric(NumericType::vector(ScalarKind::Float, 4)))
    }

    #[test]
    fn interface_variable_directions() {
        let var = InterfaceVariable::new("position", float4(), 2);
        assert_eq!(
            var.clone().into_input().kind,
            VariableKind::Input { location: 2 }
        );
        assert_eq!(var.into_output().kind, VariableKind::Output { location: 2 });
    }

    #[test]
    fn local_flat_flag() {
        assert!(Variable::local("id", float4(), true).is_flat());
        assert!(!Variable::local("uv", float4(), false).is_flat());
        assert!(!Variable::private("tmp", float4()).is_flat());
    }

    #[test]
    fn subpass_input_converts_with_typed_texel() {
        let var: Variable = SubpassInputVariable::new("gbuffer", ScalarKind::Unsigned, 3).into();
        assert_eq!(var.kind, VariableKind::SubpassInput { index: 3 });
        assert_eq!(
            var.data_type.texel(),
            Some(TexelType::new(ScalarKind::Unsigned, 4, 4))
        );
    }

    #[test]
    fn array_size() {
        let var = Variable::private("weights", float4()).with_array_size(8);
        assert!(var.is_array());
        assert_eq!(var.array_size, 8);
    }
}
