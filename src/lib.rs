//! VSL shader compiler backend.
//!
//! Semantic model and GLSL generation for VSL shader programs. The front-end
//! (parsing and type checking) drives these pieces:
//!
//! - [`TypeRegistry`]: builtin and user types by name
//! - [`ScopeTable`]: global variable declarations
//! - [`names`]: pure mapping from type descriptors to GLSL tokens
//! - [`Generator`]: per-stage GLSL emission
//! - [`Unit`]: all of the above for one program
//!
//! The crates can also be used directly: `vsl-core` holds the data model,
//! `vsl-registry` the name tables and `vsl-codegen` the generator.

mod unit;

pub use unit::{CompiledShaders, Unit};

pub use vsl_codegen::generator::PREAMBLE;
pub use vsl_codegen::{
    BindingCategory, BindingNameError, BindingTableSizes, BindingTypeName, Generator,
    MAX_BINDING_INDICES, names,
};
pub use vsl_core::{
    BaseType, BindingVariable, CodegenError, CompilerPhase, ImageDims, InterfaceVariable,
    NumericType, ProtocolViolation, RegistrationError, ScalarKind, ShaderStage, ShaderStages,
    ShaderType, StructMember, StructType, SubpassInputVariable, TexelType, TypeRef,
    UniformVariable, Variable, VariableKind, VslError,
};
pub use vsl_registry::{ScopeTable, TypeRegistry};
