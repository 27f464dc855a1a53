//! Core data model for the VSL shader compiler.
//!
//! This crate holds everything the registry and the code generator share:
//!
//! - [`types`]: the closed set of shader type descriptors ([`ShaderType`])
//! - [`variable`]: declared variables and their interface/binding specializations
//! - [`stage`]: pipeline stages ([`ShaderStage`], [`ShaderStages`])
//! - [`error`]: the per-phase error hierarchy ([`VslError`])

pub mod error;
pub mod stage;
pub mod types;
pub mod variable;

pub use error::{CodegenError, CompilerPhase, ProtocolViolation, RegistrationError, VslError};
pub use stage::{ShaderStage, ShaderStages};
pub use types::{
    BaseType, ImageDims, NumericType, ScalarKind, ShaderType, StructMember, StructType,
    TexelType, TypeRef,
};
pub use variable::{
    BindingVariable, InterfaceVariable, SubpassInputVariable, UniformVariable, Variable,
    VariableKind,
};
