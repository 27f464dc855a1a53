//! VSL Code Generator
//!
//! Turns the ordered stream of declarations and statements produced by the
//! front-end into per-stage GLSL source.
//!
//! ## Modules
//!
//! - [`names`]: Pure mapping from type descriptors to GLSL tokens
//! - [`config`]: Binding table size configuration
//! - [`bindings`]: Descriptor set/slot assignment and the binding-index mask
//! - [`generator`]: The stateful per-stage text emitter

pub mod bindings;
pub mod config;
pub mod generator;
pub mod names;

pub use bindings::{BindingCategory, BindingIndexMask, BindingSlot, MAX_BINDING_INDICES};
pub use config::BindingTableSizes;
pub use generator::Generator;
pub use names::{BindingNameError, BindingTypeName};

pub use vsl_core::CodegenError;
