//! Compilation unit API.
//!
//! A [`Unit`] bundles the type registry, the global scope and the generator
//! for one shader program. Global declarations go through the unit so each
//! one is checked for a name collision before any text is emitted, and the
//! name is only taken once emission succeeds; body statements are written
//! through [`Unit::generator_mut`].
//!
//! # Example
//!
//! ```
//! use vsl::{InterfaceVariable, ShaderStage, Unit};
//!
//! let mut unit = Unit::new();
//! let float3 = unit.resolve_type("float3").unwrap();
//! let float4 = unit.resolve_type("float4").unwrap();
//!
//! unit.add_vertex_input(InterfaceVariable::new("position", float3, 0))?;
//! unit.add_fragment_output(InterfaceVariable::new("color", float4, 0))?;
//!
//! unit.begin_stage(ShaderStage::Vertex)?;
//! unit.generator_mut().emit_assignment("gl_Position", "=", "vec4(position, 1.0)")?;
//! unit.end_stage()?;
//!
//! unit.begin_stage(ShaderStage::Fragment)?;
//! unit.generator_mut().emit_assignment("color", "=", "vec4(1.0)")?;
//! unit.end_stage()?;
//!
//! let shaders = unit.build()?;
//! assert!(shaders.get(ShaderStage::Vertex).unwrap().contains("in vec3 position;"));
//! # Ok::<(), vsl::VslError>(())
//! ```

use vsl_codegen::{BindingTableSizes, Generator};
use vsl_core::{
    BindingVariable, InterfaceVariable, ProtocolViolation, ShaderStage, ShaderStages, ShaderType,
    StructType, SubpassInputVariable, TypeRef, UniformVariable, Variable, VslError,
};
use vsl_registry::{ScopeTable, TypeRegistry};

/// One shader program being compiled.
#[derive(Debug, Default)]
pub struct Unit {
    types: TypeRegistry,
    scope: ScopeTable,
    generator: Generator,
    /// Highest binding sub-index referenced by any stage.
    max_binding_index: Option<u32>,
}

impl Unit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a unit with custom resource table sizes.
    pub fn with_table_sizes(sizes: BindingTableSizes) -> Self {
        Self {
            generator: Generator::new(sizes),
            ..Self::default()
        }
    }

    pub fn types(&self) -> &TypeRegistry {
        &self.types
    }

    pub fn scope(&self) -> &ScopeTable {
        &self.scope
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    /// Direct access to the generator, for body statements.
    pub fn generator_mut(&mut self) -> &mut Generator {
        &mut self.generator
    }

    pub fn resolve_type(&self, name: &str) -> Option<TypeRef> {
        self.types.resolve(name)
    }

    // ========================================================================
    // Global declarations
    // ========================================================================

    /// Declare a struct type and register it.
    pub fn add_struct(&mut self, ty: StructType) -> Result<TypeRef, VslError> {
        self.types.check_name(&ty.name)?;
        self.generator.emit_struct(&ty)?;
        Ok(self.types.add(ty.name.clone(), ShaderType::Struct(ty))?)
    }

    pub fn add_vertex_input(&mut self, var: InterfaceVariable) -> Result<(), VslError> {
        self.scope.check_global(&var.name)?;
        self.generator.emit_vertex_input(&var)?;
        self.scope.try_add_global(var.into_input())?;
        Ok(())
    }

    pub fn add_fragment_output(&mut self, var: InterfaceVariable) -> Result<(), VslError> {
        self.scope.check_global(&var.name)?;
        self.generator.emit_fragment_output(&var)?;
        self.scope.try_add_global(var.into_output())?;
        Ok(())
    }

    pub fn add_binding(&mut self, binding: BindingVariable) -> Result<(), VslError> {
        self.scope.check_global(&binding.name)?;
        self.generator.emit_binding(&binding)?;
        self.scope.try_add_global(binding)?;
        Ok(())
    }

    pub fn add_uniform(&mut self, uniform: UniformVariable) -> Result<(), VslError> {
        self.scope.check_global(&uniform.name)?;
        self.generator.emit_uniform(&uniform)?;
        self.scope.try_add_global(uniform)?;
        Ok(())
    }

    pub fn add_subpass_input(&mut self, input: SubpassInputVariable) -> Result<(), VslError> {
        self.scope.check_global(&input.name)?;
        self.generator.emit_subpass_input(&input)?;
        self.scope.try_add_global(input)?;
        Ok(())
    }

    /// Declare a local written by `producer` and read by `consumer`.
    ///
    /// Returns the interface location shared by both sides.
    pub fn add_local(
        &mut self,
        var: Variable,
        producer: ShaderStage,
        consumer: ShaderStage,
    ) -> Result<u32, VslError> {
        self.scope.check_global(&var.name)?;
        let location = self.generator.emit_local(&var, producer, consumer)?;
        self.scope.try_add_global(var)?;
        Ok(location)
    }

    // ========================================================================
    // Stages
    // ========================================================================

    pub fn begin_stage(&mut self, stage: ShaderStage) -> Result<(), VslError> {
        Ok(self.generator.begin_stage(stage)?)
    }

    pub fn end_stage(&mut self) -> Result<ShaderStage, VslError> {
        Ok(self.generator.end_stage()?)
    }

    /// Unpack a binding sub-index in the active stage and record it for the
    /// push-constant block.
    pub fn use_binding_index(&mut self, index: u32) -> Result<(), VslError> {
        self.generator.emit_binding_index(index)?;
        self.max_binding_index = Some(self.max_binding_index.map_or(index, |max| max.max(index)));
        Ok(())
    }

    /// Finish the program and collect the source of every stage.
    ///
    /// Declares the push-constant block if any binding index was used.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn build(mut self) -> Result<CompiledShaders, VslError> {
        if let Some(stage) = self.generator.current_stage() {
            return Err(ProtocolViolation::StageNotEnded { stage }.into());
        }
        if let Some(max_index) = self.max_binding_index {
            self.generator.emit_binding_indices(max_index)?;
        }

        let stages = self.generator.stage_sources();
        log::debug!("built {} stage(s)", stages.len());
        Ok(CompiledShaders { stages })
    }
}

/// Finished GLSL sources, one per activated stage in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledShaders {
    stages: Vec<(ShaderStage, String)>,
}

impl CompiledShaders {
    pub fn get(&self, stage: ShaderStage) -> Option<&str> {
        self.stages
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, source)| source.as_str())
    }

    pub fn stages(&self) -> ShaderStages {
        self.stages
            .iter()
            .fold(ShaderStages::empty(), |acc, (stage, _)| acc | stage.flag())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ShaderStage, &str)> {
        self.stages
            .iter()
            .map(|(stage, source)| (*stage, source.as_str()))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsl_core::{CodegenError, RegistrationError, StructMember};

    #[test]
    fn duplicate_global_emits_nothing() {
        let mut unit = Unit::new();
        let float2 = unit.resolve_type("float2").unwrap();
        unit.add_vertex_input(InterfaceVariable::new("uv", float2.clone(), 0))
            .unwrap();
        let before = unit.generator().globals().to_string();

        let err = unit
            .add_local(Variable::local("uv", float2, false), ShaderStage::Vertex, ShaderStage::Fragment)
            .unwrap_err();
        assert_eq!(
            err,
            VslError::from(RegistrationError::DuplicateGlobal("uv".into()))
        );
        assert_eq!(unit.generator().next_local_location(), 0);
        assert_eq!(unit.generator().globals(), before);
    }

    #[test]
    fn struct_registered_and_declared() {
        let mut unit = Unit::new();
        let float = unit.resolve_type("float").unwrap();
        let ty = unit
            .add_struct(StructType::new("Params", vec![StructMember::new("t", float)]))
            .unwrap();

        assert!(std::sync::Arc::ptr_eq(&ty, &unit.resolve_type("Params").unwrap()));
        assert!(unit.generator().globals().contains("struct Params_t {\n\tfloat t;\n};"));
    }

    #[test]
    fn failed_emission_leaves_name_free() {
        let mut unit = Unit::new();
        let rw = unit.resolve_type("RWBuffer").unwrap();
        let err = unit
            .add_binding(BindingVariable::new("data", rw))
            .unwrap_err();
        assert!(matches!(err, VslError::Codegen(CodegenError::IncompleteType { .. })));
        assert!(!unit.scope().has_global("data"));

        let sampler = unit.resolve_type("Sampler").unwrap();
        unit.add_binding(BindingVariable::new("data", sampler)).unwrap();
        assert!(unit.scope().has_global("data"));
    }

    #[test]
    fn failed_struct_is_not_registered() {
        let mut unit = Unit::new();
        let texture = unit.resolve_type("Texture2D").unwrap();
        let err = unit
            .add_struct(StructType::new("Params", vec![StructMember::new("tex", texture)]))
            .unwrap_err();
        assert!(matches!(err, VslError::Codegen(CodegenError::UnmappableType { .. })));
        assert!(unit.resolve_type("Params").is_none());

        let float = unit.resolve_type("float").unwrap();
        unit.add_struct(StructType::new("Params", vec![StructMember::new("t", float)]))
            .unwrap();
        assert!(unit.resolve_type("Params").is_some());
    }

    #[test]
    fn build_requires_ended_stage() {
        let mut unit = Unit::new();
        unit.begin_stage(ShaderStage::Vertex).unwrap();
        assert_eq!(
            unit.build(),
            Err(VslError::from(ProtocolViolation::StageNotEnded {
                stage: ShaderStage::Vertex
            }))
        );
    }

    #[test]
    fn push_constants_sized_by_highest_index() {
        let mut unit = Unit::new();
        unit.begin_stage(ShaderStage::Vertex).unwrap();
        unit.use_binding_index(1).unwrap();
        unit.end_stage().unwrap();
        unit.begin_stage(ShaderStage::Fragment).unwrap();
        unit.use_binding_index(4).unwrap();
        unit.use_binding_index(2).unwrap();
        unit.end_stage().unwrap();

        let shaders = unit.build().unwrap();
        let frag = shaders.get(ShaderStage::Fragment).unwrap();
        assert!(frag.contains("\tuint index2;\n} _bidx_;"));
        assert!(!frag.contains("index3"));
    }

    #[test]
    fn no_push_constants_without_indices() {
        let mut unit = Unit::new();
        unit.begin_stage(ShaderStage::Vertex).unwrap();
        unit.end_stage().unwrap();
        let shaders = unit.build().unwrap();
        assert!(!shaders.get(ShaderStage::Vertex).unwrap().contains("push_constant"));
    }
}
