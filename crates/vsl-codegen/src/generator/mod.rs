//! The per-stage GLSL emitter.
//!
//! A [`Generator`] is driven by the front-end in source order. Declarations
//! that belong to the whole program (structs, bindings, the uniform block,
//! the binding-index push constants) go to a shared preamble; interface
//! declarations go to the header of the stage they belong to; statements go
//! to the body of the currently active stage.
//!
//! ```text
//!   begin_stage(vert)          end_stage()        begin_stage(frag) ...
//! Inactive ───────────► Active(vert) ───────────► Inactive ───────────►
//! ```
//!
//! A stage source is assembled as `preamble + header + body` and is only
//! available for stages that have been activated and ended.
//!
//! Every emission either appends well-formed text or returns an error and
//! leaves the output untouched. Callers are expected to abort the pass on
//! the first error.

mod output;
mod statements;

pub use output::StageOutput;

use rustc_hash::FxHashSet;
use vsl_core::{
    BindingVariable, CodegenError, InterfaceVariable, ProtocolViolation, ShaderStage,
    ShaderStages, ShaderType, StructType, SubpassInputVariable, UniformVariable, Variable,
};

use crate::bindings::{
    BindingCategory, BindingIndexMask, BindingSlot, MAX_BINDING_INDICES, SUBPASS_INPUT_SET,
    UNIFORM_SET, binding_index_field_count,
};
use crate::config::BindingTableSizes;
use crate::names::{self, BINDING_INDICES_BLOCK, BINDING_INDICES_INSTANCE, BindingNameError};
use output::{ENTRY_CLOSE, StageOutputs};

/// Fixed start of every generated source.
pub const PREAMBLE: &str = "/// This file generated by vslc\n\
                            #version 450 core\n\
                            #extension GL_EXT_scalar_block_layout : require\n\
                            \n";

/// Stateful GLSL emitter for one compilation.
#[derive(Debug)]
pub struct Generator {
    table_sizes: BindingTableSizes,
    globals: String,
    outputs: StageOutputs,
    current: Option<ShaderStage>,
    /// Indentation depth of the active body; 1 inside `main` with no open block.
    indent: usize,
    /// Sub-indices already unpacked in the active body.
    binding_mask: BindingIndexMask,
    next_buffer_id: u32,
    next_local_location: u32,
    emitted_tables: FxHashSet<String>,
    uniform_emitted: bool,
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(BindingTableSizes::default())
    }
}

impl Generator {
    pub fn new(table_sizes: BindingTableSizes) -> Self {
        Self {
            table_sizes,
            globals: PREAMBLE.to_string(),
            outputs: StageOutputs::default(),
            current: None,
            indent: 0,
            binding_mask: BindingIndexMask::default(),
            next_buffer_id: 0,
            next_local_location: 0,
            emitted_tables: FxHashSet::default(),
            uniform_emitted: false,
        }
    }

    // ========================================================================
    // Stage transitions
    // ========================================================================

    /// Make `stage` the active stage and open its entry function.
    ///
    /// Activating a stage a second time starts a new body; the header is kept.
    pub fn begin_stage(&mut self, stage: ShaderStage) -> Result<(), CodegenError> {
        if let Some(active) = self.current {
            return Err(ProtocolViolation::StageAlreadyActive {
                active,
                requested: stage,
            }
            .into());
        }

        let output = self.outputs.entry(stage);
        if output.is_activated() {
            log::warn!("stage '{stage}' activated again, previous body discarded");
        }
        output.open_body();

        self.current = Some(stage);
        self.indent = 1;
        self.binding_mask.clear();
        log::debug!("begin stage '{stage}'");
        Ok(())
    }

    /// Close the active stage's entry function and return to inactive.
    pub fn end_stage(&mut self) -> Result<ShaderStage, CodegenError> {
        let stage = self.current.ok_or(ProtocolViolation::StageInactive {
            operation: "end_stage",
        })?;
        if self.indent > 1 {
            return Err(ProtocolViolation::UnclosedBlocks {
                stage,
                open: self.indent - 1,
            }
            .into());
        }

        let body = self.active_body("end_stage")?;
        body.push_str(ENTRY_CLOSE);

        self.current = None;
        self.indent = 0;
        self.binding_mask.clear();
        log::debug!("end stage '{stage}'");
        Ok(stage)
    }

    pub fn current_stage(&self) -> Option<ShaderStage> {
        self.current
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// Whether `stage` has ever been made active.
    pub fn is_stage_activated(&self, stage: ShaderStage) -> bool {
        self.outputs
            .get(stage)
            .is_some_and(StageOutput::is_activated)
    }

    pub fn activated_stages(&self) -> ShaderStages {
        self.outputs.activated()
    }

    // ========================================================================
    // Finalization
    // ========================================================================

    /// Assemble the complete source of `stage`.
    ///
    /// Returns `None` if the stage was never activated or is still active.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn stage_source(&self, stage: ShaderStage) -> Option<String> {
        if self.current == Some(stage) {
            return None;
        }
        let output = self.outputs.get(stage)?;
        let body = output.body.as_deref()?;

        let mut source =
            String::with_capacity(self.globals.len() + output.header.len() + body.len());
        source.push_str(&self.globals);
        source.push_str(&output.header);
        source.push_str(body);
        Some(source)
    }

    /// Sources of every finished stage, in pipeline order.
    pub fn stage_sources(&self) -> Vec<(ShaderStage, String)> {
        self.activated_stages()
            .stages()
            .filter_map(|stage| self.stage_source(stage).map(|source| (stage, source)))
            .collect()
    }

    /// The shared preamble written so far.
    pub fn globals(&self) -> &str {
        &self.globals
    }

    /// The interface location the next interpolated local will use.
    pub fn next_local_location(&self) -> u32 {
        self.next_local_location
    }

    // ========================================================================
    // Preamble declarations
    // ========================================================================

    /// Declare a struct type.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit_struct(&mut self, ty: &StructType) -> Result<(), CodegenError> {
        let mut text = format!("struct {} {{\n", names::struct_type_name(&ty.name));
        for member in &ty.members {
            let token = match &*member.data_type {
                ShaderType::Numeric(numeric) => names::numeric_name(numeric).map(str::to_string),
                ShaderType::Struct(inner) => Some(names::struct_type_name(&inner.name)),
                _ => None,
            }
            .ok_or_else(|| {
                CodegenError::unmappable(
                    format!("struct member '{}.{}'", ty.name, member.name),
                    &*member.data_type,
                )
            })?;
            text.push_str(&format!(
                "\t{token} {}{};\n",
                member.name,
                array_suffix(member.array_size)
            ));
        }
        text.push_str("};\n\n");

        log::trace!("emitted struct '{}'", ty.name);
        self.globals.push_str(&text);
        Ok(())
    }

    /// Declare the uniform block at set 1, slot 0.
    pub fn emit_uniform(&mut self, uniform: &UniformVariable) -> Result<(), CodegenError> {
        if self.uniform_emitted {
            return Err(CodegenError::DuplicateUniform {
                name: uniform.name.clone(),
            });
        }

        let body = match &*uniform.data_type {
            ShaderType::Uniform { body } => body
                .as_deref()
                .and_then(ShaderType::struct_name)
                .ok_or_else(|| CodegenError::IncompleteType {
                    name: uniform.name.clone(),
                    detail: uniform.data_type.to_string(),
                })?,
            other => {
                return Err(CodegenError::unmappable(
                    format!("uniform '{}'", uniform.name),
                    other,
                ));
            }
        };

        self.globals.push_str(&format!(
            "layout(set = {UNIFORM_SET}, binding = 0, scalar) uniform _UBUFFER0_ {{\n\t{} {};\n}};\n\n",
            names::struct_type_name(body),
            uniform.name
        ));
        self.uniform_emitted = true;
        Ok(())
    }

    /// Declare a resource binding in its category's shared table.
    ///
    /// Buffer kinds get one block array per binding. All other kinds share
    /// one table array per type token, declared by the first binding of that
    /// token.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit_binding(&mut self, binding: &BindingVariable) -> Result<(), CodegenError> {
        let ty = &*binding.data_type;
        let mapped = names::binding_type_name(ty).map_err(|err| match err {
            BindingNameError::Unmappable => {
                CodegenError::unmappable(format!("binding '{}'", binding.name), ty)
            }
            BindingNameError::InvalidExtra => CodegenError::InvalidBindingExtra {
                name: binding.name.clone(),
            },
        })?;
        let category = BindingCategory::of(ty).ok_or_else(|| CodegenError::InvalidBindingKind {
            name: binding.name.clone(),
            kind: ty.base_type(),
        })?;
        let slot = BindingSlot::for_category(category, &self.table_sizes);

        let mut layout = format!("layout(set = {}, binding = {}", slot.set, slot.binding);
        if let Some(extra) = mapped.extra {
            layout.push_str(", ");
            layout.push_str(extra);
        }
        layout.push(')');

        if ty.is_buffer() {
            let body = ty
                .body()
                .and_then(|body| body.struct_name())
                .ok_or_else(|| CodegenError::IncompleteType {
                    name: binding.name.clone(),
                    detail: ty.to_string(),
                })?;
            let body = names::struct_type_name(body);
            let (qualifier, member) = match ty {
                ShaderType::Uniform { .. } => ("uniform", format!("{body} _data_")),
                ShaderType::ReadOnlyBuffer { .. } => ("readonly buffer", format!("{body} _data_[]")),
                _ => ("buffer", format!("{body} _data_[]")),
            };

            let id = self.next_buffer_id;
            self.next_buffer_id += 1;
            self.globals.push_str(&format!(
                "{layout} {qualifier} _BUFFER{id}_ {{\n\t{member};\n}} {}[{}];\n\n",
                binding.name, slot.table_size
            ));
        } else {
            let table = names::binding_table_name(&mapped);
            if self.emitted_tables.contains(&table) {
                log::debug!("binding '{}' reuses table '{table}'", binding.name);
                return Ok(());
            }
            self.globals.push_str(&format!(
                "{layout} uniform {} {table}[{}];\n\n",
                mapped.token, slot.table_size
            ));
            self.emitted_tables.insert(table);
        }

        log::trace!("emitted binding '{}' as {ty}", binding.name);
        Ok(())
    }

    /// Declare the push-constant block for sub-indices `0..=max_index`.
    ///
    /// Returns the number of 32-bit fields declared.
    pub fn emit_binding_indices(&mut self, max_index: u32) -> Result<u32, CodegenError> {
        if max_index >= MAX_BINDING_INDICES {
            return Err(CodegenError::BindingIndexOutOfRange {
                index: max_index,
                max: MAX_BINDING_INDICES - 1,
            });
        }

        let count = binding_index_field_count(max_index);
        let mut text = format!("layout (push_constant) uniform {BINDING_INDICES_BLOCK} {{\n");
        for field in 0..count {
            text.push_str(&format!("\tuint index{field};\n"));
        }
        text.push_str(&format!("}} {BINDING_INDICES_INSTANCE};\n\n"));

        self.globals.push_str(&text);
        Ok(count)
    }

    // ========================================================================
    // Stage interface declarations
    // ========================================================================

    /// Declare a vertex attribute in the vertex header.
    pub fn emit_vertex_input(&mut self, var: &InterfaceVariable) -> Result<(), CodegenError> {
        let token = interface_type_name(var, "vertex input")?;
        self.outputs
            .header_mut(ShaderStage::Vertex)
            .push_str(&format!(
                "layout(location = {}) in {token} {}{};\n\n",
                var.location,
                var.name,
                array_suffix(var.array_size)
            ));
        Ok(())
    }

    /// Declare a color output in the fragment header.
    pub fn emit_fragment_output(&mut self, var: &InterfaceVariable) -> Result<(), CodegenError> {
        let token = interface_type_name(var, "fragment output")?;
        self.outputs
            .header_mut(ShaderStage::Fragment)
            .push_str(&format!(
                "layout(location = {}) out {token} {}{};\n\n",
                var.location,
                var.name,
                array_suffix(var.array_size)
            ));
        Ok(())
    }

    /// Declare an input attachment in the fragment header.
    pub fn emit_subpass_input(&mut self, input: &SubpassInputVariable) -> Result<(), CodegenError> {
        let token = names::subpass_input_type_name(input.component).ok_or_else(|| {
            CodegenError::unmappable(format!("subpass input '{}'", input.name), input.component)
        })?;
        let index = input.index;
        self.outputs
            .header_mut(ShaderStage::Fragment)
            .push_str(&format!(
                "layout(set = {SUBPASS_INPUT_SET}, binding = {index}, input_attachment_index = {index}) uniform {token} {};\n\n",
                input.name
            ));
        Ok(())
    }

    /// Declare a local passed from `producer` to `consumer`.
    ///
    /// Writes an output into the producer's header and a matching input into
    /// the consumer's header, both at the next interface location. Returns
    /// the location used.
    pub fn emit_local(
        &mut self,
        var: &Variable,
        producer: ShaderStage,
        consumer: ShaderStage,
    ) -> Result<u32, CodegenError> {
        if producer >= consumer {
            return Err(ProtocolViolation::InvalidStagePair { producer, consumer }.into());
        }

        // One location per local, so only scalars and vectors fit
        let token = var
            .data_type
            .numeric()
            .filter(|numeric| !numeric.is_matrix())
            .and_then(names::numeric_name)
            .filter(|_| !var.is_array())
            .ok_or_else(|| {
                CodegenError::unmappable(
                    format!("local '{}'", var.name),
                    format!("{}{}", var.data_type, array_suffix(var.array_size)),
                )
            })?;
        let flat = if var.is_flat() { "flat " } else { "" };

        let location = self.next_local_location;
        self.next_local_location += 1;
        self.outputs.header_mut(producer).push_str(&format!(
            "layout(location = {location}) {flat}out {token} _{producer}_{};\n\n",
            var.name
        ));
        self.outputs.header_mut(consumer).push_str(&format!(
            "layout(location = {location}) {flat}in {token} _{consumer}_{};\n\n",
            var.name
        ));
        Ok(location)
    }

    // ========================================================================
    // Body access
    // ========================================================================

    fn active_body(&mut self, operation: &'static str) -> Result<&mut String, CodegenError> {
        let stage = self
            .current
            .ok_or(ProtocolViolation::StageInactive { operation })?;
        self.outputs
            .body_mut(stage)
            .ok_or_else(|| ProtocolViolation::StageInactive { operation }.into())
    }

    /// Append one indented line to the active body.
    fn write_line(&mut self, operation: &'static str, line: &str) -> Result<(), CodegenError> {
        let indent = "\t".repeat(self.indent);
        let body = self.active_body(operation)?;
        body.push_str(&indent);
        body.push_str(line);
        body.push('\n');
        Ok(())
    }
}

fn array_suffix(array_size: u32) -> String {
    if array_size != 1 {
        format!("[{array_size}]")
    } else {
        String::new()
    }
}

fn interface_type_name(
    var: &InterfaceVariable,
    context: &str,
) -> Result<&'static str, CodegenError> {
    var.data_type
        .numeric()
        .and_then(names::numeric_name)
        .ok_or_else(|| {
            CodegenError::unmappable(format!("{context} '{}'", var.name), &*var.data_type)
        })
}
