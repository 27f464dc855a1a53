//! Statements written into the active stage body.

use vsl_core::{CodegenError, ProtocolViolation, Variable};

use super::{Generator, array_suffix};
use crate::bindings::MAX_BINDING_INDICES;
use crate::names;

/// Value placeholder in image store templates.
const STORE_PLACEHOLDER: &str = "{}";

impl Generator {
    /// Declare a function-local variable.
    pub fn emit_declaration(&mut self, var: &Variable) -> Result<(), CodegenError> {
        self.require_active("emit_declaration")?;
        let token = names::general_type_name(&var.data_type).ok_or_else(|| {
            CodegenError::unmappable(format!("declaration '{}'", var.name), &*var.data_type)
        })?;
        self.write_line(
            "emit_declaration",
            &format!("{token} {}{};", var.name, array_suffix(var.array_size)),
        )
    }

    /// Write `left op right;`.
    pub fn emit_assignment(&mut self, left: &str, op: &str, right: &str) -> Result<(), CodegenError> {
        self.write_line("emit_assignment", &format!("{left} {op} {right};"))
    }

    /// Write an image store, substituting `value` for the first `{}` in `template`.
    pub fn emit_image_store(&mut self, template: &str, value: &str) -> Result<(), CodegenError> {
        self.require_active("emit_image_store")?;
        if !template.contains(STORE_PLACEHOLDER) {
            return Err(CodegenError::MissingPlaceholder {
                template: template.to_string(),
            });
        }
        let statement = template.replacen(STORE_PLACEHOLDER, value, 1);
        self.write_line("emit_image_store", &format!("{statement};"))
    }

    /// Unpack binding sub-index `index` into a local, once per stage body.
    pub fn emit_binding_index(&mut self, index: u32) -> Result<(), CodegenError> {
        self.require_active("emit_binding_index")?;
        if index >= MAX_BINDING_INDICES {
            return Err(CodegenError::BindingIndexOutOfRange {
                index,
                max: MAX_BINDING_INDICES - 1,
            });
        }
        if self.binding_mask.contains(index) {
            return Ok(());
        }

        self.write_line(
            "emit_binding_index",
            &format!(
                "uint {} = {};",
                names::binding_index_name(index),
                names::binding_index_text(index)
            ),
        )?;
        self.binding_mask.insert(index);
        Ok(())
    }

    pub fn emit_if(&mut self, condition: &str) -> Result<(), CodegenError> {
        self.write_line("emit_if", &format!("if ({condition}) {{"))?;
        self.indent += 1;
        Ok(())
    }

    pub fn emit_elif(&mut self, condition: &str) -> Result<(), CodegenError> {
        self.write_line("emit_elif", &format!("else if ({condition}) {{"))?;
        self.indent += 1;
        Ok(())
    }

    pub fn emit_else(&mut self) -> Result<(), CodegenError> {
        self.write_line("emit_else", "else {")?;
        self.indent += 1;
        Ok(())
    }

    /// Close the innermost open block.
    pub fn emit_block_close(&mut self) -> Result<(), CodegenError> {
        self.require_active("emit_block_close")?;
        if self.indent <= 1 {
            return Err(ProtocolViolation::NoOpenBlock.into());
        }
        self.indent -= 1;
        self.write_line("emit_block_close", "}")
    }

    /// Number of blocks currently open in the active body.
    pub fn open_blocks(&self) -> usize {
        self.indent.saturating_sub(1)
    }

    fn require_active(&self, operation: &'static str) -> Result<(), CodegenError> {
        match self.current {
            Some(_) => Ok(()),
            None => Err(ProtocolViolation::StageInactive { operation }.into()),
        }
    }
}
