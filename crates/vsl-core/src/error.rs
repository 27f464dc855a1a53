//! Error types for the VSL compiler core.
//!
//! ## Error Hierarchy
//!
//! ```text
//! VslError (top-level wrapper)
//! ├── RegistrationError - Type and global name collisions (recoverable)
//! └── CodegenError      - Generation failures (abort the pass)
//!     └── ProtocolViolation - Misuse of the generator by the caller
//! ```
//!
//! Registration errors are returned as values so a front-end can collect
//! several before giving up. Any [`CodegenError`] ends the generation pass:
//! nothing is ever substituted into the output in place of a failed mapping.

use thiserror::Error;

use crate::stage::ShaderStage;
use crate::types::BaseType;

/// The compiler phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompilerPhase {
    Registration,
    Generate,
}

impl CompilerPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            CompilerPhase::Registration => "registration",
            CompilerPhase::Generate => "generate",
        }
    }
}

impl std::fmt::Display for CompilerPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

/// Name collisions in the type registry or the global scope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// A user type with this name already exists.
    #[error("duplicate type: {0}")]
    DuplicateType(String),

    /// A user type would shadow a builtin type.
    #[error("type '{0}' collides with a builtin type")]
    BuiltinShadowed(String),

    /// A global with this name already exists.
    #[error("duplicate global: {0}")]
    DuplicateGlobal(String),
}

impl RegistrationError {
    /// The colliding name.
    pub fn name(&self) -> &str {
        match self {
            RegistrationError::DuplicateType(name)
            | RegistrationError::BuiltinShadowed(name)
            | RegistrationError::DuplicateGlobal(name) => name,
        }
    }
}

// ============================================================================
// Generation Errors
// ============================================================================

/// The caller drove the generator out of order.
///
/// These indicate a bug in the front-end rather than in the shader source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolViolation {
    /// A body statement was emitted with no active stage.
    #[error("'{operation}' requires an active stage")]
    StageInactive {
        /// The emission call that was rejected.
        operation: &'static str,
    },

    /// A stage was started while another was still active.
    #[error("cannot begin stage '{requested}' while stage '{active}' is active")]
    StageAlreadyActive {
        active: ShaderStage,
        requested: ShaderStage,
    },

    /// A block close was emitted with no open block.
    #[error("block close with no open block")]
    NoOpenBlock,

    /// A stage was ended with blocks still open.
    #[error("stage '{stage}' ended with {open} unclosed block(s)")]
    UnclosedBlocks { stage: ShaderStage, open: usize },

    /// Output was requested while a stage was still active.
    #[error("stage '{stage}' was never ended")]
    StageNotEnded { stage: ShaderStage },

    /// An interpolated local was paired across stages in the wrong order.
    #[error("stage '{producer}' does not precede stage '{consumer}'")]
    InvalidStagePair {
        producer: ShaderStage,
        consumer: ShaderStage,
    },
}

/// Errors that abort a generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A descriptor has no target-language equivalent.
    #[error("unmappable type for {context}: {detail}")]
    UnmappableType {
        /// What was being emitted (e.g. "struct member 'Light.color'").
        context: String,
        /// The offending descriptor.
        detail: String,
    },

    /// A resource type maps, but its texel-format qualifier does not.
    #[error("invalid binding extra type for '{name}'")]
    InvalidBindingExtra { name: String },

    /// The type of a binding has no resource table.
    #[error("type kind {kind} of '{name}' cannot be placed in a binding table")]
    InvalidBindingKind { name: String, kind: BaseType },

    /// A builtin placeholder was used without being specialized.
    #[error("incomplete type for '{name}': {detail}")]
    IncompleteType { name: String, detail: String },

    /// An image store template lacks its value placeholder.
    #[error("image store template '{template}' has no '{{}}' placeholder")]
    MissingPlaceholder { template: String },

    /// A binding sub-index does not fit the index mask.
    #[error("binding index {index} out of range (maximum is {max})")]
    BindingIndexOutOfRange { index: u32, max: u32 },

    /// The single uniform block slot is already taken.
    #[error("uniform block already emitted, cannot emit '{name}'")]
    DuplicateUniform { name: String },

    #[error("protocol violation: {0}")]
    Protocol(#[from] ProtocolViolation),
}

impl CodegenError {
    /// Create an unmappable-type error.
    pub fn unmappable(context: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        CodegenError::UnmappableType {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    /// Whether this error is a caller contract breach.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(self, CodegenError::Protocol(_))
    }
}

// ============================================================================
// Top-level
// ============================================================================

/// Any error produced by the compiler core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VslError {
    #[error("registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("generate error: {0}")]
    Codegen(#[from] CodegenError),
}

impl VslError {
    /// The phase this error was raised in.
    pub fn phase(&self) -> CompilerPhase {
        match self {
            VslError::Registration(_) => CompilerPhase::Registration,
            VslError::Codegen(_) => CompilerPhase::Generate,
        }
    }
}

impl From<ProtocolViolation> for VslError {
    fn from(value: ProtocolViolation) -> Self {
        VslError::Codegen(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_error_names() {
        let err = RegistrationError::BuiltinShadowed("float".into());
        assert_eq!(err.name(), "float");
        assert_eq!(err.to_string(), "type 'float' collides with a builtin type");
    }

    #[test]
    fn phase_tagging() {
        let reg: VslError = RegistrationError::DuplicateGlobal("x".into()).into();
        assert_eq!(reg.phase(), CompilerPhase::Registration);

        let gen_err: VslError = ProtocolViolation::NoOpenBlock.into();
        assert_eq!(gen_err.phase(), CompilerPhase::Generate);
        assert_eq!(
            gen_err.to_string(),
            "generate error: protocol violation: block close with no open block"
        );
    }

    #[test]
    fn placeholder_message_keeps_braces() {
        let err = CodegenError::MissingPlaceholder {
            template: "imageStore(img, uv, value)".into(),
        };
        assert_eq!(
            err.to_string(),
            "image store template 'imageStore(img, uv, value)' has no '{}' placeholder"
        );
    }

    #[test]
    fn unmappable_helper() {
        let err = CodegenError::unmappable("binding 'tex'", "Sampler<None>");
        assert!(!err.is_protocol_violation());
        assert_eq!(
            err.to_string(),
            "unmappable type for binding 'tex': Sampler<None>"
        );
    }
}
