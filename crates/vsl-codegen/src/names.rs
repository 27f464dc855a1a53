//! Type descriptor to GLSL token mapping.
//!
//! Every function here is pure. A `None` (or [`BindingNameError`]) result
//! means the descriptor has no GLSL spelling; the generator turns it into a
//! hard error instead of writing a guessed token.

use vsl_core::{ImageDims, NumericType, ScalarKind, ShaderType, TexelType};

/// Instance name of the push-constant block holding binding indices.
pub const BINDING_INDICES_INSTANCE: &str = "_bidx_";

/// Block name of the push-constant block holding binding indices.
pub const BINDING_INDICES_BLOCK: &str = "_BINDING_INDICES_";

// ============================================================================
// Numeric types
// ============================================================================

/// Map a numeric shape to its scalar, vector or matrix token.
///
/// Only 4-byte components are supported, and only floats form matrices.
/// Matrix tokens are `matCxR` (`cols` columns, `rows` rows).
pub fn numeric_type_name(base: ScalarKind, size: u8, rows: u8, cols: u8) -> Option<&'static str> {
    if size != 4 {
        return None;
    }

    let name = match (base, cols, rows) {
        (ScalarKind::Boolean, 1, 1) => "bool",
        (ScalarKind::Boolean, 1, 2) => "bvec2",
        (ScalarKind::Boolean, 1, 3) => "bvec3",
        (ScalarKind::Boolean, 1, 4) => "bvec4",
        (ScalarKind::Signed, 1, 1) => "int",
        (ScalarKind::Signed, 1, 2) => "ivec2",
        (ScalarKind::Signed, 1, 3) => "ivec3",
        (ScalarKind::Signed, 1, 4) => "ivec4",
        (ScalarKind::Unsigned, 1, 1) => "uint",
        (ScalarKind::Unsigned, 1, 2) => "uvec2",
        (ScalarKind::Unsigned, 1, 3) => "uvec3",
        (ScalarKind::Unsigned, 1, 4) => "uvec4",
        (ScalarKind::Float, 1, 1) => "float",
        (ScalarKind::Float, 1, 2) => "vec2",
        (ScalarKind::Float, 1, 3) => "vec3",
        (ScalarKind::Float, 1, 4) => "vec4",
        (ScalarKind::Float, 2, 2) => "mat2x2",
        (ScalarKind::Float, 2, 3) => "mat2x3",
        (ScalarKind::Float, 2, 4) => "mat2x4",
        (ScalarKind::Float, 3, 2) => "mat3x2",
        (ScalarKind::Float, 3, 3) => "mat3x3",
        (ScalarKind::Float, 3, 4) => "mat3x4",
        (ScalarKind::Float, 4, 2) => "mat4x2",
        (ScalarKind::Float, 4, 3) => "mat4x3",
        (ScalarKind::Float, 4, 4) => "mat4x4",
        _ => return None,
    };
    Some(name)
}

/// [`numeric_type_name`] for a [`NumericType`].
pub fn numeric_name(numeric: &NumericType) -> Option<&'static str> {
    numeric_type_name(numeric.base, numeric.size, numeric.rows, numeric.cols)
}

/// Token used for a struct type declaration.
pub fn struct_type_name(name: &str) -> String {
    format!("{name}_t")
}

/// Token for a function-local declaration of `ty`.
///
/// Covers `void`, numeric types and structs; resources cannot be locals.
pub fn general_type_name(ty: &ShaderType) -> Option<String> {
    match ty {
        ShaderType::Void => Some("void".to_string()),
        ShaderType::Numeric(n) => numeric_name(n).map(str::to_string),
        ShaderType::Struct(s) => Some(struct_type_name(&s.name)),
        _ => None,
    }
}

// ============================================================================
// Images and texels
// ============================================================================

/// Dimension postfix for sampler/texture/image tokens.
pub fn image_dims_postfix(dims: ImageDims) -> Option<&'static str> {
    match dims {
        ImageDims::D1 => Some("1D"),
        ImageDims::D2 => Some("2D"),
        ImageDims::D3 => Some("3D"),
        ImageDims::D1Array => Some("1DArray"),
        ImageDims::D2Array => Some("2DArray"),
        ImageDims::Cube => Some("Cube"),
        ImageDims::CubeArray => Some("CubeArray"),
        ImageDims::None | ImageDims::Shadow => None,
    }
}

/// Signedness prefix for image-like tokens (`usampler2D`, `iimage3D`).
pub fn texel_prefix(base: ScalarKind) -> &'static str {
    match base {
        ScalarKind::Unsigned => "u",
        ScalarKind::Signed => "i",
        ScalarKind::Float | ScalarKind::Boolean => "",
    }
}

/// Storage format qualifier for a texel layout.
///
/// Component counts 1, 2 and 4 are supported. Integer formats are 32-bit;
/// float formats are 32-bit or 8-bit unorm.
pub fn texel_format(base: ScalarKind, size: u8, components: u8) -> Option<&'static str> {
    let format = match (base, size, components) {
        (ScalarKind::Unsigned, 4, 1) => "r32ui",
        (ScalarKind::Unsigned, 4, 2) => "rg32ui",
        (ScalarKind::Unsigned, 4, 4) => "rgba32ui",
        (ScalarKind::Signed, 4, 1) => "r32i",
        (ScalarKind::Signed, 4, 2) => "rg32i",
        (ScalarKind::Signed, 4, 4) => "rgba32i",
        (ScalarKind::Float, 4, 1) => "r32f",
        (ScalarKind::Float, 4, 2) => "rg32f",
        (ScalarKind::Float, 4, 4) => "rgba32f",
        (ScalarKind::Float, 1, 1) => "r8",
        (ScalarKind::Float, 1, 2) => "rg8",
        (ScalarKind::Float, 1, 4) => "rgba8",
        _ => return None,
    };
    Some(format)
}

fn texel_type_format(texel: Option<TexelType>) -> Result<&'static str, BindingNameError> {
    texel
        .and_then(|t| texel_format(t.base, t.size, t.components))
        .ok_or(BindingNameError::InvalidExtra)
}

/// Input attachment token for a subpass input component type.
pub fn subpass_input_type_name(component: ScalarKind) -> Option<String> {
    match component {
        ScalarKind::Boolean => None,
        _ => Some(format!("{}subpassInput", texel_prefix(component))),
    }
}

// ============================================================================
// Bindings
// ============================================================================

/// Why a resource type has no binding spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingNameError {
    /// The base token cannot be formed.
    Unmappable,
    /// The base token is fine but its texel-format qualifier is not.
    InvalidExtra,
}

/// A resource type's GLSL spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTypeName {
    /// Type token. Buffer kinds use a single-space placeholder because the
    /// generator writes the block syntax itself.
    pub token: String,
    /// Extra layout qualifier (block layout or texel format).
    pub extra: Option<&'static str>,
}

impl BindingTypeName {
    fn plain(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            extra: None,
        }
    }

    fn qualified(token: impl Into<String>, extra: &'static str) -> Self {
        Self {
            token: token.into(),
            extra: Some(extra),
        }
    }
}

/// Map a resource type to its binding token and layout qualifier.
pub fn binding_type_name(ty: &ShaderType) -> Result<BindingTypeName, BindingNameError> {
    match ty {
        ShaderType::Sampler { dims } => match dims {
            ImageDims::None => Ok(BindingTypeName::plain("sampler")),
            ImageDims::Shadow => Ok(BindingTypeName::plain("samplerShadow")),
            _ => Err(BindingNameError::Unmappable),
        },
        ShaderType::BoundSampler { dims } => {
            let postfix = image_dims_postfix(*dims).ok_or(BindingNameError::Unmappable)?;
            Ok(BindingTypeName::plain(format!("sampler{postfix}")))
        }
        ShaderType::Texture { dims, texel } => {
            let postfix = image_dims_postfix(*dims).ok_or(BindingNameError::Unmappable)?;
            let prefix = texel_prefix(texel.base);
            Ok(BindingTypeName::plain(format!("{prefix}texture{postfix}")))
        }
        ShaderType::Image { dims, texel } => {
            let postfix = image_dims_postfix(*dims).ok_or(BindingNameError::Unmappable)?;
            let format = texel_type_format(*texel)?;
            let prefix = texel.map_or("", |t| texel_prefix(t.base));
            Ok(BindingTypeName::qualified(
                format!("{prefix}image{postfix}"),
                format,
            ))
        }
        ShaderType::Uniform { .. } => Ok(BindingTypeName::qualified(" ", "std140")),
        ShaderType::ReadOnlyBuffer { .. } | ShaderType::ReadWriteBuffer { .. } => {
            Ok(BindingTypeName::qualified(" ", "std430"))
        }
        ShaderType::ReadOnlyTexels { .. } => Ok(BindingTypeName::plain("textureBuffer")),
        ShaderType::ReadWriteTexels { texel } => {
            let format = texel_type_format(*texel)?;
            Ok(BindingTypeName::qualified("imageBuffer", format))
        }
        ShaderType::SubpassInput { texel } => subpass_input_type_name(texel.base)
            .map(BindingTypeName::plain)
            .ok_or(BindingNameError::Unmappable),
        ShaderType::Void | ShaderType::Numeric(_) | ShaderType::Struct(_) => {
            Err(BindingNameError::Unmappable)
        }
    }
}

/// Name of the shared table array for a non-buffer resource token.
///
/// The format is part of the name so differently formatted images of the
/// same token get distinct tables.
pub fn binding_table_name(binding: &BindingTypeName) -> String {
    match binding.extra {
        Some(format) => format!("_{}_{}_TABLE_", binding.token, format),
        None => format!("_{}_TABLE_", binding.token),
    }
}

// ============================================================================
// Binding indices
// ============================================================================

/// Local variable name caching a binding sub-index.
pub fn binding_index_name(index: u32) -> String {
    format!("_bidx{index}_")
}

/// Expression unpacking a 16-bit binding sub-index from the push constants.
///
/// Two sub-indices share each 32-bit field: even indices in the low half,
/// odd indices in the high half.
pub fn binding_index_text(index: u32) -> String {
    let field = index / 2;
    if index % 2 == 0 {
        format!("({BINDING_INDICES_INSTANCE}.index{field} & 0xFFFF)")
    } else {
        format!("({BINDING_INDICES_INSTANCE}.index{field} >> 16)")
    }
}
