//! Shader type descriptors.
//!
//! [`ShaderType`] is a closed sum over every value and resource kind the
//! language knows about. Consumers (name mapping, binding slot lookup) match on
//! it exhaustively, so a new kind is a compile error at every site that has to
//! handle it.
//!
//! Some builtin resource types are *incomplete*: `Image2D` has no texel format
//! and `ROBuffer` has no body struct until the front-end specializes them with
//! [`ShaderType::with_texel`] or [`ShaderType::with_body`].

use std::fmt;
use std::sync::Arc;

/// Shared, immutable reference to a type descriptor.
///
/// Registries hand these out; variables and struct members hold them.
pub type TypeRef = Arc<ShaderType>;

// ============================================================================
// Kinds
// ============================================================================

/// Component base type for numeric values and texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Boolean,
    Signed,
    Unsigned,
    Float,
}

impl ScalarKind {
    /// Get the name of this scalar kind.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Boolean => "Boolean",
            ScalarKind::Signed => "Signed",
            ScalarKind::Unsigned => "Unsigned",
            ScalarKind::Float => "Float",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind tag of a [`ShaderType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Void,
    Boolean,
    SignedInt,
    UnsignedInt,
    Float,
    Sampler,
    BoundSampler,
    Texture,
    Image,
    Uniform,
    ReadOnlyBuffer,
    ReadWriteBuffer,
    ReadOnlyTexels,
    ReadWriteTexels,
    SubpassInput,
    Struct,
}

impl BaseType {
    /// Get the name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            BaseType::Void => "Void",
            BaseType::Boolean => "Boolean",
            BaseType::SignedInt => "SignedInt",
            BaseType::UnsignedInt => "UnsignedInt",
            BaseType::Float => "Float",
            BaseType::Sampler => "Sampler",
            BaseType::BoundSampler => "BoundSampler",
            BaseType::Texture => "Texture",
            BaseType::Image => "Image",
            BaseType::Uniform => "Uniform",
            BaseType::ReadOnlyBuffer => "ReadOnlyBuffer",
            BaseType::ReadWriteBuffer => "ReadWriteBuffer",
            BaseType::ReadOnlyTexels => "ReadOnlyTexels",
            BaseType::ReadWriteTexels => "ReadWriteTexels",
            BaseType::SubpassInput => "SubpassInput",
            BaseType::Struct => "Struct",
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Image dimensionality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageDims {
    D1,
    D2,
    D3,
    D1Array,
    D2Array,
    Cube,
    CubeArray,
    /// No dimensionality (plain samplers, texel buffers).
    None,
    /// Depth-comparison sampler.
    Shadow,
}

impl ImageDims {
    /// Get the display name of this dimensionality.
    pub const fn name(self) -> &'static str {
        match self {
            ImageDims::D1 => "1D",
            ImageDims::D2 => "2D",
            ImageDims::D3 => "3D",
            ImageDims::D1Array => "1DArray",
            ImageDims::D2Array => "2DArray",
            ImageDims::Cube => "Cube",
            ImageDims::CubeArray => "CubeArray",
            ImageDims::None => "None",
            ImageDims::Shadow => "Shadow",
        }
    }
}

impl fmt::Display for ImageDims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Payloads
// ============================================================================

/// Shape of a numeric value: scalar, vector or (float only) matrix.
///
/// `rows` is the vector component count; `cols > 1` denotes a matrix with
/// `cols` columns of `rows` components each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NumericType {
    pub base: ScalarKind,
    /// Component size in bytes.
    pub size: u8,
    pub rows: u8,
    pub cols: u8,
}

impl NumericType {
    /// Create a numeric descriptor.
    pub const fn new(base: ScalarKind, size: u8, rows: u8, cols: u8) -> Self {
        Self {
            base,
            size,
            rows,
            cols,
        }
    }

    /// A 4-byte scalar.
    pub const fn scalar(base: ScalarKind) -> Self {
        Self::new(base, 4, 1, 1)
    }

    /// A 4-byte vector with `rows` components.
    pub const fn vector(base: ScalarKind, rows: u8) -> Self {
        Self::new(base, 4, rows, 1)
    }

    /// A 4-byte float matrix with `cols` columns of `rows` components.
    pub const fn matrix(cols: u8, rows: u8) -> Self {
        Self::new(ScalarKind::Float, 4, rows, cols)
    }

    pub fn is_matrix(&self) -> bool {
        self.cols > 1
    }
}

/// Per-texel storage of an image-like resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TexelType {
    pub base: ScalarKind,
    /// Component size in bytes.
    pub size: u8,
    /// Component count (1, 2 or 4 are mappable).
    pub components: u8,
}

impl TexelType {
    pub const fn new(base: ScalarKind, size: u8, components: u8) -> Self {
        Self {
            base,
            size,
            components,
        }
    }
}

impl fmt::Display for TexelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]x{}", self.base, self.size, self.components)
    }
}

/// A member of a user struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructMember {
    pub name: String,
    pub data_type: TypeRef,
    /// Array length; 1 means a plain member.
    pub array_size: u32,
}

impl StructMember {
    /// Create a non-array member.
    pub fn new(name: impl Into<String>, data_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            data_type,
            array_size: 1,
        }
    }

    /// Set the array length.
    pub fn with_array_size(mut self, array_size: u32) -> Self {
        self.array_size = array_size;
        self
    }
}

/// A user struct: a name and its ordered members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructType {
    pub name: String,
    pub members: Vec<StructMember>,
}

impl StructType {
    pub fn new(name: impl Into<String>, members: Vec<StructMember>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }
}

// ============================================================================
// ShaderType
// ============================================================================

/// A value or resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderType {
    Void,
    /// Boolean, integer or float scalar/vector/matrix.
    Numeric(NumericType),
    /// Standalone sampler state (`ImageDims::None` or `ImageDims::Shadow`).
    Sampler { dims: ImageDims },
    /// Combined image + sampler (always float texels).
    BoundSampler { dims: ImageDims },
    /// Sampled image.
    Texture { dims: ImageDims, texel: TexelType },
    /// Storage image; `texel` is `None` for the incomplete builtin.
    Image {
        dims: ImageDims,
        texel: Option<TexelType>,
    },
    /// Uniform buffer; `body` is `None` for the incomplete builtin.
    Uniform { body: Option<TypeRef> },
    ReadOnlyBuffer { body: Option<TypeRef> },
    ReadWriteBuffer { body: Option<TypeRef> },
    ReadOnlyTexels { texel: Option<TexelType> },
    ReadWriteTexels { texel: Option<TexelType> },
    /// Subpass input attachment (always 2D).
    SubpassInput { texel: TexelType },
    Struct(StructType),
}

impl ShaderType {
    /// Get the kind tag of this type.
    pub fn base_type(&self) -> BaseType {
        match self {
            ShaderType::Void => BaseType::Void,
            ShaderType::Numeric(n) => match n.base {
                ScalarKind::Boolean => BaseType::Boolean,
                ScalarKind::Signed => BaseType::SignedInt,
                ScalarKind::Unsigned => BaseType::UnsignedInt,
                ScalarKind::Float => BaseType::Float,
            },
            ShaderType::Sampler { .. } => BaseType::Sampler,
            ShaderType::BoundSampler { .. } => BaseType::BoundSampler,
            ShaderType::Texture { .. } => BaseType::Texture,
            ShaderType::Image { .. } => BaseType::Image,
            ShaderType::Uniform { .. } => BaseType::Uniform,
            ShaderType::ReadOnlyBuffer { .. } => BaseType::ReadOnlyBuffer,
            ShaderType::ReadWriteBuffer { .. } => BaseType::ReadWriteBuffer,
            ShaderType::ReadOnlyTexels { .. } => BaseType::ReadOnlyTexels,
            ShaderType::ReadWriteTexels { .. } => BaseType::ReadWriteTexels,
            ShaderType::SubpassInput { .. } => BaseType::SubpassInput,
            ShaderType::Struct(_) => BaseType::Struct,
        }
    }

    /// Uniform, read-only and read-write buffers.
    pub fn is_buffer(&self) -> bool {
        matches!(
            self,
            ShaderType::Uniform { .. }
                | ShaderType::ReadOnlyBuffer { .. }
                | ShaderType::ReadWriteBuffer { .. }
        )
    }

    /// Whether every payload the kind needs is present.
    pub fn is_complete(&self) -> bool {
        match self {
            ShaderType::Image { texel, .. }
            | ShaderType::ReadOnlyTexels { texel }
            | ShaderType::ReadWriteTexels { texel } => texel.is_some(),
            ShaderType::Uniform { body }
            | ShaderType::ReadOnlyBuffer { body }
            | ShaderType::ReadWriteBuffer { body } => body.is_some(),
            ShaderType::Void
            | ShaderType::Numeric(_)
            | ShaderType::Sampler { .. }
            | ShaderType::BoundSampler { .. }
            | ShaderType::Texture { .. }
            | ShaderType::SubpassInput { .. }
            | ShaderType::Struct(_) => true,
        }
    }

    pub fn numeric(&self) -> Option<&NumericType> {
        match self {
            ShaderType::Numeric(n) => Some(n),
            _ => None,
        }
    }

    /// Image dimensionality of image-bearing kinds.
    pub fn dims(&self) -> Option<ImageDims> {
        match self {
            ShaderType::Sampler { dims }
            | ShaderType::BoundSampler { dims }
            | ShaderType::Texture { dims, .. }
            | ShaderType::Image { dims, .. } => Some(*dims),
            ShaderType::SubpassInput { .. } => Some(ImageDims::D2),
            ShaderType::ReadOnlyTexels { .. } | ShaderType::ReadWriteTexels { .. } => {
                Some(ImageDims::None)
            }
            ShaderType::Void
            | ShaderType::Numeric(_)
            | ShaderType::Uniform { .. }
            | ShaderType::ReadOnlyBuffer { .. }
            | ShaderType::ReadWriteBuffer { .. }
            | ShaderType::Struct(_) => None,
        }
    }

    /// Texel descriptor of texel-carrying kinds, if known.
    pub fn texel(&self) -> Option<TexelType> {
        match self {
            ShaderType::Texture { texel, .. } | ShaderType::SubpassInput { texel } => Some(*texel),
            ShaderType::Image { texel, .. }
            | ShaderType::ReadOnlyTexels { texel }
            | ShaderType::ReadWriteTexels { texel } => *texel,
            _ => None,
        }
    }

    /// Body struct of buffer kinds, if known.
    pub fn body(&self) -> Option<&TypeRef> {
        match self {
            ShaderType::Uniform { body }
            | ShaderType::ReadOnlyBuffer { body }
            | ShaderType::ReadWriteBuffer { body } => body.as_ref(),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            ShaderType::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Name of a struct type.
    pub fn struct_name(&self) -> Option<&str> {
        self.as_struct().map(|s| s.name.as_str())
    }

    /// Specialize an incomplete image or texel buffer with a texel format.
    ///
    /// Returns `None` for kinds that do not take a texel format.
    pub fn with_texel(&self, texel: TexelType) -> Option<ShaderType> {
        match self {
            ShaderType::Image { dims, .. } => Some(ShaderType::Image {
                dims: *dims,
                texel: Some(texel),
            }),
            ShaderType::ReadOnlyTexels { .. } => Some(ShaderType::ReadOnlyTexels {
                texel: Some(texel),
            }),
            ShaderType::ReadWriteTexels { .. } => Some(ShaderType::ReadWriteTexels {
                texel: Some(texel),
            }),
            _ => None,
        }
    }

    /// Specialize an incomplete buffer with its body struct.
    ///
    /// Returns `None` if `self` is not a buffer kind or `body` is not a struct.
    pub fn with_body(&self, body: TypeRef) -> Option<ShaderType> {
        body.as_struct()?;
        match self {
            ShaderType::Uniform { .. } => Some(ShaderType::Uniform { body: Some(body) }),
            ShaderType::ReadOnlyBuffer { .. } => Some(ShaderType::ReadOnlyBuffer { body: Some(body) }),
            ShaderType::ReadWriteBuffer { .. } => {
                Some(ShaderType::ReadWriteBuffer { body: Some(body) })
            }
            _ => None,
        }
    }
}

impl From<NumericType> for ShaderType {
    fn from(value: NumericType) -> Self {
        ShaderType::Numeric(value)
    }
}

impl From<StructType> for ShaderType {
    fn from(value: StructType) -> Self {
        ShaderType::Struct(value)
    }
}

fn fmt_body(f: &mut fmt::Formatter<'_>, kind: &str, body: &Option<TypeRef>) -> fmt::Result {
    match body.as_deref().and_then(ShaderType::struct_name) {
        Some(name) => write!(f, "{kind}<{name}>"),
        None => write!(f, "{kind}<?>"),
    }
}

fn fmt_texel(f: &mut fmt::Formatter<'_>, texel: &Option<TexelType>) -> fmt::Result {
    match texel {
        Some(t) => write!(f, "{t}"),
        None => write!(f, "?"),
    }
}

impl fmt::Display for ShaderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderType::Void => write!(f, "void"),
            ShaderType::Numeric(n) => {
                write!(f, "{}[{}:{}x{}]", n.base, n.size, n.rows, n.cols)
            }
            ShaderType::Sampler { dims } => write!(f, "Sampler<{dims}>"),
            ShaderType::BoundSampler { dims } => write!(f, "BoundSampler<{dims}>"),
            ShaderType::Texture { dims, texel } => write!(f, "Texture<{dims}, {texel}>"),
            ShaderType::Image { dims, texel } => {
                write!(f, "Image<{dims}, ")?;
                fmt_texel(f, texel)?;
                write!(f, ">")
            }
            ShaderType::Uniform { body } => fmt_body(f, "Uniform", body),
            ShaderType::ReadOnlyBuffer { body } => fmt_body(f, "ROBuffer", body),
            ShaderType::ReadWriteBuffer { body } => fmt_body(f, "RWBuffer", body),
            ShaderType::ReadOnlyTexels { texel } => {
                write!(f, "ROTexels<")?;
                fmt_texel(f, texel)?;
                write!(f, ">")
            }
            ShaderType::ReadWriteTexels { texel } => {
                write!(f, "RWTexels<")?;
                fmt_texel(f, texel)?;
                write!(f, ">")
            }
            ShaderType::SubpassInput { texel } => write!(f, "SubpassInput<{texel}>"),
            ShaderType::Struct(s) => write!(f, "struct {}", s.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_struct() -> TypeRef {
        Arc::new(ShaderType::Struct(StructType::new(
            "Light",
            vec![StructMember::new(
                "color",
                Arc::new(NumericType::vector(ScalarKind::Float, 4).into()),
            )],
        )))
    }

    #[test]
    fn base_type_follows_scalar_kind() {
        let int3 = ShaderType::Numeric(NumericType::vector(ScalarKind::Signed, 3));
        let mat = ShaderType::Numeric(NumericType::matrix(4, 4));
        assert_eq!(int3.base_type(), BaseType::SignedInt);
        assert_eq!(mat.base_type(), BaseType::Float);
        assert!(mat.numeric().unwrap().is_matrix());
    }

    #[test]
    fn image_placeholder_is_incomplete() {
        let image = ShaderType::Image {
            dims: ImageDims::D2,
            texel: None,
        };
        assert!(!image.is_complete());

        let full = image
            .with_texel(TexelType::new(ScalarKind::Float, 4, 4))
            .unwrap();
        assert!(full.is_complete());
        assert_eq!(full.dims(), Some(ImageDims::D2));
    }

    #[test]
    fn with_body_requires_struct() {
        let buffer = ShaderType::ReadOnlyBuffer { body: None };
        let float = Arc::new(ShaderType::Numeric(NumericType::scalar(ScalarKind::Float)));
        assert!(buffer.with_body(float).is_none());

        let full = buffer.with_body(light_struct()).unwrap();
        assert!(full.is_buffer());
        assert_eq!(full.body().and_then(|b| b.struct_name()), Some("Light"));
    }

    #[test]
    fn with_texel_rejects_non_image_kinds() {
        let sampler = ShaderType::Sampler {
            dims: ImageDims::None,
        };
        assert!(
            sampler
                .with_texel(TexelType::new(ScalarKind::Float, 4, 1))
                .is_none()
        );
    }

    #[test]
    fn display_describes_descriptor() {
        let mat = ShaderType::Numeric(NumericType::matrix(2, 3));
        assert_eq!(mat.to_string(), "Float[4:3x2]");

        let image = ShaderType::Image {
            dims: ImageDims::Cube,
            texel: None,
        };
        assert_eq!(image.to_string(), "Image<Cube, ?>");

        let uniform = ShaderType::Uniform {
            body: Some(light_struct()),
        };
        assert_eq!(uniform.to_string(), "Uniform<Light>");
    }
}
