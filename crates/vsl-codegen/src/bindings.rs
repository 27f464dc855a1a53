//! Descriptor set and slot assignment.
//!
//! Resources are addressed bindlessly: every resource of a category lives in
//! one shared table array, and shaders pick an element through a 16-bit
//! sub-index read from the push-constant block.
//!
//! | Set | Binding | Contents                                   |
//! |-----|---------|--------------------------------------------|
//! | 0   | 0       | samplers                                   |
//! | 0   | 1       | storage images                             |
//! | 0   | 2       | uniform, read-only and read-write buffers  |
//! | 0   | 3       | read-only texel buffers                    |
//! | 0   | 4       | read-write texel buffers                   |
//! | 1   | 0       | the uniform block                          |
//! | 2   | n       | subpass input `n`                          |
//!
//! Each binding holds a single descriptor type, so sampled textures and
//! combined image samplers have no table and cannot be bound.

use vsl_core::ShaderType;

use crate::config::BindingTableSizes;

/// Descriptor set holding the shared resource tables.
pub const RESOURCE_SET: u32 = 0;

/// Descriptor set holding the uniform block.
pub const UNIFORM_SET: u32 = 1;

/// Descriptor set holding subpass inputs.
pub const SUBPASS_INPUT_SET: u32 = 2;

/// Number of binding sub-indices a stage can reference.
pub const MAX_BINDING_INDICES: u32 = u64::BITS;

/// Resource table a binding type belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingCategory {
    Samplers,
    Images,
    Buffers,
    ReadOnlyTexels,
    ReadWriteTexels,
}

impl BindingCategory {
    /// Category of a resource type, or `None` for kinds with no resource table.
    pub fn of(ty: &ShaderType) -> Option<Self> {
        match ty {
            ShaderType::Sampler { .. } => Some(BindingCategory::Samplers),
            ShaderType::Image { .. } => Some(BindingCategory::Images),
            ShaderType::Uniform { .. }
            | ShaderType::ReadOnlyBuffer { .. }
            | ShaderType::ReadWriteBuffer { .. } => Some(BindingCategory::Buffers),
            ShaderType::ReadOnlyTexels { .. } => Some(BindingCategory::ReadOnlyTexels),
            ShaderType::ReadWriteTexels { .. } => Some(BindingCategory::ReadWriteTexels),
            ShaderType::Void
            | ShaderType::Numeric(_)
            | ShaderType::BoundSampler { .. }
            | ShaderType::Texture { .. }
            | ShaderType::SubpassInput { .. }
            | ShaderType::Struct(_) => None,
        }
    }

    /// Binding slot within [`RESOURCE_SET`].
    pub const fn slot(self) -> u32 {
        match self {
            BindingCategory::Samplers => 0,
            BindingCategory::Images => 1,
            BindingCategory::Buffers => 2,
            BindingCategory::ReadOnlyTexels => 3,
            BindingCategory::ReadWriteTexels => 4,
        }
    }
}

/// Full location of a resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingSlot {
    pub set: u32,
    pub binding: u32,
    pub table_size: u16,
}

impl BindingSlot {
    pub fn for_category(category: BindingCategory, sizes: &BindingTableSizes) -> Self {
        Self {
            set: RESOURCE_SET,
            binding: category.slot(),
            table_size: sizes.size_for(category),
        }
    }
}

/// Number of 32-bit push-constant fields needed to hold sub-indices `0..=max_index`.
///
/// Each field packs two sub-indices.
pub const fn binding_index_field_count(max_index: u32) -> u32 {
    max_index / 2 + 1
}

/// Sub-indices already unpacked into locals in the current stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BindingIndexMask(u64);

impl BindingIndexMask {
    pub fn contains(&self, index: u32) -> bool {
        index < MAX_BINDING_INDICES && self.0 & (1 << index) != 0
    }

    /// Mark `index` as unpacked. Returns `false` if it already was or if it
    /// is not below [`MAX_BINDING_INDICES`].
    pub fn insert(&mut self, index: u32) -> bool {
        if index >= MAX_BINDING_INDICES {
            return false;
        }
        let bit = 1u64 << index;
        let fresh = self.0 & bit == 0;
        self.0 |= bit;
        fresh
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> u32 {
        self.0.count_ones()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vsl_core::{ImageDims, NumericType, ScalarKind, TexelType};

    #[test]
    fn categories() {
        let sampler = ShaderType::Sampler {
            dims: ImageDims::Shadow,
        };
        assert_eq!(BindingCategory::of(&sampler), Some(BindingCategory::Samplers));
        assert_eq!(
            BindingCategory::of(&ShaderType::ReadWriteBuffer { body: None }),
            Some(BindingCategory::Buffers)
        );
        assert_eq!(
            BindingCategory::of(&ShaderType::Numeric(NumericType::scalar(ScalarKind::Float))),
            None
        );
        assert_eq!(BindingCategory::ReadWriteTexels.slot(), 4);
    }

    #[test]
    fn textures_and_bound_samplers_have_no_table() {
        let tex = ShaderType::Texture {
            dims: ImageDims::D2,
            texel: TexelType::new(ScalarKind::Float, 4, 4),
        };
        let bound = ShaderType::BoundSampler {
            dims: ImageDims::D2,
        };
        assert_eq!(BindingCategory::of(&tex), None);
        assert_eq!(BindingCategory::of(&bound), None);
    }

    #[test]
    fn field_counts() {
        assert_eq!(binding_index_field_count(0), 1);
        assert_eq!(binding_index_field_count(1), 1);
        assert_eq!(binding_index_field_count(2), 2);
        assert_eq!(binding_index_field_count(3), 2);
        assert_eq!(binding_index_field_count(63), 32);
        assert_eq!(binding_index_field_count(u32::MAX), u32::MAX / 2 + 1);
    }

    #[test]
    fn mask_insert_once() {
        let mut mask = BindingIndexMask::default();
        assert!(mask.insert(3));
        assert!(!mask.insert(3));
        assert!(mask.insert(63));
        assert!(mask.contains(63));
        assert!(!mask.contains(64));
        assert_eq!(mask.len(), 2);

        assert!(!mask.insert(64));
        assert!(!mask.insert(u32::MAX));
        assert!(!mask.contains(0));
        assert_eq!(mask.len(), 2);

        mask.clear();
        assert!(mask.is_empty());
    }

    #[test]
    fn slot_uses_configured_size() {
        let sizes = BindingTableSizes::default().with_buffers(64);
        let slot = BindingSlot::for_category(BindingCategory::Buffers, &sizes);
        assert_eq!(
            slot,
            BindingSlot {
                set: 0,
                binding: 2,
                table_size: 64
            }
        );
    }
}
