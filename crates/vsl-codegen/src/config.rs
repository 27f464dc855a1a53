//! Generator configuration.

use crate::bindings::BindingCategory;

/// Element counts of the shared resource table arrays.
///
/// Each non-buffer binding category is emitted as one array per type token;
/// buffer bindings use the `buffers` size for their block arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindingTableSizes {
    pub samplers: u16,
    pub images: u16,
    pub buffers: u16,
    pub ro_texels: u16,
    pub rw_texels: u16,
}

impl Default for BindingTableSizes {
    fn default() -> Self {
        Self {
            samplers: 1024,
            images: 256,
            buffers: 512,
            ro_texels: 128,
            rw_texels: 128,
        }
    }
}

impl BindingTableSizes {
    pub fn with_samplers(mut self, size: u16) -> Self {
        self.samplers = size;
        self
    }

    pub fn with_images(mut self, size: u16) -> Self {
        self.images = size;
        self
    }

    pub fn with_buffers(mut self, size: u16) -> Self {
        self.buffers = size;
        self
    }

    pub fn with_ro_texels(mut self, size: u16) -> Self {
        self.ro_texels = size;
        self
    }

    pub fn with_rw_texels(mut self, size: u16) -> Self {
        self.rw_texels = size;
        self
    }

    /// Array size for a binding category.
    pub fn size_for(&self, category: BindingCategory) -> u16 {
        match category {
            BindingCategory::Samplers => self.samplers,
            BindingCategory::Images => self.images,
            BindingCategory::Buffers => self.buffers,
            BindingCategory::ReadOnlyTexels => self.ro_texels,
            BindingCategory::ReadWriteTexels => self.rw_texels,
        }
    }
}
