//! Pipeline stages.

use std::fmt;

use bitflags::bitflags;

/// A single stage of the graphics pipeline, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShaderStage {
    Vertex,
    TessControl,
    TessEval,
    Geometry,
    Fragment,
}

impl ShaderStage {
    /// All stages in pipeline order.
    pub const ALL: [ShaderStage; 5] = [
        ShaderStage::Vertex,
        ShaderStage::TessControl,
        ShaderStage::TessEval,
        ShaderStage::Geometry,
        ShaderStage::Fragment,
    ];

    /// Short name used for generated identifiers and output naming.
    pub const fn short_name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vert",
            ShaderStage::TessControl => "tesc",
            ShaderStage::TessEval => "tese",
            ShaderStage::Geometry => "geom",
            ShaderStage::Fragment => "frag",
        }
    }

    /// Parse a short name produced by [`short_name`](Self::short_name).
    pub fn from_short_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.short_name() == name)
    }

    /// The single-stage flag for this stage.
    pub const fn flag(self) -> ShaderStages {
        match self {
            ShaderStage::Vertex => ShaderStages::VERTEX,
            ShaderStage::TessControl => ShaderStages::TESS_CONTROL,
            ShaderStage::TessEval => ShaderStages::TESS_EVAL,
            ShaderStage::Geometry => ShaderStages::GEOMETRY,
            ShaderStage::Fragment => ShaderStages::FRAGMENT,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

bitflags! {
    /// A set of pipeline stages.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ShaderStages: u8 {
        const VERTEX = 1 << 0;
        const TESS_CONTROL = 1 << 1;
        const TESS_EVAL = 1 << 2;
        const GEOMETRY = 1 << 3;
        const FRAGMENT = 1 << 4;
    }
}

impl ShaderStages {
    /// Iterate the contained stages in pipeline order.
    pub fn stages(self) -> impl Iterator<Item = ShaderStage> {
        ShaderStage::ALL
            .into_iter()
            .filter(move |s| self.contains(s.flag()))
    }
}

impl From<ShaderStage> for ShaderStages {
    fn from(stage: ShaderStage) -> Self {
        stage.flag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_round_trip() {
        for stage in ShaderStage::ALL {
            assert_eq!(ShaderStage::from_short_name(stage.short_name()), Some(stage));
        }
        assert_eq!(ShaderStage::from_short_name("comp"), None);
    }

    #[test]
    fn stages_iterate_in_pipeline_order() {
        let set = ShaderStages::FRAGMENT | ShaderStages::VERTEX;
        let stages: Vec<_> = set.stages().collect();
        assert_eq!(stages, vec![ShaderStage::Vertex, ShaderStage::Fragment]);
    }

    #[test]
    fn pipeline_ordering() {
        assert!(ShaderStage::Vertex < ShaderStage::Fragment);
        assert!(ShaderStage::Geometry < ShaderStage::Fragment);
    }
}
