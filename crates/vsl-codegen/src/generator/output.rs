//! Per-stage output buffers.

use rustc_hash::FxHashMap;
use vsl_core::{ShaderStage, ShaderStages};

/// Entry boilerplate written when a stage becomes active.
pub(crate) const ENTRY_OPEN: &str = "void main()\n{\n";

/// Closing boilerplate written when a stage is ended.
pub(crate) const ENTRY_CLOSE: &str = "}\n\n";

/// Text accumulated for one stage.
///
/// The header holds interface declarations and may be written before the
/// stage is ever active. The body exists only once the stage has been
/// activated, which is what makes the stage finalizable.
#[derive(Debug, Default, Clone)]
pub struct StageOutput {
    pub header: String,
    pub body: Option<String>,
}

impl StageOutput {
    pub fn is_activated(&self) -> bool {
        self.body.is_some()
    }

    /// Start a fresh body, replacing any previous one.
    pub(crate) fn open_body(&mut self) -> &mut String {
        self.body.insert(ENTRY_OPEN.to_string())
    }
}

/// Stage outputs keyed by stage, created on first access.
#[derive(Debug, Default)]
pub(crate) struct StageOutputs {
    stages: FxHashMap<ShaderStage, StageOutput>,
}

impl StageOutputs {
    pub fn get(&self, stage: ShaderStage) -> Option<&StageOutput> {
        self.stages.get(&stage)
    }

    pub fn entry(&mut self, stage: ShaderStage) -> &mut StageOutput {
        self.stages.entry(stage).or_default()
    }

    pub fn header_mut(&mut self, stage: ShaderStage) -> &mut String {
        &mut self.entry(stage).header
    }

    pub fn body_mut(&mut self, stage: ShaderStage) -> Option<&mut String> {
        self.stages.get_mut(&stage).and_then(|out| out.body.as_mut())
    }

    pub fn activated(&self) -> ShaderStages {
        self.stages
            .iter()
            .filter(|(_, out)| out.is_activated())
            .fold(ShaderStages::empty(), |acc, (stage, _)| acc | stage.flag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_does_not_activate() {
        let mut outputs = StageOutputs::default();
        outputs.header_mut(ShaderStage::Fragment).push_str("x");
        assert!(!outputs.get(ShaderStage::Fragment).unwrap().is_activated());
        assert!(outputs.activated().is_empty());
    }

    #[test]
    fn reopening_replaces_body() {
        let mut out = StageOutput::default();
        out.open_body().push_str("first");
        out.open_body();
        assert_eq!(out.body.as_deref(), Some(ENTRY_OPEN));
    }

    #[test]
    fn activated_set() {
        let mut outputs = StageOutputs::default();
        outputs.entry(ShaderStage::Vertex).open_body();
        outputs.entry(ShaderStage::Fragment).open_body();
        outputs.header_mut(ShaderStage::Geometry);
        assert_eq!(
            outputs.activated(),
            ShaderStages::VERTEX | ShaderStages::FRAGMENT
        );
    }
}
