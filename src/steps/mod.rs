//! Template transform steps.
//!
//! A step declares the files it reads and the file it writes, and renders
//! the output text from the run's [`ParameterSet`] and the input contents.
//! Steps never touch the filesystem; the [`crate::pipeline`] driver reads
//! inputs before calling [`TransformStep::render`] and writes the result.

pub mod manifests;
pub mod templates;

use std::path::{Path, PathBuf};

use crate::document::{Document, Format};
use crate::error::{ErrorCode, PatchError, Result};
use crate::params::ParameterSet;

pub use manifests::{
    CloudCredsSecret, CloudProviderConfig, ClusterDnsConfig, ClusterInfrastructureConfig,
    IngressController,
};
pub use templates::{BootstrapParameters, NodeParameters, NodeRole, StorageParameters};

/// Contents of one input file
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub text: String,
}

impl SourceDocument {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Parse the contents, tagging any format error with this file's path
    pub fn parse(&self, format: Format) -> Result<Document> {
        Document::parse(&self.text, format).map_err(|e| e.with_path(&self.path))
    }
}

/// One named unit of the substitution pipeline
pub trait TransformStep {
    fn name(&self) -> &'static str;

    /// Files read, in the order `render` expects them
    fn inputs(&self) -> Vec<PathBuf>;

    /// File written
    fn output(&self) -> &Path;

    /// Produce the output text
    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String>;
}

/// The input at `index`, or a step error if the driver supplied too few
pub(crate) fn input<'a>(
    step: &dyn TransformStep,
    inputs: &'a [SourceDocument],
    index: usize,
) -> Result<&'a SourceDocument> {
    inputs.get(index).ok_or_else(|| {
        PatchError::step_with_code(
            ErrorCode::STEP_MISSING_INPUT,
            step.name(),
            format!("expected {} input(s), got {}", index + 1, inputs.len()),
        )
    })
}
