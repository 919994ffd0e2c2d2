//! Pipeline driver: runs transform steps in order against the filesystem.
//!
//! Steps run strictly one after another. Each step's inputs are read, the
//! step renders its output, and the output is written before the next step
//! starts, so a later step may overwrite an earlier step's output (the
//! bootstrap parameters file is written twice). The first error aborts the
//! run and leaves already-written files as they are.

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{ManifestLayout, PipelineConfig, TemplateLayout};
use crate::document::Format;
use crate::error::{ErrorCode, PatchError, Result};
use crate::params::ParameterSet;
use crate::steps::{
    BootstrapParameters, CloudCredsSecret, CloudProviderConfig, ClusterDnsConfig,
    ClusterInfrastructureConfig, IngressController, NodeParameters, NodeRole, SourceDocument,
    StorageParameters, TransformStep,
};

/// An ordered list of steps
pub struct Pipeline {
    name: &'static str,
    steps: Vec<Box<dyn TransformStep>>,
}

impl Pipeline {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    /// Append a step; steps run in the order they are added
    pub fn step(mut self, step: impl TransformStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Steps of the manifest entry point
    pub fn manifests(layout: &ManifestLayout) -> Self {
        Self::new("manifests")
            .step(CloudCredsSecret::new(&layout.cloud_creds_secret))
            .step(CloudProviderConfig::new(&layout.cloud_provider_config))
            .step(ClusterInfrastructureConfig::new(&layout.infrastructure_config))
            .step(ClusterDnsConfig::new(&layout.dns_config))
            .step(IngressController::new(
                &layout.ingress_controller_source,
                &layout.ingress_controller_output,
            ))
    }

    /// Steps of the parameter entry point
    pub fn parameters(layout: &TemplateLayout) -> Self {
        Self::new("parameters")
            .step(StorageParameters::new(
                &layout.storage_template,
                &layout.bootstrap_parameters,
            ))
            .step(BootstrapParameters::new(
                &layout.bootstrap_template,
                &layout.bootstrap_parameters,
            ))
            .step(NodeParameters::new(
                NodeRole::Master,
                &layout.masters_template,
                &layout.masters_parameters,
            ))
            .step(NodeParameters::new(
                NodeRole::Worker,
                &layout.workers_template,
                &layout.workers_parameters,
            ))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn steps(&self) -> &[Box<dyn TransformStep>] {
        &self.steps
    }
}

/// What one step produced
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: &'static str,
    pub output: PathBuf,
    pub bytes: usize,
    pub written: bool,
}

/// Outcome of a whole run, in step order
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub pipeline: &'static str,
    pub outcomes: Vec<StepOutcome>,
}

/// Reads inputs, runs steps, writes outputs
pub struct PipelineDriver {
    config: PipelineConfig,
    dry_run: bool,
}

impl PipelineDriver {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            dry_run: false,
        }
    }

    /// Render every step without writing any output
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Patch the cluster manifests with the resource group name
    pub fn run_manifests(&self, resource_group: &str) -> Result<RunReport> {
        let params = ParameterSet::new().with_resource_group(resource_group);
        self.run(&Pipeline::manifests(&self.config.manifests), &params)
    }

    /// Produce the storage, bootstrap, master and worker parameter files
    pub fn run_parameters(
        &self,
        ignition_url: &str,
        storage_account: &str,
        ssh_public_key: &str,
    ) -> Result<RunReport> {
        let layout = &self.config.templates;
        let params = ParameterSet::new()
            .with_ignition_url(ignition_url)
            .with_storage_account(storage_account)
            .with_ssh_public_key(ssh_public_key)
            .with_master_ignition(self.load_ignition(NodeRole::Master, &layout.master_ignition)?)
            .with_worker_ignition(self.load_ignition(NodeRole::Worker, &layout.worker_ignition)?);

        self.run(&Pipeline::parameters(layout), &params)
    }

    /// Run every step of `pipeline` in order
    pub fn run(&self, pipeline: &Pipeline, params: &ParameterSet) -> Result<RunReport> {
        info!(
            "Running {} pipeline ({} steps) in {}",
            pipeline.name(),
            pipeline.steps().len(),
            self.config.work_dir.display()
        );

        let mut outcomes = Vec::with_capacity(pipeline.steps().len());
        for step in pipeline.steps() {
            outcomes.push(self.run_step(step.as_ref(), params)?);
        }

        Ok(RunReport {
            pipeline: pipeline.name(),
            outcomes,
        })
    }

    fn run_step(&self, step: &dyn TransformStep, params: &ParameterSet) -> Result<StepOutcome> {
        let inputs = step
            .inputs()
            .iter()
            .map(|path| self.read_source(path))
            .collect::<Result<Vec<_>>>()?;

        let text = step.render(params, &inputs)?;
        let output = self.config.resolve(step.output());

        if self.dry_run {
            info!("{}: would write {} ({} bytes)", step.name(), output.display(), text.len());
        } else {
            write_output(&output, &text)?;
            info!("{}: wrote {}", step.name(), output.display());
        }

        Ok(StepOutcome {
            step: step.name(),
            output,
            bytes: text.len(),
            written: !self.dry_run,
        })
    }

    fn load_ignition(&self, role: NodeRole, path: &Path) -> Result<Value> {
        let source = self.read_source(path)?;
        let ignition = source.parse(Format::Json)?;
        debug!("Loaded {} ignition from {}", role, source.path.display());
        Ok(ignition.into_value())
    }

    fn read_source(&self, path: &Path) -> Result<SourceDocument> {
        let path = self.config.resolve(path);
        let bytes = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PatchError::file_not_found(&path).with_source(e),
            _ => PatchError::from(e).with_path(&path),
        })?;
        debug!("Read {} ({} bytes)", path.display(), bytes.len());

        let text = String::from_utf8(bytes).map_err(|e| {
            PatchError::encoding(e.utf8_error().to_string())
                .with_path(&path)
                .with_source(e)
        })?;
        Ok(SourceDocument::new(path, text))
    }
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    let write_error = |e: std::io::Error| {
        PatchError::io_with_code(ErrorCode::IO_WRITE_FAILED, e.to_string())
            .with_path(path)
            .with_source(e)
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(path, text).map_err(write_error)?;
    debug!("Wrote {} ({} bytes)", path.display(), text.len());
    Ok(())
}
