//! Steps behind `upi-patch parameters`: ARM deployment templates turned into
//! parameter files for the storage, bootstrap, master and worker deployments.

use serde_json::{json, Value};
use std::fmt;
use std::path::{Path, PathBuf};

use super::{input, SourceDocument, TransformStep};
use crate::document::{FieldPath, Format, JsonStyle, OutputStyle};
use crate::encoding;
use crate::error::Result;
use crate::params::ParameterSet;

const COMPACT: OutputStyle = OutputStyle::Json(JsonStyle::Compact);

/// Ignition spec version of the bootstrap pointer config
pub const IGNITION_VERSION: &str = "2.2.0";

/// Blob URL of the RHCOS image uploaded to `storage_account`
pub fn image_url(storage_account: &str) -> String {
    format!(
        "https://{}.blob.core.windows.net/vhd/rhcos.vhd",
        storage_account
    )
}

/// Small ignition config that makes the bootstrap node fetch its real
/// config from `source`
pub fn bootstrap_ignition(source: &str) -> Value {
    json!({
        "ignition": {
            "version": IGNITION_VERSION,
            "config": {"replace": {"source": source}}
        }
    })
}

/// Base64 of the compact JSON rendering of an ignition config
fn encode_ignition(ignition: &Value) -> Result<String> {
    encoding::encode_bytes(&serde_json::to_vec(ignition)?)
}

/// Points the storage template at the uploaded RHCOS image
#[derive(Debug, Clone)]
pub struct StorageParameters {
    template: PathBuf,
    output: PathBuf,
}

impl StorageParameters {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

impl TransformStep for StorageParameters {
    fn name(&self) -> &'static str {
        "StorageParameters"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.template.clone()]
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Json)?;
        doc.set(
            &"parameters.image.value".into(),
            image_url(params.storage_account()?),
        )?;
        doc.to_text(&COMPACT)
    }
}

/// Embeds the bootstrap pointer ignition and the SSH key
#[derive(Debug, Clone)]
pub struct BootstrapParameters {
    template: PathBuf,
    output: PathBuf,
}

impl BootstrapParameters {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }
}

impl TransformStep for BootstrapParameters {
    fn name(&self) -> &'static str {
        "BootstrapParameters"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.template.clone()]
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Json)?;
        let ignition = bootstrap_ignition(params.ignition_url()?);

        doc.set(
            &"parameters.BootstrapIgnition.value".into(),
            encode_ignition(&ignition)?,
        )?;
        doc.set(
            &"parameters.sshKeyData.value".into(),
            params.ssh_public_key()?.trim_end(),
        )?;
        doc.to_text(&COMPACT)
    }
}

/// Which node pool a [`NodeParameters`] step prepares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Master,
    Worker,
}

impl NodeRole {
    /// Template parameter carrying the encoded ignition config
    pub fn ignition_parameter(&self) -> &'static str {
        match self {
            NodeRole::Master => "MasterIgnition",
            NodeRole::Worker => "WorkerIgnition",
        }
    }

    fn ignition<'a>(&self, params: &'a ParameterSet) -> Result<&'a Value> {
        match self {
            NodeRole::Master => params.master_ignition(),
            NodeRole::Worker => params.worker_ignition(),
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Master => write!(f, "master"),
            NodeRole::Worker => write!(f, "worker"),
        }
    }
}

/// Embeds a node pool's full ignition config and the SSH key
#[derive(Debug, Clone)]
pub struct NodeParameters {
    role: NodeRole,
    template: PathBuf,
    output: PathBuf,
}

impl NodeParameters {
    pub fn new(role: NodeRole, template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            role,
            template: template.into(),
            output: output.into(),
        }
    }
}

impl TransformStep for NodeParameters {
    fn name(&self) -> &'static str {
        match self.role {
            NodeRole::Master => "MasterParameters",
            NodeRole::Worker => "WorkerParameters",
        }
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.template.clone()]
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Json)?;
        let ignition_field = FieldPath::from("parameters")
            .child(self.role.ignition_parameter())
            .child("value");

        doc.set(
            &ignition_field,
            encode_ignition(self.role.ignition(params)?)?,
        )?;
        doc.set(
            &"parameters.sshKeyData.value".into(),
            params.ssh_public_key()?.trim_end(),
        )?;
        doc.to_text(&COMPACT)
    }
}
