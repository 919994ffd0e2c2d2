//! Steps behind `upi-patch manifests`: the cluster manifests that need the
//! resource group baked in.

use serde_json::{json, Value};
use std::path::{Path, PathBuf};

use super::{input, SourceDocument, TransformStep};
use crate::document::{FieldPath, Format, JsonStyle, OutputStyle, YamlStyle};
use crate::encoding;
use crate::error::Result;
use crate::params::ParameterSet;

const BLOCK: OutputStyle = OutputStyle::Yaml(YamlStyle::Block);

/// Stores the base64 resource group in the cloud-credentials secret
#[derive(Debug, Clone)]
pub struct CloudCredsSecret {
    path: PathBuf,
}

impl CloudCredsSecret {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransformStep for CloudCredsSecret {
    fn name(&self) -> &'static str {
        "CloudCredsSecret"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }

    fn output(&self) -> &Path {
        &self.path
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Yaml)?;
        let encoded = encoding::encode(params.resource_group()?);

        doc.set(&"data.azure_resource_prefix".into(), encoded.clone())?;
        doc.set(&"data.azure_resourcegroup".into(), encoded)?;
        doc.to_text(&BLOCK)
    }
}

/// Rewrites the JSON cloud config embedded in the cloud-provider ConfigMap
#[derive(Debug, Clone)]
pub struct CloudProviderConfig {
    path: PathBuf,
}

impl CloudProviderConfig {
    pub const VNET_NAME: &'static str = "openshiftVnet";
    pub const SUBNET_NAME: &'static str = "masterSubnet";
    pub const SECURITY_GROUP_NAME: &'static str = "master1nsg";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Fields stamped onto the cloud config, in write order
    fn overrides(resource_group: &str) -> [(&'static str, Value); 7] {
        [
            ("resourceGroup", json!(resource_group)),
            ("vnetName", json!(Self::VNET_NAME)),
            ("vnetResourceGroup", json!(resource_group)),
            ("subnetName", json!(Self::SUBNET_NAME)),
            ("securityGroupName", json!(Self::SECURITY_GROUP_NAME)),
            ("routeTableName", json!("")),
            ("azure_resourcegroup", json!(resource_group)),
        ]
    }
}

impl TransformStep for CloudProviderConfig {
    fn name(&self) -> &'static str {
        "CloudProviderConfig"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }

    fn output(&self) -> &Path {
        &self.path
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let source = input(self, inputs, 0)?;
        let mut manifest = source.parse(Format::Yaml)?;
        let config_path = FieldPath::from("data.config");

        let embedded = SourceDocument::new(
            &source.path,
            manifest.get_str(&config_path)?.to_string(),
        );
        let mut config = embedded.parse(Format::Json)?;
        config.merge(&FieldPath::root(), Self::overrides(params.resource_group()?))?;

        let mut config_text = config.to_text(&OutputStyle::Json(JsonStyle::Indented("\t".into())))?;
        config_text.push('\n');

        manifest.set(&config_path, config_text)?;
        manifest.set(&"metadata.creationTimestamp".into(), Value::Null)?;
        manifest.to_text(&OutputStyle::Yaml(YamlStyle::QuotedFlow))
    }
}

/// Points the cluster Infrastructure object at the resource group
#[derive(Debug, Clone)]
pub struct ClusterInfrastructureConfig {
    path: PathBuf,
}

impl ClusterInfrastructureConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransformStep for ClusterInfrastructureConfig {
    fn name(&self) -> &'static str {
        "ClusterInfrastructureConfig"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }

    fn output(&self) -> &Path {
        &self.path
    }

    fn render(&self, params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Yaml)?;
        let resource_group = params.resource_group()?;

        doc.set(
            &"status.platformStatus.azure.resourceGroupName".into(),
            resource_group,
        )?;
        doc.set(&"status.infrastructureName".into(), resource_group)?;
        doc.to_text(&BLOCK)
    }
}

/// Drops the public and private DNS zones from the cluster DNS config
#[derive(Debug, Clone)]
pub struct ClusterDnsConfig {
    path: PathBuf,
}

impl ClusterDnsConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TransformStep for ClusterDnsConfig {
    fn name(&self) -> &'static str {
        "ClusterDNSConfig"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.path.clone()]
    }

    fn output(&self) -> &Path {
        &self.path
    }

    fn render(&self, _params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        let mut doc = input(self, inputs, 0)?.parse(Format::Yaml)?;
        doc.delete(&"spec.publicZone".into())?;
        doc.delete(&"spec.privateZone".into())?;
        doc.to_text(&BLOCK)
    }
}

/// Copies the static ingress controller manifest into the manifest set
#[derive(Debug, Clone)]
pub struct IngressController {
    source: PathBuf,
    output: PathBuf,
}

impl IngressController {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: output.into(),
        }
    }
}

impl TransformStep for IngressController {
    fn name(&self) -> &'static str {
        "IngressController"
    }

    fn inputs(&self) -> Vec<PathBuf> {
        vec![self.source.clone()]
    }

    fn output(&self) -> &Path {
        &self.output
    }

    fn render(&self, _params: &ParameterSet, inputs: &[SourceDocument]) -> Result<String> {
        Ok(input(self, inputs, 0)?.text.clone())
    }
}
