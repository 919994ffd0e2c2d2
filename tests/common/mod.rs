//! Common test utilities and fixtures
#![allow(dead_code)]

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const CLOUD_CREDS_SECRET: &str = "\
apiVersion: v1
kind: Secret
metadata:
  name: azure-credentials
  namespace: kube-system
data: {}
";

pub const CLOUD_PROVIDER_CONFIG: &str = r#"apiVersion: v1
data:
  config: "{\n\t\"cloud\": \"AzurePublicCloud\",\n\t\"tenantId\": \"tenant\",\n\t\"resourceGroup\": \"cluster-abc12-rg\",\n\t\"routeTableName\": \"cluster-abc12-node-routetable\",\n\t\"useInstanceMetadata\": true\n}\n"
kind: ConfigMap
metadata:
  creationTimestamp: null
  name: cloud-provider-config
  namespace: openshift-config
"#;

pub const INFRASTRUCTURE_CONFIG: &str = "\
apiVersion: config.openshift.io/v1
kind: Infrastructure
metadata:
  name: cluster
status:
  infrastructureName: cluster-abc12
  platform: Azure
  platformStatus:
    azure:
      resourceGroupName: cluster-abc12-rg
    type: Azure
";

pub const DNS_CONFIG: &str = "\
apiVersion: config.openshift.io/v1
kind: DNS
metadata:
  name: cluster
spec:
  baseDomain: cluster.example.com
  privateZone:
    id: /subscriptions/sub/resourceGroups/rg/privateDnsZones/cluster.example.com
  publicZone:
    id: /subscriptions/sub/resourceGroups/dns/dnszones/example.com
status: {}
";

pub const INGRESS_CONTROLLER: &str = "\
apiVersion: operator.openshift.io/v1
kind: IngressController
metadata:
  name: default
  namespace: openshift-ingress-operator
spec:
  endpointPublishingStrategy:
    type: HostNetwork
";

pub const STORAGE_TEMPLATE: &str = r#"{"contentVersion": "1.0.0.0", "parameters": {"baseName": {"value": "openshift"}, "image": {"value": ""}}}"#;

pub const BOOTSTRAP_TEMPLATE: &str = r#"{"contentVersion": "1.0.0.0", "parameters": {"baseName": {"value": "openshift"}, "BootstrapIgnition": {"value": ""}, "sshKeyData": {"value": ""}}}"#;

pub const MASTERS_TEMPLATE: &str = r#"{"contentVersion": "1.0.0.0", "parameters": {"baseName": {"value": "openshift"}, "MasterIgnition": {"value": ""}, "sshKeyData": {"value": ""}, "numberOfMasters": {"value": 3}}}"#;

pub const WORKERS_TEMPLATE: &str = r#"{"contentVersion": "1.0.0.0", "parameters": {"baseName": {"value": "openshift"}, "WorkerIgnition": {"value": ""}, "sshKeyData": {"value": ""}}}"#;

pub const MASTER_IGNITION: &str = r#"{"ignition": {"config": {"append": [{"source": "https://api-int.example.com:22623/config/master"}]}, "version": "2.2.0"}}"#;

pub const WORKER_IGNITION: &str = r#"{"ignition": {"config": {"append": [{"source": "https://api-int.example.com:22623/config/worker"}]}, "version": "2.2.0"}}"#;

/// Builder for a directory of install assets
pub struct TestContextBuilder {
    temp_dir: TempDir,
    initial_files: Vec<(PathBuf, String)>,
}

impl TestContextBuilder {
    /// Create a new test context builder
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
            initial_files: Vec::new(),
        })
    }

    /// Add the five files read by `upi-patch manifests`
    pub fn with_manifests(self) -> Self {
        self.with_file("openshift/99_cloud-creds-secret.yaml", CLOUD_CREDS_SECRET)
            .with_file("manifests/cloud-provider-config.yaml", CLOUD_PROVIDER_CONFIG)
            .with_file(
                "manifests/cluster-infrastructure-02-config.yml",
                INFRASTRUCTURE_CONFIG,
            )
            .with_file("manifests/cluster-dns-02-config.yml", DNS_CONFIG)
            .with_file("ingress-controller.yaml", INGRESS_CONTROLLER)
    }

    /// Add the ignition files and templates read by `upi-patch parameters`
    pub fn with_templates(self) -> Self {
        self.with_file("master.ign", MASTER_IGNITION)
            .with_file("worker.ign", WORKER_IGNITION)
            .with_file("02_storage.template.json", STORAGE_TEMPLATE)
            .with_file("04_bootstrap.template.json", BOOTSTRAP_TEMPLATE)
            .with_file("05_masters.template.json", MASTERS_TEMPLATE)
            .with_file("06_workers.template.json", WORKERS_TEMPLATE)
    }

    /// Add an initial file
    pub fn with_file(mut self, path: impl AsRef<Path>, content: &str) -> Self {
        self.initial_files
            .push((path.as_ref().to_path_buf(), content.to_string()));
        self
    }

    /// Build the test context
    pub fn build(self) -> Result<TestContext> {
        let path = self.temp_dir.path();
        for (file_path, content) in self.initial_files {
            let full_path = path.join(file_path);
            if let Some(parent) = full_path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(full_path, content)?;
        }

        Ok(TestContext {
            temp_dir: self.temp_dir,
        })
    }
}

/// Test context that owns the temporary install directory
pub struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    /// Get the path to the install directory
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Read a file from the install directory
    pub fn read_file(&self, path: impl AsRef<Path>) -> Result<String> {
        Ok(fs::read_to_string(self.temp_dir.path().join(path))?)
    }

    /// Parse a JSON file from the install directory
    pub fn read_json(&self, path: impl AsRef<Path>) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.read_file(path)?)?)
    }

    /// Parse a YAML file from the install directory
    pub fn read_yaml(&self, path: impl AsRef<Path>) -> Result<serde_json::Value> {
        Ok(serde_yaml::from_str(&self.read_file(path)?)?)
    }

    /// Check if a file exists
    pub fn file_exists(&self, path: impl AsRef<Path>) -> bool {
        self.temp_dir.path().join(path).exists()
    }
}

/// Decode a base64 field value back into text
pub fn decode(encoded: &str) -> String {
    String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap()
}

pub mod assertions {
    use super::*;

    /// Assert that a file contains expected content
    pub fn assert_file_contains(ctx: &TestContext, path: impl AsRef<Path>, expected: &str) {
        let content = ctx.read_file(path.as_ref()).unwrap();
        assert!(
            content.contains(expected),
            "File {:?} does not contain expected content: {}",
            path.as_ref(),
            expected
        );
    }

    /// Assert that a file was left untouched
    pub fn assert_file_equals(ctx: &TestContext, path: impl AsRef<Path>, expected: &str) {
        let content = ctx.read_file(path.as_ref()).unwrap();
        assert_eq!(content, expected, "File {:?} changed", path.as_ref());
    }
}
