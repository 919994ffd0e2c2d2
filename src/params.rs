//! Values supplied to a pipeline run.

use serde_json::Value;

use crate::error::{PatchError, Result};

/// External inputs of one run.
///
/// The manifest entry point only supplies the resource group; the parameter
/// entry point supplies everything else. Steps ask for what they need and get
/// a configuration error when it was not provided.
#[derive(Debug, Clone, Default)]
pub struct ParameterSet {
    resource_group: Option<String>,
    storage_account: Option<String>,
    ignition_url: Option<String>,
    ssh_public_key: Option<String>,
    master_ignition: Option<Value>,
    worker_ignition: Option<Value>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_group(mut self, name: impl Into<String>) -> Self {
        self.resource_group = Some(name.into());
        self
    }

    pub fn with_storage_account(mut self, name: impl Into<String>) -> Self {
        self.storage_account = Some(name.into());
        self
    }

    pub fn with_ignition_url(mut self, url: impl Into<String>) -> Self {
        self.ignition_url = Some(url.into());
        self
    }

    pub fn with_ssh_public_key(mut self, key: impl Into<String>) -> Self {
        self.ssh_public_key = Some(key.into());
        self
    }

    pub fn with_master_ignition(mut self, ignition: Value) -> Self {
        self.master_ignition = Some(ignition);
        self
    }

    pub fn with_worker_ignition(mut self, ignition: Value) -> Self {
        self.worker_ignition = Some(ignition);
        self
    }

    pub fn resource_group(&self) -> Result<&str> {
        required(&self.resource_group, "resource_group")
    }

    pub fn storage_account(&self) -> Result<&str> {
        required(&self.storage_account, "storage_account")
    }

    pub fn ignition_url(&self) -> Result<&str> {
        required(&self.ignition_url, "ignition_url")
    }

    /// The SSH public key exactly as supplied, trailing newline included
    pub fn ssh_public_key(&self) -> Result<&str> {
        required(&self.ssh_public_key, "ssh_public_key")
    }

    pub fn master_ignition(&self) -> Result<&Value> {
        self.master_ignition
            .as_ref()
            .ok_or_else(|| PatchError::missing_parameter("master_ignition"))
    }

    pub fn worker_ignition(&self) -> Result<&Value> {
        self.worker_ignition
            .as_ref()
            .ok_or_else(|| PatchError::missing_parameter("worker_ignition"))
    }
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value
        .as_deref()
        .ok_or_else(|| PatchError::missing_parameter(name))
}
