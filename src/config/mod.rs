use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ErrorCode, PatchError, Result};

/// Environment variable overriding the working directory
pub const WORK_DIR_ENV: &str = "UPI_PATCH_WORK_DIR";

/// File layout of a run. Every path is relative to `work_dir` unless absolute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    pub work_dir: PathBuf,
    pub manifests: ManifestLayout,
    pub templates: TemplateLayout,
}

/// Files touched by `upi-patch manifests`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ManifestLayout {
    pub cloud_creds_secret: PathBuf,
    pub cloud_provider_config: PathBuf,
    pub infrastructure_config: PathBuf,
    pub dns_config: PathBuf,
    pub ingress_controller_source: PathBuf,
    pub ingress_controller_output: PathBuf,
}

/// Files touched by `upi-patch parameters`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplateLayout {
    pub master_ignition: PathBuf,
    pub worker_ignition: PathBuf,
    pub storage_template: PathBuf,
    pub bootstrap_template: PathBuf,
    pub bootstrap_parameters: PathBuf,
    pub masters_template: PathBuf,
    pub masters_parameters: PathBuf,
    pub workers_template: PathBuf,
    pub workers_parameters: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("."),
            manifests: ManifestLayout::default(),
            templates: TemplateLayout::default(),
        }
    }
}

impl Default for ManifestLayout {
    fn default() -> Self {
        Self {
            cloud_creds_secret: "openshift/99_cloud-creds-secret.yaml".into(),
            cloud_provider_config: "manifests/cloud-provider-config.yaml".into(),
            infrastructure_config: "manifests/cluster-infrastructure-02-config.yml".into(),
            dns_config: "manifests/cluster-dns-02-config.yml".into(),
            ingress_controller_source: "ingress-controller.yaml".into(),
            ingress_controller_output: "manifests/ingress-controller-02-default.yaml".into(),
        }
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            master_ignition: "master.ign".into(),
            worker_ignition: "worker.ign".into(),
            storage_template: "02_storage.template.json".into(),
            bootstrap_template: "04_bootstrap.template.json".into(),
            bootstrap_parameters: "04_bootstrap.parameters.json".into(),
            masters_template: "05_masters.template.json".into(),
            masters_parameters: "05_masters.parameters.json".into(),
            workers_template: "06_workers.template.json".into(),
            workers_parameters: "06_workers.parameters.json".into(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a layout from a TOML file; omitted keys keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PatchError::config_with_code(
                ErrorCode::CONFIG_NOT_FOUND,
                format!("cannot read {}", path.display()),
            )
            .with_source(e)
        })?;
        let config: PipelineConfig = toml::from_str(&content)?;
        tracing::debug!("Loaded layout from {}", path.display());
        Ok(config)
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn merge_env_vars(&mut self) {
        if let Ok(dir) = std::env::var(WORK_DIR_ENV) {
            if !dir.is_empty() {
                self.work_dir = PathBuf::from(dir);
            }
        }
    }

    /// Resolve a layout path against the working directory
    pub fn resolve(&self, path: &Path) -> PathBuf {
        self.work_dir.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::new();
        assert_eq!(
            config.manifests.cloud_creds_secret,
            PathBuf::from("openshift/99_cloud-creds-secret.yaml")
        );
        assert_eq!(
            config.templates.bootstrap_parameters,
            PathBuf::from("04_bootstrap.parameters.json")
        );
        assert_eq!(
            config.resolve(&config.templates.master_ignition),
            PathBuf::from("./master.ign")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("layout.toml");
        std::fs::write(
            &path,
            "work_dir = \"/srv/install\"\n\n[templates]\nmaster_ignition = \"ign/master.ign\"\n",
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.work_dir, PathBuf::from("/srv/install"));
        assert_eq!(config.templates.master_ignition, PathBuf::from("ign/master.ign"));
        assert_eq!(config.templates.worker_ignition, PathBuf::from("worker.ign"));
        assert_eq!(config.manifests, ManifestLayout::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("layout.toml");
        std::fs::write(&path, "work_dir = [").unwrap();

        let err = PipelineConfig::load(&path).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_INVALID_TOML);
    }

    #[test]
    fn test_missing_config_file() {
        let err = PipelineConfig::load(Path::new("/nonexistent/layout.toml")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::CONFIG_NOT_FOUND);
    }
}
