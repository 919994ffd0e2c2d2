//! # upi-patch
//!
//! Patches the manifests and ARM deployment templates of an OpenShift
//! user-provisioned install on Azure with values known only at deploy time.
//!
//! ## Usage
//!
//! ```bash
//! upi-patch manifests <resource-group>
//! upi-patch parameters <ignition-url> <storage-account> <ssh-public-key>
//! ```
//!
//! ## Modules
//!
//! - `cli` - Argument parsing, logging setup and command routing
//! - `config` - File layout of a run, loadable from TOML
//! - `document` - Ordered YAML/JSON document tree, codecs and path mutation
//! - `encoding` - Base64 encoding of secrets and ignition payloads
//! - `error` - Error type and error codes
//! - `params` - Values supplied to a run
//! - `pipeline` - Ordered execution of steps against the filesystem
//! - `steps` - The individual template transformations
pub mod cli;
pub mod config;
pub mod document;
pub mod encoding;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod steps;


pub use config::PipelineConfig;
pub use document::{Document, FieldPath, Format};
pub use error::{PatchError, Result};
pub use params::ParameterSet;
pub use pipeline::{Pipeline, PipelineDriver, RunReport, StepOutcome};
