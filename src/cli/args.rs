//! CLI argument structures
//!
//! Two subcommands, one per entry point: `manifests` patches the cluster
//! manifests, `parameters` renders the ARM parameter files.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Patch OpenShift UPI manifests and ARM templates with deployment values
#[derive(Parser, Debug)]
#[command(name = "upi-patch")]
#[command(about = "upi-patch - Patch UPI manifests and ARM parameter templates", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the install assets (defaults to current directory)
    #[arg(short = 'C', long = "dir", value_name = "DIR", global = true)]
    pub work_dir: Option<PathBuf>,

    /// TOML file overriding the default file layout
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Render every step without writing any file
    #[arg(long, global = true)]
    pub dry_run: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Patch cluster manifests with the resource group name
    #[command(name = "manifests")]
    Manifests {
        /// Resource group the cluster is deployed into
        resource_group: String,
    },

    /// Render bootstrap, master and worker parameter files from templates
    #[command(name = "parameters")]
    Parameters {
        /// URL the bootstrap node fetches its ignition config from
        url: String,

        /// Storage account holding the RHCOS image
        storage_account: String,

        /// SSH public key text (trailing whitespace is trimmed)
        ssh_key: String,
    },
}
