//! CLI handlers
//!
//! - Argument parsing structures
//! - Logging setup
//! - Command routing

pub mod args;
pub mod logging;
pub mod router;

pub use args::{Cli, Commands};
pub use logging::{get_log_level, init_tracing};
pub use router::{execute_command, resolve_config};
