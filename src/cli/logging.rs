//! Logging configuration and initialization

use tracing::{debug, trace};

/// Map the `-v` count to a tracing filter
pub fn get_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the binary
pub fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(get_log_level(verbose))
        .with_target(verbose >= 2) // Show target module for -vv and above
        .with_thread_ids(verbose >= 3) // Show thread IDs for -vvv
        .with_line_number(verbose >= 3) // Show line numbers for -vvv
        .init();

    debug!("upi-patch started with verbosity level: {}", verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());
}
