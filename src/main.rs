use clap::Parser;
use tracing::{debug, error};

use upi_patch::cli::{execute_command, init_tracing, Cli};
use upi_patch::error::describe_error_code;
use upi_patch::PatchError;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute_command(&cli) {
        Ok(report) => {
            for outcome in &report.outcomes {
                if outcome.written {
                    println!("✅ {}: {}", outcome.step, outcome.output.display());
                } else {
                    println!(
                        "{}: would write {} ({} bytes)",
                        outcome.step,
                        outcome.output.display(),
                        outcome.bytes
                    );
                }
            }
        }
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {e:#}");
            let code = match e.downcast_ref::<PatchError>() {
                Some(patch_error) => {
                    debug!(
                        "E{:04}: {}",
                        patch_error.code(),
                        describe_error_code(patch_error.code())
                    );
                    eprintln!("{}", patch_error.user_message());
                    patch_error.exit_code()
                }
                None => 1,
            };
            std::process::exit(code);
        }
    }
}
