//! # Maturity Explorer
//!
//! Entry point for the `maturity` binary: parses the command line, installs
//! the tracing subscriber and dispatches to the `cmd_*` functions.

use clap::Parser;
use maturity::cli::{self, Cli, CliError, Commands};
use maturity::telemetry;
use std::path::Path;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(cli.log_level.as_deref()) {
        eprintln!("Error: {}", CliError::Telemetry(e));
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Run the selected command. `Ok(false)` means the command completed but
/// reported failure (a preflight check failed).
async fn run(cli: Cli) -> Result<bool, CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Serve {
            host,
            port,
            rate_limit,
            no_cors,
        } => cli::cmd_serve(host, port, rate_limit, no_cors).await?,
        Commands::Matrix { year, adjustment } => cli::cmd_matrix(&year, adjustment, json)?,
        Commands::Gaps { year } => cli::cmd_gaps(&year, json)?,
        Commands::Summary { year, adjustment } => cli::cmd_summary(&year, adjustment, json)?,
        Commands::Detail { category } => cli::cmd_detail(&category, json)?,
        Commands::Classify { score } => cli::cmd_classify(&score, json)?,
        Commands::Check { root } => {
            return Ok(cli::cmd_check(Path::new(&root), json)?.all_passed());
        }
    }
    Ok(true)
}
