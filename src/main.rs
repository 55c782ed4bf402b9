// src/main.rs
// =============================================================================
// This is the entry point of repo-sync.
//
// What happens here:
// 1. Parse command-line arguments (clap exits with code 2 on bad usage,
//    including a missing X_GITHUB_TOKEN)
// 2. Set up logging to stderr
// 3. Build the GitHub backend and run the sync pipeline
// 4. Print a summary and exit (0 = success, 1 = the run failed)
// =============================================================================

mod cli;
mod config;
mod crowdin;
mod error;
mod github;
mod manifest;
mod materialize;
mod pipeline;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::Settings;
use github::ReqwestBackend;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(Settings::from(cli)).await {
        Ok(()) => 0,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise info, or debug with --verbose
fn init_logging(verbose: bool) {
    let default = if verbose { "repo_sync=debug" } else { "repo_sync=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(settings: Settings) -> Result<()> {
    let backend = ReqwestBackend::new(
        settings.api_base.clone(),
        settings.credential.clone(),
        settings.timeout,
    )
    .context("failed to create HTTP client")?;

    let summary = pipeline::run(&settings, &backend)
        .await
        .context("sync failed")?;

    println!(
        "Synced {} file(s) from {} repositor{}",
        summary.files_written.len(),
        summary.repositories,
        if summary.repositories == 1 { "y" } else { "ies" }
    );
    println!("Wrote {}", summary.output.display());

    Ok(())
}
