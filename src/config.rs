// src/config.rs
// =============================================================================
// Run settings, built once from the parsed command line.
//
// The pipeline only sees Settings, never clap or the process environment, so
// tests can build one by hand.
// =============================================================================

use crate::cli::Cli;
use crate::github::Credential;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone)]
pub struct Settings {
    pub manifest: PathBuf,
    pub source_dir: PathBuf,
    pub output: PathBuf,
    pub api_base: Url,
    pub timeout: Duration,
    pub credential: Credential,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Settings {
            manifest: cli.manifest,
            source_dir: cli.source_dir,
            output: cli.output,
            api_base: cli.api_base,
            timeout: Duration::from_secs(cli.timeout),
            credential: Credential::new(cli.token),
        }
    }
}
