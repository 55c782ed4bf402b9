// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// There are no subcommands: running `repo-sync` with no flags reads
// repos.yaml, writes into ./source and produces ./crowdin.yml. Every flag
// only overrides one of those defaults.
// =============================================================================

use crate::github::DEFAULT_API_BASE;
use clap::Parser;
use std::path::PathBuf;
use url::Url;

#[derive(Parser, Debug)]
#[command(
    name = "repo-sync",
    version,
    about = "Pull translatable files from GitHub and generate crowdin.yml",
    long_about = "repo-sync downloads the files listed in a repos.yaml manifest through the \
                  GitHub contents API, stores them under a local source tree and writes a \
                  crowdin.yml mapping each file to its translation overlay path."
)]
pub struct Cli {
    /// Manifest listing repositories and files to fetch
    #[arg(long, default_value = "repos.yaml")]
    pub manifest: PathBuf,

    /// Directory fetched files are written under
    #[arg(long, default_value = "source")]
    pub source_dir: PathBuf,

    /// Where to write the generated crowdin config
    #[arg(long, default_value = "crowdin.yml")]
    pub output: PathBuf,

    /// Contents API base; repository paths are appended to it
    #[arg(long, default_value = DEFAULT_API_BASE, value_parser = parse_api_base)]
    pub api_base: Url,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// GitHub token used as a bearer credential
    #[arg(long, env = "X_GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Log each request and written file
    #[arg(short, long)]
    pub verbose: bool,
}

// The base must be able to take extra path segments (http/https URLs can)
fn parse_api_base(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|e| format!("invalid URL '{value}': {e}"))?;
    if url.cannot_be_a_base() {
        return Err(format!("'{value}' cannot be used as a base URL"));
    }
    Ok(url)
}
