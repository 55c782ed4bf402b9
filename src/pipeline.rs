// src/pipeline.rs
// =============================================================================
// The whole sync run, start to finish:
//
// 1. Load the manifest and flatten it into FetchTasks
// 2. Fetch every task concurrently (fails fast, nothing written yet)
// 3. Write the fetched bytes under the source root, in task order
// 4. Write crowdin.yml with one entry per task, in task order
//
// Any error stops the run where it happened. Re-running after fixing the
// cause is the recovery path.
// =============================================================================

use crate::config::Settings;
use crate::crowdin::CrowdinConfig;
use crate::error::SyncResult;
use crate::github::{fetch_all, ContentsBackend};
use crate::manifest::Manifest;
use crate::materialize::materialize;
use std::path::PathBuf;
use tracing::info;

// What a successful run did, for the final report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSummary {
    pub repositories: usize,
    pub files_written: Vec<PathBuf>,
    pub output: PathBuf,
}

// Runs one full sync
//
// Parameters:
//   settings: paths and HTTP options for this run
//   backend: where file contents come from (GitHub, or a fake in tests)
//
// Returns: a summary of what was written, or the first error hit
pub async fn run<B>(settings: &Settings, backend: &B) -> SyncResult<SyncSummary>
where
    B: ContentsBackend + ?Sized,
{
    let manifest = Manifest::load(&settings.manifest)?;
    let tasks = manifest.tasks();
    info!(
        manifest = %settings.manifest.display(),
        repositories = manifest.repos.len(),
        files = tasks.len(),
        "loaded manifest"
    );

    let results = fetch_all(backend, &tasks).await?;

    let files_written = materialize(&settings.source_dir, &tasks, &results)?;
    info!(
        count = files_written.len(),
        root = %settings.source_dir.display(),
        "wrote fetched files"
    );

    CrowdinConfig::from_tasks(&tasks).write(&settings.output)?;
    info!(path = %settings.output.display(), entries = tasks.len(), "wrote crowdin config");

    Ok(SyncSummary {
        repositories: manifest.repos.len(),
        files_written,
        output: settings.output.clone(),
    })
}
