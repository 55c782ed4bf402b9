// src/materialize.rs
// =============================================================================
// Writes fetched file contents under the local source root.
//
// Layout mirrors the manifest: {source_root}/{repo path}/{file path}.
// Writes happen one after another, in task order, and only after every fetch
// has succeeded. Existing files are overwritten.
// =============================================================================

use crate::error::{SyncError, SyncResult};
use crate::manifest::FetchTask;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

// Where a task's bytes land on disk.
//
// Leading slashes are ignored so an absolute-looking manifest entry still
// stays inside `source_root`.
pub fn destination(source_root: &Path, repo_path: &str, file_path: &str) -> PathBuf {
    source_root
        .join(repo_path.trim_start_matches('/'))
        .join(file_path.trim_start_matches('/'))
}

// Writes each result to its task's destination
//
// Parameters:
//   source_root: local directory everything is written under
//   tasks: the fetch tasks, in manifest order
//   results: fetched bytes, results[i] belonging to tasks[i]
//
// Returns: the paths written, in task order
pub fn materialize(
    source_root: &Path,
    tasks: &[FetchTask],
    results: &[Vec<u8>],
) -> SyncResult<Vec<PathBuf>> {
    if tasks.len() != results.len() {
        return Err(SyncError::data(
            source_root.display().to_string(),
            format!("{} tasks but {} fetched files", tasks.len(), results.len()),
        ));
    }

    let mut written = Vec::with_capacity(tasks.len());

    for (task, bytes) in tasks.iter().zip(results) {
        let path = destination(source_root, &task.repo_path, &task.file_path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;
        }
        fs::write(&path, bytes).map_err(|e| SyncError::io(&path, e))?;

        debug!(path = %path.display(), bytes = bytes.len(), "wrote file");
        written.push(path);
    }

    Ok(written)
}
