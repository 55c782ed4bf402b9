// src/github/fetch.rs
// =============================================================================
// This module fetches every manifest file from GitHub at once.
//
// Strategy:
// - One future per FetchTask, all started together (no concurrency limit)
// - try_join_all keeps results in task order and stops at the first error
// - Each response's base64 'content' field is decoded to raw bytes here, so
//   the caller only ever sees file contents
//
// Nothing is written to disk in this module. If any request fails, the run
// aborts before the materializer touches the filesystem.
// =============================================================================

use super::backend::{ContentsBackend, ContentsResponse};
use crate::error::{SyncError, SyncResult};
use crate::manifest::FetchTask;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use futures::future::try_join_all;
use tracing::info;

// Fetches all tasks concurrently
//
// Returns one Vec<u8> per task, in the same order as `tasks`.
// The first failure wins; the remaining in-flight requests are dropped.
pub async fn fetch_all<B>(backend: &B, tasks: &[FetchTask]) -> SyncResult<Vec<Vec<u8>>>
where
    B: ContentsBackend + ?Sized,
{
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    info!(count = tasks.len(), "fetching files from GitHub");

    let requests = tasks.iter().map(|task| fetch_one(backend, task));
    try_join_all(requests).await
}

async fn fetch_one<B>(backend: &B, task: &FetchTask) -> SyncResult<Vec<u8>>
where
    B: ContentsBackend + ?Sized,
{
    let response = backend.get_contents(task).await?;
    decode_content(&describe(task), &response)
}

// Human-readable name for a task, used in data errors
fn describe(task: &FetchTask) -> String {
    format!("{}/contents/{}", task.repo_name, task.file_path)
}

// Decodes the base64 'content' field of a contents API response
//
// GitHub wraps the base64 text at 60 columns with '\n', so whitespace is
// dropped before decoding.
pub fn decode_content(source: &str, response: &ContentsResponse) -> SyncResult<Vec<u8>> {
    if let Some(encoding) = response.encoding.as_deref() {
        if encoding != "base64" {
            return Err(SyncError::data(
                source,
                format!("unsupported content encoding '{encoding}'"),
            ));
        }
    }

    let compact: String = response
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    STANDARD
        .decode(compact)
        .map_err(|e| SyncError::data(source, format!("invalid base64 content: {e}")))
}
