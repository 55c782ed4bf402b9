// src/manifest/mod.rs
// =============================================================================
// This module reads repos.yaml, the list of repositories and files to sync.
//
// The manifest looks like:
//
//   repos:
//     - name: owner/repo
//       path: app
//       files:
//         - res/values/strings.xml
//       translate_attributes: false   # optional, defaults to true
//
// Each (repository, file) pair becomes one FetchTask.
// =============================================================================

mod loader;

pub use loader::{FetchTask, Manifest};
