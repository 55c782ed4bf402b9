// src/crowdin/config.rs
// =============================================================================
// Turns fetch tasks into crowdin.yml entries and writes the file.
//
// Path rewriting is a pure string transform (translation_suffix), kept apart
// from serialization and file I/O. Entries follow task order exactly, so the
// generated file lines up with the manifest.
// =============================================================================

use crate::error::{SyncError, SyncResult};
use crate::manifest::FetchTask;
use serde::Serialize;
use std::path::Path;

// Directory name crowdin expands per target language
const VALUES_DIR: &str = "values";
const VALUES_PLACEHOLDER: &str = "values-%android_code%";

const SOURCE_ROOT: &str = "/source";
const OVERLAY_ROOT: &str = "/overlay";

// Rewrites a file path into its translation form.
//
// Every occurrence of "values" is replaced, not just whole path segments:
// "res/values/strings.xml" -> "res/values-%android_code%/strings.xml".
pub fn translation_suffix(file_path: &str) -> String {
    file_path.replace(VALUES_DIR, VALUES_PLACEHOLDER)
}

// One entry under `files:`.
// Fields are declared in sorted key order so regenerated files diff cleanly
// against ones produced by earlier tooling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputEntry {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translate_attributes: Option<u8>,
    pub translation: String,
}

impl OutputEntry {
    pub fn for_task(task: &FetchTask) -> Self {
        OutputEntry {
            source: format!("{SOURCE_ROOT}/{}/{}", task.repo_path, task.file_path),
            translate_attributes: (!task.translate_attributes).then_some(0),
            translation: format!(
                "{OVERLAY_ROOT}/{}/{}",
                task.repo_path,
                translation_suffix(&task.file_path)
            ),
        }
    }
}

// The whole crowdin.yml document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CrowdinConfig {
    pub files: Vec<OutputEntry>,
}

impl CrowdinConfig {
    // One entry per task, in task order.
    pub fn from_tasks(tasks: &[FetchTask]) -> Self {
        CrowdinConfig {
            files: tasks.iter().map(OutputEntry::for_task).collect(),
        }
    }

    pub fn to_yaml(&self) -> SyncResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    // Serializes and writes the config, replacing any existing file.
    pub fn write(&self, path: &Path) -> SyncResult<()> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml).map_err(|e| SyncError::io(path, e))
    }
}
