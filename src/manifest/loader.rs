// src/manifest/loader.rs
// =============================================================================
// Parses the manifest and flattens it into fetch tasks.
//
// No validation happens beyond what serde enforces: `name` and `path` must be
// present, everything else has a default. A manifest that fails to parse is
// fatal for the run.
// =============================================================================

use crate::error::{SyncError, SyncResult};
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;
use std::path::Path;

// The whole repos.yaml document
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    // A manifest without a `repos` key simply has nothing to sync
    #[serde(default)]
    pub repos: Vec<Repository>,
}

// One GitHub repository and the files to pull from it
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    // GitHub "owner/repo" identifier
    pub name: String,
    // Local directory prefix under the source root
    pub path: String,
    #[serde(default)]
    pub files: Vec<String>,
    // Forwarded to crowdin; when false the entry carries translate_attributes: 0
    #[serde(
        default = "default_translate_attributes",
        deserialize_with = "deserialize_truthy"
    )]
    pub translate_attributes: bool,
}

fn default_translate_attributes() -> bool {
    true
}

// Reads a flag the loose way manifest authors write it
//
// Accepts any YAML scalar or collection:
//   - null, false, 0, 0.0, "" and empty lists/maps are false
//   - everything else is true (including the string "false")
// A missing key never reaches here; it takes the default above.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(is_truthy(&value))
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Sequence(seq) => !seq.is_empty(),
        Value::Mapping(map) => !map.is_empty(),
        Value::Tagged(tagged) => is_truthy(&tagged.value),
    }
}

// One file to fetch, carrying everything later stages need from its repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub repo_name: String,
    pub repo_path: String,
    pub file_path: String,
    pub translate_attributes: bool,
}

impl Manifest {
    // Reads and parses the manifest at `path`
    //
    // Returns: the parsed manifest, or a Config error naming the file when it
    // is missing or not valid YAML
    pub fn load(path: &Path) -> SyncResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| SyncError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_yaml(&text).map_err(|e| SyncError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    // Flattens the manifest into one task per file
    //
    // Order is repository order, then file order within each repository.
    // Every later stage relies on this order.
    pub fn tasks(&self) -> Vec<FetchTask> {
        self.repos
            .iter()
            .flat_map(|repo| {
                repo.files.iter().map(move |file| FetchTask {
                    repo_name: repo.name.clone(),
                    repo_path: repo.path.clone(),
                    file_path: file.clone(),
                    translate_attributes: repo.translate_attributes,
                })
            })
            .collect()
    }
}
