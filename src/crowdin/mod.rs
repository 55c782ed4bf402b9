// src/crowdin/mod.rs
// =============================================================================
// This module builds crowdin.yml, the config the localization tool reads.
//
// Each fetched file becomes one entry:
//   - source:      /source/{repo path}/{file path}
//   - translation: /overlay/{repo path}/{file path with values -> values-%android_code%}
//   - translate_attributes: 0   (only when the repository turned it off)
//
// %android_code% is left for crowdin to fill in per language.
// =============================================================================

mod config;

pub use config::CrowdinConfig;
