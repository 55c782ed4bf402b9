// src/github/mod.rs
// =============================================================================
// This module fetches files from GitHub repositories.
//
// Submodules:
// - backend: the contents API client (and a fake for tests)
// - fetch: runs every request concurrently and decodes the base64 payloads
//
// Only authenticated access through the contents API is supported; the token
// comes in as a Credential when the backend is built.
// =============================================================================

mod backend;
mod fetch;

pub use backend::{ContentsBackend, Credential, ReqwestBackend, DEFAULT_API_BASE};
pub use fetch::fetch_all;

#[cfg(test)]
pub use backend::testing;
