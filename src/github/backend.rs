// src/github/backend.rs
// =============================================================================
// HTTP access to the GitHub contents API.
//
// The dispatcher only talks to the ContentsBackend trait. Production uses
// ReqwestBackend; tests swap in FakeBackend so nothing touches the network.
//
// Request shape:
//   GET {api_base}/{owner}/{repo}/contents/{file path}
//   Accept: application/vnd.github.object
//   X-GitHub-Api-Version: 2022-11-28
//   Authorization: Bearer {token}
// =============================================================================

use crate::error::{SyncError, SyncResult};
use crate::manifest::FetchTask;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;
use url::Url;

// Media type asking for the object representation (JSON with a base64 body)
const ACCEPT_OBJECT: &str = "application/vnd.github.object";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

// Default endpoint every repository path is appended to
pub const DEFAULT_API_BASE: &str = "https://api.github.com/repos";

// A GitHub token.
//
// Handed to the backend at construction so the fetch code never reads the
// environment. Debug output never shows the value.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Credential(token.into())
    }

    fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

// The fields of a contents API response we care about.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentsResponse {
    pub content: String,
    // "base64" for regular files; "none" when the file is too large to inline
    #[serde(default)]
    pub encoding: Option<String>,
}

// Parses a response body, turning JSON problems into data errors.
pub fn parse_contents(url: &str, body: &[u8]) -> SyncResult<ContentsResponse> {
    serde_json::from_slice(body).map_err(|e| SyncError::data(url, e.to_string()))
}

// Something that can fetch one file through the contents API.
#[async_trait]
pub trait ContentsBackend: Send + Sync {
    async fn get_contents(&self, task: &FetchTask) -> SyncResult<ContentsResponse>;
}

// Production backend: one shared reqwest client for every request.
pub struct ReqwestBackend {
    client: Client,
    api_base: Url,
    credential: Credential,
}

impl ReqwestBackend {
    pub fn new(api_base: Url, credential: Credential, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base,
            credential,
        })
    }

    // Builds the contents URL for a task
    //
    // Example:
    //   acme/launcher + res/values/strings.xml ->
    //   {api_base}/acme/launcher/contents/res/values/strings.xml
    //
    // The repo name and file path are split on '/' and pushed as separate
    // segments, so characters like spaces or '#' get percent-encoded.
    pub fn contents_url(&self, task: &FetchTask) -> SyncResult<Url> {
        let mut url = self.api_base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| SyncError::InvalidApiBase(self.api_base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(task.repo_name.split('/').filter(|s| !s.is_empty()))
                .push("contents")
                .extend(task.file_path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url)
    }

    fn request(&self, url: Url) -> RequestBuilder {
        self.client
            .get(url)
            .header(ACCEPT, ACCEPT_OBJECT)
            .header(API_VERSION_HEADER, API_VERSION)
            .bearer_auth(self.credential.expose())
    }
}

#[async_trait]
impl ContentsBackend for ReqwestBackend {
    async fn get_contents(&self, task: &FetchTask) -> SyncResult<ContentsResponse> {
        let url = self.contents_url(task)?;
        debug!(%url, "requesting file contents");

        let network = |source: reqwest::Error| SyncError::Network {
            url: url.to_string(),
            source,
        };

        let response = self.request(url.clone()).send().await.map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await.map_err(network)?;
        parse_contents(url.as_str(), &body)
    }
}

// -----------------------------------------------------------------------------
// Fake backend for tests
// -----------------------------------------------------------------------------

#[cfg(test)]
pub mod testing {
    use super::*;
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // What the fake answers for one "owner/repo:file" key.
    #[derive(Clone)]
    pub enum Canned {
        Json(serde_json::Value),
        Status(u16),
    }

    // Answers from a fixed table; unknown keys get a 404.
    #[derive(Default)]
    pub struct FakeBackend {
        responses: HashMap<String, Canned>,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        pub fn new() -> Self {
            Self::default()
        }

        // Serves `bytes` the way GitHub does: base64, wrapped at 60 columns.
        pub fn with_file(self, repo: &str, file: &str, bytes: &[u8]) -> Self {
            let encoded = STANDARD.encode(bytes);
            let wrapped = encoded
                .as_bytes()
                .chunks(60)
                .map(|c| String::from_utf8_lossy(c).into_owned())
                .collect::<Vec<_>>()
                .join("\n");

            self.with_json(
                repo,
                file,
                serde_json::json!({
                    "type": "file",
                    "encoding": "base64",
                    "path": file,
                    "content": wrapped,
                }),
            )
        }

        pub fn with_json(mut self, repo: &str, file: &str, json: serde_json::Value) -> Self {
            self.responses.insert(key(repo, file), Canned::Json(json));
            self
        }

        pub fn with_status(mut self, repo: &str, file: &str, status: u16) -> Self {
            self.responses.insert(key(repo, file), Canned::Status(status));
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn key(repo: &str, file: &str) -> String {
        format!("{repo}:{file}")
    }

    #[async_trait]
    impl ContentsBackend for FakeBackend {
        async fn get_contents(&self, task: &FetchTask) -> SyncResult<ContentsResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let url = format!("fake://{}/contents/{}", task.repo_name, task.file_path);

            match self.responses.get(&key(&task.repo_name, &task.file_path)) {
                Some(Canned::Json(json)) => serde_json::from_value(json.clone())
                    .map_err(|e| SyncError::data(url, e.to_string())),
                Some(Canned::Status(status)) => Err(SyncError::Status {
                    status: *status,
                    url,
                }),
                None => Err(SyncError::Status { status: 404, url }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn task(repo: &str, file: &str) -> FetchTask {
        FetchTask {
            repo_name: repo.to_string(),
            repo_path: "app".to_string(),
            file_path: file.to_string(),
            translate_attributes: true,
        }
    }

    fn backend(api_base: &str) -> ReqwestBackend {
        ReqwestBackend::new(
            Url::parse(api_base).unwrap(),
            Credential::new("ghp_test"),
            Duration::from_secs(30),
        )
        .unwrap()
    }

    #[test]
    fn test_contents_url() {
        let url = backend(DEFAULT_API_BASE)
            .contents_url(&task("acme/launcher", "res/values/strings.xml"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/acme/launcher/contents/res/values/strings.xml"
        );
    }

    #[test]
    fn test_contents_url_with_trailing_slash_and_spaces() {
        let url = backend("https://ghe.example.com/api/v3/repos/")
            .contents_url(&task("acme/launcher", "docs/read me.md"))
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://ghe.example.com/api/v3/repos/acme/launcher/contents/docs/read%20me.md"
        );
    }

    #[test]
    fn test_request_headers() {
        let backend = backend(DEFAULT_API_BASE);
        let url = backend.contents_url(&task("acme/launcher", "a.xml")).unwrap();
        let request = backend.request(url).build().unwrap();

        let headers = request.headers();
        assert_eq!(headers["accept"], "application/vnd.github.object");
        assert_eq!(headers["x-github-api-version"], "2022-11-28");
        assert_eq!(headers["authorization"], "Bearer ghp_test");
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let debug = format!("{:?}", Credential::new("ghp_secret"));
        assert!(!debug.contains("ghp_secret"));
    }

    #[test]
    fn test_parse_contents_missing_content() {
        let err = parse_contents("u", br#"{"message": "Not Found"}"#).unwrap_err();
        assert!(matches!(err, SyncError::Data { .. }));
    }

    // Serves exactly one HTTP response on a local port and hands back the raw
    // request it received.
    async fn serve_once(status_line: &str, body: &str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{addr}/repos"), handle)
    }

    #[tokio::test]
    async fn test_get_contents_over_http() {
        let (base, server) =
            serve_once("200 OK", r#"{"encoding":"base64","content":"aGk=\n"}"#).await;

        let response = backend(&base)
            .get_contents(&task("acme/launcher", "res/values/strings.xml"))
            .await
            .unwrap();
        assert_eq!(response.content, "aGk=\n");
        assert_eq!(response.encoding.as_deref(), Some("base64"));

        let request = server.await.unwrap().to_lowercase();
        assert!(request
            .starts_with("get /repos/acme/launcher/contents/res/values/strings.xml http/1.1"));
        assert!(request.contains("authorization: bearer ghp_test"));
        assert!(request.contains("x-github-api-version: 2022-11-28"));
    }

    #[tokio::test]
    async fn test_get_contents_error_status() {
        let (base, _server) = serve_once("404 Not Found", r#"{"message":"Not Found"}"#).await;

        let err = backend(&base)
            .get_contents(&task("acme/launcher", "missing.xml"))
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Status { status: 404, .. }));
    }
}
