//! GitHub contents API client.
//!
//! - `GET  /repos/{owner}/{repo}/contents/{path}?ref={branch}` to fetch
//! - `PUT  /repos/{owner}/{repo}/contents/{path}` to write, with the blob
//!   SHA of the version being replaced
//! - `GET  /repos/{owner}/{repo}` to check credentials

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{ConnectionCheck, ContentStore, RemoteFile, RepoCoords};
use crate::config::AppConfig;
use crate::error::{Error, Result};

const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
/// GitHub REST API version requested on every call.
pub const API_VERSION: &str = "2022-11-28";
/// `User-Agent` sent to GitHub.
pub const USER_AGENT: &str = concat!("tmd/", env!("CARGO_PKG_VERSION"));

/// GitHub contents API client.
pub struct GitHubClient {
    client: reqwest::Client,
    api_base_url: String,
    token: String,
}

impl GitHubClient {
    /// Create a client with an explicit endpoint and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(token: impl Into<String>, api_base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let api_base_url: String = api_base_url.into();

        Ok(Self {
            client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Create a client from the saved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig, token: &str) -> Result<Self> {
        Self::new(
            token,
            config.api_base_url.clone(),
            Duration::from_secs(config.timeout_secs.max(1)),
        )
    }

    fn repo_url(&self, coords: &RepoCoords) -> String {
        format!("{}/repos/{}/{}", self.api_base_url, coords.owner, coords.repo)
    }

    fn contents_url(&self, coords: &RepoCoords) -> String {
        format!(
            "{}/contents/{}",
            self.repo_url(coords),
            coords.path.trim_start_matches('/')
        )
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.with_headers(self.client.get(url))
    }

    fn with_headers(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

/// Contents API response for a file.
#[derive(Debug, Deserialize)]
struct ContentsResponse {
    #[serde(default)]
    content: String,
    sha: String,
}

/// Contents API request body for a write.
#[derive(Debug, Serialize)]
struct PutContentsRequest<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

/// Contents API response for a write.
#[derive(Debug, Deserialize)]
struct PutContentsResponse {
    content: PutContentsFile,
}

#[derive(Debug, Deserialize)]
struct PutContentsFile {
    sha: String,
}

/// Consume a failed response, logging its body, and return the status.
async fn log_error_body(response: reqwest::Response) -> StatusCode {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), body = %body, "GitHub API error response");
    status
}

fn remote_error(status: StatusCode) -> Error {
    Error::Remote {
        status: status.as_u16(),
        message: status.canonical_reason().unwrap_or("").to_string(),
    }
}

/// Build the error for a non-success status.
async fn status_error(response: reqwest::Response) -> Error {
    remote_error(log_error_body(response).await)
}

/// Error for a rejected write.
///
/// 409: sha no longer matches. 422: sha missing for an existing file.
fn push_error(status: StatusCode) -> Error {
    match status {
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => Error::Conflict {
            status: status.as_u16(),
        },
        _ => remote_error(status),
    }
}

/// Decode the API's base64 payload, which arrives wrapped across lines.
fn decode_content(encoded: &str) -> Result<String> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::Decode(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Decode(e.to_string()))
}

impl ContentStore for GitHubClient {
    async fn fetch(&self, coords: &RepoCoords) -> Result<RemoteFile> {
        let url = self.contents_url(coords);
        debug!(%url, branch = %coords.branch, "Fetching remote document");

        let response = self
            .get(&url)
            .query(&[("ref", coords.branch.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            info!(path = %coords.path, "Remote document does not exist yet");
            return Ok(RemoteFile::default());
        }
        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let data: ContentsResponse = response.json().await?;
        Ok(RemoteFile {
            content: decode_content(&data.content)?,
            sha: data.sha,
        })
    }

    async fn push(
        &self,
        coords: &RepoCoords,
        content: &str,
        expected_sha: Option<&str>,
        message: &str,
    ) -> Result<String> {
        let url = self.contents_url(coords);
        let body = PutContentsRequest {
            message,
            content: STANDARD.encode(content),
            branch: &coords.branch,
            sha: expected_sha,
        };
        debug!(%url, has_sha = expected_sha.is_some(), "Pushing remote document");

        let response = self
            .with_headers(self.client.put(&url))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(push_error(log_error_body(response).await));
        }

        let data: PutContentsResponse = response.json().await?;
        info!(sha = %data.content.sha, "Pushed remote document");
        Ok(data.content.sha)
    }

    async fn test_connection(&self, coords: &RepoCoords) -> ConnectionCheck {
        let response = match self.get(&self.repo_url(coords)).send().await {
            Ok(r) => r,
            Err(e) => return ConnectionCheck::failed(e.to_string()),
        };

        if response.status().is_success() {
            ConnectionCheck::ok()
        } else {
            ConnectionCheck::failed(status_error(response).await.to_string())
        }
    }
}
