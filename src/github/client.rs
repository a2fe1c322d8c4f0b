use bytes::Bytes;
use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use url::Url;

use crate::auth::Token;
use crate::config::Config;
use crate::error::{Error, Result};

use super::types::{ArtifactDescriptor, ArtifactsResponse};

const USER_AGENT: &str = concat!("run-artifacts/", env!("CARGO_PKG_VERSION"));

/// GitHub REST client scoped to one repository.
///
/// Every request carries `Authorization: token <TOKEN>`. No timeout and no
/// retry is configured; a failed request is reported once to the caller.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: Url,
    owner: String,
    repo: String,
    per_page: u8,
    token: Token,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// # Arguments
    ///
    /// * `config` - API base URL, repository and page size
    /// * `token` - GitHub access token
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &Config, token: Token) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_url: config.api_base_url.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            per_page: config.per_page,
            token,
        })
    }

    fn auth_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.header(AUTHORIZATION, format!("token {}", self.token.as_str()))
    }

    /// Issues one authenticated GET. The status is left for the caller to judge.
    async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {url}");
        let response = self.auth_request(self.client.get(url)).send().await?;
        debug!("GET {url} -> {}", response.status());
        Ok(response)
    }

    /// Builds `<api>/repos/<owner>/<repo>/actions/runs/<run_id>/artifacts?per_page=<n>`.
    ///
    /// The run identifier is percent-encoded as a single path segment.
    pub fn artifacts_url(&self, run_id: &str) -> Result<Url> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Invalid API base URL: {}", self.api_url)))?
            .pop_if_empty()
            .extend([
                "repos",
                self.owner.as_str(),
                self.repo.as_str(),
                "actions",
                "runs",
                run_id,
                "artifacts",
            ]);
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());
        Ok(url)
    }

    /// Lists the artifacts of a workflow run.
    ///
    /// Only the first page is requested; runs with more than `per_page`
    /// artifacts are truncated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ListArtifacts`] on a non-success status, or a network or
    /// JSON error if the request or body decoding fails.
    pub async fn list_artifacts(&self, run_id: &str) -> Result<Vec<ArtifactDescriptor>> {
        let url = self.artifacts_url(run_id)?;
        let response = self.get(url.as_str()).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::ListArtifacts {
                run_id: run_id.to_string(),
                status,
            });
        }

        let body = response.bytes().await?;
        let listing: ArtifactsResponse = serde_json::from_slice(&body)?;

        Ok(listing.artifacts)
    }

    /// Downloads one artifact archive fully into memory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FetchArtifact`] on a non-success status, or a network
    /// error if the request or body transfer fails.
    pub async fn fetch_artifact(&self, download_url: &str) -> Result<Bytes> {
        let response = self.get(download_url).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::FetchArtifact {
                url: download_url.to_string(),
                status,
            });
        }

        Ok(response.bytes().await?)
    }
}
