//! Minimal GitHub REST client for listing organization repositories

use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, LINK, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::core::config::{GITHUB_PAGE_SIZE, GITHUB_TOKEN_ENV, HTTP_TIMEOUT_SECS};

const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";
const RATE_LIMIT_REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RATE_LIMIT_RESET_HEADER: &str = "x-ratelimit-reset";

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// No token in the environment
    #[error("Unauthorized: No token present in {variable}")]
    MissingToken { variable: String },

    /// Primary rate limit exhausted
    #[error("hit rate limit")]
    RateLimited { reset: Option<u64> },

    /// Secondary (abuse) rate limit triggered
    #[error("hit secondary rate limit")]
    SecondaryRateLimited,

    /// Any other non-success response
    #[error("GitHub API returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Transport failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Unexpected response body
    #[error("Failed to parse GitHub response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A repository as returned by the organization listing endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrgRepository {
    pub name: String,
    #[serde(default)]
    pub archived: bool,
}

/// Authenticated client for the GitHub REST API
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: String,
    token: String,
}

impl GitHubClient {
    pub fn new(token: impl Into<String>, api_base: impl Into<String>) -> Result<Self, GitHubError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    /// Builds a client from the token in `GITHUB_AUTH_TOKEN`
    pub fn from_env(api_base: impl Into<String>) -> Result<Self, GitHubError> {
        match std::env::var(GITHUB_TOKEN_ENV) {
            Ok(token) if !token.trim().is_empty() => Self::new(token.trim(), api_base),
            _ => Err(GitHubError::MissingToken {
                variable: GITHUB_TOKEN_ENV.to_string(),
            }),
        }
    }

    /// Lists every public repository of `org`, archived ones included,
    /// following pagination until the last page.
    pub async fn list_org_repos(&self, org: &str) -> Result<Vec<OrgRepository>, GitHubError> {
        let url = format!("{}/orgs/{org}/repos", self.api_base);
        let mut repos = Vec::new();
        let mut page = 1u32;

        loop {
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("type", "public".to_string()),
                    ("per_page", GITHUB_PAGE_SIZE.to_string()),
                    ("page", page.to_string()),
                ])
                .header(AUTHORIZATION, format!("Bearer {}", self.token))
                .header(ACCEPT, "application/vnd.github+json")
                .header(USER_AGENT, concat!("solus-clone-all/", env!("CARGO_PKG_VERSION")))
                .header(API_VERSION_HEADER, API_VERSION)
                .send()
                .await?;

            let status = response.status();
            let headers = response.headers().clone();
            let body = response.text().await?;

            if !status.is_success() {
                return Err(classify_error(status, &headers, body));
            }

            let batch: Vec<OrgRepository> = serde_json::from_str(&body)?;
            tracing::info!(org, page, count = batch.len(), "Getting repos, page {page}");
            repos.extend(batch);

            let next = headers
                .get(LINK)
                .and_then(|value| value.to_str().ok())
                .and_then(next_page);
            match next {
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        Ok(repos)
    }
}

/// Maps a failed response onto the rate-limit aware error variants
fn classify_error(status: StatusCode, headers: &HeaderMap, body: String) -> GitHubError {
    if status == StatusCode::FORBIDDEN || status == StatusCode::TOO_MANY_REQUESTS {
        let remaining = headers
            .get(RATE_LIMIT_REMAINING_HEADER)
            .and_then(|v| v.to_str().ok());
        if remaining == Some("0") {
            let reset = headers
                .get(RATE_LIMIT_RESET_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            tracing::debug!(?reset, "primary rate limit exhausted");
            return GitHubError::RateLimited { reset };
        }
        if body.to_lowercase().contains("secondary rate limit") {
            return GitHubError::SecondaryRateLimited;
        }
    }
    GitHubError::Status {
        status: status.as_u16(),
        body,
    }
}

/// Extracts the page number of the `rel="next"` entry of a Link header
pub fn next_page(link: &str) -> Option<u32> {
    link.split(',')
        .map(str::trim)
        .find(|part| part.contains("rel=\"next\""))
        .and_then(|part| {
            let start = part.find('<')? + 1;
            let end = part.find('>')?;
            let url = part.get(start..end)?;
            let query = url.split_once('?')?.1;
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "page")
                .and_then(|(_, value)| value.parse().ok())
        })
}
