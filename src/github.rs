//! GitHub pull-request fetching.
//!
//! Resolves a PR reference (URL or `owner/repo#N`) against the GitHub
//! REST API and returns the metadata plus the changed-file records.
//! Authentication is optional; a token raises the rate limit and grants
//! access to private repositories. `GITHUB_API_URL` overrides the API
//! base for GitHub Enterprise hosts.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{ENV_GITHUB_API_BASE, ENV_GITHUB_TOKENS, GITHUB_API_BASE, USER_AGENT};
use crate::env::Env;
use crate::models::PullRequest;

/// Page size for the PR files endpoint; also the loop exit condition.
const FILES_PER_PAGE: usize = 100;

/// Per-request timeout for GitHub API calls.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors from the GitHub client.
#[derive(Error, Debug)]
pub enum GithubError {
    #[error(
        "invalid pull request reference '{0}' \
         (expected https://github.com/owner/repo/pull/123 or owner/repo#123)"
    )]
    InvalidLocator(String),

    #[error("GitHub API request failed: {0}")]
    ApiError(String),
}

/// A parsed pull-request reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrLocator {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PrLocator {
    /// Parse a PR reference in either URL or `owner/repo#N` form.
    pub fn parse(input: &str) -> Result<Self, GithubError> {
        let trimmed = input.trim();
        let invalid = || GithubError::InvalidLocator(trimmed.to_string());

        if let Some(rest) = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"))
        {
            let rest = rest.strip_prefix("www.").unwrap_or(rest);
            let path = rest.strip_prefix("github.com/").ok_or_else(invalid)?;
            let segments: Vec<&str> = path.trim_end_matches('/').split('/').collect();
            if segments.len() != 4 || segments[2] != "pull" {
                return Err(invalid());
            }
            let (owner, repo) = (segments[0], segments[1]);
            if owner.is_empty() || repo.is_empty() {
                return Err(invalid());
            }
            let number = segments[3].parse().map_err(|_| invalid())?;
            return Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            });
        }

        if let Some((repo_part, number_part)) = trimmed.split_once('#')
            && let Some((owner, repo)) = repo_part.split_once('/')
            && !owner.is_empty()
            && !repo.is_empty()
            && !repo.contains('/')
            && let Ok(number) = number_part.parse()
        {
            return Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                number,
            });
        }

        Err(invalid())
    }

    /// The `owner/name` repository identifier.
    pub fn repository(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// One changed-file record from the PR files endpoint.
///
/// `patch` is absent for binary files and very large diffs.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PrFile {
    pub filename: String,
    pub status: String,
    #[serde(default)]
    pub patch: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrResponse {
    number: u64,
    title: String,
    user: PrUser,
    head: PrRef,
    base: PrRef,
    state: String,
    created_at: String,
    updated_at: String,
    #[serde(default)]
    body: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PrUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct PrRef {
    #[serde(rename = "ref")]
    branch: String,
    sha: String,
}

/// Fetch PR metadata and its changed files.
///
/// The summary counts on the returned [`PullRequest`] are left at their
/// defaults; the change collector fills them in while normalizing the
/// file records.
pub async fn fetch_pull_request(
    locator: &PrLocator,
    env: &Env,
) -> Result<(PullRequest, Vec<PrFile>), GithubError> {
    let token = env.first_of(ENV_GITHUB_TOKENS);
    let base = env
        .var(ENV_GITHUB_API_BASE)
        .unwrap_or_else(|_| GITHUB_API_BASE.to_string());
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| GithubError::ApiError(format!("failed to create HTTP client: {e}")))?;

    let pr_url = format!(
        "{}/repos/{}/{}/pulls/{}",
        base.trim_end_matches('/'),
        locator.owner,
        locator.repo,
        locator.number
    );
    let pr: PrResponse = get_json(&client, &pr_url, token.as_deref()).await?;

    let mut files = Vec::new();
    let mut page = 1;
    loop {
        let url = format!("{pr_url}/files?per_page={FILES_PER_PAGE}&page={page}");
        let batch: Vec<PrFile> = get_json(&client, &url, token.as_deref()).await?;
        let done = batch.len() < FILES_PER_PAGE;
        files.extend(batch);
        if done {
            break;
        }
        page += 1;
    }

    let pull_request = PullRequest {
        repository: locator.repository(),
        number: pr.number,
        title: pr.title,
        author: pr.user.login,
        source_branch: pr.head.branch,
        target_branch: pr.base.branch,
        source_sha: pr.head.sha,
        target_sha: pr.base.sha,
        state: pr.state,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
        body: pr.body.unwrap_or_default(),
        summary: Default::default(),
    };
    Ok((pull_request, files))
}

async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    token: Option<&str>,
) -> Result<T, GithubError> {
    let mut request = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json");
    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {token}"));
    }

    let response = request
        .send()
        .await
        .map_err(|e| GithubError::ApiError(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(GithubError::ApiError(format!(
            "GitHub API returned {} for {url}",
            response.status()
        )));
    }

    response
        .json()
        .await
        .map_err(|e| GithubError::ApiError(format!("failed to parse response: {e}")))
}
