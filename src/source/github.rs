//! GitHub commit-pinned dependency source
//!
//! Handles `build.zig.zon` URLs of the shape
//! `<scheme>://github.com/<owner>/<repo>#<commit>,` where the trailing comma
//! is the ZON declaration delimiter the scanner leaves attached. The latest
//! revision is the head commit of the repository's default branch, taken from
//! the GitHub commits API (newest first).

use crate::error::SourceError;
use crate::source::{DependencyKind, HttpClient, ResolvedDependency};
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

const GITHUB_HOST: &str = "github.com";

/// Commit-listing endpoint, newest commit first
const COMMITS_API_BASE: &str = "https://api.github.com/repos";

/// Hard bound on body-level indirections per lookup
///
/// The upstream protocol has no cap of its own; without one a misbehaving or
/// adversarial endpoint could redirect forever.
pub(crate) const MAX_INDIRECTIONS: usize = 5;

/// Substring upstream puts in `message` when the rate limit is hit.
/// Known limitation: this matches human-readable wording, not a structured
/// status field, and tracks what the API actually sends today.
const RATE_LIMIT_MARKER: &str = "API rate limit";

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:git|git\+https|https)://github\.com/(?P<owner>[^/#]+)/(?P<repo>[^/#]+)#(?P<commit>[^,]+),",
    )
    .unwrap()
});

/// Dependency pinned to a specific commit of a GitHub repository
pub struct GithubCommit {
    client: HttpClient,
}

impl GithubCommit {
    /// Create a new GitHub commit source
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }

    /// Extract owner, repo and commit from a matching URL
    fn parse(url: &str) -> Option<(String, String, String)> {
        URL_RE.captures(url).map(|captures| {
            (
                captures["owner"].to_string(),
                captures["repo"].to_string(),
                captures["commit"].to_string(),
            )
        })
    }

    fn commits_url(owner: &str, repo: &str) -> String {
        format!("{}/{}/{}/commits", COMMITS_API_BASE, owner, repo)
    }
}

/// Fetch abstraction over the commits API, for stubbing in tests
#[async_trait]
pub(crate) trait CommitApi: Send + Sync {
    async fn get_json(&self, url: &str, dependency: &str) -> Result<Value, SourceError>;
}

#[async_trait]
impl CommitApi for HttpClient {
    async fn get_json(&self, url: &str, dependency: &str) -> Result<Value, SourceError> {
        HttpClient::get_json(self, url, dependency).await
    }
}

/// Follow body-level indirections until a commit list appears
///
/// Each response body is inspected: a `message` announcing the rate limit
/// fails immediately without further requests, a `url` field points at the
/// next location to fetch, and anything else is the final payload. The loop
/// is bounded by [`MAX_INDIRECTIONS`].
pub(crate) async fn follow_indirections(
    api: &dyn CommitApi,
    url: &str,
    dependency: &str,
) -> Result<Value, SourceError> {
    let mut url = url.to_string();

    for _ in 0..MAX_INDIRECTIONS {
        let body = api.get_json(&url, dependency).await?;

        if let Some(message) = body.get("message").and_then(Value::as_str) {
            if message.contains(RATE_LIMIT_MARKER) {
                return Err(SourceError::rate_limit_exceeded(GITHUB_HOST));
            }
        }

        match body.get("url").and_then(Value::as_str) {
            Some(next) => url = next.to_string(),
            None => return Ok(body),
        }
    }

    Err(SourceError::TooManyIndirections {
        dependency: dependency.to_string(),
        limit: MAX_INDIRECTIONS,
    })
}

/// Look up the head commit of `owner/repo`
pub(crate) async fn find_latest(
    api: &dyn CommitApi,
    owner: &str,
    repo: &str,
) -> Result<String, SourceError> {
    let dependency = format!("{}/{}", owner, repo);
    let body = follow_indirections(api, &GithubCommit::commits_url(owner, repo), &dependency).await?;

    let commits = body
        .as_array()
        .ok_or_else(|| SourceError::invalid_response(&dependency, "expected a commit list"))?;

    // The endpoint returns commits newest first.
    let latest = commits
        .first()
        .ok_or_else(|| SourceError::invalid_response(&dependency, "commit list is empty"))?;

    let sha = latest
        .get("sha")
        .and_then(Value::as_str)
        .filter(|sha| !sha.is_empty())
        .ok_or_else(|| SourceError::invalid_response(&dependency, "commit entry has no sha"))?;

    Ok(sha.to_string())
}

/// Resolve a matching URL against the given commits API
pub(crate) async fn resolve_with(
    api: &dyn CommitApi,
    url: &str,
) -> Result<ResolvedDependency, SourceError> {
    let (owner, repo, commit) =
        GithubCommit::parse(url).ok_or_else(|| SourceError::pattern_mismatch("github-commit", url))?;

    let latest = find_latest(api, &owner, &repo).await?;

    Ok(ResolvedDependency::new(
        format!("{}/{}", owner, repo),
        format!("https://{}/{}/{}", GITHUB_HOST, owner, repo),
        commit,
        latest,
    ))
}

#[async_trait]
impl DependencyKind for GithubCommit {
    fn name(&self) -> &'static str {
        "github-commit"
    }

    fn recognize(&self, url: &str) -> bool {
        URL_RE.is_match(url)
    }

    async fn resolve(&self, url: &str) -> Result<ResolvedDependency, SourceError> {
        resolve_with(&self.client, url).await
    }
}
