//! GitHub profile scoring: fetches a public profile and repository list and
//! aggregates them into a 0-100 reputation score.

pub mod handlers;

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const GITHUB_API_URL: &str = "https://api.github.com";
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("resumatch/", env!("CARGO_PKG_VERSION"));
/// Repositories fetched per profile, most recently updated first.
const REPOS_PER_PAGE: &str = "30";
/// Languages and top repos aggregate over this many newest repositories.
const AGGREGATION_WINDOW: usize = 10;
/// Top repos kept in the analysis record.
const TOP_REPO_COUNT: usize = 5;

/// Full analysis record for one username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubAnalysis {
    pub username: String,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub company: Option<String>,
    pub avatar_url: Option<String>,
    pub profile_url: Option<String>,
    pub followers: i64,
    pub following: i64,
    pub public_repos: i64,
    pub account_created: Option<String>,
    pub languages: HashMap<String, u32>,
    pub top_repos: Vec<TopRepo>,
    pub total_stars: i64,
    pub total_forks: i64,
    pub github_score: f64,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopRepo {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub stars: i64,
    pub forks: i64,
    pub language: Option<String>,
    pub updated_at: Option<String>,
}

/// Lookup failure reported as data so callers decide whether to persist.
/// The core never caches these.
#[derive(Debug, Clone, Serialize)]
pub struct GithubLookupError {
    pub error: String,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GithubOutcome {
    Analysis(Box<GithubAnalysis>),
    Failed(GithubLookupError),
}

#[derive(Debug, Default, Deserialize)]
struct UserResponse {
    name: Option<String>,
    bio: Option<String>,
    location: Option<String>,
    company: Option<String>,
    blog: Option<String>,
    avatar_url: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    followers: i64,
    #[serde(default)]
    following: i64,
    created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RepoResponse {
    name: Option<String>,
    description: Option<String>,
    html_url: Option<String>,
    #[serde(default)]
    stargazers_count: i64,
    #[serde(default)]
    forks_count: i64,
    language: Option<String>,
    updated_at: Option<String>,
}

/// Read-only GitHub REST client. An optional token raises rate limits.
#[derive(Clone)]
pub struct GithubClient {
    client: Client,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(token: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(15))
                .user_agent(USER_AGENT)
                .build()
                .expect("Failed to build HTTP client"),
            token,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github.v3+json");
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }
        request
    }

    /// Fetches profile and repositories, then computes the reputation score.
    /// Not-found and non-2xx statuses come back as `GithubOutcome::Failed`;
    /// only transport failures surface as errors. No retry.
    pub async fn fetch_profile(&self, username: &str) -> Result<GithubOutcome, AppError> {
        let user_resp = self
            .get(&format!("{GITHUB_API_URL}/users/{username}"))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub request failed: {e}")))?;

        match user_resp.status().as_u16() {
            200 => {}
            404 => {
                return Ok(GithubOutcome::Failed(GithubLookupError {
                    error: "GitHub user not found".to_string(),
                    username: username.to_string(),
                }))
            }
            status => {
                return Ok(GithubOutcome::Failed(GithubLookupError {
                    error: format!("GitHub API error: {status}"),
                    username: username.to_string(),
                }))
            }
        }

        let user: UserResponse = user_resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub profile decode failed: {e}")))?;

        let repos_resp = self
            .get(&format!("{GITHUB_API_URL}/users/{username}/repos"))
            .query(&[("sort", "updated"), ("per_page", REPOS_PER_PAGE)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub request failed: {e}")))?;

        let repos: Vec<RepoResponse> = if repos_resp.status().as_u16() == 200 {
            repos_resp.json().await.unwrap_or_default()
        } else {
            Vec::new()
        };

        Ok(GithubOutcome::Analysis(Box::new(build_analysis(
            username,
            user,
            repos,
            Utc::now(),
        ))))
    }
}

/// Aggregates fetched profile and repositories into an analysis record.
/// Languages and top repos consider only the newest `AGGREGATION_WINDOW`
/// repositories; star/fork totals span everything fetched.
fn build_analysis(
    username: &str,
    user: UserResponse,
    repos: Vec<RepoResponse>,
    analyzed_at: DateTime<Utc>,
) -> GithubAnalysis {
    let mut languages: HashMap<String, u32> = HashMap::new();
    let mut top_repos = Vec::new();

    for repo in repos.iter().take(AGGREGATION_WINDOW) {
        if let Some(language) = &repo.language {
            *languages.entry(language.clone()).or_insert(0) += 1;
        }
        top_repos.push(TopRepo {
            name: repo.name.clone(),
            description: repo.description.clone(),
            url: repo.html_url.clone(),
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            language: repo.language.clone(),
            updated_at: repo.updated_at.clone(),
        });
    }
    top_repos.truncate(TOP_REPO_COUNT);

    let total_stars: i64 = repos.iter().map(|r| r.stargazers_count).sum();
    let total_forks: i64 = repos.iter().map(|r| r.forks_count).sum();
    let repo_count = repos.len() as i64;

    let completeness = profile_completeness(&user, repo_count);
    let quality = repo_quality(total_stars, total_forks, repo_count);
    let github_score = (completeness * 0.4 + quality * 0.6).round().min(100.0);

    GithubAnalysis {
        username: username.to_string(),
        name: user.name,
        bio: user.bio,
        location: user.location,
        company: user.company,
        avatar_url: user.avatar_url,
        profile_url: user.html_url,
        followers: user.followers,
        following: user.following,
        public_repos: repo_count,
        account_created: user.created_at,
        languages,
        top_repos,
        total_stars,
        total_forks,
        github_score,
        analyzed_at,
    }
}

/// 0-100 by construction: 20 bio + 10 location + 10 blog + up to 20 from
/// followers + up to 40 from repository count.
fn profile_completeness(user: &UserResponse, repo_count: i64) -> f64 {
    let mut score = 0.0;
    if user.bio.as_deref().is_some_and(|b| !b.is_empty()) {
        score += 20.0;
    }
    if user.location.as_deref().is_some_and(|l| !l.is_empty()) {
        score += 10.0;
    }
    if user.blog.as_deref().is_some_and(|b| !b.is_empty()) {
        score += 10.0;
    }
    score += (user.followers as f64 * 2.0).min(20.0);
    score += (repo_count as f64 * 2.0).min(40.0);
    score
}

/// Stars weigh 3x, forks 2x, repository count 1x, capped at 100.
fn repo_quality(total_stars: i64, total_forks: i64, repo_count: i64) -> f64 {
    ((total_stars * 3 + total_forks * 2 + repo_count) as f64).min(100.0)
}
