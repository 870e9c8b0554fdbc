// src/stats/github.rs
// =============================================================================
// Looks up star and fork counts for repositories via the GitHub REST API.
//
// One unauthenticated GET per repository, all lookups concurrent. A 404
// means the repository is gone; that lookup yields nothing and the rest of
// the aggregation carries on. Any other failure does the same, with a
// warning. Missing numeric fields in the response default to 0.
// =============================================================================

use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://api.github.com/repos";

/// Star and fork counts for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoStats {
    pub name: String,
    pub stars: u64,
    pub forks: u64,
}

/// Star and fork counts summed across every repository that resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatTotals {
    pub stars: u64,
    pub forks: u64,
}

// The slice of the API response we consume. Everything else is ignored,
// and the numeric fields default to 0 when absent.
#[derive(Debug, Deserialize)]
struct RepoResponse {
    full_name: Option<String>,
    #[serde(default)]
    stargazers_count: u64,
    #[serde(default)]
    forks_count: u64,
}

/// Fetches stats for a single `owner/name` identifier.
///
/// Returns None on 404 (repository not found, non-fatal), on any other
/// non-success status, and on transport errors.
pub async fn fetch_repo_stats(client: &Client, repo_id: &str) -> Option<RepoStats> {
    let url = format!("{}/{}", API_BASE, repo_id);

    let response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            eprintln!("  Warning: lookup failed for {}: {}", repo_id, e);
            return None;
        }
    };

    if response.status() == StatusCode::NOT_FOUND {
        return None;
    }

    if !response.status().is_success() {
        eprintln!(
            "  Warning: HTTP {} looking up {}",
            response.status(),
            repo_id
        );
        return None;
    }

    match response.json::<RepoResponse>().await {
        Ok(body) => Some(RepoStats {
            name: body.full_name.unwrap_or_else(|| repo_id.to_string()),
            stars: body.stargazers_count,
            forks: body.forks_count,
        }),
        Err(e) => {
            eprintln!("  Warning: bad response body for {}: {}", repo_id, e);
            None
        }
    }
}

/// Looks up every repository concurrently, discarding failed lookups.
/// Results come back in the order the identifiers were given.
pub async fn fetch_all(client: &Client, repos: &[String]) -> Vec<RepoStats> {
    let lookups = repos.iter().map(|repo_id| fetch_repo_stats(client, repo_id));

    join_all(lookups).await.into_iter().flatten().collect()
}

/// Sums star and fork counts across resolved repositories.
pub fn totals(stats: &[RepoStats]) -> StatTotals {
    let mut sums = StatTotals::default();
    for repo in stats {
        sums.stars += repo.stars;
        sums.forks += repo.forks;
    }
    sums
}

/// Fetches and sums in one step. An empty repository list short-circuits
/// to zero totals without issuing a single request.
pub async fn fetch_totals(client: &Client, repos: &[String]) -> StatTotals {
    if repos.is_empty() {
        return StatTotals::default();
    }

    totals(&fetch_all(client, repos).await)
}
