// src/stats/extract.rs
// =============================================================================
// Finds the GitHub repositories the projects page links to.
//
// How it works:
// 1. Parse the projects page HTML
// 2. Select every anchor whose href mentions github.com
// 3. Keep only hrefs with exactly two path segments after the host
//    (owner/name) - profile links and deep links into a repo are not repos
// 4. Deduplicate, preserving first-appearance order
// =============================================================================

use scraper::{Html, Selector};
use std::collections::HashSet;

const HOST_MARKER: &str = "github.com/";

/// Extracts `owner/name` repository identifiers from the projects page.
///
/// Idempotent and callable repeatedly; a page without matching anchors
/// yields an empty list.
pub fn extract_repos(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    // Constant selector, known to be valid
    let selector = Selector::parse(r#"a[href*="github.com"]"#).unwrap();

    let mut seen = HashSet::new();
    let mut repos = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(repo_id) = parse_repo_id(href) {
                // First appearance wins; later duplicates collapse
                if seen.insert(repo_id.clone()) {
                    repos.push(repo_id);
                }
            }
        }
    }

    repos
}

// Pulls `owner/name` out of a GitHub URL.
//
// Accepted:
//   https://github.com/owner/name      -> Some("owner/name")
//   https://github.com/owner/name.git  -> Some("owner/name")
//   https://github.com/owner/name/     -> Some("owner/name")
// Rejected:
//   https://github.com/owner           (profile, one segment)
//   https://github.com/owner/name/issues (deep link, three segments)
//   https://github.com/                (bare host)
fn parse_repo_id(href: &str) -> Option<String> {
    let start = href.find(HOST_MARKER)? + HOST_MARKER.len();

    // Everything after the host, minus query string and fragment
    let path = href[start..].split(['?', '#']).next().unwrap_or_default();
    let path = path.trim_end_matches('/');

    let segments: Vec<&str> = path.split('/').collect();
    if segments.len() != 2 || segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    let owner = segments[0];
    let name = segments[1].trim_end_matches(".git");
    if name.is_empty() {
        return None;
    }

    Some(format!("{}/{}", owner, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_repo_links() {
        let html = r#"
            <a href="https://github.com/rust-lang/rust">Rust</a>
            <a href="https://github.com/tokio-rs/tokio">Tokio</a>
            <a href="https://example.com/docs">Docs</a>
        "#;
        let repos = extract_repos(html);
        assert_eq!(repos, vec!["rust-lang/rust", "tokio-rs/tokio"]);
    }

    #[test]
    fn test_rejects_non_repo_paths() {
        let html = r#"
            <a href="https://github.com/rust-lang">Profile</a>
            <a href="https://github.com/">Bare host</a>
            <a href="https://github.com/rust-lang/rust/issues/1">Deep link</a>
        "#;
        assert!(extract_repos(html).is_empty());
    }

    #[test]
    fn test_deduplicates_preserving_order() {
        let html = r#"
            <a href="https://github.com/b/second">B</a>
            <a href="https://github.com/a/first">A</a>
            <a href="https://github.com/b/second">B again</a>
        "#;
        assert_eq!(extract_repos(html), vec!["b/second", "a/first"]);
    }

    #[test]
    fn test_parse_repo_id_variants() {
        assert_eq!(
            parse_repo_id("https://github.com/user/repo.git"),
            Some("user/repo".to_string())
        );
        assert_eq!(
            parse_repo_id("https://github.com/user/repo/"),
            Some("user/repo".to_string())
        );
        assert_eq!(
            parse_repo_id("https://github.com/user/repo?tab=readme"),
            Some("user/repo".to_string())
        );
        assert_eq!(parse_repo_id("https://github.com/user"), None);
        assert_eq!(parse_repo_id("https://example.com/user/repo"), None);
    }
}
