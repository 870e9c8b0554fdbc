// src/stats/mod.rs
// =============================================================================
// The repository statistics pipeline.
//
// Submodules:
// - extract: finds owner/name identifiers on the projects page
// - github: per-repository lookups against the GitHub REST API
// - render: stat tile markup and number formatting
//
// The projects-page fetch is this pipeline's one fatal point; everything
// below it degrades per repository.
// =============================================================================

mod extract;
mod github;
mod render;

pub use extract::extract_repos;
pub use github::{fetch_all, fetch_totals, totals, RepoStats, StatTotals};
pub use render::{format_number, render_error_tiles, render_loading_tiles, render_stat_tiles};

/// The page scanned for repository links, relative to the site root.
pub const PROJECTS_PAGE: &str = "projects.html";
