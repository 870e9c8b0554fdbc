// src/page/mod.rs
// =============================================================================
// The HTML document abstraction shared by every pipeline.
//
// Submodules:
// - document: PageDocument (selector queries + targeted content rewriting)
//
// The selector constants below are the contract with the site's markup:
// a page opts into a pipeline by carrying the matching container.
// =============================================================================

mod document;

pub use document::{page_file_name, PageDocument};

/// Container replaced by the shared header partial.
pub const HEADER_PLACEHOLDER: &str = "#header-placeholder";
/// Container replaced by the shared footer partial.
pub const FOOTER_PLACEHOLDER: &str = "#footer-placeholder";
/// Container for the GitHub stat tiles.
pub const STATS_CONTAINER: &str = "#github-stats";
/// Container for the featured (most recent) blog post.
pub const FEATURED_CONTAINER: &str = "#featured-article";
/// Container for the blog post grid.
pub const POSTS_GRID: &str = "#posts-grid";
/// Container for the category filter buttons.
pub const CATEGORY_FILTERS: &str = "#category-filters";
/// Container for the homepage's latest-posts cards.
pub const NEWS_GRID: &str = "#news-grid";
