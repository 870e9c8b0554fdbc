// src/blog/post.rs
// =============================================================================
// The blog post model and the category heuristic.
//
// A post starts as a skeleton scraped from the index page (title, url, date)
// and is filled in by a second fetch of its own page (excerpt, read time).
// The working set is always kept sorted newest-first; posts without a
// parsable date sort after every dated post, in scrape order.
// =============================================================================

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

// Keyword lists are best-effort, matched case-insensitively against the
// title. First hit wins, checked in the order below.
const TUTORIAL_KEYWORDS: &[&str] = &["tutorial", "guide", "how to", "getting started", "walkthrough"];
const OPTIMIZATION_KEYWORDS: &[&str] = &["optimiz", "performance", "benchmark", "faster", "speed"];
const RESEARCH_KEYWORDS: &[&str] = &["research", "paper", "study", "experiment"];

/// The category a post is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tutorials,
    Optimization,
    Deployment,
    Research,
}

impl Category {
    /// Picks a category by keyword match against the title.
    /// Titles matching nothing fall back to Deployment.
    pub fn from_title(title: &str) -> Self {
        let title = title.to_lowercase();

        let matches = |keywords: &[&str]| keywords.iter().any(|k| title.contains(k));

        if matches(TUTORIAL_KEYWORDS) {
            Category::Tutorials
        } else if matches(OPTIMIZATION_KEYWORDS) {
            Category::Optimization
        } else if matches(RESEARCH_KEYWORDS) {
            Category::Research
        } else {
            Category::Deployment
        }
    }

    /// The identifier used in filter selections and CSS hooks.
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Tutorials => "tutorials",
            Category::Optimization => "optimization",
            Category::Deployment => "deployment",
            Category::Research => "research",
        }
    }

    /// The human-readable label shown on cards and filter buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Tutorials => "Tutorials",
            Category::Optimization => "Optimization",
            Category::Deployment => "Deployment",
            Category::Research => "Research",
        }
    }

    /// Parses a filter selection, as typed on the command line.
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug.to_lowercase().as_str() {
            "tutorials" => Some(Category::Tutorials),
            "optimization" => Some(Category::Optimization),
            "deployment" => Some(Category::Deployment),
            "research" => Some(Category::Research),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One post, scraped from the index and optionally enriched.
#[derive(Debug, Clone, Serialize)]
pub struct BlogPost {
    /// Link text from the index page.
    pub title: String,
    /// Absolute URL of the post's own page.
    pub url: String,
    /// The date text as it appeared on the index page.
    pub raw_date: String,
    /// Normalized date; absent when the raw text didn't parse.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Date formatted for display, falling back to the raw text.
    pub display_date: String,
    pub excerpt: String,
    pub category: Category,
    pub read_minutes: u32,
}

/// Sorts newest-first with undated posts last. The sort is stable, so
/// undated posts keep their scrape order and date ties keep theirs.
pub fn sort_posts(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| match (a.date, b.date) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
