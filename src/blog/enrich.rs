// src/blog/enrich.rs
// =============================================================================
// Second-pass enrichment: fetches each post's own page to fill in the
// excerpt and read-time estimate.
//
// Posts are enriched in fixed-size batches. Fetches inside a batch run
// concurrently and results are reassembled in request order, so the
// date-sorted order from the index survives. A short pause separates
// batches - politeness toward the external site, capping it at five
// in-flight requests. No pause after the last batch.
//
// A post whose page won't fetch keeps its skeleton plus defaults; only the
// one post degrades.
// =============================================================================

use anyhow::{anyhow, Result};
use futures::future::join_all;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

use super::index::fetch_index;
use super::post::{BlogPost, Category};

/// Posts enriched per batch.
pub const ENRICH_BATCH_SIZE: usize = 5;
/// Pause between batches, in milliseconds.
pub const BATCH_DELAY_MS: u64 = 100;
/// Excerpts longer than this are cut and given an ellipsis.
pub const EXCERPT_MAX_CHARS: usize = 200;
/// Read-time floor, in minutes.
pub const MIN_READ_MINUTES: u32 = 3;

const ELLIPSIS: &str = "...";
const WORDS_PER_MINUTE: usize = 200;
const DEFAULT_EXCERPT: &str = "Read the full post on the blog.";

// Excerpt sources on the post page, tried in order after the meta
// description: the first paragraph of the most specific content container
const CONTENT_SELECTORS: &[&str] = &["article p", "main p", ".post-content p", "body p"];

/// The full aggregation result: enriched posts in date order, plus the
/// distinct categories observed, in order of first appearance.
#[derive(Debug, Clone, Default)]
pub struct BlogFeed {
    pub posts: Vec<BlogPost>,
    pub categories: Vec<Category>,
}

/// Runs the whole blog pipeline: index scrape, then batched enrichment.
///
/// An empty index short-circuits to an empty feed. Only the index fetch
/// itself can fail; enrichment failures degrade per post.
pub async fn fetch_feed(client: &Client) -> Result<BlogFeed> {
    let skeletons = fetch_index(client).await?;
    if skeletons.is_empty() {
        return Ok(BlogFeed::default());
    }

    println!("  Enriching {} post(s)...", skeletons.len());

    let batches = into_batches(skeletons, ENRICH_BATCH_SIZE);
    let batch_count = batches.len();
    let mut posts = Vec::new();

    for (index, batch) in batches.into_iter().enumerate() {
        // join_all keeps request order, not completion order
        let enriched = join_all(batch.into_iter().map(|post| enrich(client, post))).await;
        posts.extend(enriched);

        // Pause between batches only, never after the last
        if index + 1 < batch_count {
            tokio::time::sleep(Duration::from_millis(BATCH_DELAY_MS)).await;
        }
    }

    let categories = observed_categories(&posts);
    Ok(BlogFeed { posts, categories })
}

/// Fetches one post's page and fills in excerpt and read time.
/// On any failure the post comes back with defaults instead.
pub async fn enrich(client: &Client, mut post: BlogPost) -> BlogPost {
    let html = match fetch_page(client, &post.url).await {
        Ok(html) => html,
        Err(e) => {
            eprintln!("  Warning: could not enrich {}: {}", post.url, e);
            post.excerpt = DEFAULT_EXCERPT.to_string();
            post.read_minutes = MIN_READ_MINUTES;
            return post;
        }
    };

    let excerpt = extract_excerpt(&html).unwrap_or_else(|| DEFAULT_EXCERPT.to_string());
    post.excerpt = truncate_excerpt(&excerpt);
    post.read_minutes = estimate_read_minutes(&post.excerpt);
    post
}

// Meta description first, then the first paragraph of the highest-priority
// content container that has one
fn extract_excerpt(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    if let Some(meta) = document.select(&meta_selector).next() {
        if let Some(content) = meta.value().attr("content") {
            let content = collapse_whitespace(content);
            if !content.is_empty() {
                return Some(content);
            }
        }
    }

    for selector in CONTENT_SELECTORS {
        let paragraph_selector = Selector::parse(selector).unwrap();
        if let Some(paragraph) = document.select(&paragraph_selector).next() {
            let text = collapse_whitespace(&paragraph.text().collect::<String>());
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    None
}

/// Cuts an excerpt to the display cap, marking the cut with an ellipsis.
pub fn truncate_excerpt(excerpt: &str) -> String {
    if excerpt.chars().count() <= EXCERPT_MAX_CHARS {
        return excerpt.to_string();
    }

    let cut: String = excerpt.chars().take(EXCERPT_MAX_CHARS).collect();
    format!("{}{}", cut, ELLIPSIS)
}

/// Estimated minutes to read, floored at MIN_READ_MINUTES.
pub fn estimate_read_minutes(excerpt: &str) -> u32 {
    let words = excerpt.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE) as u32;
    minutes.max(MIN_READ_MINUTES)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Splits the working set into fixed-size batches, last one short
fn into_batches<T>(mut items: Vec<T>, size: usize) -> Vec<Vec<T>> {
    let mut batches = Vec::new();
    while !items.is_empty() {
        let tail = items.split_off(items.len().min(size));
        batches.push(std::mem::replace(&mut items, tail));
    }
    batches
}

fn observed_categories(posts: &[BlogPost]) -> Vec<Category> {
    let mut categories = Vec::new();
    for post in posts {
        if !categories.contains(&post.category) {
            categories.push(post.category);
        }
    }
    categories
}

async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {}", response.status()));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_description_preferred() {
        let html = r#"
            <head><meta name="description" content="From the meta tag."></head>
            <body><article><p>From the body.</p></article></body>
        "#;
        assert_eq!(extract_excerpt(html), Some("From the meta tag.".to_string()));
    }

    #[test]
    fn test_first_paragraph_fallback() {
        let html = r#"
            <body>
              <article><p>  First   paragraph. </p><p>Second.</p></article>
            </body>
        "#;
        assert_eq!(extract_excerpt(html), Some("First paragraph.".to_string()));
    }

    #[test]
    fn test_no_excerpt_sources() {
        assert_eq!(extract_excerpt("<body><div>no paragraphs</div></body>"), None);
    }

    #[test]
    fn test_truncate_excerpt_at_cap() {
        let long = "x".repeat(250);
        let truncated = truncate_excerpt(&long);
        assert_eq!(truncated.chars().count(), 203);
        assert!(truncated.ends_with("..."));

        let short = "short enough";
        assert_eq!(truncate_excerpt(short), short);
    }

    #[test]
    fn test_estimate_read_minutes() {
        // Anything short floors at the minimum
        assert_eq!(estimate_read_minutes("a few words"), 3);

        let eight_hundred_words = "word ".repeat(800);
        assert_eq!(estimate_read_minutes(&eight_hundred_words), 4);
    }

    #[test]
    fn test_batching_splits_twelve_into_5_5_2() {
        let posts: Vec<u32> = (0..12).collect();
        let batches = into_batches(posts, ENRICH_BATCH_SIZE);

        let sizes: Vec<usize> = batches.iter().map(|batch| batch.len()).collect();
        assert_eq!(sizes, vec![5, 5, 2]);

        // Request order survives batching
        let flattened: Vec<u32> = batches.into_iter().flatten().collect();
        assert_eq!(flattened, (0..12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_observed_categories_first_appearance_order() {
        use super::super::post::tests::post;

        let posts = vec![
            post("A research paper", None),
            post("Deploying things", None),
            post("More research notes", None),
        ];

        assert_eq!(
            observed_categories(&posts),
            vec![Category::Research, Category::Deployment]
        );
    }
}
