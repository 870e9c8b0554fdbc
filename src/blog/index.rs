// src/blog/index.rs
// =============================================================================
// Scrapes post skeletons out of the external blog's index page.
//
// The index is a plain list; not every list item is a post. An item counts
// as a post when:
// 1. It contains a link with non-empty text
// 2. The link text isn't the home label and the target isn't the bare root
// 3. The target path carries a YYYY/MM/DD-shaped segment run - the
//    discriminator between post permalinks and everything else on the page
//
// The date text is taken from the item's span descendants, scanned in
// reverse, first one that looks like a date wins.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::date::{display_date, normalize_date};
use super::post::{sort_posts, BlogPost, Category};

/// The external blog's index page.
pub const BLOG_INDEX_URL: &str = "https://blog.tensorforge.io/";

// Index items whose link text is the blog's own home link
const HOME_LABEL: &str = "Home";

/// Fetches the index page and scrapes it into sorted post skeletons.
///
/// This fetch is the blog pipeline's one fatal point: a failure here means
/// the whole pipeline renders its error state instead of partial content.
pub async fn fetch_index(client: &Client) -> Result<Vec<BlogPost>> {
    let index_url = Url::parse(BLOG_INDEX_URL).expect("blog index URL is valid");

    let response = client.get(BLOG_INDEX_URL).send().await?;
    if !response.status().is_success() {
        return Err(anyhow!(
            "Blog index returned HTTP {}",
            response.status()
        ));
    }

    let html = response.text().await?;
    Ok(parse_index(&html, &index_url))
}

/// Scrapes post skeletons from index markup. Pure; used directly in tests.
pub fn parse_index(html: &str, index_url: &Url) -> Vec<BlogPost> {
    let document = Html::parse_document(html);

    let item_selector = Selector::parse("li").unwrap();
    let link_selector = Selector::parse("a").unwrap();
    let span_selector = Selector::parse("span").unwrap();

    let mut posts = Vec::new();

    for item in document.select(&item_selector) {
        let Some(link) = item.select(&link_selector).next() else {
            continue;
        };

        let title = element_text(&link);
        if title.is_empty() || title.eq_ignore_ascii_case(HOME_LABEL) {
            continue;
        }

        let Some(href) = link.value().attr("href") else {
            continue;
        };

        let Ok(target) = index_url.join(href) else {
            continue;
        };

        // The bare root is the blog's own landing page, not a post
        if target.path() == "/" {
            continue;
        }

        if !has_dated_path(target.path()) {
            continue;
        }

        // Last date-looking span wins; index items put metadata after the link
        let raw_date = item
            .select(&span_selector)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .map(|span| element_text(&span))
            .find(|text| looks_like_date(text))
            .unwrap_or_default();

        let date = normalize_date(&raw_date);

        posts.push(BlogPost {
            display_date: display_date(date, &raw_date),
            category: Category::from_title(&title),
            title,
            url: target.to_string(),
            raw_date,
            date,
            excerpt: String::new(),
            read_minutes: super::enrich::MIN_READ_MINUTES,
        });
    }

    sort_posts(&mut posts);
    posts
}

// Collapses an element's text nodes into one whitespace-normalized string
fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// True when the path contains a YYYY/MM/DD segment run, e.g.
// "/2025/01/07/my-post" or "/posts/2024/11/30/"
fn has_dated_path(path: &str) -> bool {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    segments.windows(3).any(|window| {
        is_digits(window[0], 4) && is_digits(window[1], 2) && is_digits(window[2], 2)
    })
}

fn is_digits(segment: &str, len: usize) -> bool {
    segment.len() == len && segment.bytes().all(|b| b.is_ascii_digit())
}

// Best-effort date detector for span text: either a "Month D, YYYY" shape
// or any 4-digit year anywhere in the text
fn looks_like_date(text: &str) -> bool {
    if normalize_date(text).is_some() {
        return true;
    }
    has_four_digit_run(text)
}

fn has_four_digit_run(text: &str) -> bool {
    let mut run = 0;
    for byte in text.bytes() {
        if byte.is_ascii_digit() {
            run += 1;
            if run >= 4 {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn index_url() -> Url {
        Url::parse("https://blog.tensorforge.io/").unwrap()
    }

    #[test]
    fn test_single_post_item() {
        let html = r#"
            <ul>
              <li>
                <a href="/2025/01/07/my-post">My Post</a>
                <span>Jan 7, 2025</span>
              </li>
            </ul>
        "#;

        let posts = parse_index(html, &index_url());

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "My Post");
        assert_eq!(
            posts[0].url,
            "https://blog.tensorforge.io/2025/01/07/my-post"
        );
        assert_eq!(posts[0].date, NaiveDate::from_ymd_opt(2025, 1, 7));
        assert_eq!(posts[0].display_date, "January 7, 2025");
    }

    #[test]
    fn test_undated_path_is_not_a_post() {
        let html = r#"<li><a href="/about">About</a></li>"#;
        assert!(parse_index(html, &index_url()).is_empty());
    }

    #[test]
    fn test_home_link_and_bare_root_skipped() {
        let html = r#"
            <li><a href="/2025/01/07/x">HOME</a></li>
            <li><a href="/">Start</a></li>
        "#;
        assert!(parse_index(html, &index_url()).is_empty());
    }

    #[test]
    fn test_last_date_like_span_wins() {
        let html = r#"
            <li>
              <a href="/2025/01/07/post">Post</a>
              <span>Mar 1, 2024</span>
              <span>7 min</span>
              <span>Jan 7, 2025</span>
            </li>
        "#;

        let posts = parse_index(html, &index_url());
        assert_eq!(posts[0].raw_date, "Jan 7, 2025");
    }

    #[test]
    fn test_unparsable_span_leaves_post_undated() {
        let html = r#"
            <li>
              <a href="/2025/01/07/post">Post</a>
              <span>somewhere in 2025</span>
            </li>
        "#;

        let posts = parse_index(html, &index_url());
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].date, None);
        assert_eq!(posts[0].display_date, "somewhere in 2025");
    }

    #[test]
    fn test_results_sorted_newest_first() {
        let html = r#"
            <li><a href="/2024/05/01/old">Old</a><span>May 1, 2024</span></li>
            <li><a href="/2025/01/07/new">New</a><span>Jan 7, 2025</span></li>
            <li><a href="/2023/01/01/undated">Undated</a><span>no date here</span></li>
        "#;

        let posts = parse_index(html, &index_url());
        let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["New", "Old", "Undated"]);
    }

    #[test]
    fn test_has_dated_path() {
        assert!(has_dated_path("/2025/01/07/my-post"));
        assert!(has_dated_path("/posts/2024/11/30/"));
        assert!(!has_dated_path("/about"));
        assert!(!has_dated_path("/2025/1/7/short-segments"));
    }

    #[test]
    fn test_looks_like_date() {
        assert!(looks_like_date("Jan 7, 2025"));
        assert!(looks_like_date("posted 2024"));
        assert!(!looks_like_date("7 min read"));
    }
}
