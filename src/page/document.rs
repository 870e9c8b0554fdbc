// src/page/document.rs
// =============================================================================
// An HTML page held as a string, with the two capabilities the pipelines
// need from it:
//
// - Queries: CSS-selector lookups via the `scraper` crate (read-only DOM)
// - Mutation: selector-targeted inner-content rewriting via `lol_html`
//
// Every pipeline receives a &mut PageDocument instead of touching any
// ambient document state, so the same code runs against a fetched page or
// a literal string in tests.
// =============================================================================

use anyhow::{anyhow, Result};
use lol_html::html_content::ContentType;
use lol_html::{element, rewrite_str, RewriteStrSettings};
use scraper::{Html, Selector};
use url::Url;

/// A page of the site, parsed on demand and rewritten in place.
#[derive(Debug, Clone)]
pub struct PageDocument {
    html: String,
}

impl PageDocument {
    pub fn new(html: String) -> Self {
        Self { html }
    }

    /// Returns true if at least one element matches the selector.
    ///
    /// Used for container-presence dispatch: a page only gets the pipelines
    /// whose placeholder containers its markup carries.
    pub fn has(&self, selector: &str) -> bool {
        let document = Html::parse_document(&self.html);

        // Our selectors are constants and known to be valid, so a parse
        // failure here is a programmer error
        let selector = Selector::parse(selector).unwrap();

        document.select(&selector).next().is_some()
    }

    /// Replaces the inner content of every element matching the selector.
    ///
    /// A selector that matches nothing leaves the document unchanged, which
    /// is exactly what the pipelines rely on for their leave-untouched
    /// failure behavior.
    pub fn set_inner_html(&mut self, selector: &str, markup: &str) -> Result<()> {
        let rewritten = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!(selector, move |el| {
                    el.set_inner_content(markup, ContentType::Html);
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(|e| anyhow!("Failed to rewrite '{}': {}", selector, e))?;

        self.html = rewritten;
        Ok(())
    }

    /// Adds the `active` class to each nav link whose target file matches
    /// the current page's file name.
    ///
    /// Both sides of the comparison default to "index.html" when the path
    /// is empty, mirroring how the site's root URL serves its index page.
    pub fn mark_active_nav(&mut self, page_file: &str) -> Result<()> {
        let rewritten = rewrite_str(
            &self.html,
            RewriteStrSettings {
                element_content_handlers: vec![element!("nav a[href]", move |el| {
                    let href = el.get_attribute("href").unwrap_or_default();
                    if nav_target(&href) == page_file {
                        let class = match el.get_attribute("class") {
                            Some(existing) if !existing.trim().is_empty() => {
                                format!("{} active", existing.trim())
                            }
                            _ => "active".to_string(),
                        };
                        el.set_attribute("class", &class)?;
                    }
                    Ok(())
                })],
                ..RewriteStrSettings::default()
            },
        )
        .map_err(|e| anyhow!("Failed to mark active nav link: {}", e))?;

        self.html = rewritten;
        Ok(())
    }

    /// Consumes the document and returns its markup.
    pub fn into_html(self) -> String {
        self.html
    }

    pub fn as_html(&self) -> &str {
        &self.html
    }
}

/// The file name a page URL refers to, with "index.html" standing in for
/// an empty or directory-like path.
///
/// Example:
///   "https://example.com/blog.html" -> "blog.html"
///   "https://example.com/"          -> "index.html"
pub fn page_file_name(url: &Url) -> String {
    let file = url
        .path_segments()
        .and_then(|segments| segments.last().map(|s| s.to_string()))
        .unwrap_or_default();

    if file.is_empty() {
        "index.html".to_string()
    } else {
        file
    }
}

// The file name an href points at, ignoring query strings and fragments.
// An href like "/" or "./" has no file part and compares as index.html.
fn nav_target(href: &str) -> String {
    let path = href
        .split(['?', '#'])
        .next()
        .unwrap_or_default();

    let file = path.rsplit('/').next().unwrap_or_default();

    if file.is_empty() {
        "index.html".to_string()
    } else {
        file.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_container() {
        let doc = PageDocument::new(r#"<div id="news-grid"></div>"#.to_string());
        assert!(doc.has("#news-grid"));
        assert!(!doc.has("#posts-grid"));
    }

    #[test]
    fn test_set_inner_html_replaces_content() {
        let mut doc = PageDocument::new(
            r#"<div id="github-stats">old</div><p>keep</p>"#.to_string(),
        );
        doc.set_inner_html("#github-stats", "<span>new</span>").unwrap();

        let html = doc.into_html();
        assert!(html.contains(r#"<div id="github-stats"><span>new</span></div>"#));
        assert!(html.contains("<p>keep</p>"));
        assert!(!html.contains("old"));
    }

    #[test]
    fn test_set_inner_html_without_match_is_noop() {
        let mut doc = PageDocument::new("<div>untouched</div>".to_string());
        doc.set_inner_html("#missing", "<span>new</span>").unwrap();
        assert_eq!(doc.into_html(), "<div>untouched</div>");
    }

    #[test]
    fn test_mark_active_nav() {
        let mut doc = PageDocument::new(
            r#"<nav><a href="index.html">Home</a><a href="blog.html">Blog</a></nav>"#
                .to_string(),
        );
        doc.mark_active_nav("blog.html").unwrap();

        let html = doc.into_html();
        assert!(html.contains(r#"<a href="blog.html" class="active">"#));
        assert!(!html.contains(r#"<a href="index.html" class="active""#));
    }

    #[test]
    fn test_mark_active_nav_root_href_matches_index() {
        let mut doc = PageDocument::new(
            r#"<nav><a href="/" class="brand">Home</a></nav>"#.to_string(),
        );
        doc.mark_active_nav("index.html").unwrap();
        assert!(doc.into_html().contains(r#"class="brand active""#));
    }

    #[test]
    fn test_page_file_name() {
        let url = Url::parse("https://example.com/projects.html").unwrap();
        assert_eq!(page_file_name(&url), "projects.html");

        let root = Url::parse("https://example.com/").unwrap();
        assert_eq!(page_file_name(&root), "index.html");
    }

    #[test]
    fn test_nav_target_strips_query_and_fragment() {
        assert_eq!(nav_target("blog.html?tag=rust#top"), "blog.html");
        assert_eq!(nav_target("/"), "index.html");
    }
}
