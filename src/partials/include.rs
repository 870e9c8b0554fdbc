// src/partials/include.rs
// =============================================================================
// Injects the shared header and footer partials into a page.
//
// How it works:
// 1. Fetch partials/header.html and partials/footer.html relative to the page
// 2. Replace each placeholder container's content with the fetched markup
// 3. After the header lands, run the optional navigation hook, then mark the
//    nav link for the current page as active
//
// A partial that fails to fetch leaves its container untouched; the page
// still assembles. Nothing here is surfaced to callers beyond a warning.
// =============================================================================

use anyhow::{anyhow, Result};
use reqwest::Client;
use url::Url;

use crate::page::{
    page_file_name, PageDocument, FOOTER_PLACEHOLDER, HEADER_PLACEHOLDER,
};

/// Relative location of the shared header fragment.
pub const HEADER_PARTIAL: &str = "partials/header.html";
/// Relative location of the shared footer fragment.
pub const FOOTER_PARTIAL: &str = "partials/footer.html";

/// A callback run after the header partial has been injected, before nav
/// highlighting. Lets the caller wire page-specific navigation behavior in
/// without this module knowing about it.
pub type NavHook<'a> = &'a dyn Fn(&mut PageDocument);

/// Fetches both partials and injects them into the page's placeholders.
pub async fn apply_partials(
    client: &Client,
    page: &mut PageDocument,
    page_url: &Url,
    nav_hook: Option<NavHook<'_>>,
) -> Result<()> {
    let header = match fetch_fragment(client, page_url, HEADER_PARTIAL).await {
        Ok(markup) => Some(markup),
        Err(e) => {
            eprintln!("  Warning: skipping header partial: {}", e);
            None
        }
    };

    let footer = match fetch_fragment(client, page_url, FOOTER_PARTIAL).await {
        Ok(markup) => Some(markup),
        Err(e) => {
            eprintln!("  Warning: skipping footer partial: {}", e);
            None
        }
    };

    inject(page, header, footer, &page_file_name(page_url), nav_hook)
}

// Applies already-fetched fragments. Split out from apply_partials so the
// injection and highlighting behavior is testable without a network.
fn inject(
    page: &mut PageDocument,
    header: Option<String>,
    footer: Option<String>,
    page_file: &str,
    nav_hook: Option<NavHook<'_>>,
) -> Result<()> {
    if let Some(markup) = header {
        page.set_inner_html(HEADER_PLACEHOLDER, &markup)?;

        // The hook runs first so highlighting sees any nav markup it added
        if let Some(hook) = nav_hook {
            hook(page);
        }

        page.mark_active_nav(page_file)?;
    }

    if let Some(markup) = footer {
        page.set_inner_html(FOOTER_PLACEHOLDER, &markup)?;
    }

    Ok(())
}

// Fetches one HTML fragment resolved against the page's own URL
async fn fetch_fragment(client: &Client, page_url: &Url, relative: &str) -> Result<String> {
    let fragment_url = page_url
        .join(relative)
        .map_err(|e| anyhow!("Invalid partial path '{}': {}", relative, e))?;

    let response = client.get(fragment_url.as_str()).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("HTTP {} for {}", response.status(), fragment_url));
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> PageDocument {
        PageDocument::new(
            r#"<div id="header-placeholder"></div>
               <main>content</main>
               <div id="footer-placeholder"></div>"#
                .to_string(),
        )
    }

    #[test]
    fn test_inject_both_partials() {
        let mut doc = page();
        inject(
            &mut doc,
            Some("<nav><a href=\"blog.html\">Blog</a></nav>".to_string()),
            Some("<p>footer</p>".to_string()),
            "blog.html",
            None,
        )
        .unwrap();

        let html = doc.into_html();
        assert!(html.contains(r#"<a href="blog.html" class="active">"#));
        assert!(html.contains("<p>footer</p>"));
    }

    #[test]
    fn test_missing_header_leaves_container_untouched() {
        let mut doc = page();
        inject(&mut doc, None, Some("<p>footer</p>".to_string()), "index.html", None).unwrap();

        let html = doc.into_html();
        assert!(html.contains(r#"<div id="header-placeholder"></div>"#));
        assert!(html.contains("<p>footer</p>"));
    }

    #[test]
    fn test_nav_hook_runs_before_highlighting() {
        let mut doc = page();
        let hook = |page: &mut PageDocument| {
            // Hook-added nav markup still gets highlighted afterwards
            page.set_inner_html(
                "#header-placeholder",
                "<nav><a href=\"index.html\">Home</a></nav>",
            )
            .unwrap();
        };

        inject(
            &mut doc,
            Some("<div></div>".to_string()),
            None,
            "index.html",
            Some(&hook),
        )
        .unwrap();

        assert!(doc.into_html().contains(r#"class="active""#));
    }
}
