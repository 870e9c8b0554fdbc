// src/main.rs
// =============================================================================
// Entry point.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Print results and exit with a proper code
//    (0 = clean, 1 = assembled with degraded containers, 2 = error)
// =============================================================================

mod blog;
mod cli;
mod page;
mod partials;
mod stats;

use anyhow::{anyhow, Result};
use chrono::Datelike;
use clap::Parser;
use cli::{Cli, Commands};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

use page::PageDocument;

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Assemble {
            page_url,
            out,
            offline,
            category,
        } => handle_assemble(&page_url, out.as_deref(), offline, category.as_deref()).await,
        Commands::Stats { site_url, json } => handle_stats(&site_url, json).await,
        Commands::Blog { json, limit } => handle_blog(json, limit).await,
    }
}

// Handles the 'assemble' subcommand: fetch the page, apply partials, then
// run every pipeline whose placeholder container the page carries.
async fn handle_assemble(
    page_url: &str,
    out: Option<&Path>,
    offline: bool,
    category: Option<&str>,
) -> Result<i32> {
    let category = parse_category_filter(category)?;

    let page_url = Url::parse(page_url)
        .map_err(|e| anyhow!("Invalid page URL '{}': {}", page_url, e))?;

    println!("🔧 Assembling {}", page_url);

    let client = http_client()?;

    // The page itself must load; there is nothing to assemble otherwise
    let html = fetch_text(&client, page_url.as_str()).await?;
    let mut page = PageDocument::new(html);

    partials::apply_partials(&client, &mut page, &page_url, None).await?;

    let mut degraded = false;

    if page.has(page::STATS_CONTAINER) {
        degraded |= assemble_stats(&client, &mut page, &page_url, offline).await?;
    }

    degraded |= assemble_blog(&client, &mut page, offline, category).await?;

    let html = page.into_html();
    match out {
        Some(path) => {
            std::fs::write(path, html)?;
            println!("✅ Wrote {}", path.display());
        }
        None => println!("{}", html),
    }

    if degraded {
        println!("⚠️  Assembled with one or more containers in their error state");
        Ok(1)
    } else {
        Ok(0)
    }
}

// Fills the stats container. Returns true if it ended up in the error state.
async fn assemble_stats(
    client: &Client,
    page: &mut PageDocument,
    page_url: &Url,
    offline: bool,
) -> Result<bool> {
    if offline {
        page.set_inner_html(page::STATS_CONTAINER, &stats::render_loading_tiles())?;
        return Ok(false);
    }

    let projects_url = page_url.join(stats::PROJECTS_PAGE)?;

    // The projects-page fetch is the stats pipeline's fatal point: on
    // failure the tiles render their error state instead of partial sums
    match fetch_text(client, projects_url.as_str()).await {
        Ok(html) => {
            let repos = stats::extract_repos(&html);
            println!("📊 {} repository link(s) on {}", repos.len(), projects_url);

            let totals = stats::fetch_totals(client, &repos).await;
            page.set_inner_html(page::STATS_CONTAINER, &stats::render_stat_tiles(&totals))?;
            Ok(false)
        }
        Err(e) => {
            eprintln!("  Warning: stats unavailable: {}", e);
            page.set_inner_html(page::STATS_CONTAINER, &stats::render_error_tiles())?;
            Ok(true)
        }
    }
}

// Fills whichever blog containers the page carries: the featured article,
// the post grid and its filter buttons (blog page), or the latest-posts
// cards (homepage). Returns true if the feed ended up in the error state.
async fn assemble_blog(
    client: &Client,
    page: &mut PageDocument,
    offline: bool,
    category: Option<blog::Category>,
) -> Result<bool> {
    let has_featured = page.has(page::FEATURED_CONTAINER);
    let has_grid = page.has(page::POSTS_GRID);
    let has_filters = page.has(page::CATEGORY_FILTERS);
    let has_news = page.has(page::NEWS_GRID);

    if !(has_featured || has_grid || has_filters || has_news) {
        return Ok(false);
    }

    if offline {
        for (present, selector) in [
            (has_featured, page::FEATURED_CONTAINER),
            (has_grid, page::POSTS_GRID),
            (has_news, page::NEWS_GRID),
        ] {
            if present {
                page.set_inner_html(selector, &blog::render_loading_state())?;
            }
        }
        return Ok(false);
    }

    let feed = match blog::fetch_feed(client).await {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("  Warning: blog feed unavailable: {}", e);
            for (present, selector) in [
                (has_featured, page::FEATURED_CONTAINER),
                (has_grid, page::POSTS_GRID),
                (has_news, page::NEWS_GRID),
            ] {
                if present {
                    page.set_inner_html(selector, &blog::render_error_state())?;
                }
            }
            return Ok(true);
        }
    };

    if feed.posts.is_empty() {
        for (present, selector) in [
            (has_featured, page::FEATURED_CONTAINER),
            (has_grid, page::POSTS_GRID),
            (has_news, page::NEWS_GRID),
        ] {
            if present {
                page.set_inner_html(selector, &blog::render_empty_state())?;
            }
        }
        if has_filters {
            page.set_inner_html(
                page::CATEGORY_FILTERS,
                &blog::render_category_buttons(&[], category),
            )?;
        }
        return Ok(false);
    }

    println!("📝 {} post(s) in the feed", feed.posts.len());

    if has_featured {
        let markup = blog::render_featured(&feed.posts, chrono::Utc::now().year());
        page.set_inner_html(page::FEATURED_CONTAINER, &markup)?;
    }

    if has_grid {
        let markup = blog::render_posts(&feed.posts[1..], category);
        page.set_inner_html(page::POSTS_GRID, &markup)?;
    }

    if has_filters {
        let markup = blog::render_category_buttons(&feed.categories, category);
        page.set_inner_html(page::CATEGORY_FILTERS, &markup)?;
    }

    if has_news {
        let markup = blog::render_homepage_cards(&feed.posts, blog::HOMEPAGE_POST_COUNT);
        page.set_inner_html(page::NEWS_GRID, &markup)?;
    }

    Ok(false)
}

// Handles the 'stats' subcommand
async fn handle_stats(site_url: &str, json: bool) -> Result<i32> {
    let site = Url::parse(site_url)
        .map_err(|e| anyhow!("Invalid site URL '{}': {}", site_url, e))?;
    let projects_url = site.join(stats::PROJECTS_PAGE)?;

    println!("🔍 Scanning {} for repository links...", projects_url);

    let client = http_client()?;
    let html = fetch_text(&client, projects_url.as_str()).await?;

    let repos = stats::extract_repos(&html);
    if repos.is_empty() {
        println!("⚠️  No repository links found");
        return Ok(0);
    }

    println!("🌐 Looking up {} repositor{}...\n", repos.len(),
        if repos.len() == 1 { "y" } else { "ies" });

    let results = stats::fetch_all(&client, &repos).await;
    let totals = stats::totals(&results);

    if json {
        let output = serde_json::json!({ "repos": results, "totals": totals });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_stats_table(&results, &totals, repos.len());
    }

    Ok(0)
}

// Handles the 'blog' subcommand
async fn handle_blog(json: bool, limit: Option<usize>) -> Result<i32> {
    println!("🔍 Fetching blog index...");

    let client = http_client()?;
    let feed = blog::fetch_feed(&client).await?;

    if feed.posts.is_empty() {
        println!("⚠️  No posts found");
        return Ok(0);
    }

    let shown = match limit {
        Some(limit) => &feed.posts[..feed.posts.len().min(limit)],
        None => &feed.posts[..],
    };

    if json {
        println!("{}", serde_json::to_string_pretty(shown)?);
    } else {
        print_blog_table(shown, &feed);
    }

    Ok(0)
}

fn print_stats_table(results: &[stats::RepoStats], totals: &stats::StatTotals, queried: usize) {
    println!("{:<45} {:>10} {:>10}", "REPOSITORY", "STARS", "FORKS");
    println!("{}", "=".repeat(67));

    for repo in results {
        println!("{:<45} {:>10} {:>10}", truncate(&repo.name, 42), repo.stars, repo.forks);
    }

    println!();
    println!("📊 Summary:");
    println!("   ⭐ Stars: {}", stats::format_number(totals.stars));
    println!("   🍴 Forks: {}", stats::format_number(totals.forks));
    if results.len() < queried {
        println!("   ⚠️  {} lookup(s) failed", queried - results.len());
    }
}

fn print_blog_table(posts: &[blog::BlogPost], feed: &blog::BlogFeed) {
    println!("{:<45} {:<18} {:<14} {:<10}", "TITLE", "DATE", "CATEGORY", "READ");
    println!("{}", "=".repeat(90));

    for post in posts {
        println!(
            "{:<45} {:<18} {:<14} {:<10}",
            truncate(&post.title, 42),
            post.display_date,
            post.category.to_string(),
            format!("{} min", post.read_minutes),
        );
    }

    println!();
    println!("📊 Summary:");
    println!("   📝 Posts: {}", feed.posts.len());
    println!(
        "   🏷️  Categories: {}",
        feed.categories
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ")
    );
}

// Truncates a string for table display
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max).collect::<String>())
    } else {
        text.to_string()
    }
}

// Maps the --category flag to a filter: "all" and absence both mean no filter
fn parse_category_filter(flag: Option<&str>) -> Result<Option<blog::Category>> {
    match flag {
        None => Ok(None),
        Some(slug) if slug.eq_ignore_ascii_case("all") => Ok(None),
        Some(slug) => blog::Category::from_slug(slug)
            .map(Some)
            .ok_or_else(|| anyhow!("Unknown category '{}'", slug)),
    }
}

// One client per command run: 10 second timeout, and a user agent because
// the GitHub API rejects anonymous requests without one
fn http_client() -> Result<Client> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(10))
        .user_agent(concat!("site-weaver/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

// Fetches a URL and returns its body, treating non-success statuses as errors
async fn fetch_text(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;

    if !response.status().is_success() {
        return Err(anyhow!("Failed to fetch {}: HTTP {}", url, response.status()));
    }

    Ok(response.text().await?)
}
