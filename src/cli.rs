// src/cli.rs
// =============================================================================
// Command-line interface, defined with clap's derive API.
//
// Three subcommands, one per way of using the tool:
// - assemble: fetch a page, fill its placeholder containers, emit the result
// - stats:    run the GitHub statistics aggregation standalone
// - blog:     run the blog feed aggregation standalone
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "site-weaver",
    version = "0.1.0",
    about = "Assembles static site pages: shared partials, GitHub stats, blog cards",
    long_about = "site-weaver fetches a page of the site, injects the shared header and \
                  footer partials, and fills every placeholder container the page carries: \
                  GitHub stat tiles, the featured blog post, the post grid, or the \
                  homepage's latest-posts cards."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assemble a page: inject partials and fill its placeholder containers
    ///
    /// Example: site-weaver assemble https://example.com/blog.html --out blog.html
    Assemble {
        /// URL of the page to assemble
        page_url: String,

        /// Write the assembled page to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Skip remote aggregation; containers get loading-state markup
        /// (partials are still applied)
        #[arg(long)]
        offline: bool,

        /// Category selected in the post grid (default: all)
        #[arg(long)]
        category: Option<String>,
    },

    /// Sum stars and forks across the repositories the projects page links to
    ///
    /// Example: site-weaver stats https://example.com/
    Stats {
        /// Site root URL; projects.html is resolved against it
        site_url: String,

        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Scrape and enrich the blog feed, then print it
    ///
    /// Example: site-weaver blog --limit 5
    Blog {
        /// Output results in JSON format instead of a table
        #[arg(long)]
        json: bool,

        /// Print at most this many posts
        #[arg(long)]
        limit: Option<usize>,
    },
}
